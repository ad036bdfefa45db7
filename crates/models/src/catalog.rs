use mongodb::bson::{doc, Document};

/// Fields returned by the single-service lookup; `_id` is always included.
pub const SERVICE_DETAIL_FIELDS: [&str; 4] = ["title", "price", "service_id", "img"];

pub fn service_detail_projection() -> Document {
    let mut projection = Document::new();
    for field in SERVICE_DETAIL_FIELDS {
        projection.insert(field, 1);
    }
    projection
}

/// Apply the detail projection to an already loaded document.
pub fn project_service_detail(source: &Document) -> Document {
    let mut out = doc! {};
    if let Some(id) = source.get("_id") {
        out.insert("_id", id.clone());
    }
    for field in SERVICE_DETAIL_FIELDS {
        if let Some(v) = source.get(field) {
            out.insert(field, v.clone());
        }
    }
    out
}
