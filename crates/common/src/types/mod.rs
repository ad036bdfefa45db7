use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned for every rejected request: `{"error": true, "message": "..."}`.
#[derive(Serialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: true, message: message.into() }
    }
}
