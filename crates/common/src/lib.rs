pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_shape() {
        let body = types::ErrorBody::new("Unauthorized Access");
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"error": true, "message": "Unauthorized Access"}));
    }
}
