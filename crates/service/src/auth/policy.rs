use serde_json::Value;

use super::token::Claims;

/// A caller may list bookings only for the email carried in their token.
/// An absent query email matches only a token without an `email` claim.
pub fn may_list_bookings(claims: &Claims, query_email: Option<&str>) -> bool {
    match (claims.get("email"), query_email) {
        (None, None) => true,
        (Some(Value::String(claimed)), Some(requested)) => claimed == requested,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(v: serde_json::Value) -> Claims {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn same_email_is_allowed() {
        assert!(may_list_bookings(&claims(json!({"email": "a@b.com"})), Some("a@b.com")));
    }

    #[test]
    fn different_or_missing_email_is_denied() {
        let c = claims(json!({"email": "a@b.com"}));
        assert!(!may_list_bookings(&c, Some("x@y.com")));
        assert!(!may_list_bookings(&c, None));
        assert!(!may_list_bookings(&claims(json!({})), Some("a@b.com")));
        assert!(!may_list_bookings(&claims(json!({"email": 5})), Some("5")));
    }

    #[test]
    fn no_email_on_either_side_lists_everything() {
        assert!(may_list_bookings(&claims(json!({"name": "anon"})), None));
    }
}
