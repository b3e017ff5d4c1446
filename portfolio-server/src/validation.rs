//! Contact form validation.
//!
//! Every field is checked and every violation reported, so the form can
//! highlight all problems at once. Values are trimmed before checks and stored
//! trimmed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use storage::NewContactMessage;

/// RFC 5321 upper bound on an address.
pub const EMAIL_MAX_CHARS: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Syntactic check only; deliverability is not verified.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !local.ends_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

fn required_text(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let reason = match object.get(field) {
        None | Some(Value::Null) => "Required".to_string(),
        Some(Value::String(raw)) => {
            let value = raw.trim();
            if value.is_empty() {
                "Must not be empty".to_string()
            } else {
                return Some(value.to_string());
            }
        }
        Some(_) => "Expected a string".to_string(),
    };
    violations.push(FieldViolation::new(field, reason));
    None
}

/// Validates a contact submission body.
///
/// Violations are listed in field order: name, email, subject, message.
pub fn validate_contact(body: &Value) -> Result<NewContactMessage, Vec<FieldViolation>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldViolation::new("body", "Expected a JSON object")]);
    };

    let mut violations = Vec::new();

    let name = required_text(object, "name", &mut violations);
    let email = match required_text(object, "email", &mut violations) {
        Some(email) if email.chars().count() > EMAIL_MAX_CHARS => {
            violations.push(FieldViolation::new(
                "email",
                format!("Must be at most {EMAIL_MAX_CHARS} characters"),
            ));
            None
        }
        Some(email) if !is_valid_email(&email) => {
            violations.push(FieldViolation::new("email", "Invalid email address"));
            None
        }
        other => other,
    };
    let subject = required_text(object, "subject", &mut violations);
    let message = required_text(object, "message", &mut violations);

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) => {
            Ok(NewContactMessage::new(name, email, subject, message))
        }
        _ => Err(violations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "Collaboration",
            "message": "Let's build something."
        })
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let mut body = valid_body();
        body["name"] = json!("  Ada Lovelace  ");

        let data = validate_contact(&body).unwrap();
        assert_eq!(data.name, "Ada Lovelace");
        assert_eq!(data.email, "ada@example.com");
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let violations = validate_contact(&json!({})).unwrap_err();

        assert_eq!(fields(&violations), ["name", "email", "subject", "message"]);
        assert!(violations.iter().all(|v| v.reason == "Required"));
    }

    #[test]
    fn test_empty_and_whitespace_fields_rejected() {
        let mut body = valid_body();
        body["subject"] = json!("");
        body["message"] = json!("   \n\t");

        let violations = validate_contact(&body).unwrap_err();
        assert_eq!(fields(&violations), ["subject", "message"]);
        assert_eq!(violations[0].reason, "Must not be empty");
    }

    #[test]
    fn test_non_string_field_rejected() {
        let mut body = valid_body();
        body["name"] = json!(42);
        body["email"] = json!(null);

        let violations = validate_contact(&body).unwrap_err();
        assert_eq!(violations[0], FieldViolation::new("name", "Expected a string"));
        assert_eq!(violations[1], FieldViolation::new("email", "Required"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        for bad in ["plainaddress", "a@b", "@example.com", "a..b@example.com", "a@exa mple.com", ".a@example.com"] {
            let mut body = valid_body();
            body["email"] = json!(bad);
            let violations = validate_contact(&body).unwrap_err();
            assert_eq!(violations, vec![FieldViolation::new("email", "Invalid email address")], "{bad}");
        }
    }

    #[test]
    fn test_accepts_common_email_shapes() {
        for good in ["a@example.com", "first.last+tag@sub.example.co.uk", "x_y-z@my-host.io"] {
            assert!(is_valid_email(good), "{good}");
        }
    }

    #[test]
    fn test_long_fields_accepted() {
        let mut body = valid_body();
        body["name"] = json!("n".repeat(500));
        body["subject"] = json!("s".repeat(1000));
        body["message"] = json!("x".repeat(20_000));

        let data = validate_contact(&body).unwrap();
        assert_eq!(data.message.len(), 20_000);
        assert_eq!(data.subject.len(), 1000);
    }

    #[test]
    fn test_overlong_email_rejected() {
        let mut body = valid_body();
        body["email"] = json!(format!("{}@example.com", "a".repeat(EMAIL_MAX_CHARS)));

        let violations = validate_contact(&body).unwrap_err();
        assert_eq!(
            violations,
            vec![FieldViolation::new("email", "Must be at most 254 characters")]
        );
    }

    #[test]
    fn test_non_object_body_rejected() {
        let violations = validate_contact(&json!(["name"])).unwrap_err();
        assert_eq!(fields(&violations), ["body"]);
    }
}
