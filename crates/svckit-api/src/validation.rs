//! Form validation.

use std::collections::HashMap;

use validator::Validate;

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

/// Validate `form`, reporting only the first failure.
///
/// Failures are ordered by field name. The message is looked up in
/// `messages` under `"field.code"` (e.g. `"email.email"`); when absent the
/// validator's own message is used, then a generic one.
pub fn check_form<F: Validate>(form: &F, messages: &HashMap<String, String>) -> AppResult<()> {
    let Err(errors) = form.validate() else {
        return Ok(());
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, field_errors) in fields {
        let Some(error) = field_errors.first() else {
            continue;
        };
        let lookup = format!("{field}.{}", error.code);
        let message = messages
            .get(&lookup)
            .cloned()
            .or_else(|| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
        return Err(AppError::validation(message));
    }

    Err(AppError::validation("Invalid form"))
}

#[cfg(test)]
mod tests {
    use svckit_core::error::ErrorKind;

    use super::*;

    #[derive(Debug, Validate)]
    struct SignupForm {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
        #[validate(email)]
        email: String,
        #[validate(range(min = 1, max = 120))]
        age: u32,
    }

    fn form(name: &str, email: &str, age: u32) -> SignupForm {
        SignupForm {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(check_form(&form("alice", "a@example.com", 30), &HashMap::new()).is_ok());
    }

    #[test]
    fn test_configured_message_wins() {
        let messages =
            HashMap::from([("email.email".to_string(), "Email address is invalid".to_string())]);
        let err = check_form(&form("alice", "nope", 30), &messages).expect_err("invalid");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Email address is invalid");
    }

    #[test]
    fn test_falls_back_to_validator_message() {
        let err = check_form(&form("al", "a@example.com", 30), &HashMap::new()).expect_err("invalid");
        assert_eq!(err.message, "name too short");
    }

    #[test]
    fn test_first_field_in_name_order() {
        let err = check_form(&form("al", "nope", 0), &HashMap::new()).expect_err("invalid");
        assert_eq!(err.message, "age is invalid (range)");
    }
}
