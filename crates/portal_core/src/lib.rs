pub mod error;
pub mod models;
pub mod progress;
pub mod validation;

use validation::{rules, ValidationEngine};

/// Builds the rule registry applied to every registration request.
pub fn registration_validator() -> ValidationEngine<models::applicant::RegistrationFields> {
    ValidationEngine::new()
        .add_rule(rules::PostCodeRequired)
        .add_rule(rules::FullNameLength)
        .add_rule(rules::MobileNumberFormat)
        .add_rule(rules::EmailFormat)
        .add_rule(rules::PasswordLength)
}

/// Formats an allocated sequence value as a public applicant id.
///
/// The sequence is bounded to 100000..=999999, so the numeric part is
/// always exactly six digits.
pub fn format_applicant_id(prefix: &str, sequence_value: i64) -> String {
    format!("{}{:06}", prefix, sequence_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::applicant::RegistrationFields;

    fn valid_fields() -> RegistrationFields {
        RegistrationFields {
            post_code: "ENG-04".to_string(),
            full_name: "Asha Verma".to_string(),
            mobile_number: "9876543210".to_string(),
            alternate_mobile_number: None,
            email_address: "asha@example.com".to_string(),
            password: "secret123".to_string(),
        }
    }

    #[test]
    fn applicant_id_is_prefix_plus_six_digits() {
        let id = format_applicant_id("NRP", 100000);
        assert_eq!(id, "NRP100000");

        let id = format_applicant_id("NRP", 999999);
        assert_eq!(id, "NRP999999");

        // Shape check mirrors what registered clients rely on.
        let (alpha, digits) = id.split_at(3);
        assert!(alpha.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn registration_validator_accepts_valid_fields() {
        let errors = registration_validator().run(&valid_fields());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn registration_validator_reports_each_bad_field() {
        let mut fields = valid_fields();
        fields.post_code = "".to_string();
        fields.mobile_number = "12345".to_string();
        fields.password = "1234".to_string();

        let errors = registration_validator().run(&fields);
        let fields_with_errors: Vec<&str> =
            errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields_with_errors.contains(&"postCode"));
        assert!(fields_with_errors.contains(&"mobileNumber"));
        assert!(fields_with_errors.contains(&"password"));
        assert!(!fields_with_errors.contains(&"emailAddress"));
    }
}
