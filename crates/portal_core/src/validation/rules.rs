use crate::models::applicant::RegistrationFields;
use crate::validation::{FieldError, ValidationRule};

fn failure(field: &str, message: &str) -> Vec<FieldError> {
    vec![FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }]
}

// =========================================================================
// RULE: postCode must be present
// =========================================================================
pub struct PostCodeRequired;

impl ValidationRule<RegistrationFields> for PostCodeRequired {
    fn field(&self) -> &str {
        "postCode"
    }

    fn check(&self, subject: &RegistrationFields) -> Vec<FieldError> {
        if subject.post_code.trim().is_empty() {
            return failure(self.field(), "Post code is required");
        }
        Vec::new()
    }
}

// =========================================================================
// RULE: fullName must be present and at least 2 characters
// =========================================================================
pub struct FullNameLength;

impl ValidationRule<RegistrationFields> for FullNameLength {
    fn field(&self) -> &str {
        "fullName"
    }

    fn check(&self, subject: &RegistrationFields) -> Vec<FieldError> {
        let name = subject.full_name.trim();
        if name.is_empty() {
            return failure(self.field(), "Full name is required");
        }
        if name.chars().count() < 2 {
            return failure(self.field(), "Full name must be at least 2 characters");
        }
        Vec::new()
    }
}

// =========================================================================
// RULE: mobileNumber must be a 10-digit Indian mobile number
// (first digit 6-9, as the upstream carriers allocate them)
// =========================================================================
pub struct MobileNumberFormat;

pub fn is_indian_mobile(number: &str) -> bool {
    let digits: Vec<char> = number.chars().collect();
    digits.len() == 10
        && digits.iter().all(|c| c.is_ascii_digit())
        && matches!(digits[0], '6'..='9')
}

impl ValidationRule<RegistrationFields> for MobileNumberFormat {
    fn field(&self) -> &str {
        "mobileNumber"
    }

    fn check(&self, subject: &RegistrationFields) -> Vec<FieldError> {
        if subject.mobile_number.trim().is_empty() {
            return failure(self.field(), "Mobile number is required");
        }
        if !is_indian_mobile(subject.mobile_number.trim()) {
            return failure(self.field(), "Please enter a valid Indian mobile number");
        }
        Vec::new()
    }
}

// =========================================================================
// RULE: emailAddress must look like an email
// =========================================================================
pub struct EmailFormat;

pub fn is_plausible_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !address.contains(char::is_whitespace)
}

impl ValidationRule<RegistrationFields> for EmailFormat {
    fn field(&self) -> &str {
        "emailAddress"
    }

    fn check(&self, subject: &RegistrationFields) -> Vec<FieldError> {
        if subject.email_address.trim().is_empty() {
            return failure(self.field(), "Email is required");
        }
        if !is_plausible_email(subject.email_address.trim()) {
            return failure(self.field(), "Please enter a valid email");
        }
        Vec::new()
    }
}

// =========================================================================
// RULE: password must be at least 6 characters
// =========================================================================
pub struct PasswordLength;

impl ValidationRule<RegistrationFields> for PasswordLength {
    fn field(&self) -> &str {
        "password"
    }

    fn check(&self, subject: &RegistrationFields) -> Vec<FieldError> {
        if subject.password.is_empty() {
            return failure(self.field(), "Password is required");
        }
        if subject.password.chars().count() < 6 {
            return failure(self.field(), "Password must be at least 6 characters");
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_format() {
        assert!(is_indian_mobile("9876543210"));
        assert!(is_indian_mobile("6000000000"));
        assert!(!is_indian_mobile("5876543210")); // bad leading digit
        assert!(!is_indian_mobile("98765432")); // too short
        assert!(!is_indian_mobile("98765432101")); // too long
        assert!(!is_indian_mobile("98765abc10"));
    }

    #[test]
    fn email_format() {
        assert!(is_plausible_email("a@x.com"));
        assert!(is_plausible_email("first.last@dept.example.in"));
        assert!(!is_plausible_email("no-at-sign.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("a@nodot"));
        assert!(!is_plausible_email("a b@example.com"));
    }
}
