use serde::Serialize;

pub mod rules;

// The structure of a single field failure.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,   // e.g. "mobileNumber"
    pub message: String, // e.g. "Please enter a valid Indian mobile number"
}

// The contract every rule must fulfill.
pub trait ValidationRule<T> {
    fn check(&self, subject: &T) -> Vec<FieldError>;
    fn field(&self) -> &str;
}

// The engine that holds the registry of rules for one payload type.
pub struct ValidationEngine<T> {
    rules: Vec<Box<dyn ValidationRule<T> + Send + Sync>>,
}

impl<T> ValidationEngine<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ValidationRule<T> + Send + Sync + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, subject: &T) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            let mut rule_errors = rule.check(subject);
            errors.append(&mut rule_errors);
        }
        errors
    }
}

impl<T> Default for ValidationEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}
