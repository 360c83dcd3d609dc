pub mod error;
pub mod outbox;
pub mod repository;
pub mod schema;

// Re-export common types for convenience
pub use outbox::{NewOutboxEmail, OutboxEmail, OutboxRepository};
pub use repository::ApplicantRepository;
