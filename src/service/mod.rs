pub mod auth_service;
pub mod quote_service;

pub use auth_service::{AuthService, RegisterOutcome, Registration};
pub use quote_service::QuoteService;
