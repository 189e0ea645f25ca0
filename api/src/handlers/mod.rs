//! Conversion of domain results into HTTP responses

pub mod error;
pub mod outcome;

pub use error::{handle_domain_error, language_from_request, validation_error_response};
pub use outcome::{resend_outcome_response, verify_outcome_response};
