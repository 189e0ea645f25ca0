//! Common types shared between the layers

pub mod language;
pub mod response;

pub use language::Language;
pub use response::ApiResponse;
