//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod path;

pub use actor::ActingUser;
pub use json::ValidatedJson;
pub use path::parse_id;
