//! HTTP route handlers for the translator API.
//!
//! All routes return JSON. Handled translation failures are `{"error": ...}`
//! bodies with status 200; malformed bodies are rejected by the `Json`
//! extractor before a handler runs.

mod health;
mod translate;

pub use health::home;
pub use translate::translate;
