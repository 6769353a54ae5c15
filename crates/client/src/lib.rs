//! HTTP client for the Stratus checks API.
//!
//! Wraps the `/checks` resource (list, create, get, update, patch,
//! delete, labels, query) over [`reqwest`], using the polymorphic
//! codec from `stratus-core` for check bodies.

pub mod checks;
pub mod error;

pub use checks::{ChecksApi, ListChecksParams};
pub use error::ApiError;
