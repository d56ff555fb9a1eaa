//! Identity and session handling.
//!
//! The storefront core treats identity as an external collaborator; this
//! module is the narrow seam it is consumed through. Sessions are opaque
//! bearer tokens stored hashed, each resolving to a user and a [`models::Role`].

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::IdentityServiceError;
pub use service::*;
