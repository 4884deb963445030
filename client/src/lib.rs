//! FitLife Client SDK
//!
//! Client-side core of the FitLife fitness-social application: resource
//! clients over the REST backend, a request gateway with bearer credential
//! injection, and the view-state controllers that keep posts, comments, and
//! the profile consistent through optimistic updates.

pub mod api;
pub mod assets;
pub mod config;
pub mod gateway;
pub mod models;
pub mod progress;
pub mod state;

pub use error_types::{ClientError, Result};
pub use gateway::{ApiBody, FormPayload, Gateway, HttpGateway};
