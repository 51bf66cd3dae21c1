//! # Quill Core
//!
//! The domain layer: the post entity, mapping between wire and storage shapes,
//! the repository port, and the service orchestrating them.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod mapper;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostService;
