//! Services - orchestration of mapper and repository calls.

mod post;

pub use post::PostService;
