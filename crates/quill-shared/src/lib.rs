//! # Quill Shared
//!
//! Wire types shared by the API boundary and the service layer.
//! Nothing in here touches storage or the HTTP runtime.

pub mod dto;
pub mod response;
pub mod timestamp;

pub use dto::{PostRequest, PostResponse};
pub use response::{ErrorResponse, ValidationErrors};
