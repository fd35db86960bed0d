pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::Backend;
pub use client::ZenApi;
pub use error::{ApiError, ApiResult};
pub use types::*;
