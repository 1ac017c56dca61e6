//! Core type definitions shared across the svckit workspace.

pub mod pagination;
pub mod response;

pub use pagination::{PageParam, TimeRange};
pub use response::{DataResponse, ResponseCode};
