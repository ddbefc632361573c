//! Data Transfer Objects for REST request/response serialization.
//!
//! All numeric amounts are serialized as JSON strings to prevent
//! precision loss on u128 values.

pub mod common_dto;
pub mod fight_dto;
pub mod shape_dto;

pub use common_dto::*;
pub use fight_dto::*;
pub use shape_dto::*;
