//! Data Transfer Objects for REST request/response serialization.

pub mod registration_dto;

pub use registration_dto::*;
