//! Data transfer objects for the user service.

mod user_dto;

pub use user_dto::*;
