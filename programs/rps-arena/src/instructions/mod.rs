//! Instruction handlers

pub mod admin;
pub mod player;
pub mod queries;

pub use admin::*;
pub use player::*;
pub use queries::*;
