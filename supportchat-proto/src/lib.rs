//! Shared message model for `SupportChat`.

pub mod message;
pub mod presence;
pub mod report;
pub mod typing;
