//! Schedules

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod status;

pub use errors::SchedulesServiceError;
pub use service::*;
