//! Schedules

mod errors;
mod handlers;
mod requests;
mod responses;

pub(crate) use handlers::*;
