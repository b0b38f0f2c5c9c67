//! Schedule Handlers

pub(crate) mod by_date;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod month;
pub(crate) mod update;
