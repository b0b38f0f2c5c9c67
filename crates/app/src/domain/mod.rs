//! Bakery Domain Concerns

pub mod categories;
pub(crate) mod columns;
pub mod orders;
pub mod owners;
pub mod pagination;
pub mod products;
pub mod schedules;
pub mod search;
pub mod transitions;
