//! Extension traits

mod dates;
mod depot;
mod query;
mod result;
mod time_zone;

pub(crate) use dates::{DateQueryExt as _, parse_date, parse_datetime};
pub(crate) use depot::DepotExt as _;
pub(crate) use query::QueryTextExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use time_zone::{RequestTimeZoneExt as _, TimestampRenderExt as _};
