//! Caller time zone resolution for rendered timestamps.

use jiff::{Timestamp, tz::TimeZone};
use salvo::Request;

pub(crate) const TIME_ZONE_HEADER: &str = "x-timezone";

/// Resolve the time zone timestamps are rendered in.
pub(crate) trait RequestTimeZoneExt {
    /// The IANA zone named by `X-Timezone`, or UTC when missing or unknown.
    fn display_time_zone(&self) -> TimeZone;
}

impl RequestTimeZoneExt for Request {
    fn display_time_zone(&self) -> TimeZone {
        self.header::<String>(TIME_ZONE_HEADER)
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .and_then(|name| TimeZone::get(name).ok())
            .unwrap_or(TimeZone::UTC)
    }
}

pub(crate) trait TimestampRenderExt {
    /// RFC 3339 with the zone's offset at this instant.
    fn render_in(self, time_zone: &TimeZone) -> String;
}

impl TimestampRenderExt for Timestamp {
    fn render_in(self, time_zone: &TimeZone) -> String {
        self.display_with_offset(time_zone.to_offset(self))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn renders_with_zone_offset() -> TestResult {
        let timestamp: Timestamp = "2026-02-17T10:00:00Z".parse()?;
        let seoul = TimeZone::get("Asia/Seoul")?;

        assert_eq!(timestamp.render_in(&seoul), "2026-02-17T19:00:00+09:00");

        Ok(())
    }

    #[test]
    fn utc_rendering_round_trips() -> TestResult {
        let timestamp: Timestamp = "2026-02-17T10:00:00Z".parse()?;

        let rendered: Timestamp = timestamp.render_in(&TimeZone::UTC).parse()?;

        assert_eq!(rendered, timestamp);

        Ok(())
    }
}
