//! HTTP span helpers.

use jiff::civil::Date;
use uuid::Uuid;

use bakelink_app::domain::schedules::data::ScheduleMonth;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace identifier, date and month segments with placeholders so span
/// names and metric labels stay low-cardinality.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else if segment.parse::<Date>().is_ok() {
                "{date}"
            } else if segment.parse::<ScheduleMonth>().is_ok() {
                "{month}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_kept() {
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn identifiers_dates_and_months_become_placeholders() {
        let uuid = Uuid::now_v7();

        assert_eq!(
            route_template(&format!("/orders/{uuid}/status")),
            "/orders/{id}/status"
        );
        assert_eq!(route_template("/schedules/2026-02-17"), "/schedules/{date}");
        assert_eq!(
            route_template("/schedules/month/2026-02"),
            "/schedules/month/{month}"
        );
    }

    #[test]
    fn span_name_includes_method() {
        let names = request_span_name("GET", "/products");

        assert_eq!(names.route, "/products");
        assert_eq!(names.otel_span_name, "GET /products");
    }
}
