//! Schedule Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bakelink_app::domain::schedules::data::{ScheduleFilter, ScheduleMonth};

use crate::{
    extensions::*,
    pagination::pagination,
    schedules::{
        errors::into_status_error,
        requests::parse_status,
        responses::{ScheduleSummaryResponse, SchedulesResponse},
    },
    state::State,
};

/// Schedule Index Handler
///
/// An exact `date` overrides the other date filters; `month` and the
/// `date_from`/`date_to` range combine. Without `page` or `limit` every
/// matching schedule is returned.
#[endpoint(
    tags("schedules"),
    summary = "List Schedules",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Schedules ordered by date"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one extractor per query parameter")]
pub(crate) async fn handler(
    date: QueryParam<String, false>,
    month: QueryParam<String, false>,
    date_from: QueryParam<String, false>,
    date_to: QueryParam<String, false>,
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SchedulesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let time_zone = req.display_time_zone();

    let month = month
        .into_non_blank()
        .map(|raw| raw.parse::<ScheduleMonth>())
        .transpose()
        .or_400("month must be YYYY-MM format")?;

    let filter = ScheduleFilter {
        date: date.into_date("date")?,
        month,
        date_from: date_from.into_date("date_from")?,
        date_to: date_to.into_date("date_to")?,
        status: parse_status(status.into_non_blank().as_deref())?,
    };

    let schedules = state
        .schedules
        .list_schedules(owner, filter, pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(SchedulesResponse {
        data: schedules
            .items
            .into_iter()
            .map(|summary| ScheduleSummaryResponse::render(summary, &time_zone))
            .collect(),
        pagination: schedules.meta.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bakelink_app::domain::{
        pagination::{Paginated, Pagination},
        schedules::{
            MockSchedulesService,
            records::{ScheduleSummaryRecord, ScheduleUuid},
            status::ScheduleStatus,
        },
    };
    use jiff::{Timestamp, civil::date};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_OWNER_UUID, schedules_service};

    use super::*;

    fn make_service(schedules: MockSchedulesService) -> Service {
        schedules_service(schedules, Router::with_path("schedules").get(handler))
    }

    fn summary(day: i8) -> ScheduleSummaryRecord {
        ScheduleSummaryRecord {
            uuid: ScheduleUuid::new(),
            schedule_date: date(2026, 3, day),
            status: ScheduleStatus::Announced,
            order_start_at: Timestamp::UNIX_EPOCH,
            order_end_at: Timestamp::UNIX_EPOCH,
            note: None,
            item_count: 2,
            order_count: 1,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_index_passes_filters_and_paginates() -> TestResult {
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_list_schedules()
            .once()
            .withf(|owner, filter, pagination| {
                *owner == TEST_OWNER_UUID
                    && filter.month.map(|m| m.to_string()).as_deref() == Some("2026-03")
                    && filter.date_from == Some(date(2026, 3, 10))
                    && filter.status == Some(ScheduleStatus::Announced)
                    && *pagination == Pagination::Page { page: 2, limit: 1 }
            })
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![summary(12)],
                    meta: pagination.meta(2),
                })
            });

        let response: SchedulesResponse = TestClient::get(
            "http://example.com/schedules?month=2026-03&date_from=2026-03-10&status=announced&page=2&limit=1",
        )
        .send(&make_service(schedules))
        .await
        .take_json()
        .await?;

        let first = response.data.first().ok_or("expected one schedule")?;

        assert_eq!(response.data.len(), 1);
        assert_eq!(first.schedule_date, "2026-03-12");
        assert_eq!(first.status, "ANNOUNCED");
        assert_eq!(first.item_count, 2);
        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.pagination.total_pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_paging_returns_everything() -> TestResult {
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_list_schedules()
            .once()
            .withf(|_, filter, pagination| {
                *filter == ScheduleFilter::default() && *pagination == Pagination::All
            })
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![summary(1), summary(2)],
                    meta: pagination.meta(2),
                })
            });

        let response: SchedulesResponse = TestClient::get("http://example.com/schedules")
            .send(&make_service(schedules))
            .await
            .take_json()
            .await?;

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.pagination.page, 1);
        assert_eq!(response.pagination.limit, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_bad_date_returns_400() {
        let res = TestClient::get("http://example.com/schedules?date=2026/03/01")
            .send(&make_service(MockSchedulesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_bad_month_returns_400() {
        let res = TestClient::get("http://example.com/schedules?month=2026-13")
            .send(&make_service(MockSchedulesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_blank_status_and_month_are_ignored() -> TestResult {
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_list_schedules()
            .once()
            .withf(|_, filter, _| *filter == ScheduleFilter::default())
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![],
                    meta: pagination.meta(0),
                })
            });

        let res = TestClient::get("http://example.com/schedules?status=&month=%20")
            .send(&make_service(schedules))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_bad_status_returns_400() {
        let res = TestClient::get("http://example.com/schedules?status=SOLD_OUT")
            .send(&make_service(MockSchedulesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
