//! App Router

use salvo::Router;

use crate::{auth, categories, orders, products, schedules};

/// Every resource route, behind bearer authentication.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(resources())
}

fn resources() -> Router {
    Router::new()
        .push(
            Router::with_path("product-categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("schedules")
                .get(schedules::index::handler)
                .post(schedules::create::handler)
                .push(Router::with_path("month/{month}").get(schedules::month::handler))
                // Reads are keyed by date, writes by id.
                .push(Router::with_path("{date}").get(schedules::by_date::handler))
                .push(
                    Router::with_path("{schedule}")
                        .put(schedules::update::handler)
                        .delete(schedules::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").put(orders::update_status::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bakelink_app::domain::{
        categories::{MockCategoriesService, records::CategoryUuid},
        schedules::{MockSchedulesService, records::ScheduleUuid},
    };
    use salvo::{affix_state::inject, prelude::*, test::TestClient};

    use crate::{
        state::State,
        test_helpers::{inject_owner, make_schedule, test_state},
    };

    use super::*;

    fn make_service(schedules: MockSchedulesService) -> Service {
        let state = State {
            schedules: Arc::new(schedules),
            ..test_state()
        };

        Service::new(
            Router::new()
                .hoop(inject(Arc::new(state)))
                .hoop(inject_owner)
                .push(resources()),
        )
    }

    #[tokio::test]
    async fn test_schedule_get_routes_by_date_and_put_by_id() {
        let uuid = ScheduleUuid::new();
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_get_schedule_by_date()
            .once()
            .return_once(|_, _| Ok(None));

        schedules
            .expect_update_schedule()
            .once()
            .return_once(|_, schedule, _| Ok(make_schedule(schedule)));

        let service = make_service(schedules);

        let by_date = TestClient::get("http://example.com/schedules/2026-02-17")
            .send(&service)
            .await;

        let update = TestClient::put(format!("http://example.com/schedules/{uuid}"))
            .json(&serde_json::json!({ "note": "Closed early" }))
            .send(&service)
            .await;

        assert_eq!(by_date.status_code, Some(StatusCode::OK));
        assert_eq!(update.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_schedule_month_route_wins_over_date_route() {
        let mut schedules = MockSchedulesService::new();

        schedules
            .expect_list_schedules_by_month()
            .once()
            .return_once(|_, _, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/schedules/month/2026-02")
            .send(&make_service(schedules))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_product_categories_route_is_separate_from_products() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_, _| Ok(()));

        let state = State {
            categories: Arc::new(categories),
            ..test_state()
        };

        let service = Service::new(
            Router::new()
                .hoop(inject(Arc::new(state)))
                .hoop(inject_owner)
                .push(resources()),
        );

        let res = TestClient::delete(format!(
            "http://example.com/product-categories/{}",
            CategoryUuid::new()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_resources_require_bearer_token() {
        let service = Service::new(
            Router::new()
                .hoop(inject(Arc::new(test_state())))
                .push(app_router()),
        );

        let res = TestClient::get("http://example.com/orders")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
