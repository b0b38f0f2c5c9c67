//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bakelink_app::domain::categories::data::CategoryFilter;

use crate::{
    categories::{
        errors::into_status_error,
        responses::{CategoriesResponse, CategoryResponse},
    },
    extensions::*,
    pagination::pagination,
    state::State,
};

/// Category Index Handler
///
/// Lists categories oldest first. `keyword` matches part of the name,
/// ignoring case.
#[endpoint(
    tags("product-categories"),
    summary = "List Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    keyword: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let time_zone = req.display_time_zone();

    let filter = CategoryFilter {
        keyword: keyword.into_non_blank(),
    };

    let categories = state
        .categories
        .list_categories(owner, filter, pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        data: categories
            .items
            .into_iter()
            .map(|category| CategoryResponse::render(category, &time_zone))
            .collect(),
        pagination: categories.meta.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bakelink_app::domain::{
        categories::{CategoriesServiceError, MockCategoriesService, records::CategoryUuid},
        pagination::{Paginated, Pagination},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_OWNER_UUID, categories_service, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(categories, Router::with_path("product-categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_passes_keyword_and_paging() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .withf(|owner, filter, pagination| {
                *owner == TEST_OWNER_UUID
                    && filter.keyword.as_deref() == Some("bread")
                    && *pagination == Pagination::Page { page: 1, limit: 5 }
            })
            .return_once(move |_, _, pagination| {
                Ok(Paginated {
                    items: vec![make_category(uuid)],
                    meta: pagination.meta(1),
                })
            });

        let response: CategoriesResponse =
            TestClient::get("http://example.com/product-categories?keyword=%20bread%20&limit=5")
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        let ids: Vec<_> = response.data.iter().map(|c| c.id).collect();

        assert_eq!(ids, vec![uuid.into_uuid()]);
        assert_eq!(response.pagination.limit, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_blank_keyword_lists_everything() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .withf(|_, filter, pagination| {
                *filter == CategoryFilter::default() && *pagination == Pagination::All
            })
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![],
                    meta: pagination.meta(0),
                })
            });

        let response: CategoriesResponse =
            TestClient::get("http://example.com/product-categories?keyword=")
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert!(response.data.is_empty());
        assert_eq!(response.pagination.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(|_, _, _| Err(CategoriesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/product-categories")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
