//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use bakelink_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    pagination::pagination,
    products::{
        errors::into_status_error,
        responses::{ProductResponse, ProductsResponse},
    },
    state::State,
};

/// Product Index Handler
///
/// Returns products that have not been deleted, oldest first. `keyword`
/// matches part of the name ignoring case, `category_id` narrows the list to
/// one category.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    keyword: QueryParam<String, false>,
    category_id: QueryParam<Uuid, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let time_zone = req.display_time_zone();

    let filter = ProductFilter {
        keyword: keyword.into_non_blank(),
        category_uuid: category_id.into_inner().map(Into::into),
    };

    let products = state
        .products
        .list_products(owner, filter, pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        data: products
            .items
            .into_iter()
            .map(|product| ProductResponse::render(product, &time_zone))
            .collect(),
        pagination: products.meta.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bakelink_app::domain::{
        categories::records::CategoryUuid,
        pagination::{Paginated, Pagination},
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };

    use crate::test_helpers::{TEST_OWNER_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|owner, filter, pagination| {
                *owner == TEST_OWNER_UUID
                    && *filter == ProductFilter::default()
                    && *pagination == Pagination::All
            })
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![],
                    meta: pagination.meta(0),
                })
            });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.data.is_empty());
        assert_eq!(response.pagination.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_order() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(move |_, _, pagination| {
                Ok(Paginated {
                    items: vec![make_product(uuid_a), make_product(uuid_b)],
                    meta: pagination.meta(2),
                })
            });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let ids: Vec<_> = response.data.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_passes_keyword_category_and_paging() -> TestResult {
        let category = CategoryUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(move |_, filter, pagination| {
                *filter
                    == ProductFilter {
                        keyword: Some("rye".to_string()),
                        category_uuid: Some(category),
                    }
                    && *pagination == Pagination::Page { page: 2, limit: 10 }
            })
            .return_once(|_, _, pagination| {
                Ok(Paginated {
                    items: vec![],
                    meta: pagination.meta(11),
                })
            });

        let response: ProductsResponse = TestClient::get(format!(
            "http://example.com/products?keyword=%20rye&category_id={category}&page=2&limit=10"
        ))
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        assert_eq!(response.pagination.total, 11);
        assert_eq!(response.pagination.page, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_category_id_returns_400() {
        let res = TestClient::get("http://example.com/products?category_id=loaves")
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
