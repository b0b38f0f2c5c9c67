//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let product = state
        .products
        .get_product(owner, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::render(
        product,
        &req.display_time_zone(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bakelink_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{TEST_OWNER_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |owner, u| *owner == TEST_OWNER_UUID && *u == uuid)
            .return_once(move |_, _| Ok(make_product(uuid)));

        let response: ProductResponse = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.id, uuid.into_uuid());
        assert_eq!(response.name, "Sourdough");
        assert_eq!(response.price, 4_500);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{}", Uuid::now_v7()))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() {
        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
