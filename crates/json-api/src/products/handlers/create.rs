//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        responses::{IngredientDetailBody, ProductResponse},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Category the product is listed under
    pub category_id: Uuid,

    /// Display name
    pub name: String,

    /// Unit price in minor currency units
    pub price: u64,

    #[serde(default)]
    pub description: Option<String>,

    /// Free-text ingredient list
    #[serde(default)]
    pub ingredients: Option<String>,

    /// Whether the product can be scheduled; defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,

    /// Image URLs, cover image first
    #[serde(default)]
    pub image_urls: Vec<String>,

    #[serde(default)]
    pub ingredient_details: Vec<IngredientDetailBody>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: request.category_id.into(),
            name: request.name,
            price: request.price,
            description: request.description,
            ingredients: request.ingredients,
            is_active: request.is_active.unwrap_or(true),
            image_urls: request.image_urls,
            ingredient_details: request
                .ingredient_details
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let product = state
        .products
        .create_product(owner, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductResponse::render(
        product,
        &req.display_time_zone(),
    )))
}
