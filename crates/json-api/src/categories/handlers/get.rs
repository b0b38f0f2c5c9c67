//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    extensions::*,
    state::State,
};

/// Get Category Handler
#[endpoint(
    tags("product-categories"),
    summary = "Get Category",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let category = state
        .categories
        .get_category(owner, category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoryResponse::render(
        category,
        &req.display_time_zone(),
    )))
}
