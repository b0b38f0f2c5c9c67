//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    categories::{
        errors::into_status_error, handlers::create::CategoryRequest,
        responses::CategoryResponse,
    },
    extensions::*,
    state::State,
};

/// Update Category Handler
///
/// Renames a category. Its products follow the new name.
#[endpoint(
    tags("product-categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category renamed"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category name already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let renamed = state
        .categories
        .rename_category(owner, category.into_inner().into(), json.into_inner().name)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoryResponse::render(
        renamed,
        &req.display_time_zone(),
    )))
}
