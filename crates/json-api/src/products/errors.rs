//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use bakelink_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::BlankName => StatusError::bad_request().brief("name is required"),
        ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("price is out of range")
        }
        error @ (ProductsServiceError::BlankImageUrl
        | ProductsServiceError::BlankIngredientName
        | ProductsServiceError::InvalidIngredientGrams) => {
            StatusError::bad_request().brief(error.to_string())
        }
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid category_id for current user")
        }
        ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
