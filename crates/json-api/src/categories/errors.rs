//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use bakelink_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category name already exists")
        }
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::InUse => {
            StatusError::conflict().brief("Category still has products")
        }
        CategoriesServiceError::BlankName => StatusError::bad_request().brief("name is required"),
        CategoriesServiceError::InvalidReference
        | CategoriesServiceError::MissingRequiredData
        | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn in_use_is_a_conflict() {
        let error = into_status_error(CategoriesServiceError::InUse);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "Category still has products");
    }

    #[test]
    fn storage_failure_hides_detail() {
        let error = into_status_error(CategoriesServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.brief.contains("pool"));
    }
}
