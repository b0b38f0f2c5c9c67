//! Category Responses

use jiff::tz::TimeZone;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::categories::records::CategoryRecord;

use crate::{extensions::*, pagination::PaginationResponse};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: Uuid,

    /// Display name, unique per owner
    pub name: String,

    pub created_at: String,

    pub updated_at: String,
}

impl CategoryResponse {
    pub(crate) fn render(category: CategoryRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: category.uuid.into(),
            name: category.name,
            created_at: category.created_at.render_in(time_zone),
            updated_at: category.updated_at.render_in(time_zone),
        }
    }
}

/// Categories Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub data: Vec<CategoryResponse>,

    pub pagination: PaginationResponse,
}
