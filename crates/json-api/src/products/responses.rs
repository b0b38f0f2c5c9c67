//! Product Responses

use jiff::tz::TimeZone;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::products::{data::IngredientDetail, records::ProductRecord};

use crate::{extensions::*, pagination::PaginationResponse};

/// An ingredient and its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct IngredientDetailBody {
    pub name: String,

    /// Weight in grams, zero or more
    pub grams: f64,

    /// Whether customers are shown this ingredient
    pub is_visible: bool,
}

impl From<IngredientDetailBody> for IngredientDetail {
    fn from(body: IngredientDetailBody) -> Self {
        Self {
            name: body.name,
            grams: body.grams,
            is_visible: body.is_visible,
        }
    }
}

impl From<IngredientDetail> for IngredientDetailBody {
    fn from(detail: IngredientDetail) -> Self {
        Self {
            name: detail.name,
            grams: detail.grams,
            is_visible: detail.is_visible,
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub category_id: Uuid,

    pub category_name: String,

    /// Display name
    pub name: String,

    /// Unit price in minor currency units
    pub price: u64,

    pub description: Option<String>,

    pub ingredients: Option<String>,

    /// Whether the product can be put on new schedules
    pub is_active: bool,

    /// First of `image_urls`, used as the cover image
    pub image_url: Option<String>,

    pub image_urls: Vec<String>,

    pub ingredient_details: Vec<IngredientDetailBody>,

    /// When the product was created
    pub created_at: String,

    /// When the product was last updated
    pub updated_at: String,
}

impl ProductResponse {
    pub(crate) fn render(product: ProductRecord, time_zone: &TimeZone) -> Self {
        Self {
            id: product.uuid.into(),
            category_id: product.category_uuid.into(),
            image_url: product.image_url().map(str::to_string),
            category_name: product.category_name,
            name: product.name,
            price: product.price,
            description: product.description,
            ingredients: product.ingredients,
            is_active: product.is_active,
            image_urls: product.image_urls,
            ingredient_details: product
                .ingredient_details
                .into_iter()
                .map(IngredientDetailBody::from)
                .collect(),
            created_at: product.created_at.render_in(time_zone),
            updated_at: product.updated_at.render_in(time_zone),
        }
    }
}

/// Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub data: Vec<ProductResponse>,

    pub pagination: PaginationResponse,
}

#[cfg(test)]
mod tests {
    use bakelink_app::domain::products::records::ProductUuid;

    use crate::test_helpers::make_product;

    use super::*;

    #[test]
    fn cover_image_is_the_first_url() {
        let mut product = make_product(ProductUuid::new());

        product.image_urls = vec![
            "https://cdn.example.com/front.jpg".to_string(),
            "https://cdn.example.com/side.jpg".to_string(),
        ];

        let response = ProductResponse::render(product, &TimeZone::UTC);

        assert_eq!(
            response.image_url.as_deref(),
            Some("https://cdn.example.com/front.jpg")
        );
        assert_eq!(response.image_urls.len(), 2);
    }

    #[test]
    fn product_without_images_has_no_cover() {
        let response = ProductResponse::render(make_product(ProductUuid::new()), &TimeZone::UTC);

        assert_eq!(response.image_url, None);
        assert_eq!(response.category_name, "Loaves");
    }
}
