//! Product Records

use jiff::Timestamp;

use crate::{
    domain::{categories::records::CategoryUuid, products::data::IngredientDetail},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub name: String,
    pub price: u64,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub is_active: bool,
    pub image_urls: Vec<String>,
    pub ingredient_details: Vec<IngredientDetail>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// The cover image, when there is one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}
