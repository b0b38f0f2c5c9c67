//! Products Data

use serde::{Deserialize, Serialize};

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// One ingredient with its weight, stored as part of the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDetail {
    pub name: String,
    pub grams: f64,

    /// Whether customers are shown this ingredient.
    pub is_visible: bool,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub price: u64,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub is_active: bool,
    pub image_urls: Vec<String>,
    pub ingredient_details: Vec<IngredientDetail>,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value. `description: Some(None)`
/// clears the description, and likewise for `ingredients`. Lists are replaced
/// as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub category_uuid: Option<CategoryUuid>,
    pub name: Option<String>,
    pub price: Option<u64>,
    pub description: Option<Option<String>>,
    pub ingredients: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub image_urls: Option<Vec<String>>,
    pub ingredient_details: Option<Vec<IngredientDetail>>,
}

/// Product list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product or category name.
    pub keyword: Option<String>,
    pub category_uuid: Option<CategoryUuid>,
}
