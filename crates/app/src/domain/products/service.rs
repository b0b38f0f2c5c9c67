//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        owners::records::OwnerUuid,
        pagination::{Paginated, Pagination},
        products::{
            data::{IngredientDetail, NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        owner: OwnerUuid,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let total = self.repository.count_products(&mut tx, &filter).await?;

        let items = self
            .repository
            .list_products(&mut tx, &filter, pagination)
            .await?;

        tx.commit().await?;

        Ok(Paginated {
            items,
            meta: pagination.meta(total),
        })
    }

    async fn get_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        owner: OwnerUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        i64::try_from(product.price)?;

        let product = NewProduct {
            name: product_name(&product.name)?,
            description: product.description.as_deref().and_then(optional_text),
            ingredients: product.ingredients.as_deref().and_then(optional_text),
            image_urls: image_urls(product.image_urls)?,
            ingredient_details: ingredient_details(product.ingredient_details)?,
            ..product
        };

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        info!(owner_uuid = %owner, product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if let Some(price) = update.price {
            i64::try_from(price)?;
        }

        let update = ProductUpdate {
            name: update.name.as_deref().map(product_name).transpose()?,
            description: update
                .description
                .map(|text| text.as_deref().and_then(optional_text)),
            ingredients: update
                .ingredients
                .map(|text| text.as_deref().and_then(optional_text)),
            image_urls: update.image_urls.map(image_urls).transpose()?,
            ingredient_details: update
                .ingredient_details
                .map(ingredient_details)
                .transpose()?,
            ..update
        };

        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        info!(owner_uuid = %owner, product_uuid = %product, "updated product");

        Ok(updated)
    }

    async fn delete_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_owner_transaction(owner).await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(owner_uuid = %owner, product_uuid = %product, "deleted product");

        Ok(())
    }
}

fn product_name(raw: &str) -> Result<String, ProductsServiceError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::BlankName);
    }

    Ok(name.to_string())
}

/// Trimmed free text; blank text is stored as no text.
fn optional_text(raw: &str) -> Option<String> {
    let text = raw.trim();

    (!text.is_empty()).then(|| text.to_string())
}

fn image_urls(urls: Vec<String>) -> Result<Vec<String>, ProductsServiceError> {
    urls.into_iter()
        .map(|url| optional_text(&url).ok_or(ProductsServiceError::BlankImageUrl))
        .collect()
}

fn ingredient_details(
    details: Vec<IngredientDetail>,
) -> Result<Vec<IngredientDetail>, ProductsServiceError> {
    details
        .into_iter()
        .map(|detail| {
            let name =
                optional_text(&detail.name).ok_or(ProductsServiceError::BlankIngredientName)?;

            if !detail.grams.is_finite() || detail.grams < 0.0 {
                return Err(ProductsServiceError::InvalidIngredientGrams);
            }

            Ok(IngredientDetail { name, ..detail })
        })
        .collect()
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products that have not been deleted, oldest first.
    ///
    /// The keyword matches either the product or its category name.
    async fn list_products(
        &self,
        owner: OwnerUuid,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product in one of the owner's categories.
    async fn create_product(
        &self,
        owner: OwnerUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update to a product.
    async fn update_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Schedules that already carry it keep their snapshot.
    async fn delete_product(
        &self,
        owner: OwnerUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::categories::{CategoriesService, data::NewCategory, records::CategoryUuid},
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_correct_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Sourdough", 999))
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Sourdough");
        assert_eq!(product.price, 999);
        assert!(product.is_active);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_blank_name_returns_blank_name() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), ctx.category_uuid, "  ", 100),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::BlankName)),
            "expected BlankName, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_price_out_of_range_returns_invalid_price() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), ctx.category_uuid, "Gold Leaf Cake", u64::MAX),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Baguette", 1500))
            .await?;

        let product = ctx.products.get_product(ctx.owner_uuid, uuid).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .get_product(ctx.owner_uuid, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_returns_created_products() -> TestResult {
        let ctx = TestContext::new().await;

        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        ctx.products
            .create_product(
                ctx.owner_uuid,
                new_product(uuid_a, ctx.category_uuid, "Croissant", 100),
            )
            .await?;

        ctx.products
            .create_product(
                ctx.owner_uuid,
                new_product(uuid_b, ctx.category_uuid, "Pain au chocolat", 200),
            )
            .await?;

        let products = ctx
            .products
            .list_products(ctx.owner_uuid, ProductFilter::default(), Pagination::All)
            .await?
            .items;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![uuid_a, uuid_b]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_applies_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Rye", 500))
            .await?;

        let updated = ctx
            .products
            .update_product(
                ctx.owner_uuid,
                uuid,
                ProductUpdate {
                    price: Some(750),
                    is_active: Some(false),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Rye");
        assert_eq!(updated.price, 750);
        assert!(!updated.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ctx.owner_uuid,
                ProductUuid::new(),
                ProductUpdate {
                    price: Some(100),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Brioche", 300))
            .await?;

        ctx.products.delete_product(ctx.owner_uuid, uuid).await?;

        let result = ctx.products.get_product(ctx.owner_uuid, uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let products = ctx
            .products
            .list_products(ctx.owner_uuid, ProductFilter::default(), Pagination::All)
            .await?
            .items;

        assert!(
            !products.iter().any(|p| p.uuid == uuid),
            "deleted product should not appear in list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .delete_product(ctx.owner_uuid, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Focaccia", 100))
            .await?;

        let result = ctx
            .products
            .create_product(ctx.owner_uuid, new_product(uuid, ctx.category_uuid, "Focaccia", 200))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_not_visible_to_other_owner() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), ctx.category_uuid, "Challah", 100),
            )
            .await?;

        let owner_b = ctx.create_owner("Bakery B").await;

        let result = ctx.products.get_product(owner_b, product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound for cross-owner access, got {result:?}"
        );

        Ok(())
    }

    fn detail(name: &str, grams: f64) -> IngredientDetail {
        IngredientDetail {
            name: name.to_string(),
            grams,
            is_visible: true,
        }
    }

    async fn create_category(ctx: &TestContext, name: &str) -> TestResult<CategoryUuid> {
        let category = ctx
            .categories
            .create_category(
                ctx.owner_uuid,
                NewCategory {
                    uuid: CategoryUuid::new(),
                    name: name.to_string(),
                },
            )
            .await?;

        Ok(category.uuid)
    }

    #[tokio::test]
    async fn create_product_stores_descriptive_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                NewProduct {
                    description: Some("  Naturally leavened ".to_string()),
                    ingredients: Some("   ".to_string()),
                    image_urls: vec![" https://cdn.example.com/rye.jpg ".to_string()],
                    ingredient_details: vec![detail(" Rye flour ", 450.5)],
                    ..new_product(ProductUuid::new(), ctx.category_uuid, "Rye", 500)
                },
            )
            .await?;

        assert_eq!(product.category_uuid, ctx.category_uuid);
        assert_eq!(product.category_name, "House");
        assert_eq!(product.description.as_deref(), Some("Naturally leavened"));
        assert_eq!(product.ingredients, None);
        assert_eq!(product.image_url(), Some("https://cdn.example.com/rye.jpg"));
        assert_eq!(product.ingredient_details, vec![detail("Rye flour", 450.5)]);

        let fetched = ctx.products.get_product(ctx.owner_uuid, product.uuid).await?;

        assert_eq!(fetched.ingredient_details, product.ingredient_details);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_blank_image_url_returns_blank_image_url() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                NewProduct {
                    image_urls: vec!["https://cdn.example.com/a.jpg".to_string(), " ".to_string()],
                    ..new_product(ProductUuid::new(), ctx.category_uuid, "Rye", 500)
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::BlankImageUrl)),
            "expected BlankImageUrl, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_negative_grams_returns_invalid_ingredient_grams() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                NewProduct {
                    ingredient_details: vec![detail("Butter", -1.0)],
                    ..new_product(ProductUuid::new(), ctx.category_uuid, "Croissant", 300)
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidIngredientGrams)),
            "expected InvalidIngredientGrams, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), CategoryUuid::new(), "Rye", 500),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_in_other_owners_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let owner_b = ctx.create_owner("Bakery B").await;

        let result = ctx
            .products
            .create_product(
                owner_b,
                new_product(ProductUuid::new(), ctx.category_uuid, "Rye", 500),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_by_keyword_and_category() -> TestResult {
        let ctx = TestContext::new().await;
        let cakes = create_category(&ctx, "Cakes").await?;

        let baguette = ctx.create_product("Baguette", 300).await?;
        let cheesecake = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), cakes, "Cheesecake", 3_000),
            )
            .await?;
        let sponge = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                new_product(ProductUuid::new(), cakes, "Sponge", 2_500),
            )
            .await?;

        let by_category_name = ctx
            .products
            .list_products(
                ctx.owner_uuid,
                ProductFilter {
                    keyword: Some("cake".to_string()),
                    ..ProductFilter::default()
                },
                Pagination::All,
            )
            .await?;

        let uuids: Vec<_> = by_category_name.items.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![cheesecake.uuid, sponge.uuid]);

        let in_house = ctx
            .products
            .list_products(
                ctx.owner_uuid,
                ProductFilter {
                    category_uuid: Some(ctx.category_uuid),
                    ..ProductFilter::default()
                },
                Pagination::All,
            )
            .await?;

        let uuids: Vec<_> = in_house.items.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![baguette.uuid]);

        let second_page = ctx
            .products
            .list_products(
                ctx.owner_uuid,
                ProductFilter::default(),
                Pagination::Page { page: 2, limit: 2 },
            )
            .await?;

        let uuids: Vec<_> = second_page.items.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![sponge.uuid]);
        assert_eq!(second_page.meta.total, 3);
        assert_eq!(second_page.meta.total_pages, 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_moves_category_and_clears_description() -> TestResult {
        let ctx = TestContext::new().await;
        let cakes = create_category(&ctx, "Cakes").await?;

        let product = ctx
            .products
            .create_product(
                ctx.owner_uuid,
                NewProduct {
                    description: Some("Layered".to_string()),
                    ingredients: Some("Flour, eggs".to_string()),
                    ..new_product(ProductUuid::new(), ctx.category_uuid, "Mille-feuille", 800)
                },
            )
            .await?;

        let updated = ctx
            .products
            .update_product(
                ctx.owner_uuid,
                product.uuid,
                ProductUpdate {
                    category_uuid: Some(cakes),
                    description: Some(None),
                    image_urls: Some(vec!["https://cdn.example.com/mf.jpg".to_string()]),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.category_uuid, cakes);
        assert_eq!(updated.category_name, "Cakes");
        assert_eq!(updated.description, None);
        assert_eq!(updated.ingredients.as_deref(), Some("Flour, eggs"));
        assert_eq!(updated.image_urls, vec!["https://cdn.example.com/mf.jpg"]);

        Ok(())
    }
}
