//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::{
    categories::records::CategoryUuid,
    columns::{amount_to_i64, try_get_amount, try_get_count},
    pagination::Pagination,
    products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    search::contains_pattern,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let (limit, offset) = pagination.limit_offset();

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(contains_pattern(filter.keyword.as_deref()))
            .bind(filter.category_uuid.map(CategoryUuid::into_uuid))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let row = query(COUNT_PRODUCTS_SQL)
            .bind(contains_pattern(filter.keyword.as_deref()))
            .bind(filter.category_uuid.map(CategoryUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await?;

        try_get_count(&row, "total")
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category_uuid.into_uuid())
            .bind(&product.name)
            .bind(amount_to_i64(product.price, "price")?)
            .bind(product.description.as_deref())
            .bind(product.ingredients.as_deref())
            .bind(product.is_active)
            .bind(&product.image_urls)
            .bind(Json(&product.ingredient_details))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_to_i64(price, "price"))
            .transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.category_uuid.map(CategoryUuid::into_uuid))
            .bind(update.name.as_deref())
            .bind(price)
            .bind(update.description.is_some())
            .bind(update.description.clone().flatten())
            .bind(update.ingredients.is_some())
            .bind(update.ingredients.clone().flatten())
            .bind(update.is_active)
            .bind(update.image_urls.as_deref())
            .bind(update.ingredient_details.as_ref().map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            description: row.try_get("description")?,
            ingredients: row.try_get("ingredients")?,
            is_active: row.try_get("is_active")?,
            image_urls: row.try_get("image_urls")?,
            ingredient_details: row.try_get::<Json<_>, _>("ingredient_details")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
