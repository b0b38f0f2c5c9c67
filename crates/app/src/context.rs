//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService, TokenHmacKey},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        schedules::{PgSchedulesService, SchedulesService},
        transitions::TransitionPolicy,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role bypasses row-level security; connect as the application role")]
    RlsBypassed,
}

/// Settings needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub token_hmac_key: TokenHmacKey,
    pub transition_policy: TransitionPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub schedules: Arc<dyn SchedulesService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to the database and build every service around one pool.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connected role is not subject to row-level security.
    pub async fn connect(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if database::role_bypasses_rls(&pool)
            .await
            .map_err(AppInitError::Database)?
        {
            pool.close().await;

            return Err(AppInitError::RlsBypassed);
        }

        info!(
            max_connections = settings.max_connections,
            transition_policy = ?settings.transition_policy,
            "connected to database"
        );

        let db = Db::new(pool.clone());
        let policy = settings.transition_policy;

        Ok(Self {
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            schedules: Arc::new(PgSchedulesService::new(db.clone(), policy)),
            orders: Arc::new(PgOrdersService::new(db.clone(), policy)),
            auth: Arc::new(PgAuthService::new(pool, settings.token_hmac_key)),
            db,
        })
    }

    /// Close the shared pool once in-flight requests have drained.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
