//! State

use std::sync::Arc;

use bakelink_app::{
    auth::AuthService,
    context::AppContext,
    domain::{
        categories::CategoriesService, orders::OrdersService, products::ProductsService,
        schedules::SchedulesService,
    },
};

/// Services shared by every request.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) categories: Arc<dyn CategoriesService>,
    pub(crate) products: Arc<dyn ProductsService>,
    pub(crate) schedules: Arc<dyn SchedulesService>,
    pub(crate) orders: Arc<dyn OrdersService>,
    pub(crate) auth: Arc<dyn AuthService>,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext) -> Arc<Self> {
        Arc::new(Self {
            categories: Arc::clone(&app.categories),
            products: Arc::clone(&app.products),
            schedules: Arc::clone(&app.schedules),
            orders: Arc::clone(&app.orders),
            auth: Arc::clone(&app.auth),
        })
    }
}
