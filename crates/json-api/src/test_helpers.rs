//! Test helpers.

use std::sync::Arc;

use bakelink_app::{
    auth::MockAuthService,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            status::OrderStatus,
        },
        owners::records::OwnerUuid,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        schedules::{
            MockSchedulesService,
            records::{ScheduleItemRecord, ScheduleItemUuid, ScheduleRecord, ScheduleUuid},
            status::ScheduleStatus,
        },
    },
};
use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER_UUID: OwnerUuid = OwnerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_owner_uuid(TEST_OWNER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// State whose services fail the test if called.
pub(crate) fn test_state() -> State {
    State {
        categories: Arc::new(MockCategoriesService::new()),
        products: Arc::new(MockProductsService::new()),
        schedules: Arc::new(MockSchedulesService::new()),
        orders: Arc::new(MockOrdersService::new()),
        auth: Arc::new(MockAuthService::new()),
    }
}

/// Serve `route` as an authenticated owner.
pub(crate) fn owner_service(state: State, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(Arc::new(state)))
            .hoop(inject_owner)
            .push(route),
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    owner_service(
        State {
            categories: Arc::new(categories),
            ..test_state()
        },
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    owner_service(
        State {
            products: Arc::new(products),
            ..test_state()
        },
        route,
    )
}

pub(crate) fn schedules_service(schedules: MockSchedulesService, route: Router) -> Service {
    owner_service(
        State {
            schedules: Arc::new(schedules),
            ..test_state()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    owner_service(
        State {
            orders: Arc::new(orders),
            ..test_state()
        },
        route,
    )
}

fn at(raw: &str) -> Timestamp {
    raw.parse().unwrap_or(Timestamp::UNIX_EPOCH)
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Loaves".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: CategoryUuid::new(),
        category_name: "Loaves".to_string(),
        name: "Sourdough".to_string(),
        price: 4_500,
        description: None,
        ingredients: None,
        is_active: true,
        image_urls: Vec::new(),
        ingredient_details: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// An open schedule for 2026-02-17 offering one capped item.
pub(crate) fn make_schedule(uuid: ScheduleUuid) -> ScheduleRecord {
    ScheduleRecord {
        uuid,
        schedule_date: date(2026, 2, 17),
        status: ScheduleStatus::Open,
        order_start_at: at("2026-02-16T08:00:00Z"),
        order_end_at: at("2026-02-17T08:00:00Z"),
        note: None,
        items: vec![ScheduleItemRecord {
            uuid: ScheduleItemUuid::new(),
            schedule_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Sourdough".to_string(),
            unit_price: 4_500,
            sales_limit: Some(5),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A placed order for three loaves picked up at 10:00 UTC.
pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        schedule_uuid: ScheduleUuid::new(),
        schedule_date: date(2026, 2, 17),
        status: OrderStatus::Placed,
        customer_name: "Mina Park".to_string(),
        customer_phone: "010-1234-5678".to_string(),
        payment_method: "BANK_TRANSFER".to_string(),
        pickup_time: at("2026-02-17T10:00:00Z"),
        note: None,
        total_amount: 13_500,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            schedule_item_uuid: Some(ScheduleItemUuid::new()),
            product_uuid: ProductUuid::new(),
            product_name: "Sourdough".to_string(),
            unit_price: 4_500,
            quantity: 3,
            line_total: 13_500,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
