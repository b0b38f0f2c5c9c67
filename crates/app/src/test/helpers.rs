//! Test Helpers

use std::num::NonZeroU32;

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use smallvec::SmallVec;

use crate::domain::{
    categories::records::CategoryUuid,
    orders::{
        data::{NewOrder, NewOrderLine, OrderLineTarget},
        records::OrderUuid,
    },
    products::{data::NewProduct, records::ProductUuid},
    schedules::{
        data::{NewSchedule, NewScheduleItem},
        records::{ScheduleItemUuid, ScheduleUuid},
        status::ScheduleStatus,
    },
};

pub(crate) fn new_product(
    uuid: ProductUuid,
    category: CategoryUuid,
    name: &str,
    price: u64,
) -> NewProduct {
    NewProduct {
        uuid,
        category_uuid: category,
        name: name.to_string(),
        price,
        description: None,
        ingredients: None,
        is_active: true,
        image_urls: Vec::new(),
        ingredient_details: Vec::new(),
    }
}

/// A schedule on `date` accepting orders from 08:00 the day before until 08:00 UTC.
pub(crate) fn new_schedule(
    date: Date,
    status: ScheduleStatus,
    items: Vec<NewScheduleItem>,
) -> NewSchedule {
    let order_end_at = utc(date, 8);

    NewSchedule {
        uuid: ScheduleUuid::new(),
        schedule_date: date,
        order_start_at: order_end_at - 24.hours(),
        order_end_at,
        status,
        note: None,
        items,
    }
}

pub(crate) fn schedule_item(product: ProductUuid, sales_limit: Option<u32>) -> NewScheduleItem {
    NewScheduleItem {
        product_uuid: product,
        sales_limit: sales_limit.and_then(NonZeroU32::new),
    }
}

pub(crate) fn new_order(
    schedule: ScheduleUuid,
    lines: impl IntoIterator<Item = NewOrderLine>,
) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        schedule_uuid: schedule,
        customer_name: "Mina Park".to_string(),
        customer_phone: "010-1234-5678".to_string(),
        payment_method: "BANK_TRANSFER".to_string(),
        pickup_time: utc(jiff::civil::date(2026, 2, 17), 10),
        note: None,
        items: lines.into_iter().collect::<SmallVec<_>>(),
    }
}

pub(crate) fn by_item(item: ScheduleItemUuid, quantity: u32) -> NewOrderLine {
    order_line(OrderLineTarget::ScheduleItem(item), quantity)
}

pub(crate) fn by_product(product: ProductUuid, quantity: u32) -> NewOrderLine {
    order_line(OrderLineTarget::Product(product), quantity)
}

fn order_line(target: OrderLineTarget, quantity: u32) -> NewOrderLine {
    NewOrderLine {
        target,
        quantity: NonZeroU32::new(quantity).expect("test quantities are positive"),
    }
}

fn utc(date: Date, hour: i8) -> Timestamp {
    date.at(hour, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .expect("test datetimes are valid")
        .timestamp()
}
