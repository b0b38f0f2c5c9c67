//! Order Data

use std::num::NonZeroU32;

use jiff::{Timestamp, civil::Date};
use smallvec::SmallVec;

use crate::domain::{
    orders::{records::OrderUuid, status::OrderStatus},
    products::records::ProductUuid,
    schedules::records::{ScheduleItemUuid, ScheduleUuid},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub schedule_uuid: ScheduleUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: String,
    pub pickup_time: Timestamp,
    pub note: Option<String>,
    pub items: SmallVec<[NewOrderLine; 4]>,
}

/// One requested order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub target: OrderLineTarget,
    pub quantity: NonZeroU32,
}

/// How an order line names the schedule item it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLineTarget {
    ScheduleItem(ScheduleItemUuid),
    Product(ProductUuid),
}

impl OrderLineTarget {
    /// Pick a target from the identifiers a caller supplied.
    ///
    /// A schedule item id wins over a product id when both are present.
    #[must_use]
    pub fn from_ids(
        schedule_item: Option<ScheduleItemUuid>,
        product: Option<ProductUuid>,
    ) -> Option<Self> {
        schedule_item
            .map(Self::ScheduleItem)
            .or_else(|| product.map(Self::Product))
    }
}

/// Order list filters. Date bounds apply to the schedule date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub schedule_uuid: Option<ScheduleUuid>,
    pub status: Option<OrderStatus>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_item_id_wins_over_product_id() {
        let item = ScheduleItemUuid::new();
        let product = ProductUuid::new();

        assert_eq!(
            OrderLineTarget::from_ids(Some(item), Some(product)),
            Some(OrderLineTarget::ScheduleItem(item))
        );
        assert_eq!(
            OrderLineTarget::from_ids(None, Some(product)),
            Some(OrderLineTarget::Product(product))
        );
        assert_eq!(OrderLineTarget::from_ids(None, None), None);
    }
}
