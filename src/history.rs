//! Filtering for the order history list: a status tab combined with a
//! case-insensitive free-text query over id, endpoints and employee names.

use crate::models::order::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTab {
    All,
    Only(OrderStatus),
}

pub fn filter_orders<'a>(orders: &'a [Order], tab: StatusTab, query: &str) -> Vec<&'a Order> {
    let needle = query.trim().to_lowercase();
    orders
        .iter()
        .filter(|order| match tab {
            StatusTab::All => true,
            StatusTab::Only(status) => order.status == status,
        })
        .filter(|order| needle.is_empty() || matches_query(order, &needle))
        .collect()
}

fn matches_query(order: &Order, needle: &str) -> bool {
    order.id.to_string().contains(needle)
        || order.pickup.address.to_lowercase().contains(needle)
        || order.dropoff.address.to_lowercase().contains(needle)
        || order
            .employees
            .iter()
            .any(|employee| employee.name.to_lowercase().contains(needle))
}
