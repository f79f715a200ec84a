//! Back-office filters and summary counts over fetched records.

use serde::Serialize;
use trtech_commerce::checkout::{Order, OrderStatus, PaymentMethod};
use trtech_commerce::money::Money;
use trtech_commerce::repair::{DeviceType, Repair, RepairStatus};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalize_search(text: &str) -> Option<String> {
    let text = text.trim().to_lowercase();
    (!text.is_empty()).then_some(text)
}

/// Orders table filter. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_method: Option<PaymentMethod>,
    search: Option<String>,
}

impl OrderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Match against the short order id, customer name, or customer email.
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = normalize_search(text);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        let search_match = self.search.as_deref().map_or(true, |needle| {
            contains_ci(order.id.short(), needle)
                || contains_ci(order.customer_name(), needle)
                || contains_ci(order.customer_email(), needle)
        });
        let status_match = self.status.map_or(true, |s| order.status == s);
        let payment_match = self
            .payment_method
            .map_or(true, |m| order.payment_method == Some(m));
        search_match && status_match && payment_match
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Summary cards above the orders table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    /// Sum over `Completed` orders only.
    pub total_revenue: Money,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        let revenue_cents = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .fold(0i64, |acc, o| acc.saturating_add(o.amount().amount_cents));

        Self {
            total: orders.len(),
            pending: count(OrderStatus::Pending),
            processing: count(OrderStatus::Processing),
            shipped: count(OrderStatus::Shipped),
            delivered: count(OrderStatus::Delivered),
            total_revenue: Money::rand(revenue_cents),
        }
    }
}

/// Repairs table filter. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairFilter {
    pub status: Option<RepairStatus>,
    pub device_type: Option<DeviceType>,
    search: Option<String>,
}

impl RepairFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: RepairStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    /// Match against customer name, model, brand, or id.
    pub fn with_search(mut self, text: &str) -> Self {
        self.search = normalize_search(text);
        self
    }

    pub fn matches(&self, repair: &Repair) -> bool {
        let search_match = self.search.as_deref().map_or(true, |needle| {
            contains_ci(&repair.customer_name, needle)
                || contains_ci(&repair.model, needle)
                || contains_ci(&repair.brand, needle)
                || contains_ci(repair.id.as_str(), needle)
        });
        let status_match = self.status.map_or(true, |s| repair.status == s);
        let device_match = self.device_type.map_or(true, |d| repair.device_type == d);
        search_match && status_match && device_match
    }

    pub fn apply<'a>(&self, repairs: &'a [Repair]) -> Vec<&'a Repair> {
        repairs.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Summary cards above the repairs table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl RepairStats {
    pub fn from_repairs(repairs: &[Repair]) -> Self {
        let count = |status: RepairStatus| repairs.iter().filter(|r| r.status == status).count();
        Self {
            total: repairs.len(),
            pending: count(RepairStatus::Pending),
            in_progress: count(RepairStatus::InProgress),
            completed: count(RepairStatus::Completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Vec<Order> {
        serde_json::from_str(
            r#"[
                {"_id":"aaaaaa111111","customer":{"name":"John Doe","email":"john@x.com"},
                 "status":"Pending","paymentMethod":"Cash","totalAmount":100},
                {"_id":"bbbbbb222222","customer":{"name":"Jane Roe","email":"jane@y.com"},
                 "status":"Completed","paymentMethod":"Card","totalAmount":250.5},
                {"_id":"cccccc333333","customerName":"Sam","email":"sam@z.com",
                 "status":"Completed","paymentMethod":"Transfer","total":49.5},
                {"_id":"dddddd444444","customer":{"name":"Lee","email":"lee@x.com"},
                 "status":"Shipped","paymentMethod":"Card","totalAmount":999}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_order_search_fields() {
        let orders = orders();
        assert_eq!(OrderFilter::new().with_search("222222").apply(&orders).len(), 1);
        assert_eq!(OrderFilter::new().with_search("JANE").apply(&orders).len(), 1);
        assert_eq!(OrderFilter::new().with_search("@x.com").apply(&orders).len(), 2);
        assert_eq!(OrderFilter::new().with_search("sam").apply(&orders).len(), 1);
        // Only the last six characters of the id are searchable.
        assert!(OrderFilter::new().with_search("aaaaaa1").apply(&orders).is_empty());
    }

    #[test]
    fn test_order_status_and_payment_filters() {
        let orders = orders();
        let hits = OrderFilter::new()
            .with_status(OrderStatus::Completed)
            .with_payment_method(PaymentMethod::Card)
            .apply(&orders);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name(), "Jane Roe");

        assert_eq!(OrderFilter::new().with_search("  ").apply(&orders).len(), 4);
    }

    #[test]
    fn test_order_stats() {
        let stats = OrderStats::from_orders(&orders());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.processing, 0);
        assert_eq!(stats.shipped, 1);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.total_revenue, Money::rand(30000));
    }

    #[test]
    fn test_repair_filter_and_stats() {
        let repairs: Vec<Repair> = serde_json::from_str(
            r#"[
                {"id":"R1","customerName":"Thandi","deviceType":"Smartphone","brand":"Samsung","model":"A54","status":"Pending"},
                {"id":"R2","customerName":"Piet","deviceType":"Laptop","brand":"Dell","model":"XPS 13","status":"In Progress"},
                {"id":"R3","customerName":"Ayesha","deviceType":"Laptop","brand":"Lenovo","model":"T14","status":"Completed"}
            ]"#,
        )
        .unwrap();

        assert_eq!(RepairFilter::new().with_search("xps").apply(&repairs).len(), 1);
        assert_eq!(
            RepairFilter::new()
                .with_device_type(DeviceType::Laptop)
                .apply(&repairs)
                .len(),
            2
        );

        let stats = RepairStats::from_repairs(&repairs);
        assert_eq!(
            stats,
            RepairStats {
                total: 3,
                pending: 1,
                in_progress: 1,
                completed: 1
            }
        );
    }
}
