use core::cmp::Ordering;
use core::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use greedible_core::{Entity, Money, OrderId};

/// Order status lifecycle.
///
/// `Pending -> Preparing -> Ready -> Completed`; `Cancelled` and unknown
/// statuses are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "completed" => OrderStatus::Completed,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw.to_string()),
        }
    }

    /// The status an order advances to, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::parse(&raw))
    }
}

/// Body of `PATCH /api/orders/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: OrderStatus,
}

/// One dish of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub quantity: u32,
}

/// A customer order (`GET /api/orders`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub total_price: Money,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_details: Vec<OrderDetail>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.order_id
    }
}

impl Order {
    /// Case-insensitive substring match on customer name or phone.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [&self.customer_name, &self.phone]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
            || term.is_empty()
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD HH:MM:SS` taken as UTC. Anything else is
/// treated as missing.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| {
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|t| t.and_utc())
            })
    }))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderSortKey {
    Time,
    TotalPrice,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Search and sort state of the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderQuery {
    pub search: String,
    pub sort: Option<(OrderSortKey, SortDirection)>,
}

impl OrderQuery {
    /// Clicking a column header: a new key sorts ascending, the same key
    /// flips the direction.
    pub fn toggle(&mut self, key: OrderSortKey) {
        self.sort = match self.sort {
            Some((current, direction)) if current == key => Some((key, direction.flipped())),
            _ => Some((key, SortDirection::Ascending)),
        };
    }

    /// Filtered, then sorted. The sort is stable so ties keep backend order.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let mut rows: Vec<&Order> = orders.iter().filter(|o| o.matches(&self.search)).collect();

        if let Some((key, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = match key {
                    OrderSortKey::Time => compare_times(a.time, b.time),
                    OrderSortKey::TotalPrice => a.total_price.cmp(&b.total_price),
                };
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }
}

// Orders without a timestamp sort first.
fn compare_times(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn order(id: i64, name: &str, phone: &str, price: i64, time: &str) -> Order {
        let json = format!(
            r#"{{"order_id": {id}, "customer_name": "{name}", "phone": "{phone}",
                "total_price": {price}, "status": "Pending", "time": "{time}"}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn sample() -> Vec<Order> {
        vec![
            order(1, "Linh", "0901", 120000, "2024-06-02T09:00:00.000Z"),
            order(2, "Bao", "0987", 50000, "2024-06-01 18:30:00"),
            order(3, "linh tran", "0933", 80000, "not a date"),
        ]
    }

    fn ids(rows: &[&Order]) -> Vec<i64> {
        rows.iter().map(|o| o.order_id.get()).collect()
    }

    #[test]
    fn status_advances_until_completed() {
        let mut status = OrderStatus::parse("pending");
        let mut seen = vec![status.clone()];
        while let Some(next) = status.next() {
            seen.push(next.clone());
            status = next;
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Completed
            ]
        );
        assert!(OrderStatus::Cancelled.is_terminal());
        assert_eq!(OrderStatus::parse("On hold"), OrderStatus::Other("On hold".into()));
    }

    #[test]
    fn search_matches_name_or_phone() {
        let orders = sample();
        let mut query = OrderQuery::default();
        assert_eq!(query.apply(&orders).len(), 3);

        query.search = "LINH".into();
        assert_eq!(ids(&query.apply(&orders)), vec![1, 3]);

        query.search = "0987".into();
        assert_eq!(ids(&query.apply(&orders)), vec![2]);
    }

    #[test]
    fn toggling_the_same_key_flips_direction() {
        let orders = sample();
        let mut query = OrderQuery::default();

        query.toggle(OrderSortKey::TotalPrice);
        assert_eq!(ids(&query.apply(&orders)), vec![2, 3, 1]);
        query.toggle(OrderSortKey::TotalPrice);
        assert_eq!(ids(&query.apply(&orders)), vec![1, 3, 2]);

        query.toggle(OrderSortKey::Time);
        assert_eq!(query.sort, Some((OrderSortKey::Time, SortDirection::Ascending)));
        assert_eq!(ids(&query.apply(&orders)), vec![3, 2, 1]);
    }

    #[test]
    fn timestamps_parse_leniently() {
        let orders = sample();
        assert!(orders[0].time.is_some());
        assert!(orders[1].time.is_some());
        assert!(orders[2].time.is_none());
        assert_eq!(orders[0].total_price.amount(), Decimal::from(120000));
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        /// Property: descending is the exact reverse of ascending when prices are distinct.
        #[test]
        fn descending_reverses_ascending(prices in proptest::collection::hash_set(0i64..1_000_000, 0..20)) {
            let orders: Vec<Order> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| order(i as i64, "x", "0", *p, "2024-01-01T00:00:00Z"))
                .collect();

            let mut query = OrderQuery::default();
            query.toggle(OrderSortKey::TotalPrice);
            let asc = ids(&query.apply(&orders));
            query.toggle(OrderSortKey::TotalPrice);
            let mut desc = ids(&query.apply(&orders));
            desc.reverse();

            prop_assert_eq!(asc, desc);
        }
    }
}
