//! `greedible-sales`: customer orders and the monthly dashboard series.
//!
//! Pure domain logic: callers fetch the rows and pass "today" in.

pub mod order;
pub mod revenue;

pub use order::{
    Order, OrderDetail, OrderQuery, OrderSortKey, OrderStatus, SortDirection, StatusChange,
};
pub use revenue::{
    DailyImportTotal, DailySalesPoint, DayFigures, MonthlySeries, RevenueRecord, TodayFigures,
};
