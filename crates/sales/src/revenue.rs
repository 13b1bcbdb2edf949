//! Monthly dashboard series: orders per day, revenue and import spending.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::date::calendar_date;
use greedible_core::{DomainError, DomainResult, Money};

/// Number of orders on one day of the month (`GET /api/sales/daily/{y}/{m}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySalesPoint {
    pub day: u32,
    #[serde(default)]
    pub count: u64,
}

/// One revenue entry (`GET /api/orders/revenue`). Several entries may share a
/// day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    #[serde(with = "calendar_date")]
    pub date_recorded: NaiveDate,
    #[serde(default)]
    pub daily_revenue: Money,
}

/// Restock spending on one day of the month (`GET /api/restock?month&year`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyImportTotal {
    pub day: u32,
    #[serde(default)]
    pub total_import_price: Money,
}

/// One calendar day of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayFigures {
    pub date: NaiveDate,
    /// `DD/MM/YYYY`.
    pub label: String,
    pub orders: u64,
    pub revenue: Money,
    pub imports: Money,
}

impl DayFigures {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format("%d/%m/%Y").to_string(),
            orders: 0,
            revenue: Money::ZERO,
            imports: Money::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TodayFigures {
    pub orders: u64,
    pub revenue: Money,
    pub imports: Money,
}

/// Every day of one month with the three dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayFigures>,
}

impl MonthlySeries {
    /// One point per calendar day; days without data are zero.
    ///
    /// Revenue entries outside the month are ignored and entries sharing a
    /// day are summed. Sales and import points naming a day the month does
    /// not have are dropped.
    pub fn build(
        year: i32,
        month: u32,
        sales: &[DailySalesPoint],
        revenue: &[RevenueRecord],
        imports: &[DailyImportTotal],
    ) -> DomainResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::validation(format!("invalid month: {year}-{month}")))?;

        let mut days: Vec<DayFigures> = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(DayFigures::empty)
            .collect();

        for point in sales {
            if let Some(day) = slot(&mut days, point.day) {
                day.orders += point.count;
            }
        }

        let mut revenue_by_day: BTreeMap<u32, Decimal> = BTreeMap::new();
        for record in revenue
            .iter()
            .filter(|r| r.date_recorded.year() == year && r.date_recorded.month() == month)
        {
            *revenue_by_day.entry(record.date_recorded.day()).or_default() +=
                record.daily_revenue.amount();
        }
        for (day, amount) in revenue_by_day {
            if let Some(figures) = slot(&mut days, day) {
                figures.revenue = Money::new(amount);
            }
        }

        for total in imports {
            if let Some(day) = slot(&mut days, total.day) {
                day.imports += total.total_import_price;
            }
        }

        Ok(Self { year, month, days })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.label.as_str()).collect()
    }

    /// Figures for `today` when it falls in this month, zeros otherwise.
    pub fn today_figures(&self, today: NaiveDate) -> TodayFigures {
        if today.year() != self.year || today.month() != self.month {
            return TodayFigures::default();
        }
        self.days
            .iter()
            .find(|d| d.date == today)
            .map(|d| TodayFigures {
                orders: d.orders,
                revenue: d.revenue,
                imports: d.imports,
            })
            .unwrap_or_default()
    }

    pub fn total_revenue(&self) -> Money {
        self.days.iter().map(|d| d.revenue).sum()
    }

    pub fn total_imports(&self) -> Money {
        self.days.iter().map(|d| d.imports).sum()
    }

    pub fn total_orders(&self) -> u64 {
        self.days.iter().map(|d| d.orders).sum()
    }
}

fn slot(days: &mut [DayFigures], day: u32) -> Option<&mut DayFigures> {
    day.checked_sub(1).and_then(|i| days.get_mut(i as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn revenue(d: NaiveDate, amount: Decimal) -> RevenueRecord {
        RevenueRecord {
            date_recorded: d,
            daily_revenue: Money::new(amount),
        }
    }

    #[test]
    fn every_day_of_the_month_gets_a_point() {
        let series = MonthlySeries::build(2024, 2, &[], &[], &[]).unwrap();
        assert_eq!(series.days.len(), 29);
        assert_eq!(series.labels()[0], "01/02/2024");
        assert_eq!(series.labels()[28], "29/02/2024");
        assert!(series.days.iter().all(|d| d.orders == 0 && d.revenue == Money::ZERO));
    }

    #[test]
    fn revenue_is_summed_per_day_and_restricted_to_the_month() {
        let records = vec![
            revenue(date(2024, 6, 3), dec!(100000)),
            revenue(date(2024, 6, 3), dec!(50000)),
            revenue(date(2024, 5, 3), dec!(999)),
            revenue(date(2023, 6, 3), dec!(999)),
        ];
        let series = MonthlySeries::build(2024, 6, &[], &records, &[]).unwrap();
        assert_eq!(series.days[2].revenue, Money::new(dec!(150000)));
        assert_eq!(series.total_revenue(), Money::new(dec!(150000)));
    }

    #[test]
    fn sales_and_imports_land_on_their_day() {
        let sales = [
            DailySalesPoint { day: 1, count: 4 },
            DailySalesPoint { day: 31, count: 9 },
        ];
        let imports = [DailyImportTotal {
            day: 15,
            total_import_price: Money::new(dec!(320000)),
        }];
        let series = MonthlySeries::build(2024, 6, &sales, &[], &imports).unwrap();

        assert_eq!(series.days[0].orders, 4);
        assert_eq!(series.total_orders(), 4);
        assert_eq!(series.days[14].imports, Money::new(dec!(320000)));
    }

    #[test]
    fn today_figures_are_zero_outside_the_month() {
        let sales = [DailySalesPoint { day: 10, count: 2 }];
        let series = MonthlySeries::build(2024, 6, &sales, &[], &[]).unwrap();

        assert_eq!(series.today_figures(date(2024, 6, 10)).orders, 2);
        assert_eq!(series.today_figures(date(2024, 7, 10)), TodayFigures::default());
        assert_eq!(series.today_figures(date(2023, 6, 10)), TodayFigures::default());
    }

    #[test]
    fn backend_rows_parse() {
        let r: RevenueRecord = serde_json::from_str(
            r#"{"date_recorded": "2024-06-03T17:00:00.000Z", "daily_revenue": "250000.50"}"#,
        )
        .unwrap();
        assert_eq!(r.date_recorded, date(2024, 6, 3));
        assert_eq!(r.daily_revenue, Money::new(dec!(250000.5)));
        assert!(MonthlySeries::build(2024, 0, &[], &[], &[]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        /// Property: the month total equals the sum of in-month records, whatever their order.
        #[test]
        fn monthly_total_matches_in_month_records(
            entries in proptest::collection::vec((1u32..=30, 0i64..1_000_000, any::<bool>()), 0..40)
        ) {
            let records: Vec<RevenueRecord> = entries
                .iter()
                .map(|(day, amount, in_month)| {
                    let month = if *in_month { 6 } else { 7 };
                    revenue(date(2024, month, *day), Decimal::from(*amount))
                })
                .collect();
            let expected: Decimal = entries
                .iter()
                .filter(|(_, _, in_month)| *in_month)
                .map(|(_, amount, _)| Decimal::from(*amount))
                .sum();

            let series = MonthlySeries::build(2024, 6, &[], &records, &[]).unwrap();
            prop_assert_eq!(series.total_revenue(), Money::new(expected));
            prop_assert_eq!(series.days.len(), 30);
        }
    }
}
