//! Expiration and restock status of ingredients.
//!
//! Everything here is a pure function of already-fetched data and an explicit
//! `today`. Nothing is cached: a view is recomputed whenever the threshold,
//! shelf life, quantity or batch list changes.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::IngredientId;

use crate::ingredient::{Ingredient, ShelfLife, needs_restock};
use crate::restock::{RestockBatch, group_batches_by_ingredient, latest_restock_date};

/// Threshold and shelf life of one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevels {
    pub minimum_threshold: Option<Decimal>,
    pub good_for: Option<ShelfLife>,
}

/// Derived status, in decreasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientStatus {
    Expired,
    NeedsRestock,
    Good,
}

impl IngredientStatus {
    pub fn label(&self) -> &'static str {
        match self {
            IngredientStatus::Expired => "Expired",
            IngredientStatus::NeedsRestock => "Needs Restock",
            IngredientStatus::Good => "Good",
        }
    }
}

impl core::fmt::Display for IngredientStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of assessing one ingredient against its batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationView {
    pub status: IngredientStatus,
    /// Minimum expiration date over all batches, expired ones included.
    pub earliest_expiration: Option<NaiveDate>,
    /// Minimum expiration date over the batches that have not expired yet.
    pub next_expiration: Option<NaiveDate>,
    /// Expired batches, in input order.
    pub expired_batches: Vec<RestockBatch>,
}

/// `restock_date + good_for` in calendar days.
///
/// `None` only if the sum leaves chrono's supported range.
pub fn expiration_date(restock_date: NaiveDate, good_for: ShelfLife) -> Option<NaiveDate> {
    restock_date.checked_add_days(Days::new(u64::from(good_for.as_days())))
}

/// A batch is expired strictly after its expiration day.
pub fn is_expired(expiration: NaiveDate, today: NaiveDate) -> bool {
    today > expiration
}

/// Assess one ingredient.
///
/// Batches without a known shelf life never expire, so a null `good_for`
/// yields no expiration dates and leaves the status to the stock check.
pub fn assess(
    levels: &StockLevels,
    quantity: Option<Decimal>,
    batches: &[RestockBatch],
    today: NaiveDate,
) -> ExpirationView {
    let mut earliest_expiration: Option<NaiveDate> = None;
    let mut next_expiration: Option<NaiveDate> = None;
    let mut expired_batches = Vec::new();

    if let Some(good_for) = levels.good_for {
        for batch in batches {
            let Some(expires) = expiration_date(batch.restock_date, good_for) else {
                continue;
            };

            earliest_expiration = Some(earliest_expiration.map_or(expires, |e| e.min(expires)));

            if is_expired(expires, today) {
                expired_batches.push(batch.clone());
            } else {
                next_expiration = Some(next_expiration.map_or(expires, |e| e.min(expires)));
            }
        }
    }

    let status = if !expired_batches.is_empty() {
        IngredientStatus::Expired
    } else if needs_restock(quantity, levels.minimum_threshold) {
        IngredientStatus::NeedsRestock
    } else {
        IngredientStatus::Good
    };

    ExpirationView {
        status,
        earliest_expiration,
        next_expiration,
        expired_batches,
    }
}

/// Days left before the most recent batch expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryCountdown {
    /// No restock on record, or no shelf life.
    Unknown,
    DaysLeft(i64),
    ExpiredDaysAgo(i64),
}

impl core::fmt::Display for ExpiryCountdown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExpiryCountdown::Unknown => f.write_str("N/A"),
            ExpiryCountdown::DaysLeft(n) => write!(f, "{n}"),
            ExpiryCountdown::ExpiredDaysAgo(n) => write!(f, "Expired ({n} days ago)"),
        }
    }
}

/// Countdown from the latest restock, as shown in the ingredient table.
pub fn expiry_countdown(
    latest_restock: Option<NaiveDate>,
    good_for: Option<ShelfLife>,
    today: NaiveDate,
) -> ExpiryCountdown {
    let (Some(restocked), Some(good_for)) = (latest_restock, good_for) else {
        return ExpiryCountdown::Unknown;
    };
    let Some(expires) = expiration_date(restocked, good_for) else {
        return ExpiryCountdown::Unknown;
    };

    let days = expires.signed_duration_since(today).num_days();
    if days < 0 {
        ExpiryCountdown::ExpiredDaysAgo(-days)
    } else {
        ExpiryCountdown::DaysLeft(days)
    }
}

/// One row of the inventory overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientReport {
    pub ingredient: Ingredient,
    pub view: ExpirationView,
    pub latest_restock: Option<NaiveDate>,
    pub countdown: ExpiryCountdown,
}

impl IngredientReport {
    pub fn id(&self) -> IngredientId {
        self.ingredient.id
    }
}

/// Pair every ingredient with its view. Batches for unknown ingredients are
/// ignored; ingredients without batches are assessed on stock alone.
pub fn assess_inventory(
    ingredients: &[Ingredient],
    batches: impl IntoIterator<Item = RestockBatch>,
    today: NaiveDate,
) -> Vec<IngredientReport> {
    let grouped = group_batches_by_ingredient(batches);

    ingredients
        .iter()
        .map(|ingredient| {
            let own = grouped
                .get(&ingredient.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let latest_restock = latest_restock_date(own);

            IngredientReport {
                view: assess(&ingredient.stock_levels(), ingredient.quantity, own, today),
                latest_restock,
                countdown: expiry_countdown(latest_restock, ingredient.good_for, today),
                ingredient: ingredient.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use greedible_core::Money;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn days_ago(n: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(n)).unwrap()
    }

    fn days_ahead(n: u64) -> NaiveDate {
        today().checked_add_days(Days::new(n)).unwrap()
    }

    fn batch(restocked: NaiveDate) -> RestockBatch {
        RestockBatch {
            id: None,
            ingredient_id: IngredientId::new(1),
            restock_date: restocked,
            import_quantity: dec!(1),
            import_price: Money::new(dec!(1000)),
            supplier_id: None,
        }
    }

    fn levels(threshold: Option<Decimal>, good_for: Option<u32>) -> StockLevels {
        StockLevels {
            minimum_threshold: threshold,
            good_for: good_for.map(ShelfLife::days),
        }
    }

    #[test]
    fn expired_batch_is_reported_and_wins() {
        let old = batch(days_ago(10));
        let view = assess(&levels(Some(dec!(1)), Some(5)), Some(dec!(50)), &[old.clone()], today());

        assert_eq!(view.status, IngredientStatus::Expired);
        assert_eq!(view.expired_batches, vec![old]);
        assert_eq!(view.earliest_expiration, Some(days_ago(5)));
        assert_eq!(view.next_expiration, None);
    }

    #[test]
    fn without_batches_status_depends_on_quantity_only() {
        let l = levels(Some(dec!(5)), Some(5));

        let view = assess(&l, Some(dec!(6)), &[], today());
        assert_eq!(view.earliest_expiration, None);
        assert_eq!(view.status, IngredientStatus::Good);

        let view = assess(&l, Some(dec!(4)), &[], today());
        assert_eq!(view.status, IngredientStatus::NeedsRestock);
    }

    #[test]
    fn quantity_equal_to_threshold_needs_restock() {
        let view = assess(&levels(Some(dec!(5)), None), Some(dec!(5)), &[], today());
        assert_eq!(view.status, IngredientStatus::NeedsRestock);
    }

    #[test]
    fn expiring_today_is_not_expired() {
        let view = assess(&levels(None, Some(3)), None, &[batch(days_ago(3))], today());
        assert_eq!(view.status, IngredientStatus::Good);
        assert_eq!(view.earliest_expiration, Some(today()));
        assert_eq!(view.next_expiration, Some(today()));
    }

    #[test]
    fn mixed_batches_report_minimum_over_all_regardless_of_order() {
        let l = levels(Some(dec!(1)), Some(5));
        let expired = batch(days_ago(10));
        let fresh = batch(days_ago(2));

        let a = assess(&l, Some(dec!(20)), &[expired.clone(), fresh.clone()], today());
        let b = assess(&l, Some(dec!(20)), &[fresh, expired], today());

        for view in [&a, &b] {
            assert_eq!(view.status, IngredientStatus::Expired);
            assert_eq!(view.earliest_expiration, Some(days_ago(5)));
            assert_eq!(view.next_expiration, Some(days_ahead(3)));
            assert_eq!(view.expired_batches.len(), 1);
        }
    }

    #[test]
    fn missing_shelf_life_never_expires() {
        let view = assess(&levels(None, None), None, &[batch(days_ago(400))], today());
        assert_eq!(view.status, IngredientStatus::Good);
        assert_eq!(view.earliest_expiration, None);
        assert!(view.expired_batches.is_empty());
    }

    #[test]
    fn expired_takes_precedence_over_low_stock() {
        let view = assess(
            &levels(Some(dec!(10)), Some(1)),
            Some(dec!(0)),
            &[batch(days_ago(2))],
            today(),
        );
        assert_eq!(view.status, IngredientStatus::Expired);
    }

    #[test]
    fn status_labels() {
        assert_eq!(IngredientStatus::NeedsRestock.to_string(), "Needs Restock");
        assert_eq!(IngredientStatus::Good.to_string(), "Good");
        assert_eq!(IngredientStatus::Expired.to_string(), "Expired");
    }

    #[test]
    fn countdown_from_latest_restock() {
        let five = Some(ShelfLife::days(5));
        assert_eq!(
            expiry_countdown(Some(days_ago(2)), five, today()),
            ExpiryCountdown::DaysLeft(3)
        );
        assert_eq!(
            expiry_countdown(Some(days_ago(5)), five, today()),
            ExpiryCountdown::DaysLeft(0)
        );
        let expired = expiry_countdown(Some(days_ago(9)), five, today());
        assert_eq!(expired, ExpiryCountdown::ExpiredDaysAgo(4));
        assert_eq!(expired.to_string(), "Expired (4 days ago)");
        assert_eq!(expiry_countdown(None, five, today()).to_string(), "N/A");
        assert_eq!(
            expiry_countdown(Some(days_ago(1)), None, today()),
            ExpiryCountdown::Unknown
        );
    }

    #[test]
    fn inventory_assessment_keys_batches_by_ingredient() {
        let ingredients = crate::group_rows(vec![
            crate::IngredientRow {
                ingredient_id: IngredientId::new(1),
                ingredient_name: "Shrimp".into(),
                quantity: Some(dec!(8)),
                unit: Some("kg".into()),
                minimum_threshold: Some(dec!(2)),
                good_for: Some(ShelfLife::days(2)),
                supplier_id: None,
                supplier_name: None,
            },
            crate::IngredientRow {
                ingredient_id: IngredientId::new(2),
                ingredient_name: "Rice".into(),
                quantity: Some(dec!(1)),
                unit: Some("kg".into()),
                minimum_threshold: Some(dec!(5)),
                good_for: None,
                supplier_id: None,
                supplier_name: None,
            },
        ]);

        let mut other = batch(days_ago(1));
        other.ingredient_id = IngredientId::new(99);

        let reports = assess_inventory(&ingredients, vec![batch(days_ago(4)), other], today());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].view.status, IngredientStatus::Expired);
        assert_eq!(reports[0].latest_restock, Some(days_ago(4)));
        assert_eq!(reports[0].countdown, ExpiryCountdown::ExpiredDaysAgo(2));
        assert_eq!(reports[1].view.status, IngredientStatus::NeedsRestock);
        assert_eq!(reports[1].countdown, ExpiryCountdown::Unknown);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_batches() -> impl Strategy<Value = Vec<RestockBatch>> {
            proptest::collection::vec(0u64..60, 0..8)
                .prop_map(|ages| ages.into_iter().map(|a| batch(days_ago(a))).collect())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: assessing twice with identical inputs yields identical output.
            #[test]
            fn assess_is_idempotent(
                batches in arb_batches(),
                good_for in proptest::option::of(0u32..30),
                quantity in proptest::option::of(0i64..100),
                threshold in proptest::option::of(0i64..100),
            ) {
                let l = levels(threshold.map(Decimal::from), good_for);
                let q = quantity.map(Decimal::from);
                prop_assert_eq!(assess(&l, q, &batches, today()), assess(&l, q, &batches, today()));
            }

            /// Property: status and dates do not depend on batch order.
            #[test]
            fn assess_ignores_batch_order(
                batches in arb_batches(),
                good_for in 0u32..30,
            ) {
                let l = levels(Some(Decimal::ONE), Some(good_for));
                let mut reversed = batches.clone();
                reversed.reverse();

                let a = assess(&l, Some(Decimal::TEN), &batches, today());
                let b = assess(&l, Some(Decimal::TEN), &reversed, today());
                prop_assert_eq!(a.status, b.status);
                prop_assert_eq!(a.earliest_expiration, b.earliest_expiration);
                prop_assert_eq!(a.next_expiration, b.next_expiration);
                prop_assert_eq!(a.expired_batches.len(), b.expired_batches.len());
            }

            /// Property: every batch past `restock + good_for` is reported expired.
            #[test]
            fn stale_batches_are_always_reported(
                batches in arb_batches(),
                good_for in 0u32..30,
            ) {
                let l = levels(None, Some(good_for));
                let view = assess(&l, None, &batches, today());
                let stale = batches
                    .iter()
                    .filter(|b| expiration_date(b.restock_date, ShelfLife::days(good_for)).unwrap() < today())
                    .count();

                prop_assert_eq!(view.expired_batches.len(), stale);
                prop_assert_eq!(view.status == IngredientStatus::Expired, stale > 0);
                if let (Some(earliest), Some(next)) = (view.earliest_expiration, view.next_expiration) {
                    prop_assert!(earliest <= next);
                }
            }
        }
    }
}
