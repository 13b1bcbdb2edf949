use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Days, NaiveDate};
use greedible_core::{IngredientId, Money};
use greedible_inventory::{
    IngredientRow, RestockBatch, ShelfLife, StockLevels, assess, assess_inventory, group_rows,
};
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn batches_for(ingredient: i64, count: usize) -> Vec<RestockBatch> {
    (0..count)
        .map(|i| RestockBatch {
            id: None,
            ingredient_id: IngredientId::new(ingredient),
            restock_date: today().checked_sub_days(Days::new((i % 40) as u64)).unwrap(),
            import_quantity: Decimal::ONE,
            import_price: Money::ZERO,
            supplier_id: None,
        })
        .collect()
}

fn bench_single_ingredient(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess_single_ingredient");
    let levels = StockLevels {
        minimum_threshold: Some(Decimal::TEN),
        good_for: Some(ShelfLife::days(14)),
    };

    for count in [1usize, 10, 100, 1000] {
        let batches = batches_for(1, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &batches, |b, batches| {
            b.iter(|| assess(black_box(&levels), Some(Decimal::ONE_HUNDRED), batches, today()))
        });
    }

    group.finish();
}

fn bench_inventory_overview(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess_inventory");

    for ingredients in [10i64, 100, 500] {
        let rows: Vec<IngredientRow> = (0..ingredients)
            .map(|id| IngredientRow {
                ingredient_id: IngredientId::new(id),
                ingredient_name: format!("ingredient-{id}"),
                quantity: Some(Decimal::from(id % 20)),
                unit: Some("kg".to_string()),
                minimum_threshold: Some(Decimal::from(5)),
                good_for: Some(ShelfLife::days(7)),
                supplier_id: None,
                supplier_name: None,
            })
            .collect();
        let grouped = group_rows(rows);
        let batches: Vec<RestockBatch> =
            (0..ingredients).flat_map(|id| batches_for(id, 12)).collect();

        group.throughput(Throughput::Elements(ingredients as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(ingredients),
            &(grouped, batches),
            |b, (grouped, batches)| {
                b.iter(|| assess_inventory(black_box(grouped), batches.iter().cloned(), today()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_ingredient, bench_inventory_overview);
criterion_main!(benches);
