use anyhow::Result;

use greedible_auth::{Screen, Session};
use greedible_core::{DomainError, format_dmy};
use greedible_inventory::{
    IngredientDraft, IngredientReport, IngredientStatus, IngredientUpdate, restock_needed,
};

use crate::args::{AddIngredientArgs, InventoryCommands, StatusFilter, UpdateIngredientArgs};
use crate::context::Context;
use crate::render::{or_dash, print_json, print_table};

pub async fn run(ctx: &Context, command: InventoryCommands) -> Result<()> {
    let session = ctx.session_for(Screen::Inventory).await?;
    let client = &ctx.client;

    match command {
        InventoryCommands::Overview { search, status } => {
            let reports: Vec<IngredientReport> = client
                .inventory_overview(&session, ctx.today)
                .await?
                .into_iter()
                .filter(|r| search.as_deref().is_none_or(|s| r.ingredient.matches_name(s)))
                .filter(|r| status.is_none_or(|s| matches_status(s, r.view.status)))
                .collect();
            if ctx.json {
                return print_json(&reports);
            }
            render_overview(&reports);
        }
        InventoryCommands::RestockNeeded => {
            let ingredients = client.ingredients(&session).await?;
            let low = restock_needed(&ingredients);
            if ctx.json {
                return print_json(&low);
            }
            let rows: Vec<Vec<String>> = low
                .iter()
                .map(|i| {
                    vec![
                        i.id.to_string(),
                        i.name.clone(),
                        or_dash(i.quantity),
                        or_dash(i.minimum_threshold),
                        or_dash(i.unit.as_deref()),
                    ]
                })
                .collect();
            print_table(&["ID", "Name", "Quantity", "Minimum", "Unit"], &rows);
        }
        InventoryCommands::Add(args) => add(ctx, &session, args).await?,
        InventoryCommands::Update(args) => update(ctx, &session, args).await?,
        InventoryCommands::Delete { id } => {
            client.delete_ingredient(&session, id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted ingredient {id}");
        }
        InventoryCommands::Suppliers => {
            let suppliers = client.suppliers(&session).await?;
            if ctx.json {
                return print_json(&suppliers);
            }
            let rows: Vec<Vec<String>> = suppliers
                .iter()
                .map(|s| vec![s.supplier_id.to_string(), s.supplier_name.clone()])
                .collect();
            print_table(&["ID", "Supplier"], &rows);
        }
        InventoryCommands::Waste => {
            let waste = client.waste(&session).await?;
            if ctx.json {
                return print_json(&waste);
            }
            let rows: Vec<Vec<String>> = waste
                .iter()
                .map(|w| {
                    vec![
                        w.ingredient_name.clone(),
                        w.wasted_quantity.to_string(),
                        or_dash(w.unit.as_deref()),
                    ]
                })
                .collect();
            print_table(&["Ingredient", "Wasted", "Unit"], &rows);
        }
    }
    Ok(())
}

fn matches_status(filter: StatusFilter, status: IngredientStatus) -> bool {
    matches!(
        (filter, status),
        (StatusFilter::Expired, IngredientStatus::Expired)
            | (StatusFilter::NeedsRestock, IngredientStatus::NeedsRestock)
            | (StatusFilter::Good, IngredientStatus::Good)
    )
}

fn render_overview(reports: &[IngredientReport]) {
    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|r| {
            let i = &r.ingredient;
            vec![
                i.id.to_string(),
                i.name.clone(),
                or_dash(i.quantity),
                or_dash(i.unit.as_deref()),
                or_dash(i.minimum_threshold),
                or_dash(i.good_for.map(|g| g.as_days())),
                i.suppliers.join(", "),
                or_dash(r.latest_restock.map(format_dmy)),
                or_dash(r.view.next_expiration.map(format_dmy)),
                r.countdown.to_string(),
                r.view.status.to_string(),
            ]
        })
        .collect();
    print_table(
        &[
            "ID",
            "Name",
            "Quantity",
            "Unit",
            "Minimum",
            "Shelf life",
            "Suppliers",
            "Last restock",
            "Next expiry",
            "Days left",
            "Status",
        ],
        &rows,
    );

    let expired: usize = reports.iter().map(|r| r.view.expired_batches.len()).sum();
    if expired > 0 {
        println!();
        println!("{expired} expired batch(es) in stock");
    }
}

async fn add(ctx: &Context, session: &Session, args: AddIngredientArgs) -> Result<()> {
    let draft = IngredientDraft::new(args.name, args.quantity, args.threshold).with_unit(args.unit);
    let id = ctx.client.create_ingredient(session, &draft).await?;
    if ctx.json {
        return print_json(&serde_json::json!({ "ingredient_id": id }));
    }
    match id {
        Some(id) => println!("Added ingredient {id} ({})", draft.ingredient_name),
        None => println!("Added ingredient {}", draft.ingredient_name),
    }
    Ok(())
}

async fn update(
    ctx: &Context,
    session: &Session,
    args: UpdateIngredientArgs,
) -> Result<()> {
    let ingredients = ctx.client.ingredients(session).await?;
    let current = ingredients
        .iter()
        .find(|i| i.id == args.id)
        .ok_or_else(|| DomainError::validation(format!("No ingredient with id {}.", args.id)))?;

    let mut update = IngredientUpdate::from_ingredient(current);
    if let Some(name) = args.name {
        update.ingredient_name = name;
    }
    if let Some(quantity) = args.quantity {
        update.quantity = quantity;
    }
    if let Some(threshold) = args.threshold {
        update.minimum_threshold = threshold;
    }
    if let Some(unit) = args.unit {
        update.unit = unit;
    }
    if let Some(supplier) = args.supplier {
        update.supplier_id = Some(supplier);
    }
    if args.good_for.is_some() {
        update = update.with_good_for(args.good_for);
    }

    ctx.client.update_ingredient(session, args.id, &update).await?;
    if ctx.json {
        return print_json(&update);
    }
    println!("Updated ingredient {}", args.id);
    Ok(())
}
