use anyhow::Result;
use tracing::warn;

use greedible_auth::Screen;
use greedible_core::format_dmy;
use greedible_inventory::{RestockDraft, filter_restock_orders, restock_total_cost};

use crate::args::RestockCommands;
use crate::context::Context;
use crate::render::{or_dash, print_json, print_table};

pub async fn run(ctx: &Context, command: RestockCommands) -> Result<()> {
    let session = ctx.session_for(Screen::Inventory).await?;
    let client = &ctx.client;

    match command {
        RestockCommands::List { search } => {
            let orders = client.restock_orders(&session).await?;
            let shown = match search.as_deref() {
                Some(term) => filter_restock_orders(&orders, term),
                None => orders.iter().collect(),
            };
            if ctx.json {
                return print_json(&shown);
            }
            let rows: Vec<Vec<String>> = shown
                .iter()
                .map(|o| {
                    vec![
                        o.restock_id.to_string(),
                        or_dash(o.restock_date.map(format_dmy)),
                        o.supplier_name.clone(),
                    ]
                })
                .collect();
            print_table(&["ID", "Date", "Supplier"], &rows);
        }
        RestockCommands::Show { id } => {
            let lines = client.restock_lines(&session, id).await?;
            let total = restock_total_cost(&lines);
            if ctx.json {
                return print_json(&serde_json::json!({ "lines": lines, "total_cost": total }));
            }
            let rows: Vec<Vec<String>> = lines
                .iter()
                .map(|l| {
                    vec![
                        l.ingredient_name.clone(),
                        l.import_quantity.to_string(),
                        or_dash(l.unit.as_deref()),
                        l.import_price.display(),
                        l.line_cost().display(),
                    ]
                })
                .collect();
            print_table(&["Ingredient", "Quantity", "Unit", "Unit price", "Cost"], &rows);
            println!();
            println!("Total: {}", total.display());
        }
        RestockCommands::Create { supplier, items } => {
            let mut draft = RestockDraft::new(supplier);
            for item in items {
                let ingredient = item.ingredient_id;
                if !draft.add_item(item) {
                    warn!(%ingredient, "ingredient listed twice, keeping the first line");
                }
            }
            client.create_restock(&session, &draft).await?;
            if ctx.json {
                return print_json(&draft);
            }
            println!(
                "Restock created: {} item(s), total {}",
                draft.items.len(),
                draft.total_cost().display()
            );
        }
    }
    Ok(())
}
