use anyhow::Result;

use greedible_auth::Screen;
use greedible_core::DomainError;
use greedible_sales::{OrderQuery, OrderSortKey};
use greedible_staff::total_payroll;

use crate::args::{DashboardCommands, OrdersArgs, SortField};
use crate::context::Context;
use crate::render::{or_dash, print_json, print_table};

pub async fn run(ctx: &Context, command: DashboardCommands) -> Result<()> {
    let session = ctx.session_for(Screen::Dashboard).await?;
    let client = &ctx.client;

    match command {
        DashboardCommands::Revenue(month) => {
            let (year, month) = ctx.month(month);
            let series = client.monthly_dashboard(&session, year, month).await?;
            let today = series.today_figures(ctx.today);
            if ctx.json {
                return print_json(&serde_json::json!({ "series": series, "today": today }));
            }

            println!(
                "Today: {} order(s), revenue {}, imports {}",
                today.orders,
                today.revenue.display(),
                today.imports.display()
            );
            println!();
            let rows: Vec<Vec<String>> = series
                .days
                .iter()
                .map(|d| {
                    vec![
                        d.label.clone(),
                        d.orders.to_string(),
                        d.revenue.display(),
                        d.imports.display(),
                    ]
                })
                .collect();
            print_table(&["Date", "Orders", "Revenue", "Imports"], &rows);
            println!();
            println!(
                "Month total: {} order(s), revenue {}, imports {}",
                series.total_orders(),
                series.total_revenue().display(),
                series.total_imports().display()
            );
        }
        DashboardCommands::Orders(args) => {
            let orders = client.orders(&session).await?;
            let query = order_query(args);
            let shown = query.apply(&orders);
            if ctx.json {
                return print_json(&shown);
            }
            let rows: Vec<Vec<String>> = shown
                .iter()
                .map(|o| {
                    vec![
                        o.order_id.to_string(),
                        or_dash(o.time.map(|t| t.format("%d/%m/%Y %H:%M").to_string())),
                        or_dash(o.customer_name.as_deref()),
                        or_dash(o.phone.as_deref()),
                        o.total_price.display(),
                        o.status.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "Time", "Customer", "Phone", "Total", "Status"], &rows);
        }
        DashboardCommands::Advance { id } => {
            let orders = client.orders(&session).await?;
            let order = orders
                .iter()
                .find(|o| o.order_id == id)
                .ok_or_else(|| DomainError::validation(format!("No order with id {id}.")))?;
            let next = client.advance_order(&session, order).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "order_id": id, "status": next }));
            }
            println!("Order {id}: {} -> {next}", order.status);
        }
        DashboardCommands::Salaries(month) => {
            let (year, month) = ctx.month(month);
            let employees = client.salaries(&session, year, month).await?;
            let total = total_payroll(&employees);
            if ctx.json {
                return print_json(&serde_json::json!({ "employees": employees, "total": total }));
            }
            let rows: Vec<Vec<String>> = employees
                .iter()
                .map(|e| vec![e.name.clone(), or_dash(e.role.as_deref()), e.total_pay.display()])
                .collect();
            print_table(&["Name", "Role", "Total pay"], &rows);
            println!();
            println!("Payroll {month:02}/{year}: {}", total.display());
        }
    }
    Ok(())
}

fn order_query(args: OrdersArgs) -> OrderQuery {
    let mut query = OrderQuery {
        search: args.search.unwrap_or_default(),
        sort: None,
    };
    if let Some(field) = args.sort {
        let key = match field {
            SortField::Time => OrderSortKey::Time,
            SortField::Total => OrderSortKey::TotalPrice,
        };
        query.toggle(key);
        if args.desc {
            query.toggle(key);
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use greedible_sales::SortDirection;

    #[test]
    fn descending_sort_toggles_twice() {
        let query = order_query(OrdersArgs {
            search: Some("hoa".into()),
            sort: Some(SortField::Total),
            desc: true,
        });
        assert_eq!(query.search, "hoa");
        assert_eq!(
            query.sort,
            Some((OrderSortKey::TotalPrice, SortDirection::Descending))
        );

        let query = order_query(OrdersArgs {
            search: None,
            sort: None,
            desc: false,
        });
        assert_eq!(query, OrderQuery::default());
    }
}
