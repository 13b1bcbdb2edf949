use anyhow::Result;

use greedible_auth::Screen;
use greedible_staff::NewStaffMember;

use crate::args::StaffCommands;
use crate::context::Context;
use crate::render::{or_dash, print_json, print_table};

pub async fn run(ctx: &Context, command: StaffCommands) -> Result<()> {
    let client = &ctx.client;

    match command {
        StaffCommands::List => {
            let session = ctx.session_for(Screen::Dashboard).await?;
            let members = client.staff_members(&session).await?;
            if ctx.json {
                return print_json(&members);
            }
            let rows: Vec<Vec<String>> = members
                .iter()
                .map(|m| {
                    vec![
                        m.staff_id.to_string(),
                        m.staff_name.clone(),
                        or_dash(m.staff_email.as_deref()),
                        or_dash(m.role.as_deref()),
                        or_dash(m.phone.as_deref()),
                        or_dash(m.pay_rates.map(|p| p.display())),
                    ]
                })
                .collect();
            print_table(&["ID", "Name", "Email", "Role", "Phone", "Pay rate"], &rows);
        }
        StaffCommands::Add(args) => {
            let session = ctx.session_for(Screen::Dashboard).await?;
            let member = NewStaffMember {
                staff_name: args.name,
                staff_email: args.email,
                password: args.password,
                role: args.role,
                phone: args.phone,
                pay_rates: args.pay_rate,
            };
            let created = client.add_staff(&session, &member).await?;
            if ctx.json {
                return print_json(&created);
            }
            println!("Added {} (#{})", created.staff_name, created.staff_id);
        }
        StaffCommands::Remove { id } => {
            let session = ctx.session_for(Screen::Dashboard).await?;
            client.remove_staff(&session, id).await?;
            if ctx.json {
                return print_json(&serde_json::json!({ "removed": id }));
            }
            println!("Removed staff member {id}");
        }
        StaffCommands::Salary(month) => {
            let session = ctx.session_for(Screen::Staff).await?;
            let (year, month) = ctx.month(month);
            let summary = client.my_salary(&session, year, month).await?;
            if ctx.json {
                return print_json(&summary);
            }
            println!("Salary for {month:02}/{year}");
            println!("  working hours: {}", summary.hours);
            println!("  salary:        {}", summary.salary.display());
        }
    }
    Ok(())
}
