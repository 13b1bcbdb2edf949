use anyhow::Result;
use chrono::Datelike;

use greedible_auth::{Screen, Session};
use greedible_client::ScheduleBoard;
use greedible_core::format_dmy;
use greedible_staff::{MonthSchedule, ShiftKind, ShiftSlot};

use crate::args::{ScheduleCommands, ShiftArgs};
use crate::context::Context;
use crate::render::{print_json, print_table};

pub async fn run(ctx: &Context, command: ScheduleCommands) -> Result<()> {
    let session = ctx.session_for(Screen::Staff).await?;

    match command {
        ScheduleCommands::Month { month, mine } => {
            let (year, month) = ctx.month(month);
            let board = ScheduleBoard::load(&ctx.client, &session, year, month).await?;
            let schedule = board.schedule();

            if mine {
                let own = session
                    .staff_id()
                    .map(|id| schedule.shifts_of(id))
                    .unwrap_or_default();
                if ctx.json {
                    return print_json(&own);
                }
                let rows: Vec<Vec<String>> = own
                    .iter()
                    .map(|(day, kind)| vec![format_dmy(*day), kind.to_string()])
                    .collect();
                print_table(&["Date", "Shift"], &rows);
                return Ok(());
            }

            if ctx.json {
                return print_json(schedule);
            }
            render_month(schedule);
        }
        ScheduleCommands::Create(args) => {
            let mut board = load_for(ctx, &session, &args).await?;
            board.create_shift(args.date, args.shift).await?;
            done(ctx, "created", &args, board.schedule())?;
        }
        ScheduleCommands::SignUp(args) => {
            let mut board = load_for(ctx, &session, &args).await?;
            board.sign_up(args.date, args.shift).await?;
            done(ctx, "signed up", &args, board.schedule())?;
        }
        ScheduleCommands::Unassign(args) => {
            let mut board = load_for(ctx, &session, &args).await?;
            board.unassign(args.date, args.shift).await?;
            done(ctx, "unassigned", &args, board.schedule())?;
        }
        ScheduleCommands::Delete(args) => {
            let mut board = load_for(ctx, &session, &args).await?;
            board.delete_shift(args.date, args.shift).await?;
            done(ctx, "deleted", &args, board.schedule())?;
        }
    }
    Ok(())
}

async fn load_for<'a>(
    ctx: &'a Context,
    session: &'a Session,
    args: &ShiftArgs,
) -> Result<ScheduleBoard<'a>> {
    Ok(ScheduleBoard::load(&ctx.client, session, args.date.year(), args.date.month()).await?)
}

/// Report the outcome with the slot as it stands after the re-fetch.
fn done(ctx: &Context, action: &str, args: &ShiftArgs, schedule: &MonthSchedule) -> Result<()> {
    let slots = schedule.shifts_on(args.date, args.shift);
    if ctx.json {
        return print_json(&serde_json::json!({
            "action": action,
            "date": args.date,
            "shift": args.shift,
            "slots": slots,
        }));
    }
    println!("{} shift on {}: {action}", args.shift, format_dmy(args.date));
    for slot in slots {
        println!("  on shift: {}", staff_names(slot));
    }
    Ok(())
}

fn render_month(schedule: &MonthSchedule) {
    let rows: Vec<Vec<String>> = schedule
        .days
        .iter()
        .flat_map(|day| {
            ShiftKind::ALL.into_iter().flat_map(move |kind| {
                schedule
                    .shifts_on(day.day, kind)
                    .into_iter()
                    .map(move |slot| {
                        vec![
                            format_dmy(day.day),
                            kind.to_string(),
                            slot.time.clone().unwrap_or_default(),
                            slot.headcount().to_string(),
                            staff_names(slot),
                        ]
                    })
            })
        })
        .collect();
    print_table(&["Date", "Shift", "Time", "Staff", "Names"], &rows);
}

fn staff_names(slot: &ShiftSlot) -> String {
    if slot.staff.is_empty() {
        return "-".to_string();
    }
    slot.staff
        .iter()
        .map(|s| match s.display_name() {
            Some(name) => name.to_string(),
            None => s.initial().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
