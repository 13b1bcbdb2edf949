use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use greedible_core::{IngredientId, OrderId, RecipeId, RestockId, StaffId, SupplierId};
use greedible_inventory::RestockItem;
use greedible_observability::LogFormat;
use greedible_recipes::RecipeCategory;
use greedible_staff::ShiftKind;

#[derive(Parser)]
#[command(name = "greedible", about = "Greedible restaurant back office", version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "GREEDIBLE_LOG_FORMAT",
        default_value = "pretty",
        help = "Log line format on stderr (json or pretty)"
    )]
    pub log_format: LogFormat,

    #[arg(
        long,
        global = true,
        env = "GREEDIBLE_TOKEN",
        hide_env_values = true,
        help = "Bearer token to use instead of the saved session"
    )]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and save the session.
    Login(LoginArgs),
    /// Forget the saved session.
    Logout,
    /// Show who the current session belongs to.
    Whoami,
    #[command(subcommand)]
    Inventory(InventoryCommands),
    #[command(subcommand)]
    Restocks(RestockCommands),
    #[command(subcommand)]
    Recipes(RecipeCommands),
    #[command(subcommand)]
    Staff(StaffCommands),
    #[command(subcommand)]
    Schedule(ScheduleCommands),
    #[command(subcommand)]
    Dashboard(DashboardCommands),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "GREEDIBLE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Expired,
    NeedsRestock,
    Good,
}

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Every ingredient with its expiration status.
    Overview {
        #[arg(long, help = "Only ingredients whose name contains this text")]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },
    /// Ingredients at or below their minimum threshold.
    RestockNeeded,
    Add(AddIngredientArgs),
    Update(UpdateIngredientArgs),
    Delete { id: IngredientId },
    Suppliers,
    Waste,
}

#[derive(Args)]
pub struct AddIngredientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub quantity: Decimal,
    #[arg(long)]
    pub threshold: Decimal,
    #[arg(long, default_value = "kg")]
    pub unit: String,
}

#[derive(Args)]
pub struct UpdateIngredientArgs {
    pub id: IngredientId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub quantity: Option<Decimal>,
    #[arg(long)]
    pub threshold: Option<Decimal>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub supplier: Option<SupplierId>,
    #[arg(long, help = "Shelf life in days; 0 clears it")]
    pub good_for: Option<u32>,
}

#[derive(Subcommand)]
pub enum RestockCommands {
    List {
        #[arg(long, help = "Match supplier name or DD/MM/YYYY date")]
        search: Option<String>,
    },
    /// Ingredient lines and total cost of one restock.
    Show { id: RestockId },
    Create {
        #[arg(long)]
        supplier: SupplierId,
        #[arg(
            long = "item",
            required = true,
            value_parser = parse_restock_item,
            help = "INGREDIENT_ID:QUANTITY:UNIT_PRICE, repeatable"
        )]
        items: Vec<RestockItem>,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_category)]
        category: Option<RecipeCategory>,
    },
    Show { id: RecipeId },
    Add(RecipeFormArgs),
    Update {
        id: RecipeId,
        #[command(flatten)]
        form: RecipeEditArgs,
    },
    Delete { id: RecipeId },
    /// Take a recipe off the menu.
    Discontinue { id: RecipeId },
}

#[derive(Args)]
pub struct RecipeFormArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, value_parser = parse_category, default_value = "Main Dishes")]
    pub category: RecipeCategory,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long, default_value = "")]
    pub description: String,
    #[command(flatten)]
    pub nutrition: NutritionArgs,
    #[arg(
        long = "ingredient",
        value_parser = parse_ingredient_line,
        help = "INGREDIENT_ID:WEIGHT, repeatable"
    )]
    pub ingredients: Vec<(IngredientId, Decimal)>,
    #[arg(long, conflicts_with = "image_url", help = "Image file to upload")]
    pub image: Option<std::path::PathBuf>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args)]
pub struct RecipeEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<RecipeCategory>,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub calories: Option<Decimal>,
    #[arg(long)]
    pub protein: Option<Decimal>,
    #[arg(long)]
    pub fat: Option<Decimal>,
    #[arg(long)]
    pub carbohydrate: Option<Decimal>,
    #[arg(long)]
    pub fiber: Option<Decimal>,
    #[arg(
        long = "ingredient",
        value_parser = parse_ingredient_line,
        help = "Replace the ingredient list; INGREDIENT_ID:WEIGHT, repeatable"
    )]
    pub ingredients: Vec<(IngredientId, Decimal)>,
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args)]
pub struct NutritionArgs {
    #[arg(long, default_value = "0")]
    pub calories: Decimal,
    #[arg(long, default_value = "0")]
    pub protein: Decimal,
    #[arg(long, default_value = "0")]
    pub fat: Decimal,
    #[arg(long, default_value = "0")]
    pub carbohydrate: Decimal,
    #[arg(long, default_value = "0")]
    pub fiber: Decimal,
}

#[derive(Subcommand)]
pub enum StaffCommands {
    List,
    Add(AddStaffArgs),
    Remove { id: StaffId },
    /// Own hours and salary for a month.
    Salary(MonthArgs),
}

#[derive(Args)]
pub struct AddStaffArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "GREEDIBLE_NEW_STAFF_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, default_value = "Staff")]
    pub role: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long)]
    pub pay_rate: Decimal,
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// The month's shifts and who is on them.
    Month {
        #[command(flatten)]
        month: MonthArgs,
        #[arg(long, action = ArgAction::SetTrue, help = "Only shifts I am signed up for")]
        mine: bool,
    },
    Create(ShiftArgs),
    SignUp(ShiftArgs),
    Unassign(ShiftArgs),
    /// Delete a shift and every assignment on it.
    Delete(ShiftArgs),
}

#[derive(Args)]
pub struct ShiftArgs {
    #[arg(long, help = "YYYY-MM-DD")]
    pub date: NaiveDate,
    #[arg(long, help = "morning or evening")]
    pub shift: ShiftKind,
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Orders, revenue and imports per day of a month.
    Revenue(MonthArgs),
    Orders(OrdersArgs),
    /// Move an order to its next status.
    Advance { id: OrderId },
    Salaries(MonthArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Time,
    Total,
}

#[derive(Args)]
pub struct OrdersArgs {
    #[arg(long, help = "Match customer name or phone")]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort")]
    pub desc: bool,
}

#[derive(Args, Clone, Copy)]
pub struct MonthArgs {
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

fn parse_category(raw: &str) -> Result<RecipeCategory, String> {
    Ok(RecipeCategory::parse(raw))
}

fn parse_restock_item(raw: &str) -> Result<RestockItem, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [id, quantity, price] = parts.as_slice() else {
        return Err(format!("expected INGREDIENT_ID:QUANTITY:UNIT_PRICE, got '{raw}'"));
    };
    Ok(RestockItem {
        ingredient_id: id.parse().map_err(|e| format!("{e}"))?,
        import_quantity: quantity
            .trim()
            .parse()
            .map_err(|e| format!("quantity '{quantity}': {e}"))?,
        import_price: price
            .trim()
            .parse()
            .map_err(|e| format!("price '{price}': {e}"))?,
    })
}

fn parse_ingredient_line(raw: &str) -> Result<(IngredientId, Decimal), String> {
    let (id, weight) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected INGREDIENT_ID:WEIGHT, got '{raw}'"))?;
    let id = id.parse().map_err(|e| format!("{e}"))?;
    let weight = weight
        .trim()
        .parse()
        .map_err(|e| format!("weight '{weight}': {e}"))?;
    Ok((id, weight))
}
