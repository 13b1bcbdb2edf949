//! Inventory domain module.
//!
//! Ingredients, suppliers, restocks and the expiration engine, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no clock reads).

pub mod expiration;
pub mod ingredient;
pub mod restock;

pub use expiration::{
    ExpirationView, ExpiryCountdown, IngredientReport, IngredientStatus, StockLevels, assess,
    assess_inventory, expiration_date, expiry_countdown, is_expired,
};
pub use ingredient::{
    Ingredient, IngredientDraft, IngredientRow, IngredientUpdate, ShelfLife, Supplier,
    WasteRecord, group_rows, restock_needed, search_by_name,
};
pub use restock::{
    RestockBatch, RestockDraft, RestockItem, RestockLine, RestockOrder,
    filter_restock_orders, group_batches_by_ingredient, latest_restock_date, restock_total_cost,
};
