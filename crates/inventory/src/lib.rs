//! Inventory book records.
//!
//! Items are either electronics (carrying a warranty) or perishables
//! (carrying an expiry date). Business rules live here; persistence lives in
//! `shopkeep-store`.

pub mod item;

pub use item::{ELECTRONIC_ITEM, Item, ItemKind, PERISHABLE_ITEM};
