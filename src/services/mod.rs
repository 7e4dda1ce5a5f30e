// Service exports
pub mod sqlite;

pub use sqlite::{fetch_all_records, StoreError, TruckStore};
