pub mod config_db;
pub mod kv_store;

pub use kv_store::*;
