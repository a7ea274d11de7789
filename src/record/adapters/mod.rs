//! Adapter implementations for record ports.

pub mod memory;
pub mod postgres;
mod store;

pub use store::RecordStore;
