//! Record keeping for Docket.
//!
//! A record is a flat entity with no relationships. This module covers its
//! whole lifecycle: creation from a validated draft, filtered and sorted
//! listing, sparse updates that stamp a modification time, and deletion.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
