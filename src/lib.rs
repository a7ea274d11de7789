//! Docket: a small record-keeping service.
//!
//! Clients create, list, fetch, update, and delete records over HTTP. A
//! record carries a title, optional details, a completion flag, and an
//! optional due date, and is persisted in a relational store.
//!
//! # Architecture
//!
//! Docket follows hexagonal architecture principles:
//!
//! - **Domain**: records, sparse update payloads, and the list query model
//! - **Ports**: the record store contract
//! - **Adapters**: in-memory and `PostgreSQL` stores
//! - **Services**: request validation, query building, and orchestration
//!
//! # Modules
//!
//! - [`record`]: record domain, store contract, adapters, and services
//! - [`http`]: axum router, handlers, and error mapping
//! - [`config`]: environment-driven configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod http;
pub mod record;
pub mod telemetry;
