//! flight-delay: gradient-boosted delay prediction for scheduled flights.
//!
//! The crate couples a deterministic feature encoder (a frozen, ordered
//! indicator schema over airline, month, and flight type) with a binary
//! gradient-boosted-tree classifier that trains with class-imbalance
//! correction and persists its fitted state through a small storage
//! collaborator. An axum serving boundary exposes health and predict
//! endpoints; training runs offline through the `train` binary.
pub mod config;
pub mod error;
pub mod flights;
pub mod io;
pub mod model;
pub mod preprocessing;
pub mod serve;
pub mod store;
