//! Store service handlers for collaborator-driven operations.
//!
//! This module groups async handlers that operate on the shared
//! [`crate::StoreContext`], call the remote data service, mutate state,
//! and emit change events back to collaborators. Every handler settles
//! into an [`ration_bridge::ActionOutcome`]; none of them panic or
//! propagate errors.

pub mod auth_service;
pub mod ingredient_service;
pub mod plan_service;
pub mod profile_service;

/// Represents a type that is used in all handlers as a store context.
pub type StoreHandle = std::sync::Arc<crate::StoreContext>;
