//! HTTP API Layer
//!
//! This crate provides the REST API for the hearthshare ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: household record maintenance plus the four operator
//!   actions (create/provisional/reconcile/delete charges)
//! - **Middleware**: request auditing with correlation ids
//! - **DTOs**: request/response objects with inbound validation
//! - **Error Handling**: settlement errors mapped to consistent status
//!   codes (validation 422, not-found 404, conflict 409)
//!
//! Operations run against one shared in-process store behind a single
//! writer lock, matching the engine's single-writer execution model.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::SystemClock;
use domain_ledger::MemoryStore;
use domain_settlement::{SettlementService, TracingNotifier};

use crate::handlers::{charges, expenses, health, ledger, people, records, stays};
use crate::middleware::audit_middleware;

/// The settlement service as wired for the API binary
pub type Ledger = SettlementService<MemoryStore, TracingNotifier, SystemClock>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - The backing record store
/// * `clock` - Source of "today" for reconciliation
pub fn create_router(store: MemoryStore, clock: SystemClock) -> Router {
    let service = SettlementService::new(store, TracingNotifier, clock);
    let state = AppState {
        ledger: Arc::new(RwLock::new(service)),
    };

    // Public routes (probes)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Household record maintenance
    let record_routes = Router::new()
        .route("/people", post(people::create_person).get(people::list_people))
        .route("/ownership-sets", post(records::create_ownership_set))
        .route("/split-methods", post(records::create_split_method))
        .route("/stays", post(stays::create_stay).get(stays::list_stays));

    // Expenses and the operator actions
    let expense_routes = Router::new()
        .route("/", post(expenses::create_expense).get(expenses::list_expenses))
        .route("/:id", get(expenses::get_expense))
        .route(
            "/:id/charges",
            post(charges::create_charges).delete(charges::delete_charges),
        )
        .route(
            "/:id/charges/provisional",
            post(charges::create_provisional_charges),
        )
        .route("/:id/reconciliation", post(charges::reconcile_charges));

    // The ordered ledger
    let ledger_routes = Router::new().route("/transactions", get(ledger::list_transactions));

    let api_routes = Router::new()
        .merge(record_routes)
        .nest("/expenses", expense_routes)
        .merge(ledger_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Convenience constructor used by tests: empty store, UTC clock
pub fn create_router_with_defaults() -> Router {
    create_router(MemoryStore::new(), SystemClock::default())
}
