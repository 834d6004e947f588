//! HTTP API Layer
//!
//! This crate provides the REST API for the billing back office using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for customers, items, and bills
//! - **Middleware**: Request-id propagation and request logging
//! - **DTOs**: Request/Response data transfer objects (camelCase wire shape)
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_billing::BillingService;
use domain_catalog::CatalogService;
use domain_customer::CustomerService;
use infra_db::{PgBillLedger, PgCatalogStore, PgCustomerStore};

use crate::handlers::{billing, customers, health, items};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub customers: Arc<CustomerService>,
    pub catalog: Arc<CatalogService>,
    pub billing: Arc<BillingService>,
}

impl AppState {
    /// Wires the PostgreSQL adapters into the domain services
    pub fn new(pool: PgPool) -> Self {
        let customer_store = Arc::new(PgCustomerStore::new(pool.clone()));
        let catalog_store = Arc::new(PgCatalogStore::new(pool.clone()));
        let ledger = Arc::new(PgBillLedger::new(pool.clone()));

        Self {
            pool,
            customers: Arc::new(CustomerService::new(customer_store.clone())),
            catalog: Arc::new(CatalogService::new(catalog_store.clone())),
            billing: Arc::new(BillingService::new(
                customer_store,
                catalog_store,
                ledger.clone(),
                ledger,
            )),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool) -> Router {
    let state = AppState::new(pool);

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Customer routes
    let customer_routes = Router::new()
        .route("/", post(customers::create_customer))
        .route("/", get(customers::list_customers))
        .route("/:id", get(customers::get_customer))
        .route("/:id", put(customers::update_customer))
        .route("/:id", delete(customers::delete_customer))
        .route("/by-account/:account", get(customers::get_customer_by_account));

    // Catalog routes
    let item_routes = Router::new()
        .route("/", post(items::create_item))
        .route("/", get(items::list_items))
        .route("/:id", get(items::get_item))
        .route("/:id", put(items::update_item))
        .route("/:id", delete(items::delete_item))
        .route("/:id/deactivate", post(items::deactivate_item))
        .route("/by-sku/:sku", get(items::get_item_by_sku));

    // Bill routes
    let bill_routes = Router::new()
        .route("/", post(billing::create_bill))
        .route("/:bill_no", get(billing::get_bill))
        .route("/:bill_no", delete(billing::delete_bill))
        .route("/by-customer/:account", get(billing::list_bills_by_customer));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/items", item_routes)
        .nest("/bills", bill_routes)
        .layer(axum_middleware::from_fn(request_logging));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
