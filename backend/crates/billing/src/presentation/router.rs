//! Billing Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::BillingConfig;
use crate::domain::repository::BillingStore;
use crate::infra::postgres::PgBillingRepository;
use crate::presentation::handlers::{self, BillingAppState};

/// Create the Billing router with PostgreSQL repository
pub fn billing_router(repo: PgBillingRepository, config: BillingConfig) -> Router {
    billing_router_generic(repo, config)
}

/// Create a generic Billing router for any repository implementation
pub fn billing_router_generic<R>(repo: R, config: BillingConfig) -> Router
where
    R: BillingStore,
{
    let state = BillingAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        // Accommodation
        .route(
            "/accommodation/request",
            post(handlers::request_accommodation::<R>),
        )
        .route("/my-accommodations", get(handlers::my_accommodations::<R>))
        .route(
            "/accommodation/requests",
            get(handlers::list_accommodations::<R>),
        )
        .route(
            "/accommodation/accept",
            post(handlers::accept_accommodation::<R>),
        )
        .route(
            "/accommodation/reject",
            post(handlers::reject_accommodation::<R>),
        )
        // Sponsorship
        .route("/sponsor", post(handlers::create_sponsor::<R>))
        .route("/sponsorship-packages", get(handlers::list_packages::<R>))
        .route(
            "/admin/sponsorship-package",
            post(handlers::create_package::<R>),
        )
        .route("/sponsorship", post(handlers::create_sponsorship::<R>))
        .route("/my-sponsorships", get(handlers::my_sponsorships::<R>))
        .route("/admin/sponsorships", get(handlers::all_sponsorships::<R>))
        // Payments
        .route("/add-payment/event", post(handlers::pay_for_event::<R>))
        .route(
            "/add-payment/accommodation",
            post(handlers::pay_for_accommodation::<R>),
        )
        .route(
            "/add-payment/sponsorship",
            post(handlers::pay_for_sponsorship::<R>),
        )
        .route("/my-payments", get(handlers::my_payments::<R>))
        .route("/admin/payments", get(handlers::list_payments::<R>))
        .route("/payment/verify", post(handlers::verify_payment::<R>))
        .with_state(state)
}
