//! Event Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::EventConfig;
use crate::domain::repository::EventStore;
use crate::infra::postgres::PgEventRepository;
use crate::presentation::handlers::{self, EventAppState};

/// Create the Event router with PostgreSQL repository
pub fn event_router(repo: PgEventRepository, config: EventConfig) -> Router {
    event_router_generic(repo, config)
}

/// Create a generic Event router for any repository implementation
pub fn event_router_generic<R>(repo: R, config: EventConfig) -> Router
where
    R: EventStore,
{
    let state = EventAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        // Venues
        .route("/venue", post(handlers::create_venue::<R>))
        .route("/venues", get(handlers::list_venues::<R>))
        // Events and approval
        .route("/events", get(handlers::list_events::<R>))
        .route("/event", post(handlers::create_event::<R>))
        .route("/event/{id}", get(handlers::get_event::<R>))
        .route("/my-events", get(handlers::my_events::<R>))
        .route("/admin/events/pending", get(handlers::pending_events::<R>))
        .route("/event/accept/{id}", post(handlers::accept_event::<R>))
        .route("/event/{id}/reject", put(handlers::reject_event::<R>))
        // Rounds
        .route("/event/{id}/round", post(handlers::add_round::<R>))
        .route("/event/{id}/rounds", get(handlers::list_rounds::<R>))
        // Registration
        .route("/add-participants", post(handlers::register_team::<R>))
        .route("/my-registrations", get(handlers::my_registrations::<R>))
        .route(
            "/event/{id}/participants",
            get(handlers::event_participants::<R>),
        )
        // Judging
        .route("/admin/assign-judge", post(handlers::assign_judge::<R>))
        .route("/judge/events", get(handlers::judged_events::<R>))
        .route("/judge/mark-score", post(handlers::mark_score::<R>))
        .route(
            "/judge/event/{id}/results",
            get(handlers::event_results::<R>),
        )
        .with_state(state)
}
