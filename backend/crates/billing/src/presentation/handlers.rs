//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use kernel::extract::{AppJson, AppQuery};
use kernel::principal::Principal;

use crate::application::config::BillingConfig;
use crate::application::*;
use crate::domain::entity::Payment;
use crate::domain::repository::BillingStore;
use crate::error::BillingResult;
use crate::presentation::dto::*;

/// Shared state for billing handlers
#[derive(Clone)]
pub struct BillingAppState<R>
where
    R: BillingStore,
{
    pub repo: Arc<R>,
    pub config: Arc<BillingConfig>,
}

// ============================================================================
// Accommodation
// ============================================================================

/// POST /accommodation/request
pub async fn request_accommodation<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<AccommodationRequest>,
) -> BillingResult<(StatusCode, Json<AccommodationCreatedResponse>)>
where
    R: BillingStore,
{
    let accommodation = RequestAccommodationUseCase::new(state.repo.clone())
        .execute(
            &principal,
            RequestAccommodationInput {
                event_id: req.event_id,
                people_count: req.people_count,
                check_in: req.check_in,
                check_out: req.check_out,
                notes: req.notes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AccommodationCreatedResponse {
            accommodation_id: accommodation.accommodation_id,
        }),
    ))
}

/// GET /my-accommodations
pub async fn my_accommodations<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
) -> BillingResult<Json<Vec<AccommodationResponse>>>
where
    R: BillingStore,
{
    let requests = AccommodationQueriesUseCase::new(state.repo.clone())
        .mine(&principal)
        .await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// GET /accommodation/requests?status=
pub async fn list_accommodations<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppQuery(query): AppQuery<AccommodationListQuery>,
) -> BillingResult<Json<Vec<AccommodationResponse>>>
where
    R: BillingStore,
{
    let requests = AccommodationQueriesUseCase::new(state.repo.clone())
        .all(&principal, query.status.as_deref())
        .await?;
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// POST /accommodation/accept
pub async fn accept_accommodation<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<AcceptAccommodationRequest>,
) -> BillingResult<Json<AccommodationResponse>>
where
    R: BillingStore,
{
    let accommodation = ReviewAccommodationUseCase::new(state.repo.clone())
        .accept(&principal, req.accommodation_id, req.room_details)
        .await?;
    Ok(Json(accommodation.into()))
}

/// POST /accommodation/reject
pub async fn reject_accommodation<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<RejectAccommodationRequest>,
) -> BillingResult<Json<AccommodationResponse>>
where
    R: BillingStore,
{
    let accommodation = ReviewAccommodationUseCase::new(state.repo.clone())
        .reject(&principal, req.accommodation_id)
        .await?;
    Ok(Json(accommodation.into()))
}

// ============================================================================
// Sponsorship
// ============================================================================

/// POST /sponsor
pub async fn create_sponsor<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<CreateSponsorRequest>,
) -> BillingResult<(StatusCode, Json<SponsorCreatedResponse>)>
where
    R: BillingStore,
{
    let sponsor = SponsorProfileUseCase::new(state.repo.clone())
        .create(&principal, req.company_name, req.contact_person)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SponsorCreatedResponse {
            sponsor_id: sponsor.sponsor_id,
        }),
    ))
}

/// GET /sponsorship-packages
pub async fn list_packages<R>(
    State(state): State<BillingAppState<R>>,
) -> BillingResult<Json<Vec<PackageResponse>>>
where
    R: BillingStore,
{
    let packages = PackagesUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(packages.into_iter().map(Into::into).collect()))
}

/// POST /admin/sponsorship-package
pub async fn create_package<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<CreatePackageRequest>,
) -> BillingResult<(StatusCode, Json<PackageCreatedResponse>)>
where
    R: BillingStore,
{
    let package = PackagesUseCase::new(state.repo.clone())
        .create(&principal, req.name, req.amount, req.benefits)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageCreatedResponse {
            package_id: package.package_id,
        }),
    ))
}

/// POST /sponsorship
pub async fn create_sponsorship<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<CreateSponsorshipRequest>,
) -> BillingResult<(StatusCode, Json<SponsorshipCreatedResponse>)>
where
    R: BillingStore,
{
    let sponsorship = CreateSponsorshipUseCase::new(state.repo.clone())
        .execute(&principal, req.package_id, req.event_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SponsorshipCreatedResponse {
            sponsorship_id: sponsorship.sponsorship_id,
        }),
    ))
}

/// GET /my-sponsorships
pub async fn my_sponsorships<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
) -> BillingResult<Json<Vec<SponsorshipResponse>>>
where
    R: BillingStore,
{
    let sponsorships = SponsorshipQueriesUseCase::new(state.repo.clone())
        .mine(&principal)
        .await?;
    Ok(Json(sponsorships.into_iter().map(Into::into).collect()))
}

/// GET /admin/sponsorships
pub async fn all_sponsorships<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
) -> BillingResult<Json<Vec<SponsorshipResponse>>>
where
    R: BillingStore,
{
    let sponsorships = SponsorshipQueriesUseCase::new(state.repo.clone())
        .all(&principal)
        .await?;
    Ok(Json(sponsorships.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Payments
// ============================================================================

fn payment_created(payment: Payment) -> (StatusCode, Json<PaymentCreatedResponse>) {
    (
        StatusCode::CREATED,
        Json(PaymentCreatedResponse {
            payment_id: payment.payment_id,
        }),
    )
}

/// POST /add-payment/event
pub async fn pay_for_event<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<EventPaymentRequest>,
) -> BillingResult<(StatusCode, Json<PaymentCreatedResponse>)>
where
    R: BillingStore,
{
    let payment = SubmitPaymentUseCase::new(state.repo.clone(), state.config.clone())
        .for_event(
            &principal,
            &req.team_id,
            PaymentDetails {
                amount: req.amount,
                method: req.method,
                transaction_ref: req.transaction_ref,
            },
        )
        .await?;
    Ok(payment_created(payment))
}

/// POST /add-payment/accommodation
pub async fn pay_for_accommodation<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<AccommodationPaymentRequest>,
) -> BillingResult<(StatusCode, Json<PaymentCreatedResponse>)>
where
    R: BillingStore,
{
    let payment = SubmitPaymentUseCase::new(state.repo.clone(), state.config.clone())
        .for_accommodation(
            &principal,
            req.accommodation_id,
            PaymentDetails {
                amount: req.amount,
                method: req.method,
                transaction_ref: req.transaction_ref,
            },
        )
        .await?;
    Ok(payment_created(payment))
}

/// POST /add-payment/sponsorship
pub async fn pay_for_sponsorship<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<SponsorshipPaymentRequest>,
) -> BillingResult<(StatusCode, Json<PaymentCreatedResponse>)>
where
    R: BillingStore,
{
    let payment = SubmitPaymentUseCase::new(state.repo.clone(), state.config.clone())
        .for_sponsorship(
            &principal,
            req.sponsorship_id,
            PaymentDetails {
                amount: req.amount,
                method: req.method,
                transaction_ref: req.transaction_ref,
            },
        )
        .await?;
    Ok(payment_created(payment))
}

/// GET /my-payments
pub async fn my_payments<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: BillingStore,
{
    let payments = PaymentQueriesUseCase::new(state.repo.clone())
        .mine(&principal)
        .await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// GET /admin/payments?verified=
pub async fn list_payments<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppQuery(query): AppQuery<PaymentListQuery>,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: BillingStore,
{
    let payments = PaymentQueriesUseCase::new(state.repo.clone())
        .all(&principal, query.verified)
        .await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// POST /payment/verify
pub async fn verify_payment<R>(
    State(state): State<BillingAppState<R>>,
    principal: Principal,
    AppJson(req): AppJson<VerifyPaymentRequest>,
) -> BillingResult<Json<PaymentResponse>>
where
    R: BillingStore,
{
    let payment = VerifyPaymentUseCase::new(state.repo.clone())
        .execute(&principal, req.payment_id)
        .await?;
    Ok(Json(payment.into()))
}
