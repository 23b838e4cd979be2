//! Application Layer
//!
//! Use cases and application services.

pub mod accommodation;
pub mod config;
pub mod payments;
pub mod sponsorship;

pub use accommodation::{
    AccommodationQueriesUseCase, RequestAccommodationInput, RequestAccommodationUseCase,
    ReviewAccommodationUseCase,
};
pub use config::BillingConfig;
pub use payments::{
    PaymentDetails, PaymentQueriesUseCase, SubmitPaymentUseCase, VerifyPaymentUseCase,
};
pub use sponsorship::{
    CreateSponsorshipUseCase, PackagesUseCase, SponsorProfileUseCase, SponsorshipQueriesUseCase,
};

/// Trim, and turn blank into `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
