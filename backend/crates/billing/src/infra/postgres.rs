//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AccommodationId, EventId, Id, PaymentId, SponsorshipId, SponsorshipPackageId, UserId,
};
use kernel::team::TeamId;
use sqlx::PgPool;

use crate::domain::entity::*;
use crate::domain::repository::{
    AccommodationRepository, PaymentRepository, RegistrationLookup, SponsorRepository,
};
use crate::domain::value_object::{AccommodationStatus, PaymentPurpose};
use crate::error::{BillingError, BillingResult};

/// PostgreSQL-backed billing repository
#[derive(Clone)]
pub struct PgBillingRepository {
    pool: PgPool,
}

impl PgBillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation to a domain error, anything else to `Database`.
fn on_unique_violation(err: sqlx::Error, conflict: BillingError) -> BillingError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => conflict,
        _ => BillingError::Database(err),
    }
}

// ============================================================================
// Registration Lookup Implementation
// ============================================================================

impl RegistrationLookup for PgBillingRepository {
    async fn event_exists(&self, event_id: EventId) -> BillingResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM event WHERE event_id = $1)")
                .bind(event_id.get())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_user_team(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> BillingResult<Option<TeamId>> {
        let team_id = sqlx::query_scalar::<_, String>(
            "SELECT team_id FROM participant WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id.get())
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        team_id.as_deref().map(parse_team).transpose()
    }

    async fn find_team(&self, team_id: &TeamId) -> BillingResult<Option<TeamBilling>> {
        let rows = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT p.user_id, p.event_id, e.registration_fee
            FROM participant p
            JOIN event e ON e.event_id = p.event_id
            WHERE p.team_id = $1
            ORDER BY p.participant_id
            "#,
        )
        .bind(team_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let Some(&(_, event_id, registration_fee)) = rows.first() else {
            return Ok(None);
        };

        Ok(Some(TeamBilling {
            team_id: *team_id,
            event_id: Id::new(event_id),
            registration_fee,
            members: rows.iter().map(|(user_id, _, _)| Id::new(*user_id)).collect(),
        }))
    }
}

// ============================================================================
// Accommodation Repository Implementation
// ============================================================================

impl AccommodationRepository for PgBillingRepository {
    async fn create_accommodation(
        &self,
        request: &NewAccommodation,
    ) -> BillingResult<Accommodation> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            r#"
            INSERT INTO accommodation
                (user_id, event_id, team_id, people_count, check_in, check_out, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING accommodation_id, user_id, event_id, team_id, people_count, check_in,
                      check_out, notes, status, room_details, payment_status, created_at
            "#,
        )
        .bind(request.user_id.get())
        .bind(request.event_id.get())
        .bind(request.team_id.as_ref().map(TeamId::as_str))
        .bind(request.people_count)
        .bind(request.check_in)
        .bind(request.check_out)
        .bind(&request.notes)
        .fetch_one(&self.pool)
        .await?;

        row.into_accommodation()
    }

    async fn find_accommodation(
        &self,
        accommodation_id: AccommodationId,
    ) -> BillingResult<Option<Accommodation>> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            r#"
            SELECT accommodation_id, user_id, event_id, team_id, people_count, check_in,
                   check_out, notes, status, room_details, payment_status, created_at
            FROM accommodation
            WHERE accommodation_id = $1
            "#,
        )
        .bind(accommodation_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccommodationRow::into_accommodation).transpose()
    }

    async fn list_user_accommodations(&self, user_id: UserId) -> BillingResult<Vec<Accommodation>> {
        let rows = sqlx::query_as::<_, AccommodationRow>(
            r#"
            SELECT accommodation_id, user_id, event_id, team_id, people_count, check_in,
                   check_out, notes, status, room_details, payment_status, created_at
            FROM accommodation
            WHERE user_id = $1
            ORDER BY created_at DESC, accommodation_id DESC
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(AccommodationRow::into_accommodation)
            .collect()
    }

    async fn list_accommodations(
        &self,
        status: Option<AccommodationStatus>,
    ) -> BillingResult<Vec<Accommodation>> {
        let rows = sqlx::query_as::<_, AccommodationRow>(
            r#"
            SELECT accommodation_id, user_id, event_id, team_id, people_count, check_in,
                   check_out, notes, status, room_details, payment_status, created_at
            FROM accommodation
            WHERE $1::TEXT IS NULL OR status = $1
            ORDER BY created_at, accommodation_id
            "#,
        )
        .bind(status.map(|s| s.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(AccommodationRow::into_accommodation)
            .collect()
    }

    async fn decide_accommodation(
        &self,
        accommodation_id: AccommodationId,
        to: AccommodationStatus,
        room_details: Option<&str>,
    ) -> BillingResult<Option<Accommodation>> {
        let row = sqlx::query_as::<_, AccommodationRow>(
            r#"
            UPDATE accommodation
            SET status = $2, room_details = COALESCE($3, room_details)
            WHERE accommodation_id = $1 AND status = 'pending'
            RETURNING accommodation_id, user_id, event_id, team_id, people_count, check_in,
                      check_out, notes, status, room_details, payment_status, created_at
            "#,
        )
        .bind(accommodation_id.get())
        .bind(to.code())
        .bind(room_details)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccommodationRow::into_accommodation).transpose()
    }
}

// ============================================================================
// Sponsor Repository Implementation
// ============================================================================

impl SponsorRepository for PgBillingRepository {
    async fn create_sponsor(&self, sponsor: &NewSponsor) -> BillingResult<Sponsor> {
        let row = sqlx::query_as::<_, SponsorRow>(
            r#"
            INSERT INTO sponsor (user_id, company_name, contact_person)
            VALUES ($1, $2, $3)
            RETURNING sponsor_id, user_id, company_name, contact_person, created_at
            "#,
        )
        .bind(sponsor.user_id.get())
        .bind(&sponsor.company_name)
        .bind(&sponsor.contact_person)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, BillingError::SponsorProfileExists))?;

        Ok(row.into_sponsor())
    }

    async fn find_sponsor_by_user(&self, user_id: UserId) -> BillingResult<Option<Sponsor>> {
        let row = sqlx::query_as::<_, SponsorRow>(
            r#"
            SELECT sponsor_id, user_id, company_name, contact_person, created_at
            FROM sponsor
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SponsorRow::into_sponsor))
    }

    async fn create_package(&self, package: &NewPackage) -> BillingResult<SponsorshipPackage> {
        let row = sqlx::query_as::<_, PackageRow>(
            r#"
            INSERT INTO sponsorship_package (name, amount, benefits)
            VALUES ($1, $2, $3)
            RETURNING package_id, name, amount, benefits
            "#,
        )
        .bind(&package.name)
        .bind(package.amount)
        .bind(&package.benefits)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, BillingError::PackageNameTaken))?;

        Ok(row.into_package())
    }

    async fn find_package(
        &self,
        package_id: SponsorshipPackageId,
    ) -> BillingResult<Option<SponsorshipPackage>> {
        let row = sqlx::query_as::<_, PackageRow>(
            "SELECT package_id, name, amount, benefits FROM sponsorship_package WHERE package_id = $1",
        )
        .bind(package_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PackageRow::into_package))
    }

    async fn list_packages(&self) -> BillingResult<Vec<SponsorshipPackage>> {
        let rows = sqlx::query_as::<_, PackageRow>(
            "SELECT package_id, name, amount, benefits FROM sponsorship_package ORDER BY amount, package_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PackageRow::into_package).collect())
    }

    async fn create_sponsorship(
        &self,
        sponsorship: &NewSponsorship,
    ) -> BillingResult<Sponsorship> {
        let row = sqlx::query_as::<_, SponsorshipRow>(
            r#"
            WITH inserted AS (
                INSERT INTO sponsorship (sponsor_id, package_id, event_id)
                VALUES ($1, $2, $3)
                RETURNING sponsorship_id, sponsor_id, package_id, event_id,
                          payment_status, created_at
            )
            SELECT s.sponsorship_id, s.sponsor_id, sp.user_id AS sponsor_user_id,
                   sp.company_name, s.package_id, pk.name AS package_name, pk.amount,
                   s.event_id, s.payment_status, s.created_at
            FROM inserted s
            JOIN sponsor sp ON sp.sponsor_id = s.sponsor_id
            JOIN sponsorship_package pk ON pk.package_id = s.package_id
            "#,
        )
        .bind(sponsorship.sponsor_id.get())
        .bind(sponsorship.package_id.get())
        .bind(sponsorship.event_id.map(|id| id.get()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_sponsorship())
    }

    async fn find_sponsorship(
        &self,
        sponsorship_id: SponsorshipId,
    ) -> BillingResult<Option<Sponsorship>> {
        let row = sqlx::query_as::<_, SponsorshipRow>(
            r#"
            SELECT s.sponsorship_id, s.sponsor_id, sp.user_id AS sponsor_user_id,
                   sp.company_name, s.package_id, pk.name AS package_name, pk.amount,
                   s.event_id, s.payment_status, s.created_at
            FROM sponsorship s
            JOIN sponsor sp ON sp.sponsor_id = s.sponsor_id
            JOIN sponsorship_package pk ON pk.package_id = s.package_id
            WHERE s.sponsorship_id = $1
            "#,
        )
        .bind(sponsorship_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SponsorshipRow::into_sponsorship))
    }

    async fn list_sponsorships(
        &self,
        sponsor_user_id: Option<UserId>,
    ) -> BillingResult<Vec<Sponsorship>> {
        let rows = sqlx::query_as::<_, SponsorshipRow>(
            r#"
            SELECT s.sponsorship_id, s.sponsor_id, sp.user_id AS sponsor_user_id,
                   sp.company_name, s.package_id, pk.name AS package_name, pk.amount,
                   s.event_id, s.payment_status, s.created_at
            FROM sponsorship s
            JOIN sponsor sp ON sp.sponsor_id = s.sponsor_id
            JOIN sponsorship_package pk ON pk.package_id = s.package_id
            WHERE $1::BIGINT IS NULL OR sp.user_id = $1
            ORDER BY s.created_at, s.sponsorship_id
            "#,
        )
        .bind(sponsor_user_id.map(|id| id.get()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SponsorshipRow::into_sponsorship).collect())
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgBillingRepository {
    async fn create_payment(&self, payment: &NewPayment) -> BillingResult<Payment> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payment (
                user_id, purpose, team_id, event_id, accommodation_id, sponsorship_id,
                amount, method, transaction_ref
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING payment_id, user_id, purpose, team_id, event_id, accommodation_id,
                      sponsorship_id, amount, method, transaction_ref, verified_status,
                      verified_by, verified_at, created_at
            "#,
        )
        .bind(payment.user_id.get())
        .bind(payment.purpose.code())
        .bind(payment.team_id.as_ref().map(TeamId::as_str))
        .bind(payment.event_id.map(|id| id.get()))
        .bind(payment.accommodation_id.map(|id| id.get()))
        .bind(payment.sponsorship_id.map(|id| id.get()))
        .bind(payment.amount)
        .bind(&payment.method)
        .bind(&payment.transaction_ref)
        .fetch_one(&self.pool)
        .await?;

        row.into_payment()
    }

    async fn find_payment(&self, payment_id: PaymentId) -> BillingResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, user_id, purpose, team_id, event_id, accommodation_id,
                   sponsorship_id, amount, method, transaction_ref, verified_status,
                   verified_by, verified_at, created_at
            FROM payment
            WHERE payment_id = $1
            "#,
        )
        .bind(payment_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn has_verified_event_payment(&self, team_id: &TeamId) -> BillingResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM payment
                WHERE purpose = 'event' AND team_id = $1 AND verified_status
            )
            "#,
        )
        .bind(team_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_user_payments(&self, user_id: UserId) -> BillingResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, user_id, purpose, team_id, event_id, accommodation_id,
                   sponsorship_id, amount, method, transaction_ref, verified_status,
                   verified_by, verified_at, created_at
            FROM payment
            WHERE user_id = $1
            ORDER BY created_at DESC, payment_id DESC
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn list_payments(&self, verified: Option<bool>) -> BillingResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, user_id, purpose, team_id, event_id, accommodation_id,
                   sponsorship_id, amount, method, transaction_ref, verified_status,
                   verified_by, verified_at, created_at
            FROM payment
            WHERE $1::BOOLEAN IS NULL OR verified_status = $1
            ORDER BY created_at, payment_id
            "#,
        )
        .bind(verified)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn verify_payment(
        &self,
        payment_id: PaymentId,
        verified_by: UserId,
    ) -> BillingResult<Option<Payment>> {
        let mut tx = self.pool.begin().await?;

        // Only an unverified row matches, so concurrent verifications resolve to one.
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE payment
            SET verified_status = TRUE, verified_by = $2, verified_at = now()
            WHERE payment_id = $1 AND NOT verified_status
            RETURNING payment_id, user_id, purpose, team_id, event_id, accommodation_id,
                      sponsorship_id, amount, method, transaction_ref, verified_status,
                      verified_by, verified_at, created_at
            "#,
        )
        .bind(payment_id.get())
        .bind(verified_by.get())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let payment = row.into_payment()?;

        let marked = match payment.purpose {
            PaymentPurpose::Event => {
                sqlx::query("UPDATE participant SET payment_status = TRUE WHERE team_id = $1")
                    .bind(payment.team_id.as_ref().map(TeamId::as_str))
                    .execute(&mut *tx)
                    .await?
            }
            PaymentPurpose::Accommodation => {
                sqlx::query(
                    "UPDATE accommodation SET payment_status = TRUE WHERE accommodation_id = $1",
                )
                .bind(payment.accommodation_id.map(|id| id.get()))
                .execute(&mut *tx)
                .await?
            }
            PaymentPurpose::Sponsorship => {
                sqlx::query("UPDATE sponsorship SET payment_status = TRUE WHERE sponsorship_id = $1")
                    .bind(payment.sponsorship_id.map(|id| id.get()))
                    .execute(&mut *tx)
                    .await?
            }
        }
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            payment_id = %payment.payment_id,
            rows_marked_paid = marked,
            "Payment target updated"
        );

        Ok(Some(payment))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn parse_team(team_id: &str) -> BillingResult<TeamId> {
    TeamId::parse_str(team_id)
        .map_err(|_| BillingError::Internal(format!("Invalid team id in database: {}", team_id)))
}

#[derive(sqlx::FromRow)]
struct AccommodationRow {
    accommodation_id: i64,
    user_id: i64,
    event_id: i64,
    team_id: Option<String>,
    people_count: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    notes: Option<String>,
    status: String,
    room_details: Option<String>,
    payment_status: bool,
    created_at: DateTime<Utc>,
}

impl AccommodationRow {
    fn into_accommodation(self) -> BillingResult<Accommodation> {
        let status = AccommodationStatus::from_code(&self.status).ok_or_else(|| {
            BillingError::Internal(format!(
                "Invalid accommodation status in database: {}",
                self.status
            ))
        })?;

        Ok(Accommodation {
            accommodation_id: Id::new(self.accommodation_id),
            user_id: Id::new(self.user_id),
            event_id: Id::new(self.event_id),
            team_id: self.team_id.as_deref().map(parse_team).transpose()?,
            people_count: self.people_count,
            check_in: self.check_in,
            check_out: self.check_out,
            notes: self.notes,
            status,
            room_details: self.room_details,
            payment_status: self.payment_status,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SponsorRow {
    sponsor_id: i64,
    user_id: i64,
    company_name: String,
    contact_person: Option<String>,
    created_at: DateTime<Utc>,
}

impl SponsorRow {
    fn into_sponsor(self) -> Sponsor {
        Sponsor {
            sponsor_id: Id::new(self.sponsor_id),
            user_id: Id::new(self.user_id),
            company_name: self.company_name,
            contact_person: self.contact_person,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PackageRow {
    package_id: i64,
    name: String,
    amount: i64,
    benefits: Option<String>,
}

impl PackageRow {
    fn into_package(self) -> SponsorshipPackage {
        SponsorshipPackage {
            package_id: Id::new(self.package_id),
            name: self.name,
            amount: self.amount,
            benefits: self.benefits,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SponsorshipRow {
    sponsorship_id: i64,
    sponsor_id: i64,
    sponsor_user_id: i64,
    company_name: String,
    package_id: i64,
    package_name: String,
    amount: i64,
    event_id: Option<i64>,
    payment_status: bool,
    created_at: DateTime<Utc>,
}

impl SponsorshipRow {
    fn into_sponsorship(self) -> Sponsorship {
        Sponsorship {
            sponsorship_id: Id::new(self.sponsorship_id),
            sponsor_id: Id::new(self.sponsor_id),
            sponsor_user_id: Id::new(self.sponsor_user_id),
            company_name: self.company_name,
            package_id: Id::new(self.package_id),
            package_name: self.package_name,
            amount: self.amount,
            event_id: self.event_id.map(Id::new),
            payment_status: self.payment_status,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: i64,
    user_id: i64,
    purpose: String,
    team_id: Option<String>,
    event_id: Option<i64>,
    accommodation_id: Option<i64>,
    sponsorship_id: Option<i64>,
    amount: i64,
    method: String,
    transaction_ref: String,
    verified_status: bool,
    verified_by: Option<i64>,
    verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> BillingResult<Payment> {
        let purpose = PaymentPurpose::from_code(&self.purpose).ok_or_else(|| {
            BillingError::Internal(format!("Invalid payment purpose in database: {}", self.purpose))
        })?;

        Ok(Payment {
            payment_id: Id::new(self.payment_id),
            user_id: Id::new(self.user_id),
            purpose,
            team_id: self.team_id.as_deref().map(parse_team).transpose()?,
            event_id: self.event_id.map(Id::new),
            accommodation_id: self.accommodation_id.map(Id::new),
            sponsorship_id: self.sponsorship_id.map(Id::new),
            amount: self.amount,
            method: self.method,
            transaction_ref: self.transaction_ref,
            verified_status: self.verified_status,
            verified_by: self.verified_by.map(Id::new),
            verified_at: self.verified_at,
            created_at: self.created_at,
        })
    }
}
