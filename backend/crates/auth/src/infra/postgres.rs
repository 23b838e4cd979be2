//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{Id, UserId};
use kernel::principal::Principal;
use kernel::role::UserRole;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{access_token::AccessToken, user::{NewUser, User}};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{contact::Contact, email::Email, person_name::PersonName};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete expired tokens. Called once at startup.
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM tokens WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired tokens");

        Ok(deleted)
    }
}

/// Map a unique violation to a domain error, anything else to `Database`.
fn on_unique_violation(err: sqlx::Error, taken: AuthError) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => taken,
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        let (user_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO users (name, email, password_hash, role, contact)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, created_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.contact.as_ref().map(Contact::as_str))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, AuthError::EmailTaken))?;

        Ok(user.clone().into_user(Id::new(user_id), created_at))
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, email, password_hash, role, contact, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, email, password_hash, role, contact, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_users(&self, role: Option<UserRole>) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, email, password_hash, role, contact, created_at
            FROM users
            WHERE $1::TEXT IS NULL OR role = $1
            ORDER BY user_id
            "#,
        )
        .bind(role.map(|r| r.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

// ============================================================================
// Token Repository Implementation
// ============================================================================

impl TokenRepository for PgAuthRepository {
    async fn insert_token(&self, token: &AccessToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tokens (token_hash, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token_hash)
        .bind(token.user_id.get())
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_principal_by_token(&self, token_hash: &str) -> AuthResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT u.user_id, u.name, u.email, u.role
            FROM tokens t
            JOIN users u ON u.user_id = t.user_id
            WHERE t.token_hash = $1 AND t.expires_at > now()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PrincipalRow::into_principal).transpose()
    }

    async fn delete_token(&self, token_hash: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired_tokens(&self) -> AuthResult<u64> {
        self.cleanup_expired().await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn parse_role(code: &str) -> AuthResult<UserRole> {
    UserRole::from_code(code)
        .ok_or_else(|| AuthError::Internal(format!("Invalid role in database: {}", code)))
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    contact: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: Id::new(self.user_id),
            name: PersonName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            role: parse_role(&self.role)?,
            contact: self.contact.map(Contact::from_db),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    user_id: i64,
    name: String,
    email: String,
    role: String,
}

impl PrincipalRow {
    fn into_principal(self) -> AuthResult<Principal> {
        Ok(Principal {
            user_id: Id::new(self.user_id),
            name: self.name,
            email: self.email,
            role: parse_role(&self.role)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct DuplicateEmail;

    impl fmt::Display for DuplicateEmail {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message())
        }
    }

    impl StdError for DuplicateEmail {}

    impl DatabaseError for DuplicateEmail {
        fn message(&self) -> &str {
            r#"duplicate key value violates unique constraint "users_email_key""#
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_on_insert_is_email_taken() {
        let err = on_unique_violation(
            sqlx::Error::Database(Box::new(DuplicateEmail)),
            AuthError::EmailTaken,
        );
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[test]
    fn test_other_driver_errors_stay_database() {
        let err = on_unique_violation(sqlx::Error::PoolTimedOut, AuthError::EmailTaken);
        assert!(matches!(err, AuthError::Database(_)));
    }
}
