//! Register Use Case
//!
//! Creates a new account. Anyone may register as organizer, participant,
//! judge or sponsor; admin accounts are provisioned out of band.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::role::UserRole;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    contact::Contact, email::Email, person_name::PersonName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub contact: Option<String>,
}

pub struct RegisterOutput {
    pub user_id: UserId,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = PersonName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let contact = Contact::parse_optional(input.contact.as_deref())?;

        let role = match input.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            Some(code) => code.parse::<UserRole>()?,
            None => UserRole::default(),
        };
        if !role.is_self_assignable() {
            return Err(AuthError::RoleNotSelfAssignable(role.code().to_owned()));
        }

        if self.user_repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = RawPassword::new(input.password)?.hash(self.config.pepper())?;

        let user = self
            .user_repo
            .create_user(&NewUser {
                name,
                email,
                password_hash,
                role,
                contact,
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
        })
    }
}
