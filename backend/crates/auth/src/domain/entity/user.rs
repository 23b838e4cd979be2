//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::role::UserRole;
use platform::password::HashedPassword;

use crate::domain::value_object::{contact::Contact, email::Email, person_name::PersonName};

/// Registered account. One row of `users`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: PersonName,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub contact: Option<Contact>,
    pub created_at: DateTime<Utc>,
}

/// Validated registration data, before the database assigns an id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: PersonName,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub contact: Option<Contact>,
}

impl NewUser {
    pub fn into_user(self, user_id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            user_id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            contact: self.contact,
            created_at,
        }
    }
}

impl User {
    pub fn principal(&self) -> kernel::principal::Principal {
        kernel::principal::Principal {
            user_id: self.user_id,
            name: self.name.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
            role: self.role,
        }
    }
}
