//! Value Object Module

pub mod contact;
pub mod email;
pub mod person_name;
pub mod user_password;
