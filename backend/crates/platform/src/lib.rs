//! Platform Crate - Technical Infrastructure
//!
//! Domain-free helpers shared by the context crates:
//! - Random token generation and SHA-256 digests
//! - Password hashing (Argon2id with optional pepper)
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
