//! Auth adapters: Argon2 password hashing and JWT bearer tokens.

pub mod jwt;
pub mod password;

pub use jwt::JwtTokenService;
pub use password::ArgonPasswordHasher;
