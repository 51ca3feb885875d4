//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the gateway:
//! - Password hashing (bcrypt)
//! - RS256 JWT token generation and validation
//! - PEM key material loading
//!
//! The gateway defines its own authentication traits and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```no_run
//! use auth::{Claims, JwtHandler};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::from_rsa_pem_files("keys/private.pem", "keys/public.pem").unwrap();
//! let claims = Claims::for_user(
//!     "alice",
//!     "alice@example.com",
//!     "Alice A",
//!     Utc::now(),
//!     Duration::minutes(15),
//! );
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.username, "alice");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::KeyError;
pub use password::PasswordError;
pub use password::PasswordHasher;
