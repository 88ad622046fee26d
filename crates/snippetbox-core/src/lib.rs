//! # Snippetbox Core
//!
//! Foundational types shared by every Snippetbox crate:
//!
//! - [`errors`]: the application error type and its conversion into an HTTP response
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("snippet 42 not found"));
//!
//! let hash = hash_password("validpass123")?;
//! assert!(verify_password("validpass123", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
