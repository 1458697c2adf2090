//! Core domain entities.
//!
//! - [`UrlRecord`] - A short key to long URL mapping owned by an account
//! - [`User`] - A registered account
//!
//! Creation inputs use separate structs (`NewUrlRecord`, `NewUser`) so that
//! store-assigned fields never have to be invented by callers.

pub mod url_record;
pub mod user;

pub use url_record::{NewUrlRecord, UrlRecord};
pub use user::{NewUser, User, UserUpdate};
