//! # Storage Module
//!
//! Persistence for claim documents and the admin secret. The domain talks
//! to the traits in [`traits`]; two interchangeable backends implement them:
//!
//! - **yaml**: one document per date under the data directory
//! - **sqlite**: sqlx over a single SQLite database

pub mod sqlite;
pub mod traits;
pub mod yaml;

pub use traits::{AdminSecretStorage, ClaimStorage};
