//! # YAML Storage
//!
//! File-per-date claim documents plus a small admin config file, all under
//! one data directory. Writes go through a temp file and a rename.

pub mod admin_config_repository;
pub mod claim_repository;
pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use admin_config_repository::AdminConfigRepository;
pub use claim_repository::ClaimRepository;
pub use connection::YamlConnection;
