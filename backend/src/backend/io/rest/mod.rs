//! # REST API Interface Layer
//!
//! JSON endpoints over the claim and admin secret services. Handlers only
//! translate: DTOs from `shared` in, domain commands to the services, domain
//! errors out as `{ error, code }` bodies with a matching status.

pub mod admin_apis;
pub mod claim_apis;
pub mod errors;
pub mod mappers;
