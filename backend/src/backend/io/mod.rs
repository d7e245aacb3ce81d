//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Only REST today.

pub mod rest;
