//! Infrastructure layer.
//!
//! Technical concerns that support the domain without containing odds or
//! staking logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation

pub mod config;
