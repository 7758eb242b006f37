//! Shared test utilities for the mapfixer workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each hand-roll log dumps and dispatcher files. It is a dev-dependency
//! only and is never published.
//!
//! # Modules
//!
//! - [`fixtures`]: console dump and dispatcher source builders
//! - [`install`]: [`TestInstall`] builder for a temporary game install

pub mod fixtures;
pub mod install;

pub use install::TestInstall;
