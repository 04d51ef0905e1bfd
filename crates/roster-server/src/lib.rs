//! # Roster Server Library
//!
//! Dependency injection wiring, logging setup, and the startup walkthrough
//! for the Roster binary.

pub mod demo;
pub mod di;
pub mod startup;
