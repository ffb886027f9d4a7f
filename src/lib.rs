//! Folioview Library
//!
//! This module exposes the cache, CLI, dashboard, and data modules for use
//! in integration tests.

pub mod cache;
pub mod cli;
pub mod dashboard;
pub mod data;
