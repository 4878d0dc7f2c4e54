//! Extraction pipeline
//!
//! This module provides the stage runner, the observer hooks it reports
//! to, and the result artifacts it produces.

pub mod artifacts;
pub mod observer;
pub mod runner;
