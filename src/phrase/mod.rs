//! Candidate term recognition
//!
//! This module provides the candidate pattern automaton, the frequency
//! table built from it, and the nesting relation between candidates.

pub mod containment;
pub mod frequency;
pub mod pattern;
