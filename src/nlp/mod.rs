//! Natural Language Processing components
//!
//! This module provides part-of-speech categories and readers for tagger
//! output.

pub mod pos;
pub mod tagged;
