//! Context words around recognized terms
//!
//! This module provides the context word table and the per-term context
//! factor derived from it.

pub mod factor;
pub mod table;
