//! HTTP client for the upstream BioTime attendance platform.
//!
//! Wraps the upstream REST API behind typed accessors for areas,
//! employees and device terminals, holding a single lazily-refreshed JWT
//! token in memory and retrying exactly once on 401. Terminal sync is a
//! best-effort probe across the candidate endpoints BioTime exposes.

mod areas;
mod client;
mod employees;
mod error;
mod sync;
mod terminals;

pub use client::{BioTimeClient, BioTimeConfig};
pub use error::{BioTimeError, Result};
