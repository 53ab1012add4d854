//! Route analysis: record construction, note tallies, and helper assignments.
//!
//! This module turns the raw text of a route export into [`types::Record`]s,
//! counts how often each delivery note occurs, and computes which part of
//! the route a helper takes over when the route is split between two workers.

pub mod aggregate;
pub mod analyzer;
pub mod assignment;
pub mod types;
