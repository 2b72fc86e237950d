//! Traffic harness for exercising the fairlink WFQ scheduler.
//!
//! Provides frame builders, a seeded random traffic source, and a
//! backlogged-drain fairness experiment used by integration tests and the
//! `fairness-demo` binary. Everything is in-process and deterministic; there
//! is no network I/O.

pub mod driver;
pub mod frame;
