//! Core report logic: periods, query assembly, execution.

pub mod business;
pub mod period;
pub mod query;
pub mod runner;
