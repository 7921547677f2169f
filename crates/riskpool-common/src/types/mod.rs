//! Core data types for riskpool

pub mod params;
pub mod report;
