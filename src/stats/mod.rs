//! Statistics for the distribution engine

pub mod metrics;

pub use metrics::EngineStats;
