pub mod extractors;
pub mod latency;
