pub mod metrics;
pub mod metrics_middleware;

pub use metrics::Metrics;
