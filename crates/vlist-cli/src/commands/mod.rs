pub mod demo;
pub mod metrics;
pub mod simulate;
