//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! module manager, dispatcher, http server produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span by the HTTP layer
//! - Metrics are cheap facade calls; nothing is recorded without an exporter

pub mod logging;
pub mod metrics;
