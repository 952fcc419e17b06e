mod http;
mod init;
mod metrics;

pub use http::{HttpTraceLayer, REQUEST_ID_HEADER, RequestSpan, ResponseMetrics, http_trace_layer};
pub use init::init_telemetry;
pub use metrics::*;
