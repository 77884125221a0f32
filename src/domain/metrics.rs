use serde::{Deserialize, Serialize};

/// Token usage reported in the stats block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Model that served the request (empty when no by-model line was printed)
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_read_tokens: u64,
    /// Estimated premium requests, may be fractional
    pub premium_requests: f64,
}

/// Time spent on the request, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationMetrics {
    pub api_seconds: f64,
    pub wall_seconds: f64,
}

/// Lines changed by the agent during the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChangeMetrics {
    pub lines_added: u64,
    pub lines_removed: u64,
}
