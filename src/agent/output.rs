//! Copilot CLI stdout parsing
//!
//! In non-silent mode the CLI prints the answer followed by a stats block:
//!
//! ```text
//! Hello.
//!
//!
//! Total usage est:       0 Premium requests
//! Total duration (API):  6s
//! Total duration (wall): 12s
//! Total code changes:    0 lines added, 0 lines removed
//! Usage by model:
//!     gpt-5-mini           12.1k input, 293 output, 2.6k cache read (Est. 0 Premium requests)
//! ```
//!
//! The format has no schema or version. Every field is matched on its own and
//! anything that does not match keeps its zero value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CodeChangeMetrics, DurationMetrics, UsageMetrics};

const TOTAL_USAGE_LABEL: &str = "Total usage est:";
const USAGE_BY_MODEL_LABEL: &str = "Usage by model:";

/// How far above the last sentinel line the block start is searched for
const MAX_LOOKBACK_LINES: usize = 10;

static TOTAL_USAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Total\s+usage\s+est:\s*([\d.]+)\s*Premium").unwrap());
static API_DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Total\s+duration\s*\(API\):\s*([\d.]+)\s*s").unwrap());
static WALL_DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Total\s+duration\s*\(wall\):\s*([\d.]+)\s*s").unwrap());
static CODE_CHANGES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Total\s+code\s+changes:\s*(\d+)\s*lines\s+added,\s*(\d+)\s*lines\s+removed")
        .unwrap()
});
static MODEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\S+)").unwrap());
static INPUT_TOKENS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.]+[km]?)\s*input").unwrap());
static OUTPUT_TOKENS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.]+[km]?)\s*output").unwrap());
static CACHE_READ_TOKENS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([\d.]+[km]?)\s*cache\s*read").unwrap());
static MODEL_PREMIUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Est\.\s*([\d.]+)\s*Premium").unwrap());

/// Structured view of one CLI run's stdout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedOutput {
    /// Answer text with the stats block removed
    pub response: String,
    pub usage: UsageMetrics,
    pub duration: DurationMetrics,
    pub code_changes: CodeChangeMetrics,
}

/// Fields found on a single by-model usage line
#[derive(Debug, Default, PartialEq)]
struct ModelUsage {
    model: Option<String>,
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
    cache_read_tokens: Option<u64>,
    premium_requests: Option<f64>,
}

/// Parse CLI stdout into the answer text and its metrics.
///
/// Never fails. Output without a stats block (silent mode) comes back as the
/// trimmed input with zero-valued metrics.
pub fn parse_cli_output(stdout: &str) -> ParsedOutput {
    let lines: Vec<&str> = stdout.split('\n').collect();
    let mut result = ParsedOutput::default();

    let Some(start) = find_stats_start(&lines) else {
        result.response = stdout.trim().to_string();
        return result;
    };

    result.response = lines[..start].join("\n").trim().to_string();

    let mut total_premium_seen = false;
    for line in &lines[start..] {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = TOTAL_USAGE_RE.captures(line) {
            result.usage.premium_requests = parse_decimal(&caps[1]);
            total_premium_seen = true;
        }

        if let Some(caps) = API_DURATION_RE.captures(line) {
            result.duration.api_seconds = parse_decimal(&caps[1]);
        }

        if let Some(caps) = WALL_DURATION_RE.captures(line) {
            result.duration.wall_seconds = parse_decimal(&caps[1]);
        }

        if let Some(caps) = CODE_CHANGES_RE.captures(line) {
            result.code_changes.lines_added = caps[1].parse().unwrap_or(0);
            result.code_changes.lines_removed = caps[2].parse().unwrap_or(0);
        }

        if line.contains("input,") && line.contains("output") {
            let usage = parse_usage_line(line);
            if let Some(model) = usage.model {
                result.usage.model = model;
            }
            // A zero reading never erases an earlier one
            if let Some(n) = usage.input_tokens.filter(|n| *n > 0) {
                result.usage.input_tokens = n;
            }
            if let Some(n) = usage.output_tokens.filter(|n| *n > 0) {
                result.usage.output_tokens = n;
            }
            if let Some(n) = usage.cache_read_tokens.filter(|n| *n > 0) {
                result.usage.cache_read_tokens = n;
            }
            if !total_premium_seen {
                if let Some(premium) = usage.premium_requests {
                    result.usage.premium_requests = premium;
                }
            }
        }
    }

    result
}

/// Index of the first line of the trailing stats block, if there is one.
fn find_stats_start(lines: &[&str]) -> Option<usize> {
    let sentinel = lines
        .iter()
        .rposition(|line| line.contains(TOTAL_USAGE_LABEL) || line.contains(USAGE_BY_MODEL_LABEL))?;

    let floor = sentinel.saturating_sub(MAX_LOOKBACK_LINES);
    for j in (floor..=sentinel).rev() {
        if j < sentinel && lines[j].trim().is_empty() {
            return Some(j + 1);
        }
        if lines[j].contains(TOTAL_USAGE_LABEL) {
            return Some(j);
        }
    }

    Some(sentinel)
}

/// Parse a by-model usage line, e.g.
/// `    gpt-5-mini           12.1k input, 293 output, 2.6k cache read (Est. 0 Premium requests)`
fn parse_usage_line(line: &str) -> ModelUsage {
    ModelUsage {
        model: MODEL_RE.captures(line).map(|c| c[1].to_string()),
        input_tokens: INPUT_TOKENS_RE
            .captures(line)
            .map(|c| parse_token_count(&c[1])),
        output_tokens: OUTPUT_TOKENS_RE
            .captures(line)
            .map(|c| parse_token_count(&c[1])),
        cache_read_tokens: CACHE_READ_TOKENS_RE
            .captures(line)
            .map(|c| parse_token_count(&c[1])),
        premium_requests: MODEL_PREMIUM_RE
            .captures(line)
            .map(|c| parse_decimal(&c[1])),
    }
}

/// Expand an abbreviated token count: `12.1k` -> 12100, `1.5m` -> 1500000.
///
/// Values without a suffix are read as integers (any fractional part is
/// dropped); anything unparseable is 0.
pub fn parse_token_count(value: &str) -> u64 {
    let normalized = value.trim().to_lowercase();

    let scaled = |digits: &str, factor: f64| -> u64 {
        let n = parse_decimal(digits) * factor;
        if n.is_finite() && n > 0.0 {
            n.round() as u64
        } else {
            0
        }
    };

    if let Some(digits) = normalized.strip_suffix('k') {
        return scaled(digits, 1_000.0);
    }
    if let Some(digits) = normalized.strip_suffix('m') {
        return scaled(digits, 1_000_000.0);
    }

    let integer_part = normalized.split('.').next().unwrap_or_default();
    integer_part.parse().unwrap_or(0)
}

fn parse_decimal(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}
