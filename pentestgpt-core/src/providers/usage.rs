//! Token usage tracking across a session

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::TokenUsage;

/// Thread-safe token usage accumulator shared between providers
///
/// Clones share the same counters, so the session can hand one tracker to
/// both the reasoning and parsing providers and read a combined total.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    input: Arc<AtomicU64>,
    output: Arc<AtomicU64>,
}

impl UsageTracker {
    /// Create a new usage tracker with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage from one completion
    pub fn record(&self, usage: &TokenUsage) {
        self.input.fetch_add(usage.input_tokens, Ordering::Relaxed);
        self.output.fetch_add(usage.output_tokens, Ordering::Relaxed);
    }

    /// Get the accumulated totals
    pub fn snapshot(&self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input.load(Ordering::Relaxed),
            output_tokens: self.output.load(Ordering::Relaxed),
        }
    }
}
