//! Login attempt counting.
//!
//! Only the login endpoint increments counters, once per attempt, labelled
//! with the attempt outcome.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
};

pub const LOGIN_ATTEMPTS_METRIC: &str = "login_attempts_total";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure,
}

impl LoginOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Monotonic counter shared by all requests.
pub trait MetricsCounter: Send + Sync {
    fn increment(&self, label: &'static str);
}

/// In-process counter that can be read back.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    total: AtomicU64,
    by_label: RwLock<HashMap<&'static str, u64>>,
}

impl AtomicCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> u64 {
        self.by_label
            .read()
            .ok()
            .and_then(|counts| counts.get(label).copied())
            .unwrap_or(0)
    }
}

impl MetricsCounter for AtomicCounter {
    fn increment(&self, label: &'static str) {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut counts) = self.by_label.write() {
            *counts.entry(label).or_insert(0) += 1;
        }
    }
}

/// Forwards increments to the global `metrics` recorder as
/// `<name>{outcome="<label>"}`. Without an installed recorder this is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct RecorderCounter {
    name: &'static str,
}

impl RecorderCounter {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for RecorderCounter {
    fn default() -> Self {
        Self::new(LOGIN_ATTEMPTS_METRIC)
    }
}

impl MetricsCounter for RecorderCounter {
    fn increment(&self, label: &'static str) {
        ::metrics::counter!(self.name, "outcome" => label).increment(1);
    }
}
