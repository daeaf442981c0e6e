// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

struct LogLine {
    text: String,
    warn: bool,
}

#[derive(Default)]
struct LogInner {
    lines: VecDeque<LogLine>,
    warn: bool,
}

/// Thread-safe diagnostic log. Clones append to the same lines.
///
/// Only the newest `MAX_LINES` lines are kept; `contains_warnings` remembers
/// warnings that have since been dropped.
#[derive(Clone, Default)]
pub struct DiagnosticLog {
    debug: bool,
    inner: Arc<Mutex<LogInner>>,
}

impl DiagnosticLog {
    /// Number of lines kept.
    pub const MAX_LINES: usize = 512;

    /// Create a new diagnostic log. With `debug`, every line is echoed to stdout.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Trace the result of an operation and pass it through.
    pub fn call<T>(&self, line: String, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.trace(format!("{line} succeeded")),
            Err(e) => self.warn(format!("{line} failed: {e}")),
        }
        result
    }

    /// Whether the log contains any warnings.
    pub fn contains_warnings(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.warn)
            .unwrap_or(false)
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// A copy of the lines kept so far.
    pub fn lines(&self) -> Vec<String> {
        self.collect(|_| true)
    }

    /// A copy of the warning lines kept so far.
    pub fn warnings(&self) -> Vec<String> {
        self.collect(|line| line.warn)
    }

    /// Add a trace line.
    pub fn trace(&self, line: String) {
        self.push(line, false);
    }

    /// Add a warning or error line.
    pub fn warn(&self, line: String) {
        self.push(line, true);
    }

    fn collect(&self, keep: impl Fn(&LogLine) -> bool) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .lines
                    .iter()
                    .filter(|line| keep(*line))
                    .map(|line| line.text.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&self, text: String, warn: bool) {
        if text.is_empty() {
            return;
        }
        if self.debug {
            println!("{text}");
        }
        if let Ok(mut inner) = self.inner.lock() {
            if inner.lines.len() == Self::MAX_LINES {
                inner.lines.pop_front();
            }
            inner.lines.push_back(LogLine { text, warn });
            inner.warn |= warn;
        }
    }
}

impl Display for DiagnosticLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
