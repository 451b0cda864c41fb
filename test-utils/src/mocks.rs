//! Mock operations for testing.
//!
//! [`ScriptedOperation`] stands in for a transport call: it fails a fixed
//! number of times and then succeeds, recording each attempt number it was
//! invoked with.

use std::time::Instant;

/// Failure produced by a [`ScriptedOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedFailure {
    /// Attempt number that failed
    pub attempt: u32,
}

impl std::fmt::Display for ScriptedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scripted failure on attempt {}", self.attempt)
    }
}

impl std::error::Error for ScriptedFailure {}

/// Operation that fails its first `failures` invocations.
#[derive(Debug)]
pub struct ScriptedOperation {
    failures: u32,
    calls: Vec<(u32, Instant)>,
}

impl ScriptedOperation {
    /// Fail `failures` times, then succeed.
    #[must_use]
    pub const fn failing(failures: u32) -> Self {
        Self {
            failures,
            calls: Vec::new(),
        }
    }

    /// Fail on every invocation.
    #[must_use]
    pub const fn always_failing() -> Self {
        Self::failing(u32::MAX)
    }

    /// Invoke the operation for `attempt`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptedFailure`] while the scripted failures last.
    pub fn call(&mut self, attempt: u32) -> Result<u32, ScriptedFailure> {
        self.calls.push((attempt, Instant::now()));
        if u32::try_from(self.calls.len()).unwrap_or(u32::MAX) <= self.failures {
            Err(ScriptedFailure { attempt })
        } else {
            Ok(attempt)
        }
    }

    /// Number of invocations so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Attempt numbers passed in, in order.
    #[must_use]
    pub fn attempts(&self) -> Vec<u32> {
        self.calls.iter().map(|(attempt, _)| *attempt).collect()
    }

    /// Instants at which each invocation happened.
    #[must_use]
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.iter().map(|(_, at)| *at).collect()
    }
}
