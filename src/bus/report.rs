//! Broadcast outcomes.

use crate::core::BoxError;

/// A handler or collector invocation that failed during a broadcast.
///
/// The failure has already been logged; it is returned for callers that
/// want to react to it.
#[derive(Debug)]
pub struct HandlerFailure {
    pub channel: String,
    /// Registration position of the failing handler, or index of the
    /// collected value for collector failures
    pub position: usize,
    pub error: BoxError,
}

/// Summary of one broadcast.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Invocations that completed successfully
    pub delivered: usize,

    /// Invocations that failed, in invocation order
    pub failures: Vec<HandlerFailure>,

    /// Handlers unregistered by the failure policy after this broadcast
    pub removed: usize,
}

impl BroadcastReport {
    /// Total number of invocations attempted.
    pub fn reached(&self) -> usize {
        self.delivered + self.failures.len()
    }

    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(&mut self, channel: &str, position: usize, outcome: Result<(), BoxError>) {
        match outcome {
            Ok(()) => self.delivered += 1,
            Err(error) => {
                tracing::error!(
                    channel,
                    position,
                    error = %error,
                    "Error in broadcast of event"
                );
                self.failures.push(HandlerFailure {
                    channel: channel.to_string(),
                    position,
                    error,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        let report = BroadcastReport::default();
        assert!(report.is_clean());
        assert_eq!(report.reached(), 0);
    }

    #[test]
    fn record_counts_successes_and_failures() {
        let mut report = BroadcastReport::default();
        report.record("ping", 0, Ok(()));
        report.record("ping", 1, Err("boom".into()));
        report.record("ping", 2, Ok(()));

        assert_eq!(report.delivered, 2);
        assert_eq!(report.reached(), 3);
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].position, 1);
        assert_eq!(report.failures[0].channel, "ping");
        assert_eq!(report.failures[0].error.to_string(), "boom");
    }
}
