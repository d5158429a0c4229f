//! Wall-clock scheduling of the run start.
//!
//! Several runner processes, possibly on different hosts, are started with the same start time so
//! that their load overlaps. The wait is a coarse polling loop, which is precise enough given that
//! a skew of one poll interval between runners is acceptable.

use std::time::{Duration, SystemTime};

use humantime::TimestampError;

use crate::error::{Result, RunnerError};

/// Default interval between clock checks while waiting for the start time.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Length of `YYYY-MM-DDTHH:MM:SS`.
const START_TIME_LEN: usize = 19;

/// Parses a start time of the form `YYYY-MM-DDTHH:MM:SS`, interpreted as UTC.
///
/// Only this exact shape is accepted: no fractional seconds or zone suffix.
pub fn parse_start_time(input: &str) -> Result<SystemTime> {
    let invalid = |source: TimestampError| RunnerError::InvalidStartTime {
        input: input.to_owned(),
        source,
    };

    // `parse_rfc3339_weak` also accepts a space separator and longer forms
    if input.len() != START_TIME_LEN || input.as_bytes()[10] != b'T' {
        return Err(invalid(TimestampError::InvalidFormat));
    }
    humantime::parse_rfc3339_weak(input).map_err(invalid)
}

/// Sleeps in steps of `poll_interval` until the system clock reaches `start`.
///
/// Returns immediately if `start` has already passed.
pub async fn wait_until(start: SystemTime, poll_interval: Duration) {
    while SystemTime::now() < start {
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Instant, UNIX_EPOCH};

    use super::*;

    #[test]
    fn parses_utc_timestamps() {
        let start = parse_start_time("2025-01-02T03:04:05").unwrap();
        assert_eq!(start, UNIX_EPOCH + Duration::from_secs(1_735_787_045));
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for input in [
            "",
            "tomorrow",
            "2025-01-02",
            "2025/01/02T03:04:05",
            "2025-13-02T03:04:05",
            "2025-01-02 03:04:05",
            "2025-01-02T03:04:05.123",
            "2025-01-02T03:04:05Z",
        ] {
            assert!(
                matches!(
                    parse_start_time(input),
                    Err(RunnerError::InvalidStartTime { .. })
                ),
                "{input}"
            );
        }
    }

    #[tokio::test]
    async fn past_start_returns_immediately() {
        let started = Instant::now();
        wait_until(UNIX_EPOCH, Duration::from_secs(10)).await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn waits_for_future_start() {
        let start = SystemTime::now() + Duration::from_millis(300);
        wait_until(start, Duration::from_millis(20)).await;
        assert!(SystemTime::now() >= start);
    }
}
