//! Deadline bookkeeping for blocking socket reads.
//!
//! `SO_RCVTIMEO` has microsecond granularity and a zero value means "block
//! forever", so a nearly-expired deadline must never reach the socket.

use std::time::{Duration, Instant};

/// Smallest read timeout handed to a socket.
pub const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// Read timeout for the time left until `deadline`.
///
/// Returns `None` once less than [`MIN_READ_TIMEOUT`] remains; the caller
/// treats that as expired.
#[must_use]
pub fn read_timeout(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    (remaining >= MIN_READ_TIMEOUT).then_some(remaining)
}
