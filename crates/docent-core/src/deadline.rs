//! Deadline-bound execution of blocking external calls.
//!
//! The call runs on its own thread and the caller waits on a bounded
//! channel. On timeout the caller gets `DocentError::Timeout` and the late
//! result is dropped when the worker finishes.

use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use tracing::debug;

use crate::errors::{DocentError, DocentResult};

/// Run `f` with a deadline. A zero timeout runs `f` inline without a bound.
pub fn call_with_deadline<T, F>(operation: &str, timeout: Duration, f: F) -> DocentResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> DocentResult<T> + Send + 'static,
{
    if timeout.is_zero() {
        return f();
    }

    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::Builder::new()
        .name(format!("docent-{operation}"))
        .spawn(move || {
            // Receiver may be gone after a timeout.
            let _ = tx.send(f());
        })
        .map_err(|e| DocentError::WorkerFailed(format!("{operation}: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            debug!(operation, after_ms = timeout.as_millis() as u64, "external call timed out");
            Err(DocentError::Timeout {
                operation: operation.to_string(),
                after_ms: timeout.as_millis() as u64,
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(DocentError::WorkerFailed(format!(
            "{operation}: worker exited without a result"
        ))),
    }
}
