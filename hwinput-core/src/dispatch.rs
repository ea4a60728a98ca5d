//! Dispatch gateway: the single point where built records reach the OS.
//!
//! A batch is submitted in one call so its events are inserted into the
//! input stream contiguously.  A short accepted count is an error and is
//! never retried: the undelivered half of a down/up pair may have left a
//! key logically down, and the caller has to see that.

use crate::errors::{InputError, Result};
use crate::platform::Platform;
use crate::record::InputRecord;

/// Submit `records` as one batch.  Returns the accepted count, which is
/// always `records.len()` on success.  An empty batch makes no OS call.
pub fn submit<P: Platform + ?Sized>(platform: &P, records: &[InputRecord]) -> Result<u32> {
    if records.is_empty() {
        return Ok(0);
    }

    let accepted = platform.submit_input(records);
    if accepted as usize != records.len() {
        let os_code = platform.last_error_code();
        log::warn!(
            "SendInput accepted {accepted} of {} events (os error {os_code})",
            records.len()
        );
        return Err(InputError::Simulate {
            message: format!(
                "Not all input events were sent: {accepted} of {} accepted",
                records.len()
            ),
            os_code: Some(os_code),
        });
    }

    log::debug!("dispatched {accepted} input events");
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingPlatform;

    fn pair() -> [InputRecord; 2] {
        [
            InputRecord::keyboard(0, 0x41, 0x1E, 1),
            InputRecord::keyboard(0x2, 0x41, 0x1E, 1),
        ]
    }

    #[test]
    fn test_full_batch_accepted() {
        let p = RecordingPlatform::new();
        assert_eq!(submit(&p, &pair()).unwrap(), 2);
        assert_eq!(p.batches().len(), 1);
    }

    #[test]
    fn test_empty_batch_skips_os_call() {
        let p = RecordingPlatform::new();
        assert_eq!(submit(&p, &[]).unwrap(), 0);
        assert!(p.batches().is_empty());
    }

    #[test]
    fn test_partial_delivery_carries_os_code() {
        let p = RecordingPlatform::new();
        p.set_accept_limit(Some(1));
        p.set_error_code(5);

        let err = submit(&p, &pair()).unwrap_err();
        match err {
            InputError::Simulate { message, os_code } => {
                assert_eq!(os_code, Some(5));
                assert!(message.contains("1 of 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
