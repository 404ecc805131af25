//! Blocking delay backed by the embassy time driver

use embassy_time::{block_for, Duration};

/// Busy-waits on the system timer
///
/// Used only for the panel's reset and settle timings, which must hold the
/// bus idle; loop pacing goes through `embassy_time::Timer` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingDelay;

impl lilguy_hal::Delay for BlockingDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
