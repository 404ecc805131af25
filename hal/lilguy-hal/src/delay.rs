//! Blocking delays
//!
//! Panel reset and settle times are fixed waits the controller mandates.
//! They block the caller; nothing else runs on the bus meanwhile.

/// Blocking delay source
pub trait Delay {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
