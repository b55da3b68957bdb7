use std::time::{Duration, Instant};

pub struct Timeout {
    instant: Instant,
    duration: Duration,
}

impl Timeout {
    #[inline]
    pub fn new(duration: Duration) -> Self {
        Self {
            instant: Instant::now(),
            duration,
        }
    }

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        Self::new(Duration::from_micros(micros))
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    #[inline]
    pub fn run(&self) -> Result<(), ()> {
        if self.instant.elapsed() < self.duration {
            // Sleeps in Redox are only evaluated on PIT ticks (a few ms), which is far too coarse
            // for microsecond settle times. The clock is accurate, so yield instead.
            std::thread::yield_now();
            Ok(())
        } else {
            Err(())
        }
    }

    /// Blocks the calling thread until the timeout expires.
    #[inline]
    pub fn spin(&self) {
        while self.run().is_ok() {}
    }
}
