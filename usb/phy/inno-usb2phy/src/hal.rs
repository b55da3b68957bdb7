//! Interfaces to the hardware the PHY driver borrows from the rest of the
//! platform: voltage regulators, the reset controller, a VBUS sense GPIO and
//! a delay source. Register maps live in [`crate::regmap`].

use common::timeout::Timeout;

use crate::Result;

/// A switchable supply, usually the VBUS regulator of one port.
pub trait Regulator {
    fn set_enable(&mut self, enable: bool) -> Result<()>;
}

/// The reset line of the PHY.
pub trait ResetControl {
    fn assert(&mut self) -> Result<()>;
    fn deassert(&mut self) -> Result<()>;
}

/// External VBUS presence detection, sampled once per charger detection.
pub trait VbusGpio {
    fn is_high(&self) -> bool;
}

/// Blocking delays. Nothing else runs while the driver waits.
pub trait Delay {
    fn delay_us(&self, us: u64);

    fn delay_ms(&self, ms: u64) {
        self.delay_us(ms * 1000);
    }
}

/// Spins on the monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct BusyDelay;

impl Delay for BusyDelay {
    fn delay_us(&self, us: u64) {
        Timeout::from_micros(us).spin();
    }
}
