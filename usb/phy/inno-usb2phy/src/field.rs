//! Register fields: one control or status bit range described as data.
//!
//! The GRF uses the "hiword mask" convention: the low half of a 32-bit
//! register carries data, the high half selects which data bits the write
//! actually changes. Writes through [`enable`] therefore never need a read.

use crate::error::RegmapError;
use crate::regmap::Regmap;

pub const WRITE_MASK_SHIFT: u32 = 16;

/// Bits `low..=high` set. `high` must be `>= low` and below 32.
pub const fn genmask(high: u32, low: u32) -> u32 {
    (u32::MAX >> (31 - high)) & (u32::MAX << low)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegField {
    pub offset: u32,
    pub bitend: u32,
    pub bitstart: u32,
    pub disable: u32,
    pub enable: u32,
}

impl RegField {
    pub const fn new(offset: u32, bitend: u32, bitstart: u32, disable: u32, enable: u32) -> Self {
        Self {
            offset,
            bitend,
            bitstart,
            disable,
            enable,
        }
    }

    pub const fn mask(&self) -> u32 {
        genmask(self.bitend, self.bitstart)
    }

    pub const fn width(&self) -> u32 {
        self.bitend - self.bitstart + 1
    }

    /// The bit range is ordered and both values fit into it.
    pub fn is_well_formed(&self) -> bool {
        if self.bitend < self.bitstart || self.bitend > 31 {
            return false;
        }
        let fits = |value: u32| value.checked_shr(self.width()).unwrap_or(0) == 0;
        fits(self.enable) && fits(self.disable)
    }

    /// The register value that switches this field on or off.
    pub const fn write_value(&self, on: bool) -> u32 {
        let value = if on { self.enable } else { self.disable };
        (value << self.bitstart) | (self.mask() << WRITE_MASK_SHIFT)
    }

    /// Extracts this field from a register value.
    pub const fn extract(&self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.bitstart
    }
}

/// Writes the enable or disable value of `field`.
pub fn enable(base: &dyn Regmap, field: &RegField, on: bool) -> Result<(), RegmapError> {
    base.write(field.offset, field.write_value(on))
}

/// Whether `field` currently holds its enable value.
pub fn is_enabled(base: &dyn Regmap, field: &RegField) -> Result<bool, RegmapError> {
    let orig = base.read(field.offset)?;
    Ok(field.extract(orig) == field.enable)
}
