use core::{
    cmp::PartialEq,
    ops::{BitAnd, BitOr, Not},
};

mod mmio;

pub use mmio::*;

/// IO abstraction
pub trait Io {
    /// Value type for IO, usually some unsigned number
    type Value: Copy
        + PartialEq
        + BitAnd<Output = Self::Value>
        + BitOr<Output = Self::Value>
        + Not<Output = Self::Value>;

    /// Read the underlying value
    fn read(&self) -> Self::Value;
    /// Write the underlying value
    fn write(&mut self, value: Self::Value);

    /// Check whether the underlying value contains bit flags
    #[inline(always)]
    fn readf(&self, flags: Self::Value) -> bool {
        (self.read() & flags) as Self::Value == flags
    }

    /// Enable or disable specific bit flags
    #[inline(always)]
    fn writef(&mut self, flags: Self::Value, value: bool) {
        let tmp: Self::Value = match value {
            true => self.read() | flags,
            false => self.read() & !flags,
        };
        self.write(tmp);
    }

    /// Replace the bits selected by `mask` with the matching bits of `value`
    #[inline(always)]
    fn writem(&mut self, mask: Self::Value, value: Self::Value) {
        let tmp = (self.read() & !mask) | (value & mask);
        self.write(tmp);
    }
}
