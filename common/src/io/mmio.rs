use core::mem::MaybeUninit;
use core::ops::{BitAnd, BitOr, Not};
use core::ptr;

use super::Io;

/// A memory-mapped register. Every access is volatile.
#[repr(transparent)]
pub struct Mmio<T> {
    value: MaybeUninit<T>,
}

impl<T> Mmio<T> {
    /// Backs a register with ordinary memory, mostly useful to simulate a
    /// register window.
    pub const fn new(value: T) -> Self {
        Self {
            value: MaybeUninit::new(value),
        }
    }

    /// Reinterprets the register at `address`.
    ///
    /// # Safety
    /// `address` must be mapped, aligned for `T` and valid for the lifetime
    /// `'a`; nothing else may hold a reference to the same register.
    pub unsafe fn from_addr<'a>(address: usize) -> &'a mut Self {
        &mut *(address as *mut Self)
    }
}

impl<T> Io for Mmio<T>
where
    T: Copy + PartialEq + BitAnd<Output = T> + BitOr<Output = T> + Not<Output = T>,
{
    type Value = T;

    #[inline(always)]
    fn read(&self) -> T {
        unsafe { ptr::read_volatile(self.value.as_ptr()) }
    }

    #[inline(always)]
    fn write(&mut self, value: T) {
        unsafe { ptr::write_volatile(self.value.as_mut_ptr(), value) };
    }
}
