use common::io::{Io, Mmio};

use crate::error::RegmapError;

/// 32-bit register space addressed by byte offset.
pub trait Regmap {
    fn read(&self, offset: u32) -> Result<u32, RegmapError>;
    fn write(&self, offset: u32, value: u32) -> Result<(), RegmapError>;

    fn update_bits(&self, offset: u32, mask: u32, value: u32) -> Result<(), RegmapError> {
        let orig = self.read(offset)?;
        self.write(offset, (orig & !mask) | (value & mask))
    }
}

/// A window of memory-mapped registers.
#[derive(Debug)]
pub struct MmioRegmap {
    base: usize,
    len: usize,
}

impl MmioRegmap {
    /// # Safety
    /// `base..base + len` must stay mapped, and must not be accessed through
    /// anything else, for as long as the returned value lives.
    pub unsafe fn new(base: usize, len: usize) -> Self {
        Self { base, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn reg(&self, offset: u32) -> Result<&mut Mmio<u32>, RegmapError> {
        if offset % 4 != 0 {
            return Err(RegmapError::Unaligned(offset));
        }
        let end = (offset as usize).checked_add(4);
        if end.map_or(true, |end| end > self.len) {
            return Err(RegmapError::OutOfRange {
                offset,
                len: self.len,
            });
        }
        Ok(unsafe { Mmio::from_addr(self.base + offset as usize) })
    }
}

impl Regmap for MmioRegmap {
    fn read(&self, offset: u32) -> Result<u32, RegmapError> {
        Ok(self.reg(offset)?.read())
    }

    fn write(&self, offset: u32, value: u32) -> Result<(), RegmapError> {
        self.reg(offset)?.write(value);
        Ok(())
    }

    fn update_bits(&self, offset: u32, mask: u32, value: u32) -> Result<(), RegmapError> {
        self.reg(offset)?.writem(mask, value);
        Ok(())
    }
}

/// The register map(s) a PHY is driven through. When the hardware
/// description names a USB GRF next to the system GRF, every register access
/// goes to the USB GRF.
pub enum RegBase {
    Primary(Box<dyn Regmap>),
    PrimaryWithSecondaryOverride {
        primary: Box<dyn Regmap>,
        secondary: Box<dyn Regmap>,
    },
}

impl RegBase {
    pub fn new(primary: Box<dyn Regmap>, secondary: Option<Box<dyn Regmap>>) -> Self {
        match secondary {
            Some(secondary) => Self::PrimaryWithSecondaryOverride { primary, secondary },
            None => Self::Primary(primary),
        }
    }

    pub fn active(&self) -> &dyn Regmap {
        match self {
            Self::Primary(primary) => primary.as_ref(),
            Self::PrimaryWithSecondaryOverride { secondary, .. } => secondary.as_ref(),
        }
    }

    pub fn primary(&self) -> &dyn Regmap {
        match self {
            Self::Primary(primary) | Self::PrimaryWithSecondaryOverride { primary, .. } => {
                primary.as_ref()
            }
        }
    }
}

/// The PHY's own register block, used by the tuning sequences of SoCs whose
/// analog settings are not reachable through the GRF. Accesses are plain
/// read-modify-write, there is no write-mask half.
#[derive(Debug)]
pub struct PhyBase {
    regs: MmioRegmap,
}

impl PhyBase {
    /// # Safety
    /// See [`MmioRegmap::new`].
    pub unsafe fn new(base: usize, len: usize) -> Self {
        Self {
            regs: MmioRegmap::new(base, len),
        }
    }

    pub fn read(&self, offset: u32) -> Result<u32, RegmapError> {
        self.regs.read(offset)
    }

    pub fn set_bits(&self, offset: u32, bits: u32) -> Result<(), RegmapError> {
        self.regs.reg(offset)?.writef(bits, true);
        Ok(())
    }

    pub fn clear_bits(&self, offset: u32, bits: u32) -> Result<(), RegmapError> {
        self.regs.reg(offset)?.writef(bits, false);
        Ok(())
    }

    pub fn update_bits(&self, offset: u32, mask: u32, value: u32) -> Result<(), RegmapError> {
        self.regs.update_bits(offset, mask, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(words: &mut [u32]) -> MmioRegmap {
        unsafe { MmioRegmap::new(words.as_mut_ptr() as usize, words.len() * 4) }
    }

    #[test]
    fn mmio_window_reads_back_writes() {
        let mut words = [0u32; 4];
        let regs = window(&mut words);
        regs.write(0x8, 0xdead_beef).unwrap();
        assert_eq!(regs.read(0x8).unwrap(), 0xdead_beef);
        regs.update_bits(0x8, 0xff00, 0x1200).unwrap();
        assert_eq!(regs.read(0x8).unwrap(), 0xdead_12ef);
        drop(regs);
        assert_eq!(words[2], 0xdead_12ef);
    }

    #[test]
    fn mmio_window_rejects_bad_offsets() {
        let mut words = [0u32; 2];
        let regs = window(&mut words);
        assert_eq!(regs.read(0x2), Err(RegmapError::Unaligned(0x2)));
        assert_eq!(
            regs.write(0x8, 1),
            Err(RegmapError::OutOfRange { offset: 0x8, len: 8 })
        );
    }

    #[test]
    fn phy_base_bit_helpers() {
        let mut words = [0u32; 0x20];
        let phy = unsafe { PhyBase::new(words.as_mut_ptr() as usize, 0x80) };
        phy.set_bits(0x70, 1 << 2).unwrap();
        phy.update_bits(0x30, 0x70, 0x50).unwrap();
        phy.set_bits(0x30, 1 << 2).unwrap();
        phy.clear_bits(0x30, 1 << 2).unwrap();
        assert_eq!(phy.read(0x70).unwrap(), 0x4);
        assert_eq!(phy.read(0x30).unwrap(), 0x50);
    }

    struct Fixed(u32);

    impl Regmap for Fixed {
        fn read(&self, _offset: u32) -> Result<u32, RegmapError> {
            Ok(self.0)
        }

        fn write(&self, offset: u32, _value: u32) -> Result<(), RegmapError> {
            Err(RegmapError::Bus(offset))
        }
    }

    #[test]
    fn secondary_map_takes_precedence() {
        let base = RegBase::new(Box::new(Fixed(1)), Some(Box::new(Fixed(2))));
        assert_eq!(base.active().read(0).unwrap(), 2);
        assert_eq!(base.primary().read(0).unwrap(), 1);

        let base = RegBase::new(Box::new(Fixed(1)), None);
        assert_eq!(base.active().read(0).unwrap(), 1);
    }
}
