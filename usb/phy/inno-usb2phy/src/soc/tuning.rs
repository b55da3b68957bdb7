//! Analog parameter tweaks applied once at probe.

use crate::field::genmask;
use crate::phy::Usb2Phy;
use crate::regmap::PhyBase;
use crate::soc::Revision;
use crate::{Error, Result};

const BIT0: u32 = 1 << 0;
const BIT2: u32 = 1 << 2;
const BIT6: u32 = 1 << 6;
const BIT7: u32 = 1 << 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tuning {
    None,
    Rk322x,
    Rk3308,
    Rk3328,
    Rv1103b,
    Rv1106,
    Rk3506,
    Rk3528,
    Rk3562,
    Rk3576,
    Rk3588,
}

impl Tuning {
    /// Runs the sequence against `phy`. The first failing access ends it.
    pub(crate) fn apply(self, phy: &mut Usb2Phy) -> Result<()> {
        match self {
            Tuning::None => Ok(()),
            Tuning::Rk322x => rk322x(phy),
            Tuning::Rk3308 => rk3308(phy),
            Tuning::Rk3328 => rk3328(phy),
            Tuning::Rv1103b => rv1103b(phy_base(phy)?),
            Tuning::Rv1106 => rv1106(phy_base(phy)?),
            Tuning::Rk3506 => rk3506(phy_base(phy)?),
            Tuning::Rk3528 => rk3528(phy_base(phy)?),
            Tuning::Rk3562 => rk3562(phy_base(phy)?),
            Tuning::Rk3576 => rk3576(phy),
            Tuning::Rk3588 => rk3588(phy),
        }
    }
}

fn phy_base(phy: &Usb2Phy) -> Result<&PhyBase> {
    phy.phy_base().ok_or(Error::NoPhyBase)
}

fn rk322x(phy: &mut Usb2Phy) -> Result<()> {
    // pre-emphasis in non-chirp state, PHY0 otg port
    if phy.config().reg == 0x760 {
        phy.regmap().write(0x76c, 0x0007_0004)?;
    }
    Ok(())
}

/// Pre-emphasis during the non-chirp phase and a 100 mV squelch trigger for
/// both ports, at `otg` and `otg + 0x400`.
fn squelch_and_pre_emphasis(phy: &Usb2Phy, otg: u32) -> Result<()> {
    let base = phy.regmap();
    for port in [otg, otg + 0x400] {
        base.update_bits(port, genmask(2, 0), BIT2)?;
        base.update_bits(port + 0x4, genmask(7, 5), 0x40)?;
        base.update_bits(port + 0x8, BIT0, 0x1)?;
    }
    Ok(())
}

fn rk3308(phy: &mut Usb2Phy) -> Result<()> {
    if phy.revision() == Revision::Rk3308bs {
        squelch_and_pre_emphasis(phy, 0x0)?;
    }
    Ok(())
}

fn rk3328(phy: &mut Usb2Phy) -> Result<()> {
    if phy.revision() == Revision::Px30s {
        return squelch_and_pre_emphasis(phy, 0x8000);
    }

    let base = phy.regmap();
    // debug mode
    base.write(0x2c, 0xffff_0400)?;
    // pre-emphasis in non-chirp state, otg then host
    base.write(0x0, 0x0007_0004)?;
    base.write(0x30, 0x0007_0004)?;
    Ok(())
}

fn rv1103b(base: &PhyBase) -> Result<()> {
    // pre-emphasis in SOF, EOP, chirp and non-chirp state
    base.update_bits(0x30, genmask(2, 0), 0x07)?;
    // Tx HS pre-emphasis strength 3'b001
    base.update_bits(0x40, genmask(5, 3), 0x01 << 3)?;
    // Rx squelch trigger 112.5 mV
    base.update_bits(0x64, genmask(6, 3), 0x00 << 3)?;
    // differential receiver off
    base.clear_bits(0x100, BIT6)?;
    // 45 ohm HS ODT 5'b10111
    base.update_bits(0x11c, genmask(4, 0), 0x17)?;
    // Tx HS eye height 462 mV
    base.update_bits(0x124, genmask(4, 2), 0x03 << 2)?;
    // bypass squelch detector calibration
    base.update_bits(0x1a4, genmask(7, 4), 0x01 << 4)?;
    base.update_bits(0x1b4, genmask(7, 4), 0x01 << 4)?;
    // single ended HS disconnect detection
    base.set_bits(0x70, BIT2)?;
    // host disconnect threshold 675 mV
    base.update_bits(0x60, genmask(1, 0), 0x0)?;
    base.update_bits(0x64, genmask(7, 7), BIT7)?;
    base.update_bits(0x68, genmask(0, 0), 0x0)?;
    Ok(())
}

fn rv1106(base: &PhyBase) -> Result<()> {
    // single ended HS disconnect detection
    base.set_bits(0x70, BIT2)?;
    Ok(())
}

fn rk3506(base: &PhyBase) -> Result<()> {
    for port in [0x0, 0x400] {
        // differential receiver off in suspend
        base.clear_bits(port + 0x30, BIT2)?;
    }
    for port in [0x0, 0x400] {
        // HS eye height 425 mV
        base.update_bits(port + 0x30, genmask(6, 4), 0x05 << 4)?;
    }
    for port in [0x0, 0x400] {
        // fs/ls linestate taken from the Tx driver
        base.update_bits(port + 0x94, genmask(6, 3), 0x03 << 3)?;
    }
    Ok(())
}

fn rk3528(base: &PhyBase) -> Result<()> {
    base.clear_bits(0x30, BIT2)?;
    base.clear_bits(0x430, BIT2)?;
    // HS eye height 400 mV
    base.update_bits(0x30, genmask(6, 4), 0x00 << 4)?;
    base.update_bits(0x430, genmask(6, 4), 0x00 << 4)?;
    base.update_bits(0x94, genmask(6, 3), 0x03 << 3)?;
    // output clock on
    base.update_bits(0x41c, genmask(7, 2), 0x27 << 2)?;
    Ok(())
}

fn rk3562(base: &PhyBase) -> Result<()> {
    base.clear_bits(0x30, BIT2)?;
    base.clear_bits(0x430, BIT2)?;
    // pre-emphasis during the non-chirp phase
    base.update_bits(0x0, genmask(2, 0), 0x04)?;
    base.update_bits(0x400, genmask(2, 0), 0x04)?;
    // HS eye height 425 mV
    base.update_bits(0x30, genmask(6, 4), 0x05 << 4)?;
    base.update_bits(0x430, genmask(6, 4), 0x05 << 4)?;
    Ok(())
}

/// Leaves IDDQ, resets the PHY, then sets the HS DC level (+5.89%) and 2x
/// pre-emphasis current. `ctrl` holds SIDDQ and pre-emphasis, `level` the DC
/// level.
fn siddq_and_hs_levels(phy: &mut Usb2Phy, ctrl: u32, level: u32) -> Result<()> {
    phy.regmap().write(ctrl, genmask(29, 29))?;
    phy.reset()?;
    phy.regmap().write(level, genmask(27, 24) | 0x0900)?;
    phy.regmap().write(ctrl, genmask(20, 19) | 0x0010)?;
    Ok(())
}

fn rk3576(phy: &mut Usb2Phy) -> Result<()> {
    match phy.config().reg {
        0x0000 => siddq_and_hs_levels(phy, 0x0010, 0x000c),
        0x2000 => siddq_and_hs_levels(phy, 0x2010, 0x200c),
        _ => Ok(()),
    }
}

fn rk3588(phy: &mut Usb2Phy) -> Result<()> {
    siddq_and_hs_levels(phy, 0x0008, 0x0004)
}
