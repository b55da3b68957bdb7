//! BC1.2 charger detection on the OTG port.
//!
//! Detection runs with the port suspended and the controller in
//! non-driving mode:
//!
//! 1. data contact detection: DM pull-down and DP current source on, poll
//!    `dp_det` until the data pins touch or the poll budget runs out,
//! 2. primary detection: voltage source on DP, sink on DM, sample `cp_det`,
//! 3. a couple more primary attempts before settling on a standard port,
//! 4. secondary detection: voltage source on DM, sink on DP, `dcp_det`
//!    tells a dedicated charger from a charging downstream port.
//!
//! Register failures never abort detection. A failed read counts as a
//! deasserted status bit, a failed write is logged and skipped.

use std::fmt;

use crate::field::{self, RegField};
use crate::hal::Delay;
use crate::phy::Usb2Phy;
use crate::regmap::Regmap;
use crate::soc::{ChargerDetRegs, ChargerDetect, PortId};

pub const DCD_MAX_RETRIES: u8 = 6;
pub const PRIMARY_MAX_RETRIES: u8 = 2;
pub const DCD_POLL_MS: u64 = 100;
pub const PRIMARY_DET_MS: u64 = 40;
pub const SECONDARY_DET_MS: u64 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChargerType {
    #[default]
    Unknown,
    /// Standard downstream port.
    Sdp,
    /// Dedicated charging port.
    Dcp,
    /// Charging downstream port.
    Cdp,
    /// Dedicated charger without the D+/D- short.
    Floating,
}

impl ChargerType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargerType::Sdp => "USB_SDP_CHARGER",
            ChargerType::Dcp => "USB_DCP_CHARGER",
            ChargerType::Cdp => "USB_CDP_CHARGER",
            ChargerType::Floating => "USB_FLOATING_CHARGER",
            ChargerType::Unknown => "INVALID_CHARGER",
        }
    }

    /// The port is a host that will enumerate us.
    pub fn is_host_or_sdp(self) -> bool {
        matches!(self, ChargerType::Sdp | ChargerType::Cdp)
    }
}

impl fmt::Display for ChargerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn set(base: &dyn Regmap, field: &RegField, on: bool) {
    if let Err(err) = field::enable(base, field, on) {
        log::warn!("charger detection: write at {:#x} failed: {}", field.offset, err);
    }
}

fn sample(base: &dyn Regmap, field: &RegField) -> bool {
    field::is_enabled(base, field).unwrap_or_else(|err| {
        log::warn!("charger detection: read at {:#x} failed: {}", field.offset, err);
        false
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    DataContact,
    Primary,
    PrimaryRetry,
    Secondary,
    Done(ChargerType),
}

struct Detector<'a> {
    base: &'a dyn Regmap,
    delay: &'a dyn Delay,
    regs: &'a ChargerDetRegs,
    dcd_retries: u8,
    primary_retries: u8,
}

impl<'a> Detector<'a> {
    fn new(base: &'a dyn Regmap, delay: &'a dyn Delay, regs: &'a ChargerDetRegs) -> Self {
        Self {
            base,
            delay,
            regs,
            dcd_retries: DCD_MAX_RETRIES,
            primary_retries: PRIMARY_MAX_RETRIES,
        }
    }

    fn run(&mut self) -> ChargerType {
        let mut stage = Stage::DataContact;
        loop {
            log::trace!("charger detection: {:?}", stage);
            stage = match stage {
                Stage::DataContact => self.data_contact(),
                Stage::Primary => self.primary(),
                Stage::PrimaryRetry => self.primary_retry(),
                Stage::Secondary => self.secondary(),
                Stage::Done(kind) => return kind,
            };
        }
    }

    fn enable_dcd(&self, on: bool) {
        set(self.base, &self.regs.rdm_pdwn_en, on);
        set(self.base, &self.regs.idp_src_en, on);
    }

    fn enable_primary(&self, on: bool) {
        set(self.base, &self.regs.vdp_src_en, on);
        set(self.base, &self.regs.idm_sink_en, on);
    }

    fn enable_secondary(&self, on: bool) {
        set(self.base, &self.regs.vdm_src_en, on);
        set(self.base, &self.regs.idp_sink_en, on);
    }

    fn data_contact(&mut self) -> Stage {
        self.enable_dcd(true);

        while self.dcd_retries > 0 {
            self.dcd_retries -= 1;
            self.delay.delay_ms(DCD_POLL_MS);

            let is_dcd = sample(self.base, &self.regs.dp_det);
            if is_dcd || self.dcd_retries == 0 {
                self.enable_dcd(false);
                self.enable_primary(true);
                break;
            }
        }

        Stage::Primary
    }

    fn primary(&mut self) -> Stage {
        self.delay.delay_ms(PRIMARY_DET_MS);
        let vout = sample(self.base, &self.regs.cp_det);
        self.enable_primary(false);

        if vout {
            Stage::Secondary
        } else if self.dcd_retries == 0 {
            // The data pins never made contact.
            Stage::Done(ChargerType::Floating)
        } else {
            Stage::PrimaryRetry
        }
    }

    fn primary_retry(&mut self) -> Stage {
        while self.primary_retries > 0 {
            self.primary_retries -= 1;

            self.enable_primary(true);
            self.delay.delay_ms(PRIMARY_DET_MS);
            let vout = sample(self.base, &self.regs.cp_det);
            self.enable_primary(false);

            if vout {
                return Stage::Secondary;
            }
        }

        Stage::Done(ChargerType::Sdp)
    }

    fn secondary(&mut self) -> Stage {
        self.enable_secondary(true);
        self.delay.delay_ms(SECONDARY_DET_MS);
        let vout = sample(self.base, &self.regs.dcp_det);
        self.enable_secondary(false);

        Stage::Done(if vout {
            ChargerType::Dcp
        } else {
            ChargerType::Cdp
        })
    }
}

impl Usb2Phy {
    /// Classifies what is plugged into the OTG port.
    ///
    /// Returns [`ChargerType::Unknown`] without touching the detection
    /// circuitry when VBUS is absent, and when the PHY has no OTG port or no
    /// detection block.
    pub fn classify(&self) -> ChargerType {
        let Ok(otg) = self.port(PortId::Otg) else {
            log::info!("no otg port, charger detection skipped");
            return ChargerType::Unknown;
        };
        let regs = match &self.config().chg_det {
            ChargerDetect::Bc12(regs) => Some(regs),
            // Detection already happened before we got control.
            ChargerDetect::AssumeSdp => None,
            ChargerDetect::Unsupported => {
                log::info!("charger detection not supported by this phy");
                return ChargerType::Unknown;
            }
        };

        let base = self.regmap();

        if let Some(gpio) = &self.vbus_gpio {
            if gpio.is_high() {
                log::info!("vbus gpio voltage valid");
            } else {
                log::info!("vbus gpio voltage invalid");
                return ChargerType::Unknown;
            }
        } else if !otg.utmi_bvalid.map_or(false, |bvalid| sample(base, &bvalid)) {
            log::info!("no charger found");
            return ChargerType::Unknown;
        }

        let kind = match regs {
            Some(regs) => {
                // suspend the phy, controller to non-driving mode
                set(base, &otg.phy_sus, true);
                set(base, &regs.opmode, false);

                let kind = Detector::new(base, self.delay.as_ref(), regs).run();

                set(base, &regs.opmode, true);
                set(base, &otg.phy_sus, false);
                kind
            }
            None => {
                set(base, &otg.phy_sus, false);
                ChargerType::Sdp
            }
        };

        log::info!("charger is {}", kind);
        kind
    }

    /// Whether the OTG port sees a USB host rather than a pure charger.
    pub fn is_host_or_sdp(&self) -> bool {
        self.classify().is_host_or_sdp()
    }
}
