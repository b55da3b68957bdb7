//! Per-SoC register layouts.
//!
//! Every supported chip contributes one or more [`PhyConfig`] records, keyed
//! by the `reg` value the device tree gives the PHY node. The driver body is
//! shared; only these tables and the [`Tuning`] sequence differ.

use std::fmt;

use serde::Deserialize;

use crate::field::RegField;
use crate::{Error, Result};

mod tables;
mod tuning;

pub use tuning::Tuning;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortId {
    Otg = 0,
    Host = 1,
}

impl PortId {
    pub const ALL: [PortId; 2] = [PortId::Otg, PortId::Host];

    /// Maps a PHY subnode name to its port.
    pub fn from_node_name(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("otg-port") {
            Ok(Self::Otg)
        } else if name.eq_ignore_ascii_case("host-port") {
            Ok(Self::Host)
        } else {
            Err(Error::InvalidPort(name.to_owned()))
        }
    }

    pub fn node_name(self) -> &'static str {
        match self {
            Self::Otg => "otg-port",
            Self::Host => "host-port",
        }
    }
}

impl TryFrom<usize> for PortId {
    type Error = Error;

    fn try_from(id: usize) -> Result<Self> {
        match id {
            0 => Ok(Self::Otg),
            1 => Ok(Self::Host),
            _ => Err(Error::InvalidPort(id.to_string())),
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

/// Registers of one port. Only `phy_sus` is present on every layout.
#[derive(Clone, Copy, Debug)]
pub struct PortConfig {
    pub phy_sus: RegField,
    pub bvalid_det_en: Option<RegField>,
    pub bvalid_det_st: Option<RegField>,
    pub bvalid_det_clr: Option<RegField>,
    pub ls_det_en: Option<RegField>,
    pub ls_det_st: Option<RegField>,
    pub ls_det_clr: Option<RegField>,
    pub iddig_output: Option<RegField>,
    /// utmi iddig source, 0: from phy, 1: from grf
    pub iddig_en: Option<RegField>,
    pub idfall_det_en: Option<RegField>,
    pub idfall_det_st: Option<RegField>,
    pub idfall_det_clr: Option<RegField>,
    pub idrise_det_en: Option<RegField>,
    pub idrise_det_st: Option<RegField>,
    pub idrise_det_clr: Option<RegField>,
    pub utmi_avalid: Option<RegField>,
    pub utmi_bvalid: Option<RegField>,
    pub utmi_iddig: Option<RegField>,
    pub utmi_ls: Option<RegField>,
    pub utmi_hstdet: Option<RegField>,
    pub vbus_det_en: Option<RegField>,
}

impl PortConfig {
    /// A port that only has a suspend control.
    pub const fn new(phy_sus: RegField) -> Self {
        Self {
            phy_sus,
            bvalid_det_en: None,
            bvalid_det_st: None,
            bvalid_det_clr: None,
            ls_det_en: None,
            ls_det_st: None,
            ls_det_clr: None,
            iddig_output: None,
            iddig_en: None,
            idfall_det_en: None,
            idfall_det_st: None,
            idfall_det_clr: None,
            idrise_det_en: None,
            idrise_det_st: None,
            idrise_det_clr: None,
            utmi_avalid: None,
            utmi_bvalid: None,
            utmi_iddig: None,
            utmi_ls: None,
            utmi_hstdet: None,
            vbus_det_en: None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = RegField> + '_ {
        [
            Some(self.phy_sus),
            self.bvalid_det_en,
            self.bvalid_det_st,
            self.bvalid_det_clr,
            self.ls_det_en,
            self.ls_det_st,
            self.ls_det_clr,
            self.iddig_output,
            self.iddig_en,
            self.idfall_det_en,
            self.idfall_det_st,
            self.idfall_det_clr,
            self.idrise_det_en,
            self.idrise_det_st,
            self.idrise_det_clr,
            self.utmi_avalid,
            self.utmi_bvalid,
            self.utmi_iddig,
            self.utmi_ls,
            self.utmi_hstdet,
            self.vbus_det_en,
        ]
        .into_iter()
        .flatten()
    }
}

/// Charger detection registers of the OTG port.
#[derive(Clone, Copy, Debug)]
pub struct ChargerDetRegs {
    /// utmi operational mode
    pub opmode: RegField,
    /// charging port detected
    pub cp_det: RegField,
    /// dedicated charging port detected
    pub dcp_det: RegField,
    /// data pin contact detected
    pub dp_det: RegField,
    pub idm_sink_en: RegField,
    pub idp_sink_en: RegField,
    pub idp_src_en: RegField,
    /// dm pull-down resistor
    pub rdm_pdwn_en: RegField,
    pub vdm_src_en: RegField,
    pub vdp_src_en: RegField,
}

impl ChargerDetRegs {
    pub fn fields(&self) -> [RegField; 10] {
        [
            self.opmode,
            self.cp_det,
            self.dcp_det,
            self.dp_det,
            self.idm_sink_en,
            self.idp_sink_en,
            self.idp_src_en,
            self.rdm_pdwn_en,
            self.vdm_src_en,
            self.vdp_src_en,
        ]
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ChargerDetect {
    /// The PHY has no charger detection block.
    Unsupported,
    /// The boot ROM already ran detection; report a standard downstream port.
    AssumeSdp,
    Bc12(ChargerDetRegs),
}

#[derive(Clone, Copy, Debug)]
pub struct PhyConfig {
    /// Matched against the `reg` of the device tree node.
    pub reg: u32,
    pub num_ports: u8,
    pub tuning: Tuning,
    pub clkout_ctl: Option<RegField>,
    pub ports: [Option<PortConfig>; 2],
    pub chg_det: ChargerDetect,
}

impl PhyConfig {
    pub fn port(&self, id: PortId) -> Result<&PortConfig> {
        self.ports[id as usize]
            .as_ref()
            .ok_or_else(|| Error::InvalidPort(id.to_string()))
    }

    pub fn fields(&self) -> impl Iterator<Item = RegField> + '_ {
        let chg_det = match &self.chg_det {
            ChargerDetect::Bc12(regs) => regs.fields().to_vec(),
            _ => Vec::new(),
        };
        self.clkout_ctl
            .into_iter()
            .chain(self.ports.iter().flatten().flat_map(PortConfig::fields))
            .chain(chg_det)
    }
}

/// Silicon revision, for the chips whose tuning differs between steppings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    #[default]
    Standard,
    Rk3308bs,
    Px30s,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Soc {
    Px30,
    Rk1808,
    Rk3036,
    Rk3128,
    Rk322x,
    Rk3308,
    Rk3328,
    Rk3368,
    Rk3399,
    Rk3506,
    Rk3528,
    Rk3562,
    Rk3568,
    Rk3576,
    Rk3588,
    Rv1103b,
    Rv1106,
    Rv1108,
}

impl Soc {
    pub const ALL: [Soc; 18] = [
        Soc::Px30,
        Soc::Rk1808,
        Soc::Rk3036,
        Soc::Rk3128,
        Soc::Rk322x,
        Soc::Rk3308,
        Soc::Rk3328,
        Soc::Rk3368,
        Soc::Rk3399,
        Soc::Rk3506,
        Soc::Rk3528,
        Soc::Rk3562,
        Soc::Rk3568,
        Soc::Rk3576,
        Soc::Rk3588,
        Soc::Rv1103b,
        Soc::Rv1106,
        Soc::Rv1108,
    ];

    pub fn compatible(self) -> &'static str {
        match self {
            Soc::Px30 => "rockchip,px30-usb2phy",
            Soc::Rk1808 => "rockchip,rk1808-usb2phy",
            Soc::Rk3036 => "rockchip,rk3036-usb2phy",
            Soc::Rk3128 => "rockchip,rk3128-usb2phy",
            Soc::Rk322x => "rockchip,rk322x-usb2phy",
            Soc::Rk3308 => "rockchip,rk3308-usb2phy",
            Soc::Rk3328 => "rockchip,rk3328-usb2phy",
            Soc::Rk3368 => "rockchip,rk3368-usb2phy",
            Soc::Rk3399 => "rockchip,rk3399-usb2phy",
            Soc::Rk3506 => "rockchip,rk3506-usb2phy",
            Soc::Rk3528 => "rockchip,rk3528-usb2phy",
            Soc::Rk3562 => "rockchip,rk3562-usb2phy",
            Soc::Rk3568 => "rockchip,rk3568-usb2phy",
            Soc::Rk3576 => "rockchip,rk3576-usb2phy",
            Soc::Rk3588 => "rockchip,rk3588-usb2phy",
            Soc::Rv1103b => "rockchip,rv1103b-usb2phy",
            Soc::Rv1106 => "rockchip,rv1106-usb2phy",
            Soc::Rv1108 => "rockchip,rv1108-usb2phy",
        }
    }

    pub fn from_compatible(compatible: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|soc| soc.compatible() == compatible)
    }

    pub fn compatibles() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Soc::compatible)
    }

    pub fn configs(self) -> &'static [PhyConfig] {
        match self {
            // px30 shares the rk3328 PHY.
            Soc::Px30 | Soc::Rk3328 => tables::RK3328,
            Soc::Rk1808 => tables::RK1808,
            Soc::Rk3036 => tables::RK3036,
            Soc::Rk3128 => tables::RK312X,
            Soc::Rk322x => tables::RK322X,
            Soc::Rk3308 => tables::RK3308,
            Soc::Rk3368 => tables::RK3368,
            Soc::Rk3399 => tables::RK3399,
            Soc::Rk3506 => tables::RK3506,
            Soc::Rk3528 => tables::RK3528,
            Soc::Rk3562 => tables::RK3562,
            Soc::Rk3568 => tables::RK3568,
            Soc::Rk3576 => tables::RK3576,
            Soc::Rk3588 => tables::RK3588,
            Soc::Rv1103b => tables::RV1103B,
            Soc::Rv1106 => tables::RV1106,
            Soc::Rv1108 => tables::RV1108,
        }
    }

    /// Finds the config whose `reg` equals the one from the device tree.
    /// The first match wins.
    pub fn select_config(self, reg: u32) -> Result<&'static PhyConfig> {
        self.configs()
            .iter()
            .find(|cfg| cfg.reg == reg)
            .ok_or(Error::NoMatchingConfig(reg))
    }
}

impl fmt::Display for Soc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compatible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_are_well_formed() {
        for soc in Soc::ALL {
            for cfg in soc.configs() {
                for field in cfg.fields() {
                    assert!(
                        field.is_well_formed(),
                        "{soc} reg {:#x}: bad field {field:?}",
                        cfg.reg
                    );
                }
            }
        }
    }

    #[test]
    fn port_count_matches_ports() {
        for soc in Soc::ALL {
            for cfg in soc.configs() {
                let present = cfg.ports.iter().flatten().count();
                assert!(cfg.num_ports == 1 || cfg.num_ports == 2);
                assert_eq!(present, cfg.num_ports as usize, "{soc} reg {:#x}", cfg.reg);
            }
        }
    }

    #[test]
    fn compatibles_round_trip() {
        for soc in Soc::ALL {
            assert_eq!(Soc::from_compatible(soc.compatible()), Some(soc));
        }
        assert_eq!(Soc::from_compatible("rockchip,rk3399-usb3phy"), None);
    }

    #[test]
    fn select_config_by_reg() {
        let cfg = Soc::Rk3399.select_config(0xe460).unwrap();
        assert_eq!(cfg.clkout_ctl, Some(RegField::new(0xe460, 4, 4, 1, 0)));

        let cfg = Soc::Rk3588.select_config(0x8000).unwrap();
        assert!(cfg.port(PortId::Otg).is_err());
        assert!(cfg.port(PortId::Host).is_ok());

        assert!(matches!(
            Soc::Rk3568.select_config(0x1234),
            Err(Error::NoMatchingConfig(0x1234))
        ));
    }

    #[test]
    fn px30_uses_rk3328_layout() {
        let px30 = Soc::Px30.select_config(0x100).unwrap();
        assert_eq!(px30.tuning, Tuning::Rk3328);
    }

    #[test]
    fn rk3036_skips_detection() {
        let cfg = Soc::Rk3036.select_config(0x17c).unwrap();
        assert!(matches!(cfg.chg_det, ChargerDetect::AssumeSdp));
    }

    #[test]
    fn port_names() {
        assert_eq!(PortId::from_node_name("OTG-PORT").unwrap(), PortId::Otg);
        assert_eq!(PortId::from_node_name("host-port").unwrap(), PortId::Host);
        assert!(matches!(
            PortId::from_node_name("usb-port"),
            Err(Error::InvalidPort(_))
        ));
        assert_eq!(PortId::try_from(1).unwrap(), PortId::Host);
        assert!(PortId::try_from(2).is_err());
    }
}
