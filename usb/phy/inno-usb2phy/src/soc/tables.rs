use super::{ChargerDetRegs, ChargerDetect, PhyConfig, PortConfig, Tuning};
use crate::field::RegField;

const fn reg(offset: u32, bitend: u32, bitstart: u32, disable: u32, enable: u32) -> RegField {
    RegField::new(offset, bitend, bitstart, disable, enable)
}

const fn opt(offset: u32, bitend: u32, bitstart: u32, disable: u32, enable: u32) -> Option<RegField> {
    Some(reg(offset, bitend, bitstart, disable, enable))
}

/// rk1808, rk3308, rk3328 and rk3562 share the charger block at 0x100.
const CHG_DET_0100: ChargerDetRegs = ChargerDetRegs {
    opmode: reg(0x0100, 3, 0, 5, 1),
    cp_det: reg(0x0120, 24, 24, 0, 1),
    dcp_det: reg(0x0120, 23, 23, 0, 1),
    dp_det: reg(0x0120, 25, 25, 0, 1),
    idm_sink_en: reg(0x0108, 8, 8, 0, 1),
    idp_sink_en: reg(0x0108, 7, 7, 0, 1),
    idp_src_en: reg(0x0108, 9, 9, 0, 1),
    rdm_pdwn_en: reg(0x0108, 10, 10, 0, 1),
    vdm_src_en: reg(0x0108, 12, 12, 0, 1),
    vdp_src_en: reg(0x0108, 11, 11, 0, 1),
};

/// OTG port of rk1808 and rk3328.
const OTG_0100: PortConfig = PortConfig {
    bvalid_det_en: opt(0x0110, 2, 2, 0, 1),
    bvalid_det_st: opt(0x0114, 2, 2, 0, 1),
    bvalid_det_clr: opt(0x0118, 2, 2, 0, 1),
    iddig_output: opt(0x0100, 10, 10, 0, 1),
    iddig_en: opt(0x0100, 9, 9, 0, 1),
    idfall_det_en: opt(0x0110, 5, 5, 0, 1),
    idfall_det_st: opt(0x0114, 5, 5, 0, 1),
    idfall_det_clr: opt(0x0118, 5, 5, 0, 1),
    idrise_det_en: opt(0x0110, 4, 4, 0, 1),
    idrise_det_st: opt(0x0114, 4, 4, 0, 1),
    idrise_det_clr: opt(0x0118, 4, 4, 0, 1),
    ls_det_en: opt(0x0110, 0, 0, 0, 1),
    ls_det_st: opt(0x0114, 0, 0, 0, 1),
    ls_det_clr: opt(0x0118, 0, 0, 0, 1),
    utmi_avalid: opt(0x0120, 10, 10, 0, 1),
    utmi_bvalid: opt(0x0120, 9, 9, 0, 1),
    utmi_iddig: opt(0x0120, 6, 6, 0, 1),
    utmi_ls: opt(0x0120, 5, 4, 0, 1),
    vbus_det_en: opt(0x001c, 15, 15, 1, 0),
    ..PortConfig::new(reg(0x0100, 8, 0, 0, 0x1d1))
};

/// Host port of rk1808 and rk3328.
const HOST_0104: PortConfig = PortConfig {
    ls_det_en: opt(0x110, 1, 1, 0, 1),
    ls_det_st: opt(0x114, 1, 1, 0, 1),
    ls_det_clr: opt(0x118, 1, 1, 0, 1),
    utmi_ls: opt(0x120, 17, 16, 0, 1),
    utmi_hstdet: opt(0x120, 19, 19, 0, 1),
    ..PortConfig::new(reg(0x104, 8, 0, 0, 0x1d1))
};

pub(super) static RK1808: &[PhyConfig] = &[PhyConfig {
    reg: 0x100,
    num_ports: 2,
    tuning: Tuning::None,
    clkout_ctl: opt(0x108, 4, 4, 1, 0),
    ports: [Some(OTG_0100), Some(HOST_0104)],
    chg_det: ChargerDetect::Bc12(CHG_DET_0100),
}];

/// OTG port of rk3036 and rk312x.
const OTG_017C: PortConfig = PortConfig {
    bvalid_det_en: opt(0x017c, 14, 14, 0, 1),
    bvalid_det_st: opt(0x017c, 15, 15, 0, 1),
    bvalid_det_clr: opt(0x017c, 15, 15, 0, 1),
    iddig_output: opt(0x017c, 10, 10, 0, 1),
    iddig_en: opt(0x017c, 9, 9, 0, 1),
    idfall_det_en: opt(0x01a0, 2, 2, 0, 1),
    idfall_det_st: opt(0x01a0, 3, 3, 0, 1),
    idfall_det_clr: opt(0x01a0, 3, 3, 0, 1),
    idrise_det_en: opt(0x01a0, 0, 0, 0, 1),
    idrise_det_st: opt(0x01a0, 1, 1, 0, 1),
    idrise_det_clr: opt(0x01a0, 1, 1, 0, 1),
    ls_det_en: opt(0x017c, 12, 12, 0, 1),
    ls_det_st: opt(0x017c, 13, 13, 0, 1),
    ls_det_clr: opt(0x017c, 13, 13, 0, 1),
    utmi_bvalid: opt(0x014c, 5, 5, 0, 1),
    utmi_iddig: opt(0x014c, 8, 8, 0, 1),
    utmi_ls: opt(0x014c, 7, 6, 0, 1),
    ..PortConfig::new(reg(0x017c, 8, 0, 0, 0x1d1))
};

const HOST_0194: PortConfig = PortConfig {
    ls_det_en: opt(0x0194, 14, 14, 0, 1),
    ls_det_st: opt(0x0194, 15, 15, 0, 1),
    ls_det_clr: opt(0x0194, 15, 15, 0, 1),
    ..PortConfig::new(reg(0x0194, 8, 0, 0, 0x1d1))
};

pub(super) static RK3036: &[PhyConfig] = &[PhyConfig {
    reg: 0x17c,
    num_ports: 2,
    tuning: Tuning::None,
    clkout_ctl: opt(0x017c, 11, 11, 1, 0),
    ports: [Some(OTG_017C), Some(HOST_0194)],
    chg_det: ChargerDetect::AssumeSdp,
}];

pub(super) static RK312X: &[PhyConfig] = &[PhyConfig {
    reg: 0x17c,
    num_ports: 2,
    tuning: Tuning::None,
    clkout_ctl: opt(0x0190, 15, 15, 1, 0),
    ports: [Some(OTG_017C), Some(HOST_0194)],
    chg_det: ChargerDetect::Bc12(ChargerDetRegs {
        opmode: reg(0x017c, 3, 0, 5, 1),
        cp_det: reg(0x02c0, 6, 6, 0, 1),
        dcp_det: reg(0x02c0, 5, 5, 0, 1),
        dp_det: reg(0x02c0, 7, 7, 0, 1),
        idm_sink_en: reg(0x0184, 8, 8, 0, 1),
        idp_sink_en: reg(0x0184, 7, 7, 0, 1),
        idp_src_en: reg(0x0184, 9, 9, 0, 1),
        rdm_pdwn_en: reg(0x0184, 10, 10, 0, 1),
        vdm_src_en: reg(0x0184, 12, 12, 0, 1),
        vdp_src_en: reg(0x0184, 11, 11, 0, 1),
    }),
}];

pub(super) static RK322X: &[PhyConfig] = &[
    PhyConfig {
        reg: 0x760,
        num_ports: 2,
        tuning: Tuning::Rk322x,
        clkout_ctl: opt(0x0768, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                bvalid_det_en: opt(0x0680, 3, 3, 0, 1),
                bvalid_det_st: opt(0x0690, 3, 3, 0, 1),
                bvalid_det_clr: opt(0x06a0, 3, 3, 0, 1),
                iddig_output: opt(0x0760, 10, 10, 0, 1),
                iddig_en: opt(0x0760, 9, 9, 0, 1),
                idfall_det_en: opt(0x0680, 6, 6, 0, 1),
                idfall_det_st: opt(0x0690, 6, 6, 0, 1),
                idfall_det_clr: opt(0x06a0, 6, 6, 0, 1),
                idrise_det_en: opt(0x0680, 5, 5, 0, 1),
                idrise_det_st: opt(0x0690, 5, 5, 0, 1),
                idrise_det_clr: opt(0x06a0, 5, 5, 0, 1),
                ls_det_en: opt(0x0680, 2, 2, 0, 1),
                ls_det_st: opt(0x0690, 2, 2, 0, 1),
                ls_det_clr: opt(0x06a0, 2, 2, 0, 1),
                utmi_bvalid: opt(0x0480, 4, 4, 0, 1),
                utmi_iddig: opt(0x0480, 1, 1, 0, 1),
                utmi_ls: opt(0x0480, 3, 2, 0, 1),
                vbus_det_en: opt(0x0788, 15, 15, 1, 0),
                ..PortConfig::new(reg(0x0760, 8, 0, 0, 0x1d1))
            }),
            Some(PortConfig {
                ls_det_en: opt(0x0680, 4, 4, 0, 1),
                ls_det_st: opt(0x0690, 4, 4, 0, 1),
                ls_det_clr: opt(0x06a0, 4, 4, 0, 1),
                ..PortConfig::new(reg(0x0764, 8, 0, 0, 0x1d1))
            }),
        ],
        chg_det: ChargerDetect::Bc12(ChargerDetRegs {
            opmode: reg(0x0760, 3, 0, 5, 1),
            cp_det: reg(0x0884, 4, 4, 0, 1),
            dcp_det: reg(0x0884, 3, 3, 0, 1),
            dp_det: reg(0x0884, 5, 5, 0, 1),
            idm_sink_en: reg(0x0768, 8, 8, 0, 1),
            idp_sink_en: reg(0x0768, 7, 7, 0, 1),
            idp_src_en: reg(0x0768, 9, 9, 0, 1),
            rdm_pdwn_en: reg(0x0768, 10, 10, 0, 1),
            vdm_src_en: reg(0x0768, 12, 12, 0, 1),
            vdp_src_en: reg(0x0768, 11, 11, 0, 1),
        }),
    },
    PhyConfig {
        reg: 0x800,
        num_ports: 2,
        tuning: Tuning::None,
        clkout_ctl: opt(0x0808, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                ls_det_en: opt(0x0684, 1, 1, 0, 1),
                ls_det_st: opt(0x0694, 1, 1, 0, 1),
                ls_det_clr: opt(0x06a4, 1, 1, 0, 1),
                ..PortConfig::new(reg(0x804, 8, 0, 0, 0x1d1))
            }),
            Some(PortConfig {
                ls_det_en: opt(0x0684, 0, 0, 0, 1),
                ls_det_st: opt(0x0694, 0, 0, 0, 1),
                ls_det_clr: opt(0x06a4, 0, 0, 0, 1),
                ..PortConfig::new(reg(0x800, 8, 0, 0, 0x1d1))
            }),
        ],
        chg_det: ChargerDetect::Unsupported,
    },
];

pub(super) static RK3308: &[PhyConfig] = &[PhyConfig {
    reg: 0x100,
    num_ports: 2,
    tuning: Tuning::Rk3308,
    clkout_ctl: opt(0x0108, 4, 4, 1, 0),
    ports: [
        Some(PortConfig {
            bvalid_det_en: opt(0x3020, 2, 2, 0, 1),
            bvalid_det_st: opt(0x3024, 2, 2, 0, 1),
            bvalid_det_clr: opt(0x3028, 2, 2, 0, 1),
            idfall_det_en: opt(0x3020, 5, 5, 0, 1),
            idfall_det_st: opt(0x3024, 5, 5, 0, 1),
            idfall_det_clr: opt(0x3028, 5, 5, 0, 1),
            idrise_det_en: opt(0x3020, 4, 4, 0, 1),
            idrise_det_st: opt(0x3024, 4, 4, 0, 1),
            idrise_det_clr: opt(0x3028, 4, 4, 0, 1),
            ls_det_en: opt(0x3020, 0, 0, 0, 1),
            ls_det_st: opt(0x3024, 0, 0, 0, 1),
            ls_det_clr: opt(0x3028, 0, 0, 0, 1),
            ..OTG_0100
        }),
        Some(PortConfig {
            ls_det_en: opt(0x3020, 1, 1, 0, 1),
            ls_det_st: opt(0x3024, 1, 1, 0, 1),
            ls_det_clr: opt(0x3028, 1, 1, 0, 1),
            ..HOST_0104
        }),
    ],
    chg_det: ChargerDetect::Bc12(CHG_DET_0100),
}];

pub(super) static RK3328: &[PhyConfig] = &[PhyConfig {
    reg: 0x100,
    num_ports: 2,
    tuning: Tuning::Rk3328,
    clkout_ctl: opt(0x108, 4, 4, 1, 0),
    ports: [Some(OTG_0100), Some(HOST_0104)],
    chg_det: ChargerDetect::Bc12(CHG_DET_0100),
}];

pub(super) static RK3368: &[PhyConfig] = &[PhyConfig {
    reg: 0x700,
    num_ports: 2,
    tuning: Tuning::None,
    clkout_ctl: opt(0x0724, 15, 15, 1, 0),
    ports: [
        Some(PortConfig {
            bvalid_det_en: opt(0x0680, 3, 3, 0, 1),
            bvalid_det_st: opt(0x0690, 3, 3, 0, 1),
            bvalid_det_clr: opt(0x06a0, 3, 3, 0, 1),
            ls_det_en: opt(0x0680, 2, 2, 0, 1),
            ls_det_st: opt(0x0690, 2, 2, 0, 1),
            ls_det_clr: opt(0x06a0, 2, 2, 0, 1),
            utmi_bvalid: opt(0x04bc, 23, 23, 0, 1),
            utmi_ls: opt(0x04bc, 25, 24, 0, 1),
            ..PortConfig::new(reg(0x0700, 8, 0, 0, 0x1d1))
        }),
        Some(PortConfig {
            ls_det_en: opt(0x0680, 4, 4, 0, 1),
            ls_det_st: opt(0x0690, 4, 4, 0, 1),
            ls_det_clr: opt(0x06a0, 4, 4, 0, 1),
            ..PortConfig::new(reg(0x0728, 8, 0, 0, 0x1d1))
        }),
    ],
    chg_det: ChargerDetect::Bc12(ChargerDetRegs {
        opmode: reg(0x0700, 3, 0, 5, 1),
        cp_det: reg(0x04b8, 30, 30, 0, 1),
        dcp_det: reg(0x04b8, 29, 29, 0, 1),
        dp_det: reg(0x04b8, 31, 31, 0, 1),
        idm_sink_en: reg(0x0718, 8, 8, 0, 1),
        idp_sink_en: reg(0x0718, 7, 7, 0, 1),
        idp_src_en: reg(0x0718, 9, 9, 0, 1),
        rdm_pdwn_en: reg(0x0718, 10, 10, 0, 1),
        vdm_src_en: reg(0x0718, 12, 12, 0, 1),
        vdp_src_en: reg(0x0718, 11, 11, 0, 1),
    }),
}];

pub(super) static RK3399: &[PhyConfig] = &[
    PhyConfig {
        reg: 0xe450,
        num_ports: 2,
        tuning: Tuning::None,
        clkout_ctl: opt(0xe450, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                bvalid_det_en: opt(0xe3c0, 3, 3, 0, 1),
                bvalid_det_st: opt(0xe3e0, 3, 3, 0, 1),
                bvalid_det_clr: opt(0xe3d0, 3, 3, 0, 1),
                idfall_det_en: opt(0xe3c0, 5, 5, 0, 1),
                idfall_det_st: opt(0xe3e0, 5, 5, 0, 1),
                idfall_det_clr: opt(0xe3d0, 5, 5, 0, 1),
                idrise_det_en: opt(0xe3c0, 4, 4, 0, 1),
                idrise_det_st: opt(0xe3e0, 4, 4, 0, 1),
                idrise_det_clr: opt(0xe3d0, 4, 4, 0, 1),
                ls_det_en: opt(0xe3c0, 2, 2, 0, 1),
                ls_det_st: opt(0xe3e0, 2, 2, 0, 1),
                ls_det_clr: opt(0xe3d0, 2, 2, 0, 1),
                utmi_avalid: opt(0xe2ac, 7, 7, 0, 1),
                utmi_bvalid: opt(0xe2ac, 12, 12, 0, 1),
                utmi_iddig: opt(0xe2ac, 8, 8, 0, 1),
                utmi_ls: opt(0xe2ac, 14, 13, 0, 1),
                vbus_det_en: opt(0x449c, 15, 15, 1, 0),
                ..PortConfig::new(reg(0xe454, 8, 0, 0x052, 0x1d1))
            }),
            Some(PortConfig {
                ls_det_en: opt(0xe3c0, 6, 6, 0, 1),
                ls_det_st: opt(0xe3e0, 6, 6, 0, 1),
                ls_det_clr: opt(0xe3d0, 6, 6, 0, 1),
                utmi_ls: opt(0xe2ac, 22, 21, 0, 1),
                utmi_hstdet: opt(0xe2ac, 23, 23, 0, 1),
                ..PortConfig::new(reg(0xe458, 1, 0, 0x2, 0x1))
            }),
        ],
        chg_det: ChargerDetect::Bc12(ChargerDetRegs {
            opmode: reg(0xe454, 3, 0, 5, 1),
            cp_det: reg(0xe2ac, 2, 2, 0, 1),
            dcp_det: reg(0xe2ac, 1, 1, 0, 1),
            dp_det: reg(0xe2ac, 0, 0, 0, 1),
            idm_sink_en: reg(0xe450, 8, 8, 0, 1),
            idp_sink_en: reg(0xe450, 7, 7, 0, 1),
            idp_src_en: reg(0xe450, 9, 9, 0, 1),
            rdm_pdwn_en: reg(0xe450, 10, 10, 0, 1),
            vdm_src_en: reg(0xe450, 12, 12, 0, 1),
            vdp_src_en: reg(0xe450, 11, 11, 0, 1),
        }),
    },
    PhyConfig {
        reg: 0xe460,
        num_ports: 2,
        tuning: Tuning::None,
        clkout_ctl: opt(0xe460, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                bvalid_det_en: opt(0xe3c0, 8, 8, 0, 1),
                bvalid_det_st: opt(0xe3e0, 8, 8, 0, 1),
                bvalid_det_clr: opt(0xe3d0, 8, 8, 0, 1),
                idfall_det_en: opt(0xe3c0, 10, 10, 0, 1),
                idfall_det_st: opt(0xe3e0, 10, 10, 0, 1),
                idfall_det_clr: opt(0xe3d0, 10, 10, 0, 1),
                idrise_det_en: opt(0xe3c0, 9, 9, 0, 1),
                idrise_det_st: opt(0xe3e0, 9, 9, 0, 1),
                idrise_det_clr: opt(0xe3d0, 9, 9, 0, 1),
                ls_det_en: opt(0xe3c0, 7, 7, 0, 1),
                ls_det_st: opt(0xe3e0, 7, 7, 0, 1),
                ls_det_clr: opt(0xe3d0, 7, 7, 0, 1),
                utmi_avalid: opt(0xe2ac, 10, 10, 0, 1),
                utmi_bvalid: opt(0xe2ac, 16, 16, 0, 1),
                utmi_iddig: opt(0xe2ac, 11, 11, 0, 1),
                utmi_ls: opt(0xe2ac, 18, 17, 0, 1),
                vbus_det_en: opt(0x451c, 15, 15, 1, 0),
                ..PortConfig::new(reg(0xe464, 8, 0, 0x052, 0x1d1))
            }),
            Some(PortConfig {
                ls_det_en: opt(0xe3c0, 11, 11, 0, 1),
                ls_det_st: opt(0xe3e0, 11, 11, 0, 1),
                ls_det_clr: opt(0xe3d0, 11, 11, 0, 1),
                utmi_ls: opt(0xe2ac, 26, 25, 0, 1),
                utmi_hstdet: opt(0xe2ac, 27, 27, 0, 1),
                ..PortConfig::new(reg(0xe468, 1, 0, 0x2, 0x1))
            }),
        ],
        chg_det: ChargerDetect::Bc12(ChargerDetRegs {
            opmode: reg(0xe464, 3, 0, 5, 1),
            cp_det: reg(0xe2ac, 5, 5, 0, 1),
            dcp_det: reg(0xe2ac, 4, 4, 0, 1),
            dp_det: reg(0xe2ac, 3, 3, 0, 1),
            idm_sink_en: reg(0xe460, 8, 8, 0, 1),
            idp_sink_en: reg(0xe460, 7, 7, 0, 1),
            idp_src_en: reg(0xe460, 9, 9, 0, 1),
            rdm_pdwn_en: reg(0xe460, 10, 10, 0, 1),
            vdm_src_en: reg(0xe460, 12, 12, 0, 1),
            vdp_src_en: reg(0xe460, 11, 11, 0, 1),
        }),
    },
];

/// Single-port OTG PHY of rv1103b and rv1106; `base` is the GRF offset of
/// the control block.
const fn rv110x_otg(base: u32) -> PortConfig {
    PortConfig {
        bvalid_det_en: opt(base + 0xb0, 2, 2, 0, 1),
        bvalid_det_st: opt(base + 0xb4, 2, 2, 0, 1),
        bvalid_det_clr: opt(base + 0xb8, 2, 2, 0, 1),
        iddig_output: opt(base, 10, 10, 0, 1),
        iddig_en: opt(base, 9, 9, 0, 1),
        idfall_det_en: opt(base + 0xb0, 5, 5, 0, 1),
        idfall_det_st: opt(base + 0xb4, 5, 5, 0, 1),
        idfall_det_clr: opt(base + 0xb8, 5, 5, 0, 1),
        idrise_det_en: opt(base + 0xb0, 4, 4, 0, 1),
        idrise_det_st: opt(base + 0xb4, 4, 4, 0, 1),
        idrise_det_clr: opt(base + 0xb8, 4, 4, 0, 1),
        ls_det_en: opt(base + 0xb0, 0, 0, 0, 1),
        ls_det_st: opt(base + 0xb4, 0, 0, 0, 1),
        ls_det_clr: opt(base + 0xb8, 0, 0, 0, 1),
        utmi_avalid: opt(base + 0x10, 10, 10, 0, 1),
        utmi_bvalid: opt(base + 0x10, 9, 9, 0, 1),
        utmi_iddig: opt(base + 0x10, 6, 6, 0, 1),
        utmi_ls: opt(base + 0x10, 5, 4, 0, 1),
        ..PortConfig::new(reg(base, 8, 0, 0, 0x1d1))
    }
}

const fn rv110x_chg_det(base: u32) -> ChargerDetRegs {
    ChargerDetRegs {
        opmode: reg(base, 3, 0, 5, 1),
        cp_det: reg(base + 0x10, 13, 13, 0, 1),
        dcp_det: reg(base + 0x10, 12, 12, 0, 1),
        dp_det: reg(base + 0x10, 14, 14, 0, 1),
        idm_sink_en: reg(base + 0x08, 8, 8, 0, 1),
        idp_sink_en: reg(base + 0x08, 7, 7, 0, 1),
        idp_src_en: reg(base + 0x08, 9, 9, 0, 1),
        rdm_pdwn_en: reg(base + 0x08, 10, 10, 0, 1),
        vdm_src_en: reg(base + 0x08, 12, 12, 0, 1),
        vdp_src_en: reg(base + 0x08, 11, 11, 0, 1),
    }
}

pub(super) static RV1103B: &[PhyConfig] = &[PhyConfig {
    reg: 0x20e1_0000,
    num_ports: 1,
    tuning: Tuning::Rv1103b,
    clkout_ctl: opt(0x50058, 4, 4, 1, 0),
    ports: [Some(rv110x_otg(0x50050)), None],
    chg_det: ChargerDetect::Bc12(rv110x_chg_det(0x50050)),
}];

pub(super) static RV1106: &[PhyConfig] = &[PhyConfig {
    reg: 0xff3e_0000,
    num_ports: 1,
    tuning: Tuning::Rv1106,
    clkout_ctl: opt(0x0058, 4, 4, 1, 0),
    ports: [Some(rv110x_otg(0x0050)), None],
    chg_det: ChargerDetect::Bc12(rv110x_chg_det(0x0050)),
}];

pub(super) static RV1108: &[PhyConfig] = &[PhyConfig {
    reg: 0x100,
    num_ports: 2,
    tuning: Tuning::None,
    clkout_ctl: opt(0x108, 4, 4, 1, 0),
    ports: [
        Some(PortConfig {
            bvalid_det_en: opt(0x0680, 3, 3, 0, 1),
            bvalid_det_st: opt(0x0690, 3, 3, 0, 1),
            bvalid_det_clr: opt(0x06a0, 3, 3, 0, 1),
            ls_det_en: opt(0x0680, 2, 2, 0, 1),
            ls_det_st: opt(0x0690, 2, 2, 0, 1),
            ls_det_clr: opt(0x06a0, 2, 2, 0, 1),
            utmi_bvalid: opt(0x0804, 10, 10, 0, 1),
            utmi_ls: opt(0x0804, 13, 12, 0, 1),
            ..PortConfig::new(reg(0x0ffa_0100, 8, 0, 0, 0x1d1))
        }),
        Some(PortConfig {
            ls_det_en: opt(0x0680, 4, 4, 0, 1),
            ls_det_st: opt(0x0690, 4, 4, 0, 1),
            ls_det_clr: opt(0x06a0, 4, 4, 0, 1),
            utmi_ls: opt(0x0804, 9, 8, 0, 1),
            utmi_hstdet: opt(0x0804, 7, 7, 0, 1),
            ..PortConfig::new(reg(0x0ffa_0104, 8, 0, 0, 0x1d1))
        }),
    ],
    chg_det: ChargerDetect::Bc12(ChargerDetRegs {
        opmode: reg(0x0ffa_0100, 3, 0, 5, 1),
        cp_det: reg(0x0804, 1, 1, 0, 1),
        dcp_det: reg(0x0804, 0, 0, 0, 1),
        dp_det: reg(0x0804, 2, 2, 0, 1),
        idm_sink_en: reg(0x0ffa_0108, 8, 8, 0, 1),
        idp_sink_en: reg(0x0ffa_0108, 7, 7, 0, 1),
        idp_src_en: reg(0x0ffa_0108, 9, 9, 0, 1),
        rdm_pdwn_en: reg(0x0ffa_0108, 10, 10, 0, 1),
        vdm_src_en: reg(0x0ffa_0108, 12, 12, 0, 1),
        vdp_src_en: reg(0x0ffa_0108, 11, 11, 0, 1),
    }),
}];

/// rk3506 and rk3528 use the same layout at different GRF offsets.
const fn rk35x6_otg(base: u32, det: u32, status: u32) -> PortConfig {
    PortConfig {
        bvalid_det_en: opt(det, 2, 2, 0, 1),
        bvalid_det_st: opt(det + 0x4, 2, 2, 0, 1),
        bvalid_det_clr: opt(det + 0x8, 2, 2, 0, 1),
        iddig_output: opt(base, 10, 10, 0, 1),
        iddig_en: opt(base, 9, 9, 0, 1),
        idfall_det_en: opt(det, 5, 5, 0, 1),
        idfall_det_st: opt(det + 0x4, 5, 5, 0, 1),
        idfall_det_clr: opt(det + 0x8, 5, 5, 0, 1),
        idrise_det_en: opt(det, 4, 4, 0, 1),
        idrise_det_st: opt(det + 0x4, 4, 4, 0, 1),
        idrise_det_clr: opt(det + 0x8, 4, 4, 0, 1),
        ls_det_en: opt(det, 0, 0, 0, 1),
        ls_det_st: opt(det + 0x4, 0, 0, 0, 1),
        ls_det_clr: opt(det + 0x8, 0, 0, 0, 1),
        utmi_avalid: opt(status, 1, 1, 0, 1),
        utmi_bvalid: opt(status, 0, 0, 0, 1),
        utmi_iddig: opt(status, 6, 6, 0, 1),
        utmi_ls: opt(status, 5, 4, 0, 1),
        ..PortConfig::new(reg(base, 8, 0, 0, 0x1d1))
    }
}

const fn rk35x6_host(base: u32, det: u32, status: u32) -> PortConfig {
    PortConfig {
        ls_det_en: opt(det, 0, 0, 0, 1),
        ls_det_st: opt(det + 0x4, 0, 0, 0, 1),
        ls_det_clr: opt(det + 0x8, 0, 0, 0, 1),
        utmi_ls: opt(status, 13, 12, 0, 1),
        utmi_hstdet: opt(status, 15, 15, 0, 1),
        ..PortConfig::new(reg(base, 8, 0, 0x1d2, 0x1d1))
    }
}

const fn rk35x6_chg_det(opmode: u32, ctrl: u32, status: u32) -> ChargerDetRegs {
    ChargerDetRegs {
        opmode: reg(opmode, 3, 0, 5, 1),
        cp_det: reg(status, 19, 19, 0, 1),
        dcp_det: reg(status, 18, 18, 0, 1),
        dp_det: reg(status, 20, 20, 0, 1),
        idm_sink_en: reg(ctrl, 1, 1, 0, 1),
        idp_sink_en: reg(ctrl, 0, 0, 0, 1),
        idp_src_en: reg(ctrl, 2, 2, 0, 1),
        rdm_pdwn_en: reg(ctrl, 3, 3, 0, 1),
        vdm_src_en: reg(ctrl, 5, 5, 0, 1),
        vdp_src_en: reg(ctrl, 4, 4, 0, 1),
    }
}

pub(super) static RK3506: &[PhyConfig] = &[PhyConfig {
    reg: 0xff2b_0000,
    num_ports: 2,
    tuning: Tuning::Rk3506,
    clkout_ctl: None,
    ports: [
        Some(rk35x6_otg(0x0060, 0x0150, 0x0118)),
        Some(rk35x6_host(0x0070, 0x0170, 0x0118)),
    ],
    chg_det: ChargerDetect::Bc12(rk35x6_chg_det(0x0060, 0x006c, 0x0118)),
}];

pub(super) static RK3528: &[PhyConfig] = &[PhyConfig {
    reg: 0xffdf_0000,
    num_ports: 2,
    tuning: Tuning::Rk3528,
    clkout_ctl: None,
    ports: [
        Some(rk35x6_otg(0x6004c, 0x60074, 0x6006c)),
        Some(rk35x6_host(0x6005c, 0x60090, 0x6006c)),
    ],
    chg_det: ChargerDetect::Bc12(rk35x6_chg_det(0x6004c, 0x60058, 0x6006c)),
}];

pub(super) static RK3562: &[PhyConfig] = &[PhyConfig {
    reg: 0xff74_0000,
    num_ports: 2,
    tuning: Tuning::Rk3562,
    clkout_ctl: opt(0x0108, 4, 4, 1, 0),
    ports: [
        Some(PortConfig {
            vbus_det_en: None,
            ..OTG_0100
        }),
        Some(PortConfig {
            phy_sus: reg(0x0104, 8, 0, 0x1d2, 0x1d1),
            ..HOST_0104
        }),
    ],
    chg_det: ChargerDetect::Bc12(CHG_DET_0100),
}];

pub(super) static RK3568: &[PhyConfig] = &[
    PhyConfig {
        reg: 0xfe8a_0000,
        num_ports: 2,
        tuning: Tuning::None,
        clkout_ctl: opt(0x0008, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                bvalid_det_en: opt(0x0080, 2, 2, 0, 1),
                bvalid_det_st: opt(0x0084, 2, 2, 0, 1),
                bvalid_det_clr: opt(0x0088, 2, 2, 0, 1),
                iddig_output: opt(0x0000, 10, 10, 0, 1),
                iddig_en: opt(0x0000, 9, 9, 0, 1),
                idfall_det_en: opt(0x0080, 5, 5, 0, 1),
                idfall_det_st: opt(0x0084, 5, 5, 0, 1),
                idfall_det_clr: opt(0x0088, 5, 5, 0, 1),
                idrise_det_en: opt(0x0080, 4, 4, 0, 1),
                idrise_det_st: opt(0x0084, 4, 4, 0, 1),
                idrise_det_clr: opt(0x0088, 4, 4, 0, 1),
                ls_det_en: opt(0x0080, 0, 0, 0, 1),
                ls_det_st: opt(0x0084, 0, 0, 0, 1),
                ls_det_clr: opt(0x0088, 0, 0, 0, 1),
                utmi_avalid: opt(0x00c0, 10, 10, 0, 1),
                utmi_bvalid: opt(0x00c0, 9, 9, 0, 1),
                utmi_iddig: opt(0x00c0, 6, 6, 0, 1),
                utmi_ls: opt(0x00c0, 5, 4, 0, 1),
                ..PortConfig::new(reg(0x0000, 8, 0, 0x052, 0x1d1))
            }),
            Some(RK3568_HOST),
        ],
        chg_det: ChargerDetect::Bc12(ChargerDetRegs {
            opmode: reg(0x0000, 3, 0, 5, 1),
            cp_det: reg(0x00c0, 24, 24, 0, 1),
            dcp_det: reg(0x00c0, 23, 23, 0, 1),
            dp_det: reg(0x00c0, 25, 25, 0, 1),
            idm_sink_en: reg(0x0008, 8, 8, 0, 1),
            idp_sink_en: reg(0x0008, 7, 7, 0, 1),
            idp_src_en: reg(0x0008, 9, 9, 0, 1),
            rdm_pdwn_en: reg(0x0008, 10, 10, 0, 1),
            vdm_src_en: reg(0x0008, 12, 12, 0, 1),
            vdp_src_en: reg(0x0008, 11, 11, 0, 1),
        }),
    },
    PhyConfig {
        reg: 0xfe8b_0000,
        num_ports: 2,
        tuning: Tuning::None,
        clkout_ctl: opt(0x0008, 4, 4, 1, 0),
        ports: [
            Some(PortConfig {
                ls_det_en: opt(0x0080, 0, 0, 0, 1),
                ls_det_st: opt(0x0084, 0, 0, 0, 1),
                ls_det_clr: opt(0x0088, 0, 0, 0, 1),
                utmi_ls: opt(0x00c0, 5, 4, 0, 1),
                utmi_hstdet: opt(0x00c0, 7, 7, 0, 1),
                ..PortConfig::new(reg(0x0000, 8, 0, 0x1d2, 0x1d1))
            }),
            Some(RK3568_HOST),
        ],
        chg_det: ChargerDetect::Unsupported,
    },
];

const RK3568_HOST: PortConfig = PortConfig {
    ls_det_en: opt(0x0080, 1, 1, 0, 1),
    ls_det_st: opt(0x0084, 1, 1, 0, 1),
    ls_det_clr: opt(0x0088, 1, 1, 0, 1),
    utmi_ls: opt(0x00c0, 17, 16, 0, 1),
    utmi_hstdet: opt(0x00c0, 19, 19, 0, 1),
    ..PortConfig::new(reg(0x0004, 8, 0, 0x1d2, 0x1d1))
};

/// rk3576 and rk3588 PHYs have no dedicated charger bits; detection reuses
/// the combined control register at `ctrl` and reads status from `status`.
const fn rk35x8_chg_det(opmode: RegField, ctrl: u32, status: u32) -> ChargerDetRegs {
    ChargerDetRegs {
        opmode,
        cp_det: reg(status, 0, 0, 0, 1),
        dcp_det: reg(status, 0, 0, 0, 1),
        dp_det: reg(status, 1, 1, 1, 0),
        idm_sink_en: reg(ctrl, 5, 5, 1, 0),
        idp_sink_en: reg(ctrl, 5, 5, 0, 1),
        idp_src_en: reg(ctrl, 14, 14, 0, 1),
        rdm_pdwn_en: reg(ctrl, 14, 14, 0, 1),
        vdm_src_en: reg(ctrl, 7, 6, 0, 3),
        vdp_src_en: reg(ctrl, 7, 6, 0, 3),
    }
}

const fn rk3576_otg(base: u32) -> PortConfig {
    PortConfig {
        ls_det_en: opt(base + 0xc0, 0, 0, 0, 1),
        ls_det_st: opt(base + 0xc4, 0, 0, 0, 1),
        ls_det_clr: opt(base + 0xc8, 0, 0, 0, 1),
        utmi_avalid: opt(base + 0x80, 1, 1, 0, 1),
        utmi_bvalid: opt(base + 0x80, 0, 0, 0, 1),
        utmi_iddig: opt(base + 0x80, 6, 6, 0, 1),
        utmi_ls: opt(base + 0x80, 5, 4, 0, 1),
        ..PortConfig::new(reg(base, 8, 0, 0, 0x1d1))
    }
}

pub(super) static RK3576: &[PhyConfig] = &[
    PhyConfig {
        reg: 0x0000,
        num_ports: 1,
        tuning: Tuning::Rk3576,
        clkout_ctl: opt(0x0008, 0, 0, 1, 0),
        ports: [Some(rk3576_otg(0x0000)), None],
        chg_det: ChargerDetect::Bc12(ChargerDetRegs {
            cp_det: reg(0x0080, 8, 8, 0, 1),
            dcp_det: reg(0x0080, 8, 8, 0, 1),
            dp_det: reg(0x0080, 9, 9, 1, 0),
            ..rk35x8_chg_det(reg(0x0000, 8, 0, 0x055, 0x001), 0x0010, 0x0080)
        }),
    },
    PhyConfig {
        reg: 0x2000,
        num_ports: 1,
        tuning: Tuning::Rk3576,
        clkout_ctl: opt(0x2008, 0, 0, 1, 0),
        ports: [Some(rk3576_otg(0x2000)), None],
        chg_det: ChargerDetect::Unsupported,
    },
];

const RK3588_HOST: PortConfig = PortConfig {
    ls_det_en: opt(0x0080, 0, 0, 0, 1),
    ls_det_st: opt(0x0084, 0, 0, 0, 1),
    ls_det_clr: opt(0x0088, 0, 0, 0, 1),
    utmi_ls: opt(0x00c0, 10, 9, 0, 1),
    ..PortConfig::new(reg(0x0008, 2, 2, 0, 1))
};

pub(super) static RK3588: &[PhyConfig] = &[
    PhyConfig {
        reg: 0x0000,
        num_ports: 1,
        tuning: Tuning::Rk3588,
        clkout_ctl: opt(0x0000, 0, 0, 1, 0),
        ports: [
            Some(PortConfig {
                ls_det_en: opt(0x0080, 0, 0, 0, 1),
                ls_det_st: opt(0x0084, 0, 0, 0, 1),
                ls_det_clr: opt(0x0088, 0, 0, 0, 1),
                utmi_avalid: opt(0x00c0, 7, 7, 0, 1),
                utmi_bvalid: opt(0x00c0, 6, 6, 0, 1),
                utmi_iddig: opt(0x00c0, 5, 5, 0, 1),
                utmi_ls: opt(0x00c0, 10, 9, 0, 1),
                ..PortConfig::new(reg(0x000c, 11, 11, 0, 1))
            }),
            None,
        ],
        chg_det: ChargerDetect::Bc12(rk35x8_chg_det(reg(0x0008, 2, 2, 1, 0), 0x0008, 0x00c0)),
    },
    PhyConfig {
        reg: 0x4000,
        num_ports: 1,
        tuning: Tuning::Rk3588,
        clkout_ctl: opt(0x0000, 0, 0, 1, 0),
        ports: [
            // Suspend is controlled by the USB controller.
            Some(PortConfig {
                ls_det_en: opt(0x0080, 0, 0, 0, 1),
                ls_det_st: opt(0x0084, 0, 0, 0, 1),
                ls_det_clr: opt(0x0088, 0, 0, 0, 1),
                utmi_ls: opt(0x00c0, 10, 9, 0, 1),
                ..PortConfig::new(reg(0x000c, 11, 11, 0, 0))
            }),
            None,
        ],
        chg_det: ChargerDetect::Unsupported,
    },
    PhyConfig {
        reg: 0x8000,
        num_ports: 1,
        tuning: Tuning::Rk3588,
        clkout_ctl: opt(0x0000, 0, 0, 1, 0),
        ports: [None, Some(RK3588_HOST)],
        chg_det: ChargerDetect::Unsupported,
    },
    PhyConfig {
        reg: 0xc000,
        num_ports: 1,
        tuning: Tuning::Rk3588,
        clkout_ctl: opt(0x0000, 0, 0, 1, 0),
        ports: [None, Some(RK3588_HOST)],
        chg_det: ChargerDetect::Unsupported,
    },
];
