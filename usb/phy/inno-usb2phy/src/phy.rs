use crate::field::{self, RegField};
use crate::hal::{BusyDelay, Delay, Regulator, ResetControl, VbusGpio};
use crate::regmap::{PhyBase, RegBase, Regmap};
use crate::soc::{PhyConfig, PortConfig, PortId, Revision, Soc};
use crate::Result;

/// Time for the utmi clock to settle after a port leaves suspend.
const UTMI_CLK_STABLE_US: u64 = 2000;
const RESET_ASSERT_US: u64 = 20;
const RESET_DEASSERT_US: u64 = 100;
const OTG_SUSPEND_PULSE_US: u64 = 20;
const OTG_SETTLE_MS: u64 = 2;

/// Everything a PHY instance talks to, handed over at probe.
pub struct PhyResources {
    /// System GRF register map.
    pub grf: Box<dyn Regmap>,
    /// USB GRF; overrides `grf` for every access when present.
    pub usbgrf: Option<Box<dyn Regmap>>,
    pub phy_base: Option<PhyBase>,
    /// VBUS supply per port, indexed by [`PortId`].
    pub vbus_supply: [Option<Box<dyn Regulator>>; 2],
    pub reset: Option<Box<dyn ResetControl>>,
    pub vbus_gpio: Option<Box<dyn VbusGpio>>,
    pub delay: Box<dyn Delay>,
}

impl PhyResources {
    pub fn new(grf: Box<dyn Regmap>) -> Self {
        Self {
            grf,
            usbgrf: None,
            phy_base: None,
            vbus_supply: [None, None],
            reset: None,
            vbus_gpio: None,
            delay: Box::new(BusyDelay),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ProbeParams {
    pub soc: Soc,
    /// `reg` of the PHY node, selects the config within the SoC table.
    pub reg: u32,
    pub revision: Revision,
}

/// Snapshot of the UTMI signals a port mirrors into the GRF. Signals the
/// port does not expose are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UtmiStatus {
    pub avalid: Option<bool>,
    pub bvalid: Option<bool>,
    pub iddig: Option<bool>,
    pub linestate: Option<u32>,
    pub host_disconnect: Option<bool>,
}

pub struct Usb2Phy {
    config: &'static PhyConfig,
    revision: Revision,
    base: RegBase,
    phy_base: Option<PhyBase>,
    vbus_supply: [Option<Box<dyn Regulator>>; 2],
    reset: Option<Box<dyn ResetControl>>,
    pub(crate) vbus_gpio: Option<Box<dyn VbusGpio>>,
    pub(crate) delay: Box<dyn Delay>,
}

impl Usb2Phy {
    /// Binds the PHY to its config and collaborators and runs the SoC
    /// tuning. Only a missing config is fatal.
    pub fn probe(res: PhyResources, params: ProbeParams) -> Result<Self> {
        let config = params.soc.select_config(params.reg).map_err(|err| {
            log::error!("{}: {}", params.soc, err);
            err
        })?;

        if res.reset.is_none() {
            log::debug!("no u2phy reset control specified");
        }
        if res.phy_base.is_none() {
            log::debug!("the base address of usb phy is not mapped");
        }

        let mut phy = Self {
            config,
            revision: params.revision,
            base: RegBase::new(res.grf, res.usbgrf),
            phy_base: res.phy_base,
            vbus_supply: res.vbus_supply,
            reset: res.reset,
            vbus_gpio: res.vbus_gpio,
            delay: res.delay,
        };

        if let Err(err) = config.tuning.apply(&mut phy) {
            log::warn!("{} reg {:#x}: phy tuning failed: {}", params.soc, params.reg, err);
        }

        log::debug!(
            "{} reg {:#x}: {} port(s)",
            params.soc,
            params.reg,
            config.num_ports
        );

        Ok(phy)
    }

    pub fn config(&self) -> &'static PhyConfig {
        self.config
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// The map every register field is accessed through.
    pub fn regmap(&self) -> &dyn Regmap {
        self.base.active()
    }

    pub fn phy_base(&self) -> Option<&PhyBase> {
        self.phy_base.as_ref()
    }

    pub fn port(&self, port: PortId) -> Result<&'static PortConfig> {
        self.config.port(port)
    }

    pub(crate) fn write_field(&self, field: &RegField, on: bool) -> Result<()> {
        field::enable(self.regmap(), field, on)?;
        Ok(())
    }

    /// Pulses the reset line when there is one.
    pub fn reset(&mut self) -> Result<()> {
        let Some(reset) = self.reset.as_mut() else {
            return Ok(());
        };

        reset.assert().map_err(|err| {
            log::error!("u2phy assert reset failed: {}", err);
            err
        })?;
        self.delay.delay_us(RESET_ASSERT_US);

        reset.deassert().map_err(|err| {
            log::error!("u2phy deassert reset failed: {}", err);
            err
        })?;
        self.delay.delay_us(RESET_DEASSERT_US);

        Ok(())
    }

    /// Takes `port` out of suspend and waits for its clock.
    pub fn init(&mut self, port: PortId) -> Result<()> {
        let cfg = self.port(port)?;
        self.write_field(&cfg.phy_sus, false)?;
        self.delay.delay_us(UTMI_CLK_STABLE_US);
        Ok(())
    }

    /// Puts `port` back into suspend.
    pub fn exit(&mut self, port: PortId) -> Result<()> {
        let cfg = self.port(port)?;
        self.write_field(&cfg.phy_sus, true)
    }

    pub fn power_on(&mut self, port: PortId) -> Result<()> {
        self.set_vbus(port, true)
    }

    pub fn power_off(&mut self, port: PortId) -> Result<()> {
        self.set_vbus(port, false)
    }

    fn set_vbus(&mut self, port: PortId, enable: bool) -> Result<()> {
        if let Some(vbus) = self.vbus_supply[port as usize].as_mut() {
            vbus.set_enable(enable).map_err(|err| {
                log::error!("{}: failed to set vbus supply: {}", port, err);
                err
            })?;
        }
        Ok(())
    }

    /// Brings up the OTG port for the device controller: keeps the PHY clock
    /// output running, then pulses suspend.
    pub fn otg_phy_init(&mut self) -> Result<()> {
        let otg = self.port(PortId::Otg)?;

        if let Some(clkout) = self.config.clkout_ctl {
            if clkout.disable != 0 {
                self.write_field(&clkout, true)?;
            }
        }

        self.write_field(&otg.phy_sus, true)?;
        self.delay.delay_us(OTG_SUSPEND_PULSE_US);
        self.write_field(&otg.phy_sus, false)?;
        self.delay.delay_ms(OTG_SETTLE_MS);

        Ok(())
    }

    pub fn utmi_status(&self, port: PortId) -> Result<UtmiStatus> {
        let cfg = self.port(port)?;
        let base = self.regmap();

        let flag = |signal: Option<RegField>| -> Result<Option<bool>> {
            signal
                .map(|signal| field::is_enabled(base, &signal))
                .transpose()
                .map_err(Into::into)
        };
        let linestate = cfg
            .utmi_ls
            .map(|ls| base.read(ls.offset).map(|reg| ls.extract(reg)))
            .transpose()?;

        Ok(UtmiStatus {
            avalid: flag(cfg.utmi_avalid)?,
            bvalid: flag(cfg.utmi_bvalid)?,
            iddig: flag(cfg.utmi_iddig)?,
            linestate,
            host_disconnect: flag(cfg.utmi_hstdet)?,
        })
    }
}
