use std::fs;

use anyhow::{Context, Result};
use common::PhysWindow;

use inno_usb2phy::config::DaemonConfig;
use inno_usb2phy::devicetree::{self, Region};
use inno_usb2phy::regmap::{MmioRegmap, PhyBase, Regmap};
use inno_usb2phy::{PhyResources, PortId, Usb2Phy};

fn map(region: Region, what: &str) -> Result<PhysWindow> {
    unsafe { PhysWindow::map_device(region.phys, region.len) }
        .with_context(|| format!("failed to map {} at {:#x}", what, region.phys))
}

fn regmap(window: PhysWindow) -> Box<dyn Regmap> {
    Box::new(unsafe { MmioRegmap::new(window.virt, window.len) })
}

fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();
    let config = match args.opt_free_from_str::<String>()? {
        Some(path) => {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            toml::from_str::<DaemonConfig>(&data)
                .with_context(|| format!("failed to parse config {}", path))?
        }
        None => DaemonConfig::default(),
    };

    common::setup_logging(
        "usb",
        "phy",
        "inno-usb2phyd",
        config.log_level().unwrap_or_else(common::output_level),
        common::file_level(),
    );

    let dtb = fs::read(&config.dtb)
        .with_context(|| format!("failed to read {}", config.dtb.display()))?;
    let node = devicetree::find_phy(&dtb)?;
    log::info!("{} ({}) reg {:#x}", node.name, node.soc, node.reg);

    let mut res = PhyResources::new(regmap(map(node.grf, "grf")?));
    if let Some(usbgrf) = node.usbgrf {
        res.usbgrf = Some(regmap(map(usbgrf, "usbgrf")?));
    }
    if let Some(base) = node.phy_base {
        // Only some tunings need the PHY window.
        match map(base, "phy base") {
            Ok(window) => res.phy_base = Some(unsafe { PhyBase::new(window.virt, window.len) }),
            Err(err) => log::warn!("{:#}", err),
        }
    }

    for port in &node.ports {
        if let Some(supply) = port.supply {
            log::info!("{}: no driver for vbus supply {}, left as is", port.id, supply);
        }
    }
    if node.has_reset {
        log::info!("no reset controller driver, phy reset skipped");
    }
    if node.port(PortId::Otg).map_or(false, |otg| otg.gpio_vbus_det) {
        log::info!("no gpio driver for vbus detection, using utmi bvalid");
    }

    let mut phy = Usb2Phy::probe(res, node.probe_params(config.revision))?;

    if config.otg_device {
        phy.otg_phy_init().context("otg phy init failed")?;
    }

    for &port in &config.ports {
        if phy.port(port).is_err() {
            log::debug!("{} not present on {}", port, node.name);
            continue;
        }
        phy.init(port)
            .with_context(|| format!("{}: init failed", port))?;
        phy.power_on(port)
            .with_context(|| format!("{}: power on failed", port))?;

        match phy.utmi_status(port) {
            Ok(status) => log::debug!("{}: {:?}", port, status),
            Err(err) => log::warn!("{}: utmi status: {}", port, err),
        }
    }

    if config.detect_charger {
        let kind = phy.classify();
        if kind.is_host_or_sdp() {
            log::info!("{}: usb host detected ({})", node.name, kind);
        }
    }

    Ok(())
}
