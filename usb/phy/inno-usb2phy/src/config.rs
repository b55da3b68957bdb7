use std::path::PathBuf;

use serde::Deserialize;

use crate::soc::{PortId, Revision};

/// Settings of the `inno-usb2phyd` daemon, read from TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct DaemonConfig {
    /// Flattened device tree to probe from.
    #[serde(default = "default_dtb")]
    pub dtb: PathBuf,
    #[serde(default)]
    pub revision: Revision,
    /// Ports to take out of suspend and power. Ports the PHY lacks are
    /// skipped.
    #[serde(default = "default_ports")]
    pub ports: Vec<PortId>,
    #[serde(default = "default_detect_charger")]
    pub detect_charger: bool,
    /// Prepare the OTG port for the device controller.
    #[serde(default)]
    pub otg_device: bool,
    /// Overrides the stderr log level, e.g. `"debug"`.
    pub log_level: Option<String>,
}

fn default_dtb() -> PathBuf {
    PathBuf::from("/scheme/kernel.dtb")
}

fn default_ports() -> Vec<PortId> {
    PortId::ALL.to_vec()
}

fn default_detect_charger() -> bool {
    true
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            dtb: default_dtb(),
            revision: Revision::default(),
            ports: default_ports(),
            detect_charger: default_detect_charger(),
            otg_device: false,
            log_level: None,
        }
    }
}

impl DaemonConfig {
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.as_deref()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: DaemonConfig = toml::from_str("").unwrap();
        assert_eq!(config.dtb, PathBuf::from("/scheme/kernel.dtb"));
        assert_eq!(config.revision, Revision::Standard);
        assert_eq!(config.ports, vec![PortId::Otg, PortId::Host]);
        assert!(config.detect_charger);
        assert!(!config.otg_device);
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn full_file() {
        let config: DaemonConfig = toml::from_str(
            r#"
            dtb = "/boot/rk3308.dtb"
            revision = "rk3308bs"
            ports = ["otg"]
            detect_charger = false
            otg_device = true
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.dtb, PathBuf::from("/boot/rk3308.dtb"));
        assert_eq!(config.revision, Revision::Rk3308bs);
        assert_eq!(config.ports, vec![PortId::Otg]);
        assert!(!config.detect_charger);
        assert!(config.otg_device);
        assert_eq!(config.log_level(), Some(log::LevelFilter::Debug));
    }

    #[test]
    fn unknown_port_is_rejected() {
        assert!(toml::from_str::<DaemonConfig>(r#"ports = ["usb3"]"#).is_err());
    }
}
