//! Driver for the Innosilicon USB 2.0 PHY found on Rockchip SoCs.
//!
//! A PHY block has an OTG port and/or a host port. Its controls live in a
//! GRF ("general register file") syscon, some SoCs also expose the analog
//! block directly. [`Usb2Phy`] sequences port bring-up and runs BC1.2
//! charger detection on the OTG port.

pub mod charger;
pub mod config;
pub mod devicetree;
mod error;
pub mod field;
pub mod hal;
mod phy;
pub mod regmap;
pub mod soc;

pub use charger::ChargerType;
pub use error::{Error, RegmapError, Result};
pub use phy::{PhyResources, ProbeParams, Usb2Phy, UtmiStatus};
pub use soc::{PortId, Revision, Soc};
