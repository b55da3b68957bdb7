//! Locating the PHY and the register files it needs in a flattened device
//! tree.
//!
//! Two layouts exist. Older SoCs put the PHY node inside its GRF syscon and
//! identify it by a GRF offset in `reg`. Newer ones put it at the top level
//! with its own register window; `reg` is then the physical address and the
//! GRF is referenced by phandle.

use fdt::node::FdtNode;
use fdt::Fdt;

use crate::soc::{PortId, Revision, Soc};
use crate::{Error, ProbeParams, Result};

/// A physical register window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub phys: usize,
    pub len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortNode {
    pub id: PortId,
    /// Phandle of the VBUS regulator.
    pub supply: Option<u32>,
    /// VBUS is sensed through a GPIO instead of the utmi bvalid signal.
    pub gpio_vbus_det: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhyNode {
    pub soc: Soc,
    pub name: String,
    pub reg: u32,
    pub grf: Region,
    pub usbgrf: Option<Region>,
    pub phy_base: Option<Region>,
    pub ports: Vec<PortNode>,
    /// A reset line named "phy" is wired up.
    pub has_reset: bool,
}

impl PhyNode {
    pub fn port(&self, id: PortId) -> Option<&PortNode> {
        self.ports.iter().find(|port| port.id == id)
    }

    pub fn probe_params(&self, revision: Revision) -> ProbeParams {
        ProbeParams {
            soc: self.soc,
            reg: self.reg,
            revision,
        }
    }
}

fn dt_error(msg: impl Into<String>) -> Error {
    Error::DeviceTree(msg.into())
}

fn be_u32(value: &[u8]) -> Option<u32> {
    Some(u32::from_be_bytes(value.get(..4)?.try_into().ok()?))
}

fn u32_prop(node: FdtNode<'_, '_>, name: &str) -> Option<u32> {
    node.property(name).and_then(|prop| be_u32(prop.value))
}

fn first_region(node: FdtNode<'_, '_>) -> Option<Region> {
    let region = node.reg()?.next()?;
    Some(Region {
        phys: region.starting_address as usize,
        len: region.size.unwrap_or(0),
    })
}

fn is_syscon(node: FdtNode<'_, '_>) -> bool {
    node.compatible()
        .map_or(false, |compatible| compatible.all().any(|c| c == "syscon"))
}

type Found<'b, 'a> = (Option<FdtNode<'b, 'a>>, FdtNode<'b, 'a>, Soc);

/// Depth-first search for the first node with a supported compatible.
/// Remembers the first `rockchip,*-usb2phy` compatible nobody supports.
fn search<'b, 'a>(
    node: FdtNode<'b, 'a>,
    parent: Option<FdtNode<'b, 'a>>,
    unsupported: &mut Option<String>,
) -> Option<Found<'b, 'a>> {
    if let Some(compatible) = node.compatible() {
        for compat in compatible.all() {
            if let Some(soc) = Soc::from_compatible(compat) {
                return Some((parent, node, soc));
            }
            if unsupported.is_none()
                && compat.starts_with("rockchip,")
                && compat.ends_with("-usb2phy")
            {
                *unsupported = Some(compat.to_owned());
            }
        }
    }
    node.children()
        .find_map(|child| search(child, Some(node), unsupported))
}

/// Phandle lookup that keeps track of parents so `reg` decodes with the
/// right cell sizes.
fn find_phandle<'b, 'a>(node: FdtNode<'b, 'a>, phandle: u32) -> Option<FdtNode<'b, 'a>> {
    let matches = ["phandle", "linux,phandle"]
        .into_iter()
        .any(|name| u32_prop(node, name) == Some(phandle));
    if matches {
        return Some(node);
    }
    node.children().find_map(|child| find_phandle(child, phandle))
}

fn syscon_region(root: FdtNode<'_, '_>, phy: FdtNode<'_, '_>, prop: &str) -> Result<Option<Region>> {
    let Some(phandle) = u32_prop(phy, prop) else {
        return Ok(None);
    };
    let syscon = find_phandle(root, phandle)
        .ok_or_else(|| dt_error(format!("{}: no node with phandle {}", prop, phandle)))?;
    first_region(syscon)
        .map(Some)
        .ok_or_else(|| dt_error(format!("{}: {} has no registers", prop, syscon.name)))
}

fn port_nodes(phy: FdtNode<'_, '_>) -> Vec<PortNode> {
    let mut ports = Vec::new();
    for child in phy.children() {
        let name = child.name.split('@').next().unwrap_or(child.name);
        let id = match PortId::from_node_name(name) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("{}: {}", phy.name, err);
                continue;
            }
        };

        let mut supply = u32_prop(child, "phy-supply");
        if supply.is_none() && id == PortId::Otg {
            supply = u32_prop(child, "vbus-supply");
        }

        ports.push(PortNode {
            id,
            supply,
            gpio_vbus_det: child.property("rockchip,gpio-vbus-det").is_some(),
        });
    }
    ports
}

fn has_phy_reset(phy: FdtNode<'_, '_>) -> bool {
    phy.property("reset-names").map_or(false, |names| {
        names.value.split(|&b| b == 0).any(|name| name == b"phy")
    })
}

/// Finds the first supported USB2 PHY in `dtb`.
pub fn find_phy(dtb: &[u8]) -> Result<PhyNode> {
    let fdt = Fdt::new(dtb).map_err(|err| dt_error(format!("failed to parse dtb: {}", err)))?;
    let root = fdt
        .find_node("/")
        .ok_or_else(|| dt_error("failed to find root node"))?;

    let mut unsupported = None;
    let Some((parent, node, soc)) = search(root, None, &mut unsupported) else {
        return Err(match unsupported {
            Some(compat) => Error::UnsupportedCompatible(compat),
            None => dt_error("no usb2phy node"),
        });
    };

    let syscon_parent = parent.filter(|parent| is_syscon(*parent));

    let (reg, grf, phy_base) = match syscon_parent {
        Some(syscon) => {
            let reg = u32_prop(node, "reg")
                .ok_or_else(|| dt_error(format!("{}: could not read reg", node.name)))?;
            let grf = first_region(syscon)
                .ok_or_else(|| dt_error(format!("{}: has no registers", syscon.name)))?;
            (reg, grf, None)
        }
        None => {
            let own = first_region(node)
                .ok_or_else(|| dt_error(format!("{}: could not read reg", node.name)))?;
            let reg = u32::try_from(own.phys)
                .map_err(|_| dt_error(format!("{}: reg {:#x} out of range", node.name, own.phys)))?;
            let grf = syscon_region(root, node, "rockchip,grf")?
                .ok_or_else(|| dt_error(format!("{}: get syscon grf failed", node.name)))?;
            (reg, grf, Some(own))
        }
    };

    let usbgrf = syscon_region(root, node, "rockchip,usbgrf")?;

    Ok(PhyNode {
        soc,
        name: node.name.to_owned(),
        reg,
        grf,
        usbgrf,
        phy_base,
        ports: port_nodes(node),
        has_reset: has_phy_reset(node),
    })
}
