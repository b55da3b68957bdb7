use thiserror::Error;

/// Failure of a register-map backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegmapError {
    #[error("offset {offset:#x} is outside of the {len:#x} byte register window")]
    OutOfRange { offset: u32, len: usize },

    #[error("offset {0:#x} is not 32-bit aligned")]
    Unaligned(u32),

    #[error("bus error at offset {0:#x}")]
    Bus(u32),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no phy-config can be matched with reg {0:#x}")]
    NoMatchingConfig(u32),

    #[error("unsupported compatible {0:?}")]
    UnsupportedCompatible(String),

    #[error("phy port {0} not supported")]
    InvalidPort(String),

    #[error("register access failed: {0}")]
    Regmap(#[from] RegmapError),

    #[error("the base address of usb phy is not mapped")]
    NoPhyBase,

    #[error("u2phy reset failed: {0}")]
    Reset(String),

    #[error("failed to set vbus supply: {0}")]
    Regulator(String),

    #[error("device tree: {0}")]
    DeviceTree(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
