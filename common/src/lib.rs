use syscall::error::{Error, Result, EINVAL};

pub mod io;
mod logger;
pub mod timeout;

pub use logger::{file_level, output_level, setup_logging};

#[derive(Clone, Copy, Debug)]
pub enum MemoryType {
    Writeback,
    Uncacheable,
    WriteCombining,
    DeviceMemory,
}
impl Default for MemoryType {
    fn default() -> Self {
        Self::Writeback
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Prot {
    pub read: bool,
    pub write: bool,
}
impl Prot {
    pub const RO: Self = Self { read: true, write: false };
    pub const WO: Self = Self { read: false, write: true };
    pub const RW: Self = Self { read: true, write: true };
}

/// A register window mapped from physical memory.
///
/// The mapping lives as long as the process; device register windows are
/// never unmapped by the drivers that use them.
#[derive(Clone, Copy, Debug)]
pub struct PhysWindow {
    pub phys: usize,
    pub virt: usize,
    pub len: usize,
}

impl PhysWindow {
    /// Maps `len` bytes of device memory starting at `phys`.
    ///
    /// # Safety
    /// `phys..phys + len` must describe device registers that nothing else in
    /// this process is driving.
    pub unsafe fn map_device(phys: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::new(EINVAL));
        }
        let virt = physmap(phys, len, Prot::RW, MemoryType::DeviceMemory)? as usize;
        log::debug!("mapped {:#x}+{:#x} at {:#x}", phys, len, virt);
        Ok(Self { phys, virt, len })
    }
}

#[cfg(target_os = "redox")]
pub unsafe fn physmap(base_phys: usize, len: usize, Prot { read, write }: Prot, ty: MemoryType) -> Result<*mut ()> {
    use syscall::flag::{MapFlags, O_CLOEXEC, O_RDONLY, O_RDWR, O_WRONLY};
    use syscall::PAGE_SIZE;

    let path = format!("memory:physical@{}", match ty {
        MemoryType::Writeback => "wb",
        MemoryType::Uncacheable => "uc",
        MemoryType::WriteCombining => "wc",
        MemoryType::DeviceMemory => "dev",
    });
    let mode = match (read, write) {
        (true, true) => O_RDWR,
        (true, false) => O_RDONLY,
        (false, true) => O_WRONLY,
        (false, false) => return Err(Error::new(EINVAL)),
    };
    let mut prot = MapFlags::empty();
    prot.set(MapFlags::PROT_READ, read);
    prot.set(MapFlags::PROT_WRITE, write);

    // The physical window must start on a page boundary; hand back a pointer
    // to the requested byte inside it.
    let page_offset = base_phys % PAGE_SIZE;
    let file = syscall::open(path, O_CLOEXEC | mode)?;
    let base = syscall::fmap(file, &syscall::Map {
        offset: base_phys - page_offset,
        size: (len + page_offset).next_multiple_of(PAGE_SIZE),
        flags: MapFlags::MAP_SHARED | prot,
        address: 0,
    });
    let _ = syscall::close(file);

    Ok((base? + page_offset) as *mut ())
}

#[cfg(not(target_os = "redox"))]
pub unsafe fn physmap(_base_phys: usize, _len: usize, _prot: Prot, _ty: MemoryType) -> Result<*mut ()> {
    Err(Error::new(syscall::error::ENOSYS))
}
