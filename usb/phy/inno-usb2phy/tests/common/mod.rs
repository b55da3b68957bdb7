#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use inno_usb2phy::field::{RegField, WRITE_MASK_SHIFT};
use inno_usb2phy::hal::{Delay, Regulator, ResetControl, VbusGpio};
use inno_usb2phy::regmap::Regmap;
use inno_usb2phy::soc::{ChargerDetRegs, ChargerDetect, PhyConfig};
use inno_usb2phy::{
    Error, PhyResources, PortId, ProbeParams, RegmapError, Result, Revision, Soc, Usb2Phy,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Read(u32),
    Write(u32, u32),
    Delay(u64),
    Assert,
    Deassert,
    Vbus(bool),
}

/// Everything the simulated hardware saw, in order.
#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write(offset, value) => Some((offset, value)),
                _ => None,
            })
            .collect()
    }

    /// Everything but register reads.
    pub fn actions(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| !matches!(event, Event::Read(_)))
            .collect()
    }

    pub fn delay_us(&self) -> u64 {
        self.events()
            .into_iter()
            .map(|event| match event {
                Event::Delay(us) => us,
                _ => 0,
            })
            .sum()
    }
}

/// A BC1.2 port partner. Status bits follow the control pairs the driver
/// has switched on, the counters record how often each stage sampled.
#[derive(Clone, Debug)]
pub struct ChargerScript {
    regs: ChargerDetRegs,
    bvalid: Option<RegField>,
    pub vbus: bool,
    /// DCD poll (1-based) from which the data pins make contact.
    pub dp_det_from_poll: Option<u32>,
    /// Primary detection attempt (1-based) from which cp_det asserts.
    pub cp_det_from_attempt: Option<u32>,
    pub dcp_det: bool,
    pub dcd_polls: u32,
    pub primary_attempts: u32,
    pub secondary_samples: u32,
}

impl ChargerScript {
    pub fn new(config: &PhyConfig) -> Self {
        let ChargerDetect::Bc12(regs) = config.chg_det else {
            panic!("phy {:#x} has no bc1.2 block", config.reg);
        };
        let bvalid = config.port(PortId::Otg).ok().and_then(|otg| otg.utmi_bvalid);
        Self {
            regs,
            bvalid,
            vbus: true,
            dp_det_from_poll: None,
            cp_det_from_attempt: None,
            dcp_det: false,
            dcd_polls: 0,
            primary_attempts: 0,
            secondary_samples: 0,
        }
    }

    fn holds(regs: &BTreeMap<u32, u32>, field: &RegField) -> bool {
        let value = regs.get(&field.offset).copied().unwrap_or(0);
        field.extract(value) == field.enable
    }

    fn put(value: u32, field: &RegField, on: bool) -> u32 {
        let bits = if on { field.enable } else { field.disable };
        (value & !field.mask()) | (bits << field.bitstart)
    }

    fn status(&mut self, offset: u32, mut value: u32, regs: &BTreeMap<u32, u32>) -> u32 {
        let r = self.regs;
        let dcd = Self::holds(regs, &r.rdm_pdwn_en) && Self::holds(regs, &r.idp_src_en);
        let primary = Self::holds(regs, &r.vdp_src_en) && Self::holds(regs, &r.idm_sink_en);
        let secondary = Self::holds(regs, &r.vdm_src_en) && Self::holds(regs, &r.idp_sink_en);

        if offset == r.dp_det.offset {
            if dcd {
                self.dcd_polls += 1;
            }
            let contact = self.dp_det_from_poll.map_or(false, |n| self.dcd_polls >= n);
            value = Self::put(value, &r.dp_det, dcd && contact);
        }
        if offset == r.cp_det.offset {
            if primary {
                self.primary_attempts += 1;
            }
            let cp = self
                .cp_det_from_attempt
                .map_or(false, |n| self.primary_attempts >= n);
            value = Self::put(value, &r.cp_det, primary && cp);
        }
        if offset == r.dcp_det.offset {
            if secondary {
                self.secondary_samples += 1;
            }
            value = Self::put(value, &r.dcp_det, secondary && self.dcp_det);
        }
        if let Some(bvalid) = self.bvalid {
            if offset == bvalid.offset {
                value = Self::put(value, &bvalid, self.vbus);
            }
        }
        value
    }
}

#[derive(Default)]
struct BusState {
    regs: BTreeMap<u32, u32>,
    plain: bool,
    fail_reads: bool,
    fail_writes_at: Option<u32>,
    charger: Option<ChargerScript>,
}

/// Simulated GRF. Writes honour the hiword write mask unless the bus is
/// plain.
#[derive(Clone)]
pub struct SimBus {
    state: Rc<RefCell<BusState>>,
    trace: Trace,
}

impl SimBus {
    pub fn new(trace: &Trace) -> Self {
        Self {
            state: Rc::default(),
            trace: trace.clone(),
        }
    }

    pub fn plain(trace: &Trace) -> Self {
        let bus = Self::new(trace);
        bus.state.borrow_mut().plain = true;
        bus
    }

    pub fn set(&self, offset: u32, value: u32) {
        self.state.borrow_mut().regs.insert(offset, value);
    }

    pub fn get(&self, offset: u32) -> u32 {
        self.state.borrow().regs.get(&offset).copied().unwrap_or(0)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn fail_writes_at(&self, offset: u32) {
        self.state.borrow_mut().fail_writes_at = Some(offset);
    }

    pub fn attach(&self, script: ChargerScript) {
        self.state.borrow_mut().charger = Some(script);
    }

    pub fn script(&self) -> ChargerScript {
        self.state
            .borrow()
            .charger
            .clone()
            .expect("no charger script attached")
    }
}

impl Regmap for SimBus {
    fn read(&self, offset: u32) -> Result<u32, RegmapError> {
        self.trace.push(Event::Read(offset));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.fail_reads {
            return Err(RegmapError::Bus(offset));
        }
        let value = state.regs.get(&offset).copied().unwrap_or(0);
        Ok(match state.charger.as_mut() {
            Some(script) => script.status(offset, value, &state.regs),
            None => value,
        })
    }

    fn write(&self, offset: u32, value: u32) -> Result<(), RegmapError> {
        self.trace.push(Event::Write(offset, value));
        let mut state = self.state.borrow_mut();
        if state.fail_writes_at == Some(offset) {
            return Err(RegmapError::Bus(offset));
        }
        let plain = state.plain;
        let reg = state.regs.entry(offset).or_insert(0);
        *reg = if plain {
            value
        } else {
            let mask = value >> WRITE_MASK_SHIFT;
            (*reg & !mask) | (value & mask)
        };
        Ok(())
    }
}

pub struct SimDelay(pub Trace);

impl Delay for SimDelay {
    fn delay_us(&self, us: u64) {
        self.0.push(Event::Delay(us));
    }
}

pub struct SimReset {
    pub trace: Trace,
    pub fail_assert: bool,
}

impl ResetControl for SimReset {
    fn assert(&mut self) -> Result<()> {
        if self.fail_assert {
            return Err(Error::Reset("assert timed out".into()));
        }
        self.trace.push(Event::Assert);
        Ok(())
    }

    fn deassert(&mut self) -> Result<()> {
        self.trace.push(Event::Deassert);
        Ok(())
    }
}

pub struct SimRegulator {
    pub trace: Trace,
    pub fail: bool,
}

impl Regulator for SimRegulator {
    fn set_enable(&mut self, enable: bool) -> Result<()> {
        if self.fail {
            return Err(Error::Regulator("supply fault".into()));
        }
        self.trace.push(Event::Vbus(enable));
        Ok(())
    }
}

pub struct SimGpio(pub bool);

impl VbusGpio for SimGpio {
    fn is_high(&self) -> bool {
        self.0
    }
}

/// A simulated GRF plus the shared trace, wired into probe.
pub struct Rig {
    pub trace: Trace,
    pub grf: SimBus,
}

impl Rig {
    pub fn new() -> Self {
        let trace = Trace::default();
        let grf = SimBus::new(&trace);
        Self { trace, grf }
    }

    pub fn plain() -> Self {
        let trace = Trace::default();
        let grf = SimBus::plain(&trace);
        Self { trace, grf }
    }

    pub fn resources(&self) -> PhyResources {
        PhyResources {
            delay: Box::new(SimDelay(self.trace.clone())),
            ..PhyResources::new(Box::new(self.grf.clone()))
        }
    }

    pub fn reset(&self) -> SimReset {
        SimReset {
            trace: self.trace.clone(),
            fail_assert: false,
        }
    }

    pub fn probe(&self, soc: Soc, reg: u32) -> Usb2Phy {
        self.probe_with(self.resources(), soc, reg, Revision::Standard)
    }

    pub fn probe_with(
        &self,
        res: PhyResources,
        soc: Soc,
        reg: u32,
        revision: Revision,
    ) -> Usb2Phy {
        Usb2Phy::probe(
            res,
            ProbeParams {
                soc,
                reg,
                revision,
            },
        )
        .expect("probe failed")
    }
}
