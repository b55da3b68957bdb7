mod common;

use common::{ChargerScript, Event, Rig, SimGpio};
use inno_usb2phy::charger::{DCD_POLL_MS, PRIMARY_DET_MS, SECONDARY_DET_MS};
use inno_usb2phy::{ChargerType, PhyResources, Revision, Soc, Usb2Phy};

const RK3399_OTG: u32 = 0xe450;
/// Control pairs of the rk3399 OTG charger block, bits 12:7.
const CHG_CTRL: u32 = 0xe450;
const CHG_CTRL_MASK: u32 = 0x1f80;

fn rig_with(script: impl FnOnce(&mut ChargerScript)) -> (Rig, Usb2Phy) {
    let rig = Rig::new();
    let phy = rig.probe(Soc::Rk3399, RK3399_OTG);
    let mut partner = ChargerScript::new(phy.config());
    script(&mut partner);
    rig.grf.attach(partner);
    rig.trace.clear();
    (rig, phy)
}

fn ms(total: u64) -> u64 {
    total * 1000
}

#[test]
fn no_vbus_leaves_the_phy_alone() {
    let (rig, phy) = rig_with(|p| p.vbus = false);

    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(rig.trace.writes().is_empty());
    assert_eq!(rig.trace.delay_us(), 0);
}

#[test]
fn floating_charger_exhausts_data_contact() {
    let (rig, phy) = rig_with(|_| {});

    assert_eq!(phy.classify(), ChargerType::Floating);

    let partner = rig.grf.script();
    assert_eq!(partner.dcd_polls, 6);
    assert_eq!(partner.primary_attempts, 1);
    assert_eq!(partner.secondary_samples, 0);
    assert_eq!(rig.trace.delay_us(), ms(6 * DCD_POLL_MS + PRIMARY_DET_MS));
}

#[test]
fn contact_on_the_last_poll_still_counts_as_floating() {
    let (rig, phy) = rig_with(|p| p.dp_det_from_poll = Some(6));

    assert_eq!(phy.classify(), ChargerType::Floating);
    assert_eq!(rig.grf.script().dcd_polls, 6);
}

#[test]
fn dedicated_charger() {
    let (rig, phy) = rig_with(|p| {
        p.dp_det_from_poll = Some(3);
        p.cp_det_from_attempt = Some(1);
        p.dcp_det = true;
    });

    assert_eq!(phy.classify(), ChargerType::Dcp);

    let partner = rig.grf.script();
    assert_eq!(partner.dcd_polls, 3);
    assert_eq!(partner.primary_attempts, 1);
    assert_eq!(partner.secondary_samples, 1);
    assert_eq!(
        rig.trace.delay_us(),
        ms(3 * DCD_POLL_MS + PRIMARY_DET_MS + SECONDARY_DET_MS)
    );
}

#[test]
fn charging_downstream_port() {
    let (_rig, phy) = rig_with(|p| {
        p.dp_det_from_poll = Some(1);
        p.cp_det_from_attempt = Some(1);
    });

    assert_eq!(phy.classify(), ChargerType::Cdp);
    assert!(phy.is_host_or_sdp());
}

#[test]
fn standard_port_after_primary_retries() {
    let (rig, phy) = rig_with(|p| p.dp_det_from_poll = Some(1));

    assert_eq!(phy.classify(), ChargerType::Sdp);

    let partner = rig.grf.script();
    assert_eq!(partner.primary_attempts, 3);
    assert_eq!(partner.secondary_samples, 0);
    assert_eq!(
        rig.trace.delay_us(),
        ms(DCD_POLL_MS + 3 * PRIMARY_DET_MS)
    );
}

#[test]
fn late_primary_detection_goes_on_to_secondary() {
    let (rig, phy) = rig_with(|p| {
        p.dp_det_from_poll = Some(2);
        p.cp_det_from_attempt = Some(2);
    });

    assert_eq!(phy.classify(), ChargerType::Cdp);

    let partner = rig.grf.script();
    assert_eq!(partner.primary_attempts, 2);
    assert_eq!(partner.secondary_samples, 1);
}

#[test]
fn detection_restores_normal_operation() {
    let (rig, phy) = rig_with(|p| {
        p.dp_det_from_poll = Some(1);
        p.cp_det_from_attempt = Some(1);
        p.dcp_det = true;
    });

    phy.classify();

    let writes = rig.trace.writes();
    // phy suspended and opmode non-driving before anything else
    assert_eq!(writes[0], (0xe454, 0x01ff_01d1));
    assert_eq!(writes[1], (0xe454, 0x000f_0005));
    // opmode back to normal, then out of suspend
    assert_eq!(
        writes[writes.len() - 2..],
        [(0xe454, 0x000f_0001), (0xe454, 0x01ff_0052)]
    );
    assert_eq!(rig.grf.get(CHG_CTRL) & CHG_CTRL_MASK, 0);
}

#[test]
fn vbus_gpio_low_wins_over_bvalid() {
    let rig = Rig::new();
    let res = PhyResources {
        vbus_gpio: Some(Box::new(SimGpio(false))),
        ..rig.resources()
    };
    let phy = rig.probe_with(res, Soc::Rk3399, RK3399_OTG, Revision::Standard);
    rig.grf.attach(ChargerScript::new(phy.config()));
    rig.trace.clear();

    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(rig.trace.events().is_empty());
}

#[test]
fn vbus_gpio_high_skips_bvalid() {
    let rig = Rig::new();
    let res = PhyResources {
        vbus_gpio: Some(Box::new(SimGpio(true))),
        ..rig.resources()
    };
    let phy = rig.probe_with(res, Soc::Rk3399, RK3399_OTG, Revision::Standard);
    let mut partner = ChargerScript::new(phy.config());
    partner.vbus = false;
    partner.dp_det_from_poll = Some(1);
    rig.grf.attach(partner);

    assert_eq!(phy.classify(), ChargerType::Sdp);
}

#[test]
fn rk3036_assumes_a_standard_port() {
    let rig = Rig::new();
    let phy = rig.probe(Soc::Rk3036, 0x17c);
    // utmi_bvalid
    rig.grf.set(0x014c, 1 << 5);
    rig.trace.clear();

    assert_eq!(phy.classify(), ChargerType::Sdp);
    assert_eq!(rig.trace.writes(), [(0x017c, 0x01ff_0000)]);
    assert_eq!(rig.trace.delay_us(), 0);
}

#[test]
fn rk3036_without_vbus() {
    let rig = Rig::new();
    let phy = rig.probe(Soc::Rk3036, 0x17c);

    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(rig.trace.writes().is_empty());
}

#[test]
fn unsupported_phys_report_unknown() {
    let rig = Rig::new();

    // otg port without a detection block
    let phy = rig.probe(Soc::Rk3588, 0x4000);
    rig.trace.clear();
    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(rig.trace.events().is_empty());

    // host-only phy
    let phy = rig.probe(Soc::Rk3588, 0x8000);
    rig.trace.clear();
    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(!phy.is_host_or_sdp());
    assert!(rig.trace.events().is_empty());
}

#[test]
fn unreadable_status_means_no_charger() {
    let (rig, phy) = rig_with(|p| p.dp_det_from_poll = Some(1));
    rig.grf.fail_reads(true);

    assert_eq!(phy.classify(), ChargerType::Unknown);
    assert!(rig.trace.writes().is_empty());
}

#[test]
fn failed_writes_do_not_abort_detection() {
    let (rig, phy) = rig_with(|p| {
        p.dp_det_from_poll = Some(1);
        p.cp_det_from_attempt = Some(1);
    });
    // none of the source/sink pairs can be switched on
    rig.grf.fail_writes_at(CHG_CTRL);

    assert_eq!(phy.classify(), ChargerType::Floating);
    assert_eq!(rig.grf.script().dcd_polls, 0);

    let writes = rig.trace.writes();
    assert_eq!(writes.last(), Some(&(0xe454, 0x01ff_0052)));
    assert!(rig
        .trace
        .events()
        .iter()
        .any(|event| *event == Event::Delay(ms(PRIMARY_DET_MS))));
}
