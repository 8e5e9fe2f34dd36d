//! Management attribute tests: rendered text and store semantics.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//!
//! Run with: cargo test -p fsa9480 --test attrs

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use fsa9480::{DockStatus, Fsa9480Config, UsbSwitch};
use platform::fsa9480::*;
use platform::mocks::{MockRegisterFile, RecordingCallbacks};

type Switch<'d> = UsbSwitch<'d, NoopRawMutex, MockRegisterFile, RecordingCallbacks>;

async fn probe<'d>(bus: &MockRegisterFile, dock: &'d DockStatus<NoopRawMutex>) -> Switch<'d> {
    UsbSwitch::probe(
        bus.clone(),
        Fsa9480Config::default(),
        RecordingCallbacks::new(),
        dock,
    )
    .await
    .expect("probe should succeed against the mock")
}

#[tokio::test]
async fn control_and_device_type_render_as_two_hex_digits() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;
    bus.set_device_type(DEV_USB, DEV_AV);

    assert_eq!(switch.show_control().await.unwrap().as_str(), "CONTROL: 1e\n");
    assert_eq!(
        switch.show_device_type().await.unwrap().as_str(),
        "DEVICE_TYPE: 04\n"
    );
}

#[tokio::test]
async fn show_fails_when_register_read_fails() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;
    bus.fail_reads_of(REG_CONTROL);

    assert!(switch.show_control().await.is_err());
}

#[tokio::test]
async fn switch_shows_route_name_or_raw_hex() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;

    assert_eq!(switch.show_switch().await.unwrap().as_str(), "AUTO\n");
    bus.set_reg(REG_MANSW1, SW_DHOST);
    assert_eq!(switch.show_switch().await.unwrap().as_str(), "DHOST\n");
    bus.set_reg(REG_MANSW1, 0x81);
    assert_eq!(switch.show_switch().await.unwrap().as_str(), "81");
}

#[tokio::test]
async fn store_switch_applies_known_routes() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;

    assert_eq!(switch.store_switch("UART\n").await, 5);
    assert_eq!(bus.reg(REG_MANSW1), SW_UART);
    assert_eq!(switch.show_switch().await.unwrap().as_str(), "UART\n");

    assert_eq!(switch.store_switch("VAUDIO").await, 6);
    assert_eq!(bus.reg(REG_MANSW1), SW_VAUDIO);
}

#[tokio::test]
async fn store_switch_rejects_unknown_or_refused_requests() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;
    bus.clear_writes();

    assert_eq!(switch.store_switch("HOST\n").await, 0);
    assert!(bus.writes().is_empty());

    bus.set_reg(REG_CONTROL, 0x00);
    assert_eq!(switch.store_switch("AUDIO\n").await, 0);
    assert!(bus.writes().is_empty());
}

#[tokio::test]
async fn dock_enables_parse_integers() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;

    assert_eq!(switch.show_cardock_enable().as_str(), "0\n");
    assert_eq!(switch.store_cardock_enable("1\n"), 2);
    assert_eq!(switch.show_cardock_enable().as_str(), "1\n");

    assert_eq!(switch.store_deskdock_enable("42"), 2);
    assert_eq!(switch.show_deskdock_enable().as_str(), "1\n");
    assert_eq!(switch.store_deskdock_enable("0\n"), 2);
    assert_eq!(switch.show_deskdock_enable().as_str(), "0\n");
}

#[tokio::test]
async fn unparsable_enable_is_consumed_but_ignored() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    let switch = probe(&bus, &dock).await;
    switch.store_cardock_enable("1");

    assert_eq!(switch.store_cardock_enable("off\n"), 4);
    assert!(dock.car_enabled());
}

#[tokio::test]
async fn dock_status_reflects_latch_and_enable() {
    let bus = MockRegisterFile::new();
    let dock = DockStatus::new();
    bus.set_device_type(0, DEV_AV);
    let switch = probe(&bus, &dock).await;

    assert_eq!(switch.show_dock_status().as_str(), "0\n");
    switch.store_deskdock_enable("1\n");
    assert_eq!(switch.show_dock_status().as_str(), "1\n");
}
