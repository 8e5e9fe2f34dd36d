//! Property-based tests for accessory classification and detection.
//! Verifies invariants hold for ALL device-type readings, not just fixed examples.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//!
//! Run with: cargo test -p fsa9480 --test classify_proptest

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use fsa9480::{classify, DockStatus, Fsa9480, Fsa9480Config};
use platform::fsa9480::*;
use platform::mocks::{CallbackEvent, MockRegisterFile, RecordingCallbacks};
use platform::Category;

fn block_on<F: core::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(f)
}

proptest::proptest! {
    /// USB bits win over everything else.
    #[test]
    fn usb_bits_always_classify_as_usb(dev1 in 0u8..=255u8, dev2 in 0u8..=255u8) {
        if dev1 & DEV_T1_USB_MASK != 0 || dev2 & DEV_T2_USB_MASK != 0 {
            assert_eq!(classify(dev1, dev2), Category::Usb);
        }
    }

    /// Every JIG bit is also a USB or UART bit, so JIG never wins.
    #[test]
    fn jig_is_never_the_result(dev1 in 0u8..=255u8, dev2 in 0u8..=255u8) {
        assert_ne!(classify(dev1, dev2), Category::Jig);
    }

    /// Each tier wins exactly when no higher tier matched.
    #[test]
    fn tiers_are_checked_in_priority_order(dev1 in 0u8..=255u8, dev2 in 0u8..=255u8) {
        let usb = dev1 & DEV_T1_USB_MASK != 0 || dev2 & DEV_T2_USB_MASK != 0;
        let uart = dev1 & DEV_T1_UART_MASK != 0 || dev2 & DEV_T2_UART_MASK != 0;
        let charger = dev1 & DEV_T1_CHARGER_MASK != 0;
        let desk = dev2 & DEV_AV != 0;
        let car = dev2 & DEV_JIG_UART_ON != 0;

        let expected = if usb {
            Category::Usb
        } else if uart {
            Category::Uart
        } else if charger {
            Category::Charger
        } else if desk {
            Category::DeskDock
        } else if car {
            Category::CarDock
        } else {
            Category::None
        };
        assert_eq!(classify(dev1, dev2), expected);
    }

    /// A second pass over the same reading dispatches nothing.
    #[test]
    fn detection_is_idempotent(dev1 in 0u8..=255u8, dev2 in 0u8..=255u8) {
        block_on(async {
            let bus = MockRegisterFile::new();
            let dock = DockStatus::<NoopRawMutex>::new();
            let mut switch = Fsa9480::probe(
                bus.clone(),
                Fsa9480Config::default(),
                RecordingCallbacks::new(),
                &dock,
            )
            .await
            .unwrap();

            bus.set_device_type(dev1, dev2);
            switch.detect().await.unwrap();
            let after_first = switch.callbacks().events().len();
            let second = switch.detect().await.unwrap();

            assert!(!second.changed());
            assert_eq!(switch.callbacks().events().len(), after_first);
        });
    }

    /// Attach then unplug yields one attach and one detach of the same
    /// category, or nothing at all for unrouted readings.
    #[test]
    fn unplug_detaches_what_was_attached(dev1 in 1u8..=255u8, dev2 in 0u8..=255u8) {
        block_on(async {
            let bus = MockRegisterFile::new();
            let dock = DockStatus::<NoopRawMutex>::new();
            let mut switch = Fsa9480::probe(
                bus.clone(),
                Fsa9480Config::default(),
                RecordingCallbacks::new(),
                &dock,
            )
            .await
            .unwrap();
            switch.callbacks_mut().clear();

            bus.set_device_type(dev1, dev2);
            switch.detect().await.unwrap();
            bus.set_device_type(0, 0);
            switch.detect().await.unwrap();

            let category = classify(dev1, dev2);
            let events = switch.callbacks().events();
            if category == Category::None {
                assert!(events.is_empty());
            } else {
                assert_eq!(
                    events,
                    &[CallbackEvent::Attach(category), CallbackEvent::Detach(category)]
                );
            }
            assert!(!dock.car_docked() && !dock.desk_docked());
        });
    }
}
