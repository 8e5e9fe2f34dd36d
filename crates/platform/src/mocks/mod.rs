//! Mock implementations for testing
//!
//! This module provides a register-file I2C device, a scripted interrupt line
//! and a recording callback sink for driver unit and integration tests.
//!
//! [`MockRegisterFile`] and [`MockIrqLine`] are cheap handles over shared
//! state: clone one, hand the clone to the driver, and keep driving the chip
//! from the test through the handle you kept.

#![cfg(any(test, feature = "std"))]

extern crate std;

use core::cell::RefCell;
use core::convert::Infallible;
use core::future::poll_fn;
use core::task::{Poll, Waker};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

use crate::accessory::{AccessoryCallbacks, Category};
use crate::fsa9480::{FSA9480_I2C_ADDR, REG_DEV_T1, REG_DEV_T2, REG_INT1, REG_INT2};

/// Number of addressable registers in the mock.
pub const MOCK_REGISTER_COUNT: usize = 0x20;

/// Error returned by [`MockRegisterFile`] when a fault is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError(pub ErrorKind);

impl embedded_hal::i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

#[derive(Debug)]
struct Registers {
    address: u8,
    regs: [u8; MOCK_REGISTER_COUNT],
    pending_irqs: VecDeque<u16>,
    writes: Vec<(u8, u8)>,
    fail_reads: Vec<u8>,
    fail_writes: Vec<u8>,
    offline: bool,
    pointer: u8,
}

impl Registers {
    fn reg(&self, reg: u8) -> u8 {
        self.regs.get(usize::from(reg)).copied().unwrap_or(0)
    }

    fn set_reg(&mut self, reg: u8, value: u8) {
        if let Some(slot) = self.regs.get_mut(usize::from(reg)) {
            *slot = value;
        }
    }

    fn read_at(&mut self, reg: u8) -> u8 {
        if reg == REG_INT1 {
            if let Some(status) = self.pending_irqs.pop_front() {
                let [int1, int2] = status.to_le_bytes();
                self.set_reg(REG_INT1, int1);
                self.set_reg(REG_INT2, int2);
            }
        }
        let value = self.reg(reg);
        if reg == REG_INT1 || reg == REG_INT2 {
            self.set_reg(reg, 0);
        }
        value
    }

    fn write_at(&mut self, reg: u8, value: u8) {
        self.set_reg(reg, value);
        self.writes.push((reg, value));
    }
}

/// In-memory FSA9480 register file behind an async I2C bus.
///
/// Register reads auto-increment like the real part. INT1/INT2 are
/// read-to-clear; pending interrupt words can be queued with
/// [`raise_interrupt`](Self::raise_interrupt) and are delivered one per INT1
/// read. Every byte written is logged as `(register, value)`.
#[derive(Debug, Clone)]
pub struct MockRegisterFile {
    inner: Rc<RefCell<Registers>>,
}

impl MockRegisterFile {
    /// Create a register file answering on the FSA9480 address, all registers 0.
    pub fn new() -> Self {
        Self::with_address(FSA9480_I2C_ADDR)
    }

    /// Create a register file answering on `address`.
    pub fn with_address(address: u8) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registers {
                address,
                regs: [0; MOCK_REGISTER_COUNT],
                pending_irqs: VecDeque::new(),
                writes: Vec::new(),
                fail_reads: Vec::new(),
                fail_writes: Vec::new(),
                offline: false,
                pointer: 0,
            })),
        }
    }

    /// Current value of `reg` (0 for out-of-range registers).
    pub fn reg(&self, reg: u8) -> u8 {
        self.inner.borrow().reg(reg)
    }

    /// Set `reg` without logging a write.
    pub fn set_reg(&self, reg: u8, value: u8) {
        self.inner.borrow_mut().set_reg(reg, value);
    }

    /// Set DEV_T1/DEV_T2 as seen by the next detection pass.
    pub fn set_device_type(&self, dev1: u8, dev2: u8) {
        let mut regs = self.inner.borrow_mut();
        regs.set_reg(REG_DEV_T1, dev1);
        regs.set_reg(REG_DEV_T2, dev2);
    }

    /// Queue an INT1/INT2 status word for a later INT1 read.
    pub fn raise_interrupt(&self, status: u16) {
        self.inner.borrow_mut().pending_irqs.push_back(status);
    }

    /// Number of interrupt words not yet drained.
    pub fn pending_interrupts(&self) -> usize {
        self.inner.borrow().pending_irqs.len()
    }

    /// Make every read starting at `reg` fail with a bus error.
    pub fn fail_reads_of(&self, reg: u8) {
        self.inner.borrow_mut().fail_reads.push(reg);
    }

    /// Make every write starting at `reg` fail with a bus error.
    pub fn fail_writes_of(&self, reg: u8) {
        self.inner.borrow_mut().fail_writes.push(reg);
    }

    /// Clear all injected faults.
    pub fn clear_faults(&self) {
        let mut regs = self.inner.borrow_mut();
        regs.fail_reads.clear();
        regs.fail_writes.clear();
        regs.offline = false;
    }

    /// NAK every transaction, as if the chip lost power.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// Every `(register, value)` byte written so far.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.inner.borrow().writes.clone()
    }

    /// Values written to `reg`, oldest first.
    pub fn writes_to(&self, reg: u8) -> Vec<u8> {
        self.inner
            .borrow()
            .writes
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Forget the write log.
    pub fn clear_writes(&self) {
        self.inner.borrow_mut().writes.clear();
    }
}

impl Default for MockRegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockRegisterFile {
    type Error = MockI2cError;
}

impl I2c for MockRegisterFile {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut regs = self.inner.borrow_mut();
        if regs.offline || address != regs.address {
            return Err(MockI2cError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    let Some((&reg, payload)) = data.split_first() else {
                        continue;
                    };
                    if regs.fail_writes.contains(&reg) {
                        return Err(MockI2cError(ErrorKind::Bus));
                    }
                    regs.pointer = reg;
                    for &value in payload {
                        let at = regs.pointer;
                        regs.write_at(at, value);
                        regs.pointer = at.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    if regs.fail_reads.contains(&regs.pointer) {
                        return Err(MockI2cError(ErrorKind::Bus));
                    }
                    for slot in buf.iter_mut() {
                        let at = regs.pointer;
                        *slot = regs.read_at(at);
                        regs.pointer = at.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Line {
    pending: u32,
    waits: u32,
    waker: Option<Waker>,
}

/// Scripted INTB line.
///
/// Each interrupt queued with [`fire`](Self::fire) lets one `wait_for_low`
/// complete; with nothing queued the wait pends until the next `fire`.
#[derive(Debug, Clone, Default)]
pub struct MockIrqLine {
    inner: Rc<RefCell<Line>>,
}

impl MockIrqLine {
    /// Create an idle line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the line for `count` interrupts.
    pub fn fire(&self, count: u32) {
        let mut line = self.inner.borrow_mut();
        line.pending = line.pending.saturating_add(count);
        if let Some(waker) = line.waker.take() {
            waker.wake();
        }
    }

    /// Number of completed waits.
    pub fn waits(&self) -> u32 {
        self.inner.borrow().waits
    }

    /// Interrupts fired but not yet consumed by a wait.
    pub fn pending(&self) -> u32 {
        self.inner.borrow().pending
    }

    async fn next(&mut self) -> Result<(), Infallible> {
        poll_fn(|cx| {
            let mut line = self.inner.borrow_mut();
            if line.pending == 0 {
                line.waker = Some(cx.waker().clone());
                return Poll::Pending;
            }
            line.pending = line.pending.saturating_sub(1);
            line.waits = line.waits.saturating_add(1);
            Poll::Ready(Ok(()))
        })
        .await
    }
}

impl embedded_hal::digital::ErrorType for MockIrqLine {
    type Error = Infallible;
}

impl embedded_hal_async::digital::Wait for MockIrqLine {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.next().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.next().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.next().await
    }
}

/// One recorded callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackEvent {
    /// `on_attach(category)`
    Attach(Category),
    /// `on_detach(category)`
    Detach(Category),
    /// `on_configure()`
    Configure,
    /// `on_reset()`
    Reset,
    /// `on_vaudio_path(enabled)`
    VaudioPath(bool),
}

/// Callback sink that records every invocation in order.
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    events: heapless::Vec<CallbackEvent, 64>,
}

impl RecordingCallbacks {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event, oldest first.
    pub fn events(&self) -> &[CallbackEvent] {
        &self.events
    }

    /// Number of `on_attach(category)` calls.
    pub fn attaches(&self, category: Category) -> usize {
        self.count(CallbackEvent::Attach(category))
    }

    /// Number of `on_detach(category)` calls.
    pub fn detaches(&self, category: Category) -> usize {
        self.count(CallbackEvent::Detach(category))
    }

    /// Forget all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn count(&self, event: CallbackEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    fn record(&mut self, event: CallbackEvent) {
        let _ = self.events.push(event); // full log: later events dropped
    }
}

impl AccessoryCallbacks for RecordingCallbacks {
    fn on_attach(&mut self, category: Category) {
        self.record(CallbackEvent::Attach(category));
    }

    fn on_detach(&mut self, category: Category) {
        self.record(CallbackEvent::Detach(category));
    }

    fn on_configure(&mut self) {
        self.record(CallbackEvent::Configure);
    }

    fn on_reset(&mut self) {
        self.record(CallbackEvent::Reset);
    }

    fn on_vaudio_path(&mut self, enabled: bool) {
        self.record(CallbackEvent::VaudioPath(enabled));
    }
}
