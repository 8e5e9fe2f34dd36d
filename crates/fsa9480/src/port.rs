//! Register access port.
//!
//! SMBus-style byte and word transactions against the switch over an async
//! I²C bus. Word accesses cover two adjacent registers, low byte first.
//! Nothing here retries or logs; callers decide what a failure means.

use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use crate::error::TransportError;

/// Byte/word register access to one switch on an I²C bus.
pub struct RegisterPort<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> RegisterPort<I> {
    /// Wrap `i2c`, addressing the switch at the 7-bit `address`.
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit bus address of the switch.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read one register.
    pub async fn read_byte(&mut self, reg: u8) -> Result<u8, TransportError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(|e| TransportError::Read { reg, kind: e.kind() })?;
        let [value] = buf;
        Ok(value)
    }

    /// Write one register.
    pub async fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), TransportError> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(|e| TransportError::Write { reg, kind: e.kind() })
    }

    /// Read `reg` (low byte) and `reg + 1` (high byte) in one transaction.
    pub async fn read_word(&mut self, reg: u8) -> Result<u16, TransportError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(|e| TransportError::Read { reg, kind: e.kind() })?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write `reg` (low byte) and `reg + 1` (high byte) in one transaction.
    pub async fn write_word(&mut self, reg: u8, value: u16) -> Result<(), TransportError> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[reg, lo, hi])
            .await
            .map_err(|e| TransportError::Write { reg, kind: e.kind() })
    }

    /// Read `reg`, apply `f`, write the result back. Returns the written value.
    ///
    /// Nothing is written if the read fails.
    pub async fn modify_byte<F: FnOnce(u8) -> u8>(
        &mut self,
        reg: u8,
        f: F,
    ) -> Result<u8, TransportError> {
        let value = f(self.read_byte(reg).await?);
        self.write_byte(reg, value).await?;
        Ok(value)
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use platform::fsa9480::{FSA9480_I2C_ADDR, REG_CONTROL, REG_DEV_T1, REG_INT1_MASK, REG_INT2_MASK};
    use platform::mocks::MockRegisterFile;

    fn port() -> RegisterPort<MockRegisterFile> {
        RegisterPort::new(MockRegisterFile::new(), FSA9480_I2C_ADDR)
    }

    #[tokio::test]
    async fn read_word_puts_first_register_in_low_byte() {
        let mut port = port();
        port.i2c.set_device_type(0x04, 0x40);
        assert_eq!(port.read_word(REG_DEV_T1).await.unwrap(), 0x4004);
    }

    #[tokio::test]
    async fn write_word_splits_little_endian() {
        let mut port = port();
        port.write_word(REG_INT1_MASK, 0x1FFC).await.unwrap();
        let bus = port.release();
        assert_eq!(bus.reg(REG_INT1_MASK), 0xFC);
        assert_eq!(bus.reg(REG_INT2_MASK), 0x1F);
    }

    #[tokio::test]
    async fn read_failure_maps_to_transport_error() {
        let mut port = port();
        port.i2c.fail_reads_of(REG_CONTROL);
        let err = port.read_byte(REG_CONTROL).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Read {
                reg: REG_CONTROL,
                kind: ErrorKind::Bus
            }
        );
    }

    #[tokio::test]
    async fn modify_skips_write_when_read_fails() {
        let mut port = port();
        port.i2c.fail_reads_of(REG_CONTROL);
        assert!(port.modify_byte(REG_CONTROL, |v| v | 0x04).await.is_err());
        assert!(port.release().writes_to(REG_CONTROL).is_empty());
    }

    #[tokio::test]
    async fn modify_writes_transformed_value() {
        let mut port = port();
        port.i2c.set_reg(REG_CONTROL, 0x1E);
        let written = port.modify_byte(REG_CONTROL, |v| v & !0x04).await.unwrap();
        assert_eq!(written, 0x1A);
        assert_eq!(port.release().reg(REG_CONTROL), 0x1A);
    }
}
