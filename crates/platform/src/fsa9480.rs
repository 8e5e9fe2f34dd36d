//! FSA9480 micro-USB accessory switch register map.
//!
//! Reference: Fairchild FSA9480 datasheet (Rev. 1.0.3)
//!
//! All registers are 8 bits wide. Paired registers (INT1/INT2, DEV_T1/DEV_T2,
//! INT1_MASK/INT2_MASK, CK_INTMASK1/CK_INTMASK2) sit at consecutive addresses
//! and are read or written together as a little-endian SMBus word: the low
//! byte is the first register, the high byte the second.

/// 7-bit I2C device address (fixed in silicon).
pub const FSA9480_I2C_ADDR: u8 = 0x25;

/// Device ID (version / vendor).
pub const REG_DEVICE_ID: u8 = 0x01;
/// Control: switch-open, raw-data, manual-switch, wait, interrupt mask.
pub const REG_CONTROL: u8 = 0x02;
/// Interrupt 1: attach, detach, key press, overvoltage, … (read-to-clear).
pub const REG_INT1: u8 = 0x03;
/// Interrupt 2: AV charge, reserved-attach, ADC change, … (read-to-clear).
pub const REG_INT2: u8 = 0x04;
/// Interrupt 1 mask (1 = masked).
pub const REG_INT1_MASK: u8 = 0x05;
/// Interrupt 2 mask (1 = masked).
pub const REG_INT2_MASK: u8 = 0x06;
/// ADC result of the ID line resistance.
pub const REG_ADC: u8 = 0x07;
/// Timing 1: ADC detect time / key press time.
pub const REG_TIMING1: u8 = 0x08;
/// Timing 2: switching wait / long key press.
pub const REG_TIMING2: u8 = 0x09;
/// Device type 1 (USB, UART, chargers, audio).
pub const REG_DEV_T1: u8 = 0x0A;
/// Device type 2 (AV, TTY, PPD, JIG variants).
pub const REG_DEV_T2: u8 = 0x0B;
/// Button 1 (remote key status).
pub const REG_BUTTON1: u8 = 0x0C;
/// Button 2 (remote key status).
pub const REG_BUTTON2: u8 = 0x0D;
/// Car-kit status.
pub const REG_CAR_KIT: u8 = 0x0E;
/// Car-kit interrupt 1.
pub const REG_CK_INT1: u8 = 0x0F;
/// Car-kit interrupt 2.
pub const REG_CK_INT2: u8 = 0x10;
/// Car-kit interrupt 1 mask.
pub const REG_CK_INTMASK1: u8 = 0x11;
/// Car-kit interrupt 2 mask.
pub const REG_CK_INTMASK2: u8 = 0x12;
/// Manual switch 1: D-[7:5] / D+[4:2] path selection.
pub const REG_MANSW1: u8 = 0x13;
/// Manual switch 2: VBUS / JIG / boot / ID paths.
pub const REG_MANSW2: u8 = 0x14;

// ---------------------------------------------------------------------------
// Control register bits
// ---------------------------------------------------------------------------

/// CTRL\[4\]: 1 = switches follow detection, 0 = all switches open.
pub const CON_SWITCH_OPEN: u8 = 1 << 4;
/// CTRL\[3\]: 1 = report raw ADC data.
pub const CON_RAW_DATA: u8 = 1 << 3;
/// CTRL\[2\]: 0 = manual switching (MANSW1 drives the paths), 1 = automatic.
pub const CON_MANUAL_SW: u8 = 1 << 2;
/// CTRL\[1\]: 1 = wait for host before switching.
pub const CON_WAIT: u8 = 1 << 1;
/// CTRL\[0\]: 1 = mask the INTB output.
pub const CON_INT_MASK: u8 = 1 << 0;
/// Power-on control value used by register init (INTB unmasked, automatic mode).
pub const CON_MASK: u8 = CON_SWITCH_OPEN | CON_RAW_DATA | CON_MANUAL_SW | CON_WAIT;
/// Control value (manual bit ignored) that permits a manual routing override.
pub const CON_MANUAL_IDLE: u8 = CON_SWITCH_OPEN | CON_RAW_DATA | CON_WAIT;

// ---------------------------------------------------------------------------
// Device type 1 bits
// ---------------------------------------------------------------------------

/// DEV_T1\[7\]: USB on-the-go.
pub const DEV_USB_OTG: u8 = 1 << 7;
/// DEV_T1\[6\]: dedicated charger.
pub const DEV_DEDICATED_CHG: u8 = 1 << 6;
/// DEV_T1\[5\]: USB charging downstream port.
pub const DEV_USB_CHG: u8 = 1 << 5;
/// DEV_T1\[4\]: car-kit charger.
pub const DEV_CAR_KIT: u8 = 1 << 4;
/// DEV_T1\[3\]: UART cable.
pub const DEV_UART: u8 = 1 << 3;
/// DEV_T1\[2\]: USB host/device.
pub const DEV_USB: u8 = 1 << 2;
/// DEV_T1\[1\]: audio type 2 (wired headset).
pub const DEV_AUDIO_2: u8 = 1 << 1;
/// DEV_T1\[0\]: audio type 1 (wired headset with remote).
pub const DEV_AUDIO_1: u8 = 1 << 0;

/// DEV_T1 bits that classify as USB.
pub const DEV_T1_USB_MASK: u8 = DEV_USB_OTG | DEV_USB;
/// DEV_T1 bits that classify as UART.
pub const DEV_T1_UART_MASK: u8 = DEV_UART;
/// DEV_T1 bits that classify as a charger.
pub const DEV_T1_CHARGER_MASK: u8 = DEV_DEDICATED_CHG | DEV_USB_CHG | DEV_CAR_KIT;

// ---------------------------------------------------------------------------
// Device type 2 bits
// ---------------------------------------------------------------------------

/// DEV_T2\[6\]: audio/video cable (desk dock).
pub const DEV_AV: u8 = 1 << 6;
/// DEV_T2\[5\]: TTY converter.
pub const DEV_TTY: u8 = 1 << 5;
/// DEV_T2\[4\]: phone-powered device.
pub const DEV_PPD: u8 = 1 << 4;
/// DEV_T2\[3\]: factory JIG, UART, boot off.
pub const DEV_JIG_UART_OFF: u8 = 1 << 3;
/// DEV_T2\[2\]: factory JIG, UART, boot on (also used by car docks).
pub const DEV_JIG_UART_ON: u8 = 1 << 2;
/// DEV_T2\[1\]: factory JIG, USB, boot off.
pub const DEV_JIG_USB_OFF: u8 = 1 << 1;
/// DEV_T2\[0\]: factory JIG, USB, boot on.
pub const DEV_JIG_USB_ON: u8 = 1 << 0;

/// DEV_T2 bits that classify as USB.
pub const DEV_T2_USB_MASK: u8 = DEV_JIG_USB_OFF | DEV_JIG_USB_ON;
/// DEV_T2 bits that classify as UART.
pub const DEV_T2_UART_MASK: u8 = DEV_JIG_UART_OFF;
/// DEV_T2 bits that classify as JIG.
pub const DEV_T2_JIG_MASK: u8 = DEV_JIG_USB_OFF | DEV_JIG_USB_ON | DEV_JIG_UART_OFF;

// ---------------------------------------------------------------------------
// Manual switch 1 values
//
// D-[7:5] / D+[4:2] / [1:0]
// 000: open all / 001: USB / 010: AUDIO / 011: UART / 100: V_AUDIO
//
// The audio and UART routes also set bits [1:0], so they are written as the
// literal values the part is programmed with rather than built from the
// D-/D+ fields alone.
// ---------------------------------------------------------------------------

/// MANSW1: D+/D- to the V_AUDIO pins.
pub const SW_VAUDIO: u8 = 0x92;
/// MANSW1: D+/D- to the UART pins.
pub const SW_UART: u8 = 0x6D;
/// MANSW1: D+/D- to the AUDIO pins.
pub const SW_AUDIO: u8 = 0x49;
/// MANSW1: D+/D- to the USB host pins.
pub const SW_DHOST: u8 = (1 << 5) | (1 << 2);
/// MANSW1: all open (automatic routing).
pub const SW_AUTO: u8 = 0;

// ---------------------------------------------------------------------------
// Interrupt 1 bits
// ---------------------------------------------------------------------------

/// INT1\[1\]: accessory detached.
pub const INT_DETACH: u8 = 1 << 1;
/// INT1\[0\]: accessory attached.
pub const INT_ATTACH: u8 = 1 << 0;
