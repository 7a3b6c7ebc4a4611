//! Header pin layouts.
//!
//! Static, read-only pin tables for every header variant in the catalog.
//! `HeaderVersion` is what a `BoardDescriptor` references; it expands to
//! one or more `HeaderLayout`s, each an ordered slice of `HeaderPin`s.

use serde::Serialize;

use super::definition::{PinFunction, PinType};

/// One physical pin on a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderPin {
    /// Physical position on the header (1-based).
    pub number: u8,
    pub pin_type: PinType,
    pub function: Option<PinFunction>,
    /// BCM (chip-level) GPIO number.
    pub bcm: Option<u8>,
    /// WiringPi number.
    pub wiring_pi: Option<u8>,
    pub name: &'static str,
    pub remark: &'static str,
}

impl HeaderPin {
    const fn supply(number: u8, pin_type: PinType, name: &'static str) -> Self {
        Self {
            number,
            pin_type,
            function: None,
            bcm: None,
            wiring_pi: None,
            name,
            remark: "",
        }
    }

    const fn gpio(
        number: u8,
        pin_type: PinType,
        function: Option<PinFunction>,
        bcm: u8,
        wiring_pi: u8,
        name: &'static str,
    ) -> Self {
        Self {
            number,
            pin_type,
            function,
            bcm: Some(bcm),
            wiring_pi: Some(wiring_pi),
            name,
            remark: "",
        }
    }

    const fn with_remark(mut self, remark: &'static str) -> Self {
        self.remark = remark;
        self
    }

    /// True when the pin carries a GPIO line.
    pub fn is_digital(&self) -> bool {
        self.pin_type.is_digital() && self.bcm.is_some()
    }
}

use PinFunction::{Gpclk, I2c, Spi, Uart};
use PinType::{Digital, DigitalAndPwm, DigitalNoPullDown, Ground, Power};

static HEADER_8: [HeaderPin; 8] = [
    HeaderPin::supply(1, Power, "5.0 VDC"),
    HeaderPin::supply(2, Power, "3.3 VDC"),
    HeaderPin::gpio(3, Digital, None, 28, 17, ""),
    HeaderPin::gpio(4, Digital, None, 29, 18, ""),
    HeaderPin::gpio(5, Digital, None, 30, 19, ""),
    HeaderPin::gpio(6, Digital, None, 31, 20, ""),
    HeaderPin::supply(7, Ground, "Ground"),
    HeaderPin::supply(8, Ground, "Ground"),
];

/// Pins 1..=26. Revision 1 boards wire pins 3, 5 and 13 to different BCM lines.
const fn header_26(revision: u8) -> [HeaderPin; 26] {
    let type_1 = revision == 1;
    [
        HeaderPin::supply(1, Power, "3.3 VDC"),
        HeaderPin::supply(2, Power, "5.0 VDC"),
        HeaderPin::gpio(3, DigitalNoPullDown, Some(I2c), if type_1 { 0 } else { 2 }, 8, "SDA1 (I2C)")
            .with_remark("SDA.1 pin has a physical pull-up resistor"),
        HeaderPin::supply(4, Power, "5.0 VDC"),
        HeaderPin::gpio(5, DigitalNoPullDown, Some(I2c), if type_1 { 1 } else { 3 }, 9, "SCL1 (I2C)")
            .with_remark("SCL.1 pin has a physical pull-up resistor"),
        HeaderPin::supply(6, Ground, "Ground"),
        HeaderPin::gpio(7, Digital, Some(Gpclk), 4, 7, "GPCLK0"),
        HeaderPin::gpio(8, Digital, Some(Uart), 14, 15, "UART TxD"),
        HeaderPin::supply(9, Ground, "Ground"),
        HeaderPin::gpio(10, Digital, Some(Uart), 15, 16, "UART RxD"),
        HeaderPin::gpio(11, Digital, Some(Spi), 17, 0, ""),
        HeaderPin::gpio(12, DigitalAndPwm, Some(Spi), 18, 1, "PCM_CLK/PWM0")
            .with_remark("Supports PWM0 [ALT5]"),
        HeaderPin::gpio(13, Digital, None, if type_1 { 21 } else { 27 }, 2, ""),
        HeaderPin::supply(14, Ground, "Ground"),
        HeaderPin::gpio(15, Digital, None, 22, 3, ""),
        HeaderPin::gpio(16, Digital, None, 23, 4, ""),
        HeaderPin::supply(17, Power, "3.3 VDC"),
        HeaderPin::gpio(18, Digital, None, 24, 5, ""),
        HeaderPin::gpio(19, Digital, Some(Spi), 10, 12, "MOSI (SPI)"),
        HeaderPin::supply(20, Ground, "Ground"),
        HeaderPin::gpio(21, Digital, Some(Spi), 9, 13, "MISO (SPI)"),
        HeaderPin::gpio(22, Digital, None, 25, 6, ""),
        HeaderPin::gpio(23, Digital, Some(Spi), 11, 14, "SCLK (SPI)"),
        HeaderPin::gpio(24, Digital, Some(Spi), 8, 10, "CE0 (SPI)"),
        HeaderPin::supply(25, Ground, "Ground"),
        HeaderPin::gpio(26, Digital, Some(Spi), 7, 11, "CE1 (SPI)"),
    ]
}

static HEADER_26_TYPE_1: [HeaderPin; 26] = header_26(1);
static HEADER_26_TYPE_2: [HeaderPin; 26] = header_26(2);

/// Pins 27..=40 of the 40-pin header (1..=26 match the revision 2 header).
static HEADER_40_TAIL: [HeaderPin; 14] = [
    HeaderPin::gpio(27, DigitalNoPullDown, Some(I2c), 0, 30, "SDA0 I2C ID EEPROM")
        .with_remark("SDA.0 pin has a physical pull-up resistor"),
    HeaderPin::gpio(28, DigitalNoPullDown, Some(I2c), 1, 31, "SCL0 I2C ID EEPROM")
        .with_remark("SCL.0 pin has a physical pull-up resistor"),
    HeaderPin::gpio(29, Digital, Some(Gpclk), 5, 21, "GPCLK1"),
    HeaderPin::supply(30, Ground, "Ground"),
    HeaderPin::gpio(31, Digital, Some(Gpclk), 6, 22, "GPCLK2"),
    HeaderPin::gpio(32, DigitalAndPwm, None, 12, 26, "PWM0").with_remark("Supports PWM0 [ALT0]"),
    HeaderPin::gpio(33, DigitalAndPwm, None, 13, 23, "PWM1").with_remark("Supports PWM1 [ALT0]"),
    HeaderPin::supply(34, Ground, "Ground"),
    HeaderPin::gpio(35, DigitalAndPwm, Some(Spi), 19, 24, "PCM_FS/PWM1")
        .with_remark("Supports PWM1 [ALT5]"),
    HeaderPin::gpio(36, Digital, Some(Spi), 16, 27, ""),
    HeaderPin::gpio(37, Digital, None, 26, 25, ""),
    HeaderPin::gpio(38, Digital, Some(Spi), 20, 28, "PCM_DIN"),
    HeaderPin::supply(39, Ground, "Ground"),
    HeaderPin::gpio(40, Digital, Some(Spi), 21, 29, "PCM_DOUT"),
];

/// A physical header and its pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    Header8,
    Header26Type1,
    Header26Type2,
    Header40,
    ComputeJ5,
    ComputeJ6,
}

impl HeaderLayout {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Header8 => "8pin header",
            Self::Header26Type1 => "26pin header - type 1",
            Self::Header26Type2 => "26pin header - type 2",
            Self::Header40 => "40pin header",
            Self::ComputeJ5 => "Compute J5",
            Self::ComputeJ6 => "Compute J6",
        }
    }

    /// Ordered pins of this header.
    ///
    /// Compute Module J5/J6 pinouts are not catalogued and yield no pins.
    pub fn pins(self) -> Vec<HeaderPin> {
        match self {
            Self::Header8 => HEADER_8.to_vec(),
            Self::Header26Type1 => HEADER_26_TYPE_1.to_vec(),
            Self::Header26Type2 => HEADER_26_TYPE_2.to_vec(),
            Self::Header40 => HEADER_26_TYPE_2
                .iter()
                .chain(HEADER_40_TAIL.iter())
                .copied()
                .collect(),
            Self::ComputeJ5 | Self::ComputeJ6 => Vec::new(),
        }
    }
}

/// Header generation referenced by a board descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVersion {
    Pico,
    Type1,
    Type2,
    Type3,
    Compute,
    Unknown,
}

impl HeaderVersion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pico => "Pico",
            Self::Type1 => "Type 1",
            Self::Type2 => "Type 2",
            Self::Type3 => "Type 3",
            Self::Compute => "Compute Module",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Pico => "Used on the Pico microcontroller",
            Self::Type1 => "Used on original Model B",
            Self::Type2 => "Used on Model A and Model B (revision 2)",
            Self::Type3 => "Used on Model A+, B+, Pi Zero, Pi Zero W, Pi2B, Pi3B, Pi4B, Pi5B",
            Self::Compute => "54 GPIO",
            Self::Unknown => "",
        }
    }

    pub const fn layouts(self) -> &'static [HeaderLayout] {
        match self {
            Self::Type1 => &[HeaderLayout::Header26Type1],
            Self::Type2 => &[HeaderLayout::Header26Type2, HeaderLayout::Header8],
            Self::Type3 => &[HeaderLayout::Header40],
            Self::Compute => &[HeaderLayout::ComputeJ5, HeaderLayout::ComputeJ6],
            Self::Pico | Self::Unknown => &[],
        }
    }
}
