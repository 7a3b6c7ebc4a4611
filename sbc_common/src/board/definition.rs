//! Board catalog vocabulary: board types, form factors, SoCs, CPUs and
//! header pin classes.

use core::fmt;
use serde::Serialize;

// ─── BoardType ──────────────────────────────────────────────────────

/// Board category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardType {
    AllInOneComputer,
    Microcontroller,
    SingleBoardComputer,
    StackOnComputer,
    Unknown,
}

// ─── PiModel ────────────────────────────────────────────────────────

/// Physical form factor (model family).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PiModel {
    Compute,
    ModelA,
    ModelB,
    Pico,
    Zero,
    Unknown,
}

impl PiModel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compute => "Compute Module",
            Self::ModelA => "Model A",
            Self::ModelB => "Model B",
            Self::Pico => "Pico",
            Self::Zero => "Zero",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Compute => {
                "Pi on a 200-pin DDR2-memory-like module for integration in embedded devices"
            }
            Self::ModelA => "Without ethernet connector",
            Self::ModelB => "With ethernet connector",
            Self::Pico => "Microcontroller",
            Self::Zero => "Smaller size and reduced GPIO capabilities",
            Self::Unknown => "",
        }
    }
}

// ─── InstructionSet ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstructionSet {
    #[serde(rename = "ARMv6-M")]
    ArmV6M,
    #[serde(rename = "ARMv6")]
    ArmV6,
    #[serde(rename = "ARMv7")]
    ArmV7,
    #[serde(rename = "ARMv8")]
    ArmV8,
    Unknown,
}

impl InstructionSet {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ArmV6M => "ARMv6-M",
            Self::ArmV6 => "ARMv6",
            Self::ArmV7 => "ARMv7",
            Self::ArmV8 => "ARMv8",
            Self::Unknown => "Unknown",
        }
    }
}

// ─── Soc ────────────────────────────────────────────────────────────

/// System-on-chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Soc {
    Bcm2710A1,
    Bcm2711,
    Bcm2711C0,
    Bcm2712,
    Bcm2835,
    Bcm2836,
    Bcm2837,
    Bcm2837B0,
    Rp2040,
    Rp2350,
    Unknown,
}

impl Soc {
    pub const fn instruction_set(self) -> InstructionSet {
        match self {
            Self::Bcm2710A1
            | Self::Bcm2711
            | Self::Bcm2711C0
            | Self::Bcm2712
            | Self::Bcm2837
            | Self::Bcm2837B0 => InstructionSet::ArmV8,
            Self::Bcm2835 => InstructionSet::ArmV6,
            Self::Bcm2836 => InstructionSet::ArmV7,
            // RP2350 also carries Hazard3 RISC-V cores; the catalog tracks the Arm side.
            Self::Rp2040 | Self::Rp2350 => InstructionSet::ArmV6M,
            Self::Unknown => InstructionSet::Unknown,
        }
    }
}

impl fmt::Display for Soc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bcm2710A1 => "BCM2710A1",
            Self::Bcm2711 => "BCM2711",
            Self::Bcm2711C0 => "BCM2711C0",
            Self::Bcm2712 => "BCM2712",
            Self::Bcm2835 => "BCM2835",
            Self::Bcm2836 => "BCM2836",
            Self::Bcm2837 => "BCM2837",
            Self::Bcm2837B0 => "BCM2837B0",
            Self::Rp2040 => "RP2040",
            Self::Rp2350 => "RP2350",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

// ─── Cpu ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cpu {
    #[serde(rename = "ARM1176JZF-S")]
    Arm1176JzfS,
    #[serde(rename = "Cortex-A53")]
    CortexA53,
    #[serde(rename = "Cortex-A7")]
    CortexA7,
    #[serde(rename = "Cortex-A72")]
    CortexA72,
    #[serde(rename = "Cortex-A76")]
    CortexA76,
    #[serde(rename = "Cortex-M0+")]
    CortexM0Plus,
    #[serde(rename = "Cortex-M33")]
    CortexM33,
    Unknown,
}

impl Cpu {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Arm1176JzfS => "ARM1176JZF-S",
            Self::CortexA53 => "Cortex-A53",
            Self::CortexA7 => "Cortex-A7",
            Self::CortexA72 => "Cortex-A72",
            Self::CortexA76 => "Cortex-A76",
            Self::CortexM0Plus => "Cortex-M0+",
            Self::CortexM33 => "Cortex-M33",
            Self::Unknown => "Unknown",
        }
    }
}

// ─── PinType ────────────────────────────────────────────────────────

/// Electrical class of a header pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinType {
    Power,
    Ground,
    Digital,
    DigitalAndPwm,
    DigitalNoPullDown,
}

impl PinType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Ground => "Ground",
            Self::Digital => "Digital",
            Self::DigitalAndPwm => "Digital and PWM",
            Self::DigitalNoPullDown => "Digital without pulldown",
        }
    }

    /// Display colour as `0xRRGGBB`.
    pub const fn color(self) -> u32 {
        match self {
            Self::Power => 0x99_00_00,
            Self::Ground => 0x00_00_00,
            Self::Digital => 0x00_99_00,
            Self::DigitalAndPwm => 0xff_7f_00,
            Self::DigitalNoPullDown => 0x80_00_80,
        }
    }

    /// True for every class that carries a GPIO line.
    pub const fn is_digital(self) -> bool {
        matches!(
            self,
            Self::Digital | Self::DigitalAndPwm | Self::DigitalNoPullDown
        )
    }
}

// ─── PinFunction ────────────────────────────────────────────────────

/// Alternate function a header pin is known for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinFunction {
    Uart,
    Gpclk,
    I2c,
    Spi,
}

impl PinFunction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uart => "Universal Asynchronous Receiver and Transmitter",
            Self::Gpclk => "General Purpose Clock",
            Self::I2c => "Inter Integrated Circuit",
            Self::Spi => "Serial Peripheral Interface",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Uart => "Asynchronous serial communication protocol",
            Self::Gpclk => "Output a fixed frequency",
            Self::I2c => "Synchronous serial computer bus",
            Self::Spi => "Four-wire serial bus",
        }
    }
}
