//! Digital line state and state-change events.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// ─── DigitalState ───────────────────────────────────────────────────

/// Logical state of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DigitalState {
    Low = 0,
    High = 1,
    /// Not yet initialized (no reading or write has happened).
    #[default]
    Unknown = 2,
}

impl DigitalState {
    #[inline]
    pub fn is_high(self) -> bool {
        self == Self::High
    }

    #[inline]
    pub fn is_low(self) -> bool {
        self == Self::Low
    }

    /// High ↔ Low. `Unknown` stays `Unknown`.
    pub fn inverse(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl From<bool> for DigitalState {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl fmt::Display for DigitalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for DigitalState {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "0" | "off" => Ok(Self::Low),
            "high" | "1" | "on" => Ok(Self::High),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("unknown DigitalState: {s:?}")),
        }
    }
}

// ─── DigitalStateChangeEvent ────────────────────────────────────────

/// A state transition on one digital line, as delivered to listeners
/// and bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalStateChangeEvent {
    /// Registry id of the line that changed.
    pub source: String,
    /// BCM line number.
    pub line: u8,
    /// New state.
    pub state: DigitalState,
    /// State before the transition.
    pub previous: DigitalState,
    /// When the transition was observed.
    pub timestamp: SystemTime,
}

impl DigitalStateChangeEvent {
    pub fn new(source: impl Into<String>, line: u8, state: DigitalState, previous: DigitalState) -> Self {
        Self {
            source: source.into(),
            line,
            state,
            previous,
            timestamp: SystemTime::now(),
        }
    }
}

impl fmt::Display for DigitalStateChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (BCM {}): {} -> {}",
            self.source, self.line, self.previous, self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(DigitalState::default(), DigitalState::Unknown);
        assert!(!DigitalState::Unknown.is_high());
        assert!(!DigitalState::Unknown.is_low());
    }

    #[test]
    fn inverse_keeps_unknown() {
        assert_eq!(DigitalState::High.inverse(), DigitalState::Low);
        assert_eq!(DigitalState::Low.inverse(), DigitalState::High);
        assert_eq!(DigitalState::Unknown.inverse(), DigitalState::Unknown);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("HIGH".parse::<DigitalState>().unwrap(), DigitalState::High);
        assert_eq!("off".parse::<DigitalState>().unwrap(), DigitalState::Low);
        assert!("floating".parse::<DigitalState>().is_err());
    }

    #[test]
    fn event_display() {
        let event = DigitalStateChangeEvent::new("led", 17, DigitalState::High, DigitalState::Low);
        assert_eq!(event.to_string(), "led (BCM 17): low -> high");
    }
}
