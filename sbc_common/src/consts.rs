//! System-wide constants for the SBC workspace.
//!
//! Single source of truth for default OS source paths and line limits.

/// Kernel CPU information (carries the `Revision` code on Raspberry Pi kernels).
pub const DEFAULT_CPU_INFO_PATH: &str = "/proc/cpuinfo";

/// Device-tree model string (e.g. "Raspberry Pi 4 Model B Rev 1.1").
pub const DEFAULT_DEVICE_MODEL_PATH: &str = "/proc/device-tree/model";

/// Kernel memory information (carries `MemTotal:`).
pub const DEFAULT_MEM_INFO_PATH: &str = "/proc/meminfo";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sbc/runtime.toml";

/// Canonical HAL service name (used for logging).
pub const HAL_SERVICE_NAME: &str = "sbc-hal";

/// Highest BCM line number exposed by any supported SoC (Compute Module: 54 GPIO).
pub const MAX_BCM_LINE: u8 = 53;

/// BCM lines usable when the board could not be identified (40-pin header range).
pub const FALLBACK_BCM_LINES: core::ops::RangeInclusive<u8> = 0..=27;

static_assertions::const_assert!(*FALLBACK_BCM_LINES.end() <= MAX_BCM_LINE);

/// Timeout for shelling out to system utilities, in seconds.
pub const COMMAND_TIMEOUT_SECS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(*FALLBACK_BCM_LINES.end() <= MAX_BCM_LINE);
        assert!(COMMAND_TIMEOUT_SECS > 0);
        assert!(DEFAULT_CPU_INFO_PATH.starts_with("/proc"));
        assert!(DEFAULT_DEVICE_MODEL_PATH.starts_with("/proc"));
        assert!(DEFAULT_MEM_INFO_PATH.starts_with("/proc"));
    }
}
