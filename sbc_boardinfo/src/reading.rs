//! Live board readings: temperature, uptime, core voltage, memory.

use serde::Serialize;
use tracing::error;

use sbc_common::config::BoardSources;

use crate::command::execute;
use crate::reader::{BoardModelReader, CpuInfoReader, DataReader, MemInfoReader};

const MEASURE_TEMP: &str = "vcgencmd measure_temp";
const MEASURE_VOLTS: &str = "vcgencmd measure_volts";
const UPTIME: &str = "uptime";

/// Raw readings as reported by the OS tools. Unavailable values are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardReading {
    /// Device-tree model string.
    pub board_name: String,
    /// CPU revision code.
    pub board_version_code: String,
    /// e.g. `temp=48.3'C`
    pub temperature: String,
    pub uptime: String,
    /// e.g. `volt=0.8563V`
    pub core_voltage: String,
    /// `MemTotal:` line.
    pub mem_total: String,
}

impl BoardReading {
    /// Take every reading once. Individual failures are logged by the
    /// collectors and leave the field empty.
    pub fn collect(sources: &BoardSources) -> Self {
        Self {
            board_name: BoardModelReader::with_path(&sources.device_model)
                .read()
                .unwrap_or_default(),
            board_version_code: CpuInfoReader::with_path(&sources.cpu_info)
                .read()
                .unwrap_or_default(),
            temperature: execute(MEASURE_TEMP).unwrap_or_default(),
            uptime: execute(UPTIME).unwrap_or_default(),
            core_voltage: execute(MEASURE_VOLTS).unwrap_or_default(),
            mem_total: MemInfoReader::with_path(&sources.mem_info)
                .read()
                .unwrap_or_default(),
        }
    }

    /// SoC temperature in °C, `0.0` when unavailable or unparsable.
    pub fn temperature_celsius(&self) -> f64 {
        if !self.temperature.contains("temp=") {
            return 0.0;
        }
        let value = self
            .temperature
            .replace("temp=", "")
            .replace("'C", "")
            .replace("°C", "");
        value.trim().parse().unwrap_or_else(|e| {
            error!("Can't convert temperature value '{}': {}", self.temperature, e);
            0.0
        })
    }

    pub fn temperature_fahrenheit(&self) -> f64 {
        self.temperature_celsius() * 1.8 + 32.0
    }

    /// Core voltage in volts, `0.0` when unavailable or unparsable.
    pub fn volt_value(&self) -> f64 {
        if !self.core_voltage.contains("volt=") {
            return 0.0;
        }
        let value = self.core_voltage.replace("volt=", "").replace('V', "");
        value.trim().parse().unwrap_or_else(|e| {
            error!("Can't convert volt value '{}': {}", self.core_voltage, e);
            0.0
        })
    }
}
