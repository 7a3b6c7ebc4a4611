//! Derived board capability flags.

use bitflags::bitflags;

use super::catalog::BoardDescriptor;
use super::definition::{BoardType, InstructionSet, PiModel, Soc};
use super::header::HeaderVersion;

bitflags! {
    /// Capability summary of a board, derived purely from its descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BoardCapabilities: u8 {
        /// Board was identified (not the unknown sentinel).
        const KNOWN           = 0x01;
        /// GPIO goes through the RP1 I/O controller (Pi 5).
        const RP1_IO          = 0x02;
        /// SoC implements ARMv8 (64-bit capable).
        const ARM_V8          = 0x04;
        /// Standard 40-pin header.
        const HEADER_40       = 0x08;
        /// Microcontroller, no OS.
        const MICROCONTROLLER = 0x10;
        /// More than one CPU core.
        const MULTI_CORE      = 0x20;
        /// Compute Module form factor.
        const COMPUTE_MODULE  = 0x40;
    }
}

impl Default for BoardCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardCapabilities {
    pub fn of(board: &BoardDescriptor) -> Self {
        let mut caps = Self::empty();
        if board.is_unknown() {
            return caps;
        }
        caps |= Self::KNOWN;
        if board.soc == Soc::Bcm2712 {
            caps |= Self::RP1_IO;
        }
        if board.soc.instruction_set() == InstructionSet::ArmV8 {
            caps |= Self::ARM_V8;
        }
        if board.header_version == HeaderVersion::Type3 {
            caps |= Self::HEADER_40;
        }
        if board.board_type == BoardType::Microcontroller {
            caps |= Self::MICROCONTROLLER;
        }
        if board.cores > 1 {
            caps |= Self::MULTI_CORE;
        }
        if board.model == PiModel::Compute {
            caps |= Self::COMPUTE_MODULE;
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::catalog::{COMPUTE_4, MODEL_1_B, MODEL_5_B, PICO, UNKNOWN};

    #[test]
    fn pi_5_uses_rp1() {
        let caps = BoardCapabilities::of(&MODEL_5_B);
        assert!(caps.contains(
            BoardCapabilities::KNOWN
                | BoardCapabilities::RP1_IO
                | BoardCapabilities::ARM_V8
                | BoardCapabilities::HEADER_40
                | BoardCapabilities::MULTI_CORE
        ));
        assert!(!caps.contains(BoardCapabilities::COMPUTE_MODULE));
    }

    #[test]
    fn legacy_and_compute_boards() {
        let caps = BoardCapabilities::of(&MODEL_1_B);
        assert_eq!(caps, BoardCapabilities::KNOWN);

        let caps = BoardCapabilities::of(&COMPUTE_4);
        assert!(caps.contains(BoardCapabilities::COMPUTE_MODULE));
        assert!(!caps.contains(BoardCapabilities::HEADER_40));
    }

    #[test]
    fn pico_is_single_core_microcontroller() {
        let caps = BoardCapabilities::of(&PICO);
        assert!(caps.contains(BoardCapabilities::MICROCONTROLLER));
        assert!(!caps.contains(BoardCapabilities::MULTI_CORE));
    }

    #[test]
    fn unknown_board_has_no_capabilities() {
        assert!(BoardCapabilities::of(&UNKNOWN).is_empty());
    }
}
