//! Board catalog: static descriptor table and lookups.
//!
//! The catalog is a read-only table built at compile time. Lookups are
//! linear scans; the table has a few dozen entries.
//!
//! Two lookup channels with different ambiguity policies:
//! - [`Catalog::lookup_by_code`]: exact revision code. More than one match is
//!   a catalog-integrity violation and is returned as
//!   [`CatalogError::AmbiguousCode`].
//! - [`Catalog::lookup_by_name`]: case-insensitive label prefix of the
//!   device-tree model string. More than one match is logged and the first
//!   in catalog order wins.

use core::fmt;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

use super::definition::{BoardType, Cpu, PiModel, Soc};
use super::header::HeaderVersion;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

// ─── Errors ─────────────────────────────────────────────────────────

/// Catalog integrity errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A revision code is listed by more than one descriptor.
    #[error("too many matching models found for code {code}: {matches:?}")]
    AmbiguousCode {
        code: String,
        matches: Vec<&'static str>,
    },

    /// Two descriptors share a symbolic id.
    #[error("duplicate board id {0}")]
    DuplicateId(&'static str),
}

// ─── ReleaseDate ────────────────────────────────────────────────────

/// Calendar date a board was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl ReleaseDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ─── BoardDescriptor ────────────────────────────────────────────────

/// Static identity and hardware data of one board variant.
#[derive(Debug, Serialize)]
pub struct BoardDescriptor {
    /// Unique symbolic id, e.g. `MODEL_4_B`.
    pub id: &'static str,
    /// Human readable label; also the device-tree model prefix.
    pub label: &'static str,
    pub board_type: BoardType,
    /// Hardware revision codes as printed in `/proc/cpuinfo`.
    pub codes: &'static [&'static str],
    pub model: PiModel,
    pub header_version: HeaderVersion,
    /// `None` only for the unknown sentinel.
    pub release_date: Option<ReleaseDate>,
    pub soc: Soc,
    pub cpu: Cpu,
    pub cores: u8,
    /// Shipped clock-speed variants in MHz.
    pub clock_speeds_mhz: &'static [u32],
    /// Shipped memory-size variants in bytes.
    pub memory_bytes: &'static [u64],
    pub remarks: &'static [&'static str],
}

impl BoardDescriptor {
    /// True for the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN.id
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.codes.contains(&code)
    }

    /// Memory variants in MiB.
    pub fn memory_mib(&self) -> Vec<f64> {
        self.memory_bytes
            .iter()
            .map(|b| *b as f64 / MIB as f64)
            .collect()
    }

    /// Memory variants in GiB.
    pub fn memory_gib(&self) -> Vec<f64> {
        self.memory_bytes
            .iter()
            .map(|b| *b as f64 / GIB as f64)
            .collect()
    }

    /// Sorted BCM numbers of every GPIO-capable pin on the board's headers.
    pub fn digital_lines(&self) -> Vec<u8> {
        let mut lines: Vec<u8> = self
            .header_version
            .layouts()
            .iter()
            .flat_map(|layout| layout.pins())
            .filter(|pin| pin.is_digital())
            .filter_map(|pin| pin.bcm)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }
}

impl PartialEq for BoardDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BoardDescriptor {}

impl fmt::Display for BoardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

// ─── Descriptor table ───────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
const fn sbc(
    id: &'static str,
    label: &'static str,
    codes: &'static [&'static str],
    model: PiModel,
    header_version: HeaderVersion,
    release_date: ReleaseDate,
    soc: Soc,
    cpu: Cpu,
    cores: u8,
    clock_speeds_mhz: &'static [u32],
    memory_bytes: &'static [u64],
) -> BoardDescriptor {
    BoardDescriptor {
        id,
        label,
        board_type: BoardType::SingleBoardComputer,
        codes,
        model,
        header_version,
        release_date: Some(release_date),
        soc,
        cpu,
        cores,
        clock_speeds_mhz,
        memory_bytes,
        remarks: &[],
    }
}

const fn typed(mut board: BoardDescriptor, board_type: BoardType) -> BoardDescriptor {
    board.board_type = board_type;
    board
}

const fn remarked(mut board: BoardDescriptor, remarks: &'static [&'static str]) -> BoardDescriptor {
    board.remarks = remarks;
    board
}

use Cpu::{Arm1176JzfS, CortexA53, CortexA7, CortexA72, CortexA76, CortexM0Plus, CortexM33};
use HeaderVersion::{Compute, Type1, Type2, Type3};

pub static MODEL_1_A: BoardDescriptor = sbc(
    "MODEL_1_A", "Raspberry Pi 1 Model A", &["0007", "0008", "0009"],
    PiModel::ModelA, Type1, ReleaseDate::new(2013, 2, 1),
    Soc::Bcm2835, Arm1176JzfS, 1, &[700], &[256 * MIB],
);

pub static MODEL_1_A_PLUS: BoardDescriptor = remarked(
    sbc(
        "MODEL_1_A_PLUS", "Raspberry Pi 1 Model A+", &["0012", "0015", "900021"],
        PiModel::ModelA, Type1, ReleaseDate::new(2014, 11, 1),
        Soc::Bcm2835, Arm1176JzfS, 1, &[700], &[256 * MIB, 512 * MIB],
    ),
    &["Amount of memory changed to 512Mb on 20160810"],
);

pub static MODEL_3_A_PLUS: BoardDescriptor = sbc(
    "MODEL_3_A_PLUS", "Raspberry Pi 3 Model A+", &["9020e0", "9020e1"],
    PiModel::ModelA, Type3, ReleaseDate::new(2018, 11, 1),
    Soc::Bcm2837B0, CortexA53, 4, &[1400], &[512 * MIB],
);

pub static MODEL_1_B: BoardDescriptor = remarked(
    sbc(
        "MODEL_1_B", "Raspberry Pi 1 Model B",
        &["0002", "0003", "0004", "0005", "0006", "000d", "000e", "000f"],
        PiModel::ModelB, Type1, ReleaseDate::new(2012, 4, 1),
        Soc::Bcm2835, Arm1176JzfS, 1, &[700], &[256 * MIB, 512 * MIB],
    ),
    &["Amount of memory changed to 512Mb on 20121015"],
);

pub static MODEL_1_B_PLUS: BoardDescriptor = sbc(
    "MODEL_1_B_PLUS", "Raspberry Pi 1 Model B+", &["0010", "0013", "900032"],
    PiModel::ModelB, Type1, ReleaseDate::new(2014, 7, 1),
    Soc::Bcm2835, Arm1176JzfS, 1, &[700], &[512 * MIB],
);

pub static MODEL_2_B: BoardDescriptor = sbc(
    "MODEL_2_B", "Raspberry Pi 2 Model B", &["a01040", "a01041", "a21041"],
    PiModel::ModelB, Type2, ReleaseDate::new(2015, 2, 1),
    Soc::Bcm2836, CortexA7, 4, &[900], &[GIB],
);

pub static MODEL_2_B_V1_2: BoardDescriptor = sbc(
    "MODEL_2_B_V1_2", "Raspberry Pi 2 Model B V1.2", &["a02042", "a22042"],
    PiModel::ModelB, Type2, ReleaseDate::new(2016, 10, 1),
    Soc::Bcm2837, CortexA53, 4, &[900], &[GIB],
);

pub static MODEL_3_B: BoardDescriptor = sbc(
    "MODEL_3_B", "Raspberry Pi 3 Model B",
    &["a02082", "a22082", "a32082", "a52082", "a22083"],
    PiModel::ModelB, Type3, ReleaseDate::new(2016, 2, 1),
    Soc::Bcm2837, CortexA53, 4, &[1200], &[GIB],
);

pub static MODEL_3_B_PLUS: BoardDescriptor = sbc(
    "MODEL_3_B_PLUS", "Raspberry Pi 3 Model B+", &["a020d3", "a020d4"],
    PiModel::ModelB, Type3, ReleaseDate::new(2018, 3, 14),
    Soc::Bcm2837B0, CortexA53, 4, &[1400], &[GIB],
);

pub static MODEL_4_B: BoardDescriptor = sbc(
    "MODEL_4_B", "Raspberry Pi 4 Model B",
    &[
        "a03111", "b03111", "b03112", "b03114", "b03115", "c03111", "c03112", "c03114",
        "c03115", "d03114", "d03115",
    ],
    PiModel::ModelB, Type3, ReleaseDate::new(2019, 6, 24),
    Soc::Bcm2711, CortexA72, 4, &[1500, 1800], &[GIB, 2 * GIB, 4 * GIB, 8 * GIB],
);

pub static MODEL_400: BoardDescriptor = typed(
    sbc(
        "MODEL_400", "Raspberry Pi 400", &["c03130"],
        PiModel::ModelB, Type3, ReleaseDate::new(2020, 11, 2),
        Soc::Bcm2711C0, CortexA72, 4, &[1800], &[4 * GIB],
    ),
    BoardType::AllInOneComputer,
);

pub static MODEL_5_B: BoardDescriptor = sbc(
    "MODEL_5_B", "Raspberry Pi 5 Model B", &["b04170", "c04170", "d04170"],
    PiModel::ModelB, Type3, ReleaseDate::new(2023, 9, 28),
    Soc::Bcm2712, CortexA76, 4, &[2400], &[2 * GIB, 4 * GIB, 8 * GIB],
);

pub static COMPUTE_1: BoardDescriptor = typed(
    sbc(
        "COMPUTE_1", "Compute Module 1", &["0011", "0014", "900061"],
        PiModel::Compute, Compute, ReleaseDate::new(2014, 4, 1),
        Soc::Bcm2835, Arm1176JzfS, 1, &[700], &[512 * MIB],
    ),
    BoardType::StackOnComputer,
);

pub static COMPUTE_3: BoardDescriptor = typed(
    sbc(
        "COMPUTE_3", "Compute Module 3", &["a020a0", "a220a0"],
        PiModel::Compute, Compute, ReleaseDate::new(2017, 1, 1),
        Soc::Bcm2837, CortexA53, 4, &[1200], &[GIB],
    ),
    BoardType::StackOnComputer,
);

pub static COMPUTE_3_PLUS: BoardDescriptor = typed(
    sbc(
        "COMPUTE_3_PLUS", "Compute Module 3+", &["a02100"],
        PiModel::Compute, Compute, ReleaseDate::new(2019, 1, 1),
        Soc::Bcm2837B0, CortexA53, 4, &[1200], &[GIB],
    ),
    BoardType::StackOnComputer,
);

pub static COMPUTE_4: BoardDescriptor = typed(
    sbc(
        "COMPUTE_4", "Compute Module 4",
        &["a03140", "b03140", "c03140", "d03140", "a03141", "b03141", "c03141", "d03141"],
        PiModel::Compute, Compute, ReleaseDate::new(2020, 10, 1),
        Soc::Bcm2711, CortexA72, 4, &[1500], &[GIB, 2 * GIB, 4 * GIB, 8 * GIB],
    ),
    BoardType::StackOnComputer,
);

// Revision codes not published yet.
pub static COMPUTE_4_SODIMM: BoardDescriptor = typed(
    sbc(
        "COMPUTE_4_SODIMM", "Compute Module 4 SODIMM", &[],
        PiModel::Compute, Compute, ReleaseDate::new(2020, 10, 1),
        Soc::Bcm2711, CortexA72, 4, &[1500], &[GIB, 2 * GIB, 4 * GIB, 8 * GIB],
    ),
    BoardType::StackOnComputer,
);

pub static ZERO_PCB_1_2: BoardDescriptor = sbc(
    "ZERO_PCB_1_2", "Raspberry Pi Zero PCB V1.2", &["900092", "920092"],
    PiModel::Zero, Type3, ReleaseDate::new(2015, 11, 1),
    Soc::Bcm2835, Arm1176JzfS, 1, &[1000], &[512 * MIB],
);

pub static ZERO_PCB_1_3: BoardDescriptor = sbc(
    "ZERO_PCB_1_3", "Raspberry Pi Zero PCB V1.3", &["900093", "920093"],
    PiModel::Zero, Type3, ReleaseDate::new(2016, 5, 1),
    Soc::Bcm2835, Arm1176JzfS, 1, &[1000], &[512 * MIB],
);

pub static ZERO_W: BoardDescriptor = sbc(
    "ZERO_W", "Raspberry Pi Zero W", &["9000c1"],
    PiModel::Zero, Type3, ReleaseDate::new(2017, 2, 28),
    Soc::Bcm2835, Arm1176JzfS, 1, &[1000], &[512 * MIB],
);

pub static ZERO_V2: BoardDescriptor = sbc(
    "ZERO_V2", "Raspberry Pi Zero V2", &["902120"],
    PiModel::Zero, Type3, ReleaseDate::new(2021, 10, 28),
    Soc::Bcm2710A1, CortexA53, 4, &[1000], &[512 * MIB],
);

pub static PICO: BoardDescriptor = typed(
    sbc(
        "PICO", "Raspberry Pi Pico", &[],
        PiModel::Pico, HeaderVersion::Pico, ReleaseDate::new(2021, 1, 1),
        Soc::Rp2040, CortexM0Plus, 1, &[133], &[(264 + 2048) * KIB],
    ),
    BoardType::Microcontroller,
);

pub static PICO_W: BoardDescriptor = remarked(
    typed(
        sbc(
            "PICO_W", "Raspberry Pi Pico W", &[],
            PiModel::Pico, HeaderVersion::Pico, ReleaseDate::new(2022, 6, 1),
            Soc::Rp2040, CortexM0Plus, 1, &[133], &[(264 + 2048) * KIB],
        ),
        BoardType::Microcontroller,
    ),
    &["Same form factor as PICO but with Wi-Fi"],
);

pub static PICO_2: BoardDescriptor = typed(
    sbc(
        "PICO_2", "Raspberry Pi Pico 2", &[],
        PiModel::Pico, HeaderVersion::Pico, ReleaseDate::new(2024, 8, 8),
        Soc::Rp2350, CortexM33, 1, &[150], &[(520 + 4096) * KIB],
    ),
    BoardType::Microcontroller,
);

pub static PICO_2_W: BoardDescriptor = typed(
    sbc(
        "PICO_2_W", "Raspberry Pi Pico 2 W", &[],
        PiModel::Pico, HeaderVersion::Pico, ReleaseDate::new(2024, 8, 8),
        Soc::Rp2350, CortexM33, 1, &[150], &[(520 + 4096) * KIB],
    ),
    BoardType::Microcontroller,
);

/// Sentinel returned when no descriptor matches.
pub static UNKNOWN: BoardDescriptor = BoardDescriptor {
    id: "UNKNOWN",
    label: "Unknown",
    board_type: BoardType::Unknown,
    codes: &[],
    model: PiModel::Unknown,
    header_version: HeaderVersion::Unknown,
    release_date: None,
    soc: Soc::Unknown,
    cpu: Cpu::Unknown,
    cores: 0,
    clock_speeds_mhz: &[],
    memory_bytes: &[],
    remarks: &[],
};

/// Every known board, in catalog order. The unknown sentinel is not listed.
pub static BOARDS: [&BoardDescriptor; 25] = [
    &MODEL_1_A,
    &MODEL_1_A_PLUS,
    &MODEL_3_A_PLUS,
    &MODEL_1_B,
    &MODEL_1_B_PLUS,
    &MODEL_2_B,
    &MODEL_2_B_V1_2,
    &MODEL_3_B,
    &MODEL_3_B_PLUS,
    &MODEL_4_B,
    &MODEL_400,
    &MODEL_5_B,
    &COMPUTE_1,
    &COMPUTE_3,
    &COMPUTE_3_PLUS,
    &COMPUTE_4,
    &COMPUTE_4_SODIMM,
    &ZERO_PCB_1_2,
    &ZERO_PCB_1_3,
    &ZERO_W,
    &ZERO_V2,
    &PICO,
    &PICO_W,
    &PICO_2,
    &PICO_2_W,
];

// ─── Catalog ────────────────────────────────────────────────────────

/// Lookup view over a descriptor table.
///
/// [`Catalog::builtin`] wraps [`BOARDS`]; other tables are only useful for
/// exercising the integrity checks.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    boards: &'static [&'static BoardDescriptor],
}

impl Catalog {
    pub const fn new(boards: &'static [&'static BoardDescriptor]) -> Self {
        Self { boards }
    }

    pub const fn builtin() -> Self {
        Self::new(&BOARDS)
    }

    pub fn boards(&self) -> &'static [&'static BoardDescriptor] {
        self.boards
    }

    /// Exact revision-code lookup.
    ///
    /// # Errors
    /// `CatalogError::AmbiguousCode` if more than one descriptor lists `code`.
    pub fn lookup_by_code(&self, code: &str) -> Result<&'static BoardDescriptor, CatalogError> {
        let matches: Vec<&'static BoardDescriptor> = self
            .boards
            .iter()
            .copied()
            .filter(|board| board.has_code(code))
            .collect();

        match matches.as_slice() {
            [] => Ok(&UNKNOWN),
            [board] => Ok(board),
            _ => Err(CatalogError::AmbiguousCode {
                code: code.to_string(),
                matches: matches.iter().map(|b| b.id).collect(),
            }),
        }
    }

    /// Case-insensitive "name starts with label" lookup.
    ///
    /// Ambiguous names are logged and resolve to the first match.
    pub fn lookup_by_name(&self, name: &str) -> &'static BoardDescriptor {
        let lowered = name.to_lowercase();
        let matches: Vec<&'static BoardDescriptor> = self
            .boards
            .iter()
            .copied()
            .filter(|board| lowered.starts_with(&board.label.to_lowercase()))
            .collect();

        match matches.as_slice() {
            [] => &UNKNOWN,
            [board] => board,
            [first, ..] => {
                warn!(
                    "Too many matching models found for name '{}' ({:?}), the given name is not exclusive enough; using {}",
                    name,
                    matches.iter().map(|b| b.id).collect::<Vec<_>>(),
                    first.id
                );
                first
            }
        }
    }

    /// Every revision code of every descriptor, flattened in catalog order.
    pub fn all_codes(&self) -> Vec<&'static str> {
        self.boards
            .iter()
            .flat_map(|board| board.codes.iter().copied())
            .collect()
    }

    /// Find a descriptor by symbolic id (`"UNKNOWN"` included).
    pub fn find_by_id(&self, id: &str) -> Option<&'static BoardDescriptor> {
        if id == UNKNOWN.id {
            return Some(&UNKNOWN);
        }
        self.boards.iter().copied().find(|board| board.id == id)
    }

    /// Check catalog integrity: unique ids and globally unique codes.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for board in self.boards {
            if !ids.insert(board.id) {
                return Err(CatalogError::DuplicateId(board.id));
            }
        }
        for code in self.all_codes() {
            self.lookup_by_code(code)?;
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// [`Catalog::lookup_by_code`] on the built-in catalog.
pub fn lookup_by_code(code: &str) -> Result<&'static BoardDescriptor, CatalogError> {
    Catalog::builtin().lookup_by_code(code)
}

/// [`Catalog::lookup_by_name`] on the built-in catalog.
pub fn lookup_by_name(name: &str) -> &'static BoardDescriptor {
    Catalog::builtin().lookup_by_name(name)
}

/// Every known board in catalog order (the unknown sentinel excluded).
pub fn all_boards() -> &'static [&'static BoardDescriptor] {
    &BOARDS
}

/// [`Catalog::find_by_id`] on the built-in catalog.
pub fn find_by_id(id: &str) -> Option<&'static BoardDescriptor> {
    Catalog::builtin().find_by_id(id)
}

/// [`Catalog::all_codes`] on the built-in catalog.
pub fn all_codes() -> Vec<&'static str> {
    Catalog::builtin().all_codes()
}

/// [`Catalog::validate`] on the built-in catalog.
pub fn validate_catalog() -> Result<(), CatalogError> {
    Catalog::builtin().validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::definition::InstructionSet;

    static CLASHING: [&BoardDescriptor; 2] = [&MODEL_4_B, &MODEL_4_B];

    #[test]
    fn lookup_by_code_known_boards() {
        assert_eq!(lookup_by_code("d04170").unwrap(), &MODEL_5_B);
        assert_eq!(lookup_by_code("c03130").unwrap(), &MODEL_400);
        assert_eq!(lookup_by_code("a03111").unwrap(), &MODEL_4_B);
        assert_eq!(lookup_by_code("c03112").unwrap(), &MODEL_4_B);
        assert_eq!(lookup_by_code("902120").unwrap(), &ZERO_V2);
        assert_eq!(lookup_by_code("a02042").unwrap(), &MODEL_2_B_V1_2);
        assert_eq!(lookup_by_code("a21041").unwrap(), &MODEL_2_B);
    }

    #[test]
    fn lookup_by_code_unknown_is_sentinel() {
        let board = lookup_by_code("zzzzzz").unwrap();
        assert!(board.is_unknown());
        assert!(lookup_by_code("").unwrap().is_unknown());
    }

    #[test]
    fn lookup_by_code_is_case_sensitive() {
        assert!(lookup_by_code("D04170").unwrap().is_unknown());
    }

    #[test]
    fn every_code_resolves_to_its_descriptor() {
        for board in BOARDS {
            for code in board.codes {
                assert_eq!(lookup_by_code(code).unwrap(), board, "code {code}");
            }
        }
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        assert!(validate_catalog().is_ok());
    }

    #[test]
    fn duplicate_codes_are_reported() {
        let catalog = Catalog::new(&CLASHING);
        let err = catalog.lookup_by_code("a03111").unwrap_err();
        assert_eq!(
            err,
            CatalogError::AmbiguousCode {
                code: "a03111".to_string(),
                matches: vec!["MODEL_4_B", "MODEL_4_B"],
            }
        );
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId("MODEL_4_B"))
        ));
    }

    #[test]
    fn lookup_by_name_prefix_match() {
        assert_eq!(
            lookup_by_name("Raspberry Pi 4 Model B Rev 1.1"),
            &MODEL_4_B
        );
        assert_eq!(lookup_by_name("raspberry pi 5 model b rev 1.0"), &MODEL_5_B);
    }

    #[test]
    fn lookup_by_name_ambiguous_returns_first() {
        // "Model A+" also starts with the "Model A" label.
        assert_eq!(
            lookup_by_name("Raspberry Pi 1 Model A+ Rev 1.1"),
            &MODEL_1_A
        );
    }

    #[test]
    fn lookup_by_name_unknown() {
        assert!(lookup_by_name("Raspberry").is_unknown());
        assert!(lookup_by_name("").is_unknown());
        // The sentinel label never matches.
        assert!(lookup_by_name("Unknown board").is_unknown());
    }

    #[test]
    fn all_codes_flattened() {
        let codes = all_codes();
        let expected: usize = BOARDS.iter().map(|b| b.codes.len()).sum();
        assert_eq!(codes.len(), expected);
        assert_eq!(codes[0], "0007");
        assert!(codes.contains(&"d04170"));
    }

    #[test]
    fn find_by_id_includes_sentinel() {
        assert_eq!(Catalog::builtin().find_by_id("PICO_2"), Some(&PICO_2));
        assert!(Catalog::builtin().find_by_id("UNKNOWN").unwrap().is_unknown());
        assert!(Catalog::builtin().find_by_id("MODEL_9").is_none());
    }

    #[test]
    fn only_sentinel_lacks_release_date() {
        assert!(BOARDS.iter().all(|b| b.release_date.is_some()));
        assert!(UNKNOWN.release_date.is_none());
    }

    #[test]
    fn pico_instruction_set() {
        assert_eq!(PICO.soc.instruction_set(), InstructionSet::ArmV6M);
        assert_eq!(PICO_2.soc.instruction_set(), InstructionSet::ArmV6M);
    }

    #[test]
    fn memory_conversions() {
        assert_eq!(MODEL_4_B.memory_gib(), vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(MODEL_1_B.memory_mib(), vec![256.0, 512.0]);
    }

    #[test]
    fn digital_lines_follow_header() {
        assert_eq!(MODEL_4_B.digital_lines(), (0..=27).collect::<Vec<u8>>());
        // Type 2: 26-pin (rev 2) + 8-pin P5 header.
        let lines = MODEL_2_B.digital_lines();
        assert!(lines.contains(&31));
        assert!(!lines.contains(&0));
        assert!(PICO.digital_lines().is_empty());
        assert!(UNKNOWN.digital_lines().is_empty());
    }

    #[test]
    fn release_date_display() {
        assert_eq!(MODEL_5_B.release_date.unwrap().to_string(), "2023-09-28");
    }
}
