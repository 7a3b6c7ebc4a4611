//! Board resolver.
//!
//! Combines the collectors with the catalog. Resolution never fails: an
//! unidentifiable host resolves to the unknown sentinel with channel
//! [`DetectionChannel::None`].

use core::fmt;
use serde::Serialize;
use tracing::{info, warn};

use sbc_common::board::catalog::{BoardDescriptor, Catalog, UNKNOWN};
use sbc_common::config::{BoardSources, DetectionPrecedence};

use crate::reader::{BoardModelReader, CpuInfoReader, DataReader};

/// Which channel produced the identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionChannel {
    /// Matched on the CPU revision code.
    ByCode,
    /// Matched on the device-tree model string.
    ByName,
    /// Nothing matched.
    None,
}

impl fmt::Display for DetectionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByCode => write!(f, "revision code"),
            Self::ByName => write!(f, "device model"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Outcome of one detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBoardIdentity {
    pub board: &'static BoardDescriptor,
    /// Raw revision code as read, `None` when the collector failed.
    pub cpu_revision: Option<String>,
    /// Raw device model as read, `None` when the collector failed.
    pub device_model: Option<String>,
    pub channel: DetectionChannel,
}

impl ResolvedBoardIdentity {
    pub fn is_known(&self) -> bool {
        !self.board.is_unknown()
    }
}

/// Identifies the host board from the configured sources.
#[derive(Debug, Clone)]
pub struct BoardResolver {
    sources: BoardSources,
    precedence: DetectionPrecedence,
    catalog: Catalog,
}

impl BoardResolver {
    pub fn new(sources: BoardSources, precedence: DetectionPrecedence) -> Self {
        Self {
            sources,
            precedence,
            catalog: Catalog::builtin(),
        }
    }

    /// Resolve against a different descriptor table.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn sources(&self) -> &BoardSources {
        &self.sources
    }

    pub fn precedence(&self) -> DetectionPrecedence {
        self.precedence
    }

    /// Run detection. Both sources are always read so the raw inputs are
    /// recorded whichever channel wins.
    pub fn resolve(&self) -> ResolvedBoardIdentity {
        let cpu_revision = CpuInfoReader::with_path(&self.sources.cpu_info).read().ok();
        let device_model = BoardModelReader::with_path(&self.sources.device_model)
            .read()
            .ok();

        let by_code = || self.match_code(cpu_revision.as_deref());
        let by_name = || self.match_name(device_model.as_deref());

        let matched = match self.precedence {
            DetectionPrecedence::CodeFirst => by_code()
                .map(|b| (b, DetectionChannel::ByCode))
                .or_else(|| by_name().map(|b| (b, DetectionChannel::ByName))),
            DetectionPrecedence::NameFirst => by_name()
                .map(|b| (b, DetectionChannel::ByName))
                .or_else(|| by_code().map(|b| (b, DetectionChannel::ByCode))),
        };

        let (board, channel) = matched.unwrap_or((&UNKNOWN, DetectionChannel::None));

        if board.is_unknown() {
            warn!(
                "Board not identified (revision: {:?}, model: {:?})",
                cpu_revision, device_model
            );
        } else {
            info!("Detected {} by {}", board, channel);
        }

        ResolvedBoardIdentity {
            board,
            cpu_revision,
            device_model,
            channel,
        }
    }

    fn match_code(&self, code: Option<&str>) -> Option<&'static BoardDescriptor> {
        let code = code.filter(|c| !c.is_empty())?;
        match self.catalog.lookup_by_code(code) {
            Ok(board) if !board.is_unknown() => Some(board),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring revision code: {}", e);
                None
            }
        }
    }

    fn match_name(&self, name: Option<&str>) -> Option<&'static BoardDescriptor> {
        let name = name.filter(|n| !n.is_empty())?;
        let board = self.catalog.lookup_by_name(name);
        (!board.is_unknown()).then_some(board)
    }
}

impl Default for BoardResolver {
    fn default() -> Self {
        Self::new(BoardSources::default(), DetectionPrecedence::default())
    }
}
