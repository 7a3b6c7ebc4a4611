//! Runtime context: detected board plus host facts.
//!
//! [`RuntimeContext`] computes [`RuntimeFacts`] lazily, exactly once, and
//! hands out shared snapshots. `reinitialize` recomputes them; detection
//! runs outside the facts lock, so readers observe either the old or the
//! new snapshot and are never blocked by file I/O.

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{info, warn};

use sbc_common::board::capabilities::BoardCapabilities;
use sbc_common::board::catalog::BoardDescriptor;

use crate::reader::{DataReader, MemInfoReader, parse_mem_total_kb};
use crate::resolver::{BoardResolver, ResolvedBoardIdentity};

// ─── Host facts ─────────────────────────────────────────────────────

/// Operating-system identity from `uname(2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatingSystem {
    pub name: String,
    pub version: String,
    pub architecture: String,
}

impl OperatingSystem {
    /// Query the kernel; falls back to compile-time target facts.
    pub fn detect() -> Self {
        match nix::sys::utsname::uname() {
            Ok(uts) => Self {
                name: uts.sysname().to_string_lossy().into_owned(),
                version: uts.release().to_string_lossy().into_owned(),
                architecture: uts.machine().to_string_lossy().into_owned(),
            },
            Err(e) => {
                warn!("uname failed ({}), using build target facts", e);
                Self {
                    name: std::env::consts::OS.to_string(),
                    version: String::new(),
                    architecture: std::env::consts::ARCH.to_string(),
                }
            }
        }
    }
}

/// Facts about this build of the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    /// Crate version.
    pub version: &'static str,
    pub target_os: &'static str,
    pub target_arch: &'static str,
    pub target_family: &'static str,
    /// Pointer width in bits (32 or 64).
    pub pointer_width: u32,
    pub debug_build: bool,
}

impl RuntimeInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            target_os: std::env::consts::OS,
            target_arch: std::env::consts::ARCH,
            target_family: std::env::consts::FAMILY,
            pointer_width: usize::BITS,
            debug_build: cfg!(debug_assertions),
        }
    }
}

// ─── RuntimeFacts ───────────────────────────────────────────────────

/// Immutable snapshot produced by one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeFacts {
    pub board: ResolvedBoardIdentity,
    pub os: OperatingSystem,
    pub runtime: RuntimeInfo,
    /// Total memory reported by the OS in kB, if readable.
    pub mem_total_kb: Option<u64>,
    pub detected_at: SystemTime,
}

impl RuntimeFacts {
    /// Run detection with `resolver` and gather host facts.
    pub fn collect(resolver: &BoardResolver) -> Self {
        let os = OperatingSystem::detect();
        info!("Detected OS: {} {} ({})", os.name, os.version, os.architecture);

        let board = resolver.resolve();
        let mem_total_kb = MemInfoReader::with_path(&resolver.sources().mem_info)
            .read()
            .ok()
            .and_then(|line| parse_mem_total_kb(&line));

        Self {
            board,
            os,
            runtime: RuntimeInfo::current(),
            mem_total_kb,
            detected_at: SystemTime::now(),
        }
    }

    pub fn descriptor(&self) -> &'static BoardDescriptor {
        self.board.board
    }

    /// True unless the board resolved to the unknown sentinel.
    pub fn is_known_board(&self) -> bool {
        self.board.is_known()
    }

    pub fn is_64bit(&self) -> bool {
        self.runtime.pointer_width == 64
    }

    pub fn is_32bit(&self) -> bool {
        !self.is_64bit()
    }

    /// Pi 5 routes GPIO through the RP1 I/O controller.
    pub fn uses_rp1(&self) -> bool {
        self.capabilities().contains(BoardCapabilities::RP1_IO)
    }

    pub fn capabilities(&self) -> BoardCapabilities {
        BoardCapabilities::of(self.board.board)
    }
}

// ─── RuntimeContext ─────────────────────────────────────────────────

/// Lazily-initialized, reinitializable holder of [`RuntimeFacts`].
#[derive(Debug)]
pub struct RuntimeContext {
    facts: RwLock<Option<Arc<RuntimeFacts>>>,
    /// Serializes detection runs.
    init: Mutex<()>,
    resolver: Mutex<BoardResolver>,
}

impl RuntimeContext {
    pub fn new(resolver: BoardResolver) -> Self {
        Self {
            facts: RwLock::new(None),
            init: Mutex::new(()),
            resolver: Mutex::new(resolver),
        }
    }

    /// Current facts, detecting on first call.
    ///
    /// Concurrent first callers block on one detection run and share its
    /// result.
    pub fn current(&self) -> Arc<RuntimeFacts> {
        if let Some(facts) = self.snapshot() {
            return facts;
        }

        let _init = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(facts) = self.snapshot() {
            return facts;
        }
        self.detect_and_store()
    }

    /// Snapshot if detection already ran.
    pub fn snapshot(&self) -> Option<Arc<RuntimeFacts>> {
        self.facts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard the current snapshot and detect again with the same sources.
    pub fn reinitialize(&self) -> Arc<RuntimeFacts> {
        let _init = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        info!("Reinitializing runtime context");
        self.detect_and_store()
    }

    /// Replace the resolver, then detect again.
    pub fn reinitialize_with(&self, resolver: BoardResolver) -> Arc<RuntimeFacts> {
        let _init = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        info!("Reinitializing runtime context with new sources");
        *self.resolver.lock().unwrap_or_else(PoisonError::into_inner) = resolver;
        self.detect_and_store()
    }

    /// Caller must hold `init`.
    fn detect_and_store(&self) -> Arc<RuntimeFacts> {
        let resolver = self
            .resolver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let facts = Arc::new(RuntimeFacts::collect(&resolver));
        *self.facts.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&facts));
        facts
    }
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new(BoardResolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbc_common::board::catalog::{MODEL_4_B, MODEL_5_B};
    use sbc_common::config::{BoardSources, DetectionPrecedence};
    use std::fs;
    use std::path::Path;
    use std::thread;
    use tempfile::TempDir;

    fn resolver_for(dir: &Path, revision: &str) -> BoardResolver {
        fs::write(dir.join("cpuinfo"), format!("Revision\t: {revision}\n")).unwrap();
        fs::write(dir.join("meminfo"), "MemTotal:        8000000 kB\n").unwrap();
        BoardResolver::new(
            BoardSources {
                cpu_info: dir.join("cpuinfo"),
                device_model: dir.join("model"),
                mem_info: dir.join("meminfo"),
            },
            DetectionPrecedence::CodeFirst,
        )
    }

    #[test]
    fn lazy_detection() {
        let dir = TempDir::new().unwrap();
        let context = RuntimeContext::new(resolver_for(dir.path(), "d04170"));
        assert!(context.snapshot().is_none());

        let facts = context.current();
        assert_eq!(facts.descriptor(), &MODEL_5_B);
        assert!(facts.uses_rp1());
        assert_eq!(facts.mem_total_kb, Some(8_000_000));
        assert!(Arc::ptr_eq(&facts, &context.current()));
    }

    #[test]
    fn reinitialize_observes_changed_sources() {
        let dir = TempDir::new().unwrap();
        let context = RuntimeContext::new(resolver_for(dir.path(), "d04170"));
        let before = context.current();

        fs::write(dir.path().join("cpuinfo"), "Revision\t: a03111\n").unwrap();
        assert!(Arc::ptr_eq(&before, &context.current()));

        let after = context.reinitialize();
        assert_eq!(after.descriptor(), &MODEL_4_B);
        assert!(!after.uses_rp1());
        assert!(Arc::ptr_eq(&after, &context.current()));
        assert_eq!(before.descriptor(), &MODEL_5_B);
    }

    #[test]
    fn reinitialize_with_new_resolver() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let context = RuntimeContext::new(resolver_for(first.path(), "d04170"));
        context.current();

        let facts = context.reinitialize_with(resolver_for(second.path(), "a03111"));
        assert_eq!(facts.descriptor(), &MODEL_4_B);
    }

    #[test]
    fn concurrent_first_callers_share_one_snapshot() {
        let dir = TempDir::new().unwrap();
        let context = Arc::new(RuntimeContext::new(resolver_for(dir.path(), "d04170")));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let context = Arc::clone(&context);
                thread::spawn(move || context.current())
            })
            .collect();
        let results: Vec<Arc<RuntimeFacts>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for facts in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], facts));
        }
    }

    #[test]
    fn unknown_board_facts() {
        let dir = TempDir::new().unwrap();
        let context = RuntimeContext::new(resolver_for(dir.path(), "zzzzzz"));
        let facts = context.current();
        assert!(!facts.is_known_board());
        assert!(facts.capabilities().is_empty());
        assert_ne!(facts.is_64bit(), facts.is_32bit());
    }

    #[test]
    fn runtime_info_matches_build() {
        let info = RuntimeInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.pointer_width, usize::BITS);
        assert_eq!(info.debug_build, cfg!(debug_assertions));
    }

    #[test]
    fn operating_system_is_populated() {
        let os = OperatingSystem::detect();
        assert!(!os.name.is_empty());
        assert!(!os.architecture.is_empty());
    }
}
