//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use cloudvault_core::types::{FileId, FolderId};
use cloudvault_service::Vault;
use cloudvault_store::{Fixtures, ManualClock, NoLatency};

// ── Sample drive ids ─────────────────────────────────────────────
pub const DOCUMENTS: &str = "01900000-0000-7000-8000-00000000f001";
pub const WORK: &str = "01900000-0000-7000-8000-00000000f002";
pub const REPORTS: &str = "01900000-0000-7000-8000-00000000f003";
pub const PERSONAL: &str = "01900000-0000-7000-8000-00000000f004";
pub const PHOTOS: &str = "01900000-0000-7000-8000-00000000f005";
pub const VACATION: &str = "01900000-0000-7000-8000-00000000f006";
pub const PROJECTS: &str = "01900000-0000-7000-8000-00000000f007";

pub const WELCOME_PDF: &str = "01900000-0000-7000-8000-00000000a001";
pub const Q1_SUMMARY: &str = "01900000-0000-7000-8000-00000000a002";
pub const ANNUAL_REPORT: &str = "01900000-0000-7000-8000-00000000a003";
pub const BUDGET: &str = "01900000-0000-7000-8000-00000000a004";
pub const PASSPORT: &str = "01900000-0000-7000-8000-00000000a005";
pub const BEACH: &str = "01900000-0000-7000-8000-00000000a006";
pub const OLD_NOTES: &str = "01900000-0000-7000-8000-00000000a009";
pub const PODCAST: &str = "01900000-0000-7000-8000-00000000a010";

pub const SAMPLE_FILES: usize = 10;
pub const SAMPLE_FOLDERS: usize = 7;

pub fn file_id(raw: &str) -> FileId {
    raw.parse().expect("valid file id")
}

pub fn folder_id(raw: &str) -> FolderId {
    raw.parse().expect("valid folder id")
}

/// The instant test clocks start at: after the Q1 link expired, while the
/// beach link (no expiry) is still live.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()
}

/// A vault without latency and with a hand-driven clock.
pub struct TestVault {
    /// The vault under test
    pub vault: Vault,
    /// The clock every service reads
    pub clock: Arc<ManualClock>,
}

impl TestVault {
    /// Seeded with the sample drive
    pub fn new() -> Self {
        Self::with_fixtures(Fixtures::embedded().expect("embedded fixtures parse"))
    }

    /// No records at all
    pub fn empty() -> Self {
        Self::with_fixtures(Fixtures::empty())
    }

    /// Seeded with `fixtures`
    pub fn with_fixtures(fixtures: Fixtures) -> Self {
        let clock = Arc::new(ManualClock::new(epoch()));
        let vault = Vault::builder()
            .fixtures(fixtures)
            .latency(Arc::new(NoLatency))
            .clock(clock.clone())
            .build()
            .expect("vault builds");
        Self { vault, clock }
    }
}
