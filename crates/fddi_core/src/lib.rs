//! Core domain logic for FDDI planning records.
//! This crate is the single source of truth for record invariants, the JSON
//! wire format and table-per-type persistence.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use codec::{decode, encode, encode_pretty, DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use db::{DbError, DbResult, JournalMode, StoreOptions};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::{
    Activity, AssignIds, Aspect, AspectInfo, ExtensionValue, Extensions, Feature, FeatureTree,
    Kpi, Milestone, MilestoneInfo, Note, Program, Progress, Project, RecordValidationError,
    Status, Subject, Validate,
};
pub use store::{
    RecordStore, SchemaError, SqliteRecordStore, StorageError, StorageResult, StoreError,
    StoreResult, TableRecord,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
