//! `keyroll-core` — Shared types for the keyroll record pipeline.
//!
//! Record and archive types, the field-value payload codec, and the store
//! contracts consumed by the reconciliation engine. No IO dependencies.

pub mod payload;
pub mod record;
pub mod store;

pub use payload::{Field, RecordPayload};
pub use record::{ArchiveId, ArchiveRecord, IndexedRow, MasterRecord, StagedTable};
pub use store::{ArchiveStore, MasterRecordStore, StagedContentStore, StoreError};
