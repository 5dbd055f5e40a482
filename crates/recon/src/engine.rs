use keyroll_core::{ArchiveId, ArchiveStore, MasterRecordStore, StagedContentStore};

use crate::classify;
use crate::config::ReconConfig;
use crate::decision::{self, DecisionReport, DecisionSet};
use crate::error::ReconError;
use crate::model::Classification;

/// The reconciliation engine for one database's worth of stores.
///
/// Stateless between calls: classification is a pure read, decision
/// application mutates only the master record set, and cleanup only the
/// staged content. The lifecycle per archive is
/// classify → (human decision) → apply → cleanup, where cleanup is also
/// valid directly after classify when the review is abandoned.
pub struct ReconEngine<'a> {
    archives: &'a dyn ArchiveStore,
    staged: &'a dyn StagedContentStore,
    master: &'a dyn MasterRecordStore,
    config: ReconConfig,
}

impl<'a> ReconEngine<'a> {
    pub fn new(
        archives: &'a dyn ArchiveStore,
        staged: &'a dyn StagedContentStore,
        master: &'a dyn MasterRecordStore,
    ) -> Self {
        Self::with_config(archives, staged, master, ReconConfig::default())
    }

    pub fn with_config(
        archives: &'a dyn ArchiveStore,
        staged: &'a dyn StagedContentStore,
        master: &'a dyn MasterRecordStore,
        config: ReconConfig,
    ) -> Self {
        Self {
            archives,
            staged,
            master,
            config,
        }
    }

    /// Classify every staged row of `archive_id` as New / Match /
    /// Disagreement. Repeatable: a pure read over both stores.
    ///
    /// An archive with no staged content yields an empty classification,
    /// not an error — "nothing to reconcile" is a normal outcome.
    pub fn identify_matching_records(
        &self,
        archive_id: ArchiveId,
    ) -> Result<Classification, ReconError> {
        let table = self.staged.indexed_content(archive_id)?;
        if table.is_empty() {
            return Ok(Classification::default());
        }

        let key_column = self.config.key.resolve(&table.columns)?;

        // The archive record only labels output rows with a file name;
        // a missing archive is tolerated.
        let file_name = self
            .archives
            .archive(archive_id)?
            .map(|a| a.file_name)
            .unwrap_or_default();

        let out = classify::classify_table(archive_id, &file_name, &table, key_column, self.master)?;
        tracing::info!(
            archive = %archive_id,
            rows = out.total(),
            new = out.new_records.len(),
            matches = out.matches.len(),
            disagreements = out.disagreements.len(),
            "classification complete"
        );
        Ok(out)
    }

    /// Apply per-row decisions to the master record set. Unreferenced
    /// records are untouched; each referenced record's `reviewed` flag is
    /// set as its decision is recorded.
    pub fn process_user_decisions(
        &self,
        decisions: &mut DecisionSet,
    ) -> Result<DecisionReport, ReconError> {
        decision::apply(self.master, decisions)
    }

    /// Purge the archive's staged content. Idempotent, and valid on the
    /// cancel path without any decisions having been applied; the master
    /// record set is never touched.
    pub fn cleanup_indexed_content(&self, archive_id: ArchiveId) -> Result<(), ReconError> {
        self.staged.delete_indexed_content(archive_id)?;
        tracing::info!(archive = %archive_id, "staged content purged");
        Ok(())
    }
}
