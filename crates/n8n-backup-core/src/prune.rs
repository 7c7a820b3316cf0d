use crate::store::StoreEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneDecision {
    /// Kept as the `n`-th newest entry (1-based).
    Keep { rank: usize },
    Prune,
}

#[derive(Debug, Clone)]
pub struct PruneEntry {
    pub entry: StoreEntry,
    pub decision: PruneDecision,
}

impl PruneEntry {
    pub fn is_kept(&self) -> bool {
        matches!(self.decision, PruneDecision::Keep { .. })
    }
}

/// Apply the keep-newest-N rule to entries already sorted newest first.
///
/// Entries at index `max_backups` and beyond are marked for removal; with
/// `max_backups == 0` every entry is.
pub fn apply_retention(entries: Vec<StoreEntry>, max_backups: usize) -> Vec<PruneEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let decision = if i < max_backups {
                PruneDecision::Keep { rank: i + 1 }
            } else {
                PruneDecision::Prune
            };
            PruneEntry { entry, decision }
        })
        .collect()
}
