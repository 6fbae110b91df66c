//! Read access to stored batch files, groups, contributions and mandates.

use std::collections::HashMap;

use super::error::SepaError;
use super::types::*;

/// Persistence collaborator consumed by the assemblers.
///
/// Implementations return rows in their natural iteration order; the
/// assemblers never re-sort. Queries must be parameterized by the given
/// identifiers, never built from untrusted text.
pub trait BatchStore {
    /// Load one batch file record.
    fn batch_file(&self, id: FileId) -> Result<Option<BatchFile>, SepaError>;

    /// All transaction groups belonging to a batch file.
    fn transaction_groups(&self, file_id: FileId) -> Result<Vec<TransactionGroup>, SepaError>;

    /// All contributions assigned to a transaction group, cancelled ones included.
    fn group_contributions(&self, group_id: GroupId) -> Result<Vec<Contribution>, SepaError>;

    /// The mandate attached to a recurring or single contribution.
    fn mandate_for(&self, entity: MandateEntity) -> Result<Option<Mandate>, SepaError>;
}

/// Insertion-ordered in-memory [`BatchStore`].
///
/// ```
/// use lastschrift::core::*;
/// use rust_decimal_macros::dec;
///
/// let mut store = InMemoryStore::new();
/// store.add_mandate(MandateBuilder::new(1, "M-1", MandateEntity::Single(10)).build());
/// store.add_contribution(5, ContributionBuilder::new(10, "Jane Doe", dec!(25)).build());
/// assert_eq!(store.group_contributions(5).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    files: Vec<BatchFile>,
    groups: Vec<TransactionGroup>,
    contributions: Vec<(GroupId, Contribution)>,
    mandates: HashMap<MandateEntity, Mandate>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: BatchFile) -> &mut Self {
        self.files.push(file);
        self
    }

    pub fn add_group(&mut self, group: TransactionGroup) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Assign a contribution to a transaction group.
    pub fn add_contribution(&mut self, group_id: GroupId, contribution: Contribution) -> &mut Self {
        self.contributions.push((group_id, contribution));
        self
    }

    /// Store a mandate under its entity, replacing any previous one.
    pub fn add_mandate(&mut self, mandate: Mandate) -> &mut Self {
        self.mandates.insert(mandate.entity, mandate);
        self
    }
}

impl BatchStore for InMemoryStore {
    fn batch_file(&self, id: FileId) -> Result<Option<BatchFile>, SepaError> {
        Ok(self.files.iter().find(|f| f.id == id).cloned())
    }

    fn transaction_groups(&self, file_id: FileId) -> Result<Vec<TransactionGroup>, SepaError> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.file_id == file_id)
            .cloned()
            .collect())
    }

    fn group_contributions(&self, group_id: GroupId) -> Result<Vec<Contribution>, SepaError> {
        Ok(self
            .contributions
            .iter()
            .filter(|(g, _)| *g == group_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    fn mandate_for(&self, entity: MandateEntity) -> Result<Option<Mandate>, SepaError> {
        Ok(self.mandates.get(&entity).cloned())
    }
}
