use ward_index::{BalancedIndex, IndexError, OrderedIndex};
use ward_record::{validate_record, PatientId, PatientRecord, Priority, ValidationError};
use ward_sort::{sort_snapshot, SortKey};

use crate::history::DischargeHistory;
use crate::sample::sample_patients;
use crate::stats::Statistics;

/// Errors that can occur during registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Tombstoning has to go through [`Registry::discharge`].
    #[error("patient {0} can only be marked deleted by discharging it")]
    DischargeRequired(PatientId),
}

/// Admission, lookup and discharge over two redundant indices.
///
/// Every structural change is applied to both indices, so they always hold
/// the same live ids. Reads go to the ordered index.
#[derive(Debug, Default)]
pub struct Registry {
    by_id: OrderedIndex,
    balanced: BalancedIndex,
    history: DischargeHistory,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the five sample patients (ids 101 to 105).
    pub fn with_sample_data() -> Self {
        let mut reg = Self::new();
        for patient in sample_patients() {
            if let Err(e) = reg.admit(patient) {
                log::warn!("skipping sample patient: {e}");
            }
        }
        log::info!("sample data loaded with {} patients", reg.len());
        reg
    }

    /// Validate and index a new patient in both trees.
    pub fn admit(&mut self, record: PatientRecord) -> Result<(), RegistryError> {
        validate_record(&record)?;
        let id = record.id();
        self.by_id.insert(record.clone())?;
        if let Err(e) = self.balanced.insert(record) {
            // undo the first insert so the two indices keep the same ids
            if let Err(undo) = self.by_id.purge(id) {
                log::error!("could not roll back patient {id}: {undo}");
            }
            return Err(e.into());
        }
        log::info!("admitted patient {id}");
        Ok(())
    }

    pub fn search(&self, id: PatientId) -> Option<&PatientRecord> {
        self.by_id.search(id)
    }

    /// Edit a live patient in place and mirror the result into the balanced
    /// index.
    ///
    /// An edit that marks the record deleted is undone and reported as
    /// [`RegistryError::DischargeRequired`].
    pub fn amend<R>(
        &mut self,
        id: PatientId,
        f: impl FnOnce(&mut PatientRecord) -> R,
    ) -> Result<R, RegistryError> {
        let edited = self.by_id.modify(id, |r| {
            let before = r.clone();
            let out = f(r);
            if r.is_deleted() {
                *r = before;
                return None;
            }
            Some((out, r.clone()))
        })?;
        let Some((out, updated)) = edited else {
            log::warn!("refusing to tombstone patient {id} outside discharge");
            return Err(RegistryError::DischargeRequired(id));
        };
        self.balanced.modify(id, |r| *r = updated)?;
        Ok(out)
    }

    /// Tombstone the patient, excise it from both indices and append it to
    /// the history. Returns the discharged record.
    pub fn discharge(&mut self, id: PatientId) -> Result<PatientRecord, RegistryError> {
        let discharged = self.by_id.modify(id, |r| {
            r.mark_deleted();
            r.clone()
        })?;
        let mirrored = self.balanced.modify(id, PatientRecord::mark_deleted);

        self.by_id.purge(id)?;
        match mirrored {
            Ok(()) => self.balanced.purge(id)?,
            Err(e) => log::warn!("balanced index out of step on discharge: {e}"),
        }

        self.history.record(discharged.clone());
        log::info!("discharged patient {id}");
        Ok(discharged)
    }

    /// Every live patient, ascending by id.
    pub fn patients(&self) -> Vec<PatientRecord> {
        self.by_id.in_order()
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<PatientRecord> {
        self.by_id.by_priority(priority)
    }

    pub fn by_age_range(&self, min: u32, max: u32) -> Vec<PatientRecord> {
        self.by_id.by_age_range(min, max)
    }

    pub fn by_condition(&self, needle: &str) -> Vec<PatientRecord> {
        self.by_id.by_condition(needle)
    }

    /// Snapshot of every live patient, sorted by `key`.
    pub fn sorted(&self, key: SortKey) -> Vec<PatientRecord> {
        let mut snapshot = self.by_id.in_order();
        sort_snapshot(&mut snapshot, key);
        snapshot
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_patients: self.by_id.size(),
            ordered_height: self.by_id.height(),
            balanced_height: self.balanced.height(),
            balanced: self.balanced.is_balanced(),
            emergency: self.by_id.count_by_priority(Priority::Emergency),
            critical: self.by_id.count_by_priority(Priority::Critical),
            non_critical: self.by_id.count_by_priority(Priority::NonCritical),
            average_priority: self.by_id.average_priority(),
            indices_in_sync: self.indices_in_sync(),
            discharged: self.history.len(),
        }
    }

    /// True when both indices list the same ids in the same order.
    pub fn indices_in_sync(&self) -> bool {
        let a = self.by_id.in_order();
        let b = self.balanced.in_order();
        a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| x.id() == y.id())
    }

    /// Level-order dumps of the ordered and the balanced index.
    pub fn tree_dumps(&self) -> (String, String) {
        (self.by_id.level_order_dump(), self.balanced.level_order_dump())
    }

    pub fn history(&self) -> &DischargeHistory {
        &self.history
    }

    pub fn ordered_index(&self) -> &OrderedIndex {
        &self.by_id
    }

    pub fn balanced_index(&self) -> &BalancedIndex {
        &self.balanced
    }

    pub fn len(&self) -> usize {
        self.by_id.size()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.size() == 0
    }

    /// Drop every indexed patient. The discharge history is kept.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.balanced.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_registry_has_five_patients() {
        let reg = Registry::with_sample_data();
        assert_eq!(reg.len(), 5);
        assert!(reg.indices_in_sync());
        assert_eq!(reg.search(104).map(PatientRecord::name), Some("Alice Brown"));
    }

    #[test]
    fn amend_cannot_tombstone() {
        let mut reg = Registry::with_sample_data();
        assert_eq!(
            reg.amend(103, |r| {
                r.set_condition("Recovered");
                r.mark_deleted();
            }),
            Err(RegistryError::DischargeRequired(103))
        );
        let kept = reg.search(103).expect("still admitted");
        assert_eq!(kept.condition(), "Diabetes");
        assert!(!kept.is_deleted());
        assert_eq!(reg.len(), 5);
        assert!(reg.indices_in_sync());
        assert!(!reg.tree_dumps().1.contains("(D)"));
    }

    #[test]
    fn clear_empties_both_indices() {
        let mut reg = Registry::with_sample_data();
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.balanced_index().is_empty());
        assert!(reg.patients().is_empty());
    }
}
