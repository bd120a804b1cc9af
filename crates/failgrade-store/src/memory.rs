use crate::{Result, SettingsStore};
use failgrade_types::{QuizId, QuizPolicyConfig};
use std::collections::BTreeMap;

/// Store backed by a map. Used by tests and by hosts that keep settings elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemorySettingsStore {
    rows: BTreeMap<QuizId, bool>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn save(&mut self, quiz: QuizId, enabled: bool) -> Result<()> {
        if enabled {
            self.rows.entry(quiz).or_insert(true);
        } else {
            self.rows.remove(&quiz);
        }
        Ok(())
    }

    fn delete(&mut self, quiz: QuizId) -> Result<()> {
        self.rows.remove(&quiz);
        Ok(())
    }

    fn get(&self, quiz: QuizId) -> Result<Option<QuizPolicyConfig>> {
        Ok(self
            .rows
            .get(&quiz)
            .map(|enabled| QuizPolicyConfig::new(quiz, *enabled)))
    }

    fn load_for_quiz_list(&self, quizzes: &[QuizId]) -> Result<BTreeMap<QuizId, bool>> {
        Ok(quizzes
            .iter()
            .map(|q| (*q, self.rows.get(q).copied().unwrap_or(false)))
            .collect())
    }

    fn row_count(&self, quiz: QuizId) -> Result<usize> {
        Ok(usize::from(self.rows.contains_key(&quiz)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_without_row_is_noop() {
        let mut store = MemorySettingsStore::new();
        store.save(QuizId(1), false).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn enabling_twice_keeps_one_row() {
        let mut store = MemorySettingsStore::new();
        store.save(QuizId(1), true).unwrap();
        store.save(QuizId(1), true).unwrap();
        assert_eq!(store.row_count(QuizId(1)).unwrap(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn bulk_load_fills_missing_with_false() {
        let mut store = MemorySettingsStore::new();
        store.save(QuizId(2), true).unwrap();
        let map = store.load_for_quiz_list(&[QuizId(1), QuizId(2)]).unwrap();
        assert_eq!(map.get(&QuizId(1)), Some(&false));
        assert_eq!(map.get(&QuizId(2)), Some(&true));
    }
}
