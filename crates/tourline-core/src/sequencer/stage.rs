use crate::script::Action;

/// Maps an action to the human-readable stage it belongs to
///
/// Advisory only: labels never affect control flow.
pub trait StageLabeler: Send {
    fn label(&self, index: usize, action: &Action) -> Option<String>;
}

/// Stage labels keyed by the index where each stage begins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTable {
    entries: Vec<(usize, String)>,
}

impl StageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stage starting at `start`; later calls may arrive in any order
    pub fn stage(mut self, start: usize, label: impl Into<String>) -> Self {
        let label = label.into();
        match self.entries.binary_search_by_key(&start, |(s, _)| *s) {
            Ok(pos) => self.entries[pos].1 = label,
            Err(pos) => self.entries.insert(pos, (start, label)),
        }
        self
    }

    /// Label of the stage containing `index`
    pub fn label_for(&self, index: usize) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(start, _)| *start <= index)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StageLabeler for StageTable {
    fn label(&self, index: usize, _action: &Action) -> Option<String> {
        self.label_for(index).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let table = StageTable::new().stage(3, "Middle").stage(0, "Intro").stage(7, "End");

        assert_eq!(table.len(), 3);
        assert_eq!(table.label_for(0), Some("Intro"));
        assert_eq!(table.label_for(2), Some("Intro"));
        assert_eq!(table.label_for(3), Some("Middle"));
        assert_eq!(table.label_for(100), Some("End"));
    }

    #[test]
    fn test_label_before_first_stage() {
        let table = StageTable::new().stage(2, "Later");
        assert_eq!(table.label_for(1), None);
    }

    #[test]
    fn test_table_labels_any_action_by_index() {
        let table = StageTable::new().stage(0, "Intro");
        assert_eq!(table.label(0, &Action::pause(10)).as_deref(), Some("Intro"));
        assert_eq!(table.label(0, &Action::speak("hi", 10)).as_deref(), Some("Intro"));
    }
}
