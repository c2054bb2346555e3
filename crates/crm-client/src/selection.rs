//! Row Selection
//!
//! Selected row ids, independent of pagination, and the command buttons they enable.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<u32>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a checkbox change; returns whether the set changed
    pub fn set(&mut self, id: u32, checked: bool) -> bool {
        if checked {
            self.0.insert(id)
        } else {
            self.0.remove(&id)
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The id when exactly one row is selected
    pub fn single(&self) -> Option<u32> {
        if self.0.len() == 1 {
            self.0.iter().next().copied()
        } else {
            None
        }
    }

    pub fn ids(&self) -> Vec<u32> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<u32> for Selection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which command buttons are enabled for a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAvailability {
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
    /// Open the selected user's tasks
    pub tasks: bool,
}

impl CommandAvailability {
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            add: true,
            edit: selection.len() == 1,
            delete: !selection.is_empty(),
            tasks: selection.len() == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_follow_selection() {
        let none = CommandAvailability::from_selection(&Selection::new());
        assert!(!none.delete);
        assert!(!none.edit);
        assert!(none.add);

        let one: Selection = [4].into_iter().collect();
        let commands = CommandAvailability::from_selection(&one);
        assert!(commands.edit && commands.delete && commands.tasks);

        let two: Selection = [4, 9].into_iter().collect();
        let commands = CommandAvailability::from_selection(&two);
        assert!(!commands.edit);
        assert!(commands.delete);
        assert!(!commands.tasks);
    }

    #[test]
    fn test_checkbox_changes() {
        let mut selection = Selection::new();
        assert!(selection.set(3, true));
        assert!(!selection.set(3, true));
        assert_eq!(selection.single(), Some(3));
        assert!(selection.set(1, true));
        assert_eq!(selection.single(), None);
        assert_eq!(selection.ids(), vec![1, 3]);
        assert!(selection.set(3, false));
        assert!(!selection.set(3, false));
        assert_eq!(selection.ids(), vec![1]);
    }
}
