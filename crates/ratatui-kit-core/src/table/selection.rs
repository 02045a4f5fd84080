use std::collections::BTreeSet;
use std::fmt;

/// How many rows may be selected at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    None,
    Single,
    Multiple,
}

impl SelectionMode {
    pub fn is_selectable(self) -> bool {
        self != SelectionMode::None
    }
}

/// State of the select-all checkbox in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckState {
    pub fn symbol(self) -> &'static str {
        match self {
            CheckState::Unchecked => "[ ]",
            CheckState::Indeterminate => "[-]",
            CheckState::Checked => "[x]",
        }
    }
}

/// Decides whether two rows are the same record, for carrying a selection across
/// [`super::DataTable::set_rows`].
pub struct RowIdentity<T> {
    same: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T> RowIdentity<T> {
    pub fn new(same: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            same: Box::new(same),
        }
    }

    /// Rows are the same when `key` returns equal values, e.g. `RowIdentity::by_key(|u| u.id)`.
    pub fn by_key<K: PartialEq>(key: impl Fn(&T) -> K + 'static) -> Self {
        Self::new(move |a, b| key(a) == key(b))
    }

    pub fn same(&self, a: &T, b: &T) -> bool {
        (self.same)(a, b)
    }
}

impl<T: PartialEq> RowIdentity<T> {
    pub fn by_value() -> Self {
        Self::new(|a: &T, b: &T| a == b)
    }
}

impl<T> fmt::Debug for RowIdentity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowIdentity")
    }
}

/// Selected rows, as indices into the caller's row vector. Iteration is in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSelection {
    rows: BTreeSet<usize>,
}

impl RowSelection {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.rows.is_empty();
        self.rows.clear();
        changed
    }

    /// Toggles row `index` under `mode`. Returns whether the selection changed.
    pub fn toggle(&mut self, mode: SelectionMode, index: usize, row_count: usize) -> bool {
        if index >= row_count {
            return false;
        }
        match mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                let was_selected = self.rows.contains(&index);
                self.rows.clear();
                if !was_selected {
                    self.rows.insert(index);
                }
                true
            }
            SelectionMode::Multiple => {
                if !self.rows.remove(&index) {
                    self.rows.insert(index);
                }
                true
            }
        }
    }

    /// Selects every row, or clears the selection if every row is already selected.
    ///
    /// Only [`SelectionMode::Multiple`] supports this; other modes are left untouched.
    pub fn toggle_all(&mut self, mode: SelectionMode, row_count: usize) -> bool {
        if mode != SelectionMode::Multiple {
            return false;
        }
        if self.rows.len() == row_count {
            return self.clear();
        }
        self.rows = (0..row_count).collect();
        true
    }

    pub fn check_state(&self, row_count: usize) -> CheckState {
        match self.rows.len() {
            0 => CheckState::Unchecked,
            n if n == row_count => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }

    /// Rebuilds the selection against `new_rows`.
    ///
    /// Every selected row in `old_rows` keeps its selection if `identity` finds it in `new_rows`.
    /// Rows that are gone are dropped. Each new row can be claimed by at most one old row.
    pub fn remap<T>(&self, old_rows: &[T], new_rows: &[T], identity: &RowIdentity<T>) -> Self {
        let mut rows = BTreeSet::new();
        for old in self.iter().filter_map(|i| old_rows.get(i)) {
            let found = new_rows
                .iter()
                .enumerate()
                .find(|(j, new)| !rows.contains(j) && identity.same(old, new))
                .map(|(j, _)| j);
            if let Some(j) = found {
                rows.insert(j);
            }
        }
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(s: &RowSelection) -> Vec<usize> {
        s.iter().collect()
    }

    #[test]
    fn single_mode_replaces_and_toggles_off() {
        let mut s = RowSelection::default();
        s.toggle(SelectionMode::Single, 0, 3);
        s.toggle(SelectionMode::Single, 2, 3);
        assert_eq!(selected(&s), vec![2]);
        s.toggle(SelectionMode::Single, 2, 3);
        assert!(s.is_empty());
    }

    #[test]
    fn multiple_mode_toggles_membership() {
        let mut s = RowSelection::default();
        s.toggle(SelectionMode::Multiple, 2, 3);
        s.toggle(SelectionMode::Multiple, 0, 3);
        assert_eq!(selected(&s), vec![0, 2]);
        s.toggle(SelectionMode::Multiple, 2, 3);
        assert_eq!(selected(&s), vec![0]);
    }

    #[test]
    fn none_mode_and_out_of_range_are_noops() {
        let mut s = RowSelection::default();
        assert!(!s.toggle(SelectionMode::None, 0, 3));
        assert!(!s.toggle(SelectionMode::Multiple, 3, 3));
        assert!(s.is_empty());
    }

    #[test]
    fn toggle_all_round_trips_and_reports_check_state() {
        let mut s = RowSelection::default();
        s.toggle(SelectionMode::Multiple, 1, 4);
        assert_eq!(s.check_state(4), CheckState::Indeterminate);
        assert!(s.toggle_all(SelectionMode::Multiple, 4));
        assert_eq!(s.check_state(4), CheckState::Checked);
        assert!(s.toggle_all(SelectionMode::Multiple, 4));
        assert_eq!(s.check_state(4), CheckState::Unchecked);
        assert!(!s.toggle_all(SelectionMode::Single, 4));
    }

    #[test]
    fn remap_keeps_rows_still_present() {
        let identity = RowIdentity::by_key(|r: &(u32, &str)| r.0);
        let old = vec![(1, "a"), (2, "b"), (3, "c")];
        let new = vec![(3, "c2"), (4, "d"), (1, "a2")];
        let mut s = RowSelection::default();
        s.toggle(SelectionMode::Multiple, 0, 3);
        s.toggle(SelectionMode::Multiple, 1, 3);
        s.toggle(SelectionMode::Multiple, 2, 3);
        let remapped = s.remap(&old, &new, &identity);
        assert_eq!(selected(&remapped), vec![0, 2]);
    }
}
