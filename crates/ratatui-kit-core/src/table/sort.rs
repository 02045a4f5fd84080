use super::value::CellValue;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort: a column key and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// The sort after a header click on `column`.
    ///
    /// Clicking the column that is currently ascending flips it to descending. Every other click
    /// starts an ascending sort on `column`.
    pub fn after_click(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(s) if s.column == column && s.direction == SortDirection::Ascending => {
                SortState {
                    column: column.to_string(),
                    direction: SortDirection::Descending,
                }
            }
            _ => SortState::ascending(column),
        }
    }
}

/// Compares two sort keys. Nulls go last in both directions.
pub fn compare_for_sort(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => b.compare(a),
        },
    }
}

/// Display order (indices into `keys`) for a stable sort of `keys` in `direction`.
pub fn sorted_order(keys: &[CellValue], direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    // `sort_by` is stable: equal keys keep input order.
    order.sort_by(|&a, &b| compare_for_sort(&keys[a], &keys[b], direction));
    order
}
