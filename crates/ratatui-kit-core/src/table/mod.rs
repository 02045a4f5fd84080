//! Sortable, selectable table over caller-owned rows.
//!
//! A [`DataTable`] is configured with [`Column`] descriptors that read a [`CellValue`] out of each
//! row. Sorting is single-column and stable with absent values last. Selection is tracked by row
//! index and reported in the order rows were supplied, whatever the current sort.

pub mod column;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use column::Column;
pub use selection::CheckState;
pub use selection::RowIdentity;
pub use selection::SelectionMode;
pub use sort::SortDirection;
pub use sort::SortState;
pub use value::CellValue;
pub use view::DataTable;
pub use view::DataTableOptions;
pub use view::RenderMode;
pub use view::TableAction;
pub use view::TableBindings;
