//! `ratatui-kit` bundles the widgets from `ratatui-kit-core` with a file-backed preference store.
//!
//! - [`table::DataTable`]: sortable table with none/single/multiple row selection.
//! - [`input_field::InputField`]: labeled single-line input with clear and show/hide controls.
//! - [`theme_switch::ThemeSwitch`]: toggles the shared [`preference::ThemePreference`].
//!
//! With the default `persist` feature, [`file_store::FileStore`] keeps the theme choice in a TOML
//! file under the platform config directory.
pub use ratatui_kit_core::error;
pub use ratatui_kit_core::help;
pub use ratatui_kit_core::input;
pub use ratatui_kit_core::input_field;
pub use ratatui_kit_core::keymap;
pub use ratatui_kit_core::preference;
pub use ratatui_kit_core::render;
pub use ratatui_kit_core::table;
pub use ratatui_kit_core::theme;
pub use ratatui_kit_core::theme_switch;
pub use ratatui_kit_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_kit_core::crossterm_input;

#[cfg(feature = "persist")]
pub mod file_store;
