//! `ratatui-kit-core` provides the widgets behind `ratatui-kit`: a sortable, selectable
//! [`table::DataTable`], a labeled [`input_field::InputField`] and a [`theme_switch::ThemeSwitch`]
//! bound to a shared [`preference::ThemePreference`].
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Widgets report what happened through small action enums (and optional callbacks); the caller
//!   owns the data and decides what to do with it.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-kit`, which adds a file-backed
//! preference store. Use this crate directly if you only need the widgets.
//!
//! Every widget follows the same shape:
//! - `handle_event(InputEvent) -> *Action`
//! - `render(area, &mut Buffer, &Theme)`
//!
//! The [`theme::Theme`] comes from [`preference::ThemePreference::theme`], so flipping the
//! preference restyles everything on the next frame.
pub mod error;
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod help;
pub mod input;
pub mod input_field;
pub mod keymap;
pub mod preference;
pub mod render;
pub mod table;
pub mod theme_switch;
pub mod viewport;
