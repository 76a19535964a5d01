//! Standard widgets for Atrium.
//!
//! This module provides the built-in widget set:
//!
//! - [`Label`]: Static text display
//! - [`Button`] and [`TextButton`]: Clickable and toggleable buttons
//! - [`MoveButton`]: A button that drags its parent around
//! - [`Container`]: A plain grouping widget
//! - [`TextBox`]: Single-line text editor
//! - [`TextArea`]: Multi-line text editor with selection
//! - [`ScrollBar`]: Proportional-thumb scroll bar
//! - [`ListBox`]: Scrollable selection list
//! - [`ComboBox`] and [`PopUpMenu`]: Drop-down selection
//!
//! Text-editing widgets share a [`CharFilter`] for restricting input.

mod button;
mod combo_box;
mod container;
mod label;
mod list_box;
mod move_button;
mod popup_menu;
mod scroll_bar;
mod text_area;
mod text_box;
mod text_button;
mod text_edit;

pub use button::Button;
pub use combo_box::ComboBox;
pub use container::Container;
pub use label::Label;
pub use list_box::{ListBox, ListBoxText, ListEntry};
pub use move_button::MoveButton;
pub use popup_menu::PopUpMenu;
pub use scroll_bar::{Orientation, ScrollBar};
pub use text_area::TextArea;
pub use text_box::TextBox;
pub use text_button::TextButton;
pub use text_edit::CharFilter;
