//! UI Components
//!
//! Reusable Leptos components and the list/modal hooks the screens share.

mod delete_confirm_button;
mod list_controls;
mod list_editors;
mod modal;
mod use_list;

pub use delete_confirm_button::DeleteConfirmButton;
pub use list_controls::{FilterSelect, ListStatus, Pagination, SearchBox};
pub use list_editors::{ImageEditor, SpecEditor, TagInput};
pub use modal::{CheckField, Field, ModalShell};
pub use use_list::{spawn_action, submit_modal, use_list, ListHandle};
