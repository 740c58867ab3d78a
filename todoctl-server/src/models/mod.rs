//! Domain models with validation at construction
//!
//! Titles are trimmed and validated when parsed. Invalid input returns
//! ValidationError, not panic, and the error text is the notice shown
//! to the user.

pub mod list;
pub mod sort;
pub mod title;
pub mod validation;

pub use list::{is_list_completed, is_todo_completed, todos_remaining, Todo, TodoList};
pub use sort::{sort_items, Titled};
pub use title::{ListTitle, TodoTitle, MAX_TITLE_LEN};
pub use validation::{error_for_list_title, error_for_todo, ValidationError};
