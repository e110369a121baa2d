//! Panel-local todo list.
//!
//! An ordered list of `{text, completed}` items. Every mutation rewrites
//! the whole list under the `todos` key.

pub mod errors;
pub mod list;
pub mod types;

pub use errors::TodoError;
pub use list::TodoList;
pub use types::TodoItem;
