//! UI Components
//!
//! Leptos components for the task-list client.

mod error_notification;
mod footer;
mod header;
mod task_item;
mod task_list;

pub use error_notification::ErrorNotification;
pub use footer::Footer;
pub use header::Header;
pub use task_item::TaskItem;
pub use task_list::TaskList;
