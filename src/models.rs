//! Frontend Models
//!
//! Task data and the view-level types shared across components.

use serde::{Deserialize, Serialize};

/// Task data structure (matches the remote collection's JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
}

impl Task {
    /// Temporary tasks carry a client-assigned negative id until the remote
    /// create resolves and swaps in the server-assigned one.
    pub fn is_temporary(&self) -> bool {
        self.id < 0
    }
}

/// Create payload; the server assigns the final id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
}

/// Status filter applied to the visible list. Pure predicate, never mutates
/// the stored tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Display order of the filter links in the footer.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Filter the list, preserving insertion order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Filter::All => "#/",
            Filter::Active => "#/active",
            Filter::Completed => "#/completed",
        }
    }
}

/// Number of tasks still to do (the "items left" counter).
pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

/// User-facing failures. All are transient and non-fatal; the UI surfaces
/// them in a single notification slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    LoadFailed,
    CreateFailed,
    DeleteFailed,
    EmptyTitle,
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            AppError::LoadFailed => "Unable to load tasks",
            AppError::CreateFailed => "Unable to add a task",
            AppError::DeleteFailed => "Unable to delete a task",
            AppError::EmptyTitle => "Title should not be empty",
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for AppError {}
