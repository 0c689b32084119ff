//! State Synchronization Engine
//!
//! Keeps the in-memory task list in step with the remote collection:
//! optimistic create with rollback, per-id delete tracking, settle-all bulk
//! delete, and a single transient error slot. All mutation happens back on
//! the single scheduling context after a call resolves, so no locking is
//! involved anywhere.

use futures::future::join_all;
use leptos::prelude::*;

use crate::api::{TaskApi, USER_ID};
use crate::models::{AppError, Filter, NewTask, Task};

/// How long an error notification stays up before dismissing itself.
pub const ERROR_DISMISS_MS: u32 = 3_000;

/// Reactive task-list state plus the remote api used to keep it in sync.
///
/// Provided once via context; every component reads the signals it needs and
/// calls the async operations through a clone.
#[derive(Clone)]
pub struct TaskSync<A> {
    api: A,
    pub tasks: RwSignal<Vec<Task>>,
    pub status_filter: RwSignal<Filter>,
    /// Current error, if any. One slot: a new error replaces the old.
    pub error: RwSignal<Option<AppError>>,
    /// Bumped whenever a new error is raised; the notification timer keys
    /// off it so a replacement error restarts the countdown.
    pub error_epoch: RwSignal<u32>,
    /// True while a create is in flight; locks the new-task input so at most
    /// one temporary task exists at a time.
    pub input_locked: RwSignal<bool>,
    /// Ids with an in-flight remote call (shows the row loader).
    pub loading: RwSignal<Vec<i64>>,
    next_temp_id: RwSignal<i64>,
}

impl<A: TaskApi> TaskSync<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: RwSignal::new(Vec::new()),
            status_filter: RwSignal::new(Filter::All),
            error: RwSignal::new(None),
            error_epoch: RwSignal::new(0),
            input_locked: RwSignal::new(false),
            loading: RwSignal::new(Vec::new()),
            next_temp_id: RwSignal::new(-1),
        }
    }

    /// Fetch the full remote list once. On failure the list stays empty and
    /// a transient error is surfaced.
    pub async fn load(&self) {
        match self.api.list().await {
            Ok(tasks) => self.tasks.set(tasks),
            Err(_) => self.raise(AppError::LoadFailed),
        }
    }

    /// Create a task optimistically.
    ///
    /// Appends a temporary entry, locks the input, then calls the remote
    /// create. On success the temporary entry is replaced in place by the
    /// server's task; on failure it is removed again. Returns whether the
    /// create succeeded so the form knows to clear its input.
    pub async fn create(&self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            self.raise(AppError::EmptyTitle);
            return false;
        }

        let temp_id = self.next_temp_id.get_untracked();
        self.next_temp_id.update(|id| *id -= 1);

        self.tasks.update(|tasks| {
            tasks.push(Task {
                id: temp_id,
                title: title.to_string(),
                completed: false,
                user_id: USER_ID,
            });
        });
        self.mark_loading(temp_id);
        self.input_locked.set(true);

        let payload = NewTask {
            title: title.to_string(),
            completed: false,
            user_id: USER_ID,
        };
        let created = match self.api.create(&payload).await {
            Ok(task) => {
                self.tasks.update(|tasks| {
                    if let Some(slot) = tasks.iter_mut().find(|t| t.id == temp_id) {
                        *slot = task;
                    }
                });
                true
            }
            Err(_) => {
                self.tasks.update(|tasks| tasks.retain(|t| t.id != temp_id));
                self.raise(AppError::CreateFailed);
                false
            }
        };

        self.unmark_loading(temp_id);
        self.input_locked.set(false);
        created
    }

    /// Delete one task. On failure the task stays where it was.
    pub async fn delete(&self, id: i64) {
        self.mark_loading(id);
        match self.api.delete(id).await {
            Ok(()) => self.tasks.update(|tasks| tasks.retain(|t| t.id != id)),
            Err(_) => self.raise(AppError::DeleteFailed),
        }
        self.unmark_loading(id);
    }

    /// Delete every completed task, concurrently, joining only after all
    /// calls settle. Exactly the successful deletions are removed locally;
    /// any number of failures surfaces one aggregate error.
    pub async fn clear_completed(&self) {
        let completed: Vec<i64> = self
            .tasks
            .with_untracked(|tasks| tasks.iter().filter(|t| t.completed).map(|t| t.id).collect());
        if completed.is_empty() {
            return;
        }

        for &id in &completed {
            self.mark_loading(id);
        }

        let results = join_all(
            completed
                .iter()
                .map(|&id| async move { (id, self.api.delete(id).await) }),
        )
        .await;

        let mut deleted = Vec::new();
        let mut any_failed = false;
        for (id, result) in results {
            match result {
                Ok(()) => deleted.push(id),
                Err(_) => any_failed = true,
            }
        }

        self.tasks.update(|tasks| tasks.retain(|t| !deleted.contains(&t.id)));
        if any_failed {
            self.raise(AppError::DeleteFailed);
        }
        for &id in &completed {
            self.unmark_loading(id);
        }
    }

    pub fn dismiss_error(&self) {
        self.error.set(None);
    }

    fn raise(&self, err: AppError) {
        self.error.set(Some(err));
        self.error_epoch.update(|epoch| *epoch += 1);
    }

    fn mark_loading(&self, id: i64) {
        self.loading.update(|ids| {
            if !ids.contains(&id) {
                ids.push(id);
            }
        });
    }

    fn unmark_loading(&self, id: i64) {
        self.loading.update(|ids| ids.retain(|&x| x != id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use leptos::reactive::owner::Owner;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Scripted stand-in for the remote collection.
    #[derive(Clone, Default)]
    struct FakeApi {
        remote: Rc<RefCell<Vec<Task>>>,
        next_id: Rc<Cell<i64>>,
        fail_list: Rc<Cell<bool>>,
        fail_create: Rc<Cell<bool>>,
        fail_delete_ids: Rc<RefCell<Vec<i64>>>,
        calls: Rc<Cell<u32>>,
    }

    impl FakeApi {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            let api = Self::default();
            api.next_id.set(100);
            *api.remote.borrow_mut() = tasks;
            api
        }

        fn fail_delete_of(&self, ids: &[i64]) {
            *self.fail_delete_ids.borrow_mut() = ids.to_vec();
        }
    }

    #[async_trait(?Send)]
    impl TaskApi for FakeApi {
        async fn list(&self) -> Result<Vec<Task>, ApiError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_list.get() {
                return Err(ApiError::Status(500));
            }
            Ok(self.remote.borrow().clone())
        }

        async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_create.get() {
                return Err(ApiError::Status(500));
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let created = Task {
                id,
                title: task.title.clone(),
                completed: task.completed,
                user_id: task.user_id,
            };
            self.remote.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn delete(&self, id: i64) -> Result<(), ApiError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_delete_ids.borrow().contains(&id) {
                return Err(ApiError::Status(500));
            }
            self.remote.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }
    }

    fn make_task(id: i64, completed: bool) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            completed,
            user_id: USER_ID,
        }
    }

    #[tokio::test]
    async fn test_load_populates_list() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false), make_task(2, true)]);
        let sync = TaskSync::new(api);

        sync.load().await;

        assert_eq!(sync.tasks.get_untracked().len(), 2);
        assert_eq!(sync.error.get_untracked(), None);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_list_empty() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false)]);
        api.fail_list.set(true);
        let sync = TaskSync::new(api);

        sync.load().await;

        assert!(sync.tasks.get_untracked().is_empty());
        assert_eq!(sync.error.get_untracked(), Some(AppError::LoadFailed));
    }

    #[tokio::test]
    async fn test_create_resolves_temporary_id() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(Vec::new());
        let sync = TaskSync::new(api);

        let ok = sync.create("  Buy milk  ").await;
        assert!(ok);

        let tasks = sync.tasks.get_untracked();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert!(!tasks[0].is_temporary());
        assert!(!sync.input_locked.get_untracked());
        assert!(sync.loading.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_is_local_error() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false)]);
        let sync = TaskSync::new(api.clone());
        sync.load().await;
        let calls_before = api.calls.get();

        let ok = sync.create("   ").await;

        assert!(!ok);
        assert_eq!(sync.error.get_untracked(), Some(AppError::EmptyTitle));
        assert_eq!(sync.tasks.get_untracked().len(), 1);
        // Validation failed locally; no network call was made.
        assert_eq!(api.calls.get(), calls_before);
    }

    #[tokio::test]
    async fn test_failed_create_rolls_back() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false), make_task(2, true)]);
        let sync = TaskSync::new(api.clone());
        sync.load().await;
        let before = sync.tasks.get_untracked();

        api.fail_create.set(true);
        let ok = sync.create("Doomed").await;

        assert!(!ok);
        assert_eq!(sync.tasks.get_untracked(), before);
        assert_eq!(sync.error.get_untracked(), Some(AppError::CreateFailed));
        assert!(!sync.input_locked.get_untracked());
        assert!(sync.loading.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_on_success() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false), make_task(2, false)]);
        let sync = TaskSync::new(api);
        sync.load().await;

        sync.delete(1).await;

        let ids: Vec<i64> = sync.tasks.get_untracked().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(sync.error.get_untracked(), None);
        assert!(sync.loading.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_task_in_place() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false), make_task(2, false)]);
        api.fail_delete_of(&[1]);
        let sync = TaskSync::new(api);
        sync.load().await;

        sync.delete(1).await;

        let ids: Vec<i64> = sync.tasks.get_untracked().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(sync.error.get_untracked(), Some(AppError::DeleteFailed));
        assert!(sync.loading.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_clear_completed_partial_failure() {
        let owner = Owner::new();
        owner.set();

        // Five completed, one active; deletes of 2 and 4 fail.
        let api = FakeApi::with_tasks(vec![
            make_task(1, true),
            make_task(2, true),
            make_task(3, true),
            make_task(4, true),
            make_task(5, true),
            make_task(6, false),
        ]);
        api.fail_delete_of(&[2, 4]);
        let sync = TaskSync::new(api);
        sync.load().await;

        sync.clear_completed().await;

        let ids: Vec<i64> = sync.tasks.get_untracked().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
        assert_eq!(sync.error.get_untracked(), Some(AppError::DeleteFailed));
        assert!(sync.loading.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_clear_completed_all_succeed() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![
            make_task(1, true),
            make_task(2, false),
            make_task(3, true),
        ]);
        let sync = TaskSync::new(api);
        sync.load().await;

        sync.clear_completed().await;

        let ids: Vec<i64> = sync.tasks.get_untracked().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(sync.error.get_untracked(), None);
    }

    #[tokio::test]
    async fn test_new_error_replaces_old_and_bumps_epoch() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(vec![make_task(1, false)]);
        api.fail_create.set(true);
        api.fail_delete_of(&[1]);
        let sync = TaskSync::new(api);
        sync.load().await;

        sync.create("First").await;
        assert_eq!(sync.error.get_untracked(), Some(AppError::CreateFailed));
        assert_eq!(sync.error_epoch.get_untracked(), 1);

        sync.delete(1).await;
        assert_eq!(sync.error.get_untracked(), Some(AppError::DeleteFailed));
        assert_eq!(sync.error_epoch.get_untracked(), 2);
    }

    #[tokio::test]
    async fn test_dismiss_clears_error() {
        let owner = Owner::new();
        owner.set();

        let api = FakeApi::with_tasks(Vec::new());
        api.fail_list.set(true);
        let sync = TaskSync::new(api);
        sync.load().await;
        assert!(sync.error.get_untracked().is_some());

        sync.dismiss_error();
        assert_eq!(sync.error.get_untracked(), None);
    }
}
