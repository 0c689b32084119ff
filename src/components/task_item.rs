//! Task Item Component
//!
//! One row of the list: completion state, title, delete button, and a
//! loading overlay shown while the row has a remote call in flight.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::models::Task;
use crate::sync::TaskSync;

#[component]
pub fn TaskItem(task: Task) -> impl IntoView {
    let sync = use_context::<TaskSync<HttpTaskApi>>().expect("TaskSync should be provided");
    let loading = sync.loading;
    let id = task.id;

    let row_class = if task.completed { "task completed" } else { "task" };
    let overlay_class = move || {
        if loading.with(|ids| ids.contains(&id)) {
            "overlay active"
        } else {
            "overlay"
        }
    };

    let on_delete = move |_| {
        let sync = sync.clone();
        spawn_local(async move {
            sync.delete(id).await;
        });
    };

    view! {
        <div class=row_class>
            <label class="task-status-label">
                <input type="checkbox" class="task-status" prop:checked=task.completed/>
            </label>

            <span class="task-title">{task.title.clone()}</span>

            <button type="button" class="task-remove" on:click=on_delete>
                "×"
            </button>

            <div class=overlay_class>
                <div class="loader"></div>
            </div>
        </div>
    }
}
