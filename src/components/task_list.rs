//! Task List Component
//!
//! Renders the tasks matching the current filter, in insertion order.

use leptos::prelude::*;

use crate::api::HttpTaskApi;
use crate::components::TaskItem;
use crate::sync::TaskSync;

#[component]
pub fn TaskList() -> impl IntoView {
    let sync = use_context::<TaskSync<HttpTaskApi>>().expect("TaskSync should be provided");
    let tasks = sync.tasks;
    let status_filter = sync.status_filter;

    let visible = move || tasks.with(|t| status_filter.get().apply(t));

    view! {
        <section class="main">
            <For
                each=visible
                key=|task| task.id
                children=move |task| {
                    view! { <TaskItem task=task/> }
                }
            />
        </section>
    }
}
