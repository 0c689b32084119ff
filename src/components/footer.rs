//! Footer Component
//!
//! Active-task counter, filter links, and the clear-completed button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::models::{active_count, Filter};
use crate::sync::TaskSync;

#[component]
pub fn Footer() -> impl IntoView {
    let sync = use_context::<TaskSync<HttpTaskApi>>().expect("TaskSync should be provided");
    let tasks = sync.tasks;
    let status_filter = sync.status_filter;

    let remaining = move || tasks.with(|t| active_count(t));
    // Mirrors the visible list: with the Active filter on there is nothing
    // to clear, so the button disables.
    let has_visible_completed = move || {
        tasks.with(|t| {
            t.iter()
                .filter(|task| status_filter.get().matches(task))
                .any(|task| task.completed)
        })
    };

    let on_clear = move |_| {
        let sync = sync.clone();
        spawn_local(async move {
            sync.clear_completed().await;
        });
    };

    view! {
        <footer class="footer">
            <span class="task-count">{move || format!("{} items left", remaining())}</span>

            <nav class="filters">
                {Filter::ALL
                    .iter()
                    .map(|&filter| {
                        let link_class = move || {
                            if status_filter.get() == filter {
                                "filter-link selected"
                            } else {
                                "filter-link"
                            }
                        };
                        view! {
                            <a
                                href=filter.href()
                                class=link_class
                                on:click=move |_| status_filter.set(filter)
                            >
                                {filter.label()}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>

            <button
                type="button"
                class="clear-completed"
                disabled=move || !has_visible_completed()
                on:click=on_clear
            >
                "Clear completed"
            </button>
        </footer>
    }
}
