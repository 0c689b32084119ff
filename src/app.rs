//! Task-list App
//!
//! Root component: builds the sync engine, provides it via context, loads
//! the remote list on mount, and lays out header / list / footer /
//! notification.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::components::{ErrorNotification, Footer, Header, TaskList};
use crate::sync::TaskSync;

#[component]
pub fn App() -> impl IntoView {
    let sync = TaskSync::new(HttpTaskApi::new());
    provide_context(sync.clone());

    // Initial load, once on mount.
    Effect::new({
        let sync = sync.clone();
        move |_| {
            let sync = sync.clone();
            spawn_local(async move {
                sync.load().await;
                let count = sync.tasks.with_untracked(|t| t.len());
                web_sys::console::log_1(&format!("[APP] Loaded {} tasks", count).into());
            });
        }
    });

    let tasks = sync.tasks;
    let has_tasks = move || tasks.with(|t| !t.is_empty());

    view! {
        <div class="taskapp">
            <h1 class="taskapp-title">"tasks"</h1>

            <div class="taskapp-content">
                <Header/>

                <TaskList/>

                <Show when=has_tasks>
                    <Footer/>
                </Show>
            </div>

            <ErrorNotification/>
        </div>
    }
}
