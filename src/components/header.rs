//! Header Component
//!
//! New-task form. The input locks while a create is in flight, so at most
//! one temporary task exists at a time. The field only clears when the
//! create succeeds; a failed title stays put for another attempt.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::sync::TaskSync;

#[component]
pub fn Header() -> impl IntoView {
    let sync = use_context::<TaskSync<HttpTaskApi>>().expect("TaskSync should be provided");
    let input_locked = sync.input_locked;
    let (title, set_title) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let sync = sync.clone();
        let text = title.get_untracked();
        spawn_local(async move {
            if sync.create(&text).await {
                set_title.set(String::new());
            }
        });
    };

    view! {
        <header class="header">
            <form on:submit=on_submit>
                <input
                    type="text"
                    class="new-task"
                    placeholder="What needs to be done?"
                    prop:value=move || title.get()
                    disabled=move || input_locked.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
            </form>
        </header>
    }
}
