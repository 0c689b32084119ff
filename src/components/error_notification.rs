//! Error Notification Component
//!
//! Single transient error banner. Auto-dismisses after a fixed delay; a
//! replacement error restarts the countdown, and the close button clears
//! it immediately.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::sync::{TaskSync, ERROR_DISMISS_MS};

#[component]
pub fn ErrorNotification() -> impl IntoView {
    let sync = use_context::<TaskSync<HttpTaskApi>>().expect("TaskSync should be provided");
    let error = sync.error;
    let epoch = sync.error_epoch;

    // One timer per raised error. The epoch check on wake discards timers
    // belonging to an error that has since been replaced or dismissed.
    Effect::new(move |_| {
        let raised_at = epoch.get();
        if error.get_untracked().is_none() {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(ERROR_DISMISS_MS).await;
            if epoch.get_untracked() == raised_at {
                error.set(None);
            }
        });
    });

    let on_dismiss = move |_| sync.dismiss_error();

    let banner_class = move || {
        if error.get().is_some() {
            "notification"
        } else {
            "notification hidden"
        }
    };

    view! {
        <div class=banner_class>
            <button type="button" class="delete" on:click=on_dismiss></button>
            {move || error.get().map(|e| e.to_string())}
        </div>
    }
}
