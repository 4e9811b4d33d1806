//! List Screen Controls
//!
//! Search box with debounced commit, pager, status filter and the
//! loading/error line shared by every list screen.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::components::ListHandle;
use crate::context::use_app_context;
use crate::list::{Debouncer, Phase};
use crate::models::Entity;

/// Text input that commits its value after the configured quiet period.
/// Enter commits immediately. When `value` is given, the box follows it, so
/// a search cleared elsewhere also clears the input.
#[component]
pub fn SearchBox(
    #[prop(into)] placeholder: String,
    #[prop(into)] on_commit: Callback<String>,
    #[prop(optional, into)] value: Option<Signal<String>>,
) -> impl IntoView {
    let window_ms = use_app_context().config().search_debounce_ms;
    let debouncer = StoredValue::new(Debouncer::new(u64::from(window_ms)));
    // One pending timer; replacing it drops and cancels the previous one
    let timer = StoredValue::new_local(None::<Timeout>);
    let (raw, set_raw) = signal(String::new());

    if let Some(value) = value {
        Effect::new(move |_| {
            let committed = value.get();
            if debouncer.try_update_value(|d| d.sync(&committed)).unwrap_or(false) {
                timer.set_value(None);
                set_raw.set(committed);
            }
        });
    }

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        set_raw.set(value.clone());
        let Some(ticket) = debouncer.try_update_value(|d| d.push(value)) else {
            return;
        };
        timer.set_value(Some(Timeout::new(window_ms, move || {
            if let Some(Some(term)) = debouncer.try_update_value(|d| d.fire(ticket)) {
                on_commit.run(term);
            }
        })));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            timer.set_value(None);
            if let Some(Some(term)) = debouncer.try_update_value(|d| d.flush()) {
                on_commit.run(term);
            }
        }
    };

    view! {
        <input
            type="search"
            class="search-input"
            placeholder=placeholder
            prop:value=move || raw.get()
            on:input=on_input
            on:keydown=on_keydown
        />
    }
}

/// `<select>` over fixed options; the empty value means "all"
#[component]
pub fn FilterSelect(
    #[prop(into)] label: String,
    options: &'static [&'static str],
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter">
            <span>{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"All"</option>
                {options
                    .iter()
                    .map(|opt| view! { <option value=*opt>{*opt}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Prev/next pager with "page x of y · n results"
#[component]
pub fn Pagination<T: Entity + Send + Sync>(list: ListHandle<T>) -> impl IntoView {
    let page = move || list.state.with(|c| c.page());
    let total_pages = move || list.state.with(|c| c.total_pages().max(1));
    let total = move || list.state.with(|c| c.total());

    view! {
        <div class="pagination">
            <button
                class="page-btn"
                disabled=move || page() <= 1
                on:click=move |_| list.change(|c| c.prev_page())
            >
                "‹"
            </button>
            <span class="page-info">
                {move || format!("Page {} of {} · {} results", page(), total_pages(), total())}
            </span>
            <button
                class="page-btn"
                disabled=move || page() >= total_pages()
                on:click=move |_| list.change(|c| c.next_page())
            >
                "›"
            </button>
            <select
                class="page-size"
                prop:value=move || list.state.with(|c| c.page_size().to_string())
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        list.change(|c| c.set_page_size(size));
                    }
                }
            >
                {[10u32, 20, 50, 100]
                    .into_iter()
                    .map(|n| view! { <option value=n.to_string()>{format!("{} / page", n)}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Loading spinner, error line with retry, or the empty message
#[component]
pub fn ListStatus<T: Entity + Send + Sync>(
    list: ListHandle<T>,
    #[prop(into, default = "Nothing found".to_string())] empty: String,
) -> impl IntoView {
    move || {
        let (phase, is_empty) = list.state.with(|c| (c.phase().clone(), c.items().is_empty()));
        match phase {
            Phase::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
            Phase::Errored(message) => view! {
                <div class="list-error">
                    <span>{message}</span>
                    <button class="btn" on:click=move |_| list.refetch()>"Retry"</button>
                </div>
            }
            .into_any(),
            _ if is_empty => view! { <div class="empty">{empty.clone()}</div> }.into_any(),
            _ => view! { <span></span> }.into_any(),
        }
    }
}
