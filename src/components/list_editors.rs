//! List Field Editors
//!
//! Chip input for tags, key/value rows for specifications and an image list
//! with a primary marker. Each edits a copy and hands it back through
//! `on_change`; the insertion rules live in the list types themselves.

use leptos::prelude::*;

use crate::forms::{ImageList, SpecList, TagList};

/// Chips plus an input; Enter or comma adds, × removes
#[component]
pub fn TagInput(
    #[prop(into)] tags: Signal<TagList>,
    #[prop(into)] on_change: Callback<TagList>,
    #[prop(into, default = "Add tag".to_string())] placeholder: String,
) -> impl IntoView {
    let (draft, set_draft) = signal(String::new());

    let commit = move || {
        let mut list = tags.get_untracked();
        if list.add_many(&draft.get_untracked()) > 0 {
            on_change.run(list);
        }
        set_draft.set(String::new());
    };

    view! {
        <div class="tag-input">
            <For
                each=move || tags.get().as_slice().to_vec()
                key=|tag| tag.clone()
                children=move |tag| {
                    let name = tag.clone();
                    view! {
                        <span class="chip">
                            {tag}
                            <button
                                type="button"
                                class="chip-remove"
                                on:click=move |_| {
                                    let mut list = tags.get_untracked();
                                    if list.remove(&name) {
                                        on_change.run(list);
                                    }
                                }
                            >
                                "×"
                            </button>
                        </span>
                    }
                }
            />
            <input
                type="text"
                class="chip-input"
                placeholder=placeholder
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" || ev.key() == "," {
                        ev.prevent_default();
                        commit();
                    }
                }
                on:blur=move |_| commit()
            />
        </div>
    }
}

#[component]
pub fn SpecEditor(
    #[prop(into)] specs: Signal<SpecList>,
    #[prop(into)] on_change: Callback<SpecList>,
) -> impl IntoView {
    let (key, set_key) = signal(String::new());
    let (value, set_value) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let add = move |_| {
        let mut list = specs.get_untracked();
        match list.add(&key.get_untracked(), &value.get_untracked()) {
            Ok(()) => {
                on_change.run(list);
                set_key.set(String::new());
                set_value.set(String::new());
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="spec-editor">
            {move || {
                specs
                    .get()
                    .as_slice()
                    .iter()
                    .enumerate()
                    .map(|(index, spec)| {
                        view! {
                            <div class="spec-row">
                                <span class="spec-key">{spec.key.clone()}</span>
                                <span class="spec-value">{spec.value.clone()}</span>
                                <button
                                    type="button"
                                    class="chip-remove"
                                    on:click=move |_| {
                                        let mut list = specs.get_untracked();
                                        if list.remove(index).is_some() {
                                            on_change.run(list);
                                        }
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <div class="spec-row new">
                <input
                    type="text"
                    placeholder="Key"
                    prop:value=move || key.get()
                    on:input=move |ev| set_key.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Value"
                    prop:value=move || value.get()
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                />
                <button type="button" class="btn" on:click=add>"Add"</button>
            </div>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
        </div>
    }
}

#[component]
pub fn ImageEditor(
    #[prop(into)] images: Signal<ImageList>,
    #[prop(into)] on_change: Callback<ImageList>,
) -> impl IntoView {
    let (url, set_url) = signal(String::new());

    let add = move |_| {
        let mut list = images.get_untracked();
        if list.add(&url.get_untracked()) {
            on_change.run(list);
            set_url.set(String::new());
        }
    };

    view! {
        <div class="image-editor">
            <div class="image-grid">
                {move || {
                    images
                        .get()
                        .as_slice()
                        .iter()
                        .enumerate()
                        .map(|(index, image)| {
                            let class = if image.is_primary { "image-tile primary" } else { "image-tile" };
                            view! {
                                <div class=class>
                                    <img src=image.url.clone() />
                                    <button
                                        type="button"
                                        class="btn-small"
                                        disabled=image.is_primary
                                        on:click=move |_| {
                                            let mut list = images.get_untracked();
                                            if list.set_primary(index) {
                                                on_change.run(list);
                                            }
                                        }
                                    >
                                        "★"
                                    </button>
                                    <button
                                        type="button"
                                        class="chip-remove"
                                        on:click=move |_| {
                                            let mut list = images.get_untracked();
                                            if list.remove(index).is_some() {
                                                on_change.run(list);
                                            }
                                        }
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="image-add">
                <input
                    type="url"
                    placeholder="Image URL"
                    prop:value=move || url.get()
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="button" class="btn" on:click=add>"Add image"</button>
            </div>
        </div>
    }
}
