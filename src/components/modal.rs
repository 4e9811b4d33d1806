//! Modal Shell Component
//!
//! Overlay, title bar, error line and save/cancel footer around a form body.

use leptos::prelude::*;

#[component]
pub fn ModalShell(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_submit: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <form
                class="modal"
                on:click=|ev| ev.stop_propagation()
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <div class="modal-header">
                    <h2>{move || title.get()}</h2>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="modal-body">{children()}</div>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="modal-footer">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Labelled text/number input bound to a string getter and a setter
#[component]
pub fn Field(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    #[prop(into, default = "text".to_string())] kind: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<(String, String)>,
) -> impl IntoView {
    let field_name = name.clone();
    view! {
        <label class="form-field">
            <span class="field-label">{label}</span>
            <input
                type=kind
                name=name
                prop:value=move || value.get()
                on:input=move |ev| on_input.run((field_name.clone(), event_target_value(&ev)))
            />
        </label>
    }
}

/// Labelled checkbox
#[component]
pub fn CheckField(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_input: Callback<(String, String)>,
) -> impl IntoView {
    let field_name = name.clone();
    view! {
        <label class="form-field checkbox">
            <input
                type="checkbox"
                name=name
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    on_input.run((field_name.clone(), event_target_checked(&ev).to_string()))
                }
            />
            <span class="field-label">{label}</span>
        </label>
    }
}
