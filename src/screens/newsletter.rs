//! Newsletter Screen
//!
//! Subscriber list on the left, campaign composer with live preview on the
//! right. The preview uses the same renderer as the send path, so what is
//! shown is what subscribers get.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::newsletter::{self, Subscribers};
use crate::components::{spawn_action, use_list, DeleteConfirmButton, ListStatus, Pagination, SearchBox};
use crate::context::use_app_context;
use crate::forms::{CampaignForm, FormModel};
use crate::list::ListQuery;
use crate::markdown;

#[component]
pub fn NewsletterScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Subscribers, ListQuery::new(ctx.config().default_page_size));

    let remove = move |id: String| {
        spawn_action(ctx, async move { newsletter::delete_subscriber(&ctx.client(), &id).await }, move |_| {
            list.refetch()
        });
    };

    view! {
        <section class="screen newsletter">
            <header class="screen-header">
                <h1>"Newsletter"</h1>
                <div class="stats">
                    <span>{move || format!("{} subscribers", list.state.with(|c| c.total()))}</span>
                    <span>{move || format!("{} active", list.state.with(|c| c.stat("active")))}</span>
                </div>
            </header>
            <div class="split">
                <div class="split-left">
                    <div class="toolbar">
                        <SearchBox
                            placeholder="Search email"
                            on_commit=move |term: String| list.change(|c| c.set_search(&term))
                        />
                    </div>
                    <ListStatus list=list empty="No subscribers yet" />
                    <table class="data-table">
                        <thead>
                            <tr><th>"Email"</th><th>"Since"</th><th></th></tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || list.state.with(|c| c.items().to_vec())
                                key=|s| (s.id.clone(), s.is_active)
                                children=move |subscriber| {
                                    let delete_id = subscriber.id.clone();
                                    view! {
                                        <tr class:inactive={!subscriber.is_active}>
                                            <td>{subscriber.email.clone()}</td>
                                            <td>
                                                {subscriber
                                                    .subscribed_at
                                                    .map(|d| d.format("%Y-%m-%d").to_string())
                                                    .unwrap_or_default()}
                                            </td>
                                            <td class="actions">
                                                <DeleteConfirmButton
                                                    button_class="btn-small btn-danger"
                                                    label="Remove"
                                                    prompt="Remove?"
                                                    on_confirm=move |_| remove(delete_id.clone())
                                                />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Pagination list=list />
                </div>
                <div class="split-right">
                    <CampaignComposer />
                </div>
            </div>
        </section>
    }
}

#[component]
fn CampaignComposer() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(CampaignForm::default());
    let (sending, set_sending) = signal(false);
    let (status, set_status) = signal::<Option<Result<String, String>>>(None);
    let asset_base = ctx.config().asset_base_url;

    let preview = {
        let asset_base = asset_base.clone();
        move || form.with(|f| markdown::render_html(&f.body, &asset_base))
    };

    let send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let campaign = form.get_untracked();
        if let Err(e) = campaign.validate(false) {
            set_status.set(Some(Err(e.to_string())));
            return;
        }
        set_sending.set(true);
        set_status.set(None);
        let asset_base = asset_base.clone();
        spawn_local(async move {
            match newsletter::send_campaign(&ctx.client(), &campaign, &asset_base).await {
                Ok(report) => {
                    set_status.set(Some(Ok(format!("Sent to {} subscribers ({} failed)", report.sent, report.failed))));
                    form.set(CampaignForm::default());
                }
                Err(e) => {
                    log::error!("[NEWSLETTER] Send failed: {}", e);
                    set_status.set(Some(Err(e.user_message())));
                }
            }
            set_sending.set(false);
        });
    };

    view! {
        <form class="campaign-composer" on:submit=send>
            <h2>"New campaign"</h2>
            <label class="form-field">
                <span class="field-label">"Subject"</span>
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.subject.clone())
                    on:input=move |ev| form.update(|f| f.subject = event_target_value(&ev))
                />
            </label>
            <label class="form-field">
                <span class="field-label">"Content (Markdown)"</span>
                <textarea
                    rows="14"
                    prop:value=move || form.with(|f| f.body.clone())
                    on:input=move |ev| form.update(|f| f.body = event_target_value(&ev))
                ></textarea>
            </label>
            <h3>"Preview"</h3>
            <div class="markdown-preview" inner_html=preview></div>
            {move || {
                status
                    .get()
                    .map(|s| match s {
                        Ok(message) => view! { <p class="form-success">{message}</p> }.into_any(),
                        Err(message) => view! { <p class="form-error">{message}</p> }.into_any(),
                    })
            }}
            <button type="submit" class="btn btn-primary" disabled=move || sending.get()>
                {move || if sending.get() { "Sending..." } else { "Send campaign" }}
            </button>
        </form>
    }
}
