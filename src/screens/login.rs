//! Login Screen

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::auth;
use crate::context::use_app_context;

#[component]
pub fn LoginScreen() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match auth::login(&ctx.client(), &email, &password).await {
                Ok(profile) if profile.role == "admin" || profile.role == "moderator" => {
                    ctx.set_profile(Some(profile));
                }
                Ok(profile) => {
                    log::warn!("[AUTH] Rejected console login for role '{}'", profile.role);
                    ctx.client().session().logout();
                    set_error.set(Some("This account has no console access".to_string()));
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=submit>
                <h1>"Marketplace Console"</h1>
                <label class="form-field">
                    <span class="field-label">"Email"</span>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="field-label">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
