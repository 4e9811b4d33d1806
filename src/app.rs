//! Marketplace Console App
//!
//! Sidebar layout: navigation on the left, the active screen on the right.
//! Shows the login form until a staff profile is known.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::auth;
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext, Screen};
use crate::http::{ApiClient, FetchTransport};
use crate::screens::{
    CategoriesScreen, CouponsScreen, DashboardScreen, LivreursScreen, LoginScreen, ModerationScreen, ModeratorsScreen,
    NewsletterScreen, OrdersScreen, ProductsScreen, UsersScreen, VendorsScreen,
};
use crate::session::{LocalStorageTokenStore, Session};
use crate::store::CatalogState;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("[APP] Backend at {}", config.api_base_url);

    let session = Session::new(LocalStorageTokenStore::new(config.token_storage_key.clone()));
    let client = ApiClient::new(config.api_base_url.clone(), FetchTransport, session);
    let has_token = client.session().is_authenticated();

    let ctx = AppContext::new(client, config);
    provide_context(ctx);
    provide_context(Store::new(CatalogState::default()));

    // Any 401 ends the session; a failed login attempt is not a session
    ctx.client().session().unauthorized().subscribe(move || {
        if ctx.profile.with_untracked(Option::is_none) {
            return;
        }
        log::warn!("[APP] Session rejected by backend, logging out");
        ctx.logout();
        ctx.notify("Your session has expired. Please sign in again.");
    });

    // Resume a stored session
    if has_token {
        spawn_local(async move {
            match auth::me(&ctx.client()).await {
                Ok(profile) => ctx.set_profile(Some(profile)),
                Err(e) => {
                    log::info!("[APP] Stored token not accepted: {}", e);
                    ctx.client().session().logout();
                }
            }
        });
    }

    view! {
        <Show when=move || ctx.is_logged_in() fallback=|| view! { <LoginScreen /> }>
            <Shell />
        </Show>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let ctx = use_app_context();

    let role = move || ctx.profile.with(|p| p.as_ref().map(|p| p.role.clone()).unwrap_or_default());

    // A moderator landing on an admin-only screen goes back to the dashboard
    let current = move || {
        let screen = ctx.screen.get();
        if screen.visible_to(&role()) { screen } else { Screen::Dashboard }
    };

    view! {
        <div class="app-layout">
            <nav class="sidebar">
                <div class="sidebar-title">"Console"</div>
                {move || {
                    let role = role();
                    Screen::ALL
                        .into_iter()
                        .filter(|s| s.visible_to(&role))
                        .map(|screen| {
                            view! {
                                <button
                                    class="nav-item"
                                    class:active=move || current() == screen
                                    on:click=move |_| ctx.navigate(screen)
                                >
                                    {screen.label()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <div class="sidebar-footer">
                    <span class="profile-name">
                        {move || ctx.profile.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())}
                    </span>
                    <button class="btn-small" title="Reload data" on:click=move |_| ctx.reload()>"↻"</button>
                    <button class="btn-small" on:click=move |_| ctx.logout()>"Log out"</button>
                </div>
            </nav>
            <main class="main-content">
                {move || {
                    ctx.notice
                        .get()
                        .map(|message| {
                            view! {
                                <div class="notice">
                                    <span>{message}</span>
                                    <button class="close-btn" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                                </div>
                            }
                        })
                }}
                {move || match current() {
                    Screen::Dashboard => view! { <DashboardScreen /> }.into_any(),
                    Screen::Users => view! { <UsersScreen /> }.into_any(),
                    Screen::Products => view! { <ProductsScreen /> }.into_any(),
                    Screen::Orders => view! { <OrdersScreen /> }.into_any(),
                    Screen::Categories => view! { <CategoriesScreen /> }.into_any(),
                    Screen::Coupons => view! { <CouponsScreen /> }.into_any(),
                    Screen::Moderators => view! { <ModeratorsScreen /> }.into_any(),
                    Screen::Livreurs => view! { <LivreursScreen /> }.into_any(),
                    Screen::Vendors => view! { <VendorsScreen /> }.into_any(),
                    Screen::Moderation => view! { <ModerationScreen /> }.into_any(),
                    Screen::Newsletter => view! { <NewsletterScreen /> }.into_any(),
                }}
            </main>
        </div>
    }
}
