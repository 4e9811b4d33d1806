//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::http::ApiClient;
use crate::models::StaffProfile;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Users,
    Products,
    Orders,
    Categories,
    Coupons,
    Moderators,
    Livreurs,
    Vendors,
    Moderation,
    Newsletter,
}

impl Screen {
    pub const ALL: [Screen; 11] = [
        Screen::Dashboard,
        Screen::Users,
        Screen::Products,
        Screen::Orders,
        Screen::Categories,
        Screen::Coupons,
        Screen::Moderators,
        Screen::Livreurs,
        Screen::Vendors,
        Screen::Moderation,
        Screen::Newsletter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Users => "Users",
            Screen::Products => "Products",
            Screen::Orders => "Orders",
            Screen::Categories => "Categories",
            Screen::Coupons => "Coupons",
            Screen::Moderators => "Moderators",
            Screen::Livreurs => "Delivery",
            Screen::Vendors => "Vendors",
            Screen::Moderation => "Moderation",
            Screen::Newsletter => "Newsletter",
        }
    }

    /// Moderators only see the review queue and the catalog
    pub fn visible_to(&self, role: &str) -> bool {
        role == "admin" || matches!(self, Screen::Dashboard | Screen::Moderation | Screen::Products)
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<ApiClient, LocalStorage>,
    config: StoredValue<AppConfig>,
    /// Bumped to make every mounted list refetch
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Logged-in staff member, `None` shows the login form
    pub profile: ReadSignal<Option<StaffProfile>>,
    set_profile: WriteSignal<Option<StaffProfile>>,
    pub screen: ReadSignal<Screen>,
    set_screen: WriteSignal<Screen>,
    /// Last action error shown in the banner
    pub notice: ReadSignal<Option<String>>,
    set_notice: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(client: ApiClient, config: AppConfig) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (profile, set_profile) = signal(None);
        let (screen, set_screen) = signal(Screen::default());
        let (notice, set_notice) = signal(None);
        Self {
            client: StoredValue::new_local(client),
            config: StoredValue::new(config),
            reload_trigger,
            set_reload_trigger,
            profile,
            set_profile,
            screen,
            set_screen,
            notice,
            set_notice,
        }
    }

    /// Cheap clone of the shared client for an async task
    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Trigger a reload of every mounted list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn set_profile(&self, profile: Option<StaffProfile>) {
        self.set_profile.set(profile);
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.with(Option::is_some)
    }

    pub fn navigate(&self, screen: Screen) {
        self.set_notice.set(None);
        self.set_screen.set(screen);
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.set_notice.set(Some(message.into()));
    }

    pub fn dismiss_notice(&self) {
        self.set_notice.set(None);
    }

    /// Clear the token and return to the login form
    pub fn logout(&self) {
        self.client.with_value(|client| client.session().logout());
        self.set_profile.set(None);
        self.set_screen.set(Screen::default());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
