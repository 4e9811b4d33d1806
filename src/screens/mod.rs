//! Screens
//!
//! One component per sidebar entry, plus the login form.

mod categories;
mod coupons;
mod dashboard;
mod login;
mod moderation;
mod newsletter;
mod orders;
mod products;
mod staff;
mod users;
mod vendors;

pub use categories::CategoriesScreen;
pub use coupons::CouponsScreen;
pub use dashboard::DashboardScreen;
pub use login::LoginScreen;
pub use moderation::ModerationScreen;
pub use newsletter::NewsletterScreen;
pub use orders::OrdersScreen;
pub use products::ProductsScreen;
pub use staff::{LivreursScreen, ModeratorsScreen};
pub use users::UsersScreen;
pub use vendors::VendorsScreen;
