//! REST Gateways
//!
//! One module per backend resource. Each function is a fixed verb + path
//! over [`ApiClient`], decoding the envelope once and returning typed data.

mod envelope;

pub mod auth;
pub mod categories;
pub mod coupons;
pub mod dashboard;
pub mod livreurs;
pub mod moderation;
pub mod moderators;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod users;
pub mod vendors;

pub use envelope::{ack, decode, decode_keyed, decode_page, unwrap, Page, Stats};

/// `base/id` with the id percent-encoded
fn item_path(base: &str, id: &str) -> String {
    format!(
        "{}/{}",
        base,
        percent_encoding::utf8_percent_encode(id, percent_encoding::NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::item_path;

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("admin/users", "65f0a1"), "admin/users/65f0a1");
        assert_eq!(item_path("admin/users", "a/b"), "admin/users/a%2Fb");
    }
}
