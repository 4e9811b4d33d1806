//! Frontend Models
//!
//! Transient copies of backend-owned records. Unknown fields are ignored and
//! missing ones default, so older backend builds still decode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Anything that shows up as a row on a list screen
pub trait Entity: Clone + 'static {
    fn id(&self) -> &str;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

/// Marketplace account (customer, vendor or admin)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_blocked: bool,
    pub is_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductImage {
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipping {
    pub weight: f64,
    pub dimensions: Dimensions,
    pub free_shipping: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Discount {
    pub percentage: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Short reference to a record embedded in another one
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ref {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "shopName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub category: Option<Ref>,
    pub vendor: Option<Ref>,
    /// pending / approved / rejected
    pub status: String,
    pub featured: bool,
    pub images: Vec<ProductImage>,
    pub tags: Vec<String>,
    pub specifications: Vec<Specification>,
    pub shipping: Option<Shipping>,
    pub discount: Option<Discount>,
    pub rating: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLine {
    pub product: Option<Ref>,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub order_number: String,
    pub customer: Option<Ref>,
    pub items: Vec<OrderLine>,
    pub total_amount: f64,
    /// pending / confirmed / shipped / delivered / cancelled
    pub status: String,
    pub payment_status: String,
    pub livreur: Option<Ref>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(alias = "parent", deserialize_with = "id_or_ref")]
    pub parent_id: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coupon {
    #[serde(alias = "_id")]
    pub id: String,
    pub code: String,
    /// percentage / fixed / free_shipping
    pub promo_type: String,
    pub value: f64,
    pub min_order_amount: f64,
    pub max_uses: Option<u32>,
    pub used_count: u32,
    pub starts_at: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Moderator {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Delivery person
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Livreur {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub zone: String,
    /// available / busy / offline
    pub availability: String,
    pub is_active: bool,
    pub deliveries_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscriber {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub subscribed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendor {
    #[serde(alias = "_id")]
    pub id: String,
    pub shop_name: String,
    pub owner_name: String,
    pub email: String,
    /// pending / active / suspended / rejected
    pub status: String,
    pub commission_rate: f64,
    pub products_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardOverview {
    pub total_users: u64,
    pub total_vendors: u64,
    pub total_products: u64,
    pub total_orders: u64,
    pub revenue: f64,
    pub pending_products: u64,
    pub recent_orders: Vec<Order>,
}

/// Logged-in staff member
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// admin / moderator
    pub role: String,
}

/// A reference field sent either as a bare id or as a populated object
fn id_or_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrRef {
        Id(String),
        Ref(Ref),
    }

    Ok(match Option::<IdOrRef>::deserialize(deserializer)? {
        Some(IdOrRef::Id(id)) => Some(id).filter(|id| !id.is_empty()),
        Some(IdOrRef::Ref(r)) => Some(r.id).filter(|id| !id.is_empty()),
        None => None,
    })
}

impl_entity!(User, Product, Order, Category, Coupon, Moderator, Livreur, Subscriber, Vendor);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_decodes_mongo_shape() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "iPhone 15",
            "price": 999.0,
            "featured": true,
            "vendor": {"_id": "v1", "shopName": "TechHub"},
            "images": [{"url": "a.jpg"}, {"url": "b.jpg", "isPrimary": true}],
            "unknownField": 42
        }))
        .unwrap();

        assert_eq!(product.id(), "p1");
        assert_eq!(product.vendor.as_ref().map(|v| v.name.as_str()), Some("TechHub"));
        assert_eq!(product.primary_image(), Some("b.jpg"));
        assert!(product.shipping.is_none());
    }

    #[test]
    fn test_category_parent_alias() {
        let cat: Category = serde_json::from_value(json!({"_id": "c2", "name": "Phones", "parent": "c1"})).unwrap();
        assert_eq!(cat.parent_id.as_deref(), Some("c1"));
        assert!(cat.attributes.is_empty());

        let populated: Category =
            serde_json::from_value(json!({"_id": "c2", "parent": {"_id": "c1", "name": "Electronics"}})).unwrap();
        assert_eq!(populated.parent_id.as_deref(), Some("c1"));

        let root: Category = serde_json::from_value(json!({"_id": "c1", "parent": null})).unwrap();
        assert_eq!(root.parent_id, None);
    }
}
