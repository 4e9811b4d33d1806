//! Product Form
//!
//! Nested fields are addressed through [`ProductField`]. Input elements carry
//! dot-path names (`shipping.dimensions.length`) which parse into the enum,
//! so an unknown path is rejected instead of silently creating a new key.

use std::str::FromStr;

use serde::Serialize;

use super::{parse_bool, parse_number, required, FormModel, ImageList, SpecList, TagList};
use crate::error::FormError;
use crate::models::Product;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsForm {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub weight: f64,
    pub dimensions: DimensionsForm,
    pub free_shipping: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountForm {
    pub percentage: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_date: String,
}

/// Editable product, also the create/update payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sku: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(rename = "category")]
    pub category_id: String,
    pub featured: bool,
    pub tags: TagList,
    pub specifications: SpecList,
    pub images: ImageList,
    pub shipping: ShippingForm,
    pub discount: DiscountForm,
}

impl ProductForm {
    /// Load a record into the form; absent nested parts become defaults
    pub fn from_product(product: &Product) -> Self {
        let shipping = product.shipping.clone().unwrap_or_default();
        let discount = product.discount.clone().unwrap_or_default();
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            sku: product.sku.clone().unwrap_or_default(),
            brand: product.brand.clone().unwrap_or_default(),
            category_id: product.category.as_ref().map(|c| c.id.clone()).unwrap_or_default(),
            featured: product.featured,
            tags: TagList::new(product.tags.clone()),
            specifications: SpecList::new(product.specifications.clone()),
            images: ImageList::new(product.images.clone()),
            shipping: ShippingForm {
                weight: shipping.weight,
                dimensions: DimensionsForm {
                    length: shipping.dimensions.length,
                    width: shipping.dimensions.width,
                    height: shipping.dimensions.height,
                },
                free_shipping: shipping.free_shipping,
            },
            discount: DiscountForm {
                percentage: discount.percentage,
                start_date: discount.start_date.map(|d| d.to_string()).unwrap_or_default(),
                end_date: discount.end_date.map(|d| d.to_string()).unwrap_or_default(),
            },
        }
    }

    /// Set one scalar field from its raw input value
    pub fn set(&mut self, field: ProductField, raw: &str) -> Result<(), FormError> {
        use ProductField::*;
        match field {
            Name => self.name = raw.to_string(),
            Description => self.description = raw.to_string(),
            Price => self.price = parse_number(raw, "price")?,
            Stock => self.stock = parse_number(raw, "stock")?,
            Sku => self.sku = raw.trim().to_string(),
            Brand => self.brand = raw.to_string(),
            Category => self.category_id = raw.to_string(),
            Featured => self.featured = parse_bool(raw),
            ShippingWeight => self.shipping.weight = parse_number(raw, "weight")?,
            ShippingLength => self.shipping.dimensions.length = parse_number(raw, "length")?,
            ShippingWidth => self.shipping.dimensions.width = parse_number(raw, "width")?,
            ShippingHeight => self.shipping.dimensions.height = parse_number(raw, "height")?,
            FreeShipping => self.shipping.free_shipping = parse_bool(raw),
            DiscountPercentage => self.discount.percentage = parse_number(raw, "discount")?,
            DiscountStart => self.discount.start_date = raw.to_string(),
            DiscountEnd => self.discount.end_date = raw.to_string(),
        }
        Ok(())
    }

    /// Dot-path convenience for `name=` attributes
    pub fn set_path(&mut self, path: &str, raw: &str) -> Result<(), FormError> {
        self.set(path.parse()?, raw)
    }
}

impl FormModel for ProductForm {
    fn validate(&self, _editing: bool) -> Result<(), FormError> {
        required(&self.name, "name")?;
        required(&self.description, "description")?;
        required(&self.category_id, "category")
    }
}

/// Every scalar leaf of [`ProductForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Stock,
    Sku,
    Brand,
    Category,
    Featured,
    ShippingWeight,
    ShippingLength,
    ShippingWidth,
    ShippingHeight,
    FreeShipping,
    DiscountPercentage,
    DiscountStart,
    DiscountEnd,
}

impl FromStr for ProductField {
    type Err = FormError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        use ProductField::*;
        Ok(match path {
            "name" => Name,
            "description" => Description,
            "price" => Price,
            "stock" => Stock,
            "sku" => Sku,
            "brand" => Brand,
            "category" => Category,
            "featured" => Featured,
            "shipping.weight" => ShippingWeight,
            "shipping.dimensions.length" => ShippingLength,
            "shipping.dimensions.width" => ShippingWidth,
            "shipping.dimensions.height" => ShippingHeight,
            "shipping.freeShipping" => FreeShipping,
            "discount.percentage" => DiscountPercentage,
            "discount.startDate" => DiscountStart,
            "discount.endDate" => DiscountEnd,
            other => return Err(FormError::Invalid(format!("unknown product field `{}`", other))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimensions, Ref, Shipping};
    use serde_json::json;

    fn filled() -> ProductForm {
        let mut form = ProductForm::default();
        form.set_path("shipping.weight", "1.2").unwrap();
        form.set_path("shipping.dimensions.width", "7").unwrap();
        form.set_path("shipping.dimensions.height", "0.8").unwrap();
        form.set_path("shipping.freeShipping", "true").unwrap();
        form
    }

    #[test]
    fn test_dot_path_changes_only_that_leaf() {
        let mut form = filled();
        let before = form.clone();

        form.set_path("shipping.dimensions.length", "15").unwrap();

        assert_eq!(form.shipping.dimensions.length, 15.0);
        assert_eq!(form.shipping.dimensions.width, before.shipping.dimensions.width);
        assert_eq!(form.shipping.dimensions.height, before.shipping.dimensions.height);
        assert_eq!(form.shipping.weight, before.shipping.weight);
        assert!(form.shipping.free_shipping);

        let mut expected = before;
        expected.shipping.dimensions.length = 15.0;
        assert_eq!(form, expected);
    }

    #[test]
    fn test_unknown_path_is_rejected() {
        let mut form = ProductForm::default();
        assert!(form.set_path("shipping.dimensions.depth", "3").is_err());
        assert!(form.set_path("price", "abc").is_err());
        assert_eq!(form, ProductForm::default());
    }

    #[test]
    fn test_edit_defaults_missing_nested_fields() {
        let product = Product {
            id: "p1".into(),
            name: "Desk".into(),
            price: 120.0,
            category: Some(Ref { id: "c9".into(), name: "Furniture".into() }),
            shipping: Some(Shipping { weight: 20.0, dimensions: Dimensions::default(), free_shipping: false }),
            ..Default::default()
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.category_id, "c9");
        assert_eq!(form.shipping.weight, 20.0);
        assert_eq!(form.discount, DiscountForm::default());
        assert!(form.tags.is_empty());
        assert_eq!(form.sku, "");
    }

    #[test]
    fn test_validation_order() {
        let mut form = ProductForm::default();
        assert_eq!(form.validate(false), Err(FormError::Required("name")));
        form.name = "Desk".into();
        form.description = "Oak".into();
        assert_eq!(form.validate(false), Err(FormError::Required("category")));
        form.category_id = "c1".into();
        // Price ranges are the server's call
        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn test_payload_shape() {
        let mut form = ProductForm { name: "Lamp".into(), category_id: "c1".into(), ..Default::default() };
        form.images.add("lamp.jpg");
        form.discount.percentage = 10.0;

        let payload = serde_json::to_value(&form).unwrap();
        assert_eq!(payload["category"], "c1");
        assert_eq!(payload["images"], json!([{"url": "lamp.jpg", "isPrimary": true}]));
        assert_eq!(payload["discount"], json!({"percentage": 10.0}));
        assert!(payload.get("sku").is_none());
        assert_eq!(payload["shipping"]["dimensions"]["length"], 0.0);
    }
}
