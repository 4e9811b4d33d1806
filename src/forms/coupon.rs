//! Coupon Form

use std::str::FromStr;

use serde::Serialize;

use super::{parse_bool, parse_number, required, FormModel};
use crate::error::FormError;
use crate::models::Coupon;

pub const PROMO_TYPES: &[(&str, &str)] = &[
    ("percentage", "Percentage"),
    ("fixed", "Fixed amount"),
    ("free_shipping", "Free shipping"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponForm {
    pub code: String,
    pub promo_type: String,
    pub value: f64,
    pub min_order_amount: f64,
    /// 0 = unlimited, sent as absent
    #[serde(skip_serializing_if = "is_zero")]
    pub max_uses: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub starts_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expires_at: String,
    pub is_active: bool,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Default for CouponForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            promo_type: "percentage".to_string(),
            value: 0.0,
            min_order_amount: 0.0,
            max_uses: 0,
            starts_at: String::new(),
            expires_at: String::new(),
            is_active: true,
        }
    }
}

impl CouponForm {
    pub fn from_coupon(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            promo_type: if coupon.promo_type.is_empty() {
                "percentage".to_string()
            } else {
                coupon.promo_type.clone()
            },
            value: coupon.value,
            min_order_amount: coupon.min_order_amount,
            max_uses: coupon.max_uses.unwrap_or(0),
            starts_at: coupon.starts_at.map(|d| d.to_string()).unwrap_or_default(),
            expires_at: coupon.expires_at.map(|d| d.to_string()).unwrap_or_default(),
            is_active: coupon.is_active,
        }
    }

    pub fn set(&mut self, field: CouponField, raw: &str) -> Result<(), FormError> {
        match field {
            // Codes are matched case-insensitively at checkout; store upper
            CouponField::Code => self.code = raw.trim().to_uppercase(),
            CouponField::PromoType => self.promo_type = raw.to_string(),
            CouponField::Value => self.value = parse_number(raw, "value")?,
            CouponField::MinOrderAmount => self.min_order_amount = parse_number(raw, "minimum order")?,
            CouponField::MaxUses => self.max_uses = parse_number(raw, "max uses")?,
            CouponField::StartsAt => self.starts_at = raw.to_string(),
            CouponField::ExpiresAt => self.expires_at = raw.to_string(),
            CouponField::IsActive => self.is_active = parse_bool(raw),
        }
        Ok(())
    }
}

impl FormModel for CouponForm {
    fn validate(&self, _editing: bool) -> Result<(), FormError> {
        required(&self.code, "code")?;
        required(&self.promo_type, "promo type")?;
        if self.promo_type != "free_shipping" && self.value <= 0.0 {
            return Err(FormError::Required("value"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponField {
    Code,
    PromoType,
    Value,
    MinOrderAmount,
    MaxUses,
    StartsAt,
    ExpiresAt,
    IsActive,
}

impl FromStr for CouponField {
    type Err = FormError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Ok(match path {
            "code" => CouponField::Code,
            "promoType" => CouponField::PromoType,
            "value" => CouponField::Value,
            "minOrderAmount" => CouponField::MinOrderAmount,
            "maxUses" => CouponField::MaxUses,
            "startsAt" => CouponField::StartsAt,
            "expiresAt" => CouponField::ExpiresAt,
            "isActive" => CouponField::IsActive,
            other => return Err(FormError::Invalid(format!("unknown coupon field `{}`", other))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_normalised() {
        let mut form = CouponForm::default();
        form.set("code".parse().unwrap(), " spring25 ").unwrap();
        assert_eq!(form.code, "SPRING25");
    }

    #[test]
    fn test_free_shipping_needs_no_value() {
        let mut form = CouponForm { code: "SHIP".into(), ..Default::default() };
        assert_eq!(form.validate(false), Err(FormError::Required("value")));
        form.set(CouponField::PromoType, "free_shipping").unwrap();
        assert!(form.validate(false).is_ok());
    }

    #[test]
    fn test_unlimited_uses_not_sent() {
        let form = CouponForm { code: "X".into(), value: 5.0, ..Default::default() };
        let payload = serde_json::to_value(&form).unwrap();
        assert!(payload.get("maxUses").is_none());
        assert!(payload.get("expiresAt").is_none());
    }
}
