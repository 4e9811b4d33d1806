//! Moderator and Livreur Forms

use serde::Serialize;

use super::{required, FormModel, TagList};
use crate::error::FormError;
use crate::models::{Livreur, Moderator};

/// Permissions a moderator can be granted
pub const MODERATOR_PERMISSIONS: &[&str] = &[
    "products.review",
    "vendors.review",
    "orders.view",
    "users.block",
    "categories.edit",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorForm {
    pub name: String,
    pub email: String,
    /// Only sent when set; blank on edit keeps the current password
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub permissions: TagList,
    pub is_active: bool,
}

impl Default for ModeratorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            permissions: TagList::default(),
            is_active: true,
        }
    }
}

impl ModeratorForm {
    pub fn from_moderator(moderator: &Moderator) -> Self {
        Self {
            name: moderator.name.clone(),
            email: moderator.email.clone(),
            password: String::new(),
            permissions: TagList::new(moderator.permissions.clone()),
            is_active: moderator.is_active,
        }
    }

    pub fn toggle_permission(&mut self, permission: &str) {
        if !self.permissions.remove(permission) {
            self.permissions.add(permission);
        }
    }
}

impl FormModel for ModeratorForm {
    fn validate(&self, editing: bool) -> Result<(), FormError> {
        required(&self.name, "name")?;
        required(&self.email, "email")?;
        if !editing {
            required(&self.password, "password")?;
        }
        Ok(())
    }
}

pub const VEHICLE_TYPES: &[&str] = &["motorcycle", "car", "bicycle", "van"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivreurForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub is_active: bool,
}

impl Default for LivreurForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            vehicle_type: VEHICLE_TYPES[0].to_string(),
            zone: String::new(),
            password: String::new(),
            is_active: true,
        }
    }
}

impl LivreurForm {
    pub fn from_livreur(livreur: &Livreur) -> Self {
        Self {
            name: livreur.name.clone(),
            email: livreur.email.clone(),
            phone: livreur.phone.clone(),
            vehicle_type: if livreur.vehicle_type.is_empty() {
                VEHICLE_TYPES[0].to_string()
            } else {
                livreur.vehicle_type.clone()
            },
            zone: livreur.zone.clone(),
            password: String::new(),
            is_active: livreur.is_active,
        }
    }
}

impl FormModel for LivreurForm {
    fn validate(&self, editing: bool) -> Result<(), FormError> {
        required(&self.name, "name")?;
        required(&self.phone, "phone")?;
        required(&self.zone, "zone")?;
        if !editing {
            required(&self.email, "email")?;
            required(&self.password, "password")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_only_required_on_add() {
        let form = ModeratorForm { name: "Sam".into(), email: "sam@shop.io".into(), ..Default::default() };
        assert_eq!(form.validate(false), Err(FormError::Required("password")));
        assert!(form.validate(true).is_ok());
        assert!(serde_json::to_value(&form).unwrap().get("password").is_none());
    }

    #[test]
    fn test_toggle_permission() {
        let mut form = ModeratorForm::default();
        form.toggle_permission("orders.view");
        assert!(form.permissions.contains("orders.view"));
        form.toggle_permission("orders.view");
        assert!(form.permissions.is_empty());
    }

    #[test]
    fn test_livreur_requires_zone() {
        let form = LivreurForm { name: "Karim".into(), phone: "0600".into(), ..Default::default() };
        assert_eq!(form.validate(true), Err(FormError::Required("zone")));
    }
}
