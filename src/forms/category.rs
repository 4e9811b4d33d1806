//! Category Form

use serde::Serialize;

use super::{required, FormModel, TagList};
use crate::error::FormError;
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    /// `None` makes it a root category
    #[serde(rename = "parent")]
    pub parent_id: Option<String>,
    pub is_active: bool,
    pub attributes: TagList,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            parent_id: None,
            is_active: true,
            attributes: TagList::default(),
        }
    }
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id.clone().filter(|p| !p.is_empty()),
            is_active: category.is_active,
            attributes: TagList::new(category.attributes.clone()),
        }
    }

    /// New child of `parent_id` (the "+" button on a tree row)
    pub fn child_of(parent_id: &str) -> Self {
        Self { parent_id: Some(parent_id.to_string()), ..Default::default() }
    }

    /// Parent `<select>` value; empty string means root
    pub fn set_parent(&mut self, raw: &str) {
        self.parent_id = Some(raw.to_string()).filter(|p| !p.is_empty());
    }
}

impl FormModel for CategoryForm {
    fn validate(&self, _editing: bool) -> Result<(), FormError> {
        required(&self.name, "name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_required() {
        let form = CategoryForm { name: "   ".into(), ..Default::default() };
        assert_eq!(form.validate(false).unwrap_err().to_string(), "name required");
    }

    #[test]
    fn test_root_parent_serializes_null() {
        let mut form = CategoryForm::child_of("c1");
        form.name = "Laptops".into();
        form.set_parent("");
        let payload = serde_json::to_value(&form).unwrap();
        assert!(payload["parent"].is_null());
        assert_eq!(payload["isActive"], true);
    }
}
