//! List-valued Form Fields
//!
//! Tags, key/value specifications and product images, each with the
//! insertion rules the edit modals rely on.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::{ProductImage, Specification};

/// Unique, non-blank strings (tags, badges, attribute names)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new(tags: Vec<String>) -> Self {
        let mut list = Self::default();
        for tag in tags {
            list.add(&tag);
        }
        list
    }

    /// Returns false for blanks and duplicates (case-insensitive)
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Semicolon/comma separated paste; returns how many were added
    pub fn add_many(&mut self, input: &str) -> usize {
        input.split(&[';', ','][..]).filter(|t| self.add(t)).count()
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key/value specification rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecList(Vec<Specification>);

impl SpecList {
    pub fn new(specs: Vec<Specification>) -> Self {
        Self(specs.into_iter().filter(|s| !s.key.trim().is_empty()).collect())
    }

    /// Both key and value must be present; an existing key is overwritten
    pub fn add(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            return Err(FormError::Required("specification key"));
        }
        if value.is_empty() {
            return Err(FormError::Required("specification value"));
        }
        match self.0.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.value = value.to_string(),
            None => self.0.push(Specification { key: key.to_string(), value: value.to_string() }),
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Specification> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn as_slice(&self) -> &[Specification] {
        &self.0
    }
}

/// Product images. When non-empty exactly one image is primary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageList(Vec<ProductImage>);

impl ImageList {
    /// Normalises the primary flag of records loaded from the server
    pub fn new(images: Vec<ProductImage>) -> Self {
        let mut list = Self(images.into_iter().filter(|img| !img.url.trim().is_empty()).collect());
        let primary = list.0.iter().position(|img| img.is_primary).unwrap_or(0);
        list.mark_primary(primary);
        list
    }

    /// The first image added becomes primary
    pub fn add(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.0.iter().any(|img| img.url == url) {
            return false;
        }
        let is_primary = self.0.is_empty();
        self.0.push(ProductImage { url: url.to_string(), is_primary });
        true
    }

    /// Removing the primary hands the flag to the first remaining image
    pub fn remove(&mut self, index: usize) -> Option<ProductImage> {
        if index >= self.0.len() {
            return None;
        }
        let removed = self.0.remove(index);
        if removed.is_primary {
            self.mark_primary(0);
        }
        Some(removed)
    }

    pub fn set_primary(&mut self, index: usize) -> bool {
        if index >= self.0.len() {
            return false;
        }
        self.mark_primary(index);
        true
    }

    fn mark_primary(&mut self, index: usize) {
        for (i, img) in self.0.iter_mut().enumerate() {
            img.is_primary = i == index;
        }
    }

    pub fn primary(&self) -> Option<&ProductImage> {
        self.0.iter().find(|img| img.is_primary)
    }

    pub fn as_slice(&self) -> &[ProductImage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primaries(list: &ImageList) -> usize {
        list.as_slice().iter().filter(|img| img.is_primary).count()
    }

    #[test]
    fn test_tags_reject_duplicates_and_blanks() {
        let mut tags = TagList::default();
        assert!(tags.add("wireless"));
        assert!(!tags.add("Wireless "));
        assert!(!tags.add("   "));
        assert_eq!(tags.add_many("usb-c; wireless, fast charge"), 2);
        assert_eq!(tags.as_slice(), ["wireless", "usb-c", "fast charge"]);
        assert!(tags.remove("usb-c"));
        assert!(!tags.remove("usb-c"));
    }

    #[test]
    fn test_spec_requires_key_and_value() {
        let mut specs = SpecList::default();
        assert_eq!(specs.add("", "8GB"), Err(FormError::Required("specification key")));
        assert_eq!(specs.add("RAM", " "), Err(FormError::Required("specification value")));
        assert!(specs.as_slice().is_empty());

        specs.add("RAM", "8GB").unwrap();
        specs.add("RAM", "12GB").unwrap();
        assert_eq!(specs.as_slice().len(), 1);
        assert_eq!(specs.as_slice()[0].value, "12GB");
        assert!(specs.remove(3).is_none());
    }

    #[test]
    fn test_primary_image_invariant_through_edits() {
        let mut images = ImageList::default();
        assert_eq!(primaries(&images), 0);

        images.add("a.jpg");
        images.add("b.jpg");
        images.add("c.jpg");
        assert_eq!(images.primary().unwrap().url, "a.jpg");

        images.set_primary(2);
        images.remove(2);
        assert_eq!(primaries(&images), 1);
        assert_eq!(images.primary().unwrap().url, "a.jpg");

        images.remove(1);
        images.remove(0);
        assert_eq!(primaries(&images), 0);

        images.add("d.jpg");
        assert_eq!(primaries(&images), 1);
    }

    #[test]
    fn test_primary_invariant_over_many_sequences() {
        // Deterministic pseudo-random add/remove/set_primary sequences
        let mut seed: u64 = 42;
        let mut next = move |m: usize| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize % m.max(1)
        };
        let mut images = ImageList::default();
        for step in 0..500 {
            match next(3) {
                0 => {
                    images.add(&format!("img{}.jpg", step));
                }
                1 => {
                    let len = images.len();
                    images.remove(next(len + 1));
                }
                _ => {
                    let len = images.len();
                    images.set_primary(next(len + 1));
                }
            }
            let expected = if images.is_empty() { 0 } else { 1 };
            assert_eq!(primaries(&images), expected, "step {}", step);
        }
    }

    #[test]
    fn test_loaded_images_are_normalised() {
        let images = ImageList::new(vec![
            ProductImage { url: "a.jpg".into(), is_primary: true },
            ProductImage { url: "b.jpg".into(), is_primary: true },
            ProductImage { url: "".into(), is_primary: false },
        ]);
        assert_eq!(images.len(), 2);
        assert_eq!(primaries(&images), 1);

        let none_flagged = ImageList::new(vec![ProductImage { url: "x.jpg".into(), is_primary: false }]);
        assert!(none_flagged.as_slice()[0].is_primary);
    }
}
