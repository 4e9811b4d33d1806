//! Newsletter Campaign Form

use super::{required, FormModel};
use crate::error::FormError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignForm {
    pub subject: String,
    /// Markdown source
    pub body: String,
}

impl FormModel for CampaignForm {
    fn validate(&self, _editing: bool) -> Result<(), FormError> {
        required(&self.subject, "subject")?;
        required(&self.body, "content")
    }
}
