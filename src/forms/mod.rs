//! Modal Forms
//!
//! Add/edit modal sessions, the typed form models they hold, and the list
//! editors used inside them.
//!
//! A modal owns one form at a time. Every open bumps a session number; a
//! submit response tagged with an older session is ignored, so closing a
//! modal and reopening it for another record cannot be clobbered by the
//! first request finishing late.

mod campaign;
mod category;
mod coupon;
mod lists;
mod product;
mod staff;

use async_trait::async_trait;

use crate::error::{ApiResult, FormError};
use crate::http::ApiClient;

pub use campaign::CampaignForm;
pub use category::CategoryForm;
pub use coupon::{CouponField, CouponForm, PROMO_TYPES};
pub use lists::{ImageList, SpecList, TagList};
pub use product::{ProductField, ProductForm};
pub use staff::{LivreurForm, ModeratorForm, MODERATOR_PERMISSIONS, VEHICLE_TYPES};

/// Presence checks run before any request
pub trait FormModel: Clone + Default {
    /// `editing` is false for "add"
    fn validate(&self, editing: bool) -> Result<(), FormError>;
}

/// Create/update through the matching gateway
#[async_trait(?Send)]
pub trait Persist: FormModel {
    type Saved;

    async fn create(&self, client: &ApiClient) -> ApiResult<Self::Saved>;
    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Self::Saved>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    Add,
    Edit(String),
}

/// Snapshot taken when submit starts
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket<F> {
    pub session: u64,
    pub editing: Option<String>,
    pub form: F,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Modal closed; caller refetches the list
    Saved(T),
    /// Modal stays open with `error()` set
    Failed,
    /// Response belonged to a modal session that no longer exists
    Stale,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modal<F> {
    mode: ModalMode,
    form: F,
    session: u64,
    submitting: bool,
    error: Option<String>,
}

impl<F: FormModel> Modal<F> {
    pub fn new() -> Self {
        Self {
            mode: ModalMode::Closed,
            form: F::default(),
            session: 0,
            submitting: false,
            error: None,
        }
    }

    pub fn open_add(&mut self) {
        self.reset(ModalMode::Add, F::default());
    }

    /// Add with prefilled values, e.g. a child category under a known parent
    pub fn open_add_with(&mut self, form: F) {
        self.reset(ModalMode::Add, form);
    }

    pub fn open_edit(&mut self, id: &str, form: F) {
        self.reset(ModalMode::Edit(id.to_string()), form);
    }

    pub fn close(&mut self) {
        self.reset(ModalMode::Closed, F::default());
    }

    fn reset(&mut self, mode: ModalMode, form: F) {
        self.session += 1;
        self.mode = mode;
        self.form = form;
        self.submitting = false;
        self.error = None;
    }

    pub fn mode(&self) -> &ModalMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            ModalMode::Edit(id) => Some(id),
            _ => None,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Validate and mark submitting. On validation failure the error is
    /// stored and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket<F>, FormError> {
        if !self.is_open() {
            return Err(FormError::Invalid("form is not open".to_string()));
        }
        let editing = self.editing_id().map(str::to_string);
        if let Err(e) = self.form.validate(editing.is_some()) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.submitting = true;
        self.error = None;
        Ok(SubmitTicket { session: self.session, editing, form: self.form.clone() })
    }

    pub fn finish_submit<T>(&mut self, session: u64, result: ApiResult<T>) -> SubmitOutcome<T> {
        if session != self.session {
            log::debug!("[FORM] Ignoring response for closed modal session #{}", session);
            return SubmitOutcome::Stale;
        }
        self.submitting = false;
        match result {
            Ok(saved) => {
                self.close();
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                log::error!("[FORM] Submit failed: {}", e);
                self.error = Some(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }
}

/// Send a submit ticket to create or update depending on the modal mode
pub async fn save<F: Persist>(client: &ApiClient, ticket: &SubmitTicket<F>) -> ApiResult<F::Saved> {
    match &ticket.editing {
        None => ticket.form.create(client).await,
        Some(id) => ticket.form.update(client, id).await,
    }
}

/// Full modal round trip: validate, save, apply the outcome
pub async fn submit<F: Persist>(client: &ApiClient, modal: &mut Modal<F>) -> Option<SubmitOutcome<F::Saved>> {
    let ticket = modal.begin_submit().ok()?;
    let result = save(client, &ticket).await;
    Some(modal.finish_submit(ticket.session, result))
}

/// Parse a numeric input; blank means zero
fn parse_number<T: std::str::FromStr + Default>(raw: &str, field: &'static str) -> Result<T, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|_| FormError::Invalid(format!("{} must be a number", field)))
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "on" | "1")
}

fn required(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_open_add_resets_form() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_edit("c1", CategoryForm { name: "Phones".into(), ..Default::default() });
        assert_eq!(modal.editing_id(), Some("c1"));

        modal.open_add();
        assert_eq!(modal.form(), &CategoryForm::default());
        assert_eq!(modal.mode(), &ModalMode::Add);
    }

    #[test]
    fn test_add_with_prefilled_parent() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_add_with(CategoryForm::child_of("c1"));
        assert_eq!(modal.mode(), &ModalMode::Add);
        assert_eq!(modal.editing_id(), None);
        assert_eq!(modal.form().parent_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_validation_failure_blocks_submit() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_add();
        assert_eq!(modal.begin_submit(), Err(FormError::Required("name")));
        assert_eq!(modal.error(), Some("name required"));
        assert!(!modal.is_submitting());
    }

    #[test]
    fn test_failure_keeps_modal_open() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_add();
        modal.form_mut().name = "Shoes".into();
        let ticket = modal.begin_submit().unwrap();
        assert!(modal.is_submitting());

        let outcome = modal.finish_submit::<()>(
            ticket.session,
            Err(ApiError::Status { status: 409, message: "Category already exists".into() }),
        );
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(modal.is_open());
        assert!(!modal.is_submitting());
        assert_eq!(modal.error(), Some("Category already exists"));
    }

    #[test]
    fn test_success_closes_modal() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_edit("c1", CategoryForm { name: "Shoes".into(), ..Default::default() });
        let ticket = modal.begin_submit().unwrap();
        assert_eq!(ticket.editing.as_deref(), Some("c1"));
        assert_eq!(modal.finish_submit(ticket.session, Ok(7)), SubmitOutcome::Saved(7));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_late_response_after_reopen_is_ignored() {
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_edit("c1", CategoryForm { name: "Shoes".into(), ..Default::default() });
        let ticket = modal.begin_submit().unwrap();

        modal.close();
        modal.open_edit("c2", CategoryForm { name: "Bags".into(), ..Default::default() });

        let outcome = modal.finish_submit::<()>(ticket.session, Err(ApiError::Network("slow".into())));
        assert_eq!(outcome, SubmitOutcome::Stale);
        assert_eq!(modal.form().name, "Bags");
        assert_eq!(modal.error(), None);
    }

    #[test]
    fn test_parse_number_blank_is_zero() {
        assert_eq!(parse_number::<f64>(" ", "price"), Ok(0.0));
        assert_eq!(parse_number::<u32>("12", "stock"), Ok(12));
        assert!(parse_number::<u32>("abc", "stock").is_err());
    }
}
