//! List and Modal Hooks
//!
//! Reactive wrappers around [`ListController`] and [`Modal`]: a signal per
//! screen, one effect that refetches when a dependency changes, and the
//! submit round trip for modals.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::forms::{self, Modal, Persist, SubmitOutcome};
use crate::list::{ListController, ListQuery, ListResource};

/// Handle returned by [`use_list`]
pub struct ListHandle<T: Send + Sync + 'static> {
    pub state: RwSignal<ListController<T>>,
    trigger: RwSignal<u32>,
}

impl<T: Send + Sync + 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListHandle<T> {}

impl<T: Send + Sync + 'static> ListHandle<T> {
    /// Apply a dependency change; refetch if it asks for one
    pub fn change(&self, f: impl FnOnce(&mut ListController<T>) -> bool) {
        if self.state.try_update(f).unwrap_or(false) {
            self.refetch();
        }
    }

    /// Local optimistic edit, no refetch
    pub fn patch_local(&self, f: impl FnOnce(&mut ListController<T>)) {
        self.state.update(f);
    }

    pub fn refetch(&self) {
        self.trigger.update(|n| *n += 1);
    }
}

/// Bind a list resource to a controller. The fetch runs on mount, after
/// every change that asks for it, and on the app-wide reload trigger.
pub fn use_list<R: ListResource>(resource: R, query: ListQuery) -> ListHandle<R::Item> {
    let ctx = use_app_context();
    let state = RwSignal::new(ListController::new(query));
    let trigger = RwSignal::new(0u32);

    Effect::new(move |_| {
        trigger.track();
        ctx.reload_trigger.track();

        let Some(ticket) = state.try_update(|controller| controller.begin_fetch()) else {
            return;
        };
        log::debug!("[LIST] Fetch #{} page={}", ticket.generation, ticket.query.page);
        spawn_local(async move {
            let result = resource.fetch(&ctx.client(), &ticket.query).await;
            let done = state.try_update(|controller| controller.complete(ticket.generation, result));
            if done.is_some_and(|d| d.needs_refetch()) {
                trigger.try_update(|n| *n += 1);
            }
        });
    });

    ListHandle { state, trigger }
}

/// Submit the open modal. `on_saved` runs only for a response that still
/// belongs to the current modal session.
pub fn submit_modal<F>(ctx: AppContext, modal: RwSignal<Modal<F>>, on_saved: impl FnOnce(F::Saved) + 'static)
where
    F: Persist + Send + Sync + 'static,
    F::Saved: 'static,
{
    let Some(Ok(ticket)) = modal.try_update(|m| m.begin_submit()) else {
        return;
    };

    spawn_local(async move {
        let result = forms::save(&ctx.client(), &ticket).await;
        let outcome = modal.try_update(|m| m.finish_submit(ticket.session, result));
        if let Some(SubmitOutcome::Saved(saved)) = outcome {
            on_saved(saved);
        }
    });
}

/// Run a one-off gateway call. Failures are logged and shown in the notice
/// banner; `on_ok` runs with the result otherwise.
pub fn spawn_action<T, Fut>(ctx: AppContext, action: Fut, on_ok: impl FnOnce(T) + 'static)
where
    T: 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    spawn_local(async move {
        match action.await {
            Ok(value) => {
                ctx.dismiss_notice();
                on_ok(value);
            }
            Err(e) => {
                log::error!("[ACTION] {}", e);
                ctx.notify(e.user_message());
            }
        }
    });
}
