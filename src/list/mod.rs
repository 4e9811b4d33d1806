//! List Screens Core
//!
//! Query state, debounced search, the generation-tagged list controller and
//! optimistic helpers shared by every admin list screen.

mod controller;
mod debounce;
mod generation;
mod optimistic;
mod query;

use async_trait::async_trait;

use crate::api::Page;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::Entity;

pub use controller::{Completion, FetchTicket, ListController, Phase};
pub use debounce::Debouncer;
pub use generation::Generation;
pub use optimistic::{move_between, FeaturedBoard};
pub use query::{ListQuery, Sort, SortOrder};

/// A gateway list operation, so one controller/hook serves every resource
#[async_trait(?Send)]
pub trait ListResource: Copy + 'static {
    type Item: Entity + PartialEq + Send + Sync;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Self::Item>>;
}

/// Run one fetch cycle against `controller`, following the page back when
/// the requested one has disappeared. Returns whether the response was
/// applied.
pub async fn refresh<R: ListResource>(
    resource: R,
    client: &ApiClient,
    controller: &mut ListController<R::Item>,
) -> bool {
    loop {
        let ticket = controller.begin_fetch();
        let result = resource.fetch(client, &ticket.query).await;
        match controller.complete(ticket.generation, result) {
            Completion::PageMoved => continue,
            done => return done.is_applied(),
        }
    }
}
