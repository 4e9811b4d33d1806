//! List Controller
//!
//! The fetch/paginate/filter state behind every admin list screen, kept free
//! of any UI so it can be driven from Leptos effects and from tests alike.
//!
//! Overlapping fetches are resolved by generation: each `begin_fetch` issues
//! a new generation and only the response carrying the latest one is applied.

use crate::api::{Page, Stats};
use crate::error::ApiError;
use crate::http::QueryParams;
use crate::models::Entity;

use super::query::{ListQuery, Sort, SortOrder};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// What `complete` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A newer fetch was issued since; nothing was applied
    Stale,
    Applied,
    /// The requested page no longer exists. The page moved back to the last
    /// one and its rows still have to be fetched.
    PageMoved,
}

impl Completion {
    pub fn is_applied(self) -> bool {
        self != Completion::Stale
    }

    pub fn needs_refetch(self) -> bool {
        self == Completion::PageMoved
    }
}

/// Handed out by `begin_fetch`, handed back to `complete`
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: ListQuery,
}

impl FetchTicket {
    pub fn params(&self) -> QueryParams {
        self.query.to_params()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListController<T> {
    query: ListQuery,
    items: Vec<T>,
    total: u64,
    total_pages: u32,
    stats: Option<Stats>,
    phase: Phase,
    generation: u64,
}

impl<T: Entity> ListController<T> {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            stats: None,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_size(&self) -> u32 {
        self.query.limit
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn stat(&self, key: &str) -> u64 {
        self.stats
            .as_ref()
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    // ========================
    // Dependency changes
    // ========================
    // Each returns whether a refetch is needed.

    /// New committed search term; back to page 1
    pub fn set_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if self.query.search == term {
            return false;
        }
        self.query.search = term.to_string();
        self.query.page = 1;
        true
    }

    /// New filter value (empty clears it); back to page 1
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        if self.query.filters.get(key).unwrap_or("") == value {
            return false;
        }
        if value.is_empty() {
            self.query.filters.remove(key);
        } else {
            self.query.filters.set(key, value);
        }
        self.query.page = 1;
        true
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.query.filters.is_empty() && self.query.search.is_empty() {
            return false;
        }
        self.query.filters = QueryParams::new();
        self.query.search.clear();
        self.query.page = 1;
        true
    }

    /// Page buttons: only the page changes, clamped to the known range
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages.max(1));
        if page == self.query.page {
            return false;
        }
        self.query.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.query.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.query.page.saturating_sub(1))
    }

    pub fn set_page_size(&mut self, limit: u32) -> bool {
        let limit = limit.max(1);
        if limit == self.query.limit {
            return false;
        }
        self.query.limit = limit;
        self.query.page = 1;
        true
    }

    /// Clicking a column header: same column flips, new column starts desc
    pub fn sort_by(&mut self, column: &str) -> bool {
        let order = match &self.query.sort {
            Some(sort) if sort.by == column => sort.order.flipped(),
            _ => SortOrder::Desc,
        };
        self.query.sort = Some(Sort { by: column.to_string(), order });
        self.query.page = 1;
        true
    }

    // ========================
    // Fetch lifecycle
    // ========================

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        FetchTicket { generation: self.generation, query: self.query.clone() }
    }

    /// Apply a response unless a newer fetch superseded it
    pub fn complete(&mut self, generation: u64, result: Result<Page<T>, ApiError>) -> Completion {
        if generation != self.generation {
            log::debug!("[LIST] Dropping stale response #{} (latest #{})", generation, self.generation);
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                let limit = self.query.limit;
                let mut items = page.items;
                if items.len() > limit as usize {
                    log::warn!("[LIST] Server returned {} rows for limit {}", items.len(), limit);
                    items.truncate(limit as usize);
                }
                self.items = items;
                self.total = page.total;
                self.total_pages = page
                    .total_pages
                    .unwrap_or_else(|| page.total.div_ceil(u64::from(limit)) as u32);
                if page.stats.is_some() {
                    self.stats = page.stats;
                }
                // Rows were deleted elsewhere and the page no longer exists
                if self.total_pages > 0 && self.query.page > self.total_pages {
                    log::debug!("[LIST] Page {} gone, moving to {}", self.query.page, self.total_pages);
                    self.query.page = self.total_pages;
                    return Completion::PageMoved;
                }
                self.phase = Phase::Loaded;
            }
            Err(err) => {
                log::error!("[LIST] Fetch failed: {}", err);
                self.phase = Phase::Errored(err.user_message());
            }
        }
        Completion::Applied
    }

    // ========================
    // Optimistic updates
    // ========================

    /// Patch one row in place (block, feature, status change)
    pub fn patch(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Replace a row with the server's copy
    pub fn replace(&mut self, updated: T) -> bool {
        let id = updated.id().to_string();
        self.patch(&id, |item| *item = updated)
    }

    /// Drop a row locally; `total` is left alone until the next fetch
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn users(n: usize, offset: usize) -> Vec<User> {
        (0..n)
            .map(|i| User { id: format!("u{}", i + offset), name: format!("User {}", i + offset), ..Default::default() })
            .collect()
    }

    fn page(items: Vec<User>, total: u64) -> Page<User> {
        Page { items, total, total_pages: None, page: None, stats: None }
    }

    fn controller() -> ListController<User> {
        ListController::new(ListQuery::new(20))
    }

    #[test]
    fn test_first_page_of_57() {
        let mut c = controller();
        assert_eq!(c.phase(), &Phase::Idle);

        let ticket = c.begin_fetch();
        assert!(c.is_loading());
        assert_eq!(ticket.params().to_query_string(), "page=1&limit=20");

        assert_eq!(c.complete(ticket.generation, Ok(page(users(20, 0), 57))), Completion::Applied);
        assert_eq!(c.total_pages(), 3);
        assert_eq!(c.page(), 1);
        assert_eq!(c.items().len(), 20);
        assert_eq!(c.phase(), &Phase::Loaded);
    }

    #[test]
    fn test_search_and_filter_reset_page() {
        let mut c = controller();
        let t = c.begin_fetch();
        c.complete(t.generation, Ok(page(users(20, 0), 57)));

        assert!(c.set_page(3));
        assert_eq!(c.page(), 3);
        assert!(c.set_search("iphone"));
        assert_eq!(c.page(), 1);
        assert_eq!(c.begin_fetch().query.page, 1);

        c.set_page(2);
        assert!(c.set_filter("status", "blocked"));
        let ticket = c.begin_fetch();
        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.params().get("status"), Some("blocked"));
    }

    #[test]
    fn test_unchanged_dependency_needs_no_refetch() {
        let mut c = controller();
        assert!(!c.set_search(""));
        assert!(!c.set_filter("role", ""));
        assert!(c.set_filter("role", "vendor"));
        assert!(!c.set_filter("role", "vendor"));
        assert!(c.set_filter("role", ""));
        assert_eq!(c.query().filters.get("role"), None);
    }

    #[test]
    fn test_page_is_clamped() {
        let mut c = controller();
        let t = c.begin_fetch();
        c.complete(t.generation, Ok(page(users(20, 0), 57)));

        assert!(c.set_page(99));
        assert_eq!(c.page(), 3);
        assert!(!c.next_page());
        assert!(c.set_page(0));
        assert_eq!(c.page(), 1);
        assert!(!c.prev_page());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut c = controller();
        let slow = c.begin_fetch();
        c.set_search("shoes");
        let fresh = c.begin_fetch();

        assert!(c.complete(fresh.generation, Ok(page(users(2, 100), 2))).is_applied());
        assert_eq!(c.complete(slow.generation, Ok(page(users(20, 0), 57))), Completion::Stale);

        assert_eq!(c.total(), 2);
        assert_eq!(c.items()[0].id, "u100");
    }

    #[test]
    fn test_error_clears_loading() {
        let mut c = controller();
        let t = c.begin_fetch();
        c.complete(t.generation, Err(ApiError::Network("offline".into())));
        assert!(!c.is_loading());
        assert_eq!(c.error(), Some(crate::error::NETWORK_ERROR));
    }

    #[test]
    fn test_items_never_exceed_page_size() {
        let mut c = ListController::<User>::new(ListQuery::new(5));
        let t = c.begin_fetch();
        c.complete(t.generation, Ok(page(users(8, 0), 8)));
        assert_eq!(c.items().len(), 5);
        assert_eq!(c.total_pages(), 2);
    }

    #[test]
    fn test_server_total_pages_wins() {
        let mut c = controller();
        let t = c.begin_fetch();
        let mut p = page(users(1, 0), 1);
        p.total_pages = Some(4);
        c.complete(t.generation, Ok(p));
        assert_eq!(c.total_pages(), 4);
    }

    #[test]
    fn test_page_shrinks_when_rows_disappear() {
        let mut c = controller();
        let t = c.begin_fetch();
        c.complete(t.generation, Ok(page(users(20, 0), 57)));
        c.set_page(3);
        let t = c.begin_fetch();
        let done = c.complete(t.generation, Ok(page(users(0, 0), 40)));
        assert!(done.needs_refetch());
        assert_eq!(c.page(), 2);
        assert_eq!(c.total_pages(), 2);
        // Still loading: the empty page is never shown as "nothing found"
        assert!(c.is_loading());

        let t = c.begin_fetch();
        assert_eq!(t.query.page, 2);
        assert_eq!(c.complete(t.generation, Ok(page(users(20, 20), 40))), Completion::Applied);
        assert_eq!(c.items()[0].id, "u20");
        assert_eq!(c.phase(), &Phase::Loaded);
    }

    #[test]
    fn test_stats_come_from_list_response() {
        let mut c = controller();
        let t = c.begin_fetch();
        let mut p = page(users(1, 0), 1);
        let mut stats = Stats::new();
        stats.insert("blocked".into(), 7.into());
        p.stats = Some(stats);
        c.complete(t.generation, Ok(p));
        assert_eq!(c.stat("blocked"), 7);
        assert_eq!(c.stat("missing"), 0);
    }

    #[test]
    fn test_patch_keeps_total() {
        let mut c = controller();
        let t = c.begin_fetch();
        c.complete(t.generation, Ok(page(users(3, 0), 3)));

        assert!(c.patch("u1", |u| u.is_blocked = true));
        assert!(c.items()[1].is_blocked);
        assert!(!c.patch("nope", |u| u.is_blocked = true));

        assert!(c.remove("u0").is_some());
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.total(), 3);
    }

    #[test]
    fn test_sort_toggle() {
        let mut c = ListController::<User>::new(ListQuery::new(20).sorted());
        c.sort_by("createdAt");
        assert_eq!(c.query().sort.as_ref().unwrap().order, SortOrder::Asc);
        c.sort_by("name");
        let sort = c.query().sort.clone().unwrap();
        assert_eq!((sort.by.as_str(), sort.order), ("name", SortOrder::Desc));
    }
}
