//! List Query
//!
//! Everything a list screen sends with its fetch: pagination, committed
//! search term, filters and sort.

use crate::http::QueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub by: String,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Self { by: "createdAt".to_string(), order: SortOrder::Desc }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filters: QueryParams,
    /// `None` for screens without sortable columns
    pub sort: Option<Sort>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            filters: QueryParams::new(),
            sort: None,
        }
    }

    pub fn sorted(mut self) -> Self {
        self.sort = Some(Sort::default());
        self
    }

    pub fn with_filter(mut self, key: &str, value: impl ToString) -> Self {
        self.filters.set(key, value);
        self
    }

    /// Request parameters; empty values are dropped later by the client
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("page", self.page)
            .set("limit", self.limit)
            .set("search", self.search.trim());
        for (key, value) in self.filters.stripped() {
            params.set(key, value);
        }
        if let Some(sort) = &self.sort {
            params.set("sortBy", &sort.by).set("sortOrder", sort.order.as_str());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_include_filters_and_sort() {
        let query = ListQuery::new(20)
            .sorted()
            .with_filter("status", "pending")
            .with_filter("vendorId", "");

        assert_eq!(
            query.to_params().to_query_string(),
            "page=1&limit=20&status=pending&sortBy=createdAt&sortOrder=desc"
        );
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        assert_eq!(ListQuery::new(0).limit, 1);
    }
}
