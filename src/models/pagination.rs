//! 分页相关的数据结构

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Raw listing query shared by every admin list. All values arrive as
/// strings and are coerced by [`ListParams::from_query`], never rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Coerced listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

/// Absent, non-numeric, zero and negative values all fall back to `default`
fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl ListParams {
    pub fn new(page: u64, limit: u64, search: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn from_query(query: &ListQuery) -> Self {
        Self::new(
            positive_or(query.page.as_deref(), DEFAULT_PAGE),
            positive_or(query.limit.as_deref(), DEFAULT_LIMIT),
            query.search.as_deref(),
        )
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(params: &ListParams, total: u64) -> Self {
        Self {
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total.div_ceil(params.limit),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: &ListParams, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(params, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(Into::into),
            limit: limit.map(Into::into),
            search: search.map(Into::into),
        }
    }

    #[test]
    fn test_list_params() {
        let params = ListParams::from_query(&query(Some("2"), Some("5"), Some(" rose ")));
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 5);
        assert_eq!(params.offset(), 5);
        assert_eq!(params.search.as_deref(), Some("rose"));
    }

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::from_query(&ListQuery::default());
        assert_eq!(params, ListParams::default());
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_list_params_falsy_values() {
        for (page, limit) in [("0", "0"), ("-2", "-10"), ("abc", ""), ("", "x")] {
            let params = ListParams::from_query(&query(Some(page), Some(limit), Some("   ")));
            assert_eq!(params.page, DEFAULT_PAGE, "page {page:?}");
            assert_eq!(params.limit, DEFAULT_LIMIT, "limit {limit:?}");
            assert_eq!(params.search, None);
        }
    }

    #[test]
    fn test_limit_is_capped() {
        let params = ListParams::from_query(&query(None, Some("5000"), None));
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn test_pagination_total_pages() {
        let params = ListParams::new(2, 5, None);
        assert_eq!(Pagination::new(&params, 12).total_pages, 3);
        assert_eq!(Pagination::new(&params, 10).total_pages, 2);
        assert_eq!(Pagination::new(&params, 0).total_pages, 0);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let page = Paginated::new(vec![1, 2], &ListParams::new(1, 2, None), 3);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["pagination"]["totalPages"], 2);
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }
}
