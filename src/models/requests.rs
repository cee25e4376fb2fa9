//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string for GET /api/items
///
/// Values are kept as raw strings so that garbage falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    #[serde(rename = "_page", default)]
    pub page: Option<String>,
    /// Page size
    #[serde(rename = "_limit", default)]
    pub limit: Option<String>,
    /// Case-insensitive search over name and category
    #[serde(default)]
    pub q: Option<String>,
}

impl ListQuery {
    /// Parsed page number, if it is a positive integer.
    pub fn page(&self) -> Option<usize> {
        parse_positive(self.page.as_deref())
    }

    /// Parsed page size, if it is a positive integer.
    pub fn limit(&self) -> Option<usize> {
        parse_positive(self.limit.as_deref())
    }

    /// Search text, if any.
    pub fn filter(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, q: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            q: q.map(str::to_string),
        }
    }

    #[test]
    fn test_list_query_deserialize_renamed_fields() {
        let json = r#"{"_page": "2", "_limit": "5", "q": "desk"}"#;
        let q: ListQuery = serde_json::from_str(json).unwrap();
        assert_eq!(q.page(), Some(2));
        assert_eq!(q.limit(), Some(5));
        assert_eq!(q.filter(), Some("desk"));
    }

    #[test]
    fn test_list_query_empty() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page(), None);
        assert_eq!(q.limit(), None);
        assert_eq!(q.filter(), None);
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let q = query(Some("abc"), Some("-3"), None);
        assert_eq!(q.page(), None);
        assert_eq!(q.limit(), None);

        let q = query(Some("0"), Some("0"), None);
        assert_eq!(q.page(), None);
        assert_eq!(q.limit(), None);
    }

    #[test]
    fn test_search_text_is_passed_through_untrimmed() {
        assert_eq!(query(None, None, Some(" shoes")).filter(), Some(" shoes"));
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(query(None, None, Some("   ")).filter(), None);
    }
}
