use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat key/value metadata attached to an upload
pub type Metadata = Map<String, Value>;

/// Whether a decoded body carries `response.status == "ok"`
pub(crate) fn has_success_marker(body: &Value) -> bool {
    body.pointer("/response/status").and_then(Value::as_str) == Some("ok")
}

/// Whether a decoded login body reports rejected credentials
pub(crate) fn is_invalid_login(body: &Value) -> bool {
    body.pointer("/results/status").and_then(Value::as_str) == Some("invalidlogin")
}

/// Drop non-scalar entries and stringify `libraries`.
///
/// EnterMedia refuses a non-string `libraries` value; every other scalar is
/// sent as-is.
pub fn sanitize_metadata(metadata: Metadata) -> Metadata {
    metadata
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
                Value::Number(n) if key == "libraries" => Value::String(n.to_string()),
                Value::Bool(b) if key == "libraries" => Value::String(b.to_string()),
                other => other,
            };
            Some((key, value))
        })
        .collect()
}

/// A single search condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTerm {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl SearchTerm {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Wildcard match, e.g. `SearchTerm::matches("name", "test*")`
    pub fn matches(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "matches", value)
    }

    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "exact", value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchTerms<'a> {
    pub terms: &'a [SearchTerm],
}

/// Search request body. Paging values go over the wire as strings.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub page: String,
    pub hitsperpage: String,
    pub showfilters: &'static str,
    pub query: SearchTerms<'a>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(page: u32, hits_per_page: u32, terms: &'a [SearchTerm]) -> Self {
        Self {
            page: page.to_string(),
            hitsperpage: hits_per_page.to_string(),
            showfilters: "true",
            query: SearchTerms { terms },
        }
    }
}

/// Builder for a paged search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub page: u32,
    pub hits_per_page: u32,
    pub terms: Vec<SearchTerm>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            page: 1,
            hits_per_page: 20,
            terms: Vec::new(),
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }

    pub fn term(mut self, term: SearchTerm) -> Self {
        self.terms.push(term);
        self
    }
}

/// Typed view over a search response.
///
/// EnterMedia reports paging numbers either as JSON numbers or as strings,
/// both are accepted.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub hits: Vec<Value>,
    pub total_hits: Option<u64>,
    pub page: Option<u64>,
    pub pages: Option<u64>,
}

impl SearchResults {
    pub fn from_envelope(body: &Value) -> Self {
        let number = |pointer: &str| {
            body.pointer(pointer).and_then(|v| match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
        };

        Self {
            hits: body
                .get("results")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            total_hits: number("/response/totalhits"),
            page: number("/response/page"),
            pages: number("/response/pages"),
        }
    }
}

/// Identity EnterMedia assigned to an uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub id: String,
    pub source_path: String,
}

impl UploadedAsset {
    /// Read `data.id` and `data.sourcepath` from a create response
    pub(crate) fn from_envelope(body: &Value) -> Option<Self> {
        let data = body.get("data")?;
        let id = match data.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let source_path = data.get("sourcepath")?.as_str()?.to_string();
        Some(Self { id, source_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn sanitize_drops_non_scalars() {
        let cleaned = sanitize_metadata(metadata(json!({
            "a": "x",
            "b": 123,
            "c": [1, 2],
            "d": {"k": 1},
            "e": null,
        })));

        assert_eq!(Value::Object(cleaned), json!({"a": "x", "b": 123}));
    }

    #[test]
    fn sanitize_stringifies_libraries() {
        let cleaned = sanitize_metadata(metadata(json!({"libraries": 101, "rank": 7})));
        assert_eq!(cleaned["libraries"], json!("101"));
        assert_eq!(cleaned["rank"], json!(7));
    }

    #[test]
    fn sanitize_leaves_string_libraries_alone() {
        let cleaned = sanitize_metadata(metadata(json!({"libraries": "photos"})));
        assert_eq!(cleaned["libraries"], json!("photos"));
    }

    #[test]
    fn success_marker_detection() {
        assert!(has_success_marker(&json!({"response": {"status": "ok"}})));
        assert!(!has_success_marker(&json!({"response": {"status": "error"}})));
        assert!(!has_success_marker(&json!({"results": []})));
    }

    #[test]
    fn invalid_login_detection() {
        assert!(is_invalid_login(&json!({"results": {"status": "invalidlogin"}})));
        assert!(!is_invalid_login(&json!({"response": {"status": "ok"}})));
    }

    #[test]
    fn search_request_sends_paging_as_strings() {
        let terms = vec![SearchTerm::matches("name", "test*")];
        let body = serde_json::to_value(SearchRequest::new(2, 10, &terms)).unwrap();
        assert_eq!(
            body,
            json!({
                "page": "2",
                "hitsperpage": "10",
                "showfilters": "true",
                "query": {"terms": [{"field": "name", "operator": "matches", "value": "test*"}]}
            })
        );
    }

    #[test]
    fn search_query_defaults() {
        let query = SearchQuery::new();
        assert_eq!(query.page, 1);
        assert_eq!(query.hits_per_page, 20);
        assert!(query.terms.is_empty());
    }

    #[test]
    fn search_results_accepts_string_and_numeric_paging() {
        let results = SearchResults::from_envelope(&json!({
            "response": {"status": "ok", "totalhits": "42", "page": 2, "pages": "5"},
            "results": [{"id": "a1"}, {"id": "a2"}]
        }));
        assert_eq!(results.hits.len(), 2);
        assert_eq!(results.total_hits, Some(42));
        assert_eq!(results.page, Some(2));
        assert_eq!(results.pages, Some(5));
    }

    #[test]
    fn uploaded_asset_requires_id_and_sourcepath() {
        let full = json!({"data": {"id": 77, "sourcepath": "users/admin/x.jpg"}});
        assert_eq!(
            UploadedAsset::from_envelope(&full),
            Some(UploadedAsset {
                id: "77".into(),
                source_path: "users/admin/x.jpg".into()
            })
        );
        assert_eq!(UploadedAsset::from_envelope(&json!({"data": {"id": "77"}})), None);
    }
}
