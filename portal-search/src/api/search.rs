//! Cross-entity search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use portal_common::Language;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::search::{intake, too_short_message, QueryIntake, UnifiedResult};
use crate::AppState;

/// Query parameters for `GET /search/all`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    /// `ru`, `en` or `be`; anything else means `ru`
    pub language: Option<String>,
}

impl SearchParams {
    /// Collect parameters from decoded query-string pairs
    ///
    /// The first occurrence of a key wins and unknown keys are ignored, so a
    /// repeated parameter never turns into a rejected request.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "language" => &mut params.language,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Response envelope
///
/// Exactly one of `query` (search ran) or `message` (query too short) is set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<UnifiedResult>,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    fn found(results: Vec<UnifiedResult>, query: String) -> Self {
        Self {
            total_count: results.len(),
            results,
            query: Some(query),
            message: None,
        }
    }

    fn too_short(language: Language) -> Self {
        Self {
            results: Vec::new(),
            total_count: 0,
            query: None,
            message: Some(too_short_message(language).to_string()),
        }
    }
}

/// GET /search/all?query=&language=
pub async fn search_all(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<SearchResponse>> {
    let params = SearchParams::from_pairs(pairs);
    let query = match intake(params.query.as_deref(), params.language.as_deref()) {
        QueryIntake::Accepted(query) => query,
        QueryIntake::TooShort { language } => {
            debug!(language = %language, "Query too short, no sources contacted");
            return Ok(Json(SearchResponse::too_short(language)));
        }
    };

    let result_set = state.aggregator.aggregate(&query).await?;

    Ok(Json(SearchResponse::found(result_set.results, query.raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_occurrence_of_repeated_key_wins() {
        let params = SearchParams::from_pairs(pairs(&[
            ("query", "ab"),
            ("language", "en"),
            ("language", "be"),
            ("query", "cd"),
        ]));
        assert_eq!(params.query.as_deref(), Some("ab"));
        assert_eq!(params.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let params = SearchParams::from_pairs(pairs(&[("page", "2"), ("query", "аэропорт")]));
        assert_eq!(
            params,
            SearchParams {
                query: Some("аэропорт".to_string()),
                language: None,
            }
        );
    }

    #[tokio::test]
    async fn test_short_query_contacts_no_source() {
        use crate::sources::mock::MockSource;
        use crate::sources::{default_catalog, SourceAdapter};
        use crate::{build_router, AppState, SearchAggregator};
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use std::sync::Arc;
        use std::time::Duration;
        use tower::util::ServiceExt;

        let mocks: Vec<Arc<MockSource>> = default_catalog()
            .into_iter()
            .map(|d| Arc::new(MockSource::new(d, Vec::new())))
            .collect();
        let sources: Vec<Arc<dyn SourceAdapter>> = mocks
            .iter()
            .map(|m| m.clone() as Arc<dyn SourceAdapter>)
            .collect();
        let app = build_router(AppState::new(SearchAggregator::new(
            sources,
            Duration::from_secs(1),
        )));

        for uri in ["/search/all?query=%20%D1%8F%20", "/search/all", "/search/all?query=ab"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // Only the last request passed the gate
        assert!(mocks.iter().all(|m| m.calls() == 1));
    }

    #[test]
    fn test_too_short_envelope_has_no_query_key() {
        let json = serde_json::to_value(SearchResponse::too_short(Language::En)).unwrap();
        assert_eq!(json["results"], serde_json::json!([]));
        assert_eq!(json["totalCount"], 0);
        assert!(json.get("query").is_none());
        assert_eq!(json["message"], "Query must be at least 2 characters long");
    }

    #[test]
    fn test_found_envelope_has_no_message_key() {
        let json = serde_json::to_value(SearchResponse::found(Vec::new(), "аэропорт".into())).unwrap();
        assert_eq!(json["totalCount"], 0);
        assert_eq!(json["query"], "аэропорт");
        assert!(json.get("message").is_none());
    }
}
