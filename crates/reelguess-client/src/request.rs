use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Named request parameters, kept as JSON values until they are encoded
/// either into a query string or into a JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(BTreeMap<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters from the fields of a serializable model (must serialize to an object).
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(model).map_err(|e| ApiError::Decode(e.to_string()))? {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(ApiError::Decode(format!(
                "parameters must be an object, got {}",
                other
            ))),
        }
    }

    /// Query-string pairs. Strings are used verbatim, nulls are dropped,
    /// everything else uses its JSON text.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }

    pub fn to_body(&self) -> Result<RequestBody, ApiError> {
        RequestBody::json(&self.0)
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            content_type: "application/json;charset=utf-8",
            bytes,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// A fully built GET, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL without the query string
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// URL with the percent-encoded query appended. Used as the coalescing key.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        match reqwest::Url::parse_with_params(&self.url, &self.query) {
            Ok(url) => url.to_string(),
            Err(_) => {
                let query: Vec<String> = self
                    .query
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                format!("{}?{}", self.url, query.join("&"))
            }
        }
    }

    /// Full URL with the api key masked, for logs.
    pub fn redacted_url(&self) -> String {
        let mut redacted = self.clone();
        for (name, value) in redacted.query.iter_mut() {
            if name == "api_key" {
                *value = "***".to_string();
            }
        }
        redacted.full_url()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelguess_types::Genre;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct GuessSubmission {
        id: u64,
        media_type: String,
        text: String,
        score: f64,
    }

    #[test]
    fn test_model_body_round_trip() {
        let model = GuessSubmission {
            id: 27205,
            media_type: "movie".to_string(),
            text: "Inception & friends".to_string(),
            score: 8.5,
        };

        let body = Parameters::from_model(&model).unwrap().to_body().unwrap();
        assert_eq!(body.content_type, "application/json;charset=utf-8");
        let decoded: GuessSubmission = body.decode().unwrap();
        assert_eq!(decoded, model);

        let genre = Genre::new(28, "Action");
        let decoded: Genre = RequestBody::json(&genre).unwrap().decode().unwrap();
        assert_eq!(decoded, genre);
    }

    #[test]
    fn test_non_object_model_is_rejected() {
        assert!(Parameters::from_model(&vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_query_encoding() {
        let params = Parameters::new()
            .with("page", 2)
            .with("query", "the dark knight")
            .with("with_genres", Value::Null);

        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("query".to_string(), "the dark knight".to_string()),
            ]
        );

        let request = HttpRequest::get("https://example.test/search/movie").with_query(query);
        assert_eq!(
            request.full_url(),
            "https://example.test/search/movie?page=2&query=the+dark+knight"
        );
    }

    #[test]
    fn test_redacted_url_masks_key() {
        let request = HttpRequest::get("https://example.test/genre/movie/list")
            .with_query(vec![("api_key".to_string(), "secret".to_string())]);
        assert!(!request.redacted_url().contains("secret"));
        assert!(request.full_url().contains("secret"));
    }
}
