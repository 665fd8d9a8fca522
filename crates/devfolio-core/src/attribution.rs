//! Session-scoped UTM attribution.
//!
//! Campaign parameters passed on startup are kept in a small JSON file for the
//! lifetime of the launching shell session, so later launches without
//! parameters still report the original source.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FolioError;

/// Overrides the session key used to name the store file.
pub const SESSION_ENV: &str = "DEVFOLIO_SESSION";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_id: Option<String>,
}

impl UtmParameters {
    /// Parses `utm_*` keys out of a query string such as
    /// `?utm_source=news&utm_medium=email`. Other keys and empty values are
    /// ignored; the first occurrence of a key wins.
    pub fn parse_query(query: &str) -> Result<Self, FolioError> {
        let mut params = Self::default();
        let query = query.trim().trim_start_matches('?');
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            if value.is_empty() {
                continue;
            }
            let Some(slot) = params.slot_mut(&decode_component(key)?) else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(params)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    /// Present parameters in canonical key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("utm_source", &self.utm_source),
            ("utm_medium", &self.utm_medium),
            ("utm_campaign", &self.utm_campaign),
            ("utm_term", &self.utm_term),
            ("utm_content", &self.utm_content),
            ("utm_id", &self.utm_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "utm_source" => Some(&mut self.utm_source),
            "utm_medium" => Some(&mut self.utm_medium),
            "utm_campaign" => Some(&mut self.utm_campaign),
            "utm_term" => Some(&mut self.utm_term),
            "utm_content" => Some(&mut self.utm_content),
            "utm_id" => Some(&mut self.utm_id),
            _ => None,
        }
    }
}

fn decode_component(text: &str) -> Result<String, FolioError> {
    let spaced = text.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|value| value.into_owned())
        .map_err(|err| FolioError::Attribution(format!("invalid query component '{text}': {err}").into()))
}

#[derive(Debug, Clone)]
pub struct AttributionStore {
    path: PathBuf,
}

impl AttributionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store shared by every launch from the same parent shell.
    pub fn session_default() -> Self {
        let key = std::env::var(SESSION_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| session_process_id().to_string());
        Self::new(std::env::temp_dir().join(format!("devfolio-utm-{key}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists `params` unless they are empty. Returns whether anything was
    /// written.
    pub fn capture(&self, params: &UtmParameters) -> Result<bool, FolioError> {
        if params.is_empty() {
            return Ok(false);
        }
        let text = serde_json::to_string(params)
            .map_err(|err| FolioError::Attribution(err.to_string().into()))?;
        fs::write(&self.path, text).map_err(|err| FolioError::io(&self.path, err))?;
        debug!(path = %self.path.display(), "stored utm parameters");
        Ok(true)
    }

    /// Stored parameters, or empty ones when nothing was captured yet.
    pub fn load(&self) -> Result<UtmParameters, FolioError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UtmParameters::default())
            }
            Err(err) => return Err(FolioError::io(&self.path, err)),
        };
        serde_json::from_str(&text).map_err(|err| {
            FolioError::Attribution(format!("{}: {err}", self.path.display()).into())
        })
    }

    /// Captures `current` and returns the parameters the session is attributed
    /// to. Store failures are logged and never fatal.
    pub fn resolve(&self, current: &UtmParameters) -> UtmParameters {
        if let Err(err) = self.capture(current) {
            warn!(error = %err, "failed to store utm parameters");
        }
        if !current.is_empty() {
            return current.clone();
        }
        self.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read utm parameters");
            UtmParameters::default()
        })
    }

    /// [`resolve`](Self::resolve) for a raw query string. A malformed query is
    /// logged and treated as empty.
    pub fn resolve_query(&self, query: Option<&str>) -> UtmParameters {
        let current = match query.map(UtmParameters::parse_query) {
            Some(Ok(params)) => params,
            Some(Err(err)) => {
                warn!(error = %err, "ignoring malformed utm query");
                UtmParameters::default()
            }
            None => UtmParameters::default(),
        };
        self.resolve(&current)
    }
}

#[cfg(unix)]
fn session_process_id() -> u32 {
    std::os::unix::process::parent_id()
}

#[cfg(not(unix))]
fn session_process_id() -> u32 {
    std::process::id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> AttributionStore {
        let path = std::env::temp_dir().join(format!(
            "devfolio-attribution-{name}-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        AttributionStore::new(path)
    }

    #[test]
    fn parses_utm_keys_and_ignores_the_rest() {
        let params = UtmParameters::parse_query(
            "?utm_source=news%20letter&utm_medium=&ref=x&utm_campaign=spring+launch&utm_source=other",
        )
        .expect("valid query");
        assert_eq!(params.utm_source.as_deref(), Some("news letter"));
        assert_eq!(params.utm_medium, None);
        assert_eq!(params.utm_campaign.as_deref(), Some("spring launch"));
        assert_eq!(
            params.pairs().collect::<Vec<_>>(),
            vec![("utm_source", "news letter"), ("utm_campaign", "spring launch")]
        );
    }

    #[test]
    fn empty_query_has_no_parameters() {
        assert!(UtmParameters::parse_query("").expect("empty").is_empty());
        assert!(UtmParameters::parse_query("?a=1&&b")
            .expect("no utm keys")
            .is_empty());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = UtmParameters::parse_query("utm_source=%FF").expect_err("invalid utf-8");
        assert!(matches!(err, FolioError::Attribution(_)));
    }

    #[test]
    fn capture_skips_empty_parameters() {
        let store = temp_store("empty");
        assert!(!store.capture(&UtmParameters::default()).expect("capture"));
        assert!(!store.path().exists());
        assert_eq!(store.load().expect("load"), UtmParameters::default());
    }

    #[test]
    fn resolve_prefers_current_and_falls_back_to_stored() {
        let store = temp_store("resolve");
        let first = UtmParameters::parse_query("utm_source=github&utm_id=42").expect("query");
        assert_eq!(store.resolve(&first), first);

        let stored = store.resolve(&UtmParameters::default());
        assert_eq!(stored, first);

        let text = fs::read_to_string(store.path()).expect("stored file");
        assert_eq!(text, r#"{"utm_source":"github","utm_id":"42"}"#);

        let second = UtmParameters::parse_query("utm_source=mail").expect("query");
        assert_eq!(store.resolve(&second), second);
        assert_eq!(store.load().expect("load"), second);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn corrupt_store_resolves_to_empty() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "not json").expect("write");
        assert!(store.load().is_err());
        assert!(store.resolve(&UtmParameters::default()).is_empty());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn malformed_query_falls_back_to_stored_parameters() {
        let store = temp_store("malformed");
        assert!(store.resolve_query(Some("utm_source=%FF")).is_empty());
        assert!(!store.path().exists());

        let stored = store.resolve_query(Some("utm_source=github"));
        assert_eq!(stored.utm_source.as_deref(), Some("github"));
        assert_eq!(store.resolve_query(Some("utm_source=%FF")), stored);
        assert_eq!(store.resolve_query(None), stored);
        let _ = fs::remove_file(store.path());
    }
}
