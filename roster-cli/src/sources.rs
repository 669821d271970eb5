//! Reference name list loading.
//!
//! Remote lists are published name databases (one row per name, first
//! comma-separated field is the name). Local lists are plain text, one name
//! per line. Everything is unioned into a single NameDictionary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use roster_core::dictionary::{parse_name_list, parse_name_lines};
use roster_core::{NameDictionary, NameDictionaryProvider};
use roster_types::{DictionaryError, ReferenceSources};
use tracing::{debug, info, warn};

use crate::table::decode_field;

/// Default timeout for each list download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Loads a [`NameDictionary`] from the configured [`ReferenceSources`].
#[derive(Debug, Clone)]
pub struct ReferenceLoader {
    sources: ReferenceSources,
    timeout: Duration,
}

impl ReferenceLoader {
    /// Loader over `sources` with the default timeout.
    pub fn new(sources: ReferenceSources) -> Self {
        Self {
            sources,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured sources.
    pub fn sources(&self) -> &ReferenceSources {
        &self.sources
    }

    fn client(&self, first_url: &str) -> Result<reqwest::blocking::Client, DictionaryError> {
        reqwest::blocking::Client::builder()
            .user_agent(format!("roster/{}", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| DictionaryError::Fetch {
                source: first_url.to_string(),
                reason: e.to_string(),
            })
    }
}

impl NameDictionaryProvider for ReferenceLoader {
    fn load(&self) -> Result<NameDictionary, DictionaryError> {
        let mut dictionary = NameDictionary::new();

        let given_urls = self.sources.given_url_list();
        let surname_urls = self.sources.surname_url_list();

        if let Some(first) = given_urls.iter().chain(&surname_urls).next() {
            let client = self.client(first)?;

            for url in &given_urls {
                let text = fetch_list(&client, url)?;
                dictionary.extend_given_names(parse_name_list(&text));
                debug!(url, "loaded given-name list");
            }
            for url in &surname_urls {
                let text = fetch_list(&client, url)?;
                dictionary.extend_surnames(parse_name_list(&text));
                debug!(url, "loaded surname list");
            }
        }

        dictionary.extend_given_names(read_local_lists(&self.sources.given_files)?);
        dictionary.extend_surnames(read_local_lists(&self.sources.surname_files)?);

        info!(
            given_names = dictionary.given_name_count(),
            surnames = dictionary.surname_count(),
            "reference name lists loaded"
        );

        Ok(dictionary)
    }
}

/// Downloads one list as text.
pub fn fetch_list(client: &reqwest::blocking::Client, url: &str) -> Result<String, DictionaryError> {
    let response = client.get(url).send().map_err(|e| DictionaryError::Fetch {
        source: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(DictionaryError::Status {
            source: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().map_err(|e| DictionaryError::Fetch {
        source: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(decode_field(&bytes))
}

/// Reads local name files, one name per line.
///
/// Paths that do not exist are skipped with a warning.
pub fn read_local_lists(paths: &[PathBuf]) -> Result<Vec<String>, DictionaryError> {
    let mut names = Vec::new();

    for path in paths {
        if !path.exists() {
            warn!(path = %path.display(), "name list not found, skipping");
            continue;
        }
        let text = read_local_list(path)?;
        let before = names.len();
        names.extend(parse_name_lines(&text));
        debug!(path = %path.display(), names = names.len() - before, "loaded local name list");
    }

    Ok(names)
}

fn read_local_list(path: &Path) -> Result<String, DictionaryError> {
    std::fs::read(path)
        .map(|bytes| decode_field(&bytes))
        .map_err(|e| DictionaryError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
