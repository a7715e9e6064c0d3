use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use serde_json::Value;
use thiserror::Error;

/// Input loading failures are fatal for the whole run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported input JSON structure for start urls")]
    UnsupportedShape,
    #[error("no start urls found in the input")]
    NoUrls,
}

/// Load the flat, ordered list of start URLs from an input JSON file.
pub fn load_start_urls(path: &Path) -> Result<Vec<String>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let urls = collect_start_urls(&value)?;
    engine_info!("loaded {} url(s) from {}", urls.len(), path.display());
    Ok(urls)
}

/// Resolve start URLs from any of the accepted JSON shapes:
/// an array of strings, an array of objects carrying `startUrl`, `url`, or a
/// nested `startUrls` array, or a single object with a top-level
/// `startUrls`/`urls` array.
pub fn collect_start_urls(value: &Value) -> Result<Vec<String>, InputError> {
    let mut urls: Vec<String> = Vec::new();
    match value {
        Value::Object(map) => {
            let candidates = map.get("startUrls").or_else(|| map.get("urls"));
            if let Some(Value::Array(items)) = candidates {
                urls.extend(string_entries(items));
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(url) => urls.push(url.clone()),
                    Value::Object(map) => {
                        let start_url = non_empty_str(map.get("startUrl"));
                        let url = non_empty_str(map.get("url"));
                        if let Some(found) = start_url {
                            urls.push(found.to_string());
                        } else if let Some(found) = url {
                            urls.push(found.to_string());
                        } else if let Some(Value::Array(nested)) = map.get("startUrls") {
                            urls.extend(string_entries(nested));
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => return Err(InputError::UnsupportedShape),
    }

    urls.retain(|url| !url.trim().is_empty());
    if urls.is_empty() {
        return Err(InputError::NoUrls);
    }
    Ok(urls)
}

fn string_entries(items: &[Value]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .filter_map(|item| item.as_str())
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}
