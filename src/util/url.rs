use crate::error::Error;
use reqwest::Url;

/// Joins a base URL and a path into an absolute URL.
///
/// An empty base returns the path unchanged. Otherwise the base must parse as
/// a URL; the trailing `/` of the base and the leading `/` of the path are
/// trimmed so the result carries exactly one separator. Only one layer of
/// slashes is trimmed; paths with internal doubled slashes pass through as-is.
pub fn join_url(base: &str, path: &str) -> Result<String, Error> {
    if base.is_empty() {
        return Ok(path.to_string());
    }
    let parsed = Url::parse(base).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    Ok(format!(
        "{}/{}",
        parsed.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
