use reqwest::Url;

use crate::error::CoreError;

/// Validate a base URL and normalise away trailing slashes so endpoint paths
/// can be appended with `format!("{base}/...")`.
pub fn parse_base_url(base_url: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(base_url).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid base url `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(base_url.trim_end_matches('/').to_owned()),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported base url scheme `{other}`; expected http or https"
        ))),
    }
}
