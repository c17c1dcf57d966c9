//! Upstream URL construction.
//!
//! Caller-supplied values (event ids, IP addresses) always travel as a single
//! percent-encoded path segment, never as raw text spliced into the URL.

use reqwest::Url;

use crate::error::{Error, Result};

/// Append `segments` to the path of `base`, each encoded as one segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let invalid = || Error::InvalidBaseUrl {
        url: base.to_string(),
    };

    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
