//! URL construction helpers for the conversation server API.
//!
//! Pure functions so every call builds endpoints the same way. Paths are
//! appended to whatever path the base URL already has, which keeps servers
//! mounted under a prefix working.

use crate::error::HttpResult;
use url::Url;

const CONFIG_PATH: &str = "api/options/config";
const CONVERSATIONS_PATH: &str = "api/conversations";

/// Parse a normalized server URL into a base [`Url`].
pub fn parse_base_url(base: &str) -> HttpResult<Url> {
    Ok(Url::parse(base)?)
}

fn with_path(base: &Url, tail: &str) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}/{tail}"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Health/config endpoint used by the probe.
pub fn build_probe_url(base: &Url) -> Url {
    with_path(base, CONFIG_PATH)
}

/// Conversation list endpoint.
pub fn build_conversations_url(base: &Url) -> Url {
    with_path(base, CONVERSATIONS_PATH)
}

/// Messages endpoint of one conversation (GET and POST).
///
/// The id is percent-encoded as a single path segment.
pub fn build_messages_url(base: &Url, conversation_id: &str) -> Url {
    with_path(
        base,
        &format!(
            "{CONVERSATIONS_PATH}/{}/messages",
            urlencoding::encode(conversation_id)
        ),
    )
}
