//! Static permanent redirects.
//!
//! The lookup is pure; the dispatcher turns a hit into a `301` response and
//! skips routing for that request.

use std::collections::HashMap;

/// Target of a static redirect for `uri`, matched exactly.
pub fn process_redirect<'a>(uri: &str, map: &'a HashMap<String, String>) -> Option<&'a str> {
    map.get(uri).map(String::as_str)
}
