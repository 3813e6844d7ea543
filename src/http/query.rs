//! Query string access
//!
//! Values are form-decoded and returned as-is: no trimming, no filtering.

use url::form_urlencoded;

/// Value of the first `name` parameter in `query`
///
/// A missing query string or parameter yields `None`.
pub fn get_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
