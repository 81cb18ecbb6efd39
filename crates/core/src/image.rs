//! Image URL normalization.
//!
//! Appwrite storage URLs only resolve when they carry the project ID as a
//! `project` query parameter. Catalog documents store the bare file URL, so
//! every screen that shows a remote image runs it through
//! [`build_image_url`] first.

/// Query parameter Appwrite reads the project ID from.
pub const PROJECT_PARAM: &str = "project";

/// Append the project query parameter to `url` unless it is already present.
///
/// Returns `url` unchanged when:
/// - `url` is empty
/// - `url` already has a `project=` parameter (so the function is idempotent)
/// - `project_id` is `None` or empty
///
/// Otherwise the percent-encoded project ID is appended with `&` if `url`
/// already has a query string and `?` if it does not.
///
/// ```
/// use quickbite_core::build_image_url;
///
/// assert_eq!(build_image_url("https://x/y", Some("p1")), "https://x/y?project=p1");
/// assert_eq!(build_image_url("https://x/y?a=1", Some("p1")), "https://x/y?a=1&project=p1");
/// ```
#[must_use]
pub fn build_image_url(url: &str, project_id: Option<&str>) -> String {
    if url.is_empty() || has_project_param(url) {
        return url.to_owned();
    }

    let Some(project_id) = project_id.filter(|id| !id.is_empty()) else {
        return url.to_owned();
    };

    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{url}{separator}{PROJECT_PARAM}={}",
        urlencoding::encode(project_id)
    )
}

fn has_project_param(url: &str) -> bool {
    let needle = format!("{PROJECT_PARAM}=");
    url.match_indices(&needle).any(|(index, _)| {
        index
            .checked_sub(1)
            .and_then(|prev| url.as_bytes().get(prev))
            .is_some_and(|&b| b == b'?' || b == b'&')
    })
}
