//! Asset URL normalization
//!
//! The backend hands out image references in several shapes: absolute URLs,
//! root-relative paths, and bare media paths. Everything funnels through one
//! resolver so the callers never branch on the raw shape.

/// Normalize a raw asset reference into a displayable URL.
///
/// Absolute `http(s)` URLs pass through; anything else becomes
/// root-relative. Blank input resolves to `None`.
pub fn resolve_asset_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    if raw.starts_with('/') {
        return Some(raw.to_string());
    }
    Some(format!("/{raw}"))
}
