//! Fully qualified method names.
//!
//! Accepted shapes: `/main.Biz/Check` and `main.Biz/Check`. Only one leading
//! slash is stripped.

/// Service segment of a method path or ACL pattern.
///
/// Returns the text before the first `/` once a single leading slash has been
/// removed. A path without a separator is its own service segment.
pub fn service_of(path: &str) -> &str {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.split_once('/') {
        Some((svc, _)) => svc,
        None => trimmed,
    }
}

/// Split a method path into `(service, method)`.
pub fn split_method(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (svc, method) = trimmed.split_once('/')?;
    if svc.is_empty() || method.is_empty() {
        return None;
    }
    Some((svc, method))
}

/// Build the canonical `/<service>/<method>` form.
pub fn full_method(service: &str, method: &str) -> String {
    format!("/{service}/{method}")
}
