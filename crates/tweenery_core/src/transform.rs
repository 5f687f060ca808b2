//! Transform-string merging
//!
//! Transform strings are whitespace-separated function calls such as
//! `"translateX(50px) rotate(10deg) scale(.5)"`. Functions are matched by
//! name only; arguments are never parsed.

/// Function name of a transform token: everything before the first `(`
pub fn transform_name(token: &str) -> &str {
    token.split('(').next().unwrap_or(token)
}

/// Merge `transform` into `target`.
///
/// Every function of `target` whose name also appears in `transform` is
/// dropped, then the whole of `transform` is appended as-is.
///
/// ```rust
/// use tweenery_core::compute_transform;
///
/// assert_eq!(
///     compute_transform("translateX(50px) scale(.5)", "translateX(10px) scale(1)"),
///     "translateX(10px) scale(1)"
/// );
/// ```
pub fn compute_transform(target: &str, transform: &str) -> String {
    let overridden: Vec<&str> = transform.split_whitespace().map(transform_name).collect();

    let mut parts: Vec<&str> = target
        .split_whitespace()
        .filter(|token| !overridden.contains(&transform_name(token)))
        .collect();

    if !transform.is_empty() {
        parts.push(transform);
    }

    parts.join(" ")
}
