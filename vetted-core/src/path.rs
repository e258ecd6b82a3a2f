/// Rewrite `:name` placeholders into `{name}` form.
///
/// Every colon followed by at least one word character (`[A-Za-z0-9_]`) is
/// replaced, wherever it appears in the path:
///
/// ```
/// use vetted_core::path::to_brace_syntax;
///
/// assert_eq!(to_brace_syntax("/a/:foo/b/:bar"), "/a/{foo}/b/{bar}");
/// assert_eq!(to_brace_syntax("/plain"), "/plain");
/// ```
pub fn to_brace_syntax(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek().is_some_and(|next| is_word(*next)) {
            out.push('{');
            while let Some(&next) = chars.peek() {
                if !is_word(next) {
                    break;
                }
                out.push(next);
                chars.next();
            }
            out.push('}');
        } else {
            out.push(c);
        }
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether two `{name}`-syntax routes reach the same placeholder position
/// through identical segments but call it by different names.
///
/// The router cannot hold such a pair, whatever follows the placeholder.
///
/// ```
/// use vetted_core::path::placeholders_conflict;
///
/// assert!(placeholders_conflict("/users/{id}", "/users/{userId}/posts"));
/// assert!(!placeholders_conflict("/users/{id}", "/users/{id}/posts"));
/// assert!(!placeholders_conflict("/users/{id}", "/teams/{teamId}"));
/// ```
pub fn placeholders_conflict(a: &str, b: &str) -> bool {
    for (left, right) in a.split('/').zip(b.split('/')) {
        if left == right {
            continue;
        }
        return is_placeholder(left) && is_placeholder(right);
    }
    false
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}
