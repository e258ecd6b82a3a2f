use serde_json::Value;

/// One step of a JSON path such as `details[0].field`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathToken {
    Field(String),
    Index(usize),
    /// `len()`: the number of elements, entries or characters.
    Len,
}

/// Split a path like `details[0].field` or `items.len()` into steps.
///
/// Panics on an unclosed bracket or a non-numeric index.
pub fn tokenize_path(path: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('.') {
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('[') {
            let close = tail
                .find(']')
                .unwrap_or_else(|| panic!("unclosed bracket in JSON path {path:?}"));
            let index = tail[..close]
                .trim()
                .parse()
                .unwrap_or_else(|_| panic!("non-numeric array index in JSON path {path:?}"));
            tokens.push(PathToken::Index(index));
            rest = &tail[close + 1..];
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let name = &rest[..end];
            tokens.push(if name == "len()" {
                PathToken::Len
            } else {
                PathToken::Field(name.to_string())
            });
            rest = &rest[end..];
        }
    }
    tokens
}

/// Follow `path` from `root`. Steps that lead nowhere resolve to `null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    tokenize_path(path)
        .into_iter()
        .fold(root.clone(), |current, token| match token {
            PathToken::Field(name) => current.get(&name).cloned().unwrap_or(Value::Null),
            PathToken::Index(i) => current.get(i).cloned().unwrap_or(Value::Null),
            PathToken::Len => Value::from(match &current {
                Value::Array(items) => items.len(),
                Value::Object(entries) => entries.len(),
                Value::String(s) => s.chars().count(),
                other => panic!("len() applied to a non-collection: {other}"),
            }),
        })
}
