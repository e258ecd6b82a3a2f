use vetted_core::path::{placeholders_conflict, to_brace_syntax};

#[test]
fn rewrites_every_placeholder() {
    assert_eq!(to_brace_syntax("/hello/:name"), "/hello/{name}");
    assert_eq!(to_brace_syntax("/a/:foo/b/:bar"), "/a/{foo}/b/{bar}");
    assert_eq!(to_brace_syntax("/users/:user_id/posts"), "/users/{user_id}/posts");
}

#[test]
fn leaves_plain_paths_alone() {
    assert_eq!(to_brace_syntax("/"), "/");
    assert_eq!(to_brace_syntax("/authors/search"), "/authors/search");
}

#[test]
fn bare_colon_is_kept() {
    assert_eq!(to_brace_syntax("/time/:"), "/time/:");
    assert_eq!(to_brace_syntax("/a:-b"), "/a:-b");
}

#[test]
fn placeholder_ends_at_first_non_word_character() {
    assert_eq!(to_brace_syntax("/files/:name.json"), "/files/{name}.json");
    assert_eq!(to_brace_syntax("/x/:a-:b"), "/x/{a}-{b}");
}

#[test]
fn placeholder_names_must_agree_on_shared_prefixes() {
    assert!(placeholders_conflict("/users/{id}", "/users/{userId}"));
    assert!(placeholders_conflict("/users/{id}", "/users/{userId}/"));
    assert!(placeholders_conflict("/a/{x}/b/{y}", "/a/{x}/b/{z}/c"));
    assert!(!placeholders_conflict("/users/{id}", "/users/{id}"));
    assert!(!placeholders_conflict("/users/{id}", "/users/me"));
    assert!(!placeholders_conflict("/a/{x}", "/b/{y}"));
}
