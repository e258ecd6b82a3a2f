use authors_api::{app, AuthorStore};
use serde_json::{json, Value};
use vetted::prelude::*;
use vetted_test::TestApp;

fn test_app() -> TestApp {
    let app = app(AuthorStore::seeded(), OpenApiConfig::new("Authors API", "1.0.0")).unwrap();
    TestApp::from_app(app)
}

// ── Greetings ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
    test_app().get("/").send().await.assert_ok().assert_json("healthy");
}

#[tokio::test]
async fn unimplemented_method_is_not_allowed() {
    test_app().post("/").send().await.assert_method_not_allowed();
}

#[tokio::test]
async fn valid_params() {
    test_app()
        .get("/hello/world")
        .send()
        .await
        .assert_ok()
        .assert_json(json!({"hello": "world"}));
}

#[tokio::test]
async fn params_at_max_length_pass() {
    test_app()
        .get("/hello/abcdefghij")
        .send()
        .await
        .assert_ok()
        .assert_json_path("hello", "abcdefghij");
}

#[tokio::test]
async fn invalid_params() {
    test_app()
        .get("/hello/stringlongerthantencharacters")
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("params.name");
}

#[tokio::test]
async fn undecodable_params_are_rejected() {
    test_app()
        .get("/hello/%FF%FE%FF%FE%FF%FE%FF%FE%FF%FE%FF%FE")
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("params");
}

// ── POST /authors ───────────────────────────────────────────────────────────

#[tokio::test]
async fn query_without_query_schema_is_rejected() {
    test_app()
        .post("/authors")
        .query("firstname", "John")
        .query("lastname", "Doe")
        .query("age", 21)
        .json(&json!({"name": "John", "age": 21}))
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("query");
}

#[tokio::test]
async fn omitted_optional_field_comes_back_null() {
    test_app()
        .post("/authors")
        .json(&json!({"name": "John", "age": 21}))
        .send()
        .await
        .assert_created()
        .assert_json(json!({"id": "2", "name": "John", "age": 21, "favoriteColor": null}));
}

#[tokio::test]
async fn valid_body_is_echoed() {
    test_app()
        .post("/authors")
        .json(&json!({"name": "John", "age": 21, "favoriteColor": "blue"}))
        .send()
        .await
        .assert_created()
        .assert_json_path("favoriteColor", "blue")
        .assert_json_path("name", "John");
}

#[tokio::test]
async fn undeclared_body_keys_are_dropped() {
    test_app()
        .post("/authors")
        .json(&json!({"name": "Ann", "age": 40, "admin": true}))
        .send()
        .await
        .assert_created()
        .assert_json_path("admin", Value::Null);
}

#[tokio::test]
async fn missing_body_is_rejected() {
    test_app()
        .post("/authors")
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("error", "Request body is required");
}

#[tokio::test]
async fn age_boundaries() {
    let app = test_app();
    for age in [18, 99] {
        app.post("/authors")
            .json(&json!({"name": "Edge", "age": age}))
            .send()
            .await
            .assert_created();
    }
    for age in [17, 100, 1] {
        app.post("/authors")
            .json(&json!({"name": "Edge", "age": age}))
            .send()
            .await
            .assert_bad_request()
            .assert_validation_error("body.age");
    }
}

#[tokio::test]
async fn missing_age_is_rejected() {
    test_app()
        .post("/authors")
        .json(&json!({"name": "John"}))
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("body.age")
        .assert_json_path("details[0].code", "required");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    test_app()
        .post("/authors")
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("details[0].code", "invalid_json");
}

// ── GET /authors/search ─────────────────────────────────────────────────────

#[tokio::test]
async fn valid_query() {
    test_app()
        .get("/authors/search?name=John&age=21")
        .send()
        .await
        .assert_ok()
        .assert_json(json!([{"name": "John", "age": 21}]));
}

#[tokio::test]
async fn query_is_required_by_handler() {
    test_app()
        .get("/authors/search")
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("error", "Request query is required");
}

#[tokio::test]
async fn extra_query_keys_are_ignored() {
    test_app()
        .get("/authors/search?name=John&age=21&foo=bar")
        .send()
        .await
        .assert_ok()
        .assert_json(json!([{"name": "John", "age": 21}]));
}

#[tokio::test]
async fn query_age_too_low() {
    test_app()
        .get("/authors/search?name=John&age=3")
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("query.age");
}

#[tokio::test]
async fn query_missing_name() {
    test_app()
        .get("/authors/search?age=21")
        .send()
        .await
        .assert_bad_request()
        .assert_validation_error("query.name");
}

#[tokio::test]
async fn optional_age_may_be_omitted() {
    test_app()
        .get("/authors/search?name=John")
        .send()
        .await
        .assert_ok()
        .assert_json(json!([{"name": "John", "age": 21}]));
}

#[tokio::test]
async fn registered_authors_are_searchable() {
    let app = test_app();
    app.post("/authors")
        .json(&json!({"name": "Octavia", "age": 58}))
        .send()
        .await
        .assert_created();
    app.get("/authors/search")
        .query("name", "octavia")
        .send()
        .await
        .assert_ok()
        .assert_json(json!([{"name": "Octavia", "age": 58}]));
}

// ── Registration & document ─────────────────────────────────────────────────

#[test]
fn author_routes_cannot_be_added_twice() {
    let err = App::new()
        .add_router(authors_api::author_routes(AuthorStore::default()).unwrap())
        .unwrap()
        .add_router(authors_api::author_routes(AuthorStore::default()).unwrap())
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "Endpoint already exists for POST /authors");
}

#[tokio::test]
async fn document_lists_every_path() {
    let resp = test_app()
        .get("/openapi.json")
        .send()
        .await
        .assert_ok()
        .assert_json_path("openapi", "3.0.3")
        .assert_json_path("info.title", "Authors API");
    let doc: Value = resp.json();
    let mut paths: Vec<&String> = doc["paths"].as_object().unwrap().keys().collect();
    paths.sort();
    assert_eq!(paths, vec!["/", "/authors", "/authors/search", "/hello/{name}"]);
    assert!(doc["paths"]["/authors"]["post"]["requestBody"].is_object());
    assert_eq!(doc["paths"]["/authors/search"]["get"]["parameters"].as_array().unwrap().len(), 2);
}
