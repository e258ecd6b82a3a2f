use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use vetted_core::plugins::ErrorHandling;
use vetted_core::{App, EndpointRouter, EndpointSchemas, HttpMethod, Input, Plugin, RegistrationError};
use vetted_schema::string;

fn router_with(path: &'static str, reply: &'static str) -> EndpointRouter {
    let mut router = EndpointRouter::new();
    router
        .get(path, EndpointSchemas::new().response(200, string()), move |_| async move {
            Ok((200, json!(reply)))
        })
        .unwrap();
    router
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let resp = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn routers_are_merged_into_one_app() {
    let app = App::new()
        .add_router(router_with("/one", "first"))
        .unwrap()
        .add_router(router_with("/two", "second"))
        .unwrap();
    assert_eq!(app.endpoints().len(), 2);
    assert_eq!(app.endpoints()[0].path, "/one");
    assert_eq!(app.endpoints()[1].path, "/two");

    let router = app.build();
    assert_eq!(get_json(router.clone(), "/one").await, (StatusCode::OK, json!("first")));
    assert_eq!(get_json(router, "/two").await, (StatusCode::OK, json!("second")));
}

#[test]
fn duplicate_across_routers_is_rejected() {
    let err = App::new()
        .add_router(router_with("/same", "a"))
        .unwrap()
        .add_router(router_with("/same", "b"))
        .err()
        .unwrap();
    assert_eq!(
        err,
        RegistrationError::Duplicate {
            method: HttpMethod::Get,
            path: "/same".into(),
        }
    );
}

#[test]
fn placeholder_conflict_across_routers_is_rejected() {
    let err = App::new()
        .add_router(router_with("/users/:id", "a"))
        .unwrap()
        .add_router(router_with("/users/:id/posts", "b"))
        .unwrap()
        .add_router(router_with("/users/:name/", "c"))
        .err()
        .unwrap();
    assert_eq!(
        err,
        RegistrationError::Conflict {
            path: "/users/:name/".into(),
            existing: "/users/:id".into(),
        }
    );
}

#[tokio::test]
async fn endpoint_consumer_sees_every_router() {
    let app = App::new()
        .add_router(router_with("/one", "first"))
        .unwrap()
        .with_endpoint_consumer(|endpoints| {
            let paths: Vec<String> = endpoints.iter().map(|e| e.path.clone()).collect();
            Router::new().route("/registry", get(move || async move { axum::Json(paths) }))
        })
        .add_router(router_with("/two", "second"))
        .unwrap();

    let (status, body) = get_json(app.build(), "/registry").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["/one", "/two"]));
}

#[tokio::test]
async fn layer_fn_wraps_every_route() {
    let app = App::new()
        .add_router(router_with("/one", "first"))
        .unwrap()
        .with_layer_fn(|router| {
            router.layer(axum::middleware::map_response(|mut resp: axum::response::Response| async move {
                resp.headers_mut().insert("x-vetted", HeaderValue::from_static("yes"));
                resp
            }))
        });
    let resp = app
        .build()
        .oneshot(Request::builder().uri("/one").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-vetted").unwrap(), "yes");
}

struct Marker;

impl Plugin for Marker {
    fn install(self, app: App) -> App {
        app.with_endpoint_consumer(|endpoints| {
            let count = endpoints.len();
            Router::new().route("/count", get(move || async move { axum::Json(count) }))
        })
    }
}

#[tokio::test]
async fn plugins_are_installed_with_with() {
    let app = App::new()
        .add_router(router_with("/one", "first"))
        .unwrap()
        .with(Marker);
    assert_eq!(get_json(app.build(), "/count").await, (StatusCode::OK, json!(1)));
}

#[tokio::test]
async fn error_handling_turns_panics_into_500() {
    let mut router = EndpointRouter::new();
    router
        .get("/boom", EndpointSchemas::new().response(200, string()), |input: Input| async move {
            if input.query.is_none() {
                panic!("handler exploded");
            }
            Ok((200, json!("unreachable")))
        })
        .unwrap();
    let app = App::new().add_router(router).unwrap().with(ErrorHandling);
    let (status, body) = get_json(app.build(), "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}
