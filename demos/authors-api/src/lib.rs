//! A small authors service: the endpoints, their schemas and an in-memory store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use vetted::prelude::*;
use vetted::vetted_schema::{NumberSchema, ObjectSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub favorite_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    pub name: String,
    pub age: u32,
    pub favorite_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    name: String,
    age: Option<u32>,
}

/// Authors kept in memory for the lifetime of the process.
#[derive(Clone, Default)]
pub struct AuthorStore {
    authors: Arc<RwLock<Vec<Author>>>,
}

impl AuthorStore {
    /// A store holding one author, John (21).
    pub fn seeded() -> Self {
        let john = Author {
            id: "1".into(),
            name: "John".into(),
            age: 21,
            favorite_color: None,
        };
        Self {
            authors: Arc::new(RwLock::new(vec![john])),
        }
    }

    pub async fn insert(&self, new: NewAuthor) -> Author {
        let mut authors = self.authors.write().await;
        let author = Author {
            id: (authors.len() + 1).to_string(),
            name: new.name,
            age: new.age,
            favorite_color: new.favorite_color,
        };
        authors.push(author.clone());
        author
    }

    /// Authors whose name matches exactly (ignoring case), optionally of a given age.
    pub async fn search(&self, name: &str, age: Option<u32>) -> Vec<Author> {
        self.authors
            .read()
            .await
            .iter()
            .filter(|a| a.name.eq_ignore_ascii_case(name))
            .filter(|a| age.map_or(true, |age| a.age == age))
            .cloned()
            .collect()
    }
}

fn author_age() -> NumberSchema {
    number().int().min(18).max(99)
}

fn new_author_schema() -> ObjectSchema {
    object()
        .field("name", string().max(10))
        .field("age", author_age())
        .field("favoriteColor", string().optional())
}

fn author_schema() -> ObjectSchema {
    object()
        .field("id", string())
        .field("name", string())
        .field("age", number())
        .field("favoriteColor", string().nullable())
}

/// `GET /` and `GET /hello/:name`.
pub fn greeting_routes() -> Result<EndpointRouter, RegistrationError> {
    let mut router = EndpointRouter::new();
    router.get(
        "/",
        EndpointSchemas::new().response(200, string().with_description("Always \"healthy\"")),
        |_| async { Ok((200, json!("healthy"))) },
    )?;
    router.get(
        "/hello/:name",
        EndpointSchemas::new()
            .params(object().field("name", string().max(10).with_description("Who to greet")))
            .response(200, object().field("hello", string())),
        |input: Input| async move {
            let name = input.param("name").unwrap_or_default();
            Ok((200, json!({ "hello": name })))
        },
    )?;
    Ok(router)
}

/// `POST /authors` and `GET /authors/search`, backed by `store`.
pub fn author_routes(store: AuthorStore) -> Result<EndpointRouter, RegistrationError> {
    let mut router = EndpointRouter::new();

    let create_store = store.clone();
    router.post(
        "/authors",
        EndpointSchemas::new()
            .body(new_author_schema().with_description("The author to register"))
            .response(201, author_schema().with_description("The registered author")),
        move |input: Input| {
            let store = create_store.clone();
            async move {
                let new: NewAuthor = input.body_as()?;
                let author = store.insert(new).await;
                tracing::info!(id = %author.id, "author registered");
                Ok((201, serde_json::to_value(author)?))
            }
        },
    )?;

    router.get(
        "/authors/search",
        EndpointSchemas::new()
            .query(
                object()
                    .field("name", string().max(10))
                    .field("age", author_age().coerce().optional()),
            )
            .response(
                200,
                array(object().field("name", string()).field("age", number()))
                    .with_description("Matching authors"),
            ),
        move |input: Input| {
            let store = store.clone();
            async move {
                let query: SearchQuery = input.query_as()?;
                let found = store.search(&query.name, query.age).await;
                Ok((200, serde_json::to_value(found)?))
            }
        },
    )?;

    Ok(router)
}

/// The full application: both routers, panic recovery and the OpenAPI document.
pub fn app(store: AuthorStore, openapi: OpenApiConfig) -> Result<App, RegistrationError> {
    Ok(App::new()
        .add_router(greeting_routes()?)?
        .add_router(author_routes(store)?)?
        .with(ErrorHandling)
        .with(OpenApiPlugin::new(openapi)))
}
