use authors_api::AuthorStore;
use vetted::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    vetted::init_tracing();

    let config = VettedConfig::load("dev")?;
    let server = ServerConfig::from_config(&config)?;
    let openapi = OpenApiConfig::from_config(&config)?;

    authors_api::app(AuthorStore::seeded(), openapi)?
        .with(Tracing)
        .serve(&server.addr())
        .await
}
