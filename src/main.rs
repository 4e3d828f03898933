use dotenv::dotenv;
use plastic_advisor::config::Config;
use plastic_advisor::{init_tracing, plastic_api};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    tracing::debug!(?config, "starting");

    plastic_api::run(config).await
}
