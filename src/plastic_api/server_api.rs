use crate::advisor::{Advisor, AdvisoryRequest};
use crate::catalog::PlasticCatalog;
use crate::classifier::RandomForest;
use crate::config::Config;
use crate::error::ErrorBody;
use crate::plastic_api::handlers;
use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use anyhow::{Context, Error};

/// Read-only state shared by every worker.
pub struct AppState {
    advisor: Advisor<PlasticCatalog, RandomForest>,
}

impl AppState {
    pub fn new(advisor: Advisor<PlasticCatalog, RandomForest>) -> Self {
        AppState { advisor }
    }

    /// Loads the catalog and the model. Neither failure is fatal: the
    /// advisory route reports the missing dependency instead.
    pub fn from_config(config: &Config) -> Self {
        let catalog = PlasticCatalog::load(&config.catalog_path, config.duplicate_policy);

        let model = match RandomForest::load(&config.model_path) {
            Ok(forest) => {
                tracing::info!(path = %config.model_path.display(), trees = forest.n_trees(), "model loaded");
                Some(forest)
            }
            Err(e) => {
                tracing::warn!("cannot load model: {e:#}");
                None
            }
        };

        let advisor = Advisor::new(catalog).with_predictor(model, config.consult_model);
        if advisor.has_predictor() && !advisor.consults_model() {
            tracing::warn!("model loaded but not consulted for advisories; set CONSULT_MODEL=true to attach its prediction");
        }
        tracing::info!(consult_model = advisor.consults_model(), "advisor ready");
        AppState { advisor }
    }

    pub fn advisor(&self) -> &Advisor<PlasticCatalog, RandomForest> {
        &self.advisor
    }

    pub fn advise(&self, request: &AdvisoryRequest) -> HttpResponse {
        match self.advisor.advise(request) {
            Ok(response) => HttpResponse::Ok().json(response),
            Err(e) => e.error_response(),
        }
    }
}

/// Routes and body handling shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody::new(&err);
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json)
        .route("/", web::get().to(handlers::home))
        .route("/predict", web::get().to(handlers::predict_probe))
        .route("/predict", web::post().to(handlers::predict));
}

pub async fn run(config: Config) -> Result<(), Error> {
    let state = web::Data::new(AppState::from_config(&config));
    let bind_address = config.bind_address.clone();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    tracing::info!("plastic advisor listening on http://{bind_address}");
    server
        .bind(&bind_address)
        .with_context(|| format!("cannot bind {bind_address}"))?
        .run()
        .await?;
    Ok(())
}
