//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::items::ItemService;
use crate::core::validation::email::{EmailValidator, HickoryMxResolver};
use crate::server::routes;
use crate::server::routes::health::health_check;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result, ServiceError};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, wiring the store, the deliverability
    /// validator and the item service from configuration
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store = crate::storage::connect(&config.storage).await?;
        let resolver = Arc::new(HickoryMxResolver::from_system());
        let items = ItemService::new(
            store,
            EmailValidator::new(resolver),
            config.processing.clone(),
        );
        let state = AppState::new(config.clone(), items);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors.allow_any_method().allow_any_header();
        }

        App::new()
            .app_data(state)
            .app_data(json_error_config())
            .app_data(path_error_config())
            .wrap(cors)
            .wrap(Logger::default())
            .route("/health", web::get().to(health_check))
            .configure(routes::items::configure_item_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ServiceError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Translate malformed JSON bodies into the standard error envelope
pub fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        ApiError::with_category(
            ServiceError::Validation(vec![format!("body: {}", err)]),
            req.path(),
            "Malformed Request",
        )
        .into()
    })
}

/// Translate unparseable path segments (e.g. a non-numeric id) into the
/// standard error envelope
pub fn path_error_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        ApiError::with_category(
            ServiceError::invalid_parameter(format!("{}", err)),
            req.path(),
            "Type Mismatch",
        )
        .into()
    })
}
