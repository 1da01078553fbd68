//! Server module.

use std::fs::File;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use lgtm_cache_interface::CacheService;
use lgtm_cache_memory::MemoryCacheService;
use lgtm_cache_null::NullCacheService;
use lgtm_config::{ApiDriver, CacheDriver, Config, DatabaseDriver};
use lgtm_core::{approvals::ApprovalRegistry, CoreContext, CoreModule};
use lgtm_database_interface::{DbService, Exchanger};
use lgtm_database_memory::MemoryDb;
use lgtm_ghapi_interface::ApiService;
use lgtm_ghapi_null::NullApiService;
use tracing::info;

use crate::{
    ghapi::MetricsApiService, health::health_check_route, metrics::build_metrics_handler,
    webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Approval algorithms.
    pub approval_registry: ApprovalRegistry,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
    /// API adapter.
    pub api_service: Box<dyn ApiService>,
    /// Cache adapter.
    pub cache_service: Box<dyn CacheService>,
}

impl AppContext {
    /// Create new app context, picking adapters from configured drivers.
    pub fn new(config: Config, core_module: CoreModule) -> Self {
        let api_service: Box<dyn ApiService> = match config.api.driver {
            ApiDriver::GitHub => Box::new(MetricsApiService::new(config.clone())),
            ApiDriver::Null => Box::new(NullApiService::new()),
        };
        let cache_service: Box<dyn CacheService> = match config.cache.driver {
            CacheDriver::Memory => Box::new(MemoryCacheService::new()),
            CacheDriver::Null => Box::new(NullCacheService::new()),
        };
        let db_service: Box<dyn DbService> = match config.database.driver {
            DatabaseDriver::Memory => Box::new(MemoryDb::new()),
        };

        Self {
            config,
            core_module,
            approval_registry: ApprovalRegistry::with_default_algorithms(),
            db_service,
            api_service,
            cache_service,
        }
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
        api_service: Box<dyn ApiService>,
        cache_service: Box<dyn CacheService>,
    ) -> Self {
        Self {
            config,
            core_module,
            approval_registry: ApprovalRegistry::with_default_algorithms(),
            db_service,
            api_service,
            cache_service,
        }
    }

    /// Load users and repositories from the configured seed file, if any.
    pub async fn seed_database(&self) -> Result<()> {
        let path = &self.config.database.seed_file;
        if path.is_empty() {
            return Ok(());
        }

        let file = File::open(path).map_err(|e| ServerError::IoError { source: e })?;
        Exchanger::import_from_json(self.db_service.as_ref(), file)
            .await
            .map_err(|e| ServerError::SeedError {
                path: path.clone(),
                source: e,
            })?;

        info!(path = %path, message = "Seeded database");
        Ok(())
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            approval_registry: &self.approval_registry,
            api_service: self.api_service.as_ref(),
            db_service: self.db_service.as_ref(),
            cache_service: self.cache_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let prometheus = build_metrics_handler();

    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Logger::default())
        .service(web::scope("/webhook").configure(configure_webhook_handlers))
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on lgtm!" }))
            }),
        )
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            error::InternalError::from_response(
                "",
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": err.to_string()
                })),
            )
            .into()
        }))
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting bot server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let workers_count = context.config.server.workers_count;

    let server = {
        let mut server = HttpServer::new(move || build_actix_app(context.clone()));

        if let Some(workers) = workers_count {
            server = server.workers(workers as usize);
        }

        server
            .bind(ip_with_port)
            .map_err(|e| ServerError::IoError { source: e })?
            .run()
    };

    server
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
