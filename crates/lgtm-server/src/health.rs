use actix_http::StatusCode;
use actix_web::{web, HttpResponse, Responder};

use crate::server::AppContext;

pub async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let database_status = ctx.db_service.health_check().await.is_ok();
    let cache_status = ctx.cache_service.health_check().await.is_ok();
    let all_good = database_status && cache_status;
    let status_code = if all_good {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "database": database_status,
        "cache": cache_status,
    }))
}
