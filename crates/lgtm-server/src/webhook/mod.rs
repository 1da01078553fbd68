//! Webhook handlers.

mod issues;
mod pulls;
mod push;
mod statuses;

#[cfg(test)]
mod tests;

use std::convert::TryFrom;

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use lgtm_core::CoreContext;
use lgtm_ghapi_interface::types::GhRepository;
use lgtm_models::{Hook, RepositoryRef};
use serde::Deserialize;
use tracing::debug;

use self::{
    issues::parse_issue_comment_event, pulls::parse_pull_request_event,
    push::parse_push_event, statuses::parse_status_event,
};
use crate::{
    constants::{GITHUB_EVENT_HEADER, PONG_RESPONSE},
    event_type::EventType,
    metrics::WEBHOOK_HOOKS,
    server::AppContext,
    utils::convert_payload_to_string,
    Result, ServerError,
};

/// Turn an event into a hook, `None` when the event triggers nothing.
fn classify_event(event_type: EventType, body: &str) -> Result<Option<Hook>> {
    match event_type {
        EventType::IssueComment => Ok(parse_issue_comment_event(body)?.map(Hook::Comment)),
        EventType::PullRequest => {
            Ok(parse_pull_request_event(body)?.map(Hook::PullRequestOpened))
        }
        EventType::Push => Ok(parse_push_event(body)?.map(Hook::Push)),
        EventType::Status => Ok(parse_status_event(body)?.map(Hook::Status)),
    }
}

#[tracing::instrument(skip_all, fields(repository_path = %hook.repo().slug))]
async fn dispatch_hook(ctx: &CoreContext<'_>, hook: Hook) -> Result<HttpResponse> {
    let kind = match &hook {
        Hook::Comment(_) => "comment",
        Hook::PullRequestOpened(_) => "pull_request",
        Hook::Push(_) => "push",
        Hook::Status(_) => "status",
    };
    WEBHOOK_HOOKS.with_label_values(&[kind]).inc();

    match hook {
        Hook::Comment(hook) => issues::issue_comment_event(ctx, hook).await,
        Hook::PullRequestOpened(hook) => pulls::pull_request_event(ctx, hook).await,
        Hook::Push(hook) => push::push_event(ctx, hook).await,
        Hook::Status(hook) => statuses::status_event(ctx, hook).await,
    }
}

fn parse_event_type<'de, T>(event_type: EventType, body: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|e| ServerError::EventParseError {
        event_type,
        source: e,
    })
}

fn repository_ref(repository: &GhRepository) -> RepositoryRef {
    RepositoryRef {
        owner: repository.owner.login.clone(),
        name: repository.name.clone(),
        slug: repository.full_name.clone(),
    }
}

fn extract_event_from_request(req: &HttpRequest) -> Option<EventType> {
    req.headers()
        .get(GITHUB_EVENT_HEADER)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| EventType::try_from(x).ok())
}

fn pong() -> HttpResponse {
    HttpResponse::Ok().body(PONG_RESPONSE)
}

#[tracing::instrument(skip_all)]
pub(crate) async fn event_handler(
    req: HttpRequest,
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> ActixResult<HttpResponse> {
    // Route event depending on header
    let Some(event_type) = extract_event_from_request(&req) else {
        debug!(message = "Unhandled event");
        return Ok(pong());
    };

    let body = convert_payload_to_string(&mut payload)
        .await
        .map_err(|_| ServerError::BadPayload { event_type })?;

    let Some(hook) = classify_event(event_type, &body)? else {
        debug!(event_type = %event_type, message = "Event triggers nothing");
        return Ok(pong());
    };

    dispatch_hook(&ctx.as_core_context(), hook)
        .await
        .map_err(Into::into)
}

/// Configure webhook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(event_handler)));
}
