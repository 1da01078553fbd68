//! Pull webhook handlers.

use actix_web::HttpResponse;
use lgtm_core::{use_cases::pulls::HandlePullRequestHookInterface, CoreContext};
use lgtm_ghapi_interface::types::{GhPullRequestAction, GhPullRequestEvent};
use lgtm_models::PullRequestOpenedHook;
use shaku::HasComponent;

use super::{parse_event_type, repository_ref};
use crate::{event_type::EventType, Result};

/// Only opened and synchronized pull requests are handled.
pub(crate) fn parse_pull_request_event(body: &str) -> Result<Option<PullRequestOpenedHook>> {
    let event: GhPullRequestEvent = parse_event_type(EventType::PullRequest, body)?;
    if !matches!(
        event.action,
        GhPullRequestAction::Opened | GhPullRequestAction::Synchronize
    ) {
        return Ok(None);
    }

    Ok(Some(PullRequestOpenedHook {
        repo: repository_ref(&event.repository),
        number: event.number,
        title: event.pull_request.title,
        author: event.pull_request.user.login,
    }))
}

#[tracing::instrument(skip_all, fields(
    repository_path = %hook.repo.slug,
    pr_number = hook.number,
))]
pub(crate) async fn pull_request_event(
    ctx: &CoreContext<'_>,
    hook: PullRequestOpenedHook,
) -> Result<HttpResponse> {
    let handle_pull_request_hook: &dyn HandlePullRequestHookInterface =
        ctx.core_module.resolve_ref();
    let report = handle_pull_request_hook.run(ctx, &hook).await?;

    Ok(HttpResponse::Ok().json(report))
}
