//! Status webhook handlers.

use actix_web::HttpResponse;
use lgtm_core::{use_cases::releases::HandleStatusHookInterface, CoreContext};
use lgtm_ghapi_interface::types::{GhCommitStatusState, GhStatusEvent};
use lgtm_models::StatusHook;
use shaku::HasComponent;

use super::{parse_event_type, repository_ref};
use crate::{
    event_type::EventType,
    metrics::{RELEASE_FAILURES, RELEASE_MERGES},
    Result,
};

/// Only successful statuses may trigger a release.
pub(crate) fn parse_status_event(body: &str) -> Result<Option<StatusHook>> {
    let event: GhStatusEvent = parse_event_type(EventType::Status, body)?;
    if event.state != GhCommitStatusState::Success {
        return Ok(None);
    }

    Ok(Some(StatusHook {
        repo: repository_ref(&event.repository),
        sha: event.sha,
    }))
}

#[tracing::instrument(skip_all, fields(repository_path = %hook.repo.slug, sha = %hook.sha))]
pub(crate) async fn status_event(ctx: &CoreContext<'_>, hook: StatusHook) -> Result<HttpResponse> {
    let handle_status_hook: &dyn HandleStatusHookInterface = ctx.core_module.resolve_ref();
    let report = handle_status_hook.run(ctx, &hook).await?;
    RELEASE_MERGES.inc_by(report.merged.len() as u64);
    RELEASE_FAILURES.inc_by(report.failures.len() as u64);

    Ok(HttpResponse::Ok().json(report))
}
