//! Push webhook handlers.

use actix_web::HttpResponse;
use lgtm_core::{use_cases::push::HandlePushHookInterface, CoreContext};
use lgtm_ghapi_interface::types::GhPushEvent;
use lgtm_models::PushHook;
use shaku::HasComponent;

use super::{parse_event_type, repository_ref};
use crate::{event_type::EventType, Result};

/// Branch deletions are ignored.
pub(crate) fn parse_push_event(body: &str) -> Result<Option<PushHook>> {
    let event: GhPushEvent = parse_event_type(EventType::Push, body)?;
    if event.deleted {
        return Ok(None);
    }

    Ok(Some(PushHook {
        repo: repository_ref(&event.repository),
        sha: event.after,
    }))
}

#[tracing::instrument(skip_all, fields(repository_path = %hook.repo.slug, sha = %hook.sha))]
pub(crate) async fn push_event(ctx: &CoreContext<'_>, hook: PushHook) -> Result<HttpResponse> {
    let handle_push_hook: &dyn HandlePushHookInterface = ctx.core_module.resolve_ref();
    let report = handle_push_hook.run(ctx, &hook).await?;

    Ok(HttpResponse::Ok().json(report))
}
