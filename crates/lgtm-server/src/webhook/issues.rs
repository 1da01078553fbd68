//! Issue webhook handlers.

use actix_web::HttpResponse;
use lgtm_core::{use_cases::comments::HandleCommentHookInterface, CoreContext};
use lgtm_ghapi_interface::types::GhIssueCommentEvent;
use lgtm_models::{Comment, CommentHook, Issue};
use shaku::HasComponent;

use super::{parse_event_type, repository_ref};
use crate::{event_type::EventType, Result};

/// Comments on plain issues are ignored.
pub(crate) fn parse_issue_comment_event(body: &str) -> Result<Option<CommentHook>> {
    let event: GhIssueCommentEvent = parse_event_type(EventType::IssueComment, body)?;
    if event.issue.pull_request.is_none() {
        return Ok(None);
    }

    Ok(Some(CommentHook {
        repo: repository_ref(&event.repository),
        issue: Issue {
            number: event.issue.number,
            title: event.issue.title,
            author: event.issue.user.login,
        },
        comment: Comment::new(event.comment.user.login, event.comment.body),
    }))
}

#[tracing::instrument(skip_all, fields(
    repository_path = %hook.repo.slug,
    pr_number = hook.issue.number,
    comment_author = %hook.comment.author,
))]
pub(crate) async fn issue_comment_event(
    ctx: &CoreContext<'_>,
    hook: CommentHook,
) -> Result<HttpResponse> {
    let handle_comment_hook: &dyn HandleCommentHookInterface = ctx.core_module.resolve_ref();
    let report = handle_comment_hook.run(ctx, &hook).await?;

    Ok(HttpResponse::Ok().json(report))
}
