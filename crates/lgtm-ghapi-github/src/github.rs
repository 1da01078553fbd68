//! GitHub adapter

use async_trait::async_trait;
use http::{header, HeaderMap, Method, StatusCode};
use lgtm_config::Config;
use lgtm_ghapi_interface::{
    types::{GhCombinedStatus, GhCommitStatusState, GhIssueComment, GhPullRequest, GhUser},
    ApiService, Result,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::{
    auth::{build_github_url, get_authenticated_client_builder},
    errors::GitHubError,
};

const MAX_STATUS_DESCRIPTION_LEN: usize = 139;
const PAGE_SIZE: u32 = 100;
const MAX_PAGES: usize = 50;
const TAGGER_NAME: &str = "LGTM";
const TAGGER_EMAIL: &str = "LGTM@lgtm.co";

/// GitHub API adapter implementation.
#[derive(Clone)]
pub struct GithubApiService {
    config: Config,
}

impl GithubApiService {
    /// Creates new GitHub API adapter.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn get_client(&self, token: &str) -> Result<Client, GitHubError> {
        get_authenticated_client_builder(&self.config, token)?
            .build()
            .map_err(GitHubError::from)
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }

    fn request(
        &self,
        token: &str,
        method: Method,
        path: String,
    ) -> Result<RequestBuilder, GitHubError> {
        Ok(self.get_client(token)?.request(method, self.build_url(path)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: String,
    ) -> Result<T, GitHubError> {
        Ok(self
            .request(token, Method::GET, path)?
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?)
    }

    /// Collect every page of a list endpoint by following `Link: rel="next"`.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        token: &str,
        path: String,
    ) -> Result<Vec<T>, GitHubError> {
        let client = self.get_client(token)?;
        let mut url = Some(self.build_url(path));
        let mut items = vec![];

        for _ in 0..MAX_PAGES {
            let Some(current) = url.take() else {
                break;
            };

            let response = client.get(&current).send().await?.error_for_status()?;
            url = next_page_url(response.headers());
            items.extend(response.json::<Vec<T>>().await?);
        }

        if url.is_some() {
            warn!(
                max_pages = MAX_PAGES,
                message = "Stopped following pagination, results are truncated"
            );
        }

        Ok(items)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        token: &str,
        method: Method,
        path: String,
        body: &B,
    ) -> Result<Response, GitHubError> {
        Ok(self
            .request(token, method, path)?
            .json(body)
            .send()
            .await?
            .error_for_status()?)
    }

    async fn team_slug(
        &self,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<String, GitHubError> {
        #[derive(Deserialize)]
        struct Team {
            name: String,
            slug: String,
        }

        let teams = self
            .get_all_pages::<Team>(
                token,
                format!("/orgs/{organization}/teams?per_page={PAGE_SIZE}"),
            )
            .await?;

        teams
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(team))
            .map(|t| t.slug)
            .ok_or_else(|| GitHubError::UnknownTeam {
                organization: organization.into(),
                team: team.into(),
            })
    }
}

fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(header::LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        params
            .split(';')
            .any(|p| p.trim() == r#"rel="next""#)
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string()
            })
    })
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self, token))]
    async fn contents_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        path: &str,
    ) -> Result<Option<String>> {
        let response = self
            .request(
                token,
                Method::GET,
                format!("/repos/{owner}/{name}/contents/{path}"),
            )?
            .header(header::ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await
            .map_err(GitHubError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let content = response
            .error_for_status()
            .map_err(GitHubError::from)?
            .text()
            .await
            .map_err(GitHubError::from)?;

        Ok(Some(content))
    }

    #[tracing::instrument(skip(self, token))]
    async fn comments_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<Vec<GhIssueComment>> {
        Ok(self
            .get_all_pages(
                token,
                format!(
                    "/repos/{owner}/{name}/issues/{issue_number}/comments?per_page={PAGE_SIZE}"
                ),
            )
            .await?)
    }

    #[tracing::instrument(skip(self, token))]
    async fn pulls_get(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest> {
        Ok(self
            .get_json(token, format!("/repos/{owner}/{name}/pulls/{issue_number}"))
            .await?)
    }

    #[tracing::instrument(skip(self, token, commit_message), ret)]
    async fn pulls_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        issue_number: u64,
        commit_message: &str,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct Request<'a> {
            commit_message: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            sha: String,
            merged: bool,
            #[serde(default)]
            message: String,
        }

        let merge_error = |message: String| GitHubError::MergeError {
            pr_number: issue_number,
            repository_path: format!("{owner}/{name}"),
            message,
        };

        let response = self
            .send_json(
                token,
                Method::PUT,
                format!("/repos/{owner}/{name}/pulls/{issue_number}/merge"),
                &Request { commit_message },
            )
            .await
            .map_err(|e| merge_error(e.to_string()))?
            .json::<Response>()
            .await
            .map_err(GitHubError::from)?;

        if !response.merged {
            return Err(merge_error(response.message).into());
        }

        Ok(response.sha)
    }

    #[tracing::instrument(skip(self, token))]
    async fn commits_pulls_list(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<GhPullRequest>> {
        Ok(self
            .get_json(token, format!("/repos/{owner}/{name}/commits/{sha}/pulls"))
            .await?)
    }

    #[tracing::instrument(skip(self, token))]
    async fn commit_statuses_update(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
        state: GhCommitStatusState,
        context: &str,
        description: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            state: &'a str,
            description: String,
            context: &'a str,
        }

        self.send_json(
            token,
            Method::POST,
            format!("/repos/{owner}/{name}/statuses/{git_ref}"),
            &Request {
                state: state.to_str(),
                context,
                description: description
                    .chars()
                    .take(MAX_STATUS_DESCRIPTION_LEN)
                    .collect::<String>(),
            },
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, token), ret)]
    async fn commit_statuses_combined(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        git_ref: &str,
    ) -> Result<GhCombinedStatus> {
        Ok(self
            .get_json(token, format!("/repos/{owner}/{name}/commits/{git_ref}/status"))
            .await?)
    }

    #[tracing::instrument(skip(self, token), ret)]
    async fn tags_list(&self, token: &str, owner: &str, name: &str) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }

        Ok(self
            .get_all_pages::<Tag>(
                token,
                format!("/repos/{owner}/{name}/tags?per_page={PAGE_SIZE}"),
            )
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    #[tracing::instrument(skip(self, token))]
    async fn tags_create(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        tag: &str,
        sha: &str,
        message: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Tagger<'a> {
            name: &'a str,
            email: &'a str,
        }

        #[derive(Serialize)]
        struct TagRequest<'a> {
            tag: &'a str,
            message: &'a str,
            object: &'a str,
            #[serde(rename = "type")]
            object_type: &'a str,
            tagger: Tagger<'a>,
        }

        #[derive(Serialize)]
        struct RefRequest {
            #[serde(rename = "ref")]
            reference: String,
            sha: String,
        }

        #[derive(Deserialize)]
        struct TagResponse {
            sha: String,
        }

        let tag_object = self
            .send_json(
                token,
                Method::POST,
                format!("/repos/{owner}/{name}/git/tags"),
                &TagRequest {
                    tag,
                    message,
                    object: sha,
                    object_type: "commit",
                    tagger: Tagger {
                        name: TAGGER_NAME,
                        email: TAGGER_EMAIL,
                    },
                },
            )
            .await?
            .json::<TagResponse>()
            .await
            .map_err(GitHubError::from)?;

        self.send_json(
            token,
            Method::POST,
            format!("/repos/{owner}/{name}/git/refs"),
            &RefRequest {
                reference: format!("refs/tags/{tag}"),
                sha: tag_object.sha,
            },
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, token, commit_message), ret)]
    async fn branches_merge(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        base: &str,
        head: &str,
        commit_message: &str,
    ) -> Result<Option<String>> {
        #[derive(Serialize)]
        struct Request<'a> {
            base: &'a str,
            head: &'a str,
            commit_message: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            sha: String,
        }

        let response = self
            .send_json(
                token,
                Method::POST,
                format!("/repos/{owner}/{name}/merges"),
                &Request {
                    base,
                    head,
                    commit_message,
                },
            )
            .await?;

        // Nothing to merge.
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let commit = response
            .json::<Response>()
            .await
            .map_err(GitHubError::from)?;
        Ok(Some(commit.sha))
    }

    #[tracing::instrument(skip(self, token), ret)]
    async fn teams_members_list(
        &self,
        token: &str,
        organization: &str,
        team: &str,
    ) -> Result<Vec<String>> {
        let slug = self.team_slug(token, organization, team).await?;
        let members = self
            .get_all_pages::<GhUser>(
                token,
                format!("/orgs/{organization}/teams/{slug}/members?per_page={PAGE_SIZE}"),
            )
            .await?;

        if members.is_empty() {
            warn!(
                organization = organization,
                team = team,
                message = "Team has no members"
            );
        }

        Ok(members.into_iter().map(|m| m.login).collect())
    }
}
