mod handlers;
mod middleware;
pub mod params;

use crate::{config::Config, github::GithubClient, page::PageRenderer};
use axum::{routing::get, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub github: GithubClient,
    pub pages: Arc<PageRenderer>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/repos_raw", get(handlers::export_csv))
        .route("/api/repos", get(handlers::list_repos))
        .route("/repos", get(handlers::browse_repos))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::GITHUB_V3_JSON;
    use anyhow::Result;
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION},
            Request, StatusCode,
        },
        response::Response,
    };
    use mockito::{Server, ServerGuard};
    use tower::ServiceExt;

    const DEMO_REPOS: &str = r#"[
        {"id": 1, "name": "demo", "html_url": "https://github.com/alice/demo",
         "language": "Go", "description": "a, test", "fork": false}
    ]"#;

    fn app(server: &ServerGuard, configure: impl FnOnce(&mut Config)) -> Result<Router> {
        let mut config = Config::default();
        config.github.api_url = server.url();
        configure(&mut config);

        let state = AppState {
            github: GithubClient::new(&config.github)?,
            config: Arc::new(config),
            pages: Arc::new(PageRenderer::new()?),
        };

        Ok(router(state))
    }

    async fn get(app: Router, uri: &str) -> Result<Response> {
        let request = Request::builder().uri(uri).body(Body::empty())?;

        Ok(app.oneshot(request).await?)
    }

    async fn body_text(response: Response) -> Result<String> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        Ok(String::from_utf8(bytes.to_vec())?)
    }

    #[tokio::test]
    async fn should_export_csv() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/users/alice/repos")
            .match_header("accept", GITHUB_V3_JSON)
            .with_body(DEMO_REPOS)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/api/repos_raw?user=alice").await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.headers()[CACHE_CONTROL], "public, s-maxage=60000");
        assert_eq!(
            body_text(response).await?,
            "Name,Language,Description\ndemo,Go,\"a, test\""
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_export_csv_for_default_user() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/users/octocat/repos")
            .with_body(DEMO_REPOS)
            .create_async()
            .await;

        let app = app(&server, |config| {
            config.export.default_user = "octocat".to_owned();
            config.export.revalidate_secs = None;
        })?;
        let response = get(app, "/api/repos_raw?show_user=true&link=true").await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(CACHE_CONTROL).is_none());
        assert_eq!(
            body_text(response).await?,
            "Name,Language,Username,Description,Link\n\
             demo,Go,octocat,\"a, test\",https://github.com/alice/demo"
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_redirect_when_raw_is_false() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = get(
            app(&server, |_| {})?,
            "/api/repos_raw?user=alice&raw=false&link=true",
        )
        .await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[LOCATION],
            "/api/repos?user=alice&raw=false&link=true"
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_pass_through_upstream_status() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/users/ghost/repos")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/api/repos_raw?user=ghost").await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(body_text(response).await?, "Error fetching repos");

        Ok(())
    }

    #[tokio::test]
    async fn should_fail_on_malformed_upstream_json() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/users/alice/repos")
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/api/repos_raw?user=alice").await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await?, "Internal server error");

        Ok(())
    }

    #[tokio::test]
    async fn should_reject_unrecognized_flag_value() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/api/repos_raw?language=yes").await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await?.contains("`language`"));

        Ok(())
    }

    #[tokio::test]
    async fn should_reject_dot_handles() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        for uri in ["/api/repos_raw?user=..", "/api/repos_raw?user=.", "/api/repos?user=.."] {
            let response = get(app(&server, |_| {})?, uri).await?;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(body_text(response).await?.contains("`user`"));
        }

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn should_use_first_value_of_repeated_parameter() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/users/alice/repos")
            .with_body(DEMO_REPOS)
            .create_async()
            .await;

        let response = get(
            app(&server, |_| {})?,
            "/api/repos_raw?user=alice&user=bob&language=false&language=true",
        )
        .await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_text(response).await?,
            "Name,Description\ndemo,\"a, test\""
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_list_repos_as_json() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/users/alice/repos")
            .with_body(DEMO_REPOS)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/api/repos?user=alice&raw=false").await?;

        assert_eq!(response.status(), StatusCode::OK);
        let repos: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
        assert_eq!(
            repos,
            serde_json::json!([{
                "id": 1,
                "name": "demo",
                "url": "https://github.com/alice/demo",
                "language": "Go",
                "description": "a, test"
            }])
        );

        Ok(())
    }

    #[tokio::test]
    async fn should_render_browsing_page() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/users/weuritz8u/repos")
            .with_body(DEMO_REPOS)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/repos").await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()?
            .starts_with("text/html"));
        let html = body_text(response).await?;
        assert!(html.contains(">demo</a>"));
        assert!(html.contains("<td>Go</td>"));

        Ok(())
    }

    #[tokio::test]
    async fn should_pass_through_upstream_status_on_browsing_page() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/users/weuritz8u/repos")
            .with_status(403)
            .create_async()
            .await;

        let response = get(app(&server, |_| {})?, "/repos").await?;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}
