use super::{params::ExportQuery, AppState};
use crate::{csv, error::AppError, github::dto::Repository};
use axum::{
    extract::{rejection::QueryRejection, Query, RawQuery, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION},
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    Json,
};

/// `GET /api/repos_raw`, redirects to the json listing when `raw=false`.
pub async fn export_csv(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    let query = export_query(query)?;
    let export = query.resolve(&state.config.export.default_user)?;

    if !export.wants_raw_csv {
        let location = redirect_location(&state.config.export.redirect_path, raw_query.as_deref());
        log::debug!("redirecting to {}", location);

        return Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response());
    }

    let repos = state.github.user(&export.subject_handle).repos().await?;
    let body = csv::render(&repos, &export);

    let mut response = (StatusCode::OK, [(CONTENT_TYPE, "text/plain")], body).into_response();

    if let Some(secs) = state.config.export.revalidate_secs {
        if let Ok(value) = HeaderValue::try_from(format!("public, s-maxage={}", secs)) {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
    }

    Ok(response)
}

pub async fn list_repos(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Repository>>, AppError> {
    let query = export_query(query)?;
    let export = query.resolve(&state.config.export.default_user)?;

    let repos = state.github.user(&export.subject_handle).repos().await?;

    Ok(Json(repos))
}

pub async fn browse_repos(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let user = &state.config.browse.user;

    let repos = state.github.user(user).repos().await?;
    let page = state.pages.repos(user, &repos)?;

    Ok(Html(page))
}

fn redirect_location(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_owned(),
    }
}

fn export_query(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ExportQuery, AppError> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    Ok(ExportQuery::from_pairs(pairs))
}
