//! Request handlers.
//!
//! Handlers only normalise transport concerns (form fields, query
//! strings, status codes) and delegate the lookup itself to the shared
//! [`Recommender`](segue_core::Recommender).

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use segue_core::{Recommendation, Recommended};
use serde::{Deserialize, Serialize};

use crate::server::AppState;
use crate::views::{self, NOT_FOUND_MESSAGE};

/// Fields posted by the search form.
#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub song: Option<String>,
}

/// Query string for the JSON endpoint.
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub song: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub song: String,
    pub recommendations: Vec<Recommended>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub songs: usize,
}

/// `GET /` and `GET /recommend`.
pub async fn home() -> Html<String> {
    Html(views::home(None))
}

/// `POST /recommend`.
///
/// A body without a `song` field, or one that is not a form at all,
/// renders the empty search page.
pub async fn recommend_form(
    State(state): State<AppState>,
    form: Result<Form<RecommendForm>, FormRejection>,
) -> Html<String> {
    let song = match form {
        Ok(Form(RecommendForm { song: Some(song) })) => song,
        Ok(_) => {
            log::debug!("POST /recommend without a song field");
            return Html(views::home(None));
        }
        Err(rejection) => {
            log::debug!("POST /recommend with unreadable form: {}", rejection);
            return Html(views::home(None));
        }
    };

    log::debug!("POST /recommend song={:?}", song);
    match state.recommender().recommend(&song) {
        Recommendation::Found {
            song,
            recommendations,
            ..
        } => {
            let titles: Vec<&str> = recommendations.iter().map(|r| r.title.as_str()).collect();
            Html(views::result(&song, &titles))
        }
        Recommendation::NotFound => {
            log::info!("No song matched {:?}", song);
            Html(views::home(Some(NOT_FOUND_MESSAGE)))
        }
    }
}

/// `GET /api/recommend?song=...`.
pub async fn recommend_api(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> Response {
    let Some(song) = query.song else {
        return error_response(StatusCode::BAD_REQUEST, "missing query parameter: song");
    };

    log::debug!("GET /api/recommend song={:?}", song);
    match state.recommender().recommend(&song) {
        Recommendation::Found {
            song,
            recommendations,
            ..
        } => Json(RecommendResponse {
            song,
            recommendations,
        })
        .into_response(),
        Recommendation::NotFound => {
            log::info!("No song matched {:?}", song);
            error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
    }
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        songs: state.recommender().catalog().len(),
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
