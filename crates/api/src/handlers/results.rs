//! Handlers for encoding new results and opening result links.
//!
//! A result link carries everything needed to rebuild the page: the result
//! id holds quiz, style, score and timestamp, and the poster/requester
//! personas are re-derived from the id on every visit. No result is stored.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::{ACCEPT_LANGUAGE, HOST, REFERER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use grokmind_core::assigner;
use grokmind_core::error::CoreError;
use grokmind_core::locale::{self, Locale};
use grokmind_core::persona::{grok_persona, LocalizedPersona};
use grokmind_core::result_id::{self, ScoredResult};
use grokmind_core::share::{self, ShareParams};
use grokmind_core::types::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::ResultLinkParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/results`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResultRequest {
    #[validate(range(min = 1))]
    pub quiz_id: EntityId,
    #[validate(range(min = 1))]
    pub style_id: EntityId,
    #[validate(range(min = 0, max = 100))]
    pub score: i64,
    #[validate(length(max = 2000))]
    pub answer: Option<String>,
    pub lang: Option<Locale>,
    pub quiz_user_id: Option<EntityId>,
    pub reply_user_id: Option<EntityId>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResult {
    pub result_id: String,
    pub share_url: String,
}

/// Everything a result page shows.
#[derive(Debug, Serialize)]
pub struct ResultView {
    pub result_id: String,
    #[serde(flatten)]
    pub result: ScoredResult,
    pub locale: Locale,
    pub quiz_content: String,
    pub style_name: String,
    pub style_description: String,
    pub answer: Option<String>,
    pub poster: LocalizedPersona,
    pub requester: LocalizedPersona,
    pub responder: LocalizedPersona,
    pub share_url: String,
    /// True when the visitor followed a shared link rather than navigating
    /// from inside the app.
    pub shared_view: bool,
}

/// Request context resolved once per visit.
struct LinkContext {
    locale: Locale,
    share: ShareParams,
    shared_view: bool,
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/results
///
/// Encode a freshly scored answer into a result id and share URL.
///
/// Unreadable bodies are answered with the same `{error, code}` JSON as
/// every other failure.
pub async fn create_result(
    State(state): State<AppState>,
    payload: Result<Json<CreateResultRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    state.catalog.find_quiz(input.quiz_id)?;
    state.catalog.find_style(input.style_id)?;

    let result = ScoredResult::new(
        input.quiz_id,
        input.style_id,
        input.score,
        result_id::now_millis(),
    );
    let result_id = result.result_id();

    let params = ShareParams {
        answer: input.answer,
        lang: input.lang,
        quiz_user_id: input.quiz_user_id,
        reply_user_id: input.reply_user_id,
        direct: false,
    };
    let share_url = share::result_url(&state.config.public_host, &result_id, &params)?;

    tracing::info!(
        %result_id,
        quiz_id = result.quiz_id,
        style_id = result.style_id,
        score = result.score,
        "Result encoded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedResult {
                result_id,
                share_url,
            },
        }),
    ))
}

/// GET /api/v1/results/{id}
///
/// Decode a result id and assemble its page data.
pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ResultLinkParams>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<ResultView>>> {
    let link = link_context(&state, params, &headers);
    let view = resolve_view(&state, &id, &link)?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /result/{id}
///
/// Entry point of shared links. Behaves like [`get_result`], except that a
/// malformed id or one naming an unknown quiz or style redirects home in
/// the visitor's locale.
pub async fn open_result_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ResultLinkParams>,
    headers: HeaderMap,
) -> Response {
    let link = link_context(&state, params, &headers);

    match resolve_view(&state, &id, &link) {
        Ok(view) => Json(DataResponse { data: view }).into_response(),
        Err(err) if err.is_dead_link() => {
            tracing::info!(result_id = %id, error = %err, "Dead result link, redirecting home");
            Redirect::temporary(&format!("/?lang={}", link.locale)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Merge compressed and plain parameters and settle the locale.
///
/// Values expanded from `c` take precedence over plain query parameters.
fn link_context(state: &AppState, params: ResultLinkParams, headers: &HeaderMap) -> LinkContext {
    let expanded = match params.c.as_deref() {
        Some(encoded) => share::expand_params(encoded).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Ignoring undecodable share parameters");
            ShareParams::default()
        }),
        None => ShareParams::default(),
    };

    let accept_language = header_str(headers, ACCEPT_LANGUAGE.as_str())
        .and_then(locale::primary_accept_language);
    let locale = locale::resolve_locale(
        &[
            expanded.lang.map(Locale::as_str),
            params.lang.as_deref(),
            accept_language,
        ],
        state.config.default_locale,
    );

    let plain_id = |raw: &Option<String>| raw.as_deref().and_then(assigner::parse_persona_id);
    let share = ShareParams {
        answer: expanded.answer.or(params.answer),
        lang: Some(locale),
        quiz_user_id: expanded
            .quiz_user_id
            .or_else(|| plain_id(&params.quiz_user_id)),
        reply_user_id: expanded
            .reply_user_id
            .or_else(|| plain_id(&params.reply_user_id)),
        direct: expanded.direct || params.direct.as_deref() == Some("1"),
    };

    let host = header_str(headers, HOST.as_str()).unwrap_or(state.config.public_host.as_str());
    let host_name = host.split(':').next().unwrap_or(host);
    let from_same_origin = header_str(headers, REFERER.as_str())
        .is_some_and(|referer| !host_name.is_empty() && referer.contains(host_name));

    LinkContext {
        locale,
        shared_view: !share.direct && !from_same_origin,
        share,
    }
}

fn resolve_view(state: &AppState, id: &str, link: &LinkContext) -> AppResult<ResultView> {
    let result = result_id::decode(id).map_err(CoreError::from)?;
    let quiz = state.catalog.find_quiz(result.quiz_id)?;
    let style = state.catalog.find_style(result.style_id)?;

    let (poster, requester) = assign_personas(state, id, result.quiz_id, link)?;

    let share_params = ShareParams {
        direct: false,
        ..link.share.clone()
    };
    let share_url = share::result_url(&state.config.public_host, id, &share_params)?;

    Ok(ResultView {
        result_id: id.to_string(),
        result,
        locale: link.locale,
        quiz_content: quiz.content(link.locale).to_string(),
        style_name: style.name(link.locale).to_string(),
        style_description: style.description(link.locale).to_string(),
        answer: link.share.answer.clone(),
        poster,
        requester,
        responder: grok_persona().localize(link.locale),
        share_url,
        shared_view: link.shared_view,
    })
}

/// Resolve and look up the poster/requester pair.
///
/// Explicit ids outside the roster are logged and replaced with the
/// hash-derived pair, which always names roster members.
fn assign_personas(
    state: &AppState,
    id: &str,
    quiz_id: EntityId,
    link: &LinkContext,
) -> AppResult<(LocalizedPersona, LocalizedPersona)> {
    let roster = state.catalog.roster();
    let table = roster.pair_table();

    let pair = assigner::resolve(
        id,
        quiz_id,
        link.share.quiz_user_id,
        link.share.reply_user_id,
        table,
    );

    match assigner::materialize(pair, link.locale, roster) {
        Ok(personas) => Ok(personas),
        Err(err) => {
            tracing::warn!(
                error = %err,
                poster_id = pair.poster_id,
                requester_id = pair.requester_id,
                "Requested personas not in roster, using derived pair",
            );
            let derived = table.select(&assigner::assignment_seed(id, quiz_id));
            assigner::materialize(derived, link.locale, roster)
                .map_err(|e| AppError::Core(e.into()))
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
