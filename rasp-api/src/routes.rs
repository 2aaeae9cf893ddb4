use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use rasp_sheet::{DaySchedule, ScheduleError, ScheduleService, WeekSchedule};

#[derive(Clone)]
pub(crate) struct AppState {
  pub(crate) service: Arc<ScheduleService>,
  pub(crate) utc_offset: UtcOffset,
}

pub(crate) fn router(state: AppState) -> Router {
  Router::new()
    .route("/schedule", get(day_schedule))
    .route("/schedule/", get(day_schedule))
    .route("/schedule/week", get(week_schedule))
    .route("/schedule/for_week/", get(week_schedule))
    .route("/groups", get(groups))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[derive(Deserialize)]
struct DayQuery {
  day: Option<String>,
  group: Option<String>,
}

#[derive(Deserialize)]
struct WeekQuery {
  group: Option<String>,
  parity: Option<String>,
}

async fn day_schedule(
  State(state): State<AppState>,
  Query(query): Query<DayQuery>,
) -> Result<Json<DaySchedule>, ApiError> {
  let started = Instant::now();
  let day = query.day.ok_or(ApiError::MissingParameter("day"))?;
  let group = query.group.ok_or(ApiError::MissingParameter("group"))?;
  let today = OffsetDateTime::now_utc().to_offset(state.utc_offset).date();

  let schedule = {
    let (day, group) = (day.clone(), group.clone());
    tokio::task::spawn_blocking(move || state.service.day_schedule(&group, &day, today)).await??
  };

  info!(
    "Served schedule of group {} for {} in {:?}",
    group,
    day,
    started.elapsed()
  );
  Ok(Json(schedule))
}

async fn week_schedule(
  State(state): State<AppState>,
  Query(query): Query<WeekQuery>,
) -> Result<Json<WeekSchedule>, ApiError> {
  let started = Instant::now();
  let group = query.group.ok_or(ApiError::MissingParameter("group"))?;
  let parity = query.parity.ok_or(ApiError::MissingParameter("parity"))?;

  let schedule = {
    let (group, parity) = (group.clone(), parity.clone());
    tokio::task::spawn_blocking(move || state.service.week_schedule(&group, &parity)).await??
  };

  info!(
    "Served {} week schedule of group {} in {:?}",
    parity,
    group,
    started.elapsed()
  );
  Ok(Json(schedule))
}

async fn groups(State(state): State<AppState>) -> Json<Vec<String>> {
  Json(state.service.registry().groups().to_vec())
}

#[derive(Debug)]
pub(crate) enum ApiError {
  MissingParameter(&'static str),
  Schedule(ScheduleError),
  Worker(JoinError),
}

impl From<ScheduleError> for ApiError {
  fn from(err: ScheduleError) -> Self {
    Self::Schedule(err)
  }
}

impl From<JoinError> for ApiError {
  fn from(err: JoinError) -> Self {
    Self::Worker(err)
  }
}

#[derive(Serialize)]
struct ErrorBody {
  detail: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match self {
      ApiError::MissingParameter(name) => (
        StatusCode::BAD_REQUEST,
        format!("Missing query parameter {name:?}"),
      ),
      ApiError::Schedule(err) => {
        let status = match &err {
          ScheduleError::InvalidDayToken(_)
          | ScheduleError::InvalidParityToken(_)
          | ScheduleError::DuplicateGroup(_)
          | ScheduleError::EmptyGroup(_) => StatusCode::BAD_REQUEST,
          ScheduleError::GroupNotFound(_) | ScheduleError::ScheduleFileMissing(_) => {
            StatusCode::NOT_FOUND
          }
          // already logged by the loader
          ScheduleError::ScheduleLoad { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = match &err {
          ScheduleError::ScheduleFileMissing(_) => "Schedule file not found".to_string(),
          ScheduleError::ScheduleLoad { .. } => "Internal Server Error".to_string(),
          _ => err.to_string(),
        };

        (status, detail)
      }
      ApiError::Worker(err) => {
        error!("Schedule worker failed: {}", err);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal Server Error".to_string(),
        )
      }
    };

    (status, Json(ErrorBody { detail })).into_response()
  }
}
