use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use super::models::*;
use super::AppState;
use crate::controller::UiEvent;
use crate::display::DisplayCommand;
use crate::error::Error;
use crate::session::SessionSnapshot;

type ApiError = (StatusCode, Json<ErrorResponse>);

const INDEX_HTML: &str = include_str!("../../assets/index.html");

fn api_error(e: Error) -> ApiError {
    let status = match e {
        Error::UnknownSession(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: e.to_string() }))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn create_session(State(app): State<Arc<AppState>>) -> Json<CreateSessionResponse> {
    let (session_id, controller) = app.create_session();
    let mut controller = controller.lock().await;

    let mut commands: Vec<DisplayCommand> = Vec::new();
    controller.dispatch(UiEvent::PageLoad, Instant::now(), &mut commands).await;

    Json(CreateSessionResponse {
        session_id,
        state: controller.state().snapshot(),
        commands,
    })
}

pub async fn get_session(
    State(app): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let controller = app.session(id).map_err(api_error)?;
    let controller = controller.lock().await;
    Ok(Json(controller.state().snapshot()))
}

pub async fn post_event(
    State(app): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(event): Json<UiEvent>,
) -> Result<Json<EventResponse>, ApiError> {
    let controller = app.session(id).map_err(api_error)?;
    let mut controller = controller.lock().await;

    let mut commands: Vec<DisplayCommand> = Vec::new();
    controller.dispatch(event, Instant::now(), &mut commands).await;

    Ok(Json(EventResponse {
        state: controller.state().snapshot(),
        commands,
    }))
}

pub async fn delete_session(
    State(app): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.remove_session(id).map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
