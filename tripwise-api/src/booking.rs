use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tripwise_booking::{BookingSnapshot, CommandReply, SessionCommand};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/booking", get(get_booking))
        .route("/v1/booking/commands", post(post_command))
}

async fn get_booking(State(state): State<AppState>) -> Result<Json<BookingSnapshot>, AppError> {
    let snapshot = state.session.snapshot().await?;
    Ok(Json(snapshot))
}

async fn post_command(
    State(state): State<AppState>,
    Json(command): Json<SessionCommand>,
) -> Result<Json<CommandReply>, AppError> {
    tracing::debug!(?command, "Booking command received");
    let reply = state.session.execute(command).await?;
    Ok(Json(reply))
}
