//! Option Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::controls::{Controls, CONTROLS};
use crate::AppState;

/// Choices and control bounds for building a selection form
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub neighbourhoods: Vec<String>,
    pub accommodates: Vec<u32>,
    pub room_types: Vec<String>,
    pub default_room_type: Option<String>,
    pub controls: Controls,
}

/// Get categorical options and control ranges
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let options = state.context.artifacts().options();

    Json(OptionsResponse {
        neighbourhoods: options.neighbourhoods.clone(),
        accommodates: options.accommodates.clone(),
        room_types: options.room_types.clone(),
        default_room_type: options.default_room_type().map(str::to_string),
        controls: CONTROLS,
    })
}
