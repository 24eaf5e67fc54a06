//! `GET /` — the only page.
//!
//! `Start → ResolvingLocation → ResolvingWeather → weather page`, and any
//! failure along the way lands on the "get started" page. Users are not told
//! which step failed.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info, instrument};
use weather_core::LookupError;

use crate::{
    app::AppState,
    error::AppError,
    view::{LandingModel, ViewModel},
};

/// `/?location=<name>`
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let location = match validate_location(query) {
        Ok(location) => location,
        Err(e) => {
            info!(reason = %e, "Rendering landing page");
            return get_started(&state);
        }
    };

    match state.providers.lookup(&location).await {
        Ok(found) => {
            let model = ViewModel::build(
                &state.config.environment,
                &found.location,
                &found.weather,
                Local::now().date_naive(),
            );
            Ok(Html(state.renderer.render_weather(&model)?))
        }
        Err(e) => {
            error!(error = %e, %location, "Weather lookup failed, rendering landing page");
            get_started(&state)
        }
    }
}

/// The query must carry one non-blank `location`; it is forwarded as given.
pub fn validate_location(
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<String, LookupError> {
    let Query(LocationQuery { location }) =
        query.map_err(|rejection| LookupError::Validation(rejection.body_text()))?;

    match location {
        None => Err(LookupError::Validation(
            "missing `location` query parameter".to_string(),
        )),
        Some(location) if location.trim().is_empty() => Err(LookupError::Validation(
            "`location` must not be empty".to_string(),
        )),
        Some(location) => Ok(location),
    }
}

fn get_started(state: &AppState) -> Result<Html<String>, AppError> {
    let model = LandingModel::new(&state.config.environment);
    Ok(Html(state.renderer.render_get_started(&model)?))
}
