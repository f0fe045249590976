//! Read side: list the caller's financial records.

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use sauti_core::models::FinancialRecord;
use std::sync::Arc;

/// `GET /api/v0/financial-records` - the caller's records, newest first.
#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn list_financial_records(
    State(state): State<Arc<AppState>>,
    user: UserContext,
) -> Result<Json<Vec<FinancialRecord>>, HttpAppError> {
    let records = state
        .financial_records
        .list_for_user(user.user_id)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(records))
}
