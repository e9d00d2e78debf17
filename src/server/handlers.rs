use crate::model::{AnalysisError, AnalysisRequest, AnalysisResponse};
use crate::server::AppState;
use axum::Json;
use axum::extract::State;
use tracing::info;

/// POST /crypto/analysis
pub async fn analyze_crypto(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AnalysisError> {
    info!("Analysis requested for {:?}", request.coins);
    let response = state.analyst.analyze_coins(&request.coins).await?;
    Ok(Json(response))
}
