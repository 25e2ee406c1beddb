//! サービス管理API
//!
//! `/services` 単一ルートでGET/POST/DELETEを処理する。
//! 定義外のメソッドはaxumのMethodRouterが405を返す。

pub mod error;

use crate::common::{ServiceRecord, WatchError};
use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use error::ApiError;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

/// サービス登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    /// 表示名（一意キー）
    #[serde(rename = "Name")]
    pub name: String,
    /// プローブ先URL
    #[serde(rename = "URL")]
    pub url: String,
}

/// サービス削除リクエスト
#[derive(Debug, Deserialize)]
pub struct DeleteServiceRequest {
    /// 削除対象の表示名
    #[serde(rename = "Name")]
    pub name: String,
}

/// APIルーターを構築
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/services",
            get(list_services).post(add_service).delete(delete_service),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /services - 登録済みサービスの一覧
async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceRecord>> {
    let services = state.registry.get_all().await;
    info!(count = services.len(), "Listed services");
    Json(services)
}

/// POST /services - サービスを登録
///
/// ボディ不正・Name/URL空は400、保存失敗は500。
/// 新規レコードはis_up=false、last_downなしで開始する。
async fn add_service(
    State(state): State<AppState>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload
        .map_err(|e| WatchError::Validation(format!("Invalid request body: {e}")))?;

    if request.name.trim().is_empty() {
        return Err(WatchError::Validation("Name must not be empty".into()).into());
    }
    if request.url.trim().is_empty() {
        return Err(WatchError::Validation("URL must not be empty".into()).into());
    }

    let record = ServiceRecord::new(request.name, request.url);
    let name = record.name.clone();
    let url = record.url.clone();

    state.registry.add(record).await?;

    info!(service = %name, url = %url, "Added service");
    Ok(StatusCode::CREATED)
}

/// DELETE /services - サービスを削除
///
/// ボディ不正は400、未登録の名前は404、削除成功は204。
async fn delete_service(
    State(state): State<AppState>,
    payload: Result<Json<DeleteServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload
        .map_err(|e| WatchError::Validation(format!("Invalid request body: {e}")))?;

    if !state.registry.delete(&request.name).await? {
        return Err(WatchError::NotFound(request.name).into());
    }

    info!(service = %request.name, "Deleted service");
    Ok(StatusCode::NO_CONTENT)
}
