//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::WatchError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct ApiError(pub WatchError);

impl From<WatchError> for ApiError {
    fn from(err: WatchError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // external_message()で内部詳細（ファイルパス等）の露出を防ぐ。
        // 完全なエラー内容はサーバー側ログにのみ残す。
        let status = match &self.0 {
            WatchError::NotFound(_) => StatusCode::NOT_FOUND,
            WatchError::Validation(_) => StatusCode::BAD_REQUEST,
            WatchError::Io(_) | WatchError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WatchError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
