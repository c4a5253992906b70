//! # Gateway エラー型

use axum::http::StatusCode;

/// Gatewayエラー型。
///
/// 起動時のエラー（認証・ネットワーク）は `main` まで伝播して非ゼロ終了
/// する。リクエスト処理中のエラー（テンプレート欠落）は該当リクエストを
/// 失敗させるだけで、サーバ自体は動き続ける。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// ストレージプロバイダに資格情報を拒否された
    #[error("ストレージ認証に失敗: {0}")]
    Auth(String),
    /// ストレージプロバイダへのリモート呼び出しに失敗
    #[error("ストレージ操作に失敗: {0}")]
    Network(String),
    /// ページテンプレートが読み込めない
    #[error("テンプレート読み込みに失敗: {0}")]
    Template(String),
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::Auth(_) | GatewayError::Network(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
