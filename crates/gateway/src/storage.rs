//! # ストレージクライアントアダプタ
//!
//! オブジェクトストレージの抽象インターフェース。
//! S3互換実装は `s3` サブモジュールを参照。

pub mod s3;

use droplink_types::SignedMethod;

use crate::error::GatewayError;

/// オブジェクトストレージの抽象インターフェース。
///
/// 3操作はいずれもリモート呼び出しを伴う。冪等なのは
/// `ensure_container` のみで、繰り返し実行しても安全。
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// コンテナが存在しなければ作成する。既に存在する場合は何もしない。
    async fn ensure_container(&self, name: &str) -> Result<(), GatewayError>;

    /// 指定オリジンからのクロスオリジンリクエストを許可するメタデータを
    /// コンテナに設定する。毎回無条件に上書きされる。
    async fn set_cors_metadata(&self, name: &str, origin: &str) -> Result<(), GatewayError>;

    /// `ttl_secs` 秒有効で `method` に限定された署名付きURLを生成する。
    async fn presign(
        &self,
        name: &str,
        object_key: &str,
        ttl_secs: u32,
        method: SignedMethod,
    ) -> Result<String, GatewayError>;
}
