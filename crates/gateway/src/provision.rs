//! # 署名付きURLプロビジョナ
//!
//! ストレージアダプタを編成して署名付きURLペアを発行する。
//! 処理は一直線でリトライもロールバックもない。途中で失敗したら
//! そのまま起動を中断する。

use droplink_types::{SignedMethod, SignedUrlPair};

use crate::error::GatewayError;
use crate::storage::ObjectStore;

/// アップロード先のコンテナ名。
pub const UPLOAD_CONTAINER: &str = "uploads";

/// ページサーバのオリジン。コンテナのCORS許可先になる。
pub const PAGE_ORIGIN: &str = "http://localhost:8765";

/// 署名付きURLの有効期間（1時間）。
pub const URL_TTL_SECS: u32 = 3600;

/// コンテナを準備し、ランダムなオブジェクト名に対するPUT/GETの
/// 署名付きURLペアを発行する。
///
/// オブジェクト名はUUIDv4で、起動のたびに新しく生成される。
/// ここではオブジェクト自体は書き込まない。名前は将来のアップロード先を
/// 指すだけである。
pub async fn provision(store: &dyn ObjectStore) -> Result<SignedUrlPair, GatewayError> {
    store.ensure_container(UPLOAD_CONTAINER).await?;
    store.set_cors_metadata(UPLOAD_CONTAINER, PAGE_ORIGIN).await?;

    let object_key = uuid::Uuid::new_v4().to_string();
    tracing::info!(object_key = %object_key, "ファイルはこの名前で保存されます");

    let upload_url = store
        .presign(UPLOAD_CONTAINER, &object_key, URL_TTL_SECS, SignedMethod::Put)
        .await?;
    tracing::debug!(upload_url = %upload_url, "アップロードURL");

    let download_url = store
        .presign(UPLOAD_CONTAINER, &object_key, URL_TTL_SECS, SignedMethod::Get)
        .await?;
    tracing::debug!(download_url = %download_url, "ダウンロードURL");

    Ok(SignedUrlPair {
        object_key,
        upload_url,
        download_url,
        expires_in_secs: URL_TTL_SECS,
    })
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
