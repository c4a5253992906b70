//! # アップロードページサーバ
//!
//! 発行済みの署名付きURLペアを埋め込んだ静的HTMLを返すだけのHTTPサーバ。
//! ルーティングもメソッド判別もなく、どんなリクエストにも同じ200応答を
//! 返す。URLは起動中に変化しないが、テンプレートはリクエストごとに
//! ディスクから読み直す。

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use droplink_types::SignedUrlPair;

use crate::error::GatewayError;

/// ページサーバのバインドアドレス（全インターフェース、固定ポート）。
pub const BIND_ADDR: &str = "0.0.0.0:8765";

/// テンプレートファイルのパス。起動ディレクトリから解決される。
pub const TEMPLATE_PATH: &str = "./upload.html";

/// テンプレート中のアップロードURL差し込み位置。
const UPLOAD_URL_SLOT: &str = "{upload_url}";

/// テンプレート中のダウンロードURL差し込み位置。
const DOWNLOAD_URL_SLOT: &str = "{download_url}";

/// ページサーバの共有状態。サーバ存続期間を通じて読み取り専用。
pub struct PageState {
    /// 発行済みの署名付きURLペア
    pub urls: SignedUrlPair,
    /// テンプレートファイルのパス
    pub template_path: PathBuf,
}

/// テンプレートにURLペアを差し込む。
///
/// 単純な文字列置換なので、テンプレート中の他の波括弧
/// （JavaScript等）には影響しない。
pub fn render_page(template: &str, urls: &SignedUrlPair) -> String {
    template
        .replace(UPLOAD_URL_SLOT, &urls.upload_url)
        .replace(DOWNLOAD_URL_SLOT, &urls.download_url)
}

/// 全リクエスト共通のハンドラ。
///
/// テンプレートを読み直してレンダリングし、200で返す。テンプレートが
/// 読めない場合はそのリクエストだけが失敗し、サーバは動き続ける。
async fn handle_page(
    State(state): State<Arc<PageState>>,
) -> Result<Html<String>, GatewayError> {
    let template = tokio::fs::read_to_string(&state.template_path)
        .await
        .map_err(|e| {
            GatewayError::Template(format!(
                "{} を読み込めません: {e}",
                state.template_path.display()
            ))
        })?;

    Ok(Html(render_page(&template, &state.urls)))
}

/// 任意のメソッド・パスを同一ハンドラに向けるルータを構築する。
pub fn router(state: Arc<PageState>) -> axum::Router {
    axum::Router::new().fallback(handle_page).with_state(state)
}

/// ページサーバを起動する。外部からプロセスが終了されるまで返らない。
/// ポートが既に使用中の場合のみ起動時に失敗する。
pub async fn serve(urls: SignedUrlPair, template_path: PathBuf) -> anyhow::Result<()> {
    let app = router(Arc::new(PageState {
        urls,
        template_path,
    }));

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    tracing::info!("アップロードページサーバを {} で起動します", BIND_ADDR);

    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
