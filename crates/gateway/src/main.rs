//! # Droplink Gateway
//!
//! オブジェクトストレージに対して一時的な署名付きアップロード/ダウンロード
//! URLペアを発行し、それを埋め込んだ静的HTMLページを配信する単機能の
//! ユーティリティ。ブラウザはこのページからストレージへ直接PUTし、
//! 後から同じオブジェクトをGETで取り出せる。
//!
//! ## 処理の流れ（一直線・一回限り）
//! 1. コマンドライン引数の読み込み
//! 2. ストレージプロバイダへの認証（keystone互換 or パブリッククラウド）
//! 3. `uploads` コンテナの冪等な作成とCORSメタデータ設定
//! 4. ランダムなオブジェクト名に対するPUT/GET署名付きURLの発行（1時間有効）
//! 5. URLを差し込んだページを返すHTTPサーバの起動（port 8765）
//!
//! サーバ起動後の再プロビジョニングはない。プロセスが終了されるまで
//! 同じページを配信し続ける。

mod config;
mod error;
mod page;
mod provision;
mod storage;

use std::path::PathBuf;

use clap::Parser;
use droplink_types::AuthProfile;

use crate::storage::s3::S3ObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = config::Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    tracing::info!("ロギングを設定しました");

    let profile = cli.auth_profile();
    match &profile {
        AuthProfile::Keystone { auth_endpoint, region, .. } => {
            tracing::info!(
                auth_endpoint = %auth_endpoint,
                region = %region,
                "ローカルストレージ用にkeystone互換認証を設定しました"
            );
        }
        AuthProfile::PublicCloud { region, .. } => {
            tracing::info!(
                region = %region,
                "パブリッククラウド認証を設定しました（リージョンは固定）"
            );
        }
    }

    let store = S3ObjectStore::new(&profile)?;
    let pair = provision::provision(&store).await?;

    tracing::info!("サーバを起動します...");
    page::serve(pair, PathBuf::from(page::TEMPLATE_PATH)).await
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
