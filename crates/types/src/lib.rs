//! # Droplink 共有型定義
//!
//! Gatewayバイナリとそのテストが共有するデータモデル。
//! いずれもプロセス起動時に一度だけ構築され、以後変更されない。

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 認証プロファイル
// ---------------------------------------------------------------------------

/// ストレージプロバイダに対する認証プロファイル。
///
/// `storage_mode` 引数に `localstorage` が含まれる場合はkeystone互換の
/// [`AuthProfile::Keystone`]、それ以外は [`AuthProfile::PublicCloud`] が
/// 選択される。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AuthProfile {
    /// keystone互換のローカルストレージ（OpenStack Swift等）
    Keystone {
        /// 認証エンドポイントURL
        auth_endpoint: String,
        /// リージョン名（デフォルト: RegionOne）
        region: String,
        /// テナントID。アクセスキーは `tenant_id:username` 形式になる
        tenant_id: String,
        /// ユーザー名
        username: String,
        /// パスワード
        password: String,
        /// HTTPデバッグ出力を有効化するか
        debug: bool,
        /// TLS証明書を検証するか
        verify_ssl: bool,
    },
    /// パブリッククラウド（ベンダーネイティブ認証）
    PublicCloud {
        /// アクセスキーID
        access_key_id: String,
        /// アクセスキーシークレット
        access_key_secret: String,
        /// リージョン。常に `ORD` に固定される（`--region` は無視される）
        region: String,
    },
}

impl AuthProfile {
    /// プロファイルが参照するリージョン名。
    pub fn region(&self) -> &str {
        match self {
            AuthProfile::Keystone { region, .. } => region,
            AuthProfile::PublicCloud { region, .. } => region,
        }
    }

    /// keystone互換バリアントかどうか。
    pub fn is_keystone(&self) -> bool {
        matches!(self, AuthProfile::Keystone { .. })
    }
}

// ---------------------------------------------------------------------------
// 署名付きURL
// ---------------------------------------------------------------------------

/// 署名付きURLのHTTPメソッド制約。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignedMethod {
    /// アップロード用（PUT）
    Put,
    /// ダウンロード用（GET）
    Get,
}

impl SignedMethod {
    /// HTTPメソッド表記。
    pub fn as_str(&self) -> &'static str {
        match self {
            SignedMethod::Put => "PUT",
            SignedMethod::Get => "GET",
        }
    }
}

impl std::fmt::Display for SignedMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1回の起動で発行される署名付きURLペア。
///
/// upload_urlとdownload_urlは必ず同一の `object_key` と同一のコンテナを
/// 参照する。生成後は不変で、ページサーバの存続期間だけメモリに保持される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlPair {
    /// ランダム生成されたオブジェクト名（UUIDv4）
    pub object_key: String,
    /// アップロード用URL（PUT限定）
    pub upload_url: String,
    /// ダウンロード用URL（GET限定）
    pub download_url: String,
    /// 発行時点からの有効期間（秒）
    pub expires_in_secs: u32,
}
