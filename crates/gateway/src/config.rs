//! # コマンドライン設定
//!
//! プロセス引数をフラットな設定レコードとして読み込み、認証プロファイルに
//! 変換する。ここでは資格情報の完全性チェックは行わない。不足・誤りは
//! ストレージアダプタの認証エラーとして後段で表面化する。

use clap::Parser;
use droplink_types::AuthProfile;

/// `storage_mode` にこの部分文字列が含まれる場合、keystone互換認証を選択する。
pub const LOCAL_STORAGE_MARKER: &str = "localstorage";

/// パブリッククラウドで使用する固定リージョン。
///
/// 歴史的経緯により `--region` の値はこのバリアントでは無視され、常にORDが
/// 使われる（DESIGN.md参照）。
pub const PUBLIC_CLOUD_REGION: &str = "ORD";

/// 一時アップロードページGatewayのコマンドライン引数。
#[derive(Debug, Parser)]
#[command(name = "droplink-gateway", about = "一時アップロードページを配信するGateway")]
pub struct Cli {
    /// ストレージモード。`localstorage` を含む場合はkeystone互換認証を使う
    pub storage_mode: String,

    /// パブリッククラウドのアクセスキーID
    #[arg(long = "rackspace_username", default_value = "")]
    pub rackspace_username: String,

    /// パブリッククラウドのAPIキー
    #[arg(long = "rackspace_API_key", default_value = "")]
    pub rackspace_api_key: String,

    /// keystone互換の認証エンドポイントURL
    #[arg(long = "auth_endpoint", default_value = "")]
    pub auth_endpoint: String,

    /// デバッグログを有効化する
    #[arg(long)]
    pub debug: bool,

    /// TLS証明書を検証する
    #[arg(long = "verify_ssl")]
    pub verify_ssl: bool,

    /// リージョン名（keystone互換バリアントのみ有効）
    #[arg(long, default_value = "RegionOne")]
    pub region: String,

    /// keystone互換のテナントID
    #[arg(long = "tenant_id", default_value = "")]
    pub tenant_id: String,

    /// keystone互換のユーザー名
    #[arg(long, default_value = "")]
    pub username: String,

    /// keystone互換のパスワード
    #[arg(long, default_value = "")]
    pub password: String,
}

impl Cli {
    /// `storage_mode` を検査して認証プロファイルを選択する。
    pub fn auth_profile(&self) -> AuthProfile {
        if self.storage_mode.contains(LOCAL_STORAGE_MARKER) {
            AuthProfile::Keystone {
                auth_endpoint: self.auth_endpoint.clone(),
                region: self.region.clone(),
                tenant_id: self.tenant_id.clone(),
                username: self.username.clone(),
                password: self.password.clone(),
                debug: self.debug,
                verify_ssl: self.verify_ssl,
            }
        } else {
            // --regionの値に関わらずORD固定
            AuthProfile::PublicCloud {
                access_key_id: self.rackspace_username.clone(),
                access_key_secret: self.rackspace_api_key.clone(),
                region: PUBLIC_CLOUD_REGION.to_string(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// storage_modeにlocalstorageを含む場合はkeystone互換が選択されることを確認
    #[test]
    fn test_localstorage_selects_keystone() {
        let cli = Cli::try_parse_from([
            "droplink-gateway",
            "dev-localstorage",
            "--auth_endpoint",
            "http://keystone:5000/v3",
            "--tenant_id",
            "t-123",
            "--username",
            "u",
            "--password",
            "p",
        ])
        .unwrap();

        match cli.auth_profile() {
            AuthProfile::Keystone {
                auth_endpoint,
                region,
                tenant_id,
                username,
                password,
                debug,
                verify_ssl,
            } => {
                assert_eq!(auth_endpoint, "http://keystone:5000/v3");
                assert_eq!(region, "RegionOne");
                assert_eq!(tenant_id, "t-123");
                assert_eq!(username, "u");
                assert_eq!(password, "p");
                assert!(!debug);
                assert!(!verify_ssl);
            }
            other => panic!("keystoneバリアントが選択されるべき: {other:?}"),
        }
    }

    /// localstorage以外のstorage_modeではパブリッククラウドが選択され、
    /// --regionを渡してもリージョンがORDに固定されることを確認
    #[test]
    fn test_public_cloud_pins_region_to_ord() {
        let cli = Cli::try_parse_from([
            "droplink-gateway",
            "rackspace",
            "--rackspace_username",
            "ak",
            "--rackspace_API_key",
            "sk",
            "--region",
            "LON",
        ])
        .unwrap();

        match cli.auth_profile() {
            AuthProfile::PublicCloud {
                access_key_id,
                access_key_secret,
                region,
            } => {
                assert_eq!(access_key_id, "ak");
                assert_eq!(access_key_secret, "sk");
                assert_eq!(region, PUBLIC_CLOUD_REGION);
            }
            other => panic!("パブリッククラウドバリアントが選択されるべき: {other:?}"),
        }
    }

    /// storage_mode欠落時は使用方法エラーになることを確認
    /// （ネットワークアクセスに到達する前に終了する）
    #[test]
    fn test_missing_storage_mode_is_usage_error() {
        assert!(Cli::try_parse_from(["droplink-gateway"]).is_err());
    }

    /// keystoneバリアントでは--regionの値がそのまま伝播することを確認
    #[test]
    fn test_keystone_honors_region_flag() {
        let cli = Cli::try_parse_from([
            "droplink-gateway",
            "localstorage",
            "--region",
            "RegionTwo",
        ])
        .unwrap();

        assert_eq!(cli.auth_profile().region(), "RegionTwo");
    }

    /// debug/verify_sslフラグがプロファイルに伝播することを確認
    #[test]
    fn test_debug_and_verify_ssl_flags() {
        let cli = Cli::try_parse_from([
            "droplink-gateway",
            "localstorage",
            "--debug",
            "--verify_ssl",
        ])
        .unwrap();

        match cli.auth_profile() {
            AuthProfile::Keystone { debug, verify_ssl, .. } => {
                assert!(debug);
                assert!(verify_ssl);
            }
            other => panic!("keystoneバリアントが選択されるべき: {other:?}"),
        }
    }
}
