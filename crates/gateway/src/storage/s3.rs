//! # S3互換ストレージアダプタ
//!
//! [`crate::storage::ObjectStore`] のS3互換実装。
//! keystone互換のローカルストレージ（OpenStack Swift s3api, MinIO等）と
//! パブリッククラウドの両方をrust-s3でカバーする。

use droplink_types::{AuthProfile, SignedMethod};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::serde_types::{CorsConfiguration, CorsRule};
use s3::{Bucket, BucketConfiguration, Region};

use crate::error::GatewayError;
use crate::storage::ObjectStore;

/// パブリッククラウドのORDリージョン向けストレージエンドポイント。
/// リージョンがORD固定のため、エンドポイントも固定。
const PUBLIC_CLOUD_ENDPOINT: &str = "https://storage101.ord.clouddrive.com";

/// S3互換ストレージによる [`ObjectStore`] 実装。
///
/// バケットハンドルは操作のたびにリージョンと資格情報から構築する
/// （構築自体はネットワークアクセスを伴わない）。
pub struct S3ObjectStore {
    region: Region,
    credentials: Credentials,
    /// keystone互換エンドポイントはパススタイルのアドレッシングを要求する
    path_style: bool,
}

impl S3ObjectStore {
    /// 認証プロファイルからアダプタを構築する。
    ///
    /// keystone互換バリアントではSwift s3apiの規約に従い、アクセスキーを
    /// `tenant_id:username`、シークレットをパスワードとする。
    /// パブリッククラウドバリアントはアクセスキーペアをそのまま使い、
    /// エンドポイントはORD固定。
    pub fn new(profile: &AuthProfile) -> Result<Self, GatewayError> {
        match profile {
            AuthProfile::Keystone {
                auth_endpoint,
                region,
                tenant_id,
                username,
                password,
                verify_ssl,
                ..
            } => {
                if !verify_ssl {
                    // rust-s3にはTLS検証を無効化する口がない
                    tracing::warn!(
                        "--verify_sslが指定されていませんが、TLS証明書検証は無効化できません"
                    );
                }

                let access_key = if tenant_id.is_empty() {
                    username.clone()
                } else {
                    format!("{tenant_id}:{username}")
                };

                let credentials =
                    Credentials::new(Some(&access_key), Some(password), None, None, None)
                        .map_err(|e| {
                            GatewayError::Auth(format!("認証情報の構築に失敗: {e}"))
                        })?;

                Ok(Self {
                    region: Region::Custom {
                        region: region.clone(),
                        endpoint: auth_endpoint.clone(),
                    },
                    credentials,
                    path_style: true,
                })
            }
            AuthProfile::PublicCloud {
                access_key_id,
                access_key_secret,
                region,
            } => {
                let credentials = Credentials::new(
                    Some(access_key_id),
                    Some(access_key_secret),
                    None,
                    None,
                    None,
                )
                .map_err(|e| GatewayError::Auth(format!("認証情報の構築に失敗: {e}")))?;

                Ok(Self {
                    region: Region::Custom {
                        region: region.clone(),
                        endpoint: PUBLIC_CLOUD_ENDPOINT.to_string(),
                    },
                    credentials,
                    path_style: false,
                })
            }
        }
    }

    /// コンテナ名からバケットハンドルを構築する。
    fn bucket(&self, name: &str) -> Result<Bucket, GatewayError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| storage_error("バケット参照の構築", e))?;

        let bucket = if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(*bucket)
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn ensure_container(&self, name: &str) -> Result<(), GatewayError> {
        let bucket = self.bucket(name)?;

        match bucket.exists().await {
            Ok(true) => {
                tracing::debug!(container = name, "コンテナは既に存在します");
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => return Err(storage_error("コンテナ存在確認", e)),
        }

        let result = if self.path_style {
            Bucket::create_with_path_style(
                name,
                self.region.clone(),
                self.credentials.clone(),
                BucketConfiguration::default(),
            )
            .await
        } else {
            Bucket::create(
                name,
                self.region.clone(),
                self.credentials.clone(),
                BucketConfiguration::default(),
            )
            .await
        };

        match result {
            Ok(_) => {
                tracing::info!(container = name, "コンテナを作成しました");
                Ok(())
            }
            // 存在確認との競合で作成が409を返した場合も成功扱い
            Err(S3Error::HttpFailWithBody(409, _)) => Ok(()),
            Err(e) => Err(storage_error("コンテナ作成", e)),
        }
    }

    async fn set_cors_metadata(&self, name: &str, origin: &str) -> Result<(), GatewayError> {
        let bucket = self.bucket(name)?;

        let rule = CorsRule::new(
            Some(vec!["*".to_string()]),
            vec!["PUT".to_string(), "GET".to_string()],
            vec![origin.to_string()],
            None,
            None,
            None,
        );

        bucket
            .put_bucket_cors(CorsConfiguration::new(vec![rule]))
            .await
            .map_err(|e| storage_error("CORSメタデータ設定", e))?;

        tracing::debug!(container = name, origin = origin, "CORSメタデータを設定しました");
        Ok(())
    }

    async fn presign(
        &self,
        name: &str,
        object_key: &str,
        ttl_secs: u32,
        method: SignedMethod,
    ) -> Result<String, GatewayError> {
        let bucket = self.bucket(name)?;

        let url = match method {
            SignedMethod::Put => bucket.presign_put(object_key, ttl_secs, None, None).await,
            SignedMethod::Get => bucket.presign_get(object_key, ttl_secs, None).await,
        }
        .map_err(|e| storage_error("署名付きURL生成", e))?;

        Ok(url)
    }
}

/// rust-s3のエラーをGatewayのエラー分類に写す。
/// HTTP 401/403は認証エラー、それ以外はネットワークエラー扱い。
fn storage_error(context: &str, e: S3Error) -> GatewayError {
    match e {
        S3Error::HttpFailWithBody(code @ (401 | 403), body) => {
            GatewayError::Auth(format!("{context}: HTTP {code} - {body}"))
        }
        other => GatewayError::Network(format!("{context}: {other}")),
    }
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
