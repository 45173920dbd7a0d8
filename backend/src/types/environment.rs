//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

use crate::catalog::{UrlStrategy, DEFAULT_PRESIGNED_URL_EXPIRY};

const DEFAULT_BUCKET_NAME: &str = "family-bucket-22";
const DEFAULT_REGION: &str = "us-east-2";
const DEFAULT_PHOTO_PREFIX: &str = "uploads/";

/// Per-operation timeout of S3 calls, kept below the router's request timeout
pub const SDK_OPERATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for presigned URL expiry in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// Defaults to production under the Lambda runtime and development otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let default_stage = if Self::running_in_lambda() {
            "production"
        } else {
            "development"
        };

        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| default_stage.to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => {
                let presign_expiry_override = env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok());

                Self::Development {
                    presign_expiry_override,
                }
            }
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether the process was started by the AWS Lambda runtime
    #[must_use]
    pub fn running_in_lambda() -> bool {
        env::var("AWS_LAMBDA_RUNTIME_API").is_ok()
    }

    /// Bucket holding the photos
    #[must_use]
    pub fn bucket_name(&self) -> String {
        env::var("BUCKET_NAME").unwrap_or_else(|_| DEFAULT_BUCKET_NAME.to_string())
    }

    /// Region of the bucket, used for the S3 client and public URLs
    #[must_use]
    pub fn region(&self) -> String {
        env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string())
    }

    /// Key prefix photos are listed under
    #[must_use]
    pub fn photo_prefix(&self) -> String {
        env::var("PHOTO_PREFIX").unwrap_or_else(|_| DEFAULT_PHOTO_PREFIX.to_string())
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(SDK_OPERATION_TIMEOUT)
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .region(Region::new(self.region()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // LocalStack needs path-style addressing
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Presigned URL expiry time in seconds
    #[must_use]
    pub fn presigned_url_expiry_secs(&self) -> u64 {
        let default = DEFAULT_PRESIGNED_URL_EXPIRY.as_secs();
        match self {
            Self::Production | Self::Staging => default,
            Self::Development {
                presign_expiry_override,
            } => presign_expiry_override.unwrap_or(default),
        }
    }

    /// Strategy used by the presigned photos route
    #[must_use]
    pub fn signed_url_strategy(&self) -> UrlStrategy {
        UrlStrategy::Signed {
            expires_in: Duration::from_secs(self.presigned_url_expiry_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        env::remove_var("APP_ENV");
        env::remove_var("AWS_LAMBDA_RUNTIME_API");
        env::remove_var("PRESIGNED_URL_EXPIRY_SECS");
        assert_eq!(
            Environment::from_env(),
            Environment::Development {
                presign_expiry_override: None
            }
        );

        env::set_var("APP_ENV", " Development ");
        assert_eq!(
            Environment::from_env(),
            Environment::Development {
                presign_expiry_override: None
            }
        );

        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    fn test_lambda_runtime_defaults_to_production() {
        env::remove_var("APP_ENV");
        env::remove_var("PRESIGNED_URL_EXPIRY_SECS");
        env::set_var("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001");

        let env = Environment::from_env();
        assert_eq!(env, Environment::Production);
        assert_eq!(env.override_aws_endpoint_url(), None);

        // An explicit stage still wins
        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::remove_var("APP_ENV");
        env::remove_var("AWS_LAMBDA_RUNTIME_API");
        assert!(!Environment::running_in_lambda());
        assert_eq!(
            Environment::from_env(),
            Environment::Development {
                presign_expiry_override: None
            }
        );
    }

    #[test]
    fn test_sdk_timeout_shorter_than_request_timeout() {
        assert!(SDK_OPERATION_TIMEOUT < crate::server::REQUEST_TIMEOUT);
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        env::remove_var("BUCKET_NAME");
        env::remove_var("AWS_REGION");
        env::remove_var("PHOTO_PREFIX");

        let env = Environment::Production;
        assert_eq!(env.bucket_name(), "family-bucket-22");
        assert_eq!(env.region(), "us-east-2");
        assert_eq!(env.photo_prefix(), "uploads/");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        env::set_var("BUCKET_NAME", "other-bucket");
        env::set_var("AWS_REGION", "eu-west-1");
        env::set_var("PHOTO_PREFIX", "gallery/");

        let env = Environment::Staging;
        assert_eq!(env.bucket_name(), "other-bucket");
        assert_eq!(env.region(), "eu-west-1");
        assert_eq!(env.photo_prefix(), "gallery/");

        env::remove_var("BUCKET_NAME");
        env::remove_var("AWS_REGION");
        env::remove_var("PHOTO_PREFIX");
    }

    #[test]
    fn test_presigned_url_expiry_secs() {
        let env = Environment::Development {
            presign_expiry_override: None,
        };
        assert_eq!(env.presigned_url_expiry_secs(), 3600);

        let env = Environment::Development {
            presign_expiry_override: Some(30),
        };
        assert_eq!(env.presigned_url_expiry_secs(), 30);
        assert_eq!(
            env.signed_url_strategy(),
            UrlStrategy::Signed {
                expires_in: Duration::from_secs(30)
            }
        );

        assert_eq!(Environment::Production.presigned_url_expiry_secs(), 3600);
        assert_eq!(Environment::Staging.presigned_url_expiry_secs(), 3600);
    }

    #[test]
    #[serial]
    fn test_development_with_env_override() {
        env::set_var("APP_ENV", "development");
        env::set_var("PRESIGNED_URL_EXPIRY_SECS", "120");

        let env = Environment::from_env();
        assert_eq!(
            env,
            Environment::Development {
                presign_expiry_override: Some(120)
            }
        );
        assert_eq!(env.presigned_url_expiry_secs(), 120);

        // Unparseable values fall back to the default
        env::set_var("PRESIGNED_URL_EXPIRY_SECS", "invalid");
        let env = Environment::from_env();
        assert_eq!(
            env,
            Environment::Development {
                presign_expiry_override: None
            }
        );
        assert_eq!(env.presigned_url_expiry_secs(), 3600);

        env::remove_var("PRESIGNED_URL_EXPIRY_SECS");
        env::remove_var("APP_ENV");
    }

    #[test]
    fn test_docs_and_logging_by_stage() {
        assert!(!Environment::Production.show_api_docs());
        assert!(Environment::Staging.show_api_docs());
        assert!(Environment::Production.json_logs());
        assert!(!Environment::Development {
            presign_expiry_override: None
        }
        .json_logs());
    }
}
