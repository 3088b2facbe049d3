//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{
    meta::region::RegionProviderChain, retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion,
};
use order_topics::topic::TopicConfig;

/// `LocalStack` endpoint used during development
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
/// Outbound topic in the `LocalStack` account
const DEVELOPMENT_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:000000000000:OrderStatusTopic";
/// Region used when none is configured in development
const DEVELOPMENT_REGION: &str = "us-east-1";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for `CloudWatch` and Datadog ingestion
    Json,
    /// Human-readable output
    Pretty,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the ARN of the outbound order status topic
    ///
    /// # Panics
    ///
    /// Panics if `ORDER_STATUS_TOPIC_ARN` is not set outside development
    #[must_use]
    pub fn topic_arn(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("ORDER_STATUS_TOPIC_ARN")
                .expect("ORDER_STATUS_TOPIC_ARN environment variable is not set"),
            Self::Development => env::var("ORDER_STATUS_TOPIC_ARN")
                .unwrap_or_else(|_| DEVELOPMENT_TOPIC_ARN.to_string()),
        }
    }

    /// Outbound topic configuration
    #[must_use]
    pub fn topic_config(&self) -> TopicConfig {
        TopicConfig::new(self.topic_arn())
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub fn override_aws_endpoint_url(&self) -> Option<String> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some(
                env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| LOCALSTACK_ENDPOINT.to_string()),
            ),
        }
    }

    /// Returns the log format, honouring a `LOG_FORMAT` override
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        match env::var("LOG_FORMAT").map(|v| v.trim().to_lowercase()).as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => match self {
                Self::Production | Self::Staging => LogFormat::Json,
                Self::Development => LogFormat::Pretty,
            },
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        // Must stay below the Lambda timeout so a stalled publish still returns a 500
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(10))
            .build();

        let region = RegionProviderChain::default_provider().or_else(DEVELOPMENT_REGION);

        let mut config_builder = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.load().await
    }

    /// AWS SNS service configuration
    pub async fn sns_client_config(&self) -> aws_sdk_sns::Config {
        let aws_config = self.aws_config().await;
        (&aws_config).into()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test explicit development, trimmed and case-insensitive
        env::set_var("APP_ENV", " Development ");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test staging
        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        // Test production
        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        // Cleanup
        env::remove_var("APP_ENV");
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
    fn test_topic_arn() {
        env::remove_var("ORDER_STATUS_TOPIC_ARN");
        assert_eq!(
            Environment::Development.topic_config(),
            TopicConfig::new(DEVELOPMENT_TOPIC_ARN)
        );

        env::set_var(
            "ORDER_STATUS_TOPIC_ARN",
            "arn:aws:sns:us-east-1:123456789012:OrderStatusTopic",
        );
        assert_eq!(
            Environment::Production.topic_arn(),
            "arn:aws:sns:us-east-1:123456789012:OrderStatusTopic"
        );
        assert_eq!(
            Environment::Development.topic_arn(),
            "arn:aws:sns:us-east-1:123456789012:OrderStatusTopic"
        );

        // Cleanup
        env::remove_var("ORDER_STATUS_TOPIC_ARN");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "ORDER_STATUS_TOPIC_ARN environment variable is not set")]
    fn test_topic_arn_required_in_staging() {
        env::remove_var("ORDER_STATUS_TOPIC_ARN");
        let _ = Environment::Staging.topic_arn();
    }

    #[test]
    #[serial]
    fn test_override_aws_endpoint_url() {
        env::remove_var("AWS_ENDPOINT_URL");
        assert_eq!(Environment::Production.override_aws_endpoint_url(), None);
        assert_eq!(Environment::Staging.override_aws_endpoint_url(), None);
        assert_eq!(
            Environment::Development.override_aws_endpoint_url().as_deref(),
            Some(LOCALSTACK_ENDPOINT)
        );

        env::set_var("AWS_ENDPOINT_URL", "http://localstack:4566");
        assert_eq!(
            Environment::Development.override_aws_endpoint_url().as_deref(),
            Some("http://localstack:4566")
        );

        // Cleanup
        env::remove_var("AWS_ENDPOINT_URL");
    }

    #[test]
    #[serial]
    fn test_log_format() {
        env::remove_var("LOG_FORMAT");
        assert_eq!(Environment::Production.log_format(), LogFormat::Json);
        assert_eq!(Environment::Staging.log_format(), LogFormat::Json);
        assert_eq!(Environment::Development.log_format(), LogFormat::Pretty);

        env::set_var("LOG_FORMAT", "JSON");
        assert_eq!(Environment::Development.log_format(), LogFormat::Json);

        env::set_var("LOG_FORMAT", "pretty");
        assert_eq!(Environment::Production.log_format(), LogFormat::Pretty);

        env::set_var("LOG_FORMAT", "xml");
        assert_eq!(Environment::Staging.log_format(), LogFormat::Json);

        // Cleanup
        env::remove_var("LOG_FORMAT");
    }
}
