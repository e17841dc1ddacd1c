use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;

/// Loads shared SDK configuration from the default provider chain.
pub async fn load_sdk_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider();
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}

/// S3 client pinned to the storage region, so bucket creation and the
/// location constraint agree.
pub fn s3_client(sdk_config: &SdkConfig, region: &str) -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::config::Builder::from(sdk_config)
        .region(Region::new(region.to_string()))
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

pub fn dynamodb_client(sdk_config: &SdkConfig) -> aws_sdk_dynamodb::Client {
    aws_sdk_dynamodb::Client::new(sdk_config)
}

pub fn sns_client(sdk_config: &SdkConfig) -> aws_sdk_sns::Client {
    aws_sdk_sns::Client::new(sdk_config)
}
