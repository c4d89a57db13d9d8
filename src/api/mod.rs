// Service layer: the two remote stores the tool talks to.
//
// Menu operations only see the `ClientTable` and `StatementBucket` traits,
// so the AWS-backed implementations in `table` and `bucket` can be swapped
// for in-memory ones in tests. The AWS SDK is async; each implementation
// holds a handle to one shared tokio runtime and blocks on every call so the
// rest of the program stays synchronous.

use std::collections::HashMap;
use std::sync::Arc;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::Settings;
use crate::error::StoreError;
use crate::model::ClientRecord;

pub mod bucket;
pub mod table;

pub use bucket::S3Bucket;
pub use table::DynamoTable;

/// A raw table item: attribute name to attribute value.
pub type Item = HashMap<String, AttributeValue>;

/// One page of a table scan.
#[derive(Debug, Default, Clone)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Continuation marker; `Some` while more pages remain.
    pub last_evaluated_key: Option<Item>,
}

/// Client records keyed by numeric `ClientID`.
pub trait ClientTable {
    fn table_name(&self) -> &str;

    /// Exact-key query. Returns zero or one item.
    fn query_client(&self, client_id: i64) -> Result<Vec<Item>, StoreError>;

    /// Fetch one page of a full scan, starting after `exclusive_start_key`.
    fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError>;

    /// Unconditional put; an existing record with the same ID is replaced.
    fn put_client(&self, record: &ClientRecord) -> Result<(), StoreError>;

    fn delete_client(&self, client_id: i64) -> Result<(), StoreError>;
}

/// Statement files in a flat bucket namespace, keyed by file name.
pub trait StatementBucket {
    fn bucket_name(&self) -> &str;

    /// Every object key in the bucket, following all listing pages.
    fn list_statements(&self) -> Result<Vec<String>, StoreError>;

    /// Object body. A missing key is `StoreError::NotFound`.
    fn get_statement(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `body` under `key`, replacing any existing object.
    fn put_statement(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError>;

    fn delete_statement(&self, key: &str) -> Result<(), StoreError>;
}

/// Runtime plus resolved SDK configuration, shared by both services.
#[derive(Clone)]
pub struct AwsContext {
    pub runtime: Arc<Runtime>,
    pub sdk_config: SdkConfig,
}

impl AwsContext {
    /// Build a current-thread runtime and resolve region, profile and
    /// credentials through the SDK's default provider chain.
    pub fn load(settings: &Settings) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = runtime.block_on(loader.load());
        debug!(
            region = sdk_config.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            "loaded AWS configuration"
        );

        Ok(AwsContext {
            runtime: Arc::new(runtime),
            sdk_config,
        })
    }

    pub fn region(&self) -> Option<&str> {
        self.sdk_config.region().map(|r| r.as_ref())
    }

    pub fn table(&self, settings: &Settings) -> DynamoTable {
        DynamoTable::new(self, &settings.table_name)
    }

    pub fn bucket(&self, bucket_name: &str, settings: &Settings) -> S3Bucket {
        S3Bucket::new(self, bucket_name, settings.force_path_style)
    }
}
