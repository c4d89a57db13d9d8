use std::sync::Arc;

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use super::{AwsContext, StatementBucket};
use crate::error::StoreError;

/// `StatementBucket` backed by an S3 bucket.
#[derive(Clone)]
pub struct S3Bucket {
    client: Client,
    bucket_name: String,
    runtime: Arc<Runtime>,
}

impl S3Bucket {
    pub fn new(ctx: &AwsContext, bucket_name: &str, force_path_style: bool) -> Self {
        let config = aws_sdk_s3::config::Builder::from(&ctx.sdk_config)
            .force_path_style(force_path_style)
            .build();
        S3Bucket {
            client: Client::from_conf(config),
            bucket_name: bucket_name.to_string(),
            runtime: Arc::clone(&ctx.runtime),
        }
    }

    /// Create the bucket. Outside `us-east-1` S3 requires the region as an
    /// explicit location constraint.
    pub fn create(&self, region: Option<&str>) -> Result<(), StoreError> {
        let mut request = self.client.create_bucket().bucket(&self.bucket_name);
        if let Some(region) = region.filter(|r| *r != "us-east-1") {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }
        info!(bucket = %self.bucket_name, region, "creating bucket");
        self.runtime
            .block_on(request.send())
            .map_err(|err| StoreError::service("CreateBucket", err))?;
        Ok(())
    }
}

impl StatementBucket for S3Bucket {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    fn list_statements(&self) -> Result<Vec<String>, StoreError> {
        debug!(bucket = %self.bucket_name, "list objects");
        self.runtime.block_on(async {
            let mut pages = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket_name)
                .into_paginator()
                .send();
            let mut keys = Vec::new();
            while let Some(page) = pages.next().await {
                let page = page.map_err(|err| StoreError::service("ListObjectsV2", err))?;
                keys.extend(
                    page.contents
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|object| object.key),
                );
            }
            Ok(keys)
        })
    }

    fn get_statement(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        debug!(bucket = %self.bucket_name, key, "get object");
        self.runtime.block_on(async {
            let output = self
                .client
                .get_object()
                .bucket(&self.bucket_name)
                .key(key)
                .send()
                .await
                .map_err(|err| get_error(key, err))?;
            let body = output
                .body
                .collect()
                .await
                .map_err(|err| StoreError::service("GetObject", err))?;
            Ok(body.into_bytes().to_vec())
        })
    }

    fn put_statement(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        info!(bucket = %self.bucket_name, key, bytes = body.len(), "put object");
        self.runtime
            .block_on(
                self.client
                    .put_object()
                    .bucket(&self.bucket_name)
                    .key(key)
                    .body(ByteStream::from(body))
                    .send(),
            )
            .map_err(|err| StoreError::service("PutObject", err))?;
        Ok(())
    }

    fn delete_statement(&self, key: &str) -> Result<(), StoreError> {
        info!(bucket = %self.bucket_name, key, "delete object");
        self.runtime
            .block_on(
                self.client
                    .delete_object()
                    .bucket(&self.bucket_name)
                    .key(key)
                    .send(),
            )
            .map_err(|err| StoreError::service("DeleteObject", err))?;
        Ok(())
    }
}

fn get_error(key: &str, err: SdkError<GetObjectError>) -> StoreError {
    let missing = err
        .as_service_error()
        .is_some_and(GetObjectError::is_no_such_key)
        || err
            .raw_response()
            .is_some_and(|response| response.status().as_u16() == 404);
    if missing {
        warn!(key, "object not found");
        return StoreError::NotFound(key.to_string());
    }
    StoreError::service("GetObject", err)
}
