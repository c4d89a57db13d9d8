use std::sync::Arc;

use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, Select,
};
use aws_sdk_dynamodb::Client;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::{AwsContext, ClientTable, Item, ScanPage};
use crate::error::StoreError;
use crate::format::to_item;
use crate::model::{ClientRecord, CLIENT_ID_ATTR};

/// Provisioned read/write capacity for a new table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub read_units: i64,
    pub write_units: i64,
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity {
            read_units: 5,
            write_units: 5,
        }
    }
}

/// `ClientTable` backed by a DynamoDB table.
#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
    runtime: Arc<Runtime>,
}

impl DynamoTable {
    pub fn new(ctx: &AwsContext, table_name: &str) -> Self {
        DynamoTable {
            client: Client::new(&ctx.sdk_config),
            table_name: table_name.to_string(),
            runtime: Arc::clone(&ctx.runtime),
        }
    }

    /// Create the table with `ClientID` as its numeric hash key.
    /// Returns the status the service reports for the new table.
    pub fn create(&self, capacity: Capacity) -> Result<Option<String>, StoreError> {
        let build_err = |err: BuildError| StoreError::service("CreateTable", err);
        let key_schema = KeySchemaElement::builder()
            .attribute_name(CLIENT_ID_ATTR)
            .key_type(KeyType::Hash)
            .build()
            .map_err(build_err)?;
        let attribute = AttributeDefinition::builder()
            .attribute_name(CLIENT_ID_ATTR)
            .attribute_type(ScalarAttributeType::N)
            .build()
            .map_err(build_err)?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(capacity.read_units)
            .write_capacity_units(capacity.write_units)
            .build()
            .map_err(build_err)?;

        info!(table = %self.table_name, ?capacity, "creating table");
        let output = self
            .runtime
            .block_on(
                self.client
                    .create_table()
                    .table_name(&self.table_name)
                    .key_schema(key_schema)
                    .attribute_definitions(attribute)
                    .provisioned_throughput(throughput)
                    .send(),
            )
            .map_err(|err| StoreError::service("CreateTable", err))?;

        Ok(output
            .table_description
            .and_then(|desc| desc.table_status)
            .map(|status| status.as_str().to_string()))
    }
}

impl ClientTable for DynamoTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn query_client(&self, client_id: i64) -> Result<Vec<Item>, StoreError> {
        debug!(table = %self.table_name, client_id, "query");
        let output = self
            .runtime
            .block_on(
                self.client
                    .query()
                    .table_name(&self.table_name)
                    .key_condition_expression("#id = :id")
                    .expression_attribute_names("#id", CLIENT_ID_ATTR)
                    .expression_attribute_values(":id", AttributeValue::N(client_id.to_string()))
                    .send(),
            )
            .map_err(|err| StoreError::service("Query", err))?;
        Ok(output.items.unwrap_or_default())
    }

    fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        debug!(
            table = %self.table_name,
            continued = exclusive_start_key.is_some(),
            "scan"
        );
        let output = self
            .runtime
            .block_on(
                self.client
                    .scan()
                    .table_name(&self.table_name)
                    .select(Select::AllAttributes)
                    .set_exclusive_start_key(exclusive_start_key)
                    .send(),
            )
            .map_err(|err| StoreError::service("Scan", err))?;
        Ok(ScanPage {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    fn put_client(&self, record: &ClientRecord) -> Result<(), StoreError> {
        let item = to_item(record)?;
        info!(table = %self.table_name, client_id = record.client_id, "put client");
        self.runtime
            .block_on(
                self.client
                    .put_item()
                    .table_name(&self.table_name)
                    .set_item(Some(item))
                    .send(),
            )
            .map_err(|err| StoreError::service("PutItem", err))?;
        Ok(())
    }

    fn delete_client(&self, client_id: i64) -> Result<(), StoreError> {
        info!(table = %self.table_name, client_id, "delete client");
        self.runtime
            .block_on(
                self.client
                    .delete_item()
                    .table_name(&self.table_name)
                    .key(CLIENT_ID_ATTR, AttributeValue::N(client_id.to_string()))
                    .send(),
            )
            .map_err(delete_error)?;
        Ok(())
    }
}

fn delete_error(err: SdkError<DeleteItemError>) -> StoreError {
    if let Some(DeleteItemError::ConditionalCheckFailedException(failure)) = err.as_service_error()
    {
        let message = failure
            .message()
            .unwrap_or("The conditional request failed")
            .to_string();
        return StoreError::ConditionalCheckFailed(message);
    }
    StoreError::service("DeleteItem", err)
}
