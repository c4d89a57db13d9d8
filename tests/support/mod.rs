// In-memory stand-ins for the table, the bucket and the terminal.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::io::{self, Write};

use aws_sdk_dynamodb::types::AttributeValue;
use client_admin::api::{ClientTable, Item, ScanPage, StatementBucket};
use client_admin::error::StoreError;
use client_admin::format::to_item;
use client_admin::model::{ClientRecord, CLIENT_ID_ATTR};
use client_admin::ui::Console;

/// Client table kept in a sorted map. Scans return at most `page_size`
/// items per page and hand back the last key as the continuation marker.
pub struct MemoryTable {
    items: RefCell<BTreeMap<i64, Item>>,
    page_size: usize,
    pub scan_calls: Cell<usize>,
    pub mutations: Cell<usize>,
    delete_failure: RefCell<Option<String>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        MemoryTable {
            items: RefCell::new(BTreeMap::new()),
            page_size,
            scan_calls: Cell::new(0),
            mutations: Cell::new(0),
            delete_failure: RefCell::new(None),
        }
    }

    /// Make the next delete report a conditional-check failure.
    pub fn fail_next_delete(&self, message: &str) {
        *self.delete_failure.borrow_mut() = Some(message.to_string());
    }

    pub fn insert(&self, record: &ClientRecord) {
        let item = to_item(record).unwrap();
        self.items.borrow_mut().insert(record.client_id, item);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn get(&self, client_id: i64) -> Option<Item> {
        self.items.borrow().get(&client_id).cloned()
    }
}

fn key_of(item: &Item) -> i64 {
    match item.get(CLIENT_ID_ATTR) {
        Some(AttributeValue::N(raw)) => raw.parse().unwrap(),
        other => panic!("item without numeric key: {other:?}"),
    }
}

impl ClientTable for MemoryTable {
    fn table_name(&self) -> &str {
        "Clients"
    }

    fn query_client(&self, client_id: i64) -> Result<Vec<Item>, StoreError> {
        Ok(self.get(client_id).into_iter().collect())
    }

    fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        self.scan_calls.set(self.scan_calls.get() + 1);
        let items = self.items.borrow();
        let after = exclusive_start_key.as_ref().map(key_of);
        let remaining: Vec<&Item> = items
            .iter()
            .filter(|(id, _)| after.map_or(true, |after| **id > after))
            .map(|(_, item)| item)
            .collect();
        let page: Vec<Item> = remaining
            .iter()
            .take(self.page_size)
            .map(|item| (*item).clone())
            .collect();
        let last_evaluated_key = if remaining.len() > self.page_size {
            page.last().map(|item| {
                let mut key = Item::new();
                key.insert(CLIENT_ID_ATTR.to_string(), item[CLIENT_ID_ATTR].clone());
                key
            })
        } else {
            None
        };
        Ok(ScanPage {
            items: page,
            last_evaluated_key,
        })
    }

    fn put_client(&self, record: &ClientRecord) -> Result<(), StoreError> {
        self.mutations.set(self.mutations.get() + 1);
        self.insert(record);
        Ok(())
    }

    fn delete_client(&self, client_id: i64) -> Result<(), StoreError> {
        self.mutations.set(self.mutations.get() + 1);
        if let Some(message) = self.delete_failure.borrow_mut().take() {
            return Err(StoreError::ConditionalCheckFailed(message));
        }
        self.items.borrow_mut().remove(&client_id);
        Ok(())
    }
}

/// Statement bucket kept in a sorted map of key to bytes.
pub struct MemoryBucket {
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    pub mutations: Cell<usize>,
    broken: Cell<bool>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        MemoryBucket {
            objects: RefCell::new(BTreeMap::new()),
            mutations: Cell::new(0),
            broken: Cell::new(false),
        }
    }

    /// Make every call fail as if the service were unreachable.
    pub fn break_service(&self) {
        self.broken.set(true);
    }

    pub fn insert(&self, key: &str, body: &[u8]) {
        self.objects.borrow_mut().insert(key.to_string(), body.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.borrow().get(key).cloned()
    }

    fn check(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.broken.get() {
            return Err(StoreError::Service {
                operation,
                message: "dispatch failure: connection refused".into(),
            });
        }
        Ok(())
    }
}

impl StatementBucket for MemoryBucket {
    fn bucket_name(&self) -> &str {
        "acme-statements"
    }

    fn list_statements(&self) -> Result<Vec<String>, StoreError> {
        self.check("ListObjectsV2")?;
        Ok(self.objects.borrow().keys().cloned().collect())
    }

    fn get_statement(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.check("GetObject")?;
        self.get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn put_statement(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        self.check("PutObject")?;
        self.mutations.set(self.mutations.get() + 1);
        self.objects.borrow_mut().insert(key.to_string(), body);
        Ok(())
    }

    fn delete_statement(&self, key: &str) -> Result<(), StoreError> {
        self.check("DeleteObject")?;
        self.mutations.set(self.mutations.get() + 1);
        self.objects.borrow_mut().remove(key);
        Ok(())
    }
}

/// Console fed from a fixed script of input lines. Prompts and output are
/// captured in one transcript. Running out of lines reads as end of input.
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<u8>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        ScriptedConsole {
            input: lines.iter().map(|line| line.to_string()).collect(),
            output: Vec::new(),
        }
    }

    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        let line = self.input.pop_front();
        if let Some(line) = &line {
            writeln!(self.output, "{line}")?;
        }
        Ok(line)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

pub fn acme() -> ClientRecord {
    ClientRecord {
        client_id: 12345,
        business_name: "Acme".into(),
        point_of_contact: "Jane Doe".into(),
        email: "jane@acme.com".into(),
        phone_number: "555-1234".into(),
    }
}

pub fn client(client_id: i64) -> ClientRecord {
    ClientRecord {
        client_id,
        business_name: format!("Business {client_id}"),
        point_of_contact: format!("Contact {client_id}"),
        email: format!("contact{client_id}@example.com"),
        phone_number: format!("555-{client_id:04}"),
    }
}

/// Every line of the transcript that parses as a client record.
pub fn printed_records(transcript: &str) -> Vec<ClientRecord> {
    transcript
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
