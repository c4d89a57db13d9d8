// Library root
// -----------
// This crate exposes the library surface behind the `client-admin` and
// `client-admin-provision` binaries.
//
// Module responsibilities:
// - `api`: the client table (DynamoDB) and statement bucket (S3) behind
//   two small traits, plus the AWS-backed implementations.
// - `clients` / `statements`: the eight menu operations.
// - `format`: turns table items into printable JSON lines and records
//   into table items.
// - `ui`: the numeric menu loop, the console abstraction and spinners.
// - `config`, `logging`, `error`: start-up settings, tracing setup and the
//   error types passed back to the menu loop.
pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod statements;
pub mod ui;
