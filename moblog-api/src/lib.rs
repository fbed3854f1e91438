//! HTTP surface for moblog.
//!
//! - `server`: routers, shared state and the `serve_*` entry points
//! - `handlers`: request dispatch, log ingestion and health
//! - `ingest`: console echo and best-effort persistence of a stamped batch
//! - `middleware`: CORS preflight and CORS response headers

pub mod handlers;
pub mod ingest;
pub mod middleware;
pub mod server;
