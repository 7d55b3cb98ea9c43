//! # Recall Architecture
//!
//! Recall keeps an index of **projects** and **wikis** in a spreadsheet that is
//! reached through a small REST service ("sheets as a database"). Like the
//! rest of the code base it is a library first; the `recall` binary is one
//! client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (recall crate)                                         │
//! │  - Parses arguments, renders cards/tables, exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses selectors              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Ids, timestamps, patches, validation, filtering          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Row Client (client/)                                       │
//! │  - One spreadsheet, JSON over HTTP, uniform errors          │
//! │  - HttpTransport (production), MemTransport (testing)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`filter`] engine sits beside the command layer: it is pure and works on
//! collections already fetched.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. The spreadsheet id is passed in explicitly; the only state on
//! disk is the [`settings`] file and the optional [`config`] file.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`client`]: Row Client and its transports
//! - [`filter`]: Filter state, predicates and facets
//! - [`model`]: `Project`, `Wiki`, drafts and patches
//! - [`tags`]: Tag parsing
//! - [`links`]: Drive and chat URLs
//! - [`settings`]: Saved connection
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod links;
pub mod model;
pub mod settings;
pub mod tags;
