//! # CLI Behavior
//!
//! This is **one possible UI client** for recall, not the application itself.
//! For the overall architecture, see the `recallapp` crate documentation.
//!
//! ## Connection First
//!
//! Every record command needs a linked spreadsheet. `recall connect <ID>`
//! validates it (health check, `projects` and `wikis` sheets present) and saves
//! it; until then record commands fail with a hint to connect.
//!
//! ## Naked Execution (`recall`)
//!
//! Running `recall` with no arguments is `recall view`: every project and wiki
//! as cards. Reading is the common case and should be the shortest command.
//!
//! ## Selectors
//!
//! `update`, `delete` and `ask` take a selector: the number shown by
//! `recall list`, or a record id. Numbers are positions in the sheet, so they
//! are resolved against a fresh fetch right before the change is sent.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, logging, and per-command handlers
//! - `render`: cards, tables, facets, status and messages
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
