//! Terminal styles for the recall CLI.
//!
//! Styles are semantic: code asks for `INDEX` or `MUTED`, never for a color.
//! They are built once through `once_cell::sync::Lazy`. Whether escape codes
//! are emitted is decided per call (see `render::paint`), so the same styles
//! serve both colored terminals and plain output in tests and pipes.

use console::Style;
use once_cell::sync::Lazy;

/// Display index column (`1.`, `12.`).
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());

/// Record names on cards and in tables.
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());

/// Secondary information: ids, timestamps, labels.
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(246));

pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());

pub static TAG: Lazy<Style> = Lazy::new(|| Style::new().cyan());

pub static LINK: Lazy<Style> = Lazy::new(|| Style::new().blue().underlined());

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());

pub static INFO: Lazy<Style> = Lazy::new(Style::new);
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
