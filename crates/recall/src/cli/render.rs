//! # Rendering Module
//!
//! Turns `CmdResult` data into terminal text. Every public `render_*` function
//! has an `_internal` twin taking `use_color: Option<bool>`: `None` lets
//! `console` detect the terminal, `Some(false)` forces plain text (tests).
//!
//! Layout (width, truncation, padding) is computed with `unicode-width` so
//! names with wide characters still line up.

use super::styles;
use chrono::{DateTime, Utc};
use console::Style;
use recallapp::commands::{CmdMessage, DisplayRecord, Facets, MessageLevel};
use recallapp::config::SERVICE_ACCOUNT_EMAIL;
use recallapp::links::{doc_url, folder_url};
use recallapp::model::{parse_timestamp, RecordKind};
use recallapp::settings::Settings;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const INDEX_WIDTH: usize = 5;
const CARD_INDENT: &str = "       ";

fn paint(style: &Style, text: &str, use_color: Option<bool>) -> String {
    match use_color {
        Some(color) => style.clone().force_styling(color).apply_to(text).to_string(),
        None => style.apply_to(text).to_string(),
    }
}

/// View mode: one card per record.
pub fn render_cards(records: &[DisplayRecord], empty_message: &str) -> String {
    render_cards_internal(records, empty_message, None)
}

fn render_cards_internal(
    records: &[DisplayRecord],
    empty_message: &str,
    use_color: Option<bool>,
) -> String {
    if records.is_empty() {
        return format!("{}\n", empty_message);
    }

    let mut out = String::new();
    for (i, dr) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_card(dr, use_color));
    }
    out
}

fn render_card(dr: &DisplayRecord, use_color: Option<bool>) -> String {
    let record = &dr.record;
    let index = format!("{:>width$}", format!("{}.", dr.index), width = INDEX_WIDTH);
    let time = updated_ago(record.last_updated());

    let name_width = LINE_WIDTH - INDEX_WIDTH - 2 - TIME_WIDTH;
    let name = truncate_to_width(record.name(), name_width);
    let gap = name_width.saturating_sub(name.width());

    let mut out = format!(
        "{} {} {}{}\n",
        paint(&styles::INDEX, &index, use_color),
        paint(&styles::TITLE, &name, use_color),
        " ".repeat(gap),
        paint(&styles::TIME, &time, use_color),
    );

    let mut kind_line = vec![record.kind().label().to_string()];
    kind_line.extend(
        record
            .details()
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(_, v)| v.to_string()),
    );
    out.push_str(&format!(
        "{}{}\n",
        CARD_INDENT,
        paint(&styles::MUTED, &kind_line.join(" · "), use_color)
    ));

    if !record.brief_description().is_empty() {
        out.push_str(&format!("{}{}\n", CARD_INDENT, record.brief_description()));
    }

    if !record.tags().is_empty() {
        let tags: Vec<String> = record
            .tags()
            .iter()
            .map(|t| paint(&styles::TAG, &format!("#{}", t), use_color))
            .collect();
        out.push_str(&format!("{}{}\n", CARD_INDENT, tags.join(" ")));
    }

    if !record.folder_id().is_empty() {
        out.push_str(&link_line("folder", &folder_url(record.folder_id()), use_color));
    }
    if !record.readme_doc_id().is_empty() {
        out.push_str(&link_line("readme", &doc_url(record.readme_doc_id()), use_color));
    }
    out
}

fn link_line(label: &str, url: &str, use_color: Option<bool>) -> String {
    format!(
        "{}{} {}\n",
        CARD_INDENT,
        paint(&styles::MUTED, &format!("{}:", label), use_color),
        paint(&styles::LINK, url, use_color)
    )
}

/// Edit mode: a table of one sheet, with the columns of its kind.
pub fn render_table(kind: RecordKind, records: &[DisplayRecord]) -> String {
    render_table_internal(kind, records, None)
}

fn render_table_internal(
    kind: RecordKind,
    records: &[DisplayRecord],
    use_color: Option<bool>,
) -> String {
    if records.is_empty() {
        return format!("No {}s yet.\n", kind.label().to_lowercase());
    }

    let mut headers = vec!["#", name_header(kind)];
    if kind == RecordKind::Project {
        headers.extend(["Type", "Status"]);
    }
    headers.extend(["Tags", "Updated", "Id"]);

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|dr| {
            let record = &dr.record;
            let mut row = vec![dr.index.to_string(), record.name().to_string()];
            row.extend(record.details().into_iter().map(|(_, v)| v.to_string()));
            row.push(record.tags().to_cell());
            row.push(updated_ago(record.last_updated()).trim().to_string());
            row.push(record.id().to_string());
            row
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].width())
                .chain(std::iter::once(headers[col].width()))
                .max()
                .unwrap_or(0)
                .min(if col + 1 == headers.len() { usize::MAX } else { 32 })
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| paint(&styles::HEADER, &pad_to_width(h, *w), use_color))
        .collect();
    out.push_str(header_cells.join("  ").trim_end());
    out.push('\n');

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, w))| {
                let text = pad_to_width(&truncate_to_width(cell, *w), *w);
                match col {
                    0 => paint(&styles::INDEX, &text, use_color),
                    c if c + 1 == widths.len() => paint(&styles::MUTED, &text, use_color),
                    _ => text,
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn name_header(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Project => "Name",
        RecordKind::Wiki => "Topic",
    }
}

pub fn render_facets(facets: &Facets) -> String {
    render_facets_internal(facets, None)
}

fn render_facets_internal(facets: &Facets, use_color: Option<bool>) -> String {
    let section = |title: &str, values: &[String]| {
        let body = if values.is_empty() {
            paint(&styles::MUTED, "(none)", use_color)
        } else {
            values.join(", ")
        };
        format!("{} {}\n", paint(&styles::HEADER, title, use_color), body)
    };
    let mut out = section("Tags:", &facets.tags);
    out.push_str(&section("Types:", &facets.types));
    out.push_str(&section("Statuses:", &facets.statuses));
    out
}

pub fn render_status(settings: Option<&Settings>, api_url: &str, data_dir: &str) -> String {
    render_status_internal(settings, api_url, data_dir, None)
}

fn render_status_internal(
    settings: Option<&Settings>,
    api_url: &str,
    data_dir: &str,
    use_color: Option<bool>,
) -> String {
    let label = |text: &str| paint(&styles::MUTED, &format!("{:<14}", text), use_color);
    let mut out = String::new();

    match settings {
        Some(s) => {
            out.push_str(&format!("{}{}\n", label("Spreadsheet"), s.spreadsheet_id));
            let validated = parse_timestamp(&s.last_validated)
                .map(|t| format_time_ago(t).trim().to_string())
                .unwrap_or_else(|| s.last_validated.clone());
            out.push_str(&format!("{}{}\n", label("Validated"), validated));
        }
        None => {
            out.push_str(&format!(
                "{}{}\n",
                label("Spreadsheet"),
                paint(&styles::WARNING, "not connected", use_color)
            ));
            out.push_str(&format!(
                "{}share your spreadsheet with {}\n",
                label(""),
                SERVICE_ACCOUNT_EMAIL
            ));
        }
    }
    out.push_str(&format!("{}{}\n", label("Service"), api_url));
    out.push_str(&format!("{}{}\n", label("Data dir"), data_dir));

    for kind in RecordKind::all() {
        out.push_str(&format!(
            "{}{}: {}\n",
            label(if kind == RecordKind::Project { "Sheets" } else { "" }),
            kind.sheet_name(),
            kind.expected_columns().join(", ")
        ));
    }
    out
}

/// Renders command messages with their level's style.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    messages
        .iter()
        .map(|msg| {
            let style: &Style = match msg.level {
                MessageLevel::Info => &styles::INFO,
                MessageLevel::Success => &styles::SUCCESS,
                MessageLevel::Warning => &styles::WARNING,
            };
            format!("{}\n", paint(style, &msg.content, use_color))
        })
        .collect()
}

/// Prints command messages to stdout.
pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn updated_ago(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(t) => format_time_ago(t),
        None => format!("{:>width$}", raw, width = TIME_WIDTH),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let gap = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(gap))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
