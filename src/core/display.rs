//! Text helpers shared by the CLI and the GUI.

use scraper::{Html, Node};
use time::{Date, macros::format_description};
use uuid::Uuid;

use crate::models::{Color, Course};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// "Today", "Tomorrow", "in 3 days", "Yesterday", "5 days ago".
pub fn relative_due_label(due: Date, today: Date) -> String {
    match (due - today).whole_days() {
        d if d < -1 => format!("{} days ago", -d),
        -1 => "Yesterday".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("in {} days", d),
    }
}

/// "March 4, 2025".
pub fn long_date(date: Date) -> String {
    let format = format_description!("[month repr:long] [day padding:none], [year]");
    date.format(&format).unwrap_or_else(|_| date.to_string())
}

/// "Mon 03/04".
pub fn short_day(date: Date) -> String {
    let format = format_description!("[weekday repr:short] [month]/[day]");
    date.format(&format).unwrap_or_else(|_| date.to_string())
}

pub fn course_name(courses: &[Course], id: Uuid) -> &str {
    courses
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

/// Text color readable on top of `background`.
pub fn contrasting_text(background: Color) -> Color {
    if background.is_light() {
        Color::rgb(0x1f, 0x29, 0x37)
    } else {
        Color::rgb(0xff, 0xff, 0xff)
    }
}

const BLOCK_TAGS: [&str; 12] = [
    "br", "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "blockquote", "pre",
];

fn is_block(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| BLOCK_TAGS.contains(&el.name()))
}

/// Render description markup as plain text: tags dropped, a line break at
/// every block boundary, entities decoded.
pub fn plain_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut out = String::with_capacity(markup.len());

    for node in fragment.root_element().descendants() {
        let starts_block = is_block(node.value())
            || node.prev_sibling().is_some_and(|prev| is_block(prev.value()));
        if starts_block && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        if let Node::Text(text) = node.value() {
            out.push_str(text);
        }
    }

    out.replace('\u{a0}', " ")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
