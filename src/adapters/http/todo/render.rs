//! HTML rendering of to-do items for SSE payloads.

use chrono::Local;

use crate::domain::Item;
use crate::live::ItemRenderer;

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders an item as the single-line `<li>` fragment the web client
/// swaps into its list.
///
/// The item text is escaped here, immediately before embedding, and
/// newlines become spaces to keep the fragment legal inside an SSE
/// `data:` field.
pub struct HtmlItemRenderer;

impl ItemRenderer for HtmlItemRenderer {
    fn render(&self, item: &Item) -> String {
        let text = escape_html(&item.text)
            .replace('\n', " ")
            .replace('\r', " ");
        let time = Local::now().format("%H:%M:%S");
        format!(
            "<li id=\"todo-{id}\" class=\"message-item\">\
             <div class=\"message-content\">{text}\
             <div class=\"message-extra\">\
             <div class=\"message-time\"><i class=\"far fa-clock\"></i> {time}</div>\
             </div></div>\
             <div class=\"message-actions\">\
             <button class=\"delete-btn\" onclick=\"handleDelete({id})\">\
             <i class=\"fas fa-trash-alt\"></i></button>\
             </div></li>",
            id = item.id,
            text = text,
            time = time,
        )
    }
}
