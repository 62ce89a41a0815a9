//! HTML rendering of the todo list page.
//!
//! The page is small enough to write out directly. Every interpolated value
//! goes through [`escape_html`]: todo text and the message of the day are
//! untrusted.

use crate::state::PageSettings;
use std::fmt::{self, Write};
use todo_gen_core::ListedTodo;

const STYLE: &str = "
        table {
            width: 100%;
            border-collapse: collapse;
        }
        th, td {
            border: 1px solid #dddddd;
            text-align: left;
            padding: 8px;
        }
        th {
            background-color: #f2f2f2;
        }
        .actions {
            width: 1%;
            white-space: nowrap;
        }";

/// Escape text for use in element content and quoted attribute values.
///
/// # Examples
///
/// ```
/// use todo_gen_web::render::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&#34;Tom&#34; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the list page.
///
/// # Errors
///
/// Returns [`fmt::Error`] if writing to the page buffer fails.
pub fn render_index(page: &PageSettings, todos: &[ListedTodo]) -> Result<String, fmt::Error> {
    let mut html = String::with_capacity(2048 + todos.len() * 512);
    let base = &page.base_path;

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(html, "<head>")?;
    writeln!(html, "    <meta charset=\"utf-8\">")?;
    writeln!(html, "    <title>Todo List</title>")?;
    writeln!(html, "    <style>{STYLE}\n    </style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "    <h1>Todo List</h1>")?;

    if let Some(motd) = &page.motd {
        writeln!(
            html,
            "    <p><b>Message of the day:</b> {}</p>",
            escape_html(motd)
        )?;
    }

    writeln!(
        html,
        "    <form action=\"{}\" method=\"post\" style=\"display:inline-block; margin-bottom: 20px;\">",
        escape_html(&base.join("add"))
    )?;
    writeln!(html, "        <input type=\"text\" name=\"text\" size=\"50\">")?;
    writeln!(html, "        <input type=\"submit\" value=\"Add\">")?;
    writeln!(html, "    </form>")?;
    writeln!(
        html,
        "    <form action=\"{}\" method=\"post\" style=\"display:inline-block;\">",
        escape_html(&base.join("generate"))
    )?;
    writeln!(html, "        <input type=\"submit\" value=\"Generate\">")?;
    writeln!(html, "    </form>")?;

    writeln!(html, "    <table>")?;
    writeln!(html, "        <thead>")?;
    writeln!(html, "            <tr>")?;
    writeln!(html, "                <th>Timestamp</th>")?;
    writeln!(html, "                <th>Todo</th>")?;
    writeln!(html, "                <th class=\"actions\">Actions</th>")?;
    writeln!(html, "            </tr>")?;
    writeln!(html, "        </thead>")?;
    writeln!(html, "        <tbody>")?;

    let delete_action = escape_html(&base.join("delete"));
    for listed in todos {
        write_row(&mut html, &delete_action, listed)?;
    }

    writeln!(html, "        </tbody>")?;
    writeln!(html, "    </table>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}

fn write_row(html: &mut String, delete_action: &str, listed: &ListedTodo) -> fmt::Result {
    let todo = &listed.todo;

    writeln!(html, "            <tr>")?;
    writeln!(
        html,
        "                <td>{}</td>",
        escape_html(&listed.created_at_formatted)
    )?;
    writeln!(html, "                <td>{}</td>", escape_html(&todo.text))?;
    writeln!(html, "                <td class=\"actions\">")?;
    writeln!(
        html,
        "                    <form action=\"{delete_action}\" method=\"post\" style=\"display:inline;\">"
    )?;
    writeln!(
        html,
        "                        <input type=\"hidden\" name=\"id\" value=\"{}\">",
        escape_html(todo.id.as_str())
    )?;
    writeln!(
        html,
        "                        <input type=\"hidden\" name=\"createdAtEpoch\" value=\"{}\">",
        todo.created_at_epoch
    )?;
    writeln!(
        html,
        "                        <input type=\"submit\" value=\"Done\">"
    )?;
    writeln!(html, "                    </form>")?;
    writeln!(html, "                </td>")?;
    writeln!(html, "            </tr>")
}
