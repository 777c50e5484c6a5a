//! Plain-text presentation of the shell and its pages.

use crate::auth::AuthWidget;
use crate::case::humanize;
use crate::model::Session;
use crate::routes::{NavItem, Page, APP_TITLE};
use crate::screen::{value_text, Modal, ResourceScreen, RowAction, Severity};
use serde_json::Value;
use std::fmt::Write;

pub fn header(auth: &AuthWidget, nav: &[NavItem]) -> String {
    let mut out = String::new();
    let action = auth.action();
    match auth.greeting() {
        Some(greeting) => {
            let _ = writeln!(out, "{}  |  {}  [{}: {}]", APP_TITLE, greeting, action.label(), action.url());
        }
        None => {
            let _ = writeln!(out, "{}  [{}: {}]", APP_TITLE, action.label(), action.url());
        }
    }
    let links: Vec<String> = nav
        .iter()
        .map(|n| if n.active { format!("*{}*", n.label) } else { n.label.clone() })
        .collect();
    let _ = writeln!(out, "{}", links.join(" | "));
    out
}

pub fn page(page: &Page, session: Option<&Session>) -> String {
    match page {
        Page::Dashboard => dashboard(),
        Page::Resource(screen) => screen_view(screen, session),
    }
}

pub fn dashboard() -> String {
    format!(
        "Dashboard\n\nThis is the Dashboard page. Welcome to the {} where you can manage all your reservations for riding activities.\n",
        APP_TITLE
    )
}

/// Banner, notification, add-form fields, filtered table and the open modal.
pub fn screen_view(screen: &ResourceScreen, session: Option<&Session>) -> String {
    let resource = screen.resource();
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", humanize(&resource.path_segment));

    if let Some(error) = screen.error() {
        let _ = writeln!(out, "[error] {}", error);
    }
    if let Some(n) = screen.notification() {
        let tag = match n.severity {
            Severity::Success => "ok",
            Severity::Error => "failed",
        };
        let _ = writeln!(out, "[{}] {}", tag, n.message);
    }

    let form_fields: Vec<String> = resource.fields.iter().map(|f| f.display_label()).collect();
    let _ = writeln!(out, "Add: {}", form_fields.join(", "));
    if !screen.search().is_empty() {
        let _ = writeln!(out, "Search: {}", screen.search());
    }
    out.push('\n');

    let actions = screen.row_actions(session);
    let mut headers: Vec<String> = vec!["ID".to_string()];
    headers.extend(resource.fields.iter().map(|f| f.display_label()));
    if !actions.is_empty() {
        headers.push("Actions".to_string());
    }
    let action_text = actions.iter().map(|a| action_label(*a)).collect::<Vec<_>>().join(" ");
    let rows: Vec<Vec<String>> = screen
        .visible_rows()
        .into_iter()
        .map(|row| {
            let mut cells = vec![screen.row_id(row).unwrap_or_default()];
            cells.extend(resource.fields.iter().map(|f| screen.cell_text(row, &f.name)));
            if !actions.is_empty() {
                cells.push(action_text.clone());
            }
            cells
        })
        .collect();
    out.push_str(&table(&headers, &rows));

    match screen.modal() {
        Some(Modal::Edit(edit)) => {
            let _ = writeln!(out, "\nEdit {} {}", resource.name, edit.id);
            for f in &resource.fields {
                let _ = writeln!(out, "  {}: {}", f.display_label(), edit.form.get(&f.name));
            }
        }
        Some(Modal::Details(details)) => {
            let _ = writeln!(out, "\n{} Details", resource.name);
            out.push_str(&details_view(&resource.name, details));
        }
        None => {}
    }
    out
}

fn action_label(action: RowAction) -> &'static str {
    match action {
        RowAction::Details => "details",
        RowAction::Edit => "edit",
        RowAction::Delete => "delete",
    }
}

/// Aggregate view: the record's own scalars first, then one section per nested object.
pub fn details_view(title: &str, details: &Value) -> String {
    let mut out = String::new();
    write_section(&mut out, title, details);
    out
}

fn write_section(out: &mut String, title: &str, value: &Value) {
    let Value::Object(obj) = value else {
        let _ = writeln!(out, "{}: {}", title, value_text(value));
        return;
    };
    let _ = writeln!(out, "-- {} --", title);
    for (key, v) in obj {
        if !v.is_object() {
            let _ = writeln!(out, "{}: {}", humanize(key), value_text(v));
        }
    }
    for (key, v) in obj {
        if v.is_object() {
            let section = humanize(key.trim_end_matches("Details"));
            write_section(out, &section, v);
        }
    }
}

/// Left-aligned columns sized to their widest cell.
pub fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule));
    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    for row in rows {
        let _ = writeln!(out, "{}", line(row));
    }
    out
}
