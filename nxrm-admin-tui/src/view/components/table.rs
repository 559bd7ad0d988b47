//! Paged list table shared by the list pages

use nxrm_admin_core::machine::{ListPhase, Listable, PageInfo};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::ListPageState;
use crate::view::theme::{colors, Styles};

/// Column header and display width
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

/// Pad or truncate `text` to exactly `width` terminal cells
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{text}{}", " ".repeat(padding));
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// "Page 1 of 3 · 27 items"
pub fn page_summary(info: PageInfo) -> String {
    let noun = if info.total == 1 { "item" } else { "items" };
    format!(
        "Page {} of {} · {} {noun}",
        info.offset_page + 1,
        info.pages,
        info.total
    )
}

/// Render filter line, header, rows and footer of a list page
pub fn render_list<T: Listable>(
    list: &ListPageState<T>,
    frame: &mut Frame,
    area: Rect,
    columns: &[Column],
    cells: impl Fn(&T) -> Vec<String>,
) {
    let Some(machine) = list.machine() else {
        frame.render_widget(Paragraph::new(Line::styled("  Not loaded", Styles::muted())), area);
        return;
    };

    match machine.phase() {
        ListPhase::Loading if machine.items().is_empty() => {
            frame.render_widget(Paragraph::new(Line::styled("  Loading…", Styles::muted())), area);
            return;
        }
        ListPhase::Error => {
            let lines = vec![
                Line::from(""),
                Line::styled(
                    format!("  {}", machine.load_error().unwrap_or("Loading failed")),
                    Styles::error(),
                ),
                Line::from(""),
                Line::styled("  Press Ctrl+r to retry", Styles::muted()),
            ];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }
        _ => {}
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Filter
    let c = colors();
    let filter_style = if list.filtering {
        Style::default().fg(c.highlight)
    } else {
        Styles::muted()
    };
    let cursor = if list.filtering { "▏" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" / ", filter_style),
            Span::styled(format!("{}{cursor}", machine.filter()), Styles::text()),
        ])),
        layout[0],
    );

    // Header
    let header: String = columns
        .iter()
        .map(|column| fit(column.title, column.width))
        .collect::<Vec<_>>()
        .join(" ");
    frame.render_widget(
        Paragraph::new(Line::styled(format!("  {header}"), Styles::title())),
        layout[1],
    );

    // Rows
    let rows = machine.page_rows();
    let lines: Vec<Line> = if rows.is_empty() {
        let text = if machine.filter().is_empty() {
            "  Nothing here yet"
        } else {
            "  No matches for the filter"
        };
        vec![Line::styled(text, Styles::muted())]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, item)| {
                let text: String = columns
                    .iter()
                    .zip(cells(item))
                    .map(|(column, cell)| fit(&cell, column.width))
                    .collect::<Vec<_>>()
                    .join(" ");
                let deleting = machine.deleting() == Some(item.id());
                let style = if i == machine.cursor() {
                    Styles::selected()
                } else if deleting {
                    Styles::muted()
                } else {
                    Styles::text()
                };
                let marker = if i == machine.cursor() { "▶ " } else { "  " };
                Line::styled(format!("{marker}{text}"), style)
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), layout[2]);

    // Footer
    let mut footer = vec![Span::styled(format!(" {}", page_summary(machine.page_info())), Styles::muted())];
    if machine.is_loading() {
        footer.push(Span::styled("  · refreshing…", Styles::muted()));
    }
    if let Some(id) = machine.deleting() {
        footer.push(Span::styled(format!("  · deleting {id}…"), Styles::muted()));
    }
    if let Some(error) = machine.action_error() {
        footer.push(Span::styled(format!("  · {error}"), Styles::error()));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), layout[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_truncates_by_display_width() {
        assert_eq!(fit("npm", 5), "npm  ");
        assert_eq!(fit("maven-releases", 8), "maven-r…");
        assert_eq!(fit("角色管理", 5), "角色…");
        assert_eq!(fit("角色管理", 6).width(), 6);
    }

    #[test]
    fn page_summary_counts_from_one() {
        assert_eq!(page_summary(PageInfo::new(0, 1)), "Page 1 of 1 · 1 item");
        assert_eq!(page_summary(PageInfo::new(1, 13)), "Page 2 of 2 · 13 items");
    }
}
