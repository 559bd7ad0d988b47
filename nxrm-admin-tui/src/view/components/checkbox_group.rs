//! Labelled group of checkboxes
//!
//! Stateless: the caller passes the checked state and focus of every item
//! and turns key presses into machine events itself.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::view::theme::{colors, Styles};

/// One checkbox, optionally followed by the value it enables
#[derive(Debug, Clone, Default)]
pub struct CheckboxItem<'a> {
    pub label: &'a str,
    pub checked: bool,
    pub focused: bool,
    /// Input bound to the checkbox, shown after the label
    pub value: Option<&'a str>,
    /// Inline validation error, shown under the item
    pub error: Option<&'a str>,
    /// Shown muted; the caller ignores toggles
    pub disabled: bool,
    /// Info line under the item
    pub note: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckboxGroup<'a> {
    label: &'a str,
    items: Vec<CheckboxItem<'a>>,
}

impl<'a> CheckboxGroup<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: CheckboxItem<'a>) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows needed to render the group
    pub fn height(&self) -> u16 {
        let extra = self
            .items
            .iter()
            .map(|item| usize::from(item.error.is_some()) + usize::from(item.note.is_some()))
            .sum::<usize>();
        u16::try_from(1 + self.items.len() + extra).unwrap_or(u16::MAX)
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let c = colors();
        let mut lines = vec![Line::styled(self.label, Styles::title())];

        for item in &self.items {
            let marker = if item.focused { "▶ " } else { "  " };
            let checkbox = if item.checked { "[x] " } else { "[ ] " };
            let label_style = match (item.focused, item.disabled) {
                (true, false) => Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
                (true, true) => Styles::muted().add_modifier(Modifier::BOLD),
                (false, true) => Styles::muted(),
                (false, false) => Style::default().fg(c.fg),
            };

            let mut spans = vec![
                Span::styled(marker, label_style),
                Span::styled(checkbox, label_style),
                Span::styled(item.label, label_style),
            ];
            if let Some(value) = item.value {
                let value_style = if item.checked && !item.disabled {
                    Styles::text()
                } else {
                    Styles::muted()
                };
                spans.push(Span::styled(": ", Styles::muted()));
                spans.push(Span::styled(value, value_style));
                if item.focused && item.checked && !item.disabled {
                    spans.push(Span::styled("▏", Style::default().fg(c.highlight)));
                }
            }
            lines.push(Line::from(spans));

            if let Some(error) = item.error {
                lines.push(Line::styled(format!("      {error}"), Styles::error()));
            }
            if let Some(note) = item.note {
                lines.push(Line::styled(format!("      {note}"), Styles::muted()));
            }
        }
        lines
    }
}

impl Widget for CheckboxGroup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_label_items_and_errors() {
        let group = CheckboxGroup::new("Criteria")
            .item(CheckboxItem {
                label: "Component Age",
                checked: true,
                value: Some("30"),
                ..CheckboxItem::default()
            })
            .item(CheckboxItem {
                label: "Asset Name Matcher",
                focused: true,
                value: Some(""),
                error: Some("This field is required"),
                ..CheckboxItem::default()
            });
        assert_eq!(group.height(), 4);

        let area = Rect::new(0, 0, 40, group.height());
        let mut buf = Buffer::empty(area);
        group.render(area, &mut buf);

        assert_eq!(row(&buf, 0), "Criteria");
        assert_eq!(row(&buf, 1), "  [x] Component Age: 30");
        assert_eq!(row(&buf, 2), "▶ [ ] Asset Name Matcher:");
        assert_eq!(row(&buf, 3), "      This field is required");
    }

    #[test]
    fn disabled_item_shows_its_note() {
        let group = CheckboxGroup::new("Exclusion Criteria").item(CheckboxItem {
            label: "Retain N Versions",
            value: Some("5"),
            disabled: true,
            note: Some("Available for release versions only"),
            ..CheckboxItem::default()
        });
        assert_eq!(group.height(), 3);

        let area = Rect::new(0, 0, 48, group.height());
        let mut buf = Buffer::empty(area);
        group.render(area, &mut buf);

        assert_eq!(row(&buf, 1), "  [ ] Retain N Versions: 5");
        assert_eq!(row(&buf, 2), "      Available for release versions only");
        assert_eq!(Some(buf[(6, 1)].fg), Styles::muted().fg);
    }

    #[test]
    fn height_saturates_on_huge_groups() {
        let group = (0..u16::MAX).fold(CheckboxGroup::new("Many"), |group, _| {
            group.item(CheckboxItem {
                error: Some("invalid"),
                ..CheckboxItem::default()
            })
        });
        assert_eq!(group.height(), u16::MAX);
    }

    #[test]
    fn empty_group_is_just_the_label() {
        let group = CheckboxGroup::new("Criteria");
        assert!(group.is_empty());
        assert_eq!(group.height(), 1);
    }
}
