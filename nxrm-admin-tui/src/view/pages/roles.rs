//! Role list

use ratatui::{layout::Rect, Frame};

use crate::model::App;
use crate::view::components::table::{self, Column};

const COLUMNS: &[Column] = &[
    Column { title: "Name", width: 24 },
    Column { title: "Source", width: 10 },
    Column { title: "Description", width: 48 },
];

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    table::render_list(&app.roles.list, frame, area, COLUMNS, |role| {
        let name = if role.read_only {
            format!("{} (read-only)", role.name)
        } else {
            role.name.clone()
        };
        vec![name, role.source.clone(), role.description.clone()]
    });
}
