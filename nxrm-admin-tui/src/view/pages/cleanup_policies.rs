//! Cleanup policy list

use ratatui::{layout::Rect, Frame};

use crate::model::App;
use crate::view::components::table::{self, Column};

const COLUMNS: &[Column] = &[
    Column { title: "Name", width: 28 },
    Column { title: "Format", width: 8 },
    Column { title: "In use", width: 6 },
    Column { title: "Criteria", width: 44 },
];

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    table::render_list(&app.cleanup_policies.list, frame, area, COLUMNS, |policy| {
        vec![
            policy.name.clone(),
            policy.format.clone(),
            policy.in_use_count.to_string(),
            policy.criteria_summary(),
        ]
    });
}
