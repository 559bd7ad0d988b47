//! LDAP server list with a detail pane for the selected server

use nxrm_admin_core::types::{matching_template, AuthScheme, GroupType, LdapServer};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::App;
use crate::view::components::table::{self, Column};
use crate::view::theme::Styles;

const COLUMNS: &[Column] = &[
    Column { title: "#", width: 3 },
    Column { title: "Name", width: 20 },
    Column { title: "URL", width: 32 },
];

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    table::render_list(&app.ldap_servers, frame, columns[0], COLUMNS, |server| {
        vec![server.order.to_string(), server.name.clone(), server.url()]
    });

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::LEFT)
        .border_style(Styles::border(false));
    let lines = app
        .ldap_servers
        .machine()
        .and_then(|machine| machine.selected())
        .map_or_else(|| vec![Line::styled("  No server selected", Styles::muted())], detail_lines);
    frame.render_widget(Paragraph::new(lines).block(block), columns[1]);
}

fn detail_lines(server: &LdapServer) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Connection"),
        entry("URL", server.url()),
        entry("Trust store", yes_no(server.use_trust_store)),
        entry("Authentication", auth_label(server.auth_scheme)),
    ];
    if let Some(ref username) = server.auth_username {
        lines.push(entry("Bind user", username.clone()));
    }
    if let Some(ref realm) = server.auth_realm {
        lines.push(entry("Realm", realm.clone()));
    }
    lines.push(entry(
        "Timeouts",
        format!(
            "{}s connect, {}s retry, {} incidents",
            server.connection_timeout_seconds,
            server.connection_retry_delay_seconds,
            server.max_incidents_count
        ),
    ));

    lines.push(Line::from(""));
    lines.push(section("Users"));
    lines.push(entry(
        "Template",
        matching_template(server).map_or_else(|| "custom".to_string(), |t| t.name.to_string()),
    ));
    lines.push(entry("Base DN", optional(&server.user_base_dn)));
    lines.push(entry("Subtree", yes_no(server.user_subtree)));
    lines.push(entry("Object class", optional(&server.user_object_class)));
    lines.push(entry("ID attribute", optional(&server.user_id_attribute)));
    lines.push(entry("Email attribute", optional(&server.user_email_address_attribute)));

    lines.push(Line::from(""));
    lines.push(section("Groups"));
    if server.ldap_groups_as_roles {
        match server.group_type {
            GroupType::Static => {
                lines.push(entry("Type", "static".to_string()));
                lines.push(entry("Base DN", optional(&server.group_base_dn)));
                lines.push(entry("Object class", optional(&server.group_object_class)));
                lines.push(entry("Member attribute", optional(&server.group_member_attribute)));
            }
            GroupType::Dynamic => {
                lines.push(entry("Type", "dynamic".to_string()));
                lines.push(entry("Member of", optional(&server.user_member_of_attribute)));
            }
        }
    } else {
        lines.push(Line::styled("  Not mapped to roles", Styles::muted()));
    }
    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::styled(format!(" {title}"), Styles::title())
}

fn entry(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<17}"), Styles::muted()),
        Span::styled(value, Styles::text()),
    ])
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

fn auth_label(scheme: AuthScheme) -> String {
    match scheme {
        AuthScheme::None => "anonymous",
        AuthScheme::Simple => "simple",
        AuthScheme::DigestMd5 => "DIGEST-MD5",
        AuthScheme::CramMd5 => "CRAM-MD5",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nxrm_admin_core::types::user_and_group_templates;

    fn entry_value(lines: &[Line<'_>], label: &str) -> Option<String> {
        lines.iter().find_map(|line| match line.spans.as_slice() {
            [name, value] if name.content.trim() == label => Some(value.content.to_string()),
            _ => None,
        })
    }

    #[test]
    fn details_name_the_matching_template() {
        let mut server = LdapServer::default();
        let templates = user_and_group_templates();
        let posix = templates
            .iter()
            .find(|t| t.name == "Posix with Static Groups")
            .unwrap();
        posix.apply_to(&mut server);
        assert_eq!(
            entry_value(&detail_lines(&server), "Template").as_deref(),
            Some("Posix with Static Groups")
        );

        server.user_ldap_filter = Some("(employeeType=staff)".to_string());
        assert_eq!(entry_value(&detail_lines(&server), "Template").as_deref(), Some("custom"));
    }
}
