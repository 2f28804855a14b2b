use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::config::{key_event_to_string, PageKeyBindings};

/// Overlay listing the active keybindings, one bordered table per group
/// (system-wide bindings plus the active page's).
#[derive(Debug)]
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .map(|(event, action)| (key_event_to_string(&event), action.command.string()))
                    .collect();
                keybindings.sort_by_key(|(key, _)| key.clone());
                (group_name, keybindings)
            })
            .collect();

        Self { keybinding_groups: groups, column_spacing: 5, margin_vertical: 1, margin_horizontal: 2 }
    }

    fn render_group(
        &self,
        area: Rect,
        buf: &mut Buffer,
        group_name: &str,
        keybindings: &[(String, String)],
        key_length: u16,
        val_length: u16,
    ) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();
        let widths = [Constraint::Length(key_length), Constraint::Min(val_length)];

        let table = Table::new(rows, widths)
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let key_length = self
            .keybinding_groups
            .iter()
            .map(|(_, keybindings)| keybindings.iter().map(|(key, _)| key.len()).max().unwrap_or(0))
            .max()
            .unwrap_or(0) as u16;
        let val_length = self
            .keybinding_groups
            .iter()
            .map(|(_, keybindings)| keybindings.iter().map(|(_, val)| val.len()).max().unwrap_or(0))
            .max()
            .unwrap_or(0) as u16;

        // column spacing + margins + border
        let width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        let heights: Vec<Constraint> = self
            .keybinding_groups
            .iter()
            // rows + margins + header + border
            .map(|(_, keybindings)| Constraint::Length(keybindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2))
            .collect();

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for (index, (group_name, keybindings)) in self.keybinding_groups.iter().enumerate() {
            self.render_group(areas[index], buf, group_name, keybindings, key_length, val_length);
        }
    }
}
