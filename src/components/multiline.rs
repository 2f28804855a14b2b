use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Text, widgets::Widget};

/// Renders a block of text lines row by row, without wrapping. With
/// `ignore_whitespace`, each line's leading whitespace shifts the line right
/// instead of painting blanks, so a sprite layer can sit on top of another
/// without erasing it.
#[derive(Debug, Default)]
pub struct MultiLine<T: ToString> {
    lines: Vec<T>,
    style: Option<Style>,
    ignore_whitespace: bool,
}

impl<T: ToString> MultiLine<T> {
    pub fn new(lines: Vec<T>) -> Self {
        MultiLine { lines, style: None, ignore_whitespace: false }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style: Some(style), ..self }
    }

    pub fn ignore_whitespace(self, ignore_whitespace: bool) -> Self {
        Self { ignore_whitespace, ..self }
    }
}

impl<T: ToString> Widget for MultiLine<T> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (index, line) in self.lines.into_iter().enumerate() {
            let y = area.y + index as u16;
            if y >= area.bottom() {
                break;
            }

            let line = line.to_string();
            let (offset, text) = if self.ignore_whitespace {
                let offset = line.chars().take_while(|c| c.is_whitespace()).count() as u16;
                (offset, line.trim().to_string())
            } else {
                (0, line)
            };

            let width = (text.chars().count() as u16).min(area.width.saturating_sub(offset));
            if width == 0 {
                continue;
            }

            let line_area = Rect { x: area.x + offset, y, width, height: 1 };
            let mut text = Text::from(text);
            if let Some(style) = self.style {
                text = text.style(style);
            }
            text.render(line_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    #[test]
    fn test_renders_lines_in_place() {
        let mut terminal = Terminal::new(TestBackend::new(6, 2)).unwrap();
        terminal
            .draw(|f| {
                let widget = MultiLine::new(vec!["abc", "de"]);
                f.render_widget(widget, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "a");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), "c");
        assert_eq!(buffer.cell((1, 1)).unwrap().symbol(), "e");
    }

    #[test]
    fn test_ignore_whitespace_preserves_underlying_cells() {
        let mut terminal = Terminal::new(TestBackend::new(6, 1)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(MultiLine::new(vec!["xxxxxx"]), f.area());
                f.render_widget(MultiLine::new(vec!["  oo"]).ignore_whitespace(true), f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "x");
        assert_eq!(buffer.cell((1, 0)).unwrap().symbol(), "x");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), "o");
        assert_eq!(buffer.cell((3, 0)).unwrap().symbol(), "o");
        assert_eq!(buffer.cell((4, 0)).unwrap().symbol(), "x");
    }
}
