mod bird;
mod collision;
mod pipes;
mod world;

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, Command, GameAction},
    components::multiline::MultiLine,
    config::{GameConfig, PageKeyBindings},
    constants::game,
};

pub use world::{Phase, World};

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    world: World,
    bird_layers: Vec<(Vec<String>, Option<Color>)>,
}

impl GamePage {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let world = match seed {
            Some(seed) => World::seeded(config, seed),
            None => World::new(config),
        };
        let bird_layers = game::BIRD_TEXTS
            .iter()
            .zip(game::BIRD_COLORS.iter())
            .map(|(text, color)| (sprite_lines(text), *color))
            .collect();
        GamePage { action_tx: None, keymap: PageKeyBindings::default(), world, bird_layers }
    }

    /// Renders a block of text lines at a cell position that may stick out of
    /// the canvas on any side; only the visible part is drawn.
    fn draw_sprite(
        &self,
        f: &mut Frame<'_>,
        canvas: Rect,
        lines: &[String],
        color: Option<Color>,
        x: i16,
        y: i16,
        transparent: bool,
    ) {
        let canvas_width = canvas.width as i16;
        let canvas_height = canvas.height as i16;
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i16;
        let height = lines.len() as i16;

        let begin_col = (-x).max(0);
        let end_col = width.min(canvas_width - x);
        let begin_row = (-y).max(0);
        let end_row = height.min(canvas_height - y);
        if begin_col >= end_col || begin_row >= end_row {
            return;
        }

        let clipped: Vec<String> = lines[begin_row as usize..end_row as usize]
            .iter()
            .map(|line| line.chars().skip(begin_col as usize).take((end_col - begin_col) as usize).collect())
            .collect();
        let area = Rect {
            x: canvas.x + (x + begin_col) as u16,
            y: canvas.y + (y + begin_row) as u16,
            width: (end_col - begin_col) as u16,
            height: (end_row - begin_row) as u16,
        };

        let sprite = MultiLine::new(clipped).ignore_whitespace(transparent);
        match color {
            Some(color) => f.render_widget(sprite.style(Style::default().fg(color)), area),
            None => f.render_widget(sprite, area),
        }
    }

    fn draw_bird(&self, f: &mut Frame<'_>, canvas: Rect, scale_x: f32, scale_y: f32) {
        let bird = self.world.bird();
        let x = (bird.x() * scale_x).round() as i16;
        let y = (bird.y() * scale_y).round() as i16;

        for (index, (lines, color)) in self.bird_layers.iter().enumerate() {
            self.draw_sprite(f, canvas, lines, *color, x, y, index > 0);
        }
    }

    fn draw_pipes(&self, f: &mut Frame<'_>, canvas: Rect, scale_x: f32, scale_y: f32) {
        let config = self.world.config();
        for pipe in self.world.pipes() {
            let left = (pipe.x * scale_x).round() as i16;
            let width = ((pipe.x + config.pipe_width) * scale_x).round() as i16 - left;
            if width <= 0 {
                continue;
            }

            let top_rows = (pipe.top_height * scale_y).round() as i16;
            let top = pipe_strings(width as u16, top_rows.max(0) as u16, false);
            self.draw_sprite(f, canvas, &top, game::PIPE_COLOR, left, 0, false);

            let bottom_row = (pipe.bottom_y * scale_y).round() as i16;
            let bottom_rows = canvas.height as i16 - bottom_row;
            let bottom = pipe_strings(width as u16, bottom_rows.max(0) as u16, true);
            self.draw_sprite(f, canvas, &bottom, game::PIPE_COLOR, left, bottom_row, false);
        }
    }

    fn draw_score(&self, f: &mut Frame<'_>, canvas: Rect) {
        let [line] = Layout::vertical([Constraint::Length(1)]).areas(canvas);
        let score = Paragraph::new(format!("Score: {}", self.world.score()))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(score, line);
    }

    fn draw_overlay(&self, f: &mut Frame<'_>, canvas: Rect, lines: Vec<Line>) {
        let [overlay] =
            Layout::vertical([Constraint::Length(lines.len() as u16)]).flex(layout::Flex::Center).areas(canvas);
        let paragraph =
            Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Center);
        f.render_widget(paragraph, overlay);
    }
}

fn sprite_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(|line| line.to_string()).collect();
    if lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn pipe_strings(width: u16, height: u16, edge_at_top: bool) -> Vec<String> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let body: String = std::iter::repeat(game::PIPE_BODY).take(width as usize).collect();
    let edge: String = std::iter::repeat(game::PIPE_EDGE).take(width as usize).collect();

    (0..height)
        .map(|row| {
            let gap_facing = if edge_at_top { row == 0 } else { row == height - 1 };
            if gap_facing { edge.clone() } else { body.clone() }
        })
        .collect()
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // A click is the same activate signal as a key press.
        match mouse.kind {
            MouseEventKind::Down(_) => Ok(Some(act!(Command::Game(GameAction::Activate)))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => self.world.tick(),
            Command::StartGame => self.world.restart(),
            Command::Game(GameAction::Activate) => self.world.activate(),
            Command::Game(GameAction::Back) => return Ok(Some(act!(Command::ShowTitle))),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let config = self.world.config();
        let scale_x = area.width as f32 / config.screen_width;
        let scale_y = area.height as f32 / config.screen_height;

        self.draw_pipes(f, area, scale_x, scale_y);
        self.draw_bird(f, area, scale_x, scale_y);

        match self.world.phase() {
            Phase::NotStarted => {
                self.draw_overlay(f, area, vec![Line::from("Press Space"), Line::from("to start")]);
            },
            Phase::Running => {
                self.draw_score(f, area);
            },
            Phase::Over => {
                self.draw_score(f, area);
                self.draw_overlay(
                    f,
                    area,
                    vec![
                        Line::from("Game Over!").style(Style::default().fg(Color::Red)),
                        Line::from(""),
                        Line::from(format!("Score: {}", self.world.score())),
                        Line::from(""),
                        Line::from("Press Space"),
                        Line::from("to restart"),
                    ],
                );
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    use super::*;

    fn page() -> GamePage {
        GamePage::new(GameConfig::default(), Some(42))
    }

    #[test]
    fn test_tick_and_activate_routing() -> Result<()> {
        let mut page = page();
        assert_eq!(page.world.phase(), Phase::NotStarted);

        page.update(act!(Command::Game(GameAction::Activate)))?;
        assert_eq!(page.world.phase(), Phase::Running);

        page.update(act!(Command::Tick))?;
        assert_eq!(page.world.pipes().len(), 1);

        // Render actions never advance the simulation.
        page.update(act!(Command::Render))?;
        assert_eq!(page.world.pipes().len(), 1);

        Ok(())
    }

    #[test]
    fn test_back_returns_to_title() -> Result<()> {
        let mut page = page();
        let action = page.update(act!(Command::Game(GameAction::Back)))?;
        assert_eq!(action, Some(act!(Command::ShowTitle)));
        Ok(())
    }

    #[test]
    fn test_start_game_hands_out_fresh_world() -> Result<()> {
        let mut page = page();
        page.update(act!(Command::Game(GameAction::Activate)))?;
        for _ in 0..20 {
            page.update(act!(Command::Tick))?;
        }

        page.update(act!(Command::StartGame))?;
        assert_eq!(page.world.phase(), Phase::NotStarted);
        assert_eq!(page.world.score(), 0);
        assert!(page.world.pipes().is_empty());
        Ok(())
    }

    #[test]
    fn test_draw_all_phases() -> Result<()> {
        let mut page = page();
        let mut terminal = ratatui::Terminal::new(TestBackend::new(80, 40))?;

        terminal.draw(|f| {
            let area = f.area();
            page.draw(f, area).unwrap();
        })?;

        page.update(act!(Command::Game(GameAction::Activate)))?;
        for _ in 0..200 {
            page.update(act!(Command::Tick))?;
        }
        terminal.draw(|f| {
            let area = f.area();
            page.draw(f, area).unwrap();
        })?;

        while page.world.phase() != Phase::Over {
            page.update(act!(Command::Tick))?;
        }
        terminal.draw(|f| {
            let area = f.area();
            page.draw(f, area).unwrap();
        })?;

        Ok(())
    }
}
