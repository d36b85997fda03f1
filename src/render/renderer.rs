use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::scene::{Overlay, Scene};
use super::skin::Skin;
use crate::game::CollisionType;
use crate::metrics::SessionStats;

/// Score and border colour right after a meal
const SCORE_POP: Color = Color::Rgb(255, 204, 0);

pub struct Renderer {
    skin: Skin,
}

impl Renderer {
    pub fn new(skin: Skin) -> Self {
        Self { skin }
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene, stats: &SessionStats) {
        let [header, body, footer] = Self::chrome(frame.area());

        frame.render_widget(self.render_stats(scene, stats), header);

        let board = Self::board_area(body, scene.grid_size);
        frame.render_widget(self.render_grid(scene), board);

        if let Some(overlay) = scene.overlay {
            let popup = Self::centered(board, 34, 6);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_overlay(overlay), popup);
        }

        if let Some(text) = &scene.flash {
            let banner = Self::centered(board, text.chars().count() as u16 + 4, 3);
            frame.render_widget(Clear, banner);
            frame.render_widget(self.render_flash(text), banner);
        }

        frame.render_widget(self.render_controls(), footer);
    }

    /// Start screen shown before the first game
    pub fn render_title(&self, frame: &mut Frame) {
        let [_, body, _] = Self::chrome(frame.area());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Rgb(79, 140, 255))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Use Arrow Keys • P/Space = Pause • R = Restart"),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        let area = Self::centered(body, 52, 9);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
            area,
        );
    }

    fn chrome(area: Rect) -> [Rect; 3] {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .areas(area)
    }

    /// Board plus its border, centred in `area` and clipped to it
    fn board_area(area: Rect, grid_size: usize) -> Rect {
        let width = (grid_size * 2 + 2).min(u16::MAX as usize) as u16;
        let height = (grid_size + 2).min(u16::MAX as usize) as u16;
        Self::centered(area, width, height)
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::vertical([Constraint::Length(height.min(area.height))])
            .flex(Flex::Center)
            .areas(column);
        cell
    }

    fn render_grid(&self, scene: &Scene) -> Paragraph<'static> {
        let lines: Vec<Line> = scene
            .rows()
            .enumerate()
            .map(|(y, row)| {
                Line::from(
                    row.iter()
                        .enumerate()
                        .map(|(x, &cell)| self.skin.cell_span(cell, x, y, scene.bg_hue))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(if scene.score_pop {
                    SCORE_POP
                } else {
                    self.skin.border_color()
                }))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, scene: &Scene, stats: &SessionStats) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scene.score.to_string(),
                if scene.score_pop {
                    Style::default()
                        .fg(SCORE_POP)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                },
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                stats.high_score.max(scene.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, overlay: Overlay) -> Paragraph<'static> {
        let (title, color, detail) = match overlay {
            Overlay::Paused => (
                "PAUSED".to_string(),
                Color::Rgb(255, 204, 0),
                "press P/Space".to_string(),
            ),
            Overlay::GameOver { score, cause } => {
                let cause = match cause {
                    CollisionType::Wall => "hit the wall",
                    CollisionType::SelfCollision => "bit your tail",
                };
                (
                    "GAME OVER!".to_string(),
                    Color::Red,
                    format!("You {cause} • Score {score}"),
                )
            }
            Overlay::Won { score } => (
                "BOARD CLEARED!".to_string(),
                Color::Green,
                format!("Final Score {score}"),
            ),
        };

        let mut text = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(detail, Style::default().fg(Color::White))),
        ];
        if !matches!(overlay, Overlay::Paused) {
            text.push(Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_flash(&self, text: &str) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(79, 140, 255))),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P/Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Skin::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, Phase, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::time::Instant;

    fn draw(renderer: &Renderer, state: &GameState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let stats = SessionStats::new(Instant::now());
        let scene = Scene::capture(state, None, Instant::now());
        terminal
            .draw(|frame| renderer.render(frame, &scene, &stats))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn sample_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(10, 10), Direction::Right, 3),
            Direction::Right,
            Position::new(2, 2),
            20,
        )
    }

    #[test]
    fn test_render_shows_score_and_board() {
        let mut state = sample_state();
        state.score = 12;

        let text = buffer_text(&draw(&Renderer::default(), &state));

        assert!(text.contains("Score: 12"));
        assert!(text.contains("Snake"));
        assert!(text.contains('■'));
        assert!(text.contains('O'));
    }

    #[test]
    fn test_render_is_idempotent() {
        for skin in [Skin::Plain, Skin::Sprite] {
            let renderer = Renderer::new(skin);
            let state = sample_state();
            assert_eq!(draw(&renderer, &state), draw(&renderer, &state));
        }
    }

    #[test]
    fn test_overlay_text() {
        let mut state = sample_state();

        state.phase = Phase::Paused;
        assert!(buffer_text(&draw(&Renderer::default(), &state)).contains("PAUSED"));

        state.phase = Phase::Dead(CollisionType::Wall);
        assert!(buffer_text(&draw(&Renderer::default(), &state)).contains("GAME OVER!"));
    }

    #[test]
    fn test_score_pop_highlights_score_and_border() {
        let state = sample_state();
        let stats = SessionStats::new(Instant::now());
        let scene = Scene::capture(&state, None, Instant::now());
        let draw_scene = |scene: &Scene| {
            let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
            terminal
                .draw(|frame| Renderer::default().render(frame, scene, &stats))
                .unwrap();
            terminal.backend().buffer().clone()
        };

        let calm = draw_scene(&scene);
        let popped = draw_scene(&scene.clone().with_score_pop(true));

        assert_eq!(buffer_text(&calm), buffer_text(&popped));
        assert!(!calm.content().iter().any(|c| c.fg == SCORE_POP));
        assert!(popped.content().iter().any(|c| c.symbol() == "0" && c.fg == SCORE_POP));
        assert!(popped.content().iter().any(|c| c.symbol() == "║" && c.fg == SCORE_POP));
    }

    #[test]
    fn test_board_background_tracks_hue() {
        let mut state = sample_state();
        let empty_bg = |state: &GameState| {
            let buffer = draw(&Renderer::default(), state);
            buffer
                .content()
                .iter()
                .find(|c| c.symbol() == ".")
                .map(|c| c.bg)
        };

        let first = empty_bg(&state);
        state.steps = 60;
        let later = empty_bg(&state);

        assert!(first.is_some());
        assert_ne!(first, later);
    }

    #[test]
    fn test_title_screen() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::default().render_title(frame))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("SNAKE"));
        assert!(text.contains("to start"));
    }
}
