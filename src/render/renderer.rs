use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Difficulty, FoodKind, GameState, SegmentTag};
use crate::metrics::GameMetrics;

/// What occupies a grid cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Wall,
    Head,
    Body,
    Food,
    Bonus,
}

impl Cell {
    fn span(self) -> Span<'static> {
        match self {
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            Cell::Wall => Span::styled("██", Style::default().fg(Color::Red)),
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("■ ", Style::default().fg(Color::LightGreen)),
            Cell::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Bonus => Span::styled(
                "★ ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Draws the session from the state's read-only queries
pub struct Renderer {
    wall_inset: i32,
    tick_rate: u32,
}

impl Renderer {
    pub fn new(wall_inset: i32, tick_rate: u32) -> Self {
        Self {
            wall_inset,
            tick_rate,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // HUD
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        if state.is_game_over() {
            frame.render_widget(self.render_game_over(state, metrics), chunks[0]);
        } else {
            frame.render_widget(self.render_grid(state), chunks[0]);
        }

        frame.render_widget(self.render_hud(state, metrics), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Map every grid cell to its content, walls first so entities draw on top
    fn layout_cells(&self, state: &GameState) -> HashMap<(i32, i32), Cell> {
        let grid = state.grid;
        let mut cells = HashMap::new();

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let side = col < self.wall_inset || col >= grid.cols - self.wall_inset;
                let end = row < self.wall_inset || row >= grid.rows - self.wall_inset;
                let wall = match state.difficulty() {
                    Difficulty::Easy => false,
                    Difficulty::Medium => side,
                    Difficulty::Hard => side || end,
                };
                if wall {
                    cells.insert((col, row), Cell::Wall);
                }
            }
        }

        for food in [state.food(), state.bonus()] {
            if food.active {
                let cell = match food.kind {
                    FoodKind::Regular => Cell::Food,
                    FoodKind::Bonus => Cell::Bonus,
                };
                cells.insert(grid.cell_of(food.position), cell);
            }
        }

        // Tail first so the head wins a shared cell
        for segment in state.segments().iter().rev() {
            let cell = match segment.tag {
                SegmentTag::Head => Cell::Head,
                SegmentTag::Body => Cell::Body,
            };
            cells.insert(grid.cell_of(segment.position), cell);
        }

        cells
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let grid = state.grid;
        let cells = self.layout_cells(state);

        let lines: Vec<Line> = (0..grid.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..grid.cols)
                    .map(|col| {
                        cells
                            .get(&(col, row))
                            .copied()
                            .unwrap_or(Cell::Empty)
                            .span()
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if state.is_paused() {
            " Sssssnake - PAUSED "
        } else {
            " Sssssnake "
        };
        let border = if state.is_paused() {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_hud(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Magenta);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let seconds = state.elapsed_seconds(self.tick_rate);

        let text = Line::from(vec![
            Span::styled("SCORE: ", label),
            Span::styled(state.score().to_string(), value),
            Span::raw("    "),
            Span::styled("TIME: ", label),
            Span::styled(GameMetrics::format_time(seconds), value),
            Span::raw("    "),
            Span::styled("DIFFICULTY: ", label),
            Span::styled(state.difficulty().level().to_string(), value),
            Span::raw("    "),
            Span::styled("BEST: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "[ENTER]",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 11)
    }

    #[test]
    fn test_layout_marks_walls_by_tier() {
        let renderer = Renderer::new(1, 35);
        let mut engine = engine();
        let mut state = engine.reset();

        let easy = renderer.layout_cells(&state);
        assert!(!easy.values().any(|&c| c == Cell::Wall));

        state.difficulty = Difficulty::Medium;
        let medium = renderer.layout_cells(&state);
        assert_eq!(medium.get(&(24, 5)), Some(&Cell::Wall));
        assert_eq!(medium.get(&(5, 0)), None);

        state.difficulty = Difficulty::Hard;
        let hard = renderer.layout_cells(&state);
        assert_eq!(hard.get(&(5, 0)), Some(&Cell::Wall));
        assert_eq!(hard.get(&(5, 11)), Some(&Cell::Wall));
    }

    #[test]
    fn test_layout_places_snake_and_food() {
        let renderer = Renderer::new(1, 35);
        let mut engine = engine();
        let mut state = engine.reset();
        state.food.place(state.grid.cell_origin(3, 4));
        state.bonus.place(state.grid.cell_origin(6, 2));

        let cells = renderer.layout_cells(&state);
        assert_eq!(cells.get(&(0, 0)), Some(&Cell::Head));
        assert_eq!(cells.get(&(3, 4)), Some(&Cell::Food));
        assert_eq!(cells.get(&(6, 2)), Some(&Cell::Bonus));
    }

    #[test]
    fn test_render_smoke() {
        let renderer = Renderer::new(1, 35);
        let mut engine = engine();
        let mut state = engine.reset();
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics))
            .unwrap();

        state.phase = crate::game::Phase::GameOver;
        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics))
            .unwrap();
    }
}
