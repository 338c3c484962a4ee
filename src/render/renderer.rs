use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::board::{BoardView, board_extent};
use crate::game::{GameOverReason, GameState, Phase};
use crate::metrics::GameMetrics;
use crate::modes::Modal;
use crate::scores::ScoreRecord;

const SCORES_PANEL_WIDTH: u16 = 44;
const MODAL_WIDTH: u16 = 46;

/// Everything the screen shows, borrowed from the running mode
pub struct ScreenView<'a> {
    pub state: Option<&'a GameState>,
    pub metrics: &'a GameMetrics,
    /// Present while the saved-scores panel is open
    pub scores: Option<&'a [ScoreRecord]>,
    pub modal: Option<&'a Modal>,
}

impl ScreenView<'_> {
    fn phase(&self) -> Phase {
        self.state.map_or(Phase::NotStarted, |state| state.phase)
    }

    fn score(&self) -> u32 {
        self.state.map_or(0, |state| state.score)
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &ScreenView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let (game_area, scores_area) = match view.scores {
            Some(_) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(0), Constraint::Length(SCORES_PANEL_WIDTH)])
                    .split(chunks[1]);
                (columns[0], Some(columns[1]))
            }
            None => (chunks[1], None),
        };

        match (view.phase(), view.state) {
            (Phase::GameOver, Some(state)) => {
                let area = centered_rect(MODAL_WIDTH, 9, game_area);
                frame.render_widget(self.render_game_over(state), area);
            }
            (_, Some(state)) => self.render_board(frame, game_area, state),
            (_, None) => {}
        }

        if let (Some(records), Some(area)) = (view.scores, scores_area) {
            frame.render_widget(self.render_scores(records), area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);

        if let Some(modal) = view.modal {
            let area = centered_rect(MODAL_WIDTH, 7, frame.area());
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_modal(modal), area);
        }
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, state: &GameState) {
        let (width, height) = board_extent(state.tile_count);
        let outer = centered_rect(width.saturating_add(2), height.saturating_add(2), area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(outer);

        frame.render_widget(block, outer);
        frame.render_widget(BoardView::new(state), inner);
    }

    fn render_stats(&self, view: &ScreenView) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                format!("Score: {}", view.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let reason = match state.game_over_reason {
            Some(GameOverReason::Wall) => "You hit the wall",
            Some(GameOverReason::SelfCollision) => "You ran into yourself",
            Some(GameOverReason::BoardFull) => "The board is full!",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("Final score: {}", state.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("S", Style::default().fg(Color::Yellow)),
                Span::styled(" save score  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_scores<'a>(&self, records: &'a [ScoreRecord]) -> Paragraph<'a> {
        let lines: Vec<Line> = if records.is_empty() {
            vec![Line::from(Span::styled(
                "No saved scores",
                Style::default().fg(Color::Gray),
            ))]
        } else {
            records
                .iter()
                .enumerate()
                .map(|(index, record)| Line::from(record.display_line(index + 1)))
                .collect()
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Saved scores ")
                .title_bottom(" C clear  B back "),
        )
    }

    fn render_modal<'a>(&self, modal: &'a Modal) -> Paragraph<'a> {
        let hint = Style::default().fg(Color::Gray);

        let (title, lines) = match modal {
            Modal::NamePrompt { name, score, .. } => (
                " Save score ",
                vec![
                    Line::from(format!("Score: {}", score)),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Name: "),
                        Span::styled(
                            format!("{}_", name),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(""),
                    Line::from(Span::styled("Enter to save, Esc to cancel", hint)),
                ],
            ),
            Modal::ConfirmClear => (
                " Clear scores ",
                vec![
                    Line::from(""),
                    Line::from("Delete all saved scores?"),
                    Line::from(""),
                    Line::from(Span::styled("Y to confirm, N to keep them", hint)),
                ],
            ),
            Modal::Notice(message) => (
                " Notice ",
                vec![
                    Line::from(""),
                    Line::from(message.as_str()),
                    Line::from(""),
                    Line::from(Span::styled("Press any key", hint)),
                ],
            ),
        };

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" move | "),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("S", key),
            Span::raw(" save | "),
            Span::styled("V", key),
            Span::raw(" scores | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
