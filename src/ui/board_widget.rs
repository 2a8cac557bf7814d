use crate::game::{Board, Gravity, Player, Position, COLS, ROWS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Everything needed to draw the board at one instant.
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub gravity: Gravity,
    pub selected_line: usize,
    /// Winning cells, once revealed.
    pub highlight: &'a [Position],
    /// Current cell, landing cell and owner of a piece still in the air. The
    /// landing cell stays empty until the piece arrives.
    pub falling: Option<(Position, Position, Player)>,
}

fn piece_style(player: Player) -> Style {
    match player {
        Player::Red => Style::default().fg(Color::Red),
        Player::Yellow => Style::default().fg(Color::Yellow),
    }
}

impl BoardView<'_> {
    fn cell_span(&self, pos: Position) -> Span<'static> {
        if let Some((at, landing, player)) = self.falling {
            if pos == at {
                return Span::styled(" \u{25cf} ", piece_style(player));
            }
            if pos == landing {
                return Span::styled(" . ", Style::default().fg(Color::DarkGray));
            }
        }

        let span = match Player::from_cell(self.board.at(pos)) {
            None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            Some(player) => Span::styled(" \u{25cf} ", piece_style(player)),
        };
        if self.highlight.contains(&pos) {
            span.patch_style(
                Style::default()
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )
        } else {
            span
        }
    }

    fn selected_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    /// Column labels, with an arrow on the selected column when pieces enter
    /// from this side.
    fn column_line(&self, arrow: Option<&'static str>) -> Line<'static> {
        let mut spans = vec![Span::raw("   ")];
        for col in 0..COLS {
            if col == self.selected_line {
                let text = match arrow {
                    Some(arrow) => format!(" {arrow} "),
                    None => format!(" {} ", col + 1),
                };
                spans.push(Span::styled(text, Self::selected_style()));
            } else if arrow.is_some() {
                spans.push(Span::raw("   "));
            } else {
                spans.push(Span::raw(format!(" {} ", col + 1)));
            }
        }
        spans.push(Span::raw("    "));
        Line::from(spans)
    }

    /// Two-character side gutter: row label or entry arrow.
    fn row_gutter(&self, row: usize, entry_side: bool, arrow: &'static str) -> Span<'static> {
        if !entry_side {
            return Span::raw("  ");
        }
        if row == self.selected_line {
            Span::styled(arrow, Self::selected_style())
        } else {
            Span::raw(format!("{:^2}", row + 1))
        }
    }

    /// Render the board as fixed-width lines, entry markers included.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let vertical = self.gravity.is_vertical();

        if vertical {
            let arrow = (self.gravity == Gravity::Down).then_some("\u{25bc}");
            lines.push(self.column_line(None));
            if arrow.is_some() {
                lines.push(self.column_line(arrow));
            }
        }

        let rule = "\u{2550}".repeat(COLS * 3 + 1);
        lines.push(Line::from(format!("  \u{2554}{rule}\u{2557}  ")));

        for row in 0..ROWS {
            let mut spans = vec![
                self.row_gutter(row, self.gravity == Gravity::Right, "\u{25b6} "),
                Span::raw("\u{2551}"),
            ];
            for col in 0..COLS {
                spans.push(self.cell_span(Position::new(row, col)));
            }
            spans.push(Span::raw(" \u{2551}"));
            spans.push(self.row_gutter(row, self.gravity == Gravity::Left, " \u{25c0}"));
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(format!("  \u{255a}{rule}\u{255d}  ")));

        if self.gravity == Gravity::Up {
            lines.push(self.column_line(Some("\u{25b2}")));
        }

        lines
    }
}
