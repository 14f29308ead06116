//! Character-grid stand-in for the body illustration, with a movable cursor.

use crate::catalog::Part;
use crate::engine::proximity::Position;
use crate::terminal::{Cell, GREY, Rgb, paint, render_row};
use crossterm::event::KeyCode;

pub const COLS: usize = 41;
pub const ROWS: usize = 21;
const STEP_X: f64 = 100.0 / (COLS as f64 - 1.0);
const STEP_Y: f64 = 100.0 / (ROWS as f64 - 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker
{
    pub position: Position,
    pub ch: char,
    pub color: Option<Rgb>,
}

impl Marker
{
    pub fn for_part(part: Part, ch: char, color: Option<Rgb>) -> Self
    {
        Self {
            position: part.position,
            ch,
            color,
        }
    }
}

#[derive(Debug)]
pub struct Board
{
    cursor: Position,
}

impl Default for Board
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Board
{
    pub fn new() -> Self
    {
        Self {
            cursor: Position::new(50.0, 50.0),
        }
    }

    pub fn cursor(&self) -> Position
    {
        self.cursor
    }

    pub fn move_to(&mut self, position: Position)
    {
        self.cursor = position.clamped();
    }

    /// Moves the cursor for arrow keys. Returns `false` for any other key.
    pub fn handle_key(&mut self, code: KeyCode) -> bool
    {
        let (dx, dy) = match code {
            KeyCode::Left => (-STEP_X, 0.0),
            KeyCode::Right => (STEP_X, 0.0),
            KeyCode::Up => (0.0, -STEP_Y),
            KeyCode::Down => (0.0, STEP_Y),
            _ => return false,
        };
        self.move_to(Position::new(self.cursor.x + dx, self.cursor.y + dy));
        true
    }

    pub fn render(&self, markers: &[Marker], lines: &mut Vec<String>)
    {
        let mut field = vec![vec![Cell::BLANK; COLS]; ROWS];
        for marker in markers {
            let (col, row) = cell_for(marker.position);
            field[row][col] = Cell {
                ch: marker.ch,
                color: marker.color,
                inverse: false,
            };
        }
        let (col, row) = cell_for(self.cursor);
        let under = field[row][col];
        field[row][col] = Cell {
            ch: if under.ch == ' ' { '+' } else { under.ch },
            color: under.color,
            inverse: true,
        };

        let edge = paint(&"-".repeat(COLS + 2), GREY);
        lines.push(edge.clone());
        for row in field {
            let bar = paint("|", GREY);
            lines.push(format!("{bar}{}{bar}", render_row(&row)));
        }
        lines.push(edge);
    }
}

pub fn cell_for(position: Position) -> (usize, usize)
{
    let position = position.clamped();
    let col = (position.x / STEP_X).round() as usize;
    let row = (position.y / STEP_Y).round() as usize;
    (col.min(COLS - 1), row.min(ROWS - 1))
}

/// Unlabelled dots at every catalog position, drawn where the illustration would be.
pub fn outline(parts: &[Part]) -> Vec<Marker>
{
    parts
        .iter()
        .map(|&part| Marker::for_part(part, '.', Some(GREY)))
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn corners_map_to_grid_edges()
    {
        assert_eq!(cell_for(Position::new(0.0, 0.0)), (0, 0));
        assert_eq!(cell_for(Position::new(100.0, 100.0)), (COLS - 1, ROWS - 1));
        assert_eq!(cell_for(Position::new(50.0, 50.0)), (20, 10));
    }

    #[test]
    fn arrows_move_one_cell_and_clamp()
    {
        let mut board = Board::new();
        assert!(board.handle_key(KeyCode::Right));
        assert_eq!(cell_for(board.cursor()), (21, 10));
        for _ in 0..50 {
            board.handle_key(KeyCode::Up);
        }
        assert_eq!(board.cursor().y, 0.0);
        assert!(!board.handle_key(KeyCode::Enter));
    }

    #[test]
    fn render_has_frame_and_rows()
    {
        let board = Board::new();
        let mut lines = Vec::new();
        board.render(&[], &mut lines);
        assert_eq!(lines.len(), ROWS + 2);
    }
}
