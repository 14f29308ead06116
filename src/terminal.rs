use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// Owns the alternate screen for one session. Raw mode and the cursor are
/// restored on drop, even when the session ends with an error.
pub struct Screen
{
    out: Stdout,
    frames: u64,
}

impl Screen
{
    pub fn enter() -> Result<Self, String>
    {
        let mut out = io::stdout();
        terminal::enable_raw_mode().map_err(|err| err.to_string())?;
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err.to_string());
        }
        log::debug!("screen entered");
        Ok(Self { out, frames: 0 })
    }

    /// Replaces whatever is on screen with `lines`.
    pub fn draw(&mut self, lines: &[String]) -> Result<(), String>
    {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All)).map_err(|err| err.to_string())?;
        self.out
            .write_all(compose_frame(lines).as_bytes())
            .map_err(|err| err.to_string())?;
        self.out.flush().map_err(|err| err.to_string())?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64
    {
        self.frames
    }
}

impl Drop for Screen
{
    fn drop(&mut self)
    {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::debug!("screen left after {} frames", self.frames);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb
{
    pub const fn new(r: u8, g: u8, b: u8) -> Self
    {
        Self { r, g, b }
    }
}

pub const GREEN: Rgb = Rgb::new(0, 200, 90);
pub const RED: Rgb = Rgb::new(230, 60, 60);
pub const GOLD: Rgb = Rgb::new(255, 215, 0);
pub const BLUE: Rgb = Rgb::new(80, 140, 255);
pub const GREY: Rgb = Rgb::new(110, 110, 110);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell
{
    pub ch: char,
    pub color: Option<Rgb>,
    pub inverse: bool,
}

impl Cell
{
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: None,
        inverse: false,
    };
}

pub fn render_row(row: &[Cell]) -> String
{
    let mut line = String::with_capacity(row.len() + 16);
    let mut active: Option<(Option<Rgb>, bool)> = None;
    for cell in row {
        let style = (cell.color, cell.inverse);
        if active != Some(style) {
            line.push_str("\x1b[0m");
            if let Some(color) = cell.color {
                line.push_str(&ansi_color(color));
            }
            if cell.inverse {
                line.push_str("\x1b[7m");
            }
            active = Some(style);
        }
        line.push(cell.ch);
    }
    line.push_str("\x1b[0m");
    line
}

pub fn ansi_color(color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

pub fn paint(text: &str, color: Rgb) -> String
{
    format!("{}{}\x1b[0m", ansi_color(color), text)
}

/// Raw mode does not translate `\n`, so every line ends in an explicit `\r\n`.
pub fn compose_frame(lines: &[String]) -> String
{
    let mut frame = String::new();
    for line in lines {
        frame.push_str(line);
        frame.push_str("\r\n");
    }
    frame
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn frame_lines_end_in_carriage_returns()
    {
        let lines = vec!["Menu".to_string(), String::new(), "q quits".to_string()];
        assert_eq!(compose_frame(&lines), "Menu\r\n\r\nq quits\r\n");
        assert_eq!(compose_frame(&[]), "");
    }

    #[test]
    fn plain_row_is_wrapped_in_resets()
    {
        let row = [Cell { ch: 'a', ..Cell::BLANK }, Cell { ch: 'b', ..Cell::BLANK }];
        assert_eq!(render_row(&row), "\x1b[0mab\x1b[0m");
    }

    #[test]
    fn style_changes_emit_escapes()
    {
        let row = [
            Cell::BLANK,
            Cell {
                ch: '@',
                color: Some(GOLD),
                inverse: true,
            },
        ];
        let line = render_row(&row);
        assert!(line.contains("\x1b[38;2;255;215;0m"));
        assert!(line.contains("\x1b[7m@"));
    }
}
