use super::Activity;
use super::board::{Board, Marker};
use crate::catalog::{self, Part};
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind};
use crate::engine::proximity::Position;
use crate::terminal::{GREY, Rgb, paint};
use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::Instant;

pub const PALETTE: [(&str, Rgb); 8] = [
    ("Red", Rgb::new(239, 68, 68)),
    ("Orange", Rgb::new(249, 115, 22)),
    ("Yellow", Rgb::new(234, 179, 8)),
    ("Green", Rgb::new(34, 197, 94)),
    ("Blue", Rgb::new(59, 130, 246)),
    ("Purple", Rgb::new(168, 85, 247)),
    ("Pink", Rgb::new(236, 72, 153)),
    ("Brown", Rgb::new(161, 98, 7)),
];

pub struct ColorMode
{
    board: Board,
    parts: Vec<Part>,
    radius: f64,
    color: usize,
    colored: HashMap<&'static str, usize>,
    selected: Option<Part>,
}

impl ColorMode
{
    pub fn new(config: &GameConfig) -> Self
    {
        Self {
            board: Board::new(),
            parts: catalog::all(),
            radius: config.tolerance_radius,
            color: 0,
            colored: HashMap::new(),
            selected: None,
        }
    }

    pub fn choose_color(&mut self, index: usize)
    {
        if index < PALETTE.len() {
            self.color = index;
        }
    }

    pub fn paint_at(&mut self, point: Position, fx: &mut dyn Effects) -> Option<Part>
    {
        let part = catalog::nearest_within(&self.parts, point, self.radius)?;
        self.selected = Some(part);
        self.colored.insert(part.id, self.color);
        fx.notify(
            NotifyKind::Success,
            "Colored!",
            Some(&format!("You colored the {}!", part.name)),
        );
        Some(part)
    }

    pub fn clear(&mut self, fx: &mut dyn Effects)
    {
        self.colored.clear();
        self.selected = None;
        fx.notify(NotifyKind::Info, "Canvas cleared!", None);
    }

    pub fn color_of(&self, id: &str) -> Option<&'static str>
    {
        self.colored.get(id).map(|&index| PALETTE[index].0)
    }
}

impl Activity for ColorMode
{
    fn title(&self) -> &'static str
    {
        "Color & Learn"
    }

    fn handle_key(&mut self, code: KeyCode, _now: Instant, fx: &mut dyn Effects)
    {
        if self.board.handle_key(code) {
            return;
        }
        match code {
            KeyCode::Char(ch @ '1'..='8') => {
                if let Some(digit) = ch.to_digit(10) {
                    self.choose_color(digit as usize - 1);
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.clear(fx),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.paint_at(self.board.cursor(), fx).is_none() {
                    fx.notify(NotifyKind::Info, "Move onto a body part to color it!", None);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, _now: Instant, _fx: &mut dyn Effects) {}

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        let palette: Vec<String> = PALETTE
            .iter()
            .enumerate()
            .map(|(idx, (name, rgb))| {
                let label = format!("{}:{}", idx + 1, name);
                if idx == self.color {
                    paint(&format!("[{label}]"), *rgb)
                } else {
                    paint(&label, *rgb)
                }
            })
            .collect();
        lines.push(format!("🎨 {}", palette.join(" ")));

        let markers: Vec<Marker> = self
            .parts
            .iter()
            .map(|&part| match self.colored.get(part.id) {
                Some(&index) => Marker::for_part(part, '#', Some(PALETTE[index].1)),
                None => Marker::for_part(part, 'o', Some(GREY)),
            })
            .collect();
        self.board.render(&markers, lines);

        if let Some(part) = self.selected {
            lines.push(format!("{} {}", part.emoji, part.name));
            lines.push(part.description.to_string());
            lines.push(format!("💡 {}", part.fun_fact));
        } else {
            lines.push("1-8 pick a color, Enter paints, c clears.".to_string());
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::RecordingEffects;

    #[test]
    fn painting_uses_current_color()
    {
        let mut fx = RecordingEffects::default();
        let mut color = ColorMode::new(&GameConfig::default());
        color.choose_color(4);
        let part = color.paint_at(Position::new(50.0, 62.0), &mut fx);
        assert_eq!(part.map(|p| p.id), Some("belly"));
        assert_eq!(color.color_of("belly"), Some("Blue"));
        assert_eq!(fx.notifications(NotifyKind::Success), vec!["Colored!"]);
    }

    #[test]
    fn out_of_range_color_is_ignored()
    {
        let mut color = ColorMode::new(&GameConfig::default());
        color.choose_color(2);
        color.choose_color(42);
        let mut fx = RecordingEffects::default();
        color.paint_at(Position::new(50.0, 20.0), &mut fx);
        assert_eq!(color.color_of("head"), Some("Yellow"));
    }

    #[test]
    fn clear_removes_all_paint()
    {
        let mut fx = RecordingEffects::default();
        let mut color = ColorMode::new(&GameConfig::default());
        color.paint_at(Position::new(50.0, 20.0), &mut fx);
        color.clear(&mut fx);
        assert_eq!(color.color_of("head"), None);
        assert_eq!(fx.notifications(NotifyKind::Info), vec!["Canvas cleared!"]);
    }
}
