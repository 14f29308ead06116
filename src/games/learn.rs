use super::Activity;
use super::board::{Board, Marker};
use crate::catalog::{self, Part};
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind, Voice};
use crate::engine::proximity::Position;
use crate::terminal::{BLUE, GOLD, paint};
use crossterm::event::KeyCode;
use std::time::Instant;

pub struct LearnMode
{
    board: Board,
    parts: Vec<Part>,
    selected: Option<Part>,
    radius: f64,
    voice: Voice,
}

impl LearnMode
{
    pub fn new(config: &GameConfig) -> Self
    {
        Self {
            board: Board::new(),
            parts: catalog::all(),
            selected: None,
            radius: config.tolerance_radius,
            voice: Voice::new(config.learn.announce_rate, 1.0),
        }
    }

    /// Selects the part under `point` and says its name.
    pub fn pick(&mut self, point: Position, fx: &mut dyn Effects) -> Option<Part>
    {
        match catalog::nearest_within(&self.parts, point, self.radius) {
            Some(part) => {
                self.selected = Some(part);
                fx.announce(part.name, self.voice);
                Some(part)
            }
            None => {
                fx.notify(NotifyKind::Info, "Move onto a body part marker!", None);
                None
            }
        }
    }

    pub fn selected(&self) -> Option<Part>
    {
        self.selected
    }
}

impl Activity for LearnMode
{
    fn title(&self) -> &'static str
    {
        "Learn Mode"
    }

    fn handle_key(&mut self, code: KeyCode, _now: Instant, fx: &mut dyn Effects)
    {
        if self.board.handle_key(code) {
            return;
        }
        if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.pick(self.board.cursor(), fx);
        }
    }

    fn update(&mut self, _now: Instant, _fx: &mut dyn Effects) {}

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        lines.push("👆 Pick a body part to learn about it!".to_string());
        let markers: Vec<Marker> = self
            .parts
            .iter()
            .map(|&part| {
                let chosen = self.selected.is_some_and(|selected| selected.id == part.id);
                if chosen {
                    Marker::for_part(part, '@', Some(GOLD))
                } else {
                    Marker::for_part(part, 'o', Some(BLUE))
                }
            })
            .collect();
        self.board.render(&markers, lines);

        match self.selected {
            Some(part) => {
                lines.push(paint(&format!("{} {}", part.emoji, part.name), GOLD));
                lines.push(part.description.to_string());
                lines.push(format!("💡 Fun fact: {}", part.fun_fact));
            }
            None => lines.push("Arrows move, Enter picks.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::RecordingEffects;

    #[test]
    fn picking_a_marker_announces_it()
    {
        let mut fx = RecordingEffects::default();
        let mut learn = LearnMode::new(&GameConfig::default());
        let picked = learn.pick(Position::new(51.0, 21.0), &mut fx);
        assert_eq!(picked.map(|p| p.id), Some("head"));
        assert_eq!(fx.announcements(), vec!["Head"]);
        assert_eq!(learn.selected().map(|p| p.id), Some("head"));
    }

    #[test]
    fn empty_space_keeps_selection()
    {
        let mut fx = RecordingEffects::default();
        let mut learn = LearnMode::new(&GameConfig::default());
        learn.pick(Position::new(50.0, 36.0), &mut fx);
        assert!(learn.pick(Position::new(2.0, 2.0), &mut fx).is_none());
        assert_eq!(learn.selected().map(|p| p.id), Some("mouth"));
        assert_eq!(fx.notifications(NotifyKind::Info).len(), 1);
    }
}
