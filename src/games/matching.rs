use super::Activity;
use super::board::{Board, Marker};
use crate::catalog::{self, Part};
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind};
use crate::engine::proximity::Position;
use crate::engine::selection::{
    InteractionStyle, SelectionMatchEngine, SourceOutcome, TargetOutcome,
};
use crate::terminal::{BLUE, GOLD, GREEN, GREY, paint};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus
{
    Labels,
    Board,
}

pub struct MatchMode
{
    engine: SelectionMatchEngine,
    parts: Vec<Part>,
    board: Board,
    focus: Focus,
    label_cursor: usize,
    radius: f64,
    celebration: Duration,
}

impl MatchMode
{
    pub fn new(config: &GameConfig) -> Self
    {
        Self::with_style(config, config.matching.style.into())
    }

    pub fn with_style(config: &GameConfig, style: InteractionStyle) -> Self
    {
        let parts = catalog::subset(catalog::MATCH_IDS);
        Self {
            engine: SelectionMatchEngine::new(parts.iter().map(|part| part.id), style),
            parts,
            board: Board::new(),
            focus: Focus::Labels,
            label_cursor: 0,
            radius: config.tolerance_radius,
            celebration: config.celebration(),
        }
    }

    pub fn engine(&self) -> &SelectionMatchEngine
    {
        &self.engine
    }

    pub fn select_label(&mut self, id: &str) -> SourceOutcome
    {
        let outcome = self.engine.select_source(id);
        if outcome == SourceOutcome::Selected {
            self.focus = Focus::Board;
        }
        outcome
    }

    /// Drops the selected label on whichever target marker sits under `point`.
    pub fn drop_at(&mut self, point: Position, fx: &mut dyn Effects) -> Option<TargetOutcome>
    {
        match catalog::nearest_within(&self.parts, point, self.radius) {
            Some(target) => Some(self.drop_on(target.id, fx)),
            None => {
                fx.notify(NotifyKind::Info, "Drop the label on a target circle!", None);
                None
            }
        }
    }

    pub fn drop_on(&mut self, target_id: &str, fx: &mut dyn Effects) -> TargetOutcome
    {
        let outcome = self.engine.attempt_target(target_id);
        match &outcome {
            TargetOutcome::NoSource => {
                fx.notify(NotifyKind::Info, "Pick a label first!", None);
            }
            TargetOutcome::AlreadyMatched => {
                fx.notify(NotifyKind::Info, "That one is already matched!", None);
            }
            TargetOutcome::Matched { id, complete } => {
                let name = catalog::find(id).map_or(id.as_str(), |part| part.name);
                fx.notify(
                    NotifyKind::Success,
                    "🎉 Perfect match!",
                    Some(&format!("You found the {name}!")),
                );
                if *complete {
                    fx.notify(
                        NotifyKind::Success,
                        "🌟 Amazing! You matched all body parts!",
                        Some("You're a body parts expert!"),
                    );
                    fx.celebrate(self.celebration);
                }
                self.focus = Focus::Labels;
                self.skip_to_unmatched();
            }
            TargetOutcome::Mismatch => {
                fx.notify(
                    NotifyKind::Error,
                    "Oops! Try again!",
                    Some("That's not the right spot!"),
                );
                if self.engine.selected().is_none() {
                    self.focus = Focus::Labels;
                }
            }
        }
        outcome
    }

    pub fn reset(&mut self, fx: &mut dyn Effects)
    {
        self.engine.reset();
        self.focus = Focus::Labels;
        self.label_cursor = 0;
        fx.notify(NotifyKind::Info, "Let's try again!", None);
    }

    fn skip_to_unmatched(&mut self)
    {
        if let Some(index) = (0..self.parts.len())
            .map(|offset| (self.label_cursor + offset) % self.parts.len())
            .find(|&index| !self.engine.is_matched(self.parts[index].id))
        {
            self.label_cursor = index;
        }
    }
}

impl Activity for MatchMode
{
    fn title(&self) -> &'static str
    {
        "Match Game"
    }

    fn handle_key(&mut self, code: KeyCode, _now: Instant, fx: &mut dyn Effects)
    {
        match code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Labels => Focus::Board,
                    Focus::Board => Focus::Labels,
                };
                return;
            }
            KeyCode::Char('r') | KeyCode::Char('R') if self.engine.is_complete() => {
                self.reset(fx);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Labels => match code {
                KeyCode::Up => self.label_cursor = self.label_cursor.saturating_sub(1),
                KeyCode::Down => {
                    let last = self.parts.len().saturating_sub(1);
                    self.label_cursor = (self.label_cursor + 1).min(last);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(part) = self.parts.get(self.label_cursor) {
                        self.select_label(part.id);
                    }
                }
                _ => {}
            },
            Focus::Board => {
                if self.board.handle_key(code) {
                    return;
                }
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.drop_at(self.board.cursor(), fx);
                }
            }
        }
    }

    fn update(&mut self, _now: Instant, _fx: &mut dyn Effects) {}

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        let style = match self.engine.style() {
            InteractionStyle::Drag => "drag",
            InteractionStyle::Tap => "tap",
        };
        lines.push(format!(
            "Matched: {} / {}   Style: {style}   Focus: {}",
            self.engine.matched_count(),
            self.engine.total(),
            if self.focus == Focus::Labels { "labels" } else { "body" }
        ));

        let mut labels = Vec::new();
        for (idx, part) in self.parts.iter().enumerate() {
            let focused = idx == self.label_cursor && self.focus == Focus::Labels;
            let pointer = if focused { ">" } else { " " };
            let label = if self.engine.is_matched(part.id) {
                paint(&format!("{pointer} ✓ {}", part.name), GREEN)
            } else if self.engine.selected() == Some(part.id) {
                paint(&format!("{pointer} ● {}", part.name), GOLD)
            } else {
                format!("{pointer}   {}", part.name)
            };
            labels.push(label);
        }

        let markers: Vec<Marker> = self
            .parts
            .iter()
            .map(|&part| {
                if self.engine.is_matched(part.id) {
                    Marker::for_part(part, '*', Some(GREEN))
                } else {
                    let color = if self.focus == Focus::Board { BLUE } else { GREY };
                    Marker::for_part(part, 'o', Some(color))
                }
            })
            .collect();
        let mut field = Vec::new();
        self.board.render(&markers, &mut field);

        for row in 0..field.len().max(labels.len()) {
            let left = field.get(row).map_or("", String::as_str);
            let right = labels.get(row).map_or("", String::as_str);
            lines.push(format!("{left}  {right}"));
        }

        if self.engine.is_complete() {
            lines.push("All matched! Press r to play again.".to_string());
        } else {
            lines.push("Tab switches list/body.".to_string());
            lines.push("Enter picks a label, then drop it on the body.".to_string());
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::RecordingEffects;

    fn point_of(id: &str) -> Position
    {
        catalog::find(id).map_or(Position::new(0.0, 0.0), |part| part.position)
    }

    #[test]
    fn drop_without_label_asks_for_one()
    {
        let mut fx = RecordingEffects::default();
        let mut game = MatchMode::with_style(&GameConfig::default(), InteractionStyle::Tap);
        let outcome = game.drop_at(point_of("head"), &mut fx);
        assert_eq!(outcome, Some(TargetOutcome::NoSource));
        assert_eq!(fx.notifications(NotifyKind::Info), vec!["Pick a label first!"]);
    }

    #[test]
    fn correct_drop_matches()
    {
        let mut fx = RecordingEffects::default();
        let mut game = MatchMode::with_style(&GameConfig::default(), InteractionStyle::Drag);
        game.select_label("belly");
        let outcome = game.drop_at(point_of("belly"), &mut fx);
        assert!(matches!(outcome, Some(TargetOutcome::Matched { complete: false, .. })));
        assert!(game.engine().is_matched("belly"));
        assert_eq!(fx.notifications(NotifyKind::Success), vec!["🎉 Perfect match!"]);
    }

    #[test]
    fn drop_on_empty_space_is_not_an_attempt()
    {
        let mut fx = RecordingEffects::default();
        let mut game = MatchMode::with_style(&GameConfig::default(), InteractionStyle::Drag);
        game.select_label("belly");
        assert!(game.drop_at(Position::new(2.0, 2.0), &mut fx).is_none());
        assert_eq!(game.engine().selected(), Some("belly"));
    }

    #[test]
    fn matching_everything_celebrates_once()
    {
        let mut fx = RecordingEffects::default();
        let mut game = MatchMode::with_style(&GameConfig::default(), InteractionStyle::Tap);
        for id in catalog::MATCH_IDS {
            game.select_label(id);
            game.drop_on(id, &mut fx);
        }
        assert!(game.engine().is_complete());
        assert_eq!(fx.celebrations(), 1);
        game.reset(&mut fx);
        assert_eq!(game.engine().matched_count(), 0);
    }
}
