use super::Activity;
use crate::catalog::{self, Part};
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind};
use crate::engine::pairs::{CardFace, FlipOutcome, PairEvent, PairMatchingEngine};
use crate::terminal::{GOLD, GREEN, paint};
use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const GRID_COLUMNS: usize = 4;
const CARD_WIDTH: usize = 16;

pub struct MemoryMode
{
    engine: PairMatchingEngine,
    parts: Vec<Part>,
    cursor: usize,
    rng: StdRng,
    celebration: Duration,
}

impl MemoryMode
{
    pub fn new(config: &GameConfig) -> Self
    {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &GameConfig, mut rng: StdRng) -> Self
    {
        let parts = catalog::subset(catalog::MEMORY_IDS);
        let delay = Duration::from_millis(config.memory.resolve_delay_ms);
        let engine = PairMatchingEngine::new(&parts, delay, &mut rng);
        Self {
            engine,
            parts,
            cursor: 0,
            rng,
            celebration: config.celebration(),
        }
    }

    pub fn engine(&self) -> &PairMatchingEngine
    {
        &self.engine
    }

    pub fn new_game(&mut self)
    {
        self.engine.initialize(&self.parts, &mut self.rng);
        self.cursor = 0;
    }

    pub fn flip(&mut self, card_id: &str, now: Instant) -> FlipOutcome
    {
        self.engine.flip(card_id, now)
    }

    fn flip_at_cursor(&mut self, now: Instant)
    {
        let Some(card) = self.engine.cards().get(self.cursor) else {
            return;
        };
        let card_id = card.card_id.clone();
        self.flip(&card_id, now);
    }

    fn move_cursor(&mut self, code: KeyCode)
    {
        let count = self.engine.cards().len();
        if count == 0 {
            return;
        }
        let cursor = self.cursor;
        self.cursor = match code {
            KeyCode::Left => cursor.saturating_sub(1),
            KeyCode::Right => (cursor + 1).min(count - 1),
            KeyCode::Up => cursor.checked_sub(GRID_COLUMNS).unwrap_or(cursor),
            KeyCode::Down if cursor + GRID_COLUMNS < count => cursor + GRID_COLUMNS,
            _ => cursor,
        };
    }
}

impl Activity for MemoryMode
{
    fn title(&self) -> &'static str
    {
        "Memory Match"
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant, _fx: &mut dyn Effects)
    {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => self.move_cursor(code),
            KeyCode::Enter | KeyCode::Char(' ') => self.flip_at_cursor(now),
            KeyCode::Char('n') | KeyCode::Char('N') => self.new_game(),
            _ => {}
        }
    }

    fn update(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        for event in self.engine.update(now) {
            match event {
                PairEvent::Matched { pair_key } => {
                    let name = catalog::find(&pair_key).map_or(pair_key.as_str(), |part| part.name);
                    fx.notify(
                        NotifyKind::Success,
                        "🎉 Great match!",
                        Some(&format!("You found the {name}!")),
                    );
                }
                PairEvent::Mismatched => {
                    fx.notify(NotifyKind::Error, "Not a match! Try again!", None);
                }
                PairEvent::Completed { moves } => {
                    fx.notify(
                        NotifyKind::Success,
                        "🌟 Amazing! You found all pairs!",
                        Some(&format!("You did it in {moves} moves!")),
                    );
                    fx.celebrate(self.celebration);
                }
            }
        }
    }

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        lines.push(format!(
            "Moves: {}   {}",
            self.engine.moves(),
            paint(
                &format!(
                    "Matched: {} / {}",
                    self.engine.matched_pairs(),
                    self.engine.total_pairs()
                ),
                GREEN
            )
        ));
        lines.push(String::new());

        for (row_idx, row) in self.engine.cards().chunks(GRID_COLUMNS).enumerate() {
            let mut line = String::new();
            for (col_idx, card) in row.iter().enumerate() {
                let index = row_idx * GRID_COLUMNS + col_idx;
                let text = match card.face() {
                    CardFace::Down => "?".to_string(),
                    CardFace::Up | CardFace::Matched => card.content.clone(),
                };
                let padding = CARD_WIDTH.saturating_sub(text.chars().count() + 4);
                let body = format!("[ {text}{} ]", " ".repeat(padding));
                let body = match card.face() {
                    CardFace::Matched => paint(&body, GREEN),
                    _ if index == self.cursor => paint(&body, GOLD),
                    _ => body,
                };
                let pointer = if index == self.cursor { ">" } else { " " };
                line.push_str(&format!("{pointer}{body} "));
            }
            lines.push(line);
            lines.push(String::new());
        }

        if self.engine.is_complete() {
            lines.push("All pairs found! Press n for a new game.".to_string());
        } else {
            lines.push("Arrows move, Enter flips, n deals a new game.".to_string());
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::{Recorded, RecordingEffects};

    fn game() -> MemoryMode
    {
        MemoryMode::with_rng(&GameConfig::default(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn deals_twelve_cards()
    {
        let memory = game();
        assert_eq!(memory.engine().cards().len(), 12);
        assert_eq!(memory.engine().total_pairs(), 6);
    }

    #[test]
    fn match_names_the_part()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut memory = game();
        memory.flip("nose-emoji", now);
        memory.flip("nose-name", now);
        memory.update(now + Duration::from_secs(1), &mut fx);
        assert_eq!(fx.notifications(NotifyKind::Success), vec!["🎉 Great match!"]);
        assert!(fx.log.iter().any(|entry| matches!(
            entry,
            Recorded::Notify(_, _, Some(description)) if description == "You found the Nose!"
        )));
    }

    #[test]
    fn cursor_stays_inside_grid()
    {
        let mut memory = game();
        memory.move_cursor(KeyCode::Up);
        assert_eq!(memory.cursor, 0);
        for _ in 0..10 {
            memory.move_cursor(KeyCode::Down);
        }
        assert_eq!(memory.cursor, 8);
        for _ in 0..10 {
            memory.move_cursor(KeyCode::Right);
        }
        assert_eq!(memory.cursor, 11);
    }

    #[test]
    fn new_game_resets_moves()
    {
        let now = Instant::now();
        let mut memory = game();
        memory.flip("head-emoji", now);
        memory.flip("feet-name", now);
        assert_eq!(memory.engine().moves(), 1);
        memory.new_game();
        assert_eq!(memory.engine().moves(), 0);
        assert!(!memory.engine().is_resolving());
    }
}
