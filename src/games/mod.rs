pub mod board;
pub mod color;
pub mod learn;
pub mod matching;
pub mod memory;
pub mod quiz;
pub mod simon;
pub mod sound;

use crate::config::GameConfig;
use crate::effects::Effects;
use crossterm::event::KeyCode;
use std::time::Instant;

pub struct GameDescriptor
{
    pub kind: ActivityKind,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind
{
    Learn,
    Match,
    Quiz,
    Memory,
    Sound,
    Color,
    Simon,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![
        GameDescriptor {
            kind: ActivityKind::Learn,
            name: "learn",
            title: "Learn Mode",
            description: "Explore & learn about body parts!",
        },
        GameDescriptor {
            kind: ActivityKind::Match,
            name: "match",
            title: "Match Game",
            description: "Put the labels on the body parts!",
        },
        GameDescriptor {
            kind: ActivityKind::Quiz,
            name: "quiz",
            title: "Quiz Time",
            description: "Test what you learned!",
        },
        GameDescriptor {
            kind: ActivityKind::Memory,
            name: "memory",
            title: "Memory Match",
            description: "Find matching pairs!",
        },
        GameDescriptor {
            kind: ActivityKind::Sound,
            name: "sound",
            title: "Listen & Find",
            description: "Hear it, then find it!",
        },
        GameDescriptor {
            kind: ActivityKind::Color,
            name: "color",
            title: "Color & Learn",
            description: "Paint the body parts!",
        },
        GameDescriptor {
            kind: ActivityKind::Simon,
            name: "simon",
            title: "Simon Says",
            description: "Quick! Tap what Simon says!",
        },
    ]
}

impl ActivityKind
{
    pub fn from_name(name: &str) -> Option<Self>
    {
        registry()
            .into_iter()
            .find(|game| game.name.eq_ignore_ascii_case(name))
            .map(|game| game.kind)
    }
}

/// One running activity. Every activity owns all of its state, including pending
/// deferred transitions, so dropping it cancels them.
pub trait Activity
{
    fn title(&self) -> &'static str;
    fn handle_key(&mut self, code: KeyCode, now: Instant, fx: &mut dyn Effects);
    fn update(&mut self, now: Instant, fx: &mut dyn Effects);
    fn render(&self, now: Instant, lines: &mut Vec<String>);
}

pub enum Mode
{
    Menu,
    Learn(learn::LearnMode),
    Match(matching::MatchMode),
    Quiz(quiz::QuizMode),
    Memory(memory::MemoryMode),
    Sound(sound::SoundMode),
    Color(color::ColorMode),
    Simon(simon::SimonMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow
{
    Continue,
    Quit,
}

/// Root of the application: the only place activities are created or dropped.
pub struct ModeController
{
    mode: Mode,
    config: GameConfig,
    captions: bool,
}

impl ModeController
{
    /// `captions` shows the spoken prompt as text, for when no speech engine is around.
    pub fn new(config: GameConfig, captions: bool) -> Self
    {
        Self {
            mode: Mode::Menu,
            config,
            captions,
        }
    }

    pub fn mode(&self) -> &Mode
    {
        &self.mode
    }

    pub fn current(&self) -> Option<ActivityKind>
    {
        match self.mode {
            Mode::Menu => None,
            Mode::Learn(_) => Some(ActivityKind::Learn),
            Mode::Match(_) => Some(ActivityKind::Match),
            Mode::Quiz(_) => Some(ActivityKind::Quiz),
            Mode::Memory(_) => Some(ActivityKind::Memory),
            Mode::Sound(_) => Some(ActivityKind::Sound),
            Mode::Color(_) => Some(ActivityKind::Color),
            Mode::Simon(_) => Some(ActivityKind::Simon),
        }
    }

    pub fn open(&mut self, kind: ActivityKind, now: Instant, fx: &mut dyn Effects)
    {
        let config = &self.config;
        self.mode = match kind {
            ActivityKind::Learn => Mode::Learn(learn::LearnMode::new(config)),
            ActivityKind::Match => Mode::Match(matching::MatchMode::new(config)),
            ActivityKind::Quiz => Mode::Quiz(quiz::QuizMode::new(config, now)),
            ActivityKind::Memory => Mode::Memory(memory::MemoryMode::new(config)),
            ActivityKind::Sound => {
                Mode::Sound(sound::SoundMode::new(config, self.captions, now, fx))
            }
            ActivityKind::Color => Mode::Color(color::ColorMode::new(config)),
            ActivityKind::Simon => Mode::Simon(simon::SimonMode::new(config)),
        };
        log::info!("opened {kind:?}");
    }

    /// Returns to the menu, discarding the activity and everything it scheduled.
    pub fn back(&mut self)
    {
        if let Some(kind) = self.current() {
            log::info!("left {kind:?}");
        }
        self.mode = Mode::Menu;
    }

    fn activity(&self) -> Option<&dyn Activity>
    {
        match &self.mode {
            Mode::Menu => None,
            Mode::Learn(game) => Some(game),
            Mode::Match(game) => Some(game),
            Mode::Quiz(game) => Some(game),
            Mode::Memory(game) => Some(game),
            Mode::Sound(game) => Some(game),
            Mode::Color(game) => Some(game),
            Mode::Simon(game) => Some(game),
        }
    }

    fn activity_mut(&mut self) -> Option<&mut dyn Activity>
    {
        match &mut self.mode {
            Mode::Menu => None,
            Mode::Learn(game) => Some(game),
            Mode::Match(game) => Some(game),
            Mode::Quiz(game) => Some(game),
            Mode::Memory(game) => Some(game),
            Mode::Sound(game) => Some(game),
            Mode::Color(game) => Some(game),
            Mode::Simon(game) => Some(game),
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant, fx: &mut dyn Effects) -> Flow
    {
        if code == KeyCode::Esc && self.current().is_some() {
            self.back();
            return Flow::Continue;
        }
        if let Some(activity) = self.activity_mut() {
            activity.handle_key(code, now, fx);
            return Flow::Continue;
        }

        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Flow::Quit,
            KeyCode::Char(ch) => {
                let games = registry();
                let choice = ch
                    .to_digit(10)
                    .and_then(|digit| (digit as usize).checked_sub(1))
                    .and_then(|index| games.get(index));
                if let Some(game) = choice {
                    self.open(game.kind, now, fx);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    pub fn update(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        if let Some(activity) = self.activity_mut() {
            activity.update(now, fx);
        }
    }

    pub fn render(&self, now: Instant) -> Vec<String>
    {
        let mut lines = Vec::new();
        match self.activity() {
            Some(activity) => {
                lines.push(format!("Body Parts Fun! - {}", activity.title()));
                activity.render(now, &mut lines);
                lines.push(String::new());
                lines.push("Esc: back to menu".to_string());
            }
            None => render_menu(&mut lines),
        }
        lines
    }
}

fn render_menu(lines: &mut Vec<String>)
{
    lines.push("Body Parts Fun! 🎉".to_string());
    lines.push("Learn about your amazing body!".to_string());
    lines.push(String::new());
    lines.push("Select a game:".to_string());
    for (idx, game) in registry().iter().enumerate() {
        lines.push(format!("  {}. {:<14} - {}", idx + 1, game.title, game.description));
    }
    lines.push(String::new());
    lines.push("Press a number to play, q or Esc to quit.".to_string());
}

/// Shared closing line for the round-based games.
pub fn verdict(
    score: u32,
    total: usize,
    perfect: &'static str,
    good: &'static str,
    other: &'static str,
) -> &'static str
{
    let score = score as usize;
    if total > 0 && score == total {
        perfect
    } else if score * 2 >= total {
        good
    } else {
        other
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::RecordingEffects;

    #[test]
    fn registry_names_resolve()
    {
        for game in registry() {
            assert_eq!(ActivityKind::from_name(game.name), Some(game.kind));
        }
        assert_eq!(ActivityKind::from_name("QUIZ"), Some(ActivityKind::Quiz));
        assert_eq!(ActivityKind::from_name("drawing"), None);
    }

    #[test]
    fn number_keys_open_and_escape_returns()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut controller = ModeController::new(GameConfig::default(), true);
        assert_eq!(controller.handle_key(KeyCode::Char('3'), now, &mut fx), Flow::Continue);
        assert_eq!(controller.current(), Some(ActivityKind::Quiz));
        controller.handle_key(KeyCode::Esc, now, &mut fx);
        assert_eq!(controller.current(), None);
        assert_eq!(controller.handle_key(KeyCode::Char('9'), now, &mut fx), Flow::Continue);
        assert_eq!(controller.current(), None);
        assert_eq!(controller.handle_key(KeyCode::Char('q'), now, &mut fx), Flow::Quit);
    }

    #[test]
    fn leaving_drops_pending_transitions()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut controller = ModeController::new(GameConfig::default(), true);
        controller.open(ActivityKind::Quiz, now, &mut fx);
        controller.handle_key(KeyCode::Enter, now, &mut fx);
        controller.back();
        controller.open(ActivityKind::Quiz, now, &mut fx);
        controller.update(now + std::time::Duration::from_secs(5), &mut fx);
        match controller.mode() {
            Mode::Quiz(quiz) => {
                assert_eq!(quiz.rounds().current_index(), 0);
                assert_eq!(quiz.rounds().score(), 0);
            }
            _ => panic!("expected the quiz to be open"),
        }
    }

    #[test]
    fn verdict_thresholds()
    {
        assert_eq!(verdict(4, 4, "p", "g", "o"), "p");
        assert_eq!(verdict(2, 4, "p", "g", "o"), "g");
        assert_eq!(verdict(1, 4, "p", "g", "o"), "o");
    }
}
