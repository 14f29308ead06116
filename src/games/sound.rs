use super::board::{self, Board};
use super::{Activity, verdict};
use crate::catalog;
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind, Voice};
use crate::engine::proximity::Position;
use crate::engine::rounds::{
    Candidate, RoundEvent, RoundOutcome, RoundSequencer, RoundStatus, RoundTiming, SequenceOrder,
};
use crate::terminal::{GOLD, GREEN, GREY, paint};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

pub struct SoundMode
{
    rounds: RoundSequencer,
    board: Board,
    outline: Vec<board::Marker>,
    prompt_voice: Voice,
    praise_voice: Voice,
    captions: bool,
    celebration: Duration,
}

impl SoundMode
{
    pub fn new(config: &GameConfig, captions: bool, now: Instant, fx: &mut dyn Effects) -> Self
    {
        let parts = catalog::subset(catalog::SOUND_IDS);
        let timing = RoundTiming::uniform(Duration::from_millis(config.sound.feedback_delay_ms));
        let rounds = RoundSequencer::new(parts, SequenceOrder::Fixed, timing)
            .with_radius(config.tolerance_radius);
        let mut mode = Self {
            rounds,
            board: Board::new(),
            outline: board::outline(&catalog::all()),
            prompt_voice: Voice::new(config.sound.announce_rate, config.sound.announce_pitch),
            praise_voice: Voice::new(config.sound.praise_rate, 1.0),
            captions,
            celebration: config.celebration(),
        };
        mode.restart(now, fx);
        mode
    }

    pub fn rounds(&self) -> &RoundSequencer
    {
        &self.rounds
    }

    pub fn restart(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        self.rounds.start(now);
        self.play_prompt(fx);
    }

    /// Says the current challenge again.
    pub fn play_prompt(&self, fx: &mut dyn Effects)
    {
        if let Some(target) = self.rounds.current() {
            if self.rounds.status() != RoundStatus::Complete {
                fx.announce(&format!("Find the {}", target.name), self.prompt_voice);
            }
        }
    }

    pub fn answer(
        &mut self,
        point: Position,
        now: Instant,
        fx: &mut dyn Effects,
    ) -> Option<RoundOutcome>
    {
        let outcome = self.rounds.submit(Candidate::Point(point), now)?;
        if outcome.correct {
            fx.notify(
                NotifyKind::Success,
                "🎉 Perfect!",
                Some(&format!("That's the {}!", outcome.target.name)),
            );
            fx.announce("Great job!", self.praise_voice);
        } else {
            fx.notify(
                NotifyKind::Error,
                "Try again!",
                Some("Listen carefully and try once more!"),
            );
        }
        Some(outcome)
    }
}

impl Activity for SoundMode
{
    fn title(&self) -> &'static str
    {
        "Listen & Find"
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant, fx: &mut dyn Effects)
    {
        if self.rounds.status() == RoundStatus::Complete {
            if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.restart(now, fx);
            }
            return;
        }
        if self.board.handle_key(code) {
            return;
        }
        match code {
            KeyCode::Char('l') | KeyCode::Char('L') => self.play_prompt(fx),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.answer(self.board.cursor(), now, fx);
            }
            _ => {}
        }
    }

    fn update(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        for event in self.rounds.update(now) {
            match event {
                RoundEvent::Started { .. } => self.play_prompt(fx),
                RoundEvent::Completed { .. } => fx.celebrate(self.celebration),
                RoundEvent::TimedOut(_) => {}
            }
        }
    }

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        let total = self.rounds.total_rounds();
        let score = self.rounds.score();
        if self.rounds.status() == RoundStatus::Complete {
            lines.push(String::new());
            lines.push(paint("🎵 Game Complete! 🎵", GOLD));
            lines.push(format!("Your Score: {score} / {total}"));
            lines.push(
                verdict(
                    score,
                    total,
                    "Perfect listening! 🏆",
                    "Great job listening! 🎉",
                    "Keep practicing! 💪",
                )
                .to_string(),
            );
            lines.push(String::new());
            lines.push("Press r to play again.".to_string());
            return;
        }

        lines.push(format!(
            "Round {} of {}   {}",
            self.rounds.current_index() + 1,
            total,
            paint(&format!("Score: {score}"), GREEN)
        ));
        lines.push("🎧 Listen carefully and find the body part! (l: listen again)".to_string());
        if self.captions {
            if let Some(target) = self.rounds.current() {
                lines.push(paint(&format!("(Find the {})", target.name), GREY));
            }
        }
        self.board.render(&self.outline, lines);
    }
}
