use super::board::{self, Board};
use super::{Activity, verdict};
use crate::catalog;
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind};
use crate::engine::proximity::Position;
use crate::engine::rounds::{
    Candidate, RoundEvent, RoundOutcome, RoundSequencer, RoundStatus, RoundTiming, SequenceOrder,
};
use crate::terminal::{GOLD, GREEN, paint};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

pub struct QuizMode
{
    rounds: RoundSequencer,
    board: Board,
    outline: Vec<board::Marker>,
    celebration: Duration,
}

impl QuizMode
{
    pub fn new(config: &GameConfig, now: Instant) -> Self
    {
        let parts = catalog::subset(catalog::QUIZ_IDS);
        let timing = RoundTiming::uniform(Duration::from_millis(config.quiz.feedback_delay_ms));
        let mut rounds = RoundSequencer::new(parts, SequenceOrder::Fixed, timing)
            .with_radius(config.tolerance_radius);
        rounds.start(now);
        Self {
            rounds,
            board: Board::new(),
            outline: board::outline(&catalog::all()),
            celebration: config.celebration(),
        }
    }

    pub fn rounds(&self) -> &RoundSequencer
    {
        &self.rounds
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
                "🎉 Correct!",
                Some(&format!("That's the {}!", outcome.target.name)),
            );
        } else {
            fx.notify(
                NotifyKind::Error,
                "Try again next time!",
                Some(&format!("That's not the {}", outcome.target.name)),
            );
        }
        Some(outcome)
    }

    pub fn restart(&mut self, now: Instant)
    {
        self.rounds.start(now);
    }
}

impl Activity for QuizMode
{
    fn title(&self) -> &'static str
    {
        "Quiz Time"
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant, fx: &mut dyn Effects)
    {
        if self.rounds.status() == RoundStatus::Complete {
            if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.restart(now);
            }
            return;
        }
        if self.board.handle_key(code) {
            return;
        }
        if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.answer(self.board.cursor(), now, fx);
        }
    }

    fn update(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        for event in self.rounds.update(now) {
            if let RoundEvent::Completed { .. } = event {
                fx.celebrate(self.celebration);
            }
        }
    }

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        let total = self.rounds.total_rounds();
        let score = self.rounds.score();
        if self.rounds.status() == RoundStatus::Complete {
            lines.push(String::new());
            lines.push(paint("🌟 Quiz Complete! 🌟", GOLD));
            lines.push(format!("Your Score: {score} / {total}"));
            lines.push(
                verdict(
                    score,
                    total,
                    "Perfect! You're a body parts expert! 🏆",
                    "Great job! Keep learning! 🎉",
                    "Good try! Practice more! 💪",
                )
                .to_string(),
            );
            lines.push(String::new());
            lines.push("Press r to try again.".to_string());
            return;
        }

        lines.push(format!(
            "Question {} of {}   {}",
            self.rounds.current_index() + 1,
            total,
            paint(&format!("Score: {score}"), GREEN)
        ));
        if let Some(target) = self.rounds.current() {
            lines.push(paint(&format!("Where is the {}?", target.name), GOLD));
        }
        self.board.render(&self.outline, lines);
        if self.rounds.is_answered() {
            lines.push("Wait for the next question...".to_string());
        } else {
            lines.push("👆 Move with the arrows and press Enter to answer!".to_string());
        }
    }
}
