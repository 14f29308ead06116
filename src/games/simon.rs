use super::Activity;
use super::board::{self, Board};
use crate::catalog::{self, Part};
use crate::config::GameConfig;
use crate::effects::{Effects, NotifyKind};
use crate::engine::proximity::Position;
use crate::engine::rounds::{
    Candidate, RoundEvent, RoundOutcome, RoundSequencer, RoundStatus, RoundTiming, SequenceOrder,
};
use crate::terminal::{GOLD, GREEN, RED, paint};
use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

const PRAISE: [&str; 5] = [
    "🎉 Awesome! You found it!",
    "⭐ Perfect! Great job!",
    "🌟 Amazing! You're so smart!",
    "💫 Fantastic! Keep going!",
    "🏆 Brilliant! You did it!",
];

pub struct SimonMode
{
    rounds: RoundSequencer,
    parts: Vec<Part>,
    board: Board,
    outline: Vec<board::Marker>,
    radius: f64,
    streak: u32,
    message: Option<String>,
    last_points: u32,
    rng: StdRng,
    celebration: Duration,
}

impl SimonMode
{
    pub fn new(config: &GameConfig) -> Self
    {
        Self::build(config, config_sequencer(config), StdRng::from_entropy())
    }

    pub fn with_seed(config: &GameConfig, seed: u64) -> Self
    {
        Self::build(
            config,
            config_sequencer(config).with_seed(seed),
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(config: &GameConfig, rounds: RoundSequencer, rng: StdRng) -> Self
    {
        let parts = catalog::all();
        Self {
            rounds,
            outline: board::outline(&parts),
            parts,
            board: Board::new(),
            radius: config.tolerance_radius,
            streak: 0,
            message: None,
            last_points: 0,
            rng,
            celebration: config.celebration(),
        }
    }

    pub fn rounds(&self) -> &RoundSequencer
    {
        &self.rounds
    }

    pub fn streak(&self) -> u32
    {
        self.streak
    }

    pub fn start(&mut self, now: Instant)
    {
        self.streak = 0;
        self.message = None;
        self.rounds.start(now);
    }

    /// Back to the ready screen; anything still scheduled is dropped.
    pub fn reset(&mut self)
    {
        self.streak = 0;
        self.message = None;
        self.rounds.reset();
    }

    /// Picks whichever marker sits under `point`. Empty space is not an answer.
    pub fn pick(
        &mut self,
        point: Position,
        now: Instant,
        fx: &mut dyn Effects,
    ) -> Option<RoundOutcome>
    {
        if self.rounds.status() != RoundStatus::Active {
            return None;
        }
        let Some(part) = catalog::nearest_within(&self.parts, point, self.radius) else {
            fx.notify(NotifyKind::Info, "Move onto a body part marker!", None);
            return None;
        };
        self.pick_part(part.id, now, fx)
    }

    pub fn pick_part(
        &mut self,
        id: &str,
        now: Instant,
        fx: &mut dyn Effects,
    ) -> Option<RoundOutcome>
    {
        let outcome = self.rounds.submit(Candidate::Part(id), now)?;
        self.record(outcome, fx);
        Some(outcome)
    }

    fn record(&mut self, outcome: RoundOutcome, fx: &mut dyn Effects)
    {
        if outcome.correct {
            self.streak += 1;
            self.last_points = outcome.points;
            let praise = PRAISE.choose(&mut self.rng).copied().unwrap_or(PRAISE[0]);
            fx.notify(
                NotifyKind::Success,
                praise,
                Some(&format!("+{} pts!", outcome.points)),
            );
            self.message = Some(praise.to_string());
        } else {
            self.streak = 0;
            self.last_points = 0;
            let message = format!(
                "Oops! That was the {}. Try again next time!",
                outcome.target.name
            );
            fx.notify(NotifyKind::Error, &message, None);
            self.message = Some(message);
        }
    }
}

fn config_sequencer(config: &GameConfig) -> RoundSequencer
{
    let timing = RoundTiming {
        correct_delay: Duration::from_millis(config.simon.correct_delay_ms),
        wrong_delay: Duration::from_millis(config.simon.wrong_delay_ms),
    };
    RoundSequencer::new(catalog::all(), SequenceOrder::Shuffled, timing)
        .with_radius(config.tolerance_radius)
        .with_round_limit(config.simon.rounds)
        .with_countdown(config.simon.countdown_secs)
}

pub fn verdict(score: u32) -> &'static str
{
    match score {
        40.. => "🌟 Outstanding!",
        30.. => "⭐ Great job!",
        20.. => "👍 Good work!",
        _ => "💪 Nice try!",
    }
}

impl Activity for SimonMode
{
    fn title(&self) -> &'static str
    {
        "Simon Says"
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant, fx: &mut dyn Effects)
    {
        match self.rounds.status() {
            RoundStatus::Ready => {
                if matches!(code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.start(now);
                }
            }
            RoundStatus::Complete => {
                if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.reset();
                }
            }
            _ => {
                if self.board.handle_key(code) {
                    return;
                }
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.pick(self.board.cursor(), now, fx);
                }
            }
        }
    }

    fn update(&mut self, now: Instant, fx: &mut dyn Effects)
    {
        for event in self.rounds.update(now) {
            match event {
                RoundEvent::TimedOut(outcome) => self.record(outcome, fx),
                RoundEvent::Started { .. } => self.message = None,
                RoundEvent::Completed { score, rounds } => {
                    log::info!("simon finished: {score} points over {rounds} rounds");
                    fx.celebrate(self.celebration);
                }
            }
        }
    }

    fn render(&self, _now: Instant, lines: &mut Vec<String>)
    {
        let score = self.rounds.score();
        let total = self.rounds.total_rounds();
        lines.push(format!(
            "{}   Streak: {}",
            paint(&format!("Score: {score}"), GREEN),
            self.streak
        ));

        match self.rounds.status() {
            RoundStatus::Ready => {
                lines.push(String::new());
                lines.push(paint("🎮 Simon Says!", GOLD));
                lines.push("Simon will call out a body part.".to_string());
                lines.push("Find it before the timer runs out!".to_string());
                lines.push(format!("{total} rounds. Faster answers score more points."));
                lines.push(String::new());
                lines.push("Press Space to start.".to_string());
            }
            RoundStatus::Complete => {
                lines.push(String::new());
                lines.push(paint("🏆 Game Over!", GOLD));
                lines.push(format!("{score} pts"));
                lines.push(verdict(score).to_string());
                lines.push(String::new());
                lines.push("Press r to play again.".to_string());
            }
            status => {
                let round = (self.rounds.current_index() + 1).min(total);
                if let Some(target) = self.rounds.current() {
                    let time_left = self.rounds.time_left().unwrap_or(0);
                    let timer = format!("{time_left}s");
                    let timer = if time_left <= 2 { paint(&timer, RED) } else { timer };
                    lines.push(format!(
                        "Simon Says: {} Find the {}!   Round {round}/{total}   ⏱ {timer}",
                        target.emoji, target.name
                    ));
                }
                match (status, &self.message) {
                    (RoundStatus::Correct, Some(message)) => {
                        lines.push(paint(&format!("{message}  +{} pts!", self.last_points), GREEN));
                    }
                    (RoundStatus::Wrong, Some(message)) => lines.push(paint(message, RED)),
                    _ => lines.push(String::new()),
                }
                self.board.render(&self.outline, lines);
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::effects::RecordingEffects;

    #[test]
    fn waits_on_ready_screen()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut simon = SimonMode::with_seed(&GameConfig::default(), 3);
        assert_eq!(simon.rounds().status(), RoundStatus::Ready);
        assert!(simon.pick_part("head", now, &mut fx).is_none());
        simon.handle_key(KeyCode::Char(' '), now, &mut fx);
        assert_eq!(simon.rounds().status(), RoundStatus::Active);
        assert_eq!(simon.rounds().total_rounds(), 10);
        assert_eq!(simon.rounds().time_left(), Some(5));
    }

    #[test]
    fn fast_answer_scores_remaining_time()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut simon = SimonMode::with_seed(&GameConfig::default(), 11);
        simon.start(now);
        let target = simon.rounds().current().map(|part| part.id).unwrap_or("head");
        let outcome = simon.pick_part(target, now, &mut fx);
        assert_eq!(outcome.map(|o| o.points), Some(5));
        assert_eq!(simon.streak(), 1);
        assert_eq!(fx.notifications(NotifyKind::Success).len(), 1);
    }

    #[test]
    fn wrong_pick_breaks_streak()
    {
        let mut now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut simon = SimonMode::with_seed(&GameConfig::default(), 11);
        simon.start(now);
        let target = simon.rounds().current().map(|part| part.id).unwrap_or("head");
        simon.pick_part(target, now, &mut fx);
        now += Duration::from_millis(1500);
        simon.update(now, &mut fx);
        let next = simon.rounds().current().map(|part| part.id).unwrap_or("head");
        let wrong = if next == "nose" { "feet" } else { "nose" };
        let outcome = simon.pick_part(wrong, now, &mut fx);
        assert!(outcome.is_some_and(|o| !o.correct && o.points == 0));
        assert_eq!(simon.streak(), 0);
        assert_eq!(fx.notifications(NotifyKind::Error).len(), 1);
    }

    #[test]
    fn pick_after_countdown_counts_as_timeout()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut simon = SimonMode::with_seed(&GameConfig::default(), 11);
        simon.start(now);
        let target = simon.rounds().current().map(|part| part.id).unwrap_or("head");
        let late = now + Duration::from_secs(6);
        let outcome = simon.pick_part(target, late, &mut fx);
        assert!(outcome.is_some_and(|o| o.timed_out && o.points == 0));
        assert_eq!(simon.rounds().score(), 0);
        assert_eq!(simon.streak(), 0);
        simon.update(late, &mut fx);
        assert_eq!(fx.notifications(NotifyKind::Error).len(), 1);
        assert!(fx.notifications(NotifyKind::Success).is_empty());
    }

    #[test]
    fn reset_returns_to_ready()
    {
        let now = Instant::now();
        let mut fx = RecordingEffects::default();
        let mut simon = SimonMode::with_seed(&GameConfig::default(), 1);
        simon.start(now);
        simon.pick_part("head", now, &mut fx);
        simon.reset();
        let logged = fx.log.len();
        simon.update(now + Duration::from_secs(10), &mut fx);
        assert_eq!(simon.rounds().status(), RoundStatus::Ready);
        assert_eq!(simon.rounds().score(), 0);
        assert_eq!(fx.log.len(), logged);
    }

    #[test]
    fn verdict_bands()
    {
        assert_eq!(verdict(45), "🌟 Outstanding!");
        assert_eq!(verdict(30), "⭐ Great job!");
        assert_eq!(verdict(20), "👍 Good work!");
        assert_eq!(verdict(19), "💪 Nice try!");
    }
}
