use crate::catalog::Part;
use crate::engine::proximity::{self, Position};
use crate::engine::schedule::Schedule;
use crate::engine::timer::{ReactionTimer, Tick};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus
{
    Ready,
    Active,
    Correct,
    Wrong,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceOrder
{
    /// The pool as given, which is catalog order for every built-in subset.
    Fixed,
    /// A fresh uniform permutation on every start.
    Shuffled,
}

/// What the player pointed at: a spot on the board, or a specific part marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate<'a>
{
    Point(Position),
    Part(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundTiming
{
    pub correct_delay: Duration,
    pub wrong_delay: Duration,
}

impl RoundTiming
{
    pub fn uniform(delay: Duration) -> Self
    {
        Self {
            correct_delay: delay,
            wrong_delay: delay,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundOutcome
{
    pub target: Part,
    pub correct: bool,
    pub points: u32,
    pub timed_out: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundEvent
{
    /// The countdown ran out before an answer arrived.
    TimedOut(RoundOutcome),
    Started
    {
        index: usize,
        target: Part,
    },
    Completed
    {
        score: u32,
        rounds: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Advance
{
    NextRound,
}

pub struct RoundSequencer
{
    pool: Vec<Part>,
    order: SequenceOrder,
    round_limit: Option<usize>,
    radius: f64,
    timing: RoundTiming,
    sequence: Vec<Part>,
    current_index: usize,
    score: u32,
    answered: bool,
    status: RoundStatus,
    timer: Option<ReactionTimer>,
    schedule: Schedule<Advance>,
    rng: StdRng,
}

impl RoundSequencer
{
    pub fn new(pool: Vec<Part>, order: SequenceOrder, timing: RoundTiming) -> Self
    {
        Self {
            pool,
            order,
            round_limit: None,
            radius: proximity::TOLERANCE_RADIUS,
            timing,
            sequence: Vec::new(),
            current_index: 0,
            score: 0,
            answered: false,
            status: RoundStatus::Ready,
            timer: None,
            schedule: Schedule::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self
    {
        self.radius = radius;
        self
    }

    pub fn with_round_limit(mut self, rounds: usize) -> Self
    {
        self.round_limit = Some(rounds);
        self
    }

    /// Adds a per-round countdown; correct answers then score `max(1, time_left)`.
    pub fn with_countdown(mut self, seconds: u32) -> Self
    {
        self.timer = Some(ReactionTimer::new(seconds));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self
    {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn start(&mut self, now: Instant)
    {
        self.schedule.cancel_all();
        self.score = 0;
        self.current_index = 0;
        self.answered = false;
        self.sequence = self.pool.clone();
        if self.order == SequenceOrder::Shuffled {
            self.sequence.shuffle(&mut self.rng);
        }
        if let Some(limit) = self.round_limit {
            self.sequence.truncate(limit);
        }
        if self.sequence.is_empty() {
            self.status = RoundStatus::Complete;
            return;
        }
        self.status = RoundStatus::Active;
        if let Some(timer) = self.timer.as_mut() {
            timer.restart(now);
        }
        log::debug!("rounds started: {} challenges", self.sequence.len());
    }

    pub fn reset(&mut self)
    {
        self.schedule.cancel_all();
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.sequence.clear();
        self.score = 0;
        self.current_index = 0;
        self.answered = false;
        self.status = RoundStatus::Ready;
    }

    /// Evaluates one answer for the current round. Returns `None` when the answer is
    /// ignored: the round is not active or it already has an answer pending.
    ///
    /// The countdown is brought up to `now` first. An answer arriving after it ran
    /// out resolves the round as a timeout instead, and that outcome is returned.
    pub fn submit(&mut self, candidate: Candidate<'_>, now: Instant) -> Option<RoundOutcome>
    {
        if self.status != RoundStatus::Active || self.answered {
            return None;
        }
        let target = self.current()?;
        let expired = self
            .timer
            .as_mut()
            .and_then(|timer| timer.poll(now))
            .is_some_and(|tick| tick == Tick::Expired);
        if expired {
            log::debug!("round {} timed out before the answer", self.current_index + 1);
            return Some(self.resolve(target, false, 0, true, now));
        }
        let correct = match candidate {
            Candidate::Point(point) => proximity::is_hit(target.position, point, self.radius),
            Candidate::Part(id) => id == target.id,
        };
        let points = match (correct, self.timer.as_ref()) {
            (false, _) => 0,
            (true, Some(timer)) => timer.points(),
            (true, None) => 1,
        };
        Some(self.resolve(target, correct, points, false, now))
    }

    pub fn update(&mut self, now: Instant) -> Vec<RoundEvent>
    {
        let mut events = Vec::new();

        if self.status == RoundStatus::Active && !self.answered {
            let expired = self
                .timer
                .as_mut()
                .and_then(|timer| timer.poll(now))
                .is_some_and(|tick| tick == Tick::Expired);
            if expired {
                if let Some(target) = self.current() {
                    log::debug!("round {} timed out", self.current_index + 1);
                    let outcome = self.resolve(target, false, 0, true, now);
                    events.push(RoundEvent::TimedOut(outcome));
                }
            }
        }

        for action in self.schedule.take_due(now) {
            match action {
                Advance::NextRound => events.push(self.advance(now)),
            }
        }

        events
    }

    fn resolve(
        &mut self,
        target: Part,
        correct: bool,
        points: u32,
        timed_out: bool,
        now: Instant,
    ) -> RoundOutcome
    {
        self.answered = true;
        self.score += points;
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        let delay = if correct {
            self.status = RoundStatus::Correct;
            self.timing.correct_delay
        } else {
            self.status = RoundStatus::Wrong;
            self.timing.wrong_delay
        };
        self.schedule.after(now, delay, Advance::NextRound);
        log::debug!(
            "round {} resolved: target={} correct={correct} points={points}",
            self.current_index + 1,
            target.id
        );
        RoundOutcome {
            target,
            correct,
            points,
            timed_out,
        }
    }

    fn advance(&mut self, now: Instant) -> RoundEvent
    {
        if self.current_index + 1 >= self.sequence.len() {
            self.current_index = self.sequence.len();
            self.status = RoundStatus::Complete;
            log::debug!("rounds complete: score {}", self.score);
            return RoundEvent::Completed {
                score: self.score,
                rounds: self.sequence.len(),
            };
        }
        self.current_index += 1;
        self.answered = false;
        self.status = RoundStatus::Active;
        if let Some(timer) = self.timer.as_mut() {
            timer.restart(now);
        }
        RoundEvent::Started {
            index: self.current_index,
            target: self.sequence[self.current_index],
        }
    }

    pub fn current(&self) -> Option<Part>
    {
        self.sequence.get(self.current_index).copied()
    }

    pub fn status(&self) -> RoundStatus
    {
        self.status
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    pub fn current_index(&self) -> usize
    {
        self.current_index
    }

    pub fn is_answered(&self) -> bool
    {
        self.answered
    }

    pub fn total_rounds(&self) -> usize
    {
        match self.status {
            RoundStatus::Ready => self
                .round_limit
                .map_or(self.pool.len(), |limit| limit.min(self.pool.len())),
            _ => self.sequence.len(),
        }
    }

    pub fn sequence(&self) -> &[Part]
    {
        &self.sequence
    }

    pub fn time_left(&self) -> Option<u32>
    {
        self.timer.as_ref().map(ReactionTimer::time_left)
    }

    pub fn has_pending(&self) -> bool
    {
        !self.schedule.is_idle()
    }
}
