use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick
{
    Running(u32),
    Expired,
}

/// Per-round countdown with one-second resolution.
///
/// The timer only moves when driven: either explicitly through [`ReactionTimer::tick`]
/// or by [`ReactionTimer::poll`], which applies one tick for every whole second
/// elapsed since the round started. Once it expires it stays disarmed until the
/// next [`ReactionTimer::restart`].
#[derive(Debug)]
pub struct ReactionTimer
{
    start_seconds: u32,
    time_left: u32,
    next_tick: Option<Instant>,
}

impl ReactionTimer
{
    pub fn new(start_seconds: u32) -> Self
    {
        Self {
            start_seconds,
            time_left: start_seconds,
            next_tick: None,
        }
    }

    pub fn restart(&mut self, now: Instant)
    {
        self.time_left = self.start_seconds;
        self.next_tick = Some(now + TICK);
    }

    pub fn cancel(&mut self)
    {
        self.next_tick = None;
    }

    pub fn is_armed(&self) -> bool
    {
        self.next_tick.is_some()
    }

    pub fn time_left(&self) -> u32
    {
        self.time_left
    }

    pub fn start_seconds(&self) -> u32
    {
        self.start_seconds
    }

    /// Points awarded for a correct answer given right now.
    pub fn points(&self) -> u32
    {
        self.time_left.max(1)
    }

    pub fn tick(&mut self) -> Tick
    {
        if !self.is_armed() {
            return if self.time_left == 0 {
                Tick::Expired
            } else {
                Tick::Running(self.time_left)
            };
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.cancel();
            Tick::Expired
        } else {
            Tick::Running(self.time_left)
        }
    }

    /// Applies every tick that has come due. Returns `Some(Tick::Expired)` exactly
    /// once per round, the first time the countdown reaches zero.
    pub fn poll(&mut self, now: Instant) -> Option<Tick>
    {
        let mut last = None;
        while let Some(due) = self.next_tick {
            if due > now {
                break;
            }
            let tick = self.tick();
            if let Some(next) = self.next_tick.as_mut() {
                *next = due + TICK;
            }
            last = Some(tick);
        }
        last
    }
}
