//! Headless game engines. Nothing in here touches the terminal; every deferred
//! transition is driven by the owner calling `update(now)`.

pub mod pairs;
pub mod proximity;
pub mod rounds;
pub mod schedule;
pub mod selection;
pub mod timer;

pub use pairs::{FlipOutcome, MemoryCard, PairEvent, PairMatchingEngine};
pub use proximity::{Position, TOLERANCE_RADIUS, is_hit};
pub use rounds::{
    Candidate, RoundEvent, RoundOutcome, RoundSequencer, RoundStatus, RoundTiming, SequenceOrder,
};
pub use schedule::Schedule;
pub use selection::{InteractionStyle, SelectionMatchEngine, SourceOutcome, TargetOutcome};
pub use timer::{ReactionTimer, Tick};
