//! Memory-card deck: two cards per concept, flipped two at a time.
//!
//! A pair attempt moves `Idle -> OneUp -> Resolving`. While resolving, every flip
//! is ignored until the scheduled resolution runs.

use crate::catalog::Part;
use crate::engine::schedule::Schedule;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

pub const RESOLVE_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace
{
    Down,
    Up,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryCard
{
    pub card_id: String,
    pub pair_key: String,
    pub content: String,
    face: CardFace,
}

impl MemoryCard
{
    pub fn new(
        card_id: impl Into<String>,
        pair_key: impl Into<String>,
        content: impl Into<String>,
    ) -> Self
    {
        Self {
            card_id: card_id.into(),
            pair_key: pair_key.into(),
            content: content.into(),
            face: CardFace::Down,
        }
    }

    pub fn face(&self) -> CardFace
    {
        self.face
    }

    /// Matched cards stay visible, so they count as face up.
    pub fn is_face_up(&self) -> bool
    {
        self.face != CardFace::Down
    }

    pub fn is_matched(&self) -> bool
    {
        self.face == CardFace::Matched
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn
{
    Idle,
    OneUp(usize),
    Resolving(usize, usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome
{
    Ignored,
    Revealed,
    /// Second card of the attempt is up; a resolution has been scheduled.
    PairPending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairEvent
{
    Matched
    {
        pair_key: String,
    },
    Mismatched,
    Completed
    {
        moves: u32,
    },
}

#[derive(Debug)]
pub struct PairMatchingEngine
{
    cards: Vec<MemoryCard>,
    turn: Turn,
    moves: u32,
    completed: bool,
    resolve_delay: Duration,
    schedule: Schedule<(usize, usize)>,
}

impl PairMatchingEngine
{
    /// Builds an unshuffled engine over the given cards.
    pub fn from_cards(cards: Vec<MemoryCard>, resolve_delay: Duration) -> Self
    {
        Self {
            cards,
            turn: Turn::Idle,
            moves: 0,
            completed: false,
            resolve_delay,
            schedule: Schedule::new(),
        }
    }

    pub fn new(parts: &[Part], resolve_delay: Duration, rng: &mut impl Rng) -> Self
    {
        let mut engine = Self::from_cards(Vec::new(), resolve_delay);
        engine.initialize(parts, rng);
        engine
    }

    /// Deals a fresh shuffled deck: an emoji card and a name card for every part.
    pub fn initialize(&mut self, parts: &[Part], rng: &mut impl Rng)
    {
        let mut cards = Vec::with_capacity(parts.len() * 2);
        for part in parts {
            cards.push(MemoryCard::new(format!("{}-emoji", part.id), part.id, part.emoji));
            cards.push(MemoryCard::new(format!("{}-name", part.id), part.id, part.name));
        }
        cards.shuffle(rng);
        self.cards = cards;
        self.turn = Turn::Idle;
        self.moves = 0;
        self.completed = false;
        self.schedule.cancel_all();
        log::debug!("memory deck dealt: {} cards", self.cards.len());
    }

    pub fn flip(&mut self, card_id: &str, now: Instant) -> FlipOutcome
    {
        if matches!(self.turn, Turn::Resolving(..)) {
            return FlipOutcome::Ignored;
        }
        let Some(index) = self.cards.iter().position(|card| card.card_id == card_id) else {
            return FlipOutcome::Ignored;
        };
        if self.cards[index].face != CardFace::Down {
            return FlipOutcome::Ignored;
        }

        self.cards[index].face = CardFace::Up;
        match self.turn {
            Turn::Idle => {
                self.turn = Turn::OneUp(index);
                FlipOutcome::Revealed
            }
            Turn::OneUp(first) => {
                self.turn = Turn::Resolving(first, index);
                self.moves += 1;
                self.schedule.after(now, self.resolve_delay, (first, index));
                FlipOutcome::PairPending
            }
            Turn::Resolving(..) => FlipOutcome::Ignored,
        }
    }

    pub fn update(&mut self, now: Instant) -> Vec<PairEvent>
    {
        let mut events = Vec::new();
        for (first, second) in self.schedule.take_due(now) {
            if self.cards[first].pair_key == self.cards[second].pair_key {
                self.cards[first].face = CardFace::Matched;
                self.cards[second].face = CardFace::Matched;
                log::debug!("pair matched: {}", self.cards[first].pair_key);
                events.push(PairEvent::Matched {
                    pair_key: self.cards[first].pair_key.clone(),
                });
                if !self.completed && self.cards.iter().all(MemoryCard::is_matched) {
                    self.completed = true;
                    events.push(PairEvent::Completed { moves: self.moves });
                }
            } else {
                self.cards[first].face = CardFace::Down;
                self.cards[second].face = CardFace::Down;
                events.push(PairEvent::Mismatched);
            }
            self.turn = Turn::Idle;
        }
        events
    }

    pub fn cards(&self) -> &[MemoryCard]
    {
        &self.cards
    }

    pub fn card(&self, card_id: &str) -> Option<&MemoryCard>
    {
        self.cards.iter().find(|card| card.card_id == card_id)
    }

    pub fn moves(&self) -> u32
    {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize
    {
        self.cards.iter().filter(|card| card.is_matched()).count() / 2
    }

    pub fn total_pairs(&self) -> usize
    {
        self.cards.len() / 2
    }

    pub fn is_resolving(&self) -> bool
    {
        matches!(self.turn, Turn::Resolving(..))
    }

    pub fn is_complete(&self) -> bool
    {
        self.completed
    }
}
