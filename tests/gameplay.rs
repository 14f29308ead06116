use body_parts_fun::catalog::{self, PartRecord};
use body_parts_fun::engine::{
    Candidate, FlipOutcome, MemoryCard, PairEvent, PairMatchingEngine, Position, RoundEvent,
    RoundSequencer, RoundStatus, RoundTiming, SequenceOrder,
};
use std::time::{Duration, Instant};

static PART_A: PartRecord = PartRecord {
    id: "a",
    name: "A",
    position: Position::new(50.0, 50.0),
    emoji: "🅰️",
    description: "",
    fun_fact: "",
};

static PART_B: PartRecord = PartRecord {
    id: "b",
    name: "B",
    position: Position::new(10.0, 10.0),
    emoji: "🅱️",
    description: "",
    fun_fact: "",
};

#[test]
fn quiz_round_trip_with_near_miss_and_exact_hit()
{
    let start = Instant::now();
    let mut rounds = RoundSequencer::new(
        vec![&PART_A, &PART_B],
        SequenceOrder::Fixed,
        RoundTiming::uniform(Duration::from_secs(1)),
    );
    rounds.start(start);
    assert_eq!(rounds.current().map(|p| p.id), Some("a"));

    let first = rounds.submit(Candidate::Point(Position::new(52.0, 48.0)), start);
    assert!(first.is_some_and(|o| o.correct));
    assert_eq!(rounds.score(), 1);

    let events = rounds.update(start + Duration::from_secs(1));
    assert!(matches!(events.as_slice(), [RoundEvent::Started { index: 1, .. }]));
    assert_eq!(rounds.current().map(|p| p.id), Some("b"));

    let later = start + Duration::from_secs(1);
    let second = rounds.submit(Candidate::Point(Position::new(50.0, 50.0)), later);
    assert!(second.is_some_and(|o| !o.correct));
    assert_eq!(rounds.score(), 1);

    let events = rounds.update(later + Duration::from_secs(1));
    assert!(matches!(
        events.as_slice(),
        [RoundEvent::Completed { score: 1, rounds: 2 }]
    ));
    assert_eq!(rounds.status(), RoundStatus::Complete);
    assert_eq!(rounds.current_index(), 2);
}

#[test]
fn point_on_the_radius_is_a_miss()
{
    let now = Instant::now();
    let mut rounds = RoundSequencer::new(
        vec![&PART_A],
        SequenceOrder::Fixed,
        RoundTiming::uniform(Duration::from_secs(1)),
    );
    rounds.start(now);
    let outcome = rounds.submit(Candidate::Point(Position::new(65.0, 50.0)), now);
    assert!(outcome.is_some_and(|o| !o.correct));
}

#[test]
fn memory_mismatch_then_match()
{
    let start = Instant::now();
    let cards = vec![
        MemoryCard::new("a1", "a", "🅰️"),
        MemoryCard::new("a2", "a", "A"),
        MemoryCard::new("b1", "b", "🅱️"),
        MemoryCard::new("b2", "b", "B"),
    ];
    let mut memory = PairMatchingEngine::from_cards(cards, Duration::from_secs(1));

    assert_eq!(memory.flip("a1", start), FlipOutcome::Revealed);
    assert_eq!(memory.flip("b1", start), FlipOutcome::PairPending);
    assert_eq!(memory.flip("b2", start), FlipOutcome::Ignored);
    assert_eq!(memory.update(start + Duration::from_secs(1)), vec![PairEvent::Mismatched]);
    assert!(memory.cards().iter().all(|card| !card.is_face_up()));

    let later = start + Duration::from_secs(2);
    memory.flip("a1", later);
    memory.flip("a2", later);
    let events = memory.update(later + Duration::from_secs(1));
    assert_eq!(
        events,
        vec![PairEvent::Matched {
            pair_key: "a".to_string()
        }]
    );
    assert_eq!(memory.moves(), 2);
    assert_eq!(memory.matched_pairs(), 1);

    let last = later + Duration::from_secs(2);
    memory.flip("b2", last);
    memory.flip("b1", last);
    let events = memory.update(last + Duration::from_secs(1));
    assert_eq!(
        events,
        vec![
            PairEvent::Matched {
                pair_key: "b".to_string()
            },
            PairEvent::Completed { moves: 3 },
        ]
    );
    assert!(memory.is_complete());
    assert!(memory.update(last + Duration::from_secs(5)).is_empty());
}

#[test]
fn simon_timeout_fires_once_and_scores_nothing()
{
    let start = Instant::now();
    let mut rounds = RoundSequencer::new(
        catalog::all(),
        SequenceOrder::Shuffled,
        RoundTiming {
            correct_delay: Duration::from_millis(1500),
            wrong_delay: Duration::from_millis(2000),
        },
    )
    .with_round_limit(10)
    .with_countdown(5)
    .with_seed(42);
    rounds.start(start);
    assert_eq!(rounds.sequence().len(), 10);

    assert!(rounds.update(start + Duration::from_secs(4)).is_empty());
    assert_eq!(rounds.time_left(), Some(1));

    let events = rounds.update(start + Duration::from_secs(5));
    assert!(matches!(
        events.as_slice(),
        [RoundEvent::TimedOut(outcome)] if outcome.timed_out && outcome.points == 0
    ));
    assert_eq!(rounds.status(), RoundStatus::Wrong);
    assert!(rounds.submit(Candidate::Part("head"), start + Duration::from_secs(5)).is_none());
    assert!(rounds.update(start + Duration::from_millis(6500)).is_empty());

    let events = rounds.update(start + Duration::from_secs(7));
    assert!(matches!(events.as_slice(), [RoundEvent::Started { index: 1, .. }]));
    assert_eq!(rounds.score(), 0);
    assert_eq!(rounds.time_left(), Some(5));
}
