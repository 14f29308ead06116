//! Body-part table shared by every activity.
//!
//! Coordinates are percentages of the board: `x` 0 is the far left, `y` 0 is the top.
//! Each activity picks its own subset by id; the subset keeps catalog order.

use crate::engine::proximity::Position;

#[derive(Debug, PartialEq)]
pub struct PartRecord
{
    pub id: &'static str,
    pub name: &'static str,
    pub position: Position,
    pub emoji: &'static str,
    pub description: &'static str,
    pub fun_fact: &'static str,
}

const fn part(
    id: &'static str,
    name: &'static str,
    x: f64,
    y: f64,
    emoji: &'static str,
    description: &'static str,
    fun_fact: &'static str,
) -> PartRecord
{
    PartRecord {
        id,
        name,
        position: Position::new(x, y),
        emoji,
        description,
        fun_fact,
    }
}

pub static CATALOG: [PartRecord; 29] = [
    part(
        "head",
        "Head",
        50.0,
        20.0,
        "🧠",
        "Your head is at the top of your body. It holds your amazing brain!",
        "Your brain controls everything you do!",
    ),
    part(
        "hair",
        "Hair",
        50.0,
        10.0,
        "💇",
        "Hair grows on top of your head and keeps it warm.",
        "Everyone's hair is different and special!",
    ),
    part(
        "eyes",
        "Left Eye",
        42.0,
        28.0,
        "👁️",
        "Your left eye helps you see the world around you!",
        "Your eyes blink about 20 times every minute!",
    ),
    part(
        "right-eye",
        "Right Eye",
        58.0,
        28.0,
        "👀",
        "Your right eye helps you see the world around you!",
        "Both eyes work together to help you see depth and distance!",
    ),
    part(
        "nose",
        "Nose",
        50.0,
        29.5,
        "👃",
        "Your nose helps you smell yummy food and flowers. You breathe through it too!",
        "Your nose can remember 50,000 different smells!",
    ),
    part(
        "mouth",
        "Mouth",
        50.0,
        36.0,
        "👄",
        "You use your mouth to eat, drink, talk, and smile!",
        "Your mouth has a tongue and teeth inside!",
    ),
    part(
        "ears",
        "Left Ear",
        29.0,
        31.0,
        "👂",
        "Your left ear helps you hear sounds from the left side!",
        "Your ears also help you balance when you walk!",
    ),
    part(
        "right-ear",
        "Right Ear",
        70.0,
        31.0,
        "🦻",
        "Your right ear helps you hear sounds from the right side!",
        "Both ears work together to help you locate where sounds come from!",
    ),
    part(
        "neck",
        "Neck",
        50.0,
        42.0,
        "🦒",
        "Your neck connects your head to your body and helps you turn your head.",
        "Your neck has special bones called vertebrae!",
    ),
    part(
        "shoulders",
        "Left Shoulder",
        40.0,
        45.0,
        "💪",
        "Your left shoulder helps your left arm move in all directions!",
        "Your shoulders can move in many directions!",
    ),
    part(
        "right-shoulder",
        "Right Shoulder",
        60.0,
        45.0,
        "🦾",
        "Your right shoulder helps your right arm move in all directions!",
        "Both shoulders work together to help you lift and carry things!",
    ),
    part(
        "chest",
        "Chest",
        50.0,
        52.0,
        "💓",
        "Your chest is in the middle of your body. Your heart and lungs are inside!",
        "Your heart beats about 100 times every minute!",
    ),
    part(
        "arms",
        "Left Arm",
        38.0,
        53.0,
        "🦾",
        "Your left arm helps you reach, hug, and carry things!",
        "Your arms have strong muscles and bones!",
    ),
    part(
        "right-arm",
        "Right Arm",
        62.0,
        53.0,
        "💪",
        "Your right arm helps you reach, hug, and carry things!",
        "Both arms work together to help you do amazing things!",
    ),
    part(
        "elbows",
        "Left Elbow",
        34.0,
        60.0,
        "🤸",
        "Your left elbow is in the middle of your left arm and helps it bend!",
        "Try touching your elbow with your tongue - you can't!",
    ),
    part(
        "right-elbow",
        "Right Elbow",
        65.0,
        60.0,
        "🙆",
        "Your right elbow is in the middle of your right arm and helps it bend!",
        "Your elbows are like hinges that let your arms fold!",
    ),
    part(
        "hands",
        "Left Hand",
        35.0,
        68.0,
        "✋",
        "Your left hand helps you hold things, write, and wave hello! It has 5 fingers.",
        "Your fingerprints are unique - no one else has the same!",
    ),
    part(
        "right-hand",
        "Right Hand",
        65.0,
        68.0,
        "🖐️",
        "Your right hand helps you hold things, write, and wave hello! It has 5 fingers.",
        "Most people are right-handed, but some are left-handed!",
    ),
    part(
        "belly",
        "Belly",
        50.0,
        62.0,
        "🫃",
        "Your belly is where your tummy is. Food goes here after you eat!",
        "Your belly button is where you were connected to your mom before you were born!",
    ),
    part(
        "back",
        "Back",
        85.0,
        55.0,
        "↩️",
        "Your back is behind you. It has your spine that keeps you standing tall!",
        "Your spine is made of 33 small bones!",
    ),
    part(
        "legs",
        "Left Leg",
        42.0,
        84.0,
        "🦵",
        "Your left leg helps you walk, run, jump, and dance!",
        "Your leg bones are the strongest bones in your body!",
    ),
    part(
        "right-leg",
        "Right Leg",
        58.0,
        84.0,
        "🚶",
        "Your right leg helps you walk, run, jump, and dance!",
        "Both legs work together to keep you balanced and moving!",
    ),
    part(
        "thighs",
        "Left Thigh",
        42.0,
        70.0,
        "🍗",
        "Your left thigh is the upper part of your left leg with strong muscles!",
        "Your thigh has the longest bone in your body called the femur!",
    ),
    part(
        "right-thigh",
        "Right Thigh",
        58.0,
        70.0,
        "🤾",
        "Your right thigh is the upper part of your right leg with strong muscles!",
        "Both thighs work together to help you run, jump, and climb!",
    ),
    part(
        "knees",
        "Left Knee",
        42.0,
        77.0,
        "🦿",
        "Your left knee is in the middle of your left leg and helps it bend!",
        "Your knees are protected by a special bone called a kneecap!",
    ),
    part(
        "right-knee",
        "Right Knee",
        58.0,
        77.0,
        "🏃",
        "Your right knee is in the middle of your right leg and helps it bend!",
        "Both knees work like hinges to help you walk and run!",
    ),
    part(
        "feet",
        "Left Foot",
        42.0,
        90.0,
        "🦶",
        "Your left foot helps you stand and walk. It has 5 toes!",
        "You have 26 bones in each foot!",
    ),
    part(
        "right-foot",
        "Right Foot",
        58.0,
        90.0,
        "👟",
        "Your right foot helps you stand and walk. It has 5 toes!",
        "Both feet work together to help you balance and move!",
    ),
    part(
        "toes",
        "Toes",
        50.0,
        100.0,
        "👣",
        "Your toes are at the end of your feet. They help you balance!",
        "Your big toe is the strongest toe!",
    ),
];

pub const QUIZ_IDS: &[&str] = &[
    "head",
    "eyes",
    "right-eye",
    "nose",
    "mouth",
    "ears",
    "right-ear",
    "shoulders",
    "right-shoulder",
    "arms",
    "right-arm",
    "hands",
    "right-hand",
    "belly",
    "legs",
    "right-leg",
    "thighs",
    "right-thigh",
    "knees",
    "right-knee",
    "feet",
    "right-foot",
];

pub const MATCH_IDS: &[&str] = &[
    "head",
    "eyes",
    "right-eye",
    "ears",
    "right-ear",
    "nose",
    "mouth",
    "arms",
    "right-arm",
    "hands",
    "right-hand",
    "belly",
    "legs",
    "right-leg",
    "thighs",
    "right-thigh",
    "knees",
    "right-knee",
    "feet",
    "right-foot",
];

pub const SOUND_IDS: &[&str] = &[
    "head", "eyes", "nose", "mouth", "ears", "arms", "hands", "belly", "legs", "feet",
];

pub const MEMORY_IDS: &[&str] = &["head", "eyes", "nose", "mouth", "hands", "feet"];

pub type Part = &'static PartRecord;

pub fn all() -> Vec<Part>
{
    CATALOG.iter().collect()
}

pub fn find(id: &str) -> Option<Part>
{
    CATALOG.iter().find(|part| part.id == id)
}

/// Parts whose id is listed in `ids`, in catalog order.
pub fn subset(ids: &[&str]) -> Vec<Part>
{
    debug_assert!(
        ids.iter().all(|id| find(id).is_some()),
        "subset references an id missing from the catalog"
    );
    CATALOG
        .iter()
        .filter(|part| ids.contains(&part.id))
        .collect()
}

/// Closest part strictly inside `radius` of `point`. Earlier entries win ties.
pub fn nearest_within(parts: &[Part], point: Position, radius: f64) -> Option<Part>
{
    let mut best: Option<(Part, f64)> = None;
    for &part in parts {
        let distance = part.position.distance_to(point);
        if distance >= radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((part, distance)),
        }
    }
    best.map(|(part, _)| part)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::engine::proximity::TOLERANCE_RADIUS;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique()
    {
        let ids: HashSet<&str> = CATALOG.iter().map(|part| part.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn every_subset_id_exists()
    {
        for ids in [QUIZ_IDS, MATCH_IDS, SOUND_IDS, MEMORY_IDS] {
            for id in ids {
                assert!(find(id).is_some(), "missing catalog id {id}");
            }
            assert_eq!(subset(ids).len(), ids.len());
        }
    }

    #[test]
    fn positions_are_on_the_board()
    {
        for part in CATALOG.iter() {
            assert!((0.0..=100.0).contains(&part.position.x), "{}", part.id);
            assert!((0.0..=100.0).contains(&part.position.y), "{}", part.id);
        }
    }

    #[test]
    fn subset_keeps_catalog_order()
    {
        let parts = subset(&["feet", "head", "nose"]);
        let ids: Vec<&str> = parts.iter().map(|part| part.id).collect();
        assert_eq!(ids, vec!["head", "nose", "feet"]);
    }

    #[test]
    fn nearest_picks_the_closest_marker()
    {
        let parts = all();
        let near_nose = Position::new(50.0, 30.0);
        assert_eq!(
            nearest_within(&parts, near_nose, TOLERANCE_RADIUS).map(|p| p.id),
            Some("nose")
        );
        let nowhere = Position::new(5.0, 5.0);
        assert!(nearest_within(&parts, nowhere, TOLERANCE_RADIUS).is_none());
    }
}
