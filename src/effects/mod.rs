//! Fire-and-forget feedback: speech, toasts and the celebration banner.
//!
//! Activities only talk to the [`Effects`] trait. None of these calls can fail from
//! the caller's point of view; a missing speech engine just means silence.

mod speech;

pub use speech::Speaker;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_millis(2500);
const MAX_TOASTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice
{
    pub rate: f32,
    pub pitch: f32,
}

impl Voice
{
    pub const fn new(rate: f32, pitch: f32) -> Self
    {
        Self { rate, pitch }
    }
}

impl Default for Voice
{
    fn default() -> Self
    {
        Self::new(1.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind
{
    Success,
    Error,
    Info,
}

pub trait Effects
{
    fn announce(&mut self, text: &str, voice: Voice);
    fn notify(&mut self, kind: NotifyKind, message: &str, description: Option<&str>);
    fn celebrate(&mut self, duration: Duration);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast
{
    pub kind: NotifyKind,
    pub message: String,
    pub description: Option<String>,
    expires: Instant,
}

/// Effects rendered by the full-screen UI.
pub struct TerminalEffects
{
    speaker: Option<Speaker>,
    toasts: VecDeque<Toast>,
    celebrating_until: Option<Instant>,
}

impl TerminalEffects
{
    pub fn new(speaker: Option<Speaker>) -> Self
    {
        Self {
            speaker,
            toasts: VecDeque::new(),
            celebrating_until: None,
        }
    }

    pub fn speech_label(&self) -> &str
    {
        self.speaker.as_ref().map_or("off", Speaker::program)
    }

    pub fn prune(&mut self, now: Instant)
    {
        self.toasts.retain(|toast| toast.expires > now);
        if self.celebrating_until.is_some_and(|until| until <= now) {
            self.celebrating_until = None;
        }
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast>
    {
        self.toasts.iter()
    }

    pub fn is_celebrating(&self, now: Instant) -> bool
    {
        self.celebrating_until.is_some_and(|until| until > now)
    }

    /// Leaving an activity drops its feedback so nothing leaks into the next one.
    pub fn clear(&mut self)
    {
        self.toasts.clear();
        self.celebrating_until = None;
    }
}

impl Effects for TerminalEffects
{
    fn announce(&mut self, text: &str, voice: Voice)
    {
        if let Some(speaker) = self.speaker.as_mut() {
            speaker.say(text, voice);
        }
    }

    fn notify(&mut self, kind: NotifyKind, message: &str, description: Option<&str>)
    {
        while self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message: message.to_string(),
            description: description.map(str::to_string),
            expires: Instant::now() + TOAST_TTL,
        });
    }

    fn celebrate(&mut self, duration: Duration)
    {
        self.celebrating_until = Some(Instant::now() + duration);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Recorded
{
    Announce(String, Voice),
    Notify(NotifyKind, String, Option<String>),
    Celebrate(Duration),
}

/// Keeps every effect request in order. Used by headless drivers and tests.
#[derive(Debug, Default)]
pub struct RecordingEffects
{
    pub log: Vec<Recorded>,
}

impl RecordingEffects
{
    pub fn announcements(&self) -> Vec<&str>
    {
        self.log
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Announce(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self, kind: NotifyKind) -> Vec<&str>
    {
        self.log
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Notify(entry_kind, message, _) if *entry_kind == kind => {
                    Some(message.as_str())
                }
                _ => None,
            })
            .collect()
    }

    pub fn celebrations(&self) -> usize
    {
        self.log
            .iter()
            .filter(|entry| matches!(entry, Recorded::Celebrate(_)))
            .count()
    }
}

impl Effects for RecordingEffects
{
    fn announce(&mut self, text: &str, voice: Voice)
    {
        self.log.push(Recorded::Announce(text.to_string(), voice));
    }

    fn notify(&mut self, kind: NotifyKind, message: &str, description: Option<&str>)
    {
        self.log.push(Recorded::Notify(
            kind,
            message.to_string(),
            description.map(str::to_string),
        ));
    }

    fn celebrate(&mut self, duration: Duration)
    {
        self.log.push(Recorded::Celebrate(duration));
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn toasts_are_capped()
    {
        let mut effects = TerminalEffects::new(None);
        for i in 0..5 {
            effects.notify(NotifyKind::Info, &format!("toast {i}"), None);
        }
        let messages: Vec<&str> = effects.toasts().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn toasts_and_celebration_expire()
    {
        let mut effects = TerminalEffects::new(None);
        effects.notify(NotifyKind::Success, "Correct!", Some("That's the Head!"));
        effects.celebrate(Duration::from_millis(100));
        let now = Instant::now();
        assert!(effects.is_celebrating(now));
        effects.prune(now + Duration::from_secs(10));
        assert_eq!(effects.toasts().count(), 0);
        assert!(!effects.is_celebrating(now + Duration::from_secs(10)));
    }

    #[test]
    fn announce_without_speaker_is_silent()
    {
        let mut effects = TerminalEffects::new(None);
        effects.announce("Head", Voice::new(0.8, 1.0));
        assert_eq!(effects.speech_label(), "off");
    }
}
