use crate::engine::proximity::TOLERANCE_RADIUS;
use crate::engine::selection::InteractionStyle;
use clap::ValueEnum;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

pub const CONFIG_ENV: &str = "BODYPARTS_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuizConfig
{
    pub feedback_delay_ms: u64,
}
impl Default for QuizConfig
{
    fn default() -> Self
    {
        Self {
            feedback_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SoundConfig
{
    pub feedback_delay_ms: u64,
    pub announce_rate: f32,
    pub announce_pitch: f32,
    pub praise_rate: f32,
}
impl Default for SoundConfig
{
    fn default() -> Self
    {
        Self {
            feedback_delay_ms: 1500,
            announce_rate: 0.8,
            announce_pitch: 1.2,
            praise_rate: 0.9,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MemoryConfig
{
    pub resolve_delay_ms: u64,
}
impl Default for MemoryConfig
{
    fn default() -> Self
    {
        Self {
            resolve_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimonConfig
{
    pub rounds: usize,
    pub countdown_secs: u32,
    pub correct_delay_ms: u64,
    pub wrong_delay_ms: u64,
}
impl Default for SimonConfig
{
    fn default() -> Self
    {
        Self {
            rounds: 10,
            countdown_secs: 5,
            correct_delay_ms: 1500,
            wrong_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LearnConfig
{
    pub announce_rate: f32,
}
impl Default for LearnConfig
{
    fn default() -> Self
    {
        Self { announce_rate: 0.8 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CelebrationConfig
{
    pub duration_ms: u64,
}
impl Default for CelebrationConfig
{
    fn default() -> Self
    {
        Self { duration_ms: 5000 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig
{
    pub enabled: bool,
    /// Empty means pick the first engine found on `PATH`.
    pub command: String,
}
impl Default for SpeechConfig
{
    fn default() -> Self
    {
        Self {
            enabled: true,
            command: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchStyle
{
    Drag,
    #[default]
    Tap,
}

impl From<MatchStyle> for InteractionStyle
{
    fn from(style: MatchStyle) -> Self
    {
        match style {
            MatchStyle::Drag => InteractionStyle::Drag,
            MatchStyle::Tap => InteractionStyle::Tap,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MatchingConfig
{
    pub style: MatchStyle,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig
{
    pub tolerance_radius: f64,
    pub quiz: QuizConfig,
    pub sound: SoundConfig,
    pub memory: MemoryConfig,
    pub simon: SimonConfig,
    pub learn: LearnConfig,
    pub celebration: CelebrationConfig,
    pub speech: SpeechConfig,
    pub matching: MatchingConfig,
}

impl Default for GameConfig
{
    fn default() -> Self
    {
        Self {
            tolerance_radius: TOLERANCE_RADIUS,
            quiz: QuizConfig::default(),
            sound: SoundConfig::default(),
            memory: MemoryConfig::default(),
            simon: SimonConfig::default(),
            learn: LearnConfig::default(),
            celebration: CelebrationConfig::default(),
            speech: SpeechConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

impl GameConfig
{
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String>
    {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        toml::from_str(&data).map_err(|e| format!("parse TOML: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>)
    {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String>
    {
        let mut warnings = Vec::new();
        if !(self.tolerance_radius > 0.0) {
            warnings.push(format!(
                "tolerance_radius must be > 0 (got {}), using {TOLERANCE_RADIUS}",
                self.tolerance_radius
            ));
        }
        if self.simon.rounds == 0 {
            warnings.push("simon.rounds must be > 0".to_string());
        }
        if self.simon.countdown_secs == 0 {
            warnings.push("simon.countdown_secs must be > 0".to_string());
        }
        if self.sound.announce_rate <= 0.0 || self.learn.announce_rate <= 0.0 {
            warnings.push("announce_rate must be > 0".to_string());
        }
        warnings
    }

    /// Copy with every value `validate` complains about replaced by its default.
    pub fn sanitized(mut self) -> Self
    {
        if !(self.tolerance_radius > 0.0) {
            self.tolerance_radius = TOLERANCE_RADIUS;
        }
        let simon = SimonConfig::default();
        if self.simon.rounds == 0 {
            self.simon.rounds = simon.rounds;
        }
        if self.simon.countdown_secs == 0 {
            self.simon.countdown_secs = simon.countdown_secs;
        }
        if self.sound.announce_rate <= 0.0 {
            self.sound.announce_rate = SoundConfig::default().announce_rate;
        }
        if self.learn.announce_rate <= 0.0 {
            self.learn.announce_rate = LearnConfig::default().announce_rate;
        }
        self
    }

    pub fn celebration(&self) -> Duration
    {
        Duration::from_millis(self.celebration.duration_ms)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_games()
    {
        let cfg = GameConfig::default();
        assert_eq!(cfg.tolerance_radius, 15.0);
        assert_eq!(cfg.simon.rounds, 10);
        assert_eq!(cfg.simon.countdown_secs, 5);
        assert_eq!(cfg.quiz.feedback_delay_ms, 1000);
        assert_eq!(cfg.sound.feedback_delay_ms, 1500);
        assert_eq!(cfg.memory.resolve_delay_ms, 1000);
        assert_eq!(cfg.matching.style, MatchStyle::Tap);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn load_or_default_missing_file()
    {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.toml");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults()
    {
        let sample = r#"
            tolerance_radius = 20.0

            [simon]
            rounds = 4

            [matching]
            style = "drag"
        "#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert!(err.is_none(), "unexpected error: {err:?}");
        assert_eq!(cfg.tolerance_radius, 20.0);
        assert_eq!(cfg.simon.rounds, 4);
        assert_eq!(cfg.simon.countdown_secs, 5);
        assert_eq!(cfg.matching.style, MatchStyle::Drag);
        assert_eq!(cfg.quiz, QuizConfig::default());
    }

    #[test]
    fn malformed_file_reports_parse_error()
    {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"tolerance_radius = \"wide\"").unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert!(err.is_some_and(|e| e.starts_with("parse TOML")));
        assert_eq!(cfg.tolerance_radius, TOLERANCE_RADIUS);
    }

    #[test]
    fn sanitized_replaces_invalid_values()
    {
        let mut cfg = GameConfig::default();
        cfg.tolerance_radius = -1.0;
        cfg.simon.rounds = 0;
        cfg.simon.countdown_secs = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        let cfg = cfg.sanitized();
        assert_eq!(cfg.tolerance_radius, TOLERANCE_RADIUS);
        assert_eq!(cfg.simon.rounds, 10);
        assert_eq!(cfg.simon.countdown_secs, 5);
        assert!(cfg.validate().is_empty());
    }
}
