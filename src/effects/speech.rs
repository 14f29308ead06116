use super::Voice;
use std::env;
use std::path::Path;
use std::process::{Child, Command, Stdio};

const CANDIDATES: &[&str] = &["espeak-ng", "espeak", "spd-say", "say"];
const BASE_WPM: f32 = 175.0;

/// Best-effort text-to-speech through whatever command-line engine is installed.
pub struct Speaker
{
    program: String,
    children: Vec<Child>,
    failed: bool,
}

impl Speaker
{
    /// Uses `command` when given, otherwise the first known engine found on `PATH`.
    pub fn detect(command: Option<&str>) -> Result<Self, String>
    {
        let program = match command.filter(|value| !value.trim().is_empty()) {
            Some(explicit) => {
                if !on_path(explicit) {
                    return Err(format!("speech command '{explicit}' not found on PATH"));
                }
                explicit.to_string()
            }
            None => CANDIDATES
                .iter()
                .find(|candidate| on_path(candidate))
                .map(|candidate| candidate.to_string())
                .ok_or_else(|| "no text-to-speech engine found on PATH".to_string())?,
        };
        log::info!("speech engine: {program}");
        Ok(Self {
            program,
            children: Vec::new(),
            failed: false,
        })
    }

    pub fn program(&self) -> &str
    {
        &self.program
    }

    pub fn say(&mut self, text: &str, voice: Voice)
    {
        if self.failed {
            log::debug!("speech disabled, dropping '{text}'");
            return;
        }
        self.reap();
        let result = Command::new(&self.program)
            .args(voice_args(&self.program, voice))
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match result {
            Ok(child) => self.children.push(child),
            Err(err) => {
                log::warn!("speech engine '{}' failed: {err}", self.program);
                self.failed = true;
            }
        }
    }

    fn reap(&mut self)
    {
        self.children
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Drop for Speaker
{
    fn drop(&mut self)
    {
        for child in &mut self.children {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn voice_args(program: &str, voice: Voice) -> Vec<String>
{
    let name = Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program);
    match name {
        "espeak" | "espeak-ng" => vec![
            "-s".to_string(),
            format!("{}", (BASE_WPM * voice.rate).round() as u32),
            "-p".to_string(),
            format!("{}", (50.0 * voice.pitch).round().clamp(0.0, 99.0) as u32),
        ],
        "spd-say" => vec![
            "-r".to_string(),
            format!("{}", ((voice.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32),
            "-p".to_string(),
            format!("{}", ((voice.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32),
        ],
        "say" => vec![
            "-r".to_string(),
            format!("{}", (BASE_WPM * voice.rate).round() as u32),
        ],
        _ => Vec::new(),
    }
}

fn on_path(program: &str) -> bool
{
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn espeak_gets_rate_and_pitch()
    {
        let args = voice_args("/usr/bin/espeak-ng", Voice::new(0.8, 1.2));
        assert_eq!(args, vec!["-s", "140", "-p", "60"]);
    }

    #[test]
    fn spd_say_uses_relative_scale()
    {
        let args = voice_args("spd-say", Voice::new(0.8, 1.2));
        assert_eq!(args, vec!["-r", "-20", "-p", "20"]);
    }

    #[test]
    fn unknown_engine_gets_no_flags()
    {
        assert!(voice_args("festival", Voice::default()).is_empty());
    }

    #[test]
    fn missing_explicit_command_is_an_error()
    {
        assert!(Speaker::detect(Some("definitely-not-a-speech-engine")).is_err());
    }
}
