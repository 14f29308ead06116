use crate::effects::{NotifyKind, TerminalEffects};
use crate::games::{ActivityKind, Flow, ModeController};
use crate::terminal::{BLUE, GOLD, GREEN, RED, Screen, paint};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

const FRAME_MS: u64 = 33;
const CONFETTI: &str = "🎊 🎉 ✨ 🎈 🎊 🎉 ✨ 🎈 🎊 🎉 ✨ 🎈";

/// Full-screen session. Returns once the player quits from the menu or hits Ctrl-C.
pub fn run(
    mut controller: ModeController,
    mut effects: TerminalEffects,
    initial: Option<ActivityKind>,
) -> Result<(), String>
{
    let mut screen = Screen::enter()?;

    if let Some(kind) = initial {
        controller.open(kind, Instant::now(), &mut effects);
    }

    let mut last_frame: Option<Instant> = None;
    loop {
        let now = Instant::now();
        if handle_input(&mut controller, &mut effects, now)? == Flow::Quit {
            break;
        }

        controller.update(now, &mut effects);
        effects.prune(now);

        if last_frame.is_none_or(|at| at.elapsed() >= Duration::from_millis(FRAME_MS)) {
            let mut lines = controller.render(now);
            append_feedback(&effects, now, &mut lines);
            screen.draw(&lines)?;
            last_frame = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    log::info!("session ended after {} frames", screen.frames());
    Ok(())
}

fn handle_input(
    controller: &mut ModeController,
    effects: &mut TerminalEffects,
    now: Instant,
) -> Result<Flow, String>
{
    while event::poll(Duration::from_millis(0)).map_err(|err| err.to_string())? {
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) =
            event::read().map_err(|err| err.to_string())?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Flow::Quit);
        }

        let before = controller.current();
        if controller.handle_key(code, now, effects) == Flow::Quit {
            return Ok(Flow::Quit);
        }
        if before.is_some() && controller.current() != before {
            effects.clear();
        }
    }
    Ok(Flow::Continue)
}

fn append_feedback(effects: &TerminalEffects, now: Instant, lines: &mut Vec<String>)
{
    lines.push(String::new());
    if effects.is_celebrating(now) {
        lines.push(paint(CONFETTI, GOLD));
    }
    for toast in effects.toasts() {
        let color = match toast.kind {
            NotifyKind::Success => GREEN,
            NotifyKind::Error => RED,
            NotifyKind::Info => BLUE,
        };
        let text = match &toast.description {
            Some(description) => format!("{} {}", toast.message, description),
            None => toast.message.clone(),
        };
        lines.push(paint(&text, color));
    }
    lines.push(format!("Speech: {}", effects.speech_label()));
}
