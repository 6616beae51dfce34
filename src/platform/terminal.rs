//! Keyboard input from a raw-mode terminal
//!
//! Terminals that support the kitty keyboard protocol report key releases, so
//! a key counts as held from press to release. Elsewhere only presses and
//! auto-repeats arrive, and a key counts as held until `HOLD_WINDOW` passes
//! without a repeat.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};

use super::{InputFrame, InputSource, KeyBindings};
use crate::sim::TickInput;

/// How long a key stays held after its last press or repeat when the
/// terminal cannot report releases. Covers the usual auto-repeat delay.
pub const HOLD_WINDOW: Duration = Duration::from_millis(500);

/// Keys currently held, with the time each was last seen
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    seen: HashMap<char, Instant>,
}

impl HeldKeys {
    pub fn press(&mut self, key: char, now: Instant) {
        self.seen.insert(key.to_ascii_lowercase(), now);
    }

    pub fn release(&mut self, key: char) {
        self.seen.remove(&key.to_ascii_lowercase());
    }

    /// Keys held at `now`. With a `hold` window, keys not seen within it are
    /// dropped first.
    pub fn pressed(&mut self, now: Instant, hold: Option<Duration>) -> Vec<char> {
        if let Some(hold) = hold {
            self.seen
                .retain(|_, last| now.saturating_duration_since(*last) < hold);
        }
        let mut keys: Vec<char> = self.seen.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

/// Reads the keyboard of the controlling terminal.
///
/// Construction switches the terminal to raw mode; dropping restores it.
pub struct TerminalInput {
    bindings: KeyBindings,
    held: HeldKeys,
    /// Release events are reported
    enhanced: bool,
}

impl TerminalInput {
    pub fn new(bindings: KeyBindings) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        let mut stdout = io::stdout();
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        execute!(stdout, cursor::Hide)?;
        log::info!(
            "Terminal input ready (key release events: {})",
            if enhanced { "yes" } else { "no" }
        );
        Ok(Self {
            bindings,
            held: HeldKeys::default(),
            enhanced,
        })
    }

    /// Apply one key event; returns true if it asks to quit
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if is_quit(&key) {
            return true;
        }
        let KeyCode::Char(c) = key.code else {
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.held.press(c, now),
            KeyEventKind::Release => self.held.release(c),
        }
        false
    }

    fn drain(&mut self) -> io::Result<bool> {
        let now = Instant::now();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if self.handle_key(key, now) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputFrame {
        let quit = match self.drain() {
            Ok(quit) => quit,
            Err(e) => {
                log::warn!("Input error: {:?}", e);
                true
            }
        };
        let hold = (!self.enhanced).then_some(HOLD_WINDOW);
        let pressed = self.held.pressed(Instant::now(), hold);
        InputFrame {
            quit,
            controls: if quit {
                TickInput::default()
            } else {
                self.bindings.controls(&pressed)
            },
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, cursor::Show);
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to restore terminal: {:?}", e);
        }
    }
}
