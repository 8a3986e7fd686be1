use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

pub const KEYPAD_SIZE: usize = 16;

/// The 16-key hex keypad as the interpreter sees it: one flag per key.
/// Only the input source writes it; the interpreter only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEYPAD_SIZE],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// keys past 0xF don't exist, so they are never pressed
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(k) => *k = pressed,
            None => log::warn!("ignoring keypad index 0x{:02x}; only 0x0-0xf exist", key),
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEYPAD_SIZE];
    }

    /// lowest-numbered key currently held, if any
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|k| k as u8)
    }
}

/// left-hand side of a qwerty keyboard, laid out like the COSMAC VIP keypad
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      q w e r
/// 7 8 9 E  =>  a s d f
/// A 0 B F      z x c v
/// ```
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// what the user asked the emulator itself to do, as opposed to the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    TogglePause,
    /// save the current frame as a png
    Screenshot,
    Quit,
}

/// reads keypresses into the keypad once a frame
pub trait Input {
    /// bring the keypad up to date with whatever has happened since the last
    /// poll
    fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, io::Error>;
}

/// keyboard input from the terminal, using crossterm
///
/// terminals only ever report presses (and auto-repeats), never releases, so
/// a key counts as held for `hold_frames` polls after the last event for it
pub struct TermInput {
    keymap: HashMap<char, u8>,
    hold_frames: u32,
    held: [u32; KEYPAD_SIZE],
}

impl TermInput {
    pub fn new(hold_frames: u32) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            hold_frames,
            held: [0; KEYPAD_SIZE],
        })
    }

    fn map_key(&self, key: char) -> Option<u8> {
        self.keymap.get(&key.to_ascii_lowercase()).copied()
    }

    /// one frame passes for every held key; returns what the user asked for
    fn read_events(&mut self) -> Result<Control, io::Error> {
        for h in self.held.iter_mut() {
            *h = h.saturating_sub(1);
        }
        let mut control = Control::Continue;
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(' ') => control = Control::TogglePause,
                    KeyCode::Char(key) => match self.map_key(key) {
                        Some(mapped_key) => self.held[mapped_key as usize] = self.hold_frames,
                        None => log::warn!("can't map {:?} to a COSMAC key", key),
                    },
                    KeyCode::F(11) => control = Control::Screenshot,
                    KeyCode::Esc => return Ok(Control::Quit),
                    other => log::debug!("ignoring key {:?}", other),
                },
                other => log::debug!("ignoring terminal event {:?}", other),
            }
        }
        Ok(control)
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("could not leave raw mode: {}", e);
        }
    }
}

impl Input for TermInput {
    fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, io::Error> {
        let control = self.read_events()?;
        for (key, frames) in self.held.iter().enumerate() {
            keypad.set(key as u8, *frames > 0);
        }
        Ok(control)
    }
}

/// dummy Input implementation for testing: holds down a fixed set of keys,
/// then answers with a scripted sequence of controls
pub struct DummyInput {
    keys: Vec<u8>,
    controls: Vec<Control>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            keys: Vec::from(keys),
            controls: Vec::new(),
        }
    }

    /// controls are handed out one per poll, first to last
    pub fn with_controls(mut self, controls: &[Control]) -> Self {
        self.controls = controls.iter().rev().copied().collect();
        self
    }
}

impl Input for DummyInput {
    fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, io::Error> {
        keypad.release_all();
        for key in &self.keys {
            keypad.press(*key);
        }
        Ok(self.controls.pop().unwrap_or(Control::Continue))
    }
}
