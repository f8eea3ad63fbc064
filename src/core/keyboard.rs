//! Model of the on-screen keyboard.  Keys only light up; they never produce
//! input.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

pub const DEFAULT_FLASH: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub struct VirtualKeyboard {
    flash: Duration,
    /// Lit key → instant it goes dark again.
    lit: HashMap<char, Instant>,
}

impl VirtualKeyboard {
    pub fn new(flash: Duration) -> Self {
        Self {
            flash,
            lit: HashMap::new(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &'static str> {
        ROWS.iter().copied()
    }

    /// Light the key for `ch` if it is a letter on the layout.  Returns
    /// whether a key lit up.
    pub fn press(&mut self, ch: char, now: Instant) -> bool {
        if !ch.is_alphabetic() {
            return false;
        }
        let key = ch.to_ascii_uppercase();
        if !ROWS.iter().any(|row| row.contains(key)) {
            return false;
        }
        self.lit.insert(key, now + self.flash);
        true
    }

    pub fn is_lit(&self, key: char, now: Instant) -> bool {
        self.lit.get(&key).is_some_and(|&until| now < until)
    }

    /// Forget flashes whose deadline has passed.  Returns `true` when any
    /// key went dark (the caller should redraw).
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.lit.len();
        self.lit.retain(|_, until| now < *until);
        self.lit.len() != before
    }

    pub fn any_lit(&self) -> bool {
        !self.lit.is_empty()
    }
}

impl Default for VirtualKeyboard {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH)
    }
}
