//! Key-combination strings, as written inside `{#...}`.
//!
//! | Syntax | Events |
//! |--------|--------|
//! | `a` | press `a`, release `a` |
//! | `shift(a b)` | press `shift`, press/release `a`, press/release `b`, release `shift` |
//! | `Control_L(Alt_L(Tab))` | nested holds, released innermost first |
//!
//! Key names are matched case-insensitively and reported lowercase.

use thiserror::Error;

/// Errors raised while parsing a combination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyComboError {
    #[error("unbalanced \")\" at {position} in {combo:?}")]
    UnbalancedClose { combo: String, position: usize },

    #[error("unbalanced \"(\" in {combo:?}")]
    UnbalancedOpen { combo: String },

    #[error("invalid character {character:?} at {position} in {combo:?}")]
    InvalidCharacter {
        combo: String,
        character: char,
        position: usize,
    },

    #[error("key {key:?} already pressed in {combo:?}")]
    AlreadyPressed { combo: String, key: String },
}

/// One press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub pressed: bool,
}

impl KeyEvent {
    fn press(key: &str) -> Self {
        Self {
            key: key.to_string(),
            pressed: true,
        }
    }

    fn release(key: &str) -> Self {
        Self {
            key: key.to_string(),
            pressed: false,
        }
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse `combo` into the ordered press/release events.
pub fn parse_key_combo(combo: &str) -> Result<Vec<KeyEvent>, KeyComboError> {
    let mut events = Vec::new();
    let mut held: Vec<String> = Vec::new();
    let chars: Vec<(usize, char)> = combo.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (position, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if is_key_char(c) {
            let start = position;
            while i < chars.len() && is_key_char(chars[i].1) {
                i += 1;
            }
            let end = chars.get(i).map_or(combo.len(), |(p, _)| *p);
            let key = combo[start..end].to_lowercase();

            // `name (` holds the key until the matching `)`.
            let mut j = i;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            let hold = chars.get(j).is_some_and(|(_, c)| *c == '(');

            if held.contains(&key) {
                return Err(KeyComboError::AlreadyPressed {
                    combo: combo.to_string(),
                    key,
                });
            }
            events.push(KeyEvent::press(&key));
            if hold {
                held.push(key);
                i = j + 1;
            } else {
                events.push(KeyEvent::release(&key));
            }
        } else if c == ')' {
            let key = held.pop().ok_or_else(|| KeyComboError::UnbalancedClose {
                combo: combo.to_string(),
                position,
            })?;
            events.push(KeyEvent::release(&key));
            i += 1;
        } else {
            return Err(KeyComboError::InvalidCharacter {
                combo: combo.to_string(),
                character: c,
                position,
            });
        }
    }

    if !held.is_empty() {
        return Err(KeyComboError::UnbalancedOpen {
            combo: combo.to_string(),
        });
    }
    Ok(events)
}
