//! Remappable physical-key → action-token mapping.
//!
//! The raw input source (keyboard polling, excluded from the core) feeds
//! physical key names through a [`KeyMapping`] to obtain the action tokens
//! the input buffer understands. Mappings are plain configuration passed in
//! at battle construction and rebindable at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Known action tokens. Movement tokens are facing-relative: `forward` is
/// the direction the combatant faces.
pub mod tokens {
    pub const FORWARD: &str = "forward";
    pub const BACKWARD: &str = "backward";
    pub const UP: &str = "up";
    pub const DOWN: &str = "down";
    pub const PUNCH: &str = "punch";
    pub const KICK: &str = "kick";
    pub const SPECIAL: &str = "special";
    pub const SUPER: &str = "super";
    pub const GUARD: &str = "guard";
}

/// Edge-triggered tokens register once per physical press and re-arm on
/// release. Everything else is level-triggered (active while held).
pub fn is_edge_triggered(token: &str) -> bool {
    matches!(
        token,
        tokens::UP | tokens::PUNCH | tokens::KICK | tokens::SPECIAL | tokens::SUPER
    )
}

/// Whether `token` is one of the known action tokens. Motion sequences are
/// restricted to this set; anything else can never match.
pub fn is_known_token(token: &str) -> bool {
    matches!(
        token,
        tokens::FORWARD
            | tokens::BACKWARD
            | tokens::UP
            | tokens::DOWN
            | tokens::PUNCH
            | tokens::KICK
            | tokens::SPECIAL
            | tokens::SUPER
            | tokens::GUARD
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMapping {
    map: HashMap<String, String>,
}

impl KeyMapping {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Default P1 layout: WASD movement, J/K attacks, U/I special/super,
    /// L guard.
    pub fn default_p1() -> Self {
        let mut mapping = Self::empty();
        for (key, token) in [
            ("d", tokens::FORWARD),
            ("a", tokens::BACKWARD),
            ("w", tokens::UP),
            ("s", tokens::DOWN),
            ("j", tokens::PUNCH),
            ("k", tokens::KICK),
            ("u", tokens::SPECIAL),
            ("i", tokens::SUPER),
            ("l", tokens::GUARD),
        ] {
            mapping.map.insert(key.to_string(), token.to_string());
        }
        mapping
    }

    /// Translate a physical key to its action token, if bound.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Bind `token` to `key`, removing any previous key bound to that
    /// token. Remapping is a move, not a copy, so one token never has two
    /// physical keys.
    pub fn rebind(&mut self, key: &str, token: &str) {
        self.map.retain(|_, bound| bound != token);
        self.map.insert(key.to_string(), token.to_string());
    }
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self::default_p1()
    }
}
