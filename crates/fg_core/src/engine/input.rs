//! Per-combatant input buffer and motion matcher.
//!
//! The buffer records timestamped action tokens from the raw input source.
//! Edge-triggered tokens (attacks, jump) carry an armed flag consumed
//! exactly once per physical press; level-triggered tokens (movement,
//! guard) are tracked in a held set and re-buffer at most once per cooldown
//! interval. Motion matching scans newest-to-oldest against an ordered
//! sequence with a per-gap tolerance and an overall window.

use std::collections::{HashMap, HashSet, VecDeque};

use super::keymap::{is_edge_triggered, is_known_token};

/// Maximum buffered entries; oldest evicted first. Eviction policy, not a
/// correctness bound: combo windows longer than the cap may not survive.
pub const DEFAULT_BUFFER_CAP: usize = 20;

/// Maximum gap between two consecutive matched motion tokens.
pub const INTER_INPUT_TOLERANCE_MS: u64 = 150;

/// Default overall window from the earliest matched token to now.
pub const DEFAULT_MOTION_WINDOW_MS: u64 = 500;

/// Minimum interval between re-buffered entries of the same held token.
pub const HELD_REBUFFER_COOLDOWN_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEntry {
    pub token: String,
    pub timestamp_ms: u64,
}

#[derive(Debug, Default)]
struct KeyLock {
    /// Press already consumed while held; cleared on release only.
    locked: bool,
    /// One-shot flag set on press, consumed by `is_action_armed`.
    armed: bool,
}

#[derive(Debug)]
pub struct InputBuffer {
    entries: VecDeque<InputEntry>,
    cap: usize,
    locks: HashMap<String, KeyLock>,
    held: HashSet<String>,
    last_buffered_ms: HashMap<String, u64>,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAP)
    }
}

impl InputBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap: cap.max(1),
            locks: HashMap::new(),
            held: HashSet::new(),
            last_buffered_ms: HashMap::new(),
        }
    }

    /// Record a press of `token` at `now_ms`.
    ///
    /// Unknown tokens are accepted (they simply never match a configured
    /// motion); no error is raised.
    pub fn record_press(&mut self, token: &str, now_ms: u64) {
        if is_edge_triggered(token) {
            let lock = self.locks.entry(token.to_string()).or_default();
            if lock.locked {
                return;
            }
            lock.locked = true;
            lock.armed = true;
            self.push_entry(token, now_ms);
        } else {
            self.held.insert(token.to_string());
            // Held keys are re-reported every host frame; throttle how
            // often they land in the buffer.
            if let Some(&last) = self.last_buffered_ms.get(token) {
                if now_ms.saturating_sub(last) < HELD_REBUFFER_COOLDOWN_MS {
                    return;
                }
            }
            self.last_buffered_ms.insert(token.to_string(), now_ms);
            self.push_entry(token, now_ms);
        }
    }

    /// Clear the key lock and armed flag, enabling the next press.
    pub fn record_release(&mut self, token: &str) {
        self.locks.remove(token);
        self.held.remove(token);
    }

    /// Read-and-consume for edge-triggered tokens: true exactly once per
    /// physical press. Level-triggered tokens return raw held state.
    pub fn is_action_armed(&mut self, token: &str) -> bool {
        if is_edge_triggered(token) {
            match self.locks.get_mut(token) {
                Some(lock) if lock.armed => {
                    lock.armed = false;
                    true
                }
                _ => false,
            }
        } else {
            self.held.contains(token)
        }
    }

    pub fn is_held(&self, token: &str) -> bool {
        self.held.contains(token)
    }

    /// Match `sequence` against the buffer, newest entries first, sequence
    /// from its last element backward. Fails on a gap over
    /// [`INTER_INPUT_TOLERANCE_MS`] between consecutive matched tokens, or
    /// when the earliest matched token is older than `window_ms` before
    /// `now_ms`. Sequences containing tokens outside the known set never
    /// match. No side effects; repeatable until the buffer changes.
    pub fn match_motion(&self, sequence: &[String], window_ms: u64, now_ms: u64) -> bool {
        if sequence.is_empty() {
            return false;
        }
        if sequence.iter().any(|token| !is_known_token(token)) {
            return false;
        }
        let mut remaining = sequence.len();
        let mut last_matched_ms: Option<u64> = None;
        let mut earliest_ms = 0;

        for entry in self.entries.iter().rev() {
            if entry.token != sequence[remaining - 1] {
                continue;
            }
            if let Some(later) = last_matched_ms {
                if later.saturating_sub(entry.timestamp_ms) > INTER_INPUT_TOLERANCE_MS {
                    return false;
                }
            }
            last_matched_ms = Some(entry.timestamp_ms);
            remaining -= 1;
            if remaining == 0 {
                earliest_ms = entry.timestamp_ms;
                break;
            }
        }

        remaining == 0 && now_ms.saturating_sub(earliest_ms) <= window_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all buffered history and flags (round teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.locks.clear();
        self.held.clear();
        self.last_buffered_ms.clear();
    }

    fn push_entry(&mut self, token: &str, now_ms: u64) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(InputEntry { token: token.to_string(), timestamp_ms: now_ms });
    }
}
