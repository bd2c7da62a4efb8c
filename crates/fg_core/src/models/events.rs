//! Host-visible simulation events.
//!
//! The core emits discrete notifications (attack landed, special executed,
//! knockout) into a queue the host drains after each tick. The audio/VFX
//! layer subscribes to these; the core never queries back.

use serde::{Deserialize, Serialize};

/// Which side of the match a combatant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }

    pub fn from_index(index: usize) -> Side {
        if index == 0 {
            Side::P1
        } else {
            Side::P2
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimEventKind {
    /// An active hit region overlapped the opponent.
    AttackLanded { damage: f32 },
    /// The opponent was guarding (holding guard or walking backward on the
    /// ground); damage was chipped.
    AttackBlocked { chip: f32 },
    SpecialExecuted { name: String },
    SuperExecuted { name: String },
    KnockedOut,
    RoundOver { winner: Side },
}

/// One discrete notification. `side` is the combatant the event originates
/// from (the attacker for hits, the victim for knockouts).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimEvent {
    pub tick: u64,
    pub side: Side,
    #[serde(flatten)]
    pub kind: SimEventKind,
}
