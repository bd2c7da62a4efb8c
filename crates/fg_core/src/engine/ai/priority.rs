//! Priority-tree policy (default).
//!
//! Rules evaluated top to bottom, first hit wins:
//! anti-air > punish-recovery > zoning-if-safe-range > close-range-attack >
//! neutral random move.

use rand_chacha::ChaCha8Rng;

use super::{distance, in_recovery, DecisionPolicy};
use crate::engine::combatant::CombatantState;
use crate::engine::intent::Intent;
use crate::models::Archetype;

#[derive(Debug, Clone)]
pub struct PriorityTreePolicy {
    /// Opponent airborne inside this range gets swatted.
    pub anti_air_range: f32,
    /// Range for punishes and plain close-range pokes.
    pub close_range: f32,
    /// Zoning fires only beyond this distance.
    pub safe_projectile_distance: f32,
}

impl Default for PriorityTreePolicy {
    fn default() -> Self {
        Self { anti_air_range: 140.0, close_range: 80.0, safe_projectile_distance: 180.0 }
    }
}

impl DecisionPolicy for PriorityTreePolicy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn decide(
        &mut self,
        me: &CombatantState,
        opponent: &CombatantState,
        _rng: &mut ChaCha8Rng,
    ) -> Intent {
        let dist = distance(me, opponent);

        if !opponent.is_grounded && dist <= self.anti_air_range {
            return Intent::LightAttack;
        }

        if in_recovery(opponent) && dist <= self.close_range {
            return Intent::LightAttack;
        }

        if me.profile.archetype == Archetype::Zoner && dist > self.safe_projectile_distance {
            if let Some(mv) = me.profile.available_projectile(me.super_meter) {
                return Intent::SpecialAttack { name: mv.name.clone() };
            }
        }

        if dist <= self.close_range {
            return Intent::LightAttack;
        }

        Intent::NeutralRandom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{grounded_shoto, grounded_zoner};
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1)
    }

    #[test]
    fn zoner_fires_projectile_beyond_safe_distance() {
        let me = grounded_zoner(500.0, false);
        let opponent = grounded_shoto(300.0, true); // distance 200 > 180
        let mut policy = PriorityTreePolicy::default();

        let intent = policy.decide(&me, &opponent, &mut rng());
        assert_eq!(intent, Intent::SpecialAttack { name: "voidBolt".to_string() });
    }

    #[test]
    fn close_range_rule_beats_zoning() {
        let me = grounded_zoner(350.0, false);
        let opponent = grounded_shoto(300.0, true); // distance 50
        let mut policy = PriorityTreePolicy::default();

        assert_eq!(policy.decide(&me, &opponent, &mut rng()), Intent::LightAttack);
    }

    #[test]
    fn non_zoner_never_zones() {
        let me = grounded_shoto(500.0, false);
        let opponent = grounded_shoto(300.0, true);
        let mut policy = PriorityTreePolicy::default();

        // Kaito has a projectile but is a shoto; distance 200 falls
        // through to the neutral branch.
        assert_eq!(policy.decide(&me, &opponent, &mut rng()), Intent::NeutralRandom);
    }

    #[test]
    fn anti_air_outranks_everything() {
        let me = grounded_zoner(400.0, false);
        let mut opponent = grounded_shoto(300.0, true);
        opponent.is_grounded = false;
        opponent.position.1 -= 80.0;
        let mut policy = PriorityTreePolicy::default();

        assert_eq!(policy.decide(&me, &opponent, &mut rng()), Intent::LightAttack);
    }

    #[test]
    fn punishes_recovery_at_close_range() {
        let me = grounded_shoto(360.0, false);
        let mut opponent = grounded_shoto(300.0, true);
        opponent.enter_state("hadoken");
        opponent.current_frame_index = 2; // mid-recovery
        let mut policy = PriorityTreePolicy::default();

        assert_eq!(policy.decide(&me, &opponent, &mut rng()), Intent::LightAttack);
    }
}
