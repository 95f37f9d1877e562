//! Floor number to concrete enemy: pool selection plus elite and boss scaling.

use std::iter;

use crate::content::{ContentPack, EliteBonus, EnemyTemplate, TierScaling};
use crate::progression::boss_index;
use crate::rng::RollSource;
use crate::state::{Enemy, EnemyAction};
use crate::types::{ActionKind, FloorKind, Tier};

const COMMON_COPIES: usize = 3;
const UNCOMMON_COPIES: usize = 2;
const RARE_COPIES: usize = 1;
const UNCOMMON_FROM_FLOOR: u32 = 3;
const RARE_FROM_FLOOR: u32 = 6;

pub fn spawn_enemy(content: &ContentPack, floor: u32, rng: &mut impl RollSource) -> Enemy {
    let kind = FloorKind::of(floor);
    let template = match kind {
        FloorKind::Boss => &content.bosses[boss_index(floor, content.bosses.len())],
        FloorKind::Elite | FloorKind::Normal => {
            let pool = spawn_pool(&content.enemies, floor);
            pool[rng.pick_index(pool.len())]
        }
    };
    build_enemy(content, template, floor, kind)
}

/// Regular templates repeated by rarity weight; rarer tiers unlock with depth.
pub fn spawn_pool(templates: &[EnemyTemplate], floor: u32) -> Vec<&EnemyTemplate> {
    let copies = |tier: Tier| match tier {
        Tier::Common => COMMON_COPIES,
        Tier::Uncommon if floor >= UNCOMMON_FROM_FLOOR => UNCOMMON_COPIES,
        Tier::Rare if floor >= RARE_FROM_FLOOR => RARE_COPIES,
        Tier::Uncommon | Tier::Rare | Tier::Boss => 0,
    };

    let mut pool = Vec::new();
    for tier in [Tier::Common, Tier::Uncommon, Tier::Rare] {
        for template in templates.iter().filter(|t| t.tier == tier) {
            pool.extend(iter::repeat_n(template, copies(tier)));
        }
    }
    pool
}

pub fn build_enemy(
    content: &ContentPack,
    template: &EnemyTemplate,
    floor: u32,
    kind: FloorKind,
) -> Enemy {
    let scaling = match kind {
        FloorKind::Normal => &content.scaling.normal,
        FloorKind::Elite => &content.scaling.elite,
        FloorKind::Boss => &content.scaling.boss,
    };
    let (hp, damage) = scaled_stats(template, scaling, floor);

    let mut actions: Vec<EnemyAction> = template
        .actions
        .iter()
        .map(|spec| EnemyAction {
            kind: spec.kind,
            value: spec.magnitude.resolve(damage),
            weight: spec.weight,
        })
        .collect();

    let name = if kind == FloorKind::Elite {
        add_missing(&mut actions, ActionKind::Defend, &content.scaling.elite_defend, floor);
        add_missing(&mut actions, ActionKind::Heal, &content.scaling.elite_heal, floor);
        rebalance_weights(&mut actions);
        format!("Elite {}", template.name)
    } else {
        template.name.clone()
    };

    Enemy {
        name,
        tag: template.tag.clone(),
        tier: template.tier,
        hp,
        max_hp: hp,
        shield: 0,
        poison: 0,
        weaken_turns: 0,
        actions,
    }
}

/// `(hp, damage)` after floor scaling.
pub fn scaled_stats(template: &EnemyTemplate, scaling: &TierScaling, floor: u32) -> (i32, i32) {
    let floor = f64::from(floor);
    let hp = (f64::from(template.base_hp) * scaling.hp_mult + floor * scaling.hp_slope).floor();
    let damage = (f64::from(template.base_damage) * scaling.damage_mult
        + floor * scaling.damage_slope)
        .floor();
    ((hp as i32).max(1), (damage as i32).max(0))
}

fn add_missing(actions: &mut Vec<EnemyAction>, kind: ActionKind, bonus: &EliteBonus, floor: u32) {
    if actions.iter().any(|a| a.kind == kind) {
        return;
    }
    let value = (bonus.base + f64::from(floor) * bonus.slope).floor() as i32;
    actions.push(EnemyAction { kind, value, weight: bonus.weight });
}

/// Rescales to percentages with floor rounding. The sum may land under 100.
fn rebalance_weights(actions: &mut [EnemyAction]) {
    let total: u32 = actions.iter().map(|a| a.weight).sum();
    if total == 0 {
        return;
    }
    for action in actions {
        action.weight = (f64::from(action.weight) / f64::from(total) * 100.0).floor() as u32;
    }
}
