use std::collections::HashMap;

use rand::Rng;
use slotmap::SlotMap;

use crate::firm::Firm;
use crate::stock::Stock;
use crate::types::{FirmId, FirmRole, Good, IndividualId, Money, Quantity};

// === CONSTANTS ===

/// Learning-by-doing increment applied on every worked tick
pub const SKILL_GROWTH_PER_TICK: f64 = 0.01;
/// Hunger lost every tick whether or not anything is eaten
pub const HUNGER_DECAY_PER_TICK: f64 = 2.0;
/// Hunger restored by one unit of the consumer good
pub const HUNGER_PER_UNIT: f64 = 25.0;
/// Eating tops hunger back up toward this level
pub const HUNGER_CEILING: f64 = 100.0;
/// Below this hunger the purchase budget turns aggressive
pub const HUNGER_URGENCY_THRESHOLD: f64 = 50.0;
pub const BUDGET_FRACTION_RELAXED: f64 = 0.3;
pub const BUDGET_FRACTION_URGENT: f64 = 0.9;
/// Target holding of the consumer good, in units
pub const IDEAL_BUFFER: f64 = 2.0;

// === INDIVIDUAL ===

/// A worker/consumer. Sells labor to one firm, spends wages on the consumer
/// good, eats to hold off a decaying hunger level.
#[derive(Debug, Clone)]
pub struct Individual {
    pub wealth: Money,
    /// Nominally in [0, 100]; decays each tick, not hard-clamped below
    pub hunger: f64,
    /// Non-owning link; the employing firm keeps the roster
    pub employer: Option<FirmId>,
    pub skill_by_role: HashMap<FirmRole, f64>,
    /// Skill at the chosen employer; set on hire, grows with each worked tick
    pub current_skill: Option<f64>,
    pub stocks: Stock,
}

impl Individual {
    pub fn new(wealth: Money) -> Self {
        let skill_by_role = [FirmRole::RawMaterialProducer, FirmRole::Processor]
            .into_iter()
            .map(|role| (role, role.base_skill()))
            .collect();

        Self {
            wealth,
            hunger: HUNGER_CEILING,
            employer: None,
            skill_by_role,
            current_skill: None,
            stocks: Stock::new(),
        }
    }

    /// Ask a uniformly random firm for a job. Firms always accept; on hire,
    /// the working skill comes from the skill table keyed by the firm's role.
    pub fn seek_job<R: Rng>(
        &mut self,
        self_id: IndividualId,
        rng: &mut R,
        firms: &mut SlotMap<FirmId, Firm>,
        firm_ids: &[FirmId],
    ) {
        if self.employer.is_some() || firm_ids.is_empty() {
            return;
        }

        let firm_id = firm_ids[rng.random_range(0..firm_ids.len())];
        let Some(firm) = firms.get_mut(firm_id) else {
            return;
        };

        firm.hire(self_id);
        self.employer = Some(firm_id);
        self.current_skill = Some(
            self.skill_by_role
                .get(&firm.role)
                .copied()
                .unwrap_or_else(|| firm.role.base_skill()),
        );
    }

    /// Contribute labor to the employer. Skill grows first, then the grown
    /// skill is what lands on the firm. Too hungry to work below zero.
    pub fn work(&mut self, firms: &mut SlotMap<FirmId, Firm>) {
        if self.hunger <= 0.0 {
            return;
        }
        let Some(employer) = self.employer else {
            return;
        };
        let Some(firm) = firms.get_mut(employer) else {
            return;
        };
        let Some(skill) = self.current_skill.as_mut() else {
            return;
        };

        *skill += SKILL_GROWTH_PER_TICK;
        firm.add_labor(*skill);
    }

    /// Units wanted to refill the buffer of consumer good, clamped at zero
    pub fn desired_quantity(&self) -> Quantity {
        (IDEAL_BUFFER - self.stocks.get(Good::ConsumerGood)).max(0.0)
    }

    /// Spendable budget for this tick's purchase. Urgency-driven: a
    /// conservative fraction of wealth while comfortable, most of it when
    /// hunger runs low.
    pub fn purchase_budget(&self) -> Money {
        let fraction = if self.hunger > HUNGER_URGENCY_THRESHOLD {
            BUDGET_FRACTION_RELAXED
        } else {
            BUDGET_FRACTION_URGENT
        };
        self.wealth * fraction
    }

    /// Eat from held stock toward the hunger ceiling; one unit restores 25
    /// points, capped by what is actually held.
    pub fn eat(&mut self) {
        let wanted = ((HUNGER_CEILING - self.hunger) / HUNGER_PER_UNIT).max(0.0);
        let eaten = self.stocks.remove(Good::ConsumerGood, wanted);
        self.hunger += eaten * HUNGER_PER_UNIT;
    }
}
