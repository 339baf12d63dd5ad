use slotmap::SlotMap;

use crate::individual::{Individual, SKILL_GROWTH_PER_TICK};
use crate::stock::Stock;
use crate::types::{FirmRole, Good, IndividualId, Money, Price, Quantity};

// === CONSTANTS ===

/// Units of raw material consumed per unit of consumer good (fixed-proportion recipe)
pub const RAW_PER_UNIT: f64 = 3.0;
/// Demand above this counts as market tension
pub const DEMAND_TENSION_THRESHOLD: f64 = 20.0;
/// Unsold stock above this triggers the glut correction
pub const STOCK_GLUT_THRESHOLD: f64 = 300.0;
pub const PRICE_CUT: f64 = 0.90;
pub const PRICE_RAISE: f64 = 1.05;
pub const GLUT_CUT: f64 = 0.95;
/// Hard floor on posted prices; keeps budget/price divisions well-conditioned
pub const PRICE_FLOOR: f64 = 0.01;
/// The wage loop stops once the till drops to this balance
pub const WAGE_CUTOFF_BALANCE: f64 = 0.1;
/// Weight on the previous unit-cost estimate when blending in a new observation
pub const UNIT_COST_SMOOTHING: f64 = 0.9;

// === FIRM ===

/// A producer or processor. Converts labor (and, for processors, raw
/// material) into a sellable good and posts a unit price for it.
#[derive(Debug, Clone)]
pub struct Firm {
    pub name: String,
    pub role: FirmRole,
    /// Units of labor required per unit of output. Positive by construction.
    pub labor_coefficient: f64,
    pub stock: Stock,
    pub money: Money,
    pub posted_price: Price,
    /// Employment roster. Append-only; individuals hold the back-reference.
    pub employees: Vec<IndividualId>,

    // Per-tick counters
    pub labor_received: f64,
    /// Labor received on the previous tick; read by the price stall rule
    pub last_labor: f64,
    pub total_labor: f64,
    pub units_produced: Quantity,
    pub units_sold: Quantity,
    pub units_demanded: Quantity,
    pub costs_incurred: Money,

    /// Smoothed marginal-cost proxy, used only as a price-floor signal
    pub unit_cost_estimate: Money,
    /// Cheapest ask seen during the latest procurement round
    pub cheapest_input_price: Price,
}

impl Firm {
    pub fn new(
        name: impl Into<String>,
        role: FirmRole,
        labor_coefficient: f64,
        posted_price: Price,
        money: Money,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            labor_coefficient,
            stock: Stock::new(),
            money,
            posted_price,
            employees: Vec::new(),
            labor_received: 0.0,
            last_labor: 0.0,
            total_labor: 0.0,
            units_produced: 0.0,
            units_sold: 0.0,
            units_demanded: 0.0,
            costs_incurred: 0.0,
            unit_cost_estimate: 0.0,
            cheapest_input_price: 0.0,
        }
    }

    /// Accept an applicant. Hiring is unconditional; there is no headcount cap.
    pub fn hire(&mut self, worker: IndividualId) {
        self.employees.push(worker);
    }

    pub fn add_labor(&mut self, work_done: f64) {
        self.labor_received += work_done;
        self.total_labor += work_done;
    }

    /// Reset the cost counter at the start of this firm's resolution step
    pub fn begin_tick(&mut self) {
        self.costs_incurred = 0.0;
    }

    /// Pay each employee a wage equal to their current skill, capped by the
    /// remaining till. Returns the total paid out.
    pub fn pay_wages(&mut self, individuals: &mut SlotMap<IndividualId, Individual>) -> Money {
        let mut paid_total = 0.0;
        for &worker_id in &self.employees {
            if self.money <= WAGE_CUTOFF_BALANCE {
                break;
            }
            let Some(worker) = individuals.get_mut(worker_id) else {
                continue;
            };
            let wage = worker.current_skill.unwrap_or(0.0);
            let paid = wage.min(self.money);
            worker.wealth += paid;
            self.money -= paid;
            self.costs_incurred += paid;
            paid_total += paid;
        }
        paid_total
    }

    /// How much raw material a processor wants to buy this tick: twice the
    /// input requirement of current labor capacity, capped by what the
    /// market demanded, net of material already on hand. Zero for producers.
    pub fn raw_material_need(&self) -> Quantity {
        if self.role != FirmRole::Processor {
            return 0.0;
        }
        let labor_capacity = self.labor_received / self.labor_coefficient;
        let target_input =
            (labor_capacity * RAW_PER_UNIT * 2.0).min(self.units_demanded * RAW_PER_UNIT);
        (target_input - self.stock.get(Good::RawMaterial)).max(0.0)
    }

    /// Convert this tick's labor (and, for processors, raw material on hand)
    /// into product.
    pub fn produce(&mut self) {
        let output = match self.role {
            FirmRole::RawMaterialProducer => {
                let output = self.labor_received / self.labor_coefficient;
                self.stock.add(Good::RawMaterial, output);
                output
            }
            FirmRole::Processor => {
                // Fixed proportions: output binds on the tighter of labor
                // capacity and material capacity
                let by_labor = self.labor_received / self.labor_coefficient;
                let by_material = self.stock.get(Good::RawMaterial) / RAW_PER_UNIT;
                let output = by_labor.min(by_material);
                self.stock.remove(Good::RawMaterial, output * RAW_PER_UNIT);
                self.stock.add(Good::ConsumerGood, output);
                output
            }
        };
        self.units_produced = output;
    }

    /// Blend this tick's theoretical marginal cost into the smoothed
    /// estimate: average employee wage times the labor coefficient, plus the
    /// material bill for processors.
    pub fn update_unit_cost(&mut self, individuals: &SlotMap<IndividualId, Individual>) {
        let avg_wage = if self.employees.is_empty() {
            1.0
        } else {
            let total: f64 = self
                .employees
                .iter()
                .filter_map(|id| individuals.get(*id))
                .map(|w| w.current_skill.unwrap_or(0.0))
                .sum();
            total / self.employees.len() as f64
        };

        let labor_cost = avg_wage * self.labor_coefficient;
        let material_cost = match self.role {
            FirmRole::Processor => RAW_PER_UNIT * self.cheapest_input_price,
            FirmRole::RawMaterialProducer => 0.0,
        };
        let current = labor_cost + material_cost;

        if self.unit_cost_estimate == 0.0 {
            self.unit_cost_estimate = current;
        } else {
            self.unit_cost_estimate = UNIT_COST_SMOOTHING * self.unit_cost_estimate
                + (1.0 - UNIT_COST_SMOOTHING) * current;
        }
    }

    /// Adjust the posted price from this tick's realized signals, then roll
    /// the per-tick counters.
    pub fn adjust_price(&mut self) {
        let unsold_stock = self.stock.get(self.role.sells());

        // A tick with zero sales can never justify a raise; shed unsold
        // stock as long as the price still covers estimated cost
        if self.units_sold == 0.0
            && unsold_stock > 0.0
            && self.posted_price > self.unit_cost_estimate
        {
            self.posted_price *= PRICE_CUT;
        }

        // Labor drifts up by the skill increment per worker even at constant
        // headcount, so the stall test allows that much slack
        let labor_slack =
            self.employees.len() as f64 * SKILL_GROWTH_PER_TICK + SKILL_GROWTH_PER_TICK;
        let labor_active = self.last_labor > 0.0 || self.labor_received > 0.0;
        let labor_stalled = self.last_labor > self.labor_received - labor_slack;

        if labor_active && labor_stalled && self.units_demanded < DEMAND_TENSION_THRESHOLD {
            self.posted_price *= PRICE_CUT;
        } else if self.units_demanded > self.units_sold
            && self.units_demanded > DEMAND_TENSION_THRESHOLD
        {
            self.posted_price *= PRICE_RAISE;
        } else if unsold_stock > STOCK_GLUT_THRESHOLD {
            self.posted_price *= GLUT_CUT;
        }

        self.posted_price = self.posted_price.max(PRICE_FLOOR);

        // Roll counters for the next tick
        self.units_sold = 0.0;
        self.units_demanded = 0.0;
        self.last_labor = self.labor_received;
        self.labor_received = 0.0;
    }
}
