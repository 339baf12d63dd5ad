// Serializable read-only views for the external driver

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::society::Society;
use crate::types::{FirmRole, Good, KeyToU64, Money, Price, Quantity};

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct StateSnapshot {
    pub tick: u64,
    pub firms: Vec<FirmSnapshot>,
    pub individuals: Vec<IndividualSnapshot>,
    pub mean_wealth: f64,
    pub mean_hunger: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct FirmSnapshot {
    pub id: u64,
    pub name: String,
    pub role: FirmRole,
    pub money: Money,
    pub posted_price: Price,
    pub raw_material_stock: Quantity,
    pub consumer_good_stock: Quantity,
    pub employees: u32,
    pub units_produced: Quantity,
    pub units_sold: Quantity,
    pub units_demanded: Quantity,
    pub costs_incurred: Money,
    pub unit_cost_estimate: Money,
    pub total_labor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct IndividualSnapshot {
    pub id: u64,
    pub wealth: Money,
    pub hunger: f64,
    /// Employing firm id, if hired
    pub employer: Option<u64>,
    pub current_skill: Option<f64>,
    pub consumer_good_held: Quantity,
}

impl StateSnapshot {
    /// Capture the current state in construction order, so snapshots of the
    /// same society are directly comparable.
    pub fn capture(society: &Society) -> Self {
        let firms = society
            .firm_ids
            .iter()
            .filter_map(|&id| {
                society.firms.get(id).map(|firm| FirmSnapshot {
                    id: id.to_u64(),
                    name: firm.name.clone(),
                    role: firm.role,
                    money: firm.money,
                    posted_price: firm.posted_price,
                    raw_material_stock: firm.stock.get(Good::RawMaterial),
                    consumer_good_stock: firm.stock.get(Good::ConsumerGood),
                    employees: firm.employees.len() as u32,
                    units_produced: firm.units_produced,
                    units_sold: firm.units_sold,
                    units_demanded: firm.units_demanded,
                    costs_incurred: firm.costs_incurred,
                    unit_cost_estimate: firm.unit_cost_estimate,
                    total_labor: firm.total_labor,
                })
            })
            .collect();

        let individuals = society
            .individual_ids
            .iter()
            .filter_map(|&id| {
                society.individuals.get(id).map(|individual| IndividualSnapshot {
                    id: id.to_u64(),
                    wealth: individual.wealth,
                    hunger: individual.hunger,
                    employer: individual.employer.map(KeyToU64::to_u64),
                    current_skill: individual.current_skill,
                    consumer_good_held: individual.stocks.get(Good::ConsumerGood),
                })
            })
            .collect();

        Self {
            tick: society.tick,
            firms,
            individuals,
            mean_wealth: society.mean_wealth(),
            mean_hunger: society.mean_hunger(),
        }
    }
}
