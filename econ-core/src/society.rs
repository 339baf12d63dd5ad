// Owning state container for the whole economy

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tsify_next::Tsify;

use crate::error::ConfigError;
use crate::firm::Firm;
use crate::individual::Individual;
use crate::types::{FirmId, FirmRole, IndividualId, Money, Price};

// === CONSTANTS ===

/// Till every firm opens with
pub const INITIAL_FIRM_MONEY: Money = 15_000.0;
/// Wealth every individual starts with
pub const INITIAL_WEALTH: Money = 100.0;
/// RNG seed used when the driver does not supply one
pub const DEFAULT_SEED: u64 = 0x5EED;

/// One firm in a population specification.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct FirmSpec {
    pub name: String,
    pub role: FirmRole,
    pub labor_coefficient: f64,
    pub initial_price: Price,
}

impl FirmSpec {
    pub fn new(
        name: impl Into<String>,
        role: FirmRole,
        labor_coefficient: f64,
        initial_price: Price,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            labor_coefficient,
            initial_price,
        }
    }
}

/// Complete state of the economic simulation
#[derive(Debug, Clone)]
pub struct Society {
    pub tick: u64,

    // Agents
    pub firms: SlotMap<FirmId, Firm>,
    pub individuals: SlotMap<IndividualId, Individual>,

    // Iteration order and role indexes
    pub firm_ids: Vec<FirmId>,
    pub producer_ids: Vec<FirmId>,
    pub processor_ids: Vec<FirmId>,
    pub individual_ids: Vec<IndividualId>,

    pub(crate) rng: StdRng,
}

impl Default for Society {
    fn default() -> Self {
        Self {
            tick: 0,
            firms: SlotMap::with_key(),
            individuals: SlotMap::with_key(),
            firm_ids: Vec::new(),
            producer_ids: Vec::new(),
            processor_ids: Vec::new(),
            individual_ids: Vec::new(),
            rng: StdRng::seed_from_u64(DEFAULT_SEED),
        }
    }
}

impl Society {
    /// Build a population from a worker count and a sequence of firm specs.
    /// Malformed specs are rejected here; nothing mid-run can fail after
    /// construction succeeds.
    pub fn new(worker_count: u32, firm_specs: &[FirmSpec]) -> Result<Self, ConfigError> {
        let mut society = Self::default();

        for (index, spec) in firm_specs.iter().enumerate() {
            society.add_firm(index, spec)?;
        }
        for _ in 0..worker_count {
            society.add_individual(INITIAL_WEALTH);
        }

        Ok(society)
    }

    /// The stock four-firm, 100-worker scenario: two raw-material
    /// producers and two processors.
    pub fn baseline() -> Self {
        let specs = [
            FirmSpec::new("WheatCo", FirmRole::RawMaterialProducer, 1.0, 1.0),
            FirmSpec::new("FarmCo", FirmRole::RawMaterialProducer, 1.0, 1.0),
            FirmSpec::new("BreadCo", FirmRole::Processor, 2.0, 3.0),
            FirmSpec::new("BakeryCo", FirmRole::Processor, 2.0, 3.0),
        ];
        Self::new(100, &specs).expect("baseline scenario is a valid spec")
    }

    /// Reseed the internal RNG (used only for shuffling and job search)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Builder form of [`Society::reseed`]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    // === Firm Management ===

    fn add_firm(&mut self, index: usize, spec: &FirmSpec) -> Result<FirmId, ConfigError> {
        if spec.name.is_empty() {
            return Err(ConfigError::EmptyFirmName { index });
        }
        if spec.labor_coefficient <= 0.0 || !spec.labor_coefficient.is_finite() {
            return Err(ConfigError::NonPositiveLaborCoefficient {
                name: spec.name.clone(),
                value: spec.labor_coefficient,
            });
        }
        if spec.initial_price <= 0.0 || !spec.initial_price.is_finite() {
            return Err(ConfigError::NonPositiveInitialPrice {
                name: spec.name.clone(),
                value: spec.initial_price,
            });
        }

        let firm = Firm::new(
            spec.name.clone(),
            spec.role,
            spec.labor_coefficient,
            spec.initial_price,
            INITIAL_FIRM_MONEY,
        );
        let id = self.firms.insert(firm);
        self.firm_ids.push(id);
        match spec.role {
            FirmRole::RawMaterialProducer => self.producer_ids.push(id),
            FirmRole::Processor => self.processor_ids.push(id),
        }
        Ok(id)
    }

    fn add_individual(&mut self, wealth: Money) -> IndividualId {
        let id = self.individuals.insert(Individual::new(wealth));
        self.individual_ids.push(id);
        id
    }

    // === Accessors ===

    pub fn get_firm(&self, id: FirmId) -> Option<&Firm> {
        self.firms.get(id)
    }

    pub fn get_firm_mut(&mut self, id: FirmId) -> Option<&mut Firm> {
        self.firms.get_mut(id)
    }

    pub fn get_individual(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub fn get_individual_mut(&mut self, id: IndividualId) -> Option<&mut Individual> {
        self.individuals.get_mut(id)
    }

    /// Firm ids of one role, in construction order
    pub fn firms_with_role(&self, role: FirmRole) -> &[FirmId] {
        match role {
            FirmRole::RawMaterialProducer => &self.producer_ids,
            FirmRole::Processor => &self.processor_ids,
        }
    }

    /// Mean wealth across all individuals, 0.0 for an empty population
    pub fn mean_wealth(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.values().map(|i| i.wealth).sum::<f64>() / self.individuals.len() as f64
    }

    /// Mean hunger across all individuals, 0.0 for an empty population
    pub fn mean_hunger(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.values().map(|i| i.hunger).sum::<f64>() / self.individuals.len() as f64
    }

    // === Simulation Tick ===

    /// Advance the simulation by exactly one tick
    pub fn run_tick(&mut self) {
        crate::tick::run_tick(self);
    }
}
