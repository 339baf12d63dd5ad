use wasm_bindgen::prelude::*;

mod error;
mod firm;
mod individual;
mod market;
mod snapshot;
mod society;
mod stock;
mod tick;
mod types;

pub use error::*;
pub use firm::*;
pub use individual::*;
pub use market::*;
pub use snapshot::*;
pub use society::*;
pub use stock::*;
pub use tick::*;
pub use types::*;

// ============================================================================
// WASM API - Simulation
// ============================================================================

#[wasm_bindgen]
pub struct Simulation {
    society: Society,
}

#[wasm_bindgen]
impl Simulation {
    /// Create an empty simulation (no firms, no individuals)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            society: Society::default(),
        }
    }

    /// Create a simulation with the stock four-firm, 100-worker scenario
    #[wasm_bindgen]
    pub fn with_baseline_scenario() -> Simulation {
        console_error_panic_hook::set_once();

        Self {
            society: Society::baseline(),
        }
    }

    /// Build a population from a worker count and a JSON array of firm
    /// specs (simple format: `[{"name", "role", "labor_coefficient",
    /// "initial_price"}, ...]`). Malformed specs are rejected here.
    #[wasm_bindgen]
    pub fn from_spec(worker_count: u32, firms_json: &str) -> Result<Simulation, JsError> {
        console_error_panic_hook::set_once();

        let specs: Vec<FirmSpec> = serde_json::from_str(firms_json)
            .map_err(|e| JsError::new(&format!("invalid firm spec: {e}")))?;
        let society =
            Society::new(worker_count, &specs).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(Self { society })
    }

    /// Reseed the shuffle/job-search RNG for reproducible runs
    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u64) {
        self.society.reseed(seed);
    }

    /// Advance the simulation by one tick
    #[wasm_bindgen]
    pub fn advance_tick(&mut self) {
        self.society.run_tick();
    }

    /// Get the current tick
    #[wasm_bindgen]
    pub fn get_tick(&self) -> u64 {
        self.society.tick
    }

    /// Get a snapshot of the current state for rendering/reporting
    #[wasm_bindgen]
    pub fn get_state_snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.society)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Direct state access for native drivers and tests
    pub fn society(&self) -> &Society {
        &self.society
    }

    /// Mutable state access for native drivers and tests
    pub fn society_mut(&mut self) -> &mut Society {
        &mut self.society
    }
}

// ============================================================================
// Tests
// ============================================================================
