use rand::seq::SliceRandom;

use crate::individual::HUNGER_DECAY_PER_TICK;
use crate::market::{self, MIN_TRADE};
use crate::society::Society;
use crate::types::{FirmId, Good, IndividualId};

/// Execute one simulation tick.
///
/// Phase order is load-bearing: every individual acts (labor and purchases)
/// before any firm resolves; raw-material producers resolve before
/// processors, so material produced this tick is buyable this tick; prices
/// adjust only after all of the tick's sales and demand signals have landed.
pub fn run_tick(society: &mut Society) {
    society.tick += 1;
    let tick = society.tick;

    // 1. INDIVIDUAL PHASE - shuffled order breaks symmetry between buyers
    let mut order = society.individual_ids.clone();
    order.shuffle(&mut society.rng);

    for individual_id in order {
        run_individual_step(society, individual_id, tick);
    }

    // 2. FIRM RESOLUTION PHASE - producers first so processors can restock
    for firm_id in society.producer_ids.clone() {
        run_firm_step(society, firm_id, tick);
    }
    for firm_id in society.processor_ids.clone() {
        run_firm_step(society, firm_id, tick);
    }

    // 3. PRICING PHASE - reads the tick's full tallies, then resets them
    for firm_id in society.firm_ids.clone() {
        let firm = &mut society.firms[firm_id];
        let previous_price = firm.posted_price;
        firm.adjust_price();

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "price",
            tick = tick,
            firm = firm.name.as_str(),
            previous_price = previous_price,
            posted_price = firm.posted_price,
        );
        let _ = previous_price; // Suppress unused warning when feature disabled
    }
}

/// Hunger decay, job search, labor, purchase, eating for one individual.
fn run_individual_step(society: &mut Society, individual_id: IndividualId, tick: u64) {
    let Society {
        firms,
        individuals,
        firm_ids,
        processor_ids,
        rng,
        ..
    } = society;

    let individual = &mut individuals[individual_id];
    individual.hunger -= HUNGER_DECAY_PER_TICK;

    individual.seek_job(individual_id, rng, firms, firm_ids);
    individual.work(firms);

    // Purchase the consumer good from processors, cheapest first
    let need = individual.desired_quantity();
    let budget = individual.purchase_budget();
    if need > MIN_TRADE && budget > MIN_TRADE && !processor_ids.is_empty() {
        let outcome =
            market::fill_from_cheapest(tick, firms, processor_ids, Good::ConsumerGood, need, budget);

        let individual = &mut individuals[individual_id];
        individual.wealth -= outcome.spent;
        individual.stocks.add(Good::ConsumerGood, outcome.acquired);
    }

    individuals[individual_id].eat();
}

/// Wage payment, procurement, production, and cost update for one firm.
fn run_firm_step(society: &mut Society, firm_id: FirmId, tick: u64) {
    let Society {
        firms,
        individuals,
        producer_ids,
        ..
    } = society;

    // Wages
    {
        let firm = &mut firms[firm_id];
        firm.begin_tick();
        let paid = firm.pay_wages(individuals);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "wage",
            tick = tick,
            firm = firm.name.as_str(),
            paid = paid,
            employees = firm.employees.len() as u64,
        );
        let _ = paid;
    }

    // Procurement: processors restock raw material from producers; the
    // budget is the whole till, the clearing cap keeps spend within it
    let need = firms[firm_id].raw_material_need();
    if need > MIN_TRADE && !producer_ids.is_empty() {
        let budget = firms[firm_id].money;
        let outcome =
            market::fill_from_cheapest(tick, firms, producer_ids, Good::RawMaterial, need, budget);

        let firm = &mut firms[firm_id];
        firm.money -= outcome.spent;
        firm.costs_incurred += outcome.spent;
        firm.stock.add(Good::RawMaterial, outcome.acquired);
        if let Some(price) = outcome.cheapest_ask {
            firm.cheapest_input_price = price;
        }
    }

    // Production and the cost signal it feeds
    let firm = &mut firms[firm_id];
    firm.produce();

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "production",
        tick = tick,
        firm = firm.name.as_str(),
        output = firm.units_produced,
    );

    firm.update_unit_cost(individuals);
}
