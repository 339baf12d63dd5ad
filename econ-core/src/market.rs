//! Greedy price-priority order matching.
//!
//! One algorithm serves both procurement (a processor buying raw material
//! from producers) and consumption (an individual buying the consumer good
//! from processors): sort the candidate sellers by ascending posted price
//! and fill the buyer's need from the cheapest shelf first, under a hard
//! budget cap.

use slotmap::SlotMap;

use crate::firm::Firm;
use crate::types::{FirmId, Good, Money, Price, Quantity};

// === CONSTANTS ===

/// Need and budget below this are treated as exhausted
pub const MIN_TRADE: f64 = 0.01;

/// What a buyer walked away with from one clearing pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseOutcome {
    pub acquired: Quantity,
    pub spent: Money,
    /// Lowest posted price among the candidate sellers, if any were shown
    pub cheapest_ask: Option<Price>,
}

/// Fill a buyer's need from the cheapest sellers first.
///
/// Sellers are visited in ascending posted-price order (stable, so
/// equal-priced sellers keep their construction order). Every visited
/// seller gets the affordable-at-its-price quantity added to its demanded
/// counter whether or not a trade executes; the demand signal reflects
/// willingness to buy, not completed trades. Sellers with stock on hand
/// then sell up to that quantity. The walk stops when the need or the
/// budget drops below [`MIN_TRADE`], or the sellers run out.
///
/// Seller-side money, stock, and counters are settled here; the caller
/// settles the buyer's side from the returned outcome. An empty seller
/// list is a no-op.
#[allow(unused_variables)]
pub fn fill_from_cheapest(
    tick: u64,
    firms: &mut SlotMap<FirmId, Firm>,
    seller_ids: &[FirmId],
    good: Good,
    need: Quantity,
    budget: Money,
) -> PurchaseOutcome {
    let mut outcome = PurchaseOutcome::default();

    let mut ranked: Vec<(FirmId, Price)> = seller_ids
        .iter()
        .filter_map(|&id| firms.get(id).map(|f| (id, f.posted_price)))
        .collect();
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

    outcome.cheapest_ask = ranked.first().map(|&(_, price)| price);

    let mut need = need;
    let mut budget = budget;

    for (seller_id, price) in ranked {
        if need <= MIN_TRADE || budget <= MIN_TRADE {
            break;
        }
        let seller = &mut firms[seller_id];

        // Willingness-to-buy lands on the seller even when the shelf is empty
        let affordable = need.min(budget / price);
        seller.units_demanded += affordable;

        let quantity = affordable.min(seller.stock.get(good));
        if quantity <= 0.0 {
            continue;
        }

        let cost = quantity * price;
        seller.stock.remove(good, quantity);
        seller.money += cost;
        seller.units_sold += quantity;

        need -= quantity;
        budget -= cost;
        outcome.acquired += quantity;
        outcome.spent += cost;

        #[cfg(feature = "instrument")]
        {
            let good_str = match good {
                Good::RawMaterial => "raw_material",
                Good::ConsumerGood => "consumer_good",
            };
            tracing::info!(
                target: "trade",
                tick = tick,
                seller = seller.name.as_str(),
                good = good_str,
                quantity = quantity,
                price = price,
            );
        }
    }

    outcome
}
