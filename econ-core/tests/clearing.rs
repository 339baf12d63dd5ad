use slotmap::SlotMap;

use econ_core::{Firm, FirmId, FirmRole, Good, fill_from_cheapest};

fn seller(name: &str, price: f64, stock: f64) -> Firm {
    let mut firm = Firm::new(name, FirmRole::RawMaterialProducer, 1.0, price, 0.0);
    firm.stock.add(Good::RawMaterial, stock);
    firm
}

fn book(sellers: Vec<Firm>) -> (SlotMap<FirmId, Firm>, Vec<FirmId>) {
    let mut firms = SlotMap::with_key();
    let ids = sellers.into_iter().map(|s| firms.insert(s)).collect();
    (firms, ids)
}

#[test]
fn cheapest_seller_fills_the_whole_need() {
    // Deliberately unsorted input: the walk must rank by price itself
    let (mut firms, ids) = book(vec![
        seller("Mid", 5.0, 100.0),
        seller("Cheap", 2.0, 100.0),
        seller("Dear", 8.0, 100.0),
    ]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 10.0, 1_000.0);

    assert_eq!(outcome.acquired, 10.0);
    assert_eq!(outcome.spent, 20.0);
    assert_eq!(outcome.cheapest_ask, Some(2.0));

    assert_eq!(firms[ids[1]].units_sold, 10.0);
    assert_eq!(firms[ids[0]].units_sold, 0.0);
    assert_eq!(firms[ids[2]].units_sold, 0.0);
}

#[test]
fn empty_shelf_still_records_demand() {
    // Cheapest seller has nothing on hand: the buyer's willingness lands on
    // it anyway, and the fill comes from the pricier seller
    let (mut firms, ids) = book(vec![seller("Empty", 2.0, 0.0), seller("Stocked", 5.0, 100.0)]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 10.0, 1_000.0);

    assert_eq!(firms[ids[0]].units_demanded, 10.0);
    assert_eq!(firms[ids[0]].units_sold, 0.0);
    assert_eq!(firms[ids[1]].units_sold, 10.0);
    assert_eq!(outcome.acquired, 10.0);
    assert_eq!(outcome.spent, 50.0);
}

#[test]
fn unmet_need_spills_to_the_next_seller() {
    let (mut firms, ids) = book(vec![seller("Small", 2.0, 4.0), seller("Big", 5.0, 100.0)]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 10.0, 1_000.0);

    assert_eq!(firms[ids[0]].units_sold, 4.0);
    assert_eq!(firms[ids[0]].units_demanded, 10.0);
    assert_eq!(firms[ids[1]].units_sold, 6.0);
    assert_eq!(firms[ids[1]].units_demanded, 6.0);
    assert_eq!(outcome.acquired, 10.0);
    assert_eq!(outcome.spent, 4.0 * 2.0 + 6.0 * 5.0);
}

#[test]
fn spend_never_exceeds_the_budget() {
    let (mut firms, ids) = book(vec![seller("Only", 2.0, 100.0)]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 50.0, 10.0);

    assert_eq!(outcome.acquired, 5.0);
    assert!(outcome.spent <= 10.0 + 1e-12);
}

#[test]
fn empty_seller_set_is_a_noop() {
    let mut firms: SlotMap<FirmId, Firm> = SlotMap::with_key();

    let outcome = fill_from_cheapest(0, &mut firms, &[], Good::RawMaterial, 10.0, 100.0);

    assert_eq!(outcome.acquired, 0.0);
    assert_eq!(outcome.spent, 0.0);
    assert_eq!(outcome.cheapest_ask, None);
}

#[test]
fn need_below_epsilon_short_circuits() {
    let (mut firms, ids) = book(vec![seller("Only", 2.0, 100.0)]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 0.005, 100.0);

    assert_eq!(outcome.acquired, 0.0);
    assert_eq!(firms[ids[0]].units_demanded, 0.0);
    assert_eq!(firms[ids[0]].units_sold, 0.0);
}

#[test]
fn budget_below_epsilon_short_circuits() {
    let (mut firms, ids) = book(vec![seller("Only", 2.0, 100.0)]);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 10.0, 0.005);

    assert_eq!(outcome.acquired, 0.0);
    assert_eq!(firms[ids[0]].units_demanded, 0.0);
}

#[test]
fn a_single_trade_conserves_value_exactly() {
    let (mut firms, ids) = book(vec![seller("Only", 2.5, 10.0)]);
    let money_before = firms[ids[0]].money;
    let stock_before = firms[ids[0]].stock.get(Good::RawMaterial);

    let outcome = fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 4.0, 100.0);

    let seller = &firms[ids[0]];
    assert_eq!(outcome.acquired, 4.0);
    assert_eq!(outcome.spent, 10.0);
    assert_eq!(seller.money - money_before, outcome.spent);
    assert_eq!(stock_before - seller.stock.get(Good::RawMaterial), outcome.acquired);
}

#[test]
fn equal_prices_keep_construction_order() {
    let (mut firms, ids) = book(vec![seller("First", 2.0, 1.0), seller("Second", 2.0, 100.0)]);

    fill_from_cheapest(0, &mut firms, &ids, Good::RawMaterial, 3.0, 100.0);

    // The earlier-constructed seller empties before the later one sells
    assert_eq!(firms[ids[0]].units_sold, 1.0);
    assert_eq!(firms[ids[1]].units_sold, 2.0);
}
