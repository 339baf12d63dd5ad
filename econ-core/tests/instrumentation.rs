#![cfg(feature = "instrument")]

use econ_core::Simulation;

#[test]
fn recorded_events_cover_every_phase() {
    instrument::install_subscriber();
    instrument::clear();

    let mut sim = Simulation::with_baseline_scenario();
    sim.set_seed(42);
    for _ in 0..5 {
        sim.advance_tick();
    }

    let recorder = instrument::drain();

    // Four firms emit one wage, one production, and one price event per tick
    assert_eq!(recorder.events("wage").len(), 20);
    assert_eq!(recorder.events("production").len(), 20);
    assert_eq!(recorder.events("price").len(), 20);

    let trades = recorder.events("trade");
    assert!(
        !trades.is_empty(),
        "five ticks of the baseline scenario should execute trades"
    );
    for trade in trades {
        assert!(trade.f64("quantity").unwrap() > 0.0);
        assert!(trade.f64("price").unwrap() >= 0.01);
        let tick = trade.u64("tick").unwrap();
        assert!((1..=5).contains(&tick));
    }
}

#[test]
fn wage_events_carry_nonnegative_payouts() {
    instrument::install_subscriber();
    instrument::clear();

    let mut sim = Simulation::with_baseline_scenario();
    sim.set_seed(9);
    for _ in 0..3 {
        sim.advance_tick();
    }

    let recorder = instrument::drain();
    for wage in recorder.events("wage") {
        assert!(wage.f64("paid").unwrap() >= 0.0);
        assert!(wage.str("firm").is_some());
    }
}
