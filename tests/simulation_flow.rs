mod common;

use budget_plan::{
    config::SimulationConfig,
    ledger::{input_from_json, BudgetLedger},
    plan::DailyPlan,
    simulation::{SimulationState, Simulator},
    timeline::BudgetTimeline,
    SimulationError,
};
use common::{basic_timeline, multi_month_timeline, BASIC_INPUT};
use rand::{rngs::SmallRng, SeedableRng};
use rust_decimal::Decimal;

fn seeded_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

#[test]
fn input_to_summary_end_to_end() {
    budget_plan::init();
    let input = input_from_json(BASIC_INPUT).unwrap();
    let timeline = BudgetTimeline::from_input(&input).unwrap();
    let mut simulator = Simulator::from_timeline(&timeline, &seeded_config(2019)).unwrap();
    simulator.generate_costs().unwrap();

    let summary = simulator.summary().unwrap();
    assert_eq!(summary.len(), 7);
    assert_eq!(summary[0].date, "01.01.2019");
    assert_eq!(summary[0].budget, "7.00");
    assert_eq!(summary[3].budget, "0.00");
    assert_eq!(summary[6].budget, "100.50");
    assert_eq!(summary[4].costs, "0.00");
}

#[test]
fn configured_seed_is_reproducible() {
    let timeline = multi_month_timeline();
    let mut first = Simulator::from_timeline(&timeline, &seeded_config(77)).unwrap();
    let mut second = Simulator::from_timeline(&timeline, &seeded_config(77)).unwrap();
    first.generate_costs().unwrap();
    second.generate_costs().unwrap();
    assert_eq!(first.summary().unwrap(), second.summary().unwrap());
    assert_eq!(first.costs(), second.costs());
}

#[test]
fn injected_rng_matches_configured_seed() {
    let timeline = multi_month_timeline();
    let mut configured = Simulator::from_timeline(&timeline, &seeded_config(5)).unwrap();
    let mut injected = Simulator::from_plan(
        DailyPlan::from_timeline(&timeline).unwrap(),
        SmallRng::seed_from_u64(5),
    );
    configured.generate_costs().unwrap();
    injected.generate_costs().unwrap();
    assert_eq!(configured.costs(), injected.costs());
}

#[test]
fn every_month_stays_within_its_budget() {
    let timeline = multi_month_timeline();
    for seed in 0..25 {
        let mut simulator = Simulator::from_timeline(&timeline, &seeded_config(seed)).unwrap();
        simulator.generate_costs().unwrap();
        for (key, month) in simulator.plan().months() {
            assert!(
                month.costs <= month.budget,
                "seed {seed} month {key}: {} > {}",
                month.costs,
                month.budget
            );
        }
    }
}

#[test]
fn costs_fall_inside_the_plan_span() {
    let timeline = multi_month_timeline();
    let mut simulator = Simulator::from_timeline(&timeline, &seeded_config(3)).unwrap();
    simulator.generate_costs().unwrap();
    let first = simulator.plan().first_date().unwrap();
    let last = simulator.plan().last_date().unwrap();
    for cost in simulator.costs() {
        let day = cost.timestamp.date();
        assert!(first <= day && day <= last);
        assert!(cost.amount >= Decimal::ZERO);
    }
}

#[test]
fn generated_cost_count_is_bounded() {
    let timeline = basic_timeline();
    let config = SimulationConfig {
        max_costs_per_day: 2,
        ..seeded_config(8)
    };
    let mut simulator = Simulator::from_timeline(&timeline, &config).unwrap();
    simulator.generate_costs().unwrap();
    assert!(simulator.costs().len() <= 2 * 7);
}

#[test]
fn second_run_is_rejected_without_touching_totals() {
    let mut simulator =
        Simulator::from_timeline(&basic_timeline(), &seeded_config(4)).unwrap();
    simulator.generate_costs().unwrap();
    let before = simulator.summary().unwrap();
    assert_eq!(
        simulator.generate_costs(),
        Err(SimulationError::AlreadyRun)
    );
    assert_eq!(simulator.state(), SimulationState::Done);
    assert_eq!(simulator.summary().unwrap(), before);
}

#[test]
fn ledger_feeds_simulator() {
    let mut ledger = BudgetLedger::new();
    ledger.add("01.01.2019 00:00:00", "07.00");
    let removed = ledger.add("01.02.2019 00:00:00", "99");
    ledger.add("01.04.2019 00:00:00", "00.00");
    assert!(ledger.remove(removed));

    let timeline = ledger.timeline().unwrap();
    let mut simulator = Simulator::from_timeline(&timeline, &seeded_config(1)).unwrap();
    simulator.generate_costs().unwrap();
    let summary = simulator.summary().unwrap();
    assert_eq!(summary.len(), 4);
    assert!(summary[..3].iter().all(|row| row.budget == "7.00"));
}

#[test]
fn empty_timeline_simulates_nothing() {
    let mut simulator = Simulator::new(&BudgetTimeline::new()).unwrap();
    simulator.generate_costs().unwrap();
    assert!(simulator.summary().unwrap().is_empty());
    assert!(simulator.costs().is_empty());
}
