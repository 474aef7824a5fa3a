//! Criterion benchmarks for finproj_core projections
//!
//! Run with: cargo bench -p finproj_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use finproj_core::analysis::{SweepConfig, SweepParameter, sensitivity};
use finproj_core::config::{ProjectionBuilder, ProjectionInput};
use finproj_core::model::{DebtAccount, Event};
use finproj_core::simulation::project;

fn create_household(years: u32) -> ProjectionInput {
    ProjectionBuilder::new()
        .start(2025, 1, 1)
        .years(years)
        .salary(110_000.0)
        .monthly_expenses(4_500.0)
        .savings_rate(0.6)
        .cash("chequing", 6_000.0)
        .investment("tfsa", "tfsa", 45_000.0)
        .investment("rrsp", "rrsp", 80_000.0)
        .investment("brokerage", "brokerage", 12_000.0)
        .asset("house", "real_estate", 720_000.0)
        .asset("car", "vehicle", 28_000.0)
        .debt(DebtAccount::new("mortgage", 520_000.0, 0.049, 300))
        .debt(DebtAccount::new("car-loan", 18_000.0, 0.069, 48))
        .allocate("tfsa", 0.4)
        .allocate("rrsp", 0.4)
        .allocate("brokerage", 0.2)
        .extra_debt_payment("mortgage", 250.0)
        .event(Event::salary_change("promotion", jiff::civil::date(2027, 4, 1), 128_000.0))
        .event(Event::one_time_expense("roof", jiff::civil::date(2031, 6, 1), 18_000.0))
        .event(Event::extra_debt_payment(
            "renewal-lump",
            jiff::civil::date(2030, 1, 1),
            "mortgage",
            40_000.0,
        ))
        .build()
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for years in [1, 10, 30] {
        let input = create_household(years);
        group.bench_with_input(BenchmarkId::new("years", years), &input, |b, input| {
            b.iter(|| project(black_box(input)))
        });
    }

    group.finish();
}

fn bench_sensitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity");
    group.sample_size(20);

    let input = create_household(30);
    for steps in [10, 50] {
        let sweep = SweepConfig::new(SweepParameter::MonthlySavingsRate, 0.0, 1.0, steps);
        group.bench_with_input(BenchmarkId::new("savings_rate", steps), &sweep, |b, sweep| {
            b.iter(|| sensitivity(black_box(&input), black_box(sweep)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_projection, bench_sensitivity);
criterion_main!(benches);
