//! Criterion benchmarks for itinerary model assembly.
//!
//! Measures `ItineraryModel::build` across catalogue sizes over a month-long
//! horizon, where transition variables dominate the program size.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package roadie-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use roadie_core::{CityCatalog, Day, ItineraryModel, PlanConfig, ProfitTable, TransportCostTable};

/// Catalogue sizes to benchmark.
const CITY_COUNTS: &[usize] = &[5, 11, 20];

/// Horizon used by every benchmark.
const HORIZON_DAYS: u16 = 31;

/// Fully connected tables with an event in every third slot.
fn build_tables(cities: usize) -> (CityCatalog, ProfitTable, TransportCostTable) {
    let catalog = CityCatalog::new(
        (0..cities).map(|index| (format!("City{index}"), format!("Country{}", index % 4))),
    )
    .expect("generated names are unique");
    let ids: Vec<_> = catalog.ids().collect();
    let mut profits = ProfitTable::new(&catalog, HORIZON_DAYS);
    for (offset, &city) in ids.iter().enumerate() {
        for day in Day::horizon(HORIZON_DAYS) {
            if (offset + day.index()) % 3 == 0 {
                let profit = f64::from(u32::try_from(100 * (offset + 5)).unwrap_or(500));
                profits.insert(city, day, profit).expect("valid profit");
            }
        }
    }
    let mut costs = TransportCostTable::new(&catalog);
    for (i, &from) in ids.iter().enumerate() {
        for (j, &to) in ids.iter().enumerate().skip(i + 1) {
            let cost = f64::from(u32::try_from(50 + 10 * (i + j)).unwrap_or(500));
            costs.insert(from, to, cost).expect("valid cost");
        }
    }
    (catalog, profits, costs)
}

fn bench_model_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_build");
    for &cities in CITY_COUNTS {
        let (catalog, profits, costs) = build_tables(cities);
        let config = PlanConfig::new(HORIZON_DAYS, "City0").with_max_events_per_country(Some(6));
        group.throughput(Throughput::Elements(cities as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cities), &cities, |b, _| {
            b.iter(|| {
                ItineraryModel::build(&catalog, &profits, &costs, &config)
                    .expect("benchmark model builds")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_model_build);
criterion_main!(benches);
