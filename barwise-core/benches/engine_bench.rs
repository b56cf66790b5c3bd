//! Criterion benchmarks for the bar-close hot path.
//!
//! Benchmarks:
//! 1. Trend-variant entry evaluation (flat book, full gate chain)
//! 2. Band-variant trailing-stop emission (open position, ratchet clamp)

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use barwise_core::config::{Regime, StrategyConfig, StrategyVariant, VolumeMode};
use barwise_core::domain::{
    Bar, Direction, MarketView, PortfolioView, PositionId, PositionState, PositionView,
};
use barwise_core::engine::LifecycleEngine;
use barwise_core::snapshot::IndicatorSnapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Helpers ──────────────────────────────────────────────────────────

struct BenchMarket;

impl MarketView for BenchMarket {
    fn best_ask(&self) -> Decimal {
        dec!(100.5)
    }
    fn best_bid(&self) -> Decimal {
        dec!(99.5)
    }
    fn price_step(&self) -> Decimal {
        dec!(0.1)
    }
    fn last_close(&self) -> Decimal {
        dec!(100)
    }
    fn current_bar_high(&self) -> Decimal {
        dec!(102)
    }
    fn current_bar_low(&self) -> Decimal {
        dec!(98)
    }
    fn lot_size(&self) -> Decimal {
        Decimal::ONE
    }
    fn volume_decimals(&self) -> u32 {
        2
    }
    fn uses_lot_for_profit(&self) -> bool {
        false
    }
}

struct BenchPortfolio;

impl PortfolioView for BenchPortfolio {
    fn primary_equity(&self) -> Decimal {
        dec!(100000)
    }
    fn asset_balance(&self, _name: &str) -> Option<Decimal> {
        None
    }
}

fn make_bar() -> Bar {
    Bar {
        symbol: "BENCH".into(),
        timestamp: chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        open: dec!(99),
        high: dec!(102),
        low: dec!(98),
        close: dec!(100),
        volume: dec!(1000),
    }
}

/// 260-bar trend snapshot ending in a long-entry setup.
fn trend_snapshot() -> IndicatorSnapshot {
    let mut snap = IndicatorSnapshot::new();
    let series = |cur: Decimal, prev: Decimal| {
        let mut values = vec![Decimal::ZERO; 260];
        values[258] = prev;
        values[259] = cur;
        values
    };
    snap.insert_series("ma_10", series(dec!(12), dec!(12)));
    snap.insert_series("ma_20", series(dec!(10), dec!(10)));
    snap.insert_series("ma_30", series(dec!(8), dec!(8)));
    snap.insert_series("bears_20", series(dec!(-2), dec!(-3)));
    snap.insert_series("bulls_20", series(dec!(1.5), dec!(1.0)));
    snap
}

fn band_snapshot() -> IndicatorSnapshot {
    let mut snap = IndicatorSnapshot::new();
    snap.insert_series("band_a_26", vec![dec!(105); 260]);
    snap.insert_series("band_b_52", vec![dec!(100); 260]);
    snap
}

// ── 1. Trend entry path ──────────────────────────────────────────────

fn bench_trend_entry(c: &mut Criterion) {
    let config = StrategyConfig {
        regime: Regime::On,
        volume_mode: VolumeMode::DepositPercent,
        volume: dec!(20),
        ..StrategyConfig::default()
    };
    let mut engine = LifecycleEngine::new(config).unwrap();
    let bar = make_bar();
    let snap = trend_snapshot();

    c.bench_function("trend_entry_bar_close", |b| {
        b.iter(|| {
            engine.on_bar_close(
                black_box(&bar),
                black_box(&snap),
                &[],
                &BenchPortfolio,
                &BenchMarket,
            )
        });
    });
}

// ── 2. Band trailing-stop path ───────────────────────────────────────

fn bench_band_trailing(c: &mut Criterion) {
    let config = StrategyConfig {
        regime: Regime::On,
        variant: StrategyVariant::BandCross {
            band_a_period: 26,
            band_b_period: 52,
            trailing_percent: dec!(1.0),
        },
        ..StrategyConfig::default()
    };
    let mut engine = LifecycleEngine::new(config).unwrap();
    let bar = make_bar();
    let snap = band_snapshot();
    let positions = [PositionView {
        id: PositionId(1),
        direction: Direction::Long,
        state: PositionState::Open,
        open_volume: dec!(2),
    }];

    c.bench_function("band_trailing_bar_close", |b| {
        b.iter(|| {
            engine.on_bar_close(
                black_box(&bar),
                black_box(&snap),
                black_box(&positions),
                &BenchPortfolio,
                &BenchMarket,
            )
        });
    });
}

criterion_group!(benches, bench_trend_entry, bench_band_trailing);
criterion_main!(benches);
