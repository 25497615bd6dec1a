//! Synthetic click analytics
//!
//! The link API only reports a single `clicks` total. Charts want series, so
//! the total is spread over days and weeks, and hourly activity is plain
//! noise. Nothing here is persisted; every fetch synthesizes afresh.
//!
//! # Conserved series
//!
//! Buckets are visited in a fixed order. Every bucket but the last visited
//! takes a share of what remains; the last visited bucket takes the rest, so
//! the series always sums to the total and never goes negative.
//!
//! The daily series is visited Sun → Mon, which makes Monday (the first day
//! shown) the bucket that absorbs the remainder. This skew is intentional and
//! callers may rely on it.

pub mod dashboard;

pub use dashboard::{LinkDashboard, PerformanceSummary};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const WEEK_LABELS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];
pub const HOURS_PER_DAY: usize = 24;

/// Share of the remaining clicks given to each non-final week.
const WEEKLY_SHARE: f64 = 0.3;
const HOURLY_MIN: u32 = 1;
const HOURLY_MAX: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub day: &'static str,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPoint {
    pub week: &'static str,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    /// `"0:00"` .. `"23:00"`
    pub hour: String,
    pub clicks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticAnalytics {
    pub daily_series: Vec<DailyPoint>,
    pub weekly_series: Vec<WeeklyPoint>,
    /// Independent of `total_clicks`; does not sum to it.
    pub hourly_series: Vec<HourlyPoint>,
    pub total_clicks: u64,
}

impl SyntheticAnalytics {
    /// Hours 8:00 through 19:00, the window the dashboard charts.
    pub fn business_hours(&self) -> &[HourlyPoint] {
        &self.hourly_series[8..20]
    }
}

/// Spread `total` over `len` buckets visited in `order`.
///
/// `take` receives the remaining amount and returns the share for the
/// current bucket; it is clamped to the remainder. The last visited bucket
/// absorbs whatever is left.
fn conserved_series(
    total: u64,
    order: &[usize],
    len: usize,
    mut take: impl FnMut(u64) -> u64,
) -> Vec<u64> {
    let mut buckets = vec![0; len];
    let mut remaining = total;
    for (step, &idx) in order.iter().enumerate() {
        let clicks = if step + 1 == order.len() {
            remaining
        } else {
            take(remaining).min(remaining)
        };
        buckets[idx] = clicks;
        remaining -= clicks;
    }
    buckets
}

/// Expands a click total into chart series using an owned random source.
///
/// Seed it with [`AnalyticsGenerator::seeded`] to get reproducible output.
pub struct AnalyticsGenerator<R: Rng = StdRng> {
    rng: R,
}

impl AnalyticsGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> AnalyticsGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn synthesize(&mut self, total_clicks: u64) -> SyntheticAnalytics {
        SyntheticAnalytics {
            daily_series: self.daily_series(total_clicks),
            weekly_series: self.weekly_series(total_clicks),
            hourly_series: self.hourly_series(),
            total_clicks,
        }
    }

    /// Each day before Monday takes `floor(random * remaining / 2)`.
    pub fn daily_series(&mut self, total_clicks: u64) -> Vec<DailyPoint> {
        let order: Vec<usize> = (0..DAY_LABELS.len()).rev().collect();
        let rng = &mut self.rng;
        let buckets = conserved_series(total_clicks, &order, DAY_LABELS.len(), |remaining| {
            (rng.random::<f64>() * (remaining as f64 / 2.0)).floor() as u64
        });

        DAY_LABELS
            .iter()
            .zip(buckets)
            .map(|(&day, clicks)| DailyPoint { day, clicks })
            .collect()
    }

    /// Weeks 1-3 take `floor(remaining * 0.3)`; week 4 takes the rest.
    pub fn weekly_series(&mut self, total_clicks: u64) -> Vec<WeeklyPoint> {
        let order: Vec<usize> = (0..WEEK_LABELS.len()).collect();
        let buckets = conserved_series(total_clicks, &order, WEEK_LABELS.len(), |remaining| {
            (remaining as f64 * WEEKLY_SHARE).floor() as u64
        });

        WEEK_LABELS
            .iter()
            .zip(buckets)
            .map(|(&week, clicks)| WeeklyPoint { week, clicks })
            .collect()
    }

    pub fn hourly_series(&mut self) -> Vec<HourlyPoint> {
        (0..HOURS_PER_DAY)
            .map(|hour| HourlyPoint {
                hour: format!("{}:00", hour),
                clicks: self.rng.random_range(HOURLY_MIN..=HOURLY_MAX),
            })
            .collect()
    }
}
