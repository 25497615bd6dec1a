//! Per-link dashboard: live record plus synthesized series.

use rand::Rng;
use serde::Serialize;

use super::{AnalyticsGenerator, SyntheticAnalytics};
use crate::models::LinkRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// `round(total / 7)`
    pub average_daily_clicks: u64,
    /// First day with the highest count; ties go to the earlier day.
    pub most_active_day: &'static str,
    pub has_clicks: bool,
    pub has_been_clicked: bool,
}

impl PerformanceSummary {
    pub fn from_analytics(analytics: &SyntheticAnalytics, record: &LinkRecord) -> Self {
        let total = analytics.total_clicks;
        let most_active_day = analytics
            .daily_series
            .iter()
            .fold(None, |best: Option<&super::DailyPoint>, point| match best {
                Some(b) if point.clicks <= b.clicks => Some(b),
                _ => Some(point),
            })
            .map(|p| p.day)
            .unwrap_or(super::DAY_LABELS[0]);

        Self {
            average_daily_clicks: (total + 3) / 7,
            most_active_day,
            has_clicks: total > 0,
            has_been_clicked: record.last_clicked_at.is_some(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.has_clicks { "Active" } else { "No Clicks Yet" }
    }

    pub fn last_activity_label(&self) -> &'static str {
        if self.has_been_clicked { "Active" } else { "No Clicks" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkDashboard {
    pub record: LinkRecord,
    pub analytics: SyntheticAnalytics,
    pub summary: PerformanceSummary,
}

impl LinkDashboard {
    pub fn build<R: Rng>(record: LinkRecord, generator: &mut AnalyticsGenerator<R>) -> Self {
        let analytics = generator.synthesize(record.clicks);
        let summary = PerformanceSummary::from_analytics(&analytics, &record);
        Self {
            record,
            analytics,
            summary,
        }
    }
}
