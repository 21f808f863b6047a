use crate::core::models::checkin::{Checkin, Concern};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Changes in average severity smaller than this are reported as stable.
pub const STABLE_THRESHOLD: f64 = 0.1;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Improving,
    Stable,
    Worsening,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Trend::Improving => "improving",
                Trend::Stable => "stable",
                Trend::Worsening => "worsening",
                Trend::InsufficientData => "insufficient-data",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Trends {
    pub breakout: Trend,
    pub irritation: Trend,
    pub dryness: Trend,
    pub redness: Trend,
}

impl Trends {
    fn uniform(trend: Trend) -> Self {
        Self {
            breakout: trend,
            irritation: trend,
            dryness: trend,
            redness: trend,
        }
    }

    pub fn get(&self, concern: Concern) -> Trend {
        match concern {
            Concern::Breakout => self.breakout,
            Concern::Irritation => self.irritation,
            Concern::Dryness => self.dryness,
            Concern::Redness => self.redness,
        }
    }

    fn count(&self, trend: Trend) -> usize {
        Concern::ALL.iter().filter(|&&c| self.get(c) == trend).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProgressSummary {
    pub overall_trend: Trend,
    pub most_improved: Option<Concern>,
    pub days_since_last_reaction: Option<i64>,
    pub total_checkins: usize,
}

pub fn sort_by_date(checkins: &mut [Checkin]) {
    checkins.sort_by_key(|c| c.date);
}

fn average(checkins: &[Checkin], concern: Concern) -> f64 {
    let sum: u32 = checkins.iter().map(|c| u32::from(c.score(concern))).sum();
    f64::from(sum) / checkins.len() as f64
}

/// Compares average severity of the older half of the check-ins with the newer half.
///
/// Check-ins must already be in date order. With an odd count the newer half is the larger.
pub fn calculate_trends(checkins: &[Checkin]) -> Trends {
    if checkins.len() < 2 {
        return Trends::uniform(Trend::InsufficientData);
    }
    let (first, second) = checkins.split_at(checkins.len() / 2);
    let trend = |concern: Concern| {
        let diff = average(second, concern) - average(first, concern);
        if diff.abs() < STABLE_THRESHOLD {
            Trend::Stable
        } else if diff < 0.0 {
            Trend::Improving
        } else {
            Trend::Worsening
        }
    };
    Trends {
        breakout: trend(Concern::Breakout),
        irritation: trend(Concern::Irritation),
        dryness: trend(Concern::Dryness),
        redness: trend(Concern::Redness),
    }
}

#[instrument(skip_all, name = "progress_workflow", fields(checkins = checkins.len()))]
pub fn progress_summary(checkins: &[Checkin], now: DateTime<Utc>) -> ProgressSummary {
    if checkins.is_empty() {
        return ProgressSummary {
            overall_trend: Trend::InsufficientData,
            most_improved: None,
            days_since_last_reaction: None,
            total_checkins: 0,
        };
    }

    let trends = calculate_trends(checkins);
    let improving = trends.count(Trend::Improving);
    let worsening = trends.count(Trend::Worsening);
    let overall_trend = match improving.cmp(&worsening) {
        std::cmp::Ordering::Greater => Trend::Improving,
        std::cmp::Ordering::Less => Trend::Worsening,
        std::cmp::Ordering::Equal => Trend::Stable,
    };

    let most_improved = Concern::ALL
        .into_iter()
        .find(|&concern| trends.get(concern) == Trend::Improving);

    let days_since_last_reaction = checkins
        .iter()
        .rev()
        .find(|c| c.is_reaction())
        .map(|c| (now - c.date).num_seconds().div_euclid(SECONDS_PER_DAY));

    debug!(?overall_trend, ?most_improved, "Computed progress summary.");
    ProgressSummary {
        overall_trend,
        most_improved,
        days_since_last_reaction,
        total_checkins: checkins.len(),
    }
}
