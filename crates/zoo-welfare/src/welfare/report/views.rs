use chrono::NaiveDateTime;
use serde::Serialize;

use crate::welfare::animals::AnimalId;
use crate::welfare::evaluations::EvaluationId;
use crate::welfare::scoring::CategoryScore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorePoint {
    pub evaluation_id: EvaluationId,
    pub timestamp: NaiveDateTime,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimalHistoryView {
    pub animal_id: AnimalId,
    pub name: String,
    pub species: String,
    pub evaluations: usize,
    pub average_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<u8>,
    pub trend: Trend,
    pub trend_label: &'static str,
    /// Oldest first.
    pub points: Vec<ScorePoint>,
    pub latest_breakdown: Vec<CategoryScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WelfareStatus {
    Optimal,
    Stable,
    Critical,
}

impl WelfareStatus {
    pub const CRITICAL_BELOW: u8 = 60;
    pub const OPTIMAL_FROM: u8 = 85;

    pub const fn from_average(average: u8) -> Self {
        if average < Self::CRITICAL_BELOW {
            Self::Critical
        } else if average < Self::OPTIMAL_FROM {
            Self::Stable
        } else {
            Self::Optimal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Stable => "Stable",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAlertView {
    pub animal_id: AnimalId,
    pub animal_name: String,
    pub species: String,
    pub evaluation_id: EvaluationId,
    pub timestamp: NaiveDateTime,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub evaluation_id: EvaluationId,
    pub animal_id: AnimalId,
    pub animal_name: String,
    pub timestamp: NaiveDateTime,
    pub evaluator_name: String,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_animals: usize,
    pub total_evaluations: usize,
    pub average_score: u8,
    pub status: WelfareStatus,
    pub status_label: &'static str,
    pub alert_threshold: u8,
    pub at_risk: Vec<RiskAlertView>,
    pub recent_activity: Vec<ActivityEntry>,
}
