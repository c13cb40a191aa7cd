use serde::{Deserialize, Serialize};

/// Reply of `GET /api/time` and `POST /api/log_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeResponse {
    pub current_time: String,
    pub streak: u64,
    pub total_points: u64,
}

/// Body of `POST /api/log_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogRequest {
    pub date: String,
    pub session_type: String,
}

/// One bucket of `GET /api/statistics/weekly_trend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivity {
    pub week_start: String,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreaksResponse {
    pub overall_streak: u64,
    pub yearly_streak: u64,
    pub monthly_streak: u64,
}

/// One entry of `GET /api/bonuses/streaks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBonus {
    pub streak_length: u64,
    pub week_start: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<String>,
}

/// Reply of `GET /api/statistics/overall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub current_date: String,
    pub streak: u64,
    pub total_points: u64,
    pub weekly_trend: Vec<WeeklyActivity>,
    pub achievements: Vec<String>,
    pub yearly_streak: u64,
    pub monthly_streak: u64,
}
