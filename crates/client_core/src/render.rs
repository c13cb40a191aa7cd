//! Projection of tracker state into a toolkit-neutral presentation tree.

use shared::{
    domain::SessionType,
    protocol::{
        AchievementsResponse, StatisticsResponse, StreakBonus, StreaksResponse, WeeklyActivity,
    },
};

use crate::state::TrackerState;

pub const SUBMIT_LABEL: &str = "Log Session";

/// State field an input control is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOption {
    pub value: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Text(String),
    DateInput {
        field: Field,
        value: String,
    },
    SessionSelect {
        field: Field,
        value: String,
        options: Vec<SessionOption>,
    },
    Button {
        label: &'static str,
        action: Action,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub nodes: Vec<ViewNode>,
}

impl View {
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Plain-text rendering used by the command-line front end.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let line = match node {
                ViewNode::Text(text) => text.clone(),
                ViewNode::DateInput { value, .. } => {
                    let shown = if value.is_empty() { "(none)" } else { value.as_str() };
                    format!("Date: {shown}")
                }
                ViewNode::SessionSelect { value, .. } => format!("Session: {value}"),
                // Nothing to press on a terminal.
                ViewNode::Button { .. } => continue,
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

pub fn session_options() -> Vec<SessionOption> {
    SessionType::ALL
        .into_iter()
        .map(|kind| SessionOption {
            value: kind.as_str(),
            label: format!("{} ({} pts)", kind.as_str(), kind.points()),
        })
        .collect()
}

pub fn render(state: &TrackerState) -> View {
    View {
        nodes: vec![
            ViewNode::Text(format!("Current time: {}", state.current_time)),
            ViewNode::Text(format!("Streak: {} days", state.streak)),
            ViewNode::Text(format!("Total points: {}", state.total_points)),
            ViewNode::DateInput {
                field: Field::Date,
                value: state.selected_date.clone(),
            },
            ViewNode::SessionSelect {
                field: Field::Session,
                value: state.selected_session.clone(),
                options: session_options(),
            },
            ViewNode::Button {
                label: SUBMIT_LABEL,
                action: Action::Submit,
            },
        ],
    }
}

pub fn render_statistics(stats: &StatisticsResponse) -> Vec<String> {
    let mut lines = vec![
        format!("As of: {}", stats.current_date),
        format!("Streak: {} days", stats.streak),
        format!("Total points: {}", stats.total_points),
        format!("Sessions this year: {}", stats.yearly_streak),
        format!("Sessions this month: {}", stats.monthly_streak),
    ];
    lines.extend(render_weekly_trend(&stats.weekly_trend));
    lines.extend(render_achievement_list(&stats.achievements));
    lines
}

pub fn render_weekly_trend(trend: &[WeeklyActivity]) -> Vec<String> {
    if trend.is_empty() {
        return vec!["Weekly trend: no sessions yet".to_string()];
    }
    std::iter::once("Weekly trend:".to_string())
        .chain(
            trend
                .iter()
                .map(|week| format!("  {}: {} pts", week.week_start, week.points)),
        )
        .collect()
}

pub fn render_achievements(resp: &AchievementsResponse) -> Vec<String> {
    render_achievement_list(&resp.achievements)
}

fn render_achievement_list(achievements: &[String]) -> Vec<String> {
    if achievements.is_empty() {
        return vec!["Achievements: none yet".to_string()];
    }
    std::iter::once("Achievements:".to_string())
        .chain(achievements.iter().map(|name| format!("  {name}")))
        .collect()
}

pub fn render_streaks(resp: &StreaksResponse) -> Vec<String> {
    vec![
        format!("Overall streak: {} days", resp.overall_streak),
        format!("Sessions this year: {}", resp.yearly_streak),
        format!("Sessions this month: {}", resp.monthly_streak),
    ]
}

pub fn render_streak_bonuses(bonuses: &[StreakBonus]) -> Vec<String> {
    if bonuses.is_empty() {
        return vec!["Streak bonuses: none yet".to_string()];
    }
    std::iter::once("Streak bonuses:".to_string())
        .chain(bonuses.iter().map(|bonus| {
            format!(
                "  week of {}: {}-day streak",
                bonus.week_start, bonus.streak_length
            )
        }))
        .collect()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
