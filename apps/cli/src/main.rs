use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings,
    render::{
        render_achievements, render_statistics, render_streak_bonuses, render_streaks,
        render_weekly_trend,
    },
    HttpStreakApi, StateController,
};
use shared::domain::SessionType;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "streak", about = "Show and extend your session logging streak")]
struct Args {
    /// Backend base URL; overrides streak.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current time, streak and point total.
    Status,
    /// Log a session and show the updated totals.
    Log {
        /// Session date, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = SessionType::default().as_str().to_string())]
        session: String,
    },
    /// Show backend statistics.
    Stats {
        #[arg(long, value_enum, default_value_t = StatsSection::Overall)]
        section: StatsSection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatsSection {
    Overall,
    Trend,
    Achievements,
    Streaks,
    Bonuses,
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    tracing::debug!(server_url = %settings.server_url, "resolved client settings");
    let api = HttpStreakApi::from_settings(&settings)
        .with_context(|| format!("unusable server url {:?}", settings.server_url))?;

    match args.command {
        Command::Status => {
            let mut controller = StateController::new(api);
            controller.load().await;
            print!("{}", controller.view().to_plain_text());
        }
        Command::Log { date, session } => {
            let mut controller = StateController::new(api);
            controller.load().await;
            controller.set_date(date.unwrap_or_else(today));
            if SessionType::from_wire(&session).is_none() {
                tracing::warn!("{session:?} is not a known session type; sending it as given");
            }
            controller.set_session(session);
            controller.submit().await;
            print!("{}", controller.view().to_plain_text());
        }
        Command::Stats { section } => {
            for line in fetch_section(&api, section).await? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

async fn fetch_section(api: &HttpStreakApi, section: StatsSection) -> Result<Vec<String>> {
    let lines = match section {
        StatsSection::Overall => render_statistics(&api.overall_statistics().await?),
        StatsSection::Trend => render_weekly_trend(&api.weekly_trend().await?),
        StatsSection::Achievements => render_achievements(&api.achievements().await?),
        StatsSection::Streaks => render_streaks(&api.streaks().await?),
        StatsSection::Bonuses => render_streak_bonuses(&api.streak_bonuses().await?),
    };
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::{today, Args, Command, StatsSection};
    use clap::Parser;

    #[test]
    fn log_defaults_to_one_hour_and_no_date() {
        let args = Args::try_parse_from(["streak", "log"]).expect("parse");
        match args.command {
            Command::Log { date, session } => {
                assert_eq!(date, None);
                assert_eq!(session, "1-hour");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn session_is_passed_through_unvalidated() {
        let args = Args::try_parse_from([
            "streak",
            "log",
            "--date",
            "2023-10-01",
            "--session",
            "90-minutes",
        ])
        .expect("parse");
        match args.command {
            Command::Log { date, session } => {
                assert_eq!(date.as_deref(), Some("2023-10-01"));
                assert_eq!(session, "90-minutes");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn server_url_is_global() {
        let args = Args::try_parse_from(["streak", "status", "--server-url", "http://h:1"])
            .expect("parse");
        assert_eq!(args.server_url.as_deref(), Some("http://h:1"));
        assert!(matches!(args.command, Command::Status));
    }

    #[test]
    fn stats_section_defaults_to_overall() {
        let args = Args::try_parse_from(["streak", "stats"]).expect("parse");
        assert!(matches!(
            args.command,
            Command::Stats {
                section: StatsSection::Overall
            }
        ));
        let args =
            Args::try_parse_from(["streak", "stats", "--section", "bonuses"]).expect("parse");
        assert!(matches!(
            args.command,
            Command::Stats {
                section: StatsSection::Bonuses
            }
        ));
    }

    #[test]
    fn today_is_iso_formatted() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }
}
