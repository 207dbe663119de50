//! MotionCare CLI
//!
//! Runs pose metrics extraction and local form scoring over recorded
//! capture sessions.
//!
//! # Usage
//!
//! ```bash
//! # Summarise a capture session
//! motioncare metrics session.json
//!
//! # Score the session with the local heuristic scorer
//! motioncare feedback session.json
//!
//! # Show the resolved configuration
//! motioncare --config motioncare.toml config
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use motion_feedback::{CaptureSession, FeedbackService, HeuristicScorer};
use motion_metrics::compute_metrics;

pub mod config;

use crate::config::AppConfig;

/// MotionCare Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "motioncare")]
#[command(author, version, about = "Exercise form analysis from pose landmark captures")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the metrics record for a capture session
    Metrics {
        /// Capture session JSON file
        session: PathBuf,
    },

    /// Score a capture session with the heuristic scorer
    Feedback {
        /// Capture session JSON file
        session: PathBuf,
    },

    /// Print the resolved configuration
    Config,
}

/// Read a capture session written by the capture layer
pub fn load_session(path: &Path) -> anyhow::Result<CaptureSession> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading session file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing session file {}", path.display()))
}

/// Execute a command, returning the JSON to print
pub async fn run(command: &Commands, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Commands::Metrics { session } => {
            let session = load_session(session)?;
            let metrics = compute_metrics(&session.history, session.exercise.as_ref())
                .context("computing pose metrics")?;
            Ok(serde_json::to_string_pretty(&metrics)?)
        }
        Commands::Feedback { session } => {
            let session = load_session(session)?;
            let scorer = Arc::new(HeuristicScorer::new(config.heuristic.clone()));
            let service = FeedbackService::new(scorer, &config.scorer);
            let analysis = service.analyze_session(&session).await;
            Ok(serde_json::to_string_pretty(&analysis)?)
        }
        Commands::Config => Ok(serde_json::to_string_pretty(config)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const SQUAT_SESSION: &str = r#"{
        "history": [
            {"timestamp": 0, "landmarks": [
                null, null, null, null, null, null, null, null, null, null, null, null, null, null, null, null,
                null, null, null, null, null, null, null,
                {"x": 0.5, "y": 0.2, "visibility": 1.0},
                null,
                {"x": 0.5, "y": 0.5, "visibility": 1.0},
                null,
                {"x": 0.8, "y": 0.5, "visibility": 1.0}
            ]}
        ],
        "exercise": {"name": "Squat"}
    }"#;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["motioncare", "--config", "app.toml", "metrics", "s.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("app.toml")));
        assert!(matches!(cli.command, Commands::Metrics { .. }));
    }

    #[tokio::test]
    async fn test_metrics_command() {
        let file = session_file(SQUAT_SESSION);
        let command = Commands::Metrics {
            session: file.path().to_path_buf(),
        };

        let output = run(&command, &AppConfig::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["frames"], 1);
        assert_eq!(json["duration"], 0.0);
        assert_eq!(json["exerciseName"], "Squat");
        let knee_avg = json["kneeRange"]["avg"].as_f64().unwrap();
        assert!((knee_avg - 90.0).abs() < 0.01);
        assert!(json.get("elbowRange").is_none());
    }

    #[tokio::test]
    async fn test_metrics_command_rejects_empty_history() {
        let file = session_file(r#"{"history": []}"#);
        let command = Commands::Metrics {
            session: file.path().to_path_buf(),
        };
        assert!(run(&command, &AppConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_feedback_command_empty_history() {
        let file = session_file(r#"{"history": []}"#);
        let command = Commands::Feedback {
            session: file.path().to_path_buf(),
        };

        let output = run(&command, &AppConfig::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["feedback"]["overallScore"], 0.0);
        assert_eq!(json["feedback"]["error"], true);
        assert!(json.get("metrics").is_none());
    }

    #[tokio::test]
    async fn test_feedback_command() {
        let file = session_file(SQUAT_SESSION);
        let command = Commands::Feedback {
            session: file.path().to_path_buf(),
        };

        let output = run(&command, &AppConfig::default()).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["metrics"]["frames"], 1);
        assert_eq!(json["feedback"]["exercisePerformed"], "Squat");
        assert!(json["feedback"].get("error").is_none());
    }

    #[test]
    fn test_missing_session_file() {
        let err = load_session(Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(err.to_string().contains("reading session file"));
    }
}
