use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, Utc};

use neo_feed::{DateRange, FeedConfig};

const DASHBOARD_USAGE: &str = "Usage: neo-app \
[--start-date <YYYY-MM-DD>] [--end-date <YYYY-MM-DD>] [--threshold <score>]";

const SCENE_USAGE: &str = "Usage: neo-app scene \
[--start-date <YYYY-MM-DD>] [--end-date <YYYY-MM-DD>]";

pub fn handle_commands(args: &[String]) -> Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("scene") => {
            let options = SceneOptions::from_args(args)?;
            neo_scene::run(options.into_config());
            Ok(true)
        }
        Some("help") | Some("--help") | Some("-h") => {
            print_help();
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn print_help() {
    println!("{DASHBOARD_USAGE}");
    println!("{SCENE_USAGE}");
    println!("Feed endpoint comes from NEO_FEED_URL (default http://127.0.0.1:8000).");
}

/// Default to the last three days so a bare launch shows something.
fn default_range() -> DateRange {
    let end = Utc::now().date_naive();
    let start = end - Duration::days(2);
    DateRange::new(
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    )
}

/// Startup options for the dashboard. Flags play the role of
/// page-load query parameters: providing them triggers an immediate
/// render pass for that range.
#[derive(Clone, Debug)]
pub struct DashboardOptions {
    pub range: DateRange,
    pub threshold: f64,
}

impl DashboardOptions {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut start_date: Option<String> = None;
        let mut end_date: Option<String> = None;
        let mut threshold: Option<f64> = None;

        let mut idx = 1;
        while idx < args.len() {
            match args[idx].as_str() {
                "--start-date" => {
                    idx += 1;
                    let value = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("--start-date requires a value"))?
                        .clone();
                    start_date = Some(value);
                    idx += 1;
                }
                "--end-date" => {
                    idx += 1;
                    let value = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("--end-date requires a value"))?
                        .clone();
                    end_date = Some(value);
                    idx += 1;
                }
                "--threshold" => {
                    idx += 1;
                    let value = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("--threshold requires a value"))?
                        .parse::<f64>()
                        .with_context(|| "--threshold must be a number".to_string())?;
                    if !value.is_finite() {
                        bail!("--threshold must be finite");
                    }
                    threshold = Some(value);
                    idx += 1;
                }
                arg => {
                    bail!("Unrecognised argument: {arg}\n{DASHBOARD_USAGE}");
                }
            }
        }

        let defaults = default_range();
        Ok(Self {
            range: DateRange::new(
                start_date.unwrap_or(defaults.start),
                end_date.unwrap_or(defaults.end),
            ),
            threshold: threshold.unwrap_or(50.0),
        })
    }
}

/// Options for the standalone 3D scene view. The dashboard launches
/// this subcommand with the selected range passed through verbatim.
#[derive(Clone, Debug)]
pub struct SceneOptions {
    pub range: DateRange,
}

impl SceneOptions {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut start_date: Option<String> = None;
        let mut end_date: Option<String> = None;

        let mut idx = 2;
        while idx < args.len() {
            match args[idx].as_str() {
                "--start-date" => {
                    idx += 1;
                    let value = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("--start-date requires a value"))?
                        .clone();
                    start_date = Some(value);
                    idx += 1;
                }
                "--end-date" => {
                    idx += 1;
                    let value = args
                        .get(idx)
                        .ok_or_else(|| anyhow!("--end-date requires a value"))?
                        .clone();
                    end_date = Some(value);
                    idx += 1;
                }
                arg => {
                    bail!("Unrecognised argument: {arg}\n{SCENE_USAGE}");
                }
            }
        }

        let defaults = default_range();
        Ok(Self {
            range: DateRange::new(
                start_date.unwrap_or(defaults.start),
                end_date.unwrap_or(defaults.end),
            ),
        })
    }

    pub fn into_config(self) -> neo_scene::SceneConfig {
        neo_scene::SceneConfig {
            range: self.range,
            feed: FeedConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dashboard_flags_override_defaults() {
        let options = DashboardOptions::from_args(&args(&[
            "neo-app",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-03",
            "--threshold",
            "70",
        ]))
        .unwrap();
        assert_eq!(options.range, DateRange::new("2024-01-01", "2024-01-03"));
        assert_eq!(options.threshold, 70.0);
    }

    #[test]
    fn bare_launch_uses_defaults() {
        let options = DashboardOptions::from_args(&args(&["neo-app"])).unwrap();
        assert_eq!(options.threshold, 50.0);
        assert!(!options.range.start.is_empty());
        assert!(!options.range.end.is_empty());
    }

    #[test]
    fn scene_subcommand_passes_the_range_through_verbatim() {
        let options = SceneOptions::from_args(&args(&[
            "neo-app",
            "scene",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-03",
        ]))
        .unwrap();
        assert_eq!(options.range, DateRange::new("2024-01-01", "2024-01-03"));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(DashboardOptions::from_args(&args(&["neo-app", "--nope"])).is_err());
        assert!(SceneOptions::from_args(&args(&["neo-app", "scene", "--nope"])).is_err());
    }

    #[test]
    fn missing_values_are_rejected() {
        assert!(DashboardOptions::from_args(&args(&["neo-app", "--start-date"])).is_err());
        assert!(DashboardOptions::from_args(&args(&["neo-app", "--threshold", "abc"])).is_err());
    }
}
