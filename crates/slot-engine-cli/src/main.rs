//! `slots` CLI: compute tutor availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Availability for a date range, as a JSON report on stdout
//! slots availability -p profile.json -b bookings.json --from 2026-03-16 --to 2026-03-22
//!
//! # Show the slots in the student's timezone, pinning "now" for reproducibility
//! slots availability -p profile.json --from 2026-03-16 --to 2026-03-22 \
//!     --viewer-tz Asia/Tokyo --now 2026-03-15T00:00:00Z
//!
//! # A whole month, with true interval-overlap conflict matching
//! slots month -p profile.json -b bookings.json --year 2026 --month 4 --conflict-policy overlap
//!
//! # Demo-booking preset (fixed one-hour sessions), written to a file
//! slots month -p profile.json --year 2026 --month 4 --demo -o april.json
//!
//! # Check a profile before saving it
//! slots validate -p profile.json
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::{
    build_report, compute_availability_for_month, compute_availability_for_range_with,
    BookedInterval, ConflictPolicy, DayAvailability, DurationPolicy, EngineConfig,
    TutorSchedulingProfile,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable slot computation for tutor availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute availability for an inclusive date range
    Availability {
        #[command(flatten)]
        inputs: Inputs,
        /// First date (YYYY-MM-DD, tutor timezone)
        #[arg(long)]
        from: NaiveDate,
        /// Last date, inclusive (YYYY-MM-DD, tutor timezone)
        #[arg(long)]
        to: NaiveDate,
    },
    /// Compute availability for one calendar month
    Month {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(long)]
        year: i32,
        /// Month number, 1-12
        #[arg(long)]
        month: u32,
    },
    /// Validate a scheduling profile and exit non-zero if it is malformed
    Validate {
        /// Profile JSON file
        #[arg(short, long)]
        profile: String,
    },
}

#[derive(Args)]
struct Inputs {
    /// Profile JSON file
    #[arg(short, long)]
    profile: String,
    /// Bookings JSON file (array of {startTime, endTime}); none if omitted
    #[arg(short, long)]
    bookings: Option<String>,
    /// Reference instant (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Timezone to group slots in; defaults to the tutor's
    #[arg(long)]
    viewer_tz: Option<String>,
    /// Engine config JSON file; flags below override its values
    #[arg(long)]
    config: Option<String>,
    /// How bookings block candidate slots
    #[arg(long, value_enum)]
    conflict_policy: Option<ConflictArg>,
    /// Session length to tile with
    #[arg(long, value_enum)]
    duration_policy: Option<DurationArg>,
    /// Fixed session length in minutes (overrides --duration-policy)
    #[arg(long)]
    session_minutes: Option<i64>,
    /// Use the demo-booking preset (fixed one-hour sessions)
    #[arg(long)]
    demo: bool,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConflictArg {
    Exact,
    Overlap,
}

#[derive(Clone, Copy, ValueEnum)]
enum DurationArg {
    Min,
    Max,
}

impl Inputs {
    /// Layer the engine config: defaults, then file, then flags.
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = read_file(path)?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse engine config: {}", path))?
            }
            None => EngineConfig::default(),
        };

        if let Some(policy) = self.conflict_policy {
            config.conflict_policy = match policy {
                ConflictArg::Exact => ConflictPolicy::ExactStart,
                ConflictArg::Overlap => ConflictPolicy::Overlap,
            };
        }
        if let Some(policy) = self.duration_policy {
            config.duration_policy = match policy {
                DurationArg::Min => DurationPolicy::Min,
                DurationArg::Max => DurationPolicy::Max,
            };
        }
        if self.demo {
            config.duration_policy = EngineConfig::demo_booking().duration_policy;
        }
        if let Some(minutes) = self.session_minutes {
            config.duration_policy = DurationPolicy::Fixed(minutes);
        }

        Ok(config)
    }

    fn load(&self) -> Result<(TutorSchedulingProfile, Vec<BookedInterval>)> {
        let profile = load_profile(&self.profile)?;
        let booked = match &self.bookings {
            Some(path) => BookedInterval::list_from_json(&read_file(path)?)
                .with_context(|| format!("Failed to parse bookings: {}", path))?,
            None => Vec::new(),
        };
        Ok((profile, booked))
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    fn emit(&self, profile: &TutorSchedulingProfile, days: Vec<DayAvailability>) -> Result<()> {
        tracing::debug!(days = days.len(), viewer_tz = ?self.viewer_tz, "building report");
        let report = build_report(profile, days, self.viewer_tz.as_deref())
            .context("Failed to build availability report")?;
        let json = serde_json::to_string_pretty(&report)?;
        write_output(self.output.as_deref(), &json)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Availability { inputs, from, to } => {
            let config = inputs.engine_config()?;
            let (profile, booked) = inputs.load()?;
            let days = compute_availability_for_range_with(
                &config,
                &profile,
                from,
                to,
                &booked,
                inputs.now(),
            )
            .context("Failed to compute availability")?;
            inputs.emit(&profile, days)?;
        }
        Commands::Month {
            inputs,
            year,
            month,
        } => {
            let config = inputs.engine_config()?;
            let (profile, booked) = inputs.load()?;
            let days =
                compute_availability_for_month(&config, &profile, year, month, &booked, inputs.now())
                    .context("Failed to compute availability")?;
            inputs.emit(&profile, days)?;
        }
        Commands::Validate { profile } => {
            load_profile(&profile)?
                .validate()
                .with_context(|| format!("Invalid profile: {}", profile))?;
            println!("{}: ok", profile);
        }
    }

    Ok(())
}

fn load_profile(path: &str) -> Result<TutorSchedulingProfile> {
    TutorSchedulingProfile::from_json(&read_file(path)?)
        .with_context(|| format!("Failed to parse profile: {}", path))
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
