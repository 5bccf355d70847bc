//! `slots` CLI — merge appointment lists into date-picker slot JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Convert appointments JSON (stdin → stdout)
//! echo '[{"id":1,"start":"2020-02-02T07:30:00","end":"2020-02-02T11:30:00"}]' | slots convert
//!
//! # Convert from file to file, fully reconciling overlaps within each day
//! slots convert -i appointments.json -o picker.json --mode coalesce
//!
//! # Custom output formats (strftime syntax)
//! slots convert -i appointments.json --date-format %Y-%m-%d --time-format %H:%M:%S
//!
//! # Built-in demo appointments, raw or converted
//! slots mock
//! slots -v mock --convert
//!
//! # Strict overlap test on two HH:mm intervals
//! slots overlap 09:00 10:00 10:00 11:00
//! ```
//!
//! Logging goes to stderr. `SLOTS_LOG` (e.g. `SLOTS_LOG=debug`) overrides `-v`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use slot_engine::time::{intervals_overlap, parse_time, TimeRange, DATE_FORMAT, TIME_FORMAT};
use slot_engine::{
    convert_with_mode, load_appointments, Appointment, DisplayFormat, JsonAppointments, MergeMode,
    MockAppointments,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Merge appointments into day-bucketed date-picker slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert appointments JSON to date-picker JSON
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print the built-in demo appointments
    Mock {
        /// Print the converted date-picker JSON instead of the raw appointments
        #[arg(long)]
        convert: bool,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Check whether two HH:mm intervals overlap (touching intervals do not)
    Overlap {
        start_a: String,
        end_a: String,
        start_b: String,
        end_b: String,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Slot merge strategy
    #[arg(long, value_enum, default_value_t = Mode::OnePass)]
    mode: Mode,
    /// Date key format (strftime)
    #[arg(long, env = "SLOTS_DATE_FORMAT", default_value = DATE_FORMAT)]
    date_format: String,
    /// Slot time format (strftime)
    #[arg(long, env = "SLOTS_TIME_FORMAT", default_value = TIME_FORMAT)]
    time_format: String,
    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Merge each appointment against existing slots only
    OnePass,
    /// Additionally merge slots until none overlap
    Coalesce,
}

impl From<Mode> for MergeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::OnePass => MergeMode::OnePass,
            Mode::Coalesce => MergeMode::Coalesce,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            render,
        } => {
            let json = read_input(input.as_deref())?;
            let appointments = load_appointments(&JsonAppointments::new(json))
                .context("Failed to read appointments")?;
            let rendered = convert_and_render(&appointments, &render)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Mock { convert, render } => {
            let appointments = load_appointments(&MockAppointments)?;
            let rendered = if convert {
                convert_and_render(&appointments, &render)?
            } else {
                to_json(&appointments, render.compact)?
            };
            write_output(None, &rendered)?;
        }
        Commands::Overlap {
            start_a,
            end_a,
            start_b,
            end_b,
        } => {
            let a = TimeRange::new(parse_time(&start_a)?, parse_time(&end_a)?);
            let b = TimeRange::new(parse_time(&start_b)?, parse_time(&end_b)?);
            println!("{}", intervals_overlap(&a, &b));
        }
    }

    Ok(())
}

/// `-v` count → default filter. `SLOTS_LOG` wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SLOTS_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn convert_and_render(appointments: &[Appointment], args: &RenderArgs) -> Result<String> {
    let picker = convert_with_mode(appointments, args.mode.into())
        .context("Failed to convert appointments")?;
    tracing::info!(
        appointments = appointments.len(),
        days = picker.items.len(),
        slots = picker.slot_count(),
        "converted"
    );

    let format = DisplayFormat {
        date: args.date_format.clone(),
        time: args.time_format.clone(),
    };
    let view = picker
        .render(&format)
        .context("Failed to render date-picker output")?;
    to_json(&view, args.compact)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
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
