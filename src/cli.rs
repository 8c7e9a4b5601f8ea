// File: ./src/cli.rs
//! Command-line argument handling shared by the terminal host.
use crate::aggregate::EventFilter;
use crate::model::SourceKind;
use crate::temporal::parse_date;
use crate::window::Granularity;
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Calendar {
        granularity: Option<Granularity>,
        date: Option<NaiveDate>,
    },
    Alerts,
    Dashboard,
    Watch,
    Config,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub at: Option<NaiveDateTime>,
    pub kinds: Option<Vec<SourceKind>>,
    pub assignee: Option<String>,
    pub verbose: bool,
}

impl CliArgs {
    /// Filter from `--kind`/`--assignee`, or None when neither was given.
    pub fn filter(&self) -> Option<EventFilter> {
        if self.kinds.is_none() && self.assignee.is_none() {
            return None;
        }
        let mut filter = EventFilter::default();
        if let Some(kinds) = &self.kinds {
            filter = filter.with_kinds(kinds.iter().copied());
        }
        if let Some(a) = &self.assignee {
            filter = filter.with_assignee(a.clone());
        }
        Some(filter)
    }
}

fn parse_at(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid --at value '{}'. Expected \"YYYY-MM-DD HH:MM\"", value))
}

fn parse_kinds(value: &str) -> Result<Vec<SourceKind>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            SourceKind::from_str(s)
                .map_err(|_| anyhow::anyhow!("Unknown kind '{}'. Use itinerary, appointment or task", s))
        })
        .collect()
}

/// Parses `args` (without the binary name).
pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = CliArgs {
        command: Command::Dashboard,
        root: None,
        data: None,
        at: None,
        kinds: None,
        assignee: None,
        verbose: false,
    };

    let mut positional: Vec<String> = Vec::new();
    let mut iter = args.into_iter().map(Into::into);

    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .ok_or_else(|| anyhow::anyhow!("Missing value for {}", flag))
        };
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                parsed.command = Command::Help;
                return Ok(parsed);
            }
            "-r" | "--root" => parsed.root = Some(PathBuf::from(value_for(arg.as_str())?)),
            "-d" | "--data" => parsed.data = Some(PathBuf::from(value_for(arg.as_str())?)),
            "--at" => parsed.at = Some(parse_at(&value_for(arg.as_str())?)?),
            "-k" | "--kind" => parsed.kinds = Some(parse_kinds(&value_for(arg.as_str())?)?),
            "-a" | "--assignee" => parsed.assignee = Some(value_for(arg.as_str())?),
            "-v" | "--verbose" => parsed.verbose = true,
            flag if flag.starts_with('-') => bail!("Unknown option '{}'", flag),
            _ => positional.push(arg.clone()),
        }
    }

    let mut rest = positional.into_iter();
    parsed.command = match rest.next().as_deref() {
        None | Some("dashboard") => Command::Dashboard,
        Some("alerts") => Command::Alerts,
        Some("watch") => Command::Watch,
        Some("config") => Command::Config,
        Some("calendar") | Some("cal") => {
            let mut granularity = None;
            let mut date = None;
            for value in rest.by_ref() {
                if let Ok(g) = Granularity::from_str(&value) {
                    granularity = Some(g);
                } else {
                    date = Some(parse_date(&value)?);
                }
            }
            Command::Calendar { granularity, date }
        }
        Some(other) => bail!("Unknown command '{}'. See --help", other),
    };

    if let Some(extra) = rest.next() {
        bail!("Unexpected argument '{}'", extra);
    }

    Ok(parsed)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Tripline v{} - travel itinerary, appointments and tasks on one calendar",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [dashboard]", binary_name);
    println!("    {} [OPTIONS] calendar [day|week|month|year] [YYYY-MM-DD]", binary_name);
    println!("    {} [OPTIONS] alerts", binary_name);
    println!("    {} [OPTIONS] watch", binary_name);
    println!("    {} config", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>       Use a different directory for config and data.");
    println!("    -d, --data <file>       Read the agenda snapshot from this JSON file.");
    println!("    --at \"YYYY-MM-DD HH:MM\" Evaluate as if it were this time.");
    println!("    -k, --kind <list>       Only show these kinds (itinerary,appointment,task).");
    println!("    -a, --assignee <name>   Only show events for this traveler.");
    println!("    -v, --verbose           Debug logging on stderr.");
    println!("    -h, --help              Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    dashboard               Next departure, alerts and upcoming events (default).");
    println!("    calendar                Calendar view, month by default.");
    println!("    alerts                  Departure reminders and tight transitions right now.");
    println!("    watch                   Re-check alerts every poll interval until Ctrl-C.");
    println!("    config                  Print the config file path.");
}
