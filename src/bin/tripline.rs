use anyhow::Result;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::env;
use std::sync::Arc;
use tokio::sync::mpsc;
use tripline::alert::evaluate_with;
use tripline::cli::{CliArgs, Command, parse_args, print_help};
use tripline::clock::{Clock, FixedClock, SharedClock, SystemClock};
use tripline::config::Config;
use tripline::context::{AppContext, StandardContext};
use tripline::dashboard::Dashboard;
use tripline::render::{alert_line, render_alerts, render_dashboard, render_view};
use tripline::state::CalendarState;
use tripline::storage::LocalStorage;
use tripline::system::{AlertMessage, spawn_alert_ticker};

fn init_logging(ctx: &dyn AppContext, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("tripline")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    // The log file always gets debug output; failing to open it is not fatal.
    if let Some(path) = ctx.get_log_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        loggers.push(WriteLogger::new(LevelFilter::Debug, log_config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help("tripline");
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        print_help("tripline");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    init_logging(&ctx, args.verbose);

    if args.command == Command::Config {
        println!("{}", Config::get_path_string(&ctx)?);
        return Ok(());
    }

    let config = Config::load_or_default(&ctx)?;
    run(&ctx, &args, &config).await
}

async fn run(ctx: &dyn AppContext, args: &CliArgs, config: &Config) -> Result<()> {
    let sources = match &args.data {
        Some(path) => LocalStorage::load_from_path(path)?,
        None => LocalStorage::load(ctx)?,
    };
    let events = sources.normalize();
    log::debug!(
        "{} source records normalized into {} calendar events",
        sources.len(),
        events.len()
    );

    let clock: SharedClock = match args.at {
        Some(at) => Arc::new(FixedClock::new(at)),
        None => Arc::new(SystemClock),
    };
    let now = clock.now();

    match &args.command {
        Command::Calendar { granularity, date } => {
            let mut state = CalendarState::from_config(date.unwrap_or(now.date()), config);
            if let Some(g) = granularity {
                state.set_granularity(*g);
            }
            if let Some(filter) = args.filter() {
                state.set_filter(filter);
            }
            print!(
                "{}",
                render_view(&state.render(&events), config.compact_day_limit)
            );
        }
        Command::Alerts => {
            let alerts = evaluate_with(&events, now, &config.alert_settings());
            print!("{}", render_alerts(&alerts));
        }
        Command::Dashboard => {
            print!("{}", render_dashboard(&Dashboard::build(&sources, now, config)));
        }
        Command::Watch => watch(clock, events, config).await?,
        Command::Config | Command::Help => {}
    }

    Ok(())
}

async fn watch(
    clock: SharedClock,
    events: Vec<tripline::CalendarEvent>,
    config: &Config,
) -> Result<()> {
    let (ui_tx, mut ui_rx) = mpsc::channel(4);
    let ticker = spawn_alert_ticker(
        clock.clone(),
        config.poll_interval(),
        config.alert_settings(),
        events,
        ui_tx,
    );

    println!(
        "Watching alerts every {}s. Press Ctrl-C to stop.",
        config.poll_interval().as_secs()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            msg = ui_rx.recv() => match msg {
                Some(AlertMessage::Refreshed(alerts)) => {
                    println!("--- {} ---", clock.now().format("%H:%M"));
                    if alerts.is_empty() {
                        println!("No alerts.");
                    }
                    for alert in &alerts {
                        println!("{}", alert_line(alert));
                    }
                }
                None => break,
            },
        }
    }

    // Dropping the sender stops the ticker.
    drop(ticker);
    Ok(())
}
