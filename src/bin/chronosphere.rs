//! World clock command line host
//!
//! Drives the dashboard engine from a terminal: manage tracked cities, search
//! the catalog, inspect where a city sits on the globe, and watch the clocks
//! tick while the globe turns.
//!
//! Usage:
//!   cargo run --bin chronosphere -- list
//!   cargo run --bin chronosphere -- search "united states"
//!   cargo run --bin chronosphere -- watch --ticks 5 --select tokyo

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::info;

use chronosphere::constants::RAD2DEG;
use chronosphere::time::TickSchedule;
use chronosphere::{facing_orientation, CityRecord, ClockCard, Dashboard, Loader};

/// Type alias for the error type used throughout this binary
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Fallback table width when the terminal size is unknown
const DEFAULT_WIDTH: usize = 80;

/// World clock dashboard
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "World clock with a navigable globe: tracked cities, search and live clocks",
    long_about = None
)]
struct Args {
    /// Directory holding persisted preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON city catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show clocks for the tracked cities
    List,

    /// Search the catalog by name, country, continent or timezone
    Search {
        query: String,
    },

    /// Track a city
    Add {
        id: String,
    },

    /// Stop tracking a city
    Remove {
        id: String,
    },

    /// Restore the default tracked cities
    Reset,

    /// Switch between 12- and 24-hour clocks
    ToggleFormat,

    /// Show where a city sits on the globe
    Locate {
        id: String,
    },

    /// Run the frame loop and the clock tick together
    Watch {
        /// Number of clock ticks to print before exiting
        #[arg(long, default_value_t = 5)]
        ticks: u32,

        /// Frames per second for the rotation loop
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// City to turn the globe toward
        #[arg(long)]
        select: Option<String>,

        /// Keep going until interrupted
        #[arg(long, action = ArgAction::SetTrue)]
        forever: bool,
    },
}

fn terminal_width() -> usize {
    term_size::dimensions()
        .map(|(width, _)| width)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Truncate to `width` characters, marking the cut
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}

fn print_cards(cards: &[ClockCard]) {
    let width = terminal_width();
    // Fixed columns: time, date, day/night marker and separators
    let name_width = width.saturating_sub(12 + 18 + 8).clamp(12, 40);

    if cards.is_empty() {
        println!("No tracked cities. Use `add <id>` or `reset`.");
        return;
    }

    for card in cards {
        let label = format!("{} ({})", card.name, card.country);
        println!(
            "{:<name_width$}  {:>11}  {:<16}  {}",
            fit(&label, name_width),
            card.time,
            card.date,
            if card.daylight { "day" } else { "night" },
            name_width = name_width
        );
    }
}

fn print_cities(cities: &[&CityRecord], dashboard: &Dashboard) {
    let width = terminal_width();
    let name_width = width.saturating_sub(24 + 22 + 6).clamp(12, 40);

    for city in cities {
        let marker = if dashboard.favorites().has(&city.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<22} {:<name_width$} {}",
            marker,
            city.id,
            fit(&format!("{}, {}", city.name, city.country), name_width),
            city.timezone,
            name_width = name_width
        );
    }
}

fn list(dashboard: &Dashboard) -> Result<()> {
    print_cards(&dashboard.clock_cards()?);
    Ok(())
}

fn search(dashboard: &Dashboard, query: &str) {
    let results = dashboard.search(query);
    if results.is_empty() {
        println!("No cities match {:?}", query.trim());
        return;
    }
    print_cities(&results, dashboard);
}

fn locate(dashboard: &Dashboard, id: &str) -> Result<()> {
    let city = dashboard
        .directory()
        .by_id(id)
        .ok_or_else(|| format!("Unknown city id: {}", id))?;
    let coord = city.coord()?;
    let position = coord.to_cartesian(dashboard.radius());
    let facing = facing_orientation(&coord);
    let sun = dashboard.sun();

    println!("{} ({}, {})", city.name, city.country, city.continent);
    println!("  Latitude/longitude: {:.4}, {:.4}", coord.lat(), coord.lng());
    println!(
        "  Globe position:     ({:.4}, {:.4}, {:.4})",
        position.x, position.y, position.z
    );
    println!(
        "  Facing orientation: yaw {:.2}°, pitch {:.2}°",
        facing.yaw * RAD2DEG,
        facing.pitch * RAD2DEG
    );
    println!(
        "  Local time:         {} {}",
        dashboard.time().formatted_time(&city.timezone)?,
        dashboard.time().formatted_date(&city.timezone)?
    );
    println!(
        "  Sun elevation:      {:.1}° ({})",
        sun.elevation(&coord),
        if sun.illuminates(&coord) { "day" } else { "night" }
    );
    Ok(())
}

fn watch(
    dashboard: &mut Dashboard,
    ticks: u32,
    fps: u32,
    select: Option<&str>,
    forever: bool,
) -> Result<()> {
    if let Some(id) = select {
        if !dashboard.select_city(Some(id)) {
            return Err(format!("Unknown city id: {}", id).into());
        }
    }

    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let mut schedule = TickSchedule::default();
    let mut printed = 0;

    info!("Watching at {} fps", fps.max(1));
    while forever || printed < ticks {
        let frame_start = Instant::now();
        let orientation = dashboard.frame();

        if schedule.due(frame_start) {
            dashboard.tick();
            println!();
            print_cards(&dashboard.clock_cards()?);
            let remaining = dashboard
                .rotation()
                .distance_to_target()
                .map(|d| format!(", {:.3}° to go", d * RAD2DEG))
                .unwrap_or_default();
            println!(
                "Globe: yaw {:.2}°, pitch {:.2}°{}",
                orientation.yaw * RAD2DEG,
                orientation.pitch * RAD2DEG,
                remaining
            );
            printed += 1;
        }

        if let Some(rest) = frame_interval.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut loader = Loader::new();
    if let Some(dir) = &args.data_dir {
        loader = loader.with_data_dir(dir);
    }
    if let Some(catalog) = &args.catalog {
        loader = loader.with_catalog(catalog);
    }

    let mut dashboard = loader.dashboard()?;
    info!("Preferences in {}", loader.data_dir().display());

    match args.command {
        Command::List => list(&dashboard)?,
        Command::Search { query } => search(&dashboard, &query),
        Command::Add { id } => {
            if dashboard.track_city(&id) {
                println!("Tracking {}", id);
            } else if dashboard.favorites().has(&id) {
                println!("Already tracking {}", id);
            } else {
                return Err(format!("Unknown city id: {}", id).into());
            }
        }
        Command::Remove { id } => {
            if dashboard.untrack_city(&id) {
                println!("No longer tracking {}", id);
            } else {
                println!("{} was not tracked", id);
            }
        }
        Command::Reset => {
            dashboard.reset_tracked();
            list(&dashboard)?;
        }
        Command::ToggleFormat => {
            let cycle = dashboard.toggle_format();
            println!("Clocks now use the {} format", cycle);
        }
        Command::Locate { id } => locate(&dashboard, &id)?,
        Command::Watch {
            ticks,
            fps,
            select,
            forever,
        } => watch(&mut dashboard, ticks, fps, select.as_deref(), forever)?,
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
