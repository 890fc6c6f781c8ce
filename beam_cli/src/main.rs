//! # beam
//!
//! Command-line front end for `beam_core`. A beam model lives in a `.beam`
//! session file; each command opens it, applies one change or runs a solve,
//! and writes it back.
//!
//! ```text
//! beam init lintel.beam --length 4
//! beam add lintel.beam point 2 12
//! beam add lintel.beam uniform 0 4 1.5
//! beam edit lintel F1 point 2 15 --angle 60
//! beam solve lintel
//! ```

use std::path::{Path, PathBuf};

use beam_cli::labels::{label_loads, resolve_load, LoadLabel};
use beam_core::calculations::{AnalysisResult, BeamKind, InternalForces, ReactionSet};
use beam_core::calculations::summary::DiagramSummary;
use beam_core::errors::{EngineError, EngineResult};
use beam_core::file_io::{load_session, load_session_with_lock_check, save_session, FileLock, SESSION_EXTENSION};
use beam_core::loads::{Load, LoadId, Moment, PointLoad, TrapezoidalLoad, UniformLoad};
use beam_core::session::Session;
use beam_core::units::{ForceUnit, LengthUnit, UnitSystem};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "beam")]
#[command(about = "Reactions and N/V/M diagrams for simply-supported and cantilever beams", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new session file with no loads
    Init {
        file: PathBuf,
        /// Beam length
        #[arg(long)]
        length: f64,
        #[arg(long, value_enum, default_value_t = KindArg::SimplySupported)]
        kind: KindArg,
        #[arg(long, default_value = "")]
        title: String,
        /// Length unit label (m, cm, mm, ft, in)
        #[arg(long, default_value = "m")]
        length_unit: String,
        /// Force unit label (N, kN, lb, kip)
        #[arg(long, default_value = "kN")]
        force_unit: String,
    },
    /// Add a load
    Add {
        file: PathBuf,
        #[command(subcommand)]
        load: LoadArgs,
    },
    /// Remove a load by label (F1, q2, ...) or id
    Remove { file: PathBuf, load: String },
    /// Replace a load by label or id; the new record keeps the old id
    Edit {
        file: PathBuf,
        load: String,
        #[command(subcommand)]
        replacement: LoadArgs,
    },
    /// Change the beam length or support arrangement
    Beam {
        file: PathBuf,
        #[arg(long)]
        length: Option<f64>,
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// List the loads with their labels
    List { file: PathBuf },
    /// Solve reactions and internal-force diagrams
    Solve {
        file: PathBuf,
        /// Stations per diagram (overrides the session setting)
        #[arg(long)]
        stations: Option<usize>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Include every station of the diagrams
        #[arg(long)]
        profiles: bool,
    },
}

#[derive(Subcommand)]
enum LoadArgs {
    /// Point force: location, magnitude and angle from the beam axis
    #[command(allow_negative_numbers = true)]
    Point {
        location: f64,
        magnitude: f64,
        /// Degrees from the beam axis, 90 is straight down
        #[arg(long, default_value_t = 90.0)]
        angle: f64,
    },
    /// Concentrated moment, counterclockwise positive
    #[command(allow_negative_numbers = true)]
    Moment { location: f64, magnitude: f64 },
    /// Uniformly distributed load
    #[command(allow_negative_numbers = true)]
    Uniform { start: f64, end: f64, magnitude: f64 },
    /// Linearly varying distributed load
    #[command(allow_negative_numbers = true)]
    Trapezoidal {
        start: f64,
        end: f64,
        start_magnitude: f64,
        end_magnitude: f64,
    },
}

impl LoadArgs {
    fn into_load(self) -> Load {
        match self {
            LoadArgs::Point {
                location,
                magnitude,
                angle,
            } => PointLoad::new(location, magnitude, angle).into(),
            LoadArgs::Moment { location, magnitude } => Moment::new(location, magnitude).into(),
            LoadArgs::Uniform { start, end, magnitude } => UniformLoad::new(start, end, magnitude).into(),
            LoadArgs::Trapezoidal {
                start,
                end,
                start_magnitude,
                end_magnitude,
            } => TrapezoidalLoad::new(start, end, start_magnitude, end_magnitude).into(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    SimplySupported,
    Cantilever,
}

impl From<KindArg> for BeamKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::SimplySupported => BeamKind::SimplySupported,
            KindArg::Cantilever => BeamKind::Cantilever,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        if e.is_input_error() {
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

fn run(command: Commands) -> EngineResult<()> {
    match command {
        Commands::Init {
            file,
            length,
            kind,
            title,
            length_unit,
            force_unit,
        } => {
            let units = parse_units(&length_unit, &force_unit)?;
            let mut session = Session::new(title, length, kind.into())?;
            session.set_units(units);
            edit_file(&file, |s| {
                *s = session;
                Ok(())
            })
        }
        Commands::Add { file, load } => edit_file(&file, |session| {
            let id = session.add_load(load.into_load())?;
            let labels = label_loads(&session.loads, &session.units, session.beam.length);
            if let Some(label) = labels.iter().find(|l| l.id == id) {
                println!("added {} {}", label.text(), label.position);
            }
            Ok(())
        }),
        Commands::Remove { file, load } => edit_file(&file, |session| {
            let id = find_load(session, &load)?;
            session.remove_load(id);
            println!("removed {}", load);
            Ok(())
        }),
        Commands::Edit {
            file,
            load,
            replacement,
        } => edit_file(&file, |session| {
            let id = find_load(session, &load)?;
            session.replace_load(replacement.into_load().with_id(id))?;
            let labels = label_loads(&session.loads, &session.units, session.beam.length);
            if let Some(label) = labels.iter().find(|l| l.id == id) {
                println!("{} is now {} {}", load, label.text(), label.position);
            }
            Ok(())
        }),
        Commands::Beam { file, length, kind } => edit_file(&file, |session| {
            if let Some(kind) = kind {
                session.set_beam_kind(kind.into());
            }
            if let Some(length) = length {
                session.set_length(length)?;
            }
            println!("{} beam, length {} {}", session.beam.kind()?, session.beam.length, session.units.length_label());
            Ok(())
        }),
        Commands::List { file } => {
            let session = open_session(&file)?;
            print_loads(&label_loads(&session.loads, &session.units, session.beam.length));
            Ok(())
        }
        Commands::Solve {
            file,
            stations,
            json,
            profiles,
        } => {
            let mut session = open_session(&file)?;
            if let Some(stations) = stations {
                session.settings.stations = stations;
            }
            let result = session.solve()?;
            if json {
                let report = SolveReport::new(&session, result, profiles);
                let text = serde_json::to_string_pretty(&report).map_err(EngineError::serialization)?;
                println!("{}", text);
            } else {
                print_result(&session, &result, profiles);
            }
            Ok(())
        }
    }
}

fn parse_units(length: &str, force: &str) -> EngineResult<UnitSystem> {
    let length_unit = LengthUnit::from_label(length).ok_or_else(|| {
        EngineError::invalid_beam_config("length_unit", length, "Expected one of m, cm, mm, ft, in")
    })?;
    let force_unit = ForceUnit::from_label(force).ok_or_else(|| {
        EngineError::invalid_beam_config("force_unit", force, "Expected one of N, kN, lb, kip")
    })?;
    Ok(UnitSystem::new(length_unit, force_unit))
}

/// Lock, load (or start fresh), edit and save a session file
fn edit_file(path: &Path, edit: impl FnOnce(&mut Session) -> EngineResult<()>) -> EngineResult<()> {
    let path = with_session_extension(path);
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "beam".to_string());
    let _lock = FileLock::acquire(&path, user)?;

    let mut session = if path.exists() {
        load_session(&path)?
    } else {
        debug!("{} does not exist yet, starting a new session", path.display());
        Session::default()
    };
    edit(&mut session)?;
    save_session(&session, &path)?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Load a session file for reading only. A lock held by another process
/// is reported but does not stop the read.
fn open_session(path: &Path) -> EngineResult<Session> {
    let path = with_session_extension(path);
    let (session, lock) = load_session_with_lock_check(&path)?;
    if let Some(info) = lock {
        warn!(
            "{} is being edited by {} on {} (pid {}), showing the last saved state",
            path.display(),
            info.user_id,
            info.machine,
            info.pid
        );
    }
    Ok(session)
}

fn find_load(session: &Session, key: &str) -> EngineResult<LoadId> {
    resolve_load(&session.loads, &session.units, session.beam.length, key)
        .ok_or_else(|| EngineError::invalid_load(key, "id", key, "No load with this label or id"))
}

fn with_session_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(SESSION_EXTENSION)
    }
}

fn print_loads(labels: &[LoadLabel]) {
    if labels.is_empty() {
        println!("(no loads)");
    }
    for label in labels {
        let stack = if label.stack > 0 { format!("+{}", label.stack) } else { String::new() };
        println!(
            "  {:<4} {:<32} {:<20} {:<3} {}",
            label.name, label.value, label.position, stack, label.id
        );
    }
}

fn print_result(session: &Session, result: &AnalysisResult, profiles: bool) {
    let units = &session.units;
    let force = units.force_label();
    let moment = units.moment_label();

    println!("{} ({} {} {})", session.meta.title, result.beam_kind, session.beam.length, units.length_label());
    println!();
    println!("Loads:");
    print_loads(&label_loads(&session.loads, units, session.beam.length));
    println!();

    let r = &result.reactions;
    println!("Reactions:");
    println!("  R_A = {:.4} {}", r.vertical_a, force);
    println!("  H_A = {:.4} {}", r.horizontal_a, force);
    match result.beam_kind {
        BeamKind::SimplySupported => println!("  R_B = {:.4} {}", r.vertical_b, force),
        BeamKind::Cantilever => println!("  M_A = {:.4} {}", r.moment_a, moment),
    }
    println!();

    println!("Diagrams:");
    for (name, profile, unit) in [
        ("N", &result.forces.axial, force.to_string()),
        ("V", &result.forces.shear, force.to_string()),
        ("M", &result.forces.moment, moment.clone()),
    ] {
        match profile.extremes() {
            Some(e) => println!(
                "  {}: peak {:.4} {}  (max {:.4} at {}, min {:.4} at {})",
                name,
                profile.peak_magnitude(),
                unit,
                e.max.value,
                e.max.position,
                e.min.value,
                e.min.position
            ),
            None => println!("  {}: no stations", name),
        }
    }

    if profiles {
        println!();
        println!(
            "{:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "x", "N-", "N+", "V-", "V+", "M-", "M+"
        );
        let forces = &result.forces;
        for ((n, v), m) in forces
            .axial
            .stations
            .iter()
            .zip(&forces.shear.stations)
            .zip(&forces.moment.stations)
        {
            println!(
                "{:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                n.position, n.before, n.after, v.before, v.after, m.before, m.after
            );
        }
    }
}

/// JSON output of `beam solve --json`
#[derive(Serialize)]
struct SolveReport {
    title: String,
    beam_kind: BeamKind,
    units: UnitSystem,
    loads: Vec<LoadLabel>,
    reactions: ReactionSet,
    summary: DiagramSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    forces: Option<InternalForces>,
}

impl SolveReport {
    fn new(session: &Session, result: AnalysisResult, profiles: bool) -> Self {
        SolveReport {
            title: session.meta.title.clone(),
            beam_kind: result.beam_kind,
            units: session.units,
            loads: label_loads(&session.loads, &session.units, session.beam.length),
            reactions: result.reactions,
            summary: result.summary,
            forces: profiles.then_some(result.forces),
        }
    }
}
