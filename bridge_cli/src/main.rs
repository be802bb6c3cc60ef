//! # Trestle CLI
//!
//! Command-line front end for model bridge failure analysis.
//!
//! ```text
//! trestle --design design0 --loadcase 2 --mass 452 analyze
//! trestle --config team7.toml envelopes --out env.csv
//! trestle --project team7.trestle --design final fos --x 197
//! ```

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use bridge_core::bridge::{station_positions, MIDSPAN_INDEX};
use bridge_core::calculations::{
    critical_report, envelopes, failure_sweep, find_fos, internal_forces, FailureMode,
};
use bridge_core::file_io::{load_geometry, load_project};
use bridge_core::loads::LoadCase;
use bridge_core::section::{buckling_details, presets, section_properties, Geometry};
use bridge_core::settings::AnalysisSettings;

use config::AnalysisFile;

/// Station at which the single-position check is evaluated (mm)
const MIDSPAN_X_MM: f64 = 625.0;

#[derive(Parser, Debug)]
#[command(name = "trestle")]
#[command(version)]
#[command(about = "Moving-load failure analysis for thin-plate model bridges")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// TOML analysis file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Load case: 1 uniform, 2 locomotive, 3 heavy freight (required unless
    /// the analysis file or project sets one)
    #[arg(short, long, global = true)]
    loadcase: Option<LoadCase>,

    /// Total train mass (N)
    #[arg(short, long, global = true)]
    mass: Option<f64>,

    /// Train positions sampled for the envelopes
    #[arg(long, global = true)]
    positions: Option<usize>,

    /// Preset name, or design label when --project is given
    #[arg(short, long, global = true)]
    design: Option<String>,

    /// Geometry JSON file
    #[arg(short, long, global = true, conflicts_with = "design")]
    geometry: Option<PathBuf>,

    /// Project file holding labelled designs
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full failure sweep over every station
    Analyze {
        /// Print the critical-station report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Eight factors of safety at midspan for one train position
    Fos {
        /// Leftmost wheel position (mm)
        #[arg(short, long, default_value_t = 197.0)]
        x: f64,
    },
    /// Section properties and glue joints
    Section,
    /// Buckling capacities and the dimensions behind them
    Buckling,
    /// Shear and moment envelopes as CSV
    Envelopes {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List built-in cross-sections
    Presets,
}

/// Inputs after merging the analysis file, project, and flags
struct Resolved {
    settings: AnalysisSettings,
    geometry: Geometry,
    geometry_name: String,
}

fn resolve(args: &Args) -> Result<Resolved> {
    let file = match &args.config {
        Some(path) => AnalysisFile::load(path)?,
        None => AnalysisFile::default(),
    };
    let project = args
        .project
        .as_deref()
        .map(|path| {
            load_project(path).with_context(|| format!("loading project {}", path.display()))
        })
        .transpose()?;

    let mut settings = match &project {
        Some(p) if args.config.is_none() => p.settings.clone(),
        _ => file.settings(args.loadcase)?,
    };
    if let Some(lc) = args.loadcase {
        settings.loadcase = lc;
    }
    if let Some(mass) = args.mass {
        settings.mass_n = mass;
    }
    if let Some(n) = args.positions {
        settings.num_train_positions = n;
    }
    settings.validate().context("invalid analysis settings")?;

    let (geometry, geometry_name) = if let Some(path) = &args.geometry {
        (read_geometry(path)?, path.display().to_string())
    } else if let Some(name) = &args.design {
        match &project {
            Some(p) => (p.geometry_by_label(name)?.clone(), name.clone()),
            None => (presets::by_name(name)?, name.clone()),
        }
    } else if let Some(path) = &file.geometry.file {
        (read_geometry(path)?, path.display().to_string())
    } else {
        let name = file.geometry.preset.as_deref().unwrap_or("design0");
        (presets::by_name(name)?, name.to_string())
    };

    Ok(Resolved {
        settings,
        geometry,
        geometry_name,
    })
}

fn read_geometry(path: &Path) -> Result<Geometry> {
    load_geometry(path).with_context(|| format!("loading geometry {}", path.display()))
}

fn print_header(r: &Resolved) {
    println!(
        "{} | {} | {} N | {} train positions",
        r.geometry_name,
        r.settings.loadcase.display_name(),
        r.settings.mass_n,
        r.settings.num_train_positions
    );
    println!();
}

fn run_analyze(r: &Resolved, json: bool) -> Result<()> {
    let s = &r.settings;
    let results = failure_sweep(
        &r.geometry,
        s.loadcase,
        s.mass_n,
        &s.material,
        &s.sweep_options(),
    )?;
    let report = critical_report(&results, &r.geometry, &s.material);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_header(r);
    println!("min FOS:      {:.3}", results.overall_min_fos);
    println!("failure load: {:.1} N", results.failure_load);
    println!("governing:    {}", results.governing_mode);
    println!("critical x:   {:.1} mm", results.critical.x);
    println!();

    println!("{:<34} {:>10} {:>10}", "mode", "min FOS", "x (mm)");
    for m in results.mode_minimums() {
        println!("{:<34} {:>10.3} {:>10.1}", m.mode.label(), m.min_fos, m.x);
    }
    println!();
    println!("{}", report);
    Ok(())
}

fn run_fos(r: &Resolved, x: f64) -> Result<()> {
    let s = &r.settings;
    let (v, m) = internal_forces(x, s.loadcase, s.mass_n);
    let (v_mid, m_mid) = (v[MIDSPAN_INDEX], m[MIDSPAN_INDEX]);
    let fos = find_fos(MIDSPAN_X_MM, &r.geometry, v_mid, m_mid, m_mid, &s.material);

    print_header(r);
    println!("train at x = {} mm: V = {:.3} N, M = {:.1} N·mm at midspan", x, v_mid, m_mid);
    println!();
    for mode in FailureMode::ALL {
        println!("{:<34} {:>10.3}", mode.label(), fos.get(mode));
    }
    println!();
    println!("min FOS {:.3} ({})", fos.min_fos, fos.failure_mode);
    Ok(())
}

fn run_section(r: &Resolved) {
    let g = &r.geometry;
    let p = section_properties(&g.plates, &g.glue_joints);

    println!("{}: {} plates", r.geometry_name, g.plates.len());
    println!("  ybar:   {:.3} mm", p.ybar);
    println!("  I:      {:.1} mm^4", p.i);
    println!("  area:   {:.2} mm^2", p.area);
    println!("  y_top:  {:.3} mm", p.y_top);
    println!("  y_bot:  {:.3} mm", p.y_bot);
    println!("  Q_cent: {:.1} mm^3", p.q_cent);
    println!("  b_cent: {:.2} mm", p.b_cent);

    if p.glue.is_empty() {
        println!("  no glue joints");
    }
    for joint in &p.glue {
        println!(
            "  glue at y = {:.3} mm: Q = {:.1} mm^3, width = {:.2} mm",
            joint.y, joint.q, joint.width
        );
    }
}

fn run_buckling(r: &Resolved) {
    let g = &r.geometry;
    let m = &r.settings.material;
    let p = section_properties(&g.plates, &g.glue_joints);
    let d = buckling_details(&g.plates, m.e, m.nu, p.ybar, g.diaphragm_spacing);
    let caps = &d.capacities;

    println!("{}: E = {} MPa, nu = {}", r.geometry_name, m.e, m.nu);
    println!("  case 1 (flange inside):   {:>10.2} MPa", caps.top_flange_inside);
    println!("  case 2 (flange overhang): {:>10.2} MPa", caps.top_flange_overhang);
    println!("  case 3 (web flexure):     {:>10.2} MPa", caps.web);
    println!("  shear:                    {:>10.3} MPa", caps.shear);
    println!();
    if let Some(f) = &d.flange {
        println!(
            "  flange t = {:.2} mm, inside = {:.2} mm, overhangs = {:.2} / {:.2} mm",
            d.t_flange, f.inside_width, f.left_overhang, f.right_overhang
        );
    }
    if d.web_top.is_some() {
        println!(
            "  web t = {:.2} mm, h = {:.2} mm, compression zone = {:.2} mm",
            d.t_web, d.h_web, d.compression_zone_height
        );
    }
    match d.diaphragm_spacing {
        Some(a) => println!("  diaphragm spacing = {} mm", a),
        None => println!("  no diaphragms"),
    }
}

fn run_envelopes(r: &Resolved, out: Option<&Path>) -> Result<()> {
    let s = &r.settings;
    let env = envelopes(s.loadcase, s.mass_n, s.num_train_positions)?;

    let sink: Box<dyn Write> = match out {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut w = BufWriter::new(sink);

    writeln!(w, "x,sfe_min,sfe_max,bme_min,bme_max")?;
    for (i, x) in station_positions().into_iter().enumerate() {
        writeln!(
            w,
            "{},{},{},{},{}",
            x, env.sfe_min[i], env.sfe_max[i], env.bme_min[i], env.bme_max[i]
        )?;
    }
    w.flush()?;

    if let Some(path) = out {
        info!("wrote {} stations to {}", env.len(), path.display());
    }
    Ok(())
}

fn run_presets() -> Result<()> {
    for name in presets::names() {
        let g = presets::by_name(name)?;
        println!(
            "{:<14} {} plates, {} glue joints, area {:.1} mm^2",
            name,
            g.plates.len(),
            g.glue_joints.len(),
            g.total_area()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Commands::Presets = args.command {
        return run_presets();
    }

    let resolved = resolve(&args)?;
    match &args.command {
        Commands::Analyze { json } => run_analyze(&resolved, *json),
        Commands::Fos { x } => run_fos(&resolved, *x),
        Commands::Section => {
            run_section(&resolved);
            Ok(())
        }
        Commands::Buckling => {
            run_buckling(&resolved);
            Ok(())
        }
        Commands::Envelopes { out } => run_envelopes(&resolved, out.as_deref()),
        Commands::Presets => run_presets(),
    }
}
