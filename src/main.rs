use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use tire_lut::analysis;
use tire_lut::config::RunConfig;
use tire_lut::generate::{self, BrushReport, ChatterReport, CustomReport};
use tire_lut::tire_curve::{ForceSeries, SlipAngleSeries, lut};

/// Lateral force LUT generator for sim tire models
#[derive(Parser, Debug)]
#[command(name = "tire-lut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON run configuration (tire, presets, resolution, output)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory LUT files are written to (overrides config)
    #[arg(short, long, global = true)]
    out_dir: Option<PathBuf>,

    /// Build and report without writing LUT files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print reports as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Five-segment load-sensitive curve, LUT at the reference load
    Custom,
    /// Chatter presets layered on the reference curve, one LUT each
    Chatter,
    /// Brush model falloff sweep and tire comparison (report only)
    Brush,
    /// Everything above
    All,
    /// Parse an existing LUT and summarize it
    Inspect {
        /// Path to the .lut file
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct AllReports<'a> {
    custom: &'a CustomReport,
    chatter: &'a [ChatterReport],
    brush: &'a BrushReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(dir) = &cli.out_dir {
        cfg.output.dir = dir.clone();
    }

    let write = !cli.dry_run;
    if write {
        std::fs::create_dir_all(&cfg.output.dir)
            .with_context(|| format!("creating output dir {}", cfg.output.dir.display()))?;
    }

    match &cli.command {
        Commands::Custom => {
            let report = custom(&cfg, write)?;
            emit(cli.json, &report, print_custom)?;
        }
        Commands::Chatter => {
            let reports = chatter(&cfg, write)?;
            emit(cli.json, &reports, |r| print_chatter(r))?;
        }
        Commands::Brush => {
            let report = brush(&cfg)?;
            emit(cli.json, &report, print_brush)?;
        }
        Commands::All => {
            let custom = custom(&cfg, write)?;
            let chatter = chatter(&cfg, write)?;
            let brush = brush(&cfg)?;
            if cli.json {
                let all = AllReports { custom: &custom, chatter: &chatter, brush: &brush };
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                print_custom(&custom);
                print_chatter(&chatter);
                print_brush(&brush);
            }
        }
        Commands::Inspect { file } => {
            let doc = lut::read_lut(file).with_context(|| format!("reading {}", file.display()))?;
            let angles = SlipAngleSeries::new(doc.angles().collect())
                .with_context(|| format!("slip angles in {}", file.display()))?;
            let forces = ForceSeries::new(doc.forces().collect());
            let summary = analysis::summarize(&angles, &forces)
                .with_context(|| format!("summarizing {}", file.display()))?;

            if (summary.peak_force - 1.0).abs() > 5e-5 {
                warn!("{} is not normalized (peak {:.4})", file.display(), summary.peak_force);
            }
            emit(cli.json, &summary, |s| {
                info!("{}: {} rows, {} header lines", file.display(), doc.rows.len(), doc.header.len());
                info!("  peak {:.4} at {:.1}°, plateau variation {:.1}%", s.peak_force, s.peak_angle, s.plateau_variation_pct);
                for r in &s.retention {
                    info!("  retention at {:.0}°: {:.1}%", r.angle, r.percent);
                }
            })?;
        }
    }

    Ok(())
}

fn custom(cfg: &RunConfig, write: bool) -> anyhow::Result<CustomReport> {
    generate::run_custom(cfg, write).with_context(|| {
        format!(
            "custom curve: dy_ref={} fz0={} ls_exp={} loads={:?}",
            cfg.tire.dy_ref, cfg.tire.fz0, cfg.tire.ls_exp, cfg.loads
        )
    })
}

fn chatter(cfg: &RunConfig, write: bool) -> anyhow::Result<Vec<ChatterReport>> {
    generate::run_chatter(cfg, write).with_context(|| {
        let names: Vec<&str> = cfg.chatter.iter().map(|p| p.name.as_str()).collect();
        format!("chatter curves: presets {names:?}")
    })
}

fn brush(cfg: &RunConfig) -> anyhow::Result<BrushReport> {
    generate::run_brush(cfg).with_context(|| format!("brush curves: speeds {:?}", cfg.falloff_speeds))
}

fn emit<T: Serialize>(json: bool, report: &T, human: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        human(report);
    }
    Ok(())
}

fn print_custom(r: &CustomReport) {
    info!("=== custom tire curve ===");
    if let Some(path) = &r.lut {
        info!("LUT: {}", path.display());
    }
    let s = &r.summary;
    info!("peak grip {:.3} at {:.1}°", s.peak_force, s.peak_angle);
    info!("plateau 5.5°..8.0° variation {:.1}%", s.plateau_variation_pct);
    for ret in &s.retention {
        info!("  retention at {:.0}°: {:.1}%", ret.angle, ret.percent);
    }
    if let Some(k) = r.cornering_stiffness {
        info!("cornering stiffness (0-2°): {k:.2}");
    }
    info!(
        "stock brush curve: peak {:.3} at {:.1}°",
        r.stock_summary.peak_force, r.stock_summary.peak_angle
    );
    for c in &r.load_curves {
        info!("  {:>6.0} N: peak grip {:.3}", c.load, c.peak_grip);
    }
    for l in &r.load_scaling {
        info!("  {:>6.0} N load: {:.3}x grip scaling ({:+.1}%)", l.load, l.factor, l.change_pct);
    }
}

fn print_chatter(reports: &[ChatterReport]) {
    info!("=== chatter curves ===");
    for r in reports {
        info!("{}:", r.name);
        if let Some(path) = &r.lut {
            info!("  LUT: {}", path.display());
        }
        info!("  start {}°, intensity {}, frequency {}", r.start_angle, r.intensity, r.frequency);
        let e = &r.excursion;
        info!(
            "  excursion +{:.3} / {:.3} (range {:.3}, rms {:.3})",
            e.max_positive, e.max_negative, e.range, e.rms
        );
    }
}

fn print_brush(r: &BrushReport) {
    info!("=== brush model falloff sweep ===");
    for row in &r.falloff_sweep {
        let pct: Vec<String> = row
            .retention
            .retention
            .iter()
            .map(|x| format!("{:.0}°={:.1}%", x.angle, x.percent))
            .collect();
        info!(
            "FALLOFF_SPEED {:>4}: {} decay {:.1}%/deg",
            row.falloff_speed,
            pct.join(" "),
            row.retention.decay_pct_per_deg
        );
    }
    info!("=== brush model comparison ===");
    for c in &r.comparison {
        let k = c.cornering_stiffness.map(|k| format!("{k:.2}")).unwrap_or_else(|| "-".into());
        info!(
            "{}: limit {}°, falloff level {}, peak {:.3}, stiffness {}",
            c.name, c.friction_limit_angle, c.falloff_level, c.peak_force, k
        );
    }
    if !r.recommendations.is_empty() {
        info!("recommendations:");
    }
    for rec in &r.recommendations {
        info!("  consider {} {} -> {} for {}", rec.parameter, rec.current, rec.suggested, rec.reason);
    }
}
