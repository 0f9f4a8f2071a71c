use clap::{Parser, Subcommand};
use forge_core::fatigue::{estimate_max_reps, quality_ratio};
use forge_core::limits::clamp_intensity;
use forge_core::logging;
use forge_core::reference::{hanley_reference_table, write_reference_csv, DEFAULT_INTENSITIES};
use forge_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Strength training volume and fatigue optimizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Clamp intensities into 0-99% instead of rejecting them
    #[arg(long, global = true)]
    clamp: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the next session from config, history and readiness (default)
    Recommend {
        /// Workout history snapshot (.json, .jsonl or .csv)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Training context snapshot (.json)
        #[arg(long)]
        context: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hanley fatigue score and zone for a set
    Score {
        #[arg(long)]
        reps: u32,

        /// Intensity in % of 1RM (below 100)
        #[arg(long)]
        intensity: f64,

        #[arg(long, default_value_t = 1)]
        sets: u32,
    },

    /// Reps needed at an intensity to land in a fatigue zone
    Reverse {
        #[arg(long)]
        intensity: f64,

        /// light, moderate, moderate-high, high or extreme
        #[arg(long)]
        zone: String,
    },

    /// Split a rep total into peak-force-capped strength sets
    Strength {
        #[arg(long, allow_negative_numbers = true)]
        total_reps: i64,

        #[arg(long)]
        intensity: f64,
    },

    /// Candidate set/rep splits for a hypertrophy rep total
    Hypertrophy {
        #[arg(long)]
        total_reps: u32,

        #[arg(long)]
        intensity: f64,

        #[arg(long, default_value_t = 8.0)]
        rpe: f64,
    },

    /// Rep where force drops below 95% of the first rep
    DropRep {
        #[arg(long)]
        intensity: f64,
    },

    /// Print a Hanley reference table as CSV
    Table {
        /// Rep range, e.g. 1-12
        #[arg(long, default_value = "1-12")]
        reps: String,

        /// Comma-separated intensities
        #[arg(long, value_delimiter = ',')]
        intensities: Vec<f64>,
    },

    /// Tonnage (sets × reps × weight)
    Tonnage {
        #[arg(long)]
        sets: u32,

        #[arg(long)]
        reps: u32,

        #[arg(long)]
        weight: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_level(logging::level_for_verbosity(cli.verbose));

    let clamp = cli.clamp;
    match cli.command {
        Some(Commands::Recommend {
            history,
            context,
            json,
        }) => cmd_recommend(cli.config, history, context, json),
        Some(Commands::Score {
            reps,
            intensity,
            sets,
        }) => cmd_score(reps, intensity_arg(intensity, clamp)?, sets),
        Some(Commands::Reverse { intensity, zone }) => {
            cmd_reverse(intensity_arg(intensity, clamp)?, &zone)
        }
        Some(Commands::Strength {
            total_reps,
            intensity,
        }) => cmd_strength(total_reps, intensity_arg(intensity, clamp)?),
        Some(Commands::Hypertrophy {
            total_reps,
            intensity,
            rpe,
        }) => cmd_hypertrophy(total_reps, intensity_arg(intensity, clamp)?, rpe),
        Some(Commands::DropRep { intensity }) => cmd_drop_rep(intensity_arg(intensity, clamp)?),
        Some(Commands::Table { reps, intensities }) => {
            let intensities = intensities
                .into_iter()
                .map(|i| intensity_arg(i, clamp))
                .collect::<Result<Vec<_>>>()?;
            cmd_table(&reps, intensities)
        }
        Some(Commands::Tonnage { sets, reps, weight }) => {
            println!("{}", tonnage(sets, reps, weight));
            Ok(())
        }
        None => {
            // Default to "recommend" command
            cmd_recommend(cli.config, None, None, false)
        }
    }
}

/// Intensity as given, or clamped into range with `--clamp`
fn intensity_arg(intensity: f64, clamp: bool) -> Result<f64> {
    if !clamp {
        return Ok(intensity);
    }
    let clamped = clamp_intensity(intensity)?;
    if clamped != intensity {
        tracing::warn!("Clamped intensity {}% to {}%", intensity, clamped);
    }
    Ok(clamped)
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}

fn cmd_recommend(
    config_path: Option<PathBuf>,
    history_path: Option<PathBuf>,
    context_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let history_path = history_path.unwrap_or_else(|| config.data.history_path.clone());
    let context_path = context_path.unwrap_or_else(|| config.data.context_path.clone());

    tracing::debug!(
        "Recommending from history {:?} and context {:?}",
        history_path,
        context_path
    );
    let history = load_history(&history_path)?;
    let context = load_context(&context_path)?;

    let outcome = compute_recommendations(&config.optimizer, &history, context.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        RecommendationOutcome::Disabled => {
            println!("Optimizer disabled - no recommendation.");
        }
        RecommendationOutcome::Recommended(rec) => display_recommendation(&rec),
    }
    Ok(())
}

fn display_recommendation(rec: &Recommendation) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  NEXT SESSION");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} working sets ({})", rec.session_volume, rec.rep_scheme);
    println!(
        "  Intensity: {:.0}-{:.0}% 1RM",
        rec.intensity_range.min, rec.intensity_range.max
    );
    println!(
        "  Rest: {}-{} s",
        rec.rest_range.min, rec.rest_range.max
    );
    println!(
        "  Exercises: {}-{}",
        rec.exercise_count.min, rec.exercise_count.max
    );

    if let Some(ref focus) = rec.suggested_focus {
        println!("  Focus: {}", focus);
    }

    if !rec.weekly_volume_status.is_empty() {
        println!();
        println!("  Weekly volume:");
        for (muscle, status) in &rec.weekly_volume_status {
            let priority = rec
                .muscle_group_priorities
                .get(muscle)
                .map(|p| p.to_string())
                .unwrap_or_default();
            println!(
                "    {:<11} {:>5.1} / {:<3} {:<9} {}",
                muscle.to_string(),
                status.current,
                status.target,
                status.status.to_string(),
                priority
            );
        }
    }

    println!();
    println!("  ℹ {}", rec.rationale);
    println!();
}

fn cmd_score(reps: u32, intensity: f64, sets: u32) -> Result<()> {
    let per_set = set_fatigue_score(reps, intensity)?;
    let prescription = SetPrescription::new(reps, sets, intensity, 0)?;
    let total = session_fatigue_score(&[prescription])?;
    let zone = classify_zone(total)?;

    println!("Per set: {:.1}", per_set);
    println!("Total ({} sets): {:.1}", sets, total);
    println!("Zone: {}", zone);
    Ok(())
}

fn cmd_reverse(intensity: f64, zone: &str) -> Result<()> {
    let zone: FatigueZone = zone.parse()?;
    let target = reverse_prescribe(intensity, zone)?;

    println!(
        "{} zone @ {}%: {} total reps (range {}-{})",
        target.zone, target.intensity_percent, target.target_reps, target.min_reps, target.max_reps
    );
    Ok(())
}

fn cmd_strength(total_reps: i64, intensity: f64) -> Result<()> {
    let plan = prescribe_strength_sets(total_reps, intensity)?;

    if plan.is_empty() {
        println!("No working sets for a total of {} reps.", total_reps);
        return Ok(());
    }

    println!(
        "{} sets x {} reps @ {}% (rest {} s)",
        plan.sets, plan.reps_per_set, intensity, plan.rest_seconds
    );
    println!("  Peak-force drop rep: {}", plan.drop_rep);
    if let Some(prescription) = plan.to_set_prescription(intensity)? {
        let score = session_fatigue_score(&[prescription])?;
        println!("  Session fatigue: {:.1} ({})", score, classify_zone(score)?);
    }
    println!(
        "  Quality reps: {} of {} requested ({:+})",
        plan.quality_reps, plan.target_reps, plan.rep_delta
    );
    Ok(())
}

fn cmd_hypertrophy(total_reps: u32, intensity: f64, rpe: f64) -> Result<()> {
    let options = hypertrophy_set_options(total_reps, intensity, rpe)?;

    if options.is_empty() {
        println!("No practical split for {} reps.", total_reps);
        return Ok(());
    }

    for (i, option) in options.iter().enumerate() {
        println!(
            "{}. {} sets x {} reps ({} total{}) metabolic load {:.0}",
            i + 1,
            option.sets,
            option.reps_per_set,
            option.total_reps,
            if option.exact { "" } else { ", rounded" },
            option.metabolic_load
        );
    }
    Ok(())
}

fn cmd_drop_rep(intensity: f64) -> Result<()> {
    let drop_rep = estimate_peak_force_drop_rep(intensity)?;
    println!(
        "Drop rep {} of ~{:.0} (quality ratio {:.2})",
        drop_rep,
        estimate_max_reps(intensity)?,
        quality_ratio(intensity)?
    );
    Ok(())
}

fn cmd_table(reps: &str, intensities: Vec<f64>) -> Result<()> {
    let (first, last) = parse_rep_range(reps)?;
    let intensities = if intensities.is_empty() {
        DEFAULT_INTENSITIES.to_vec()
    } else {
        intensities
    };

    let rows = hanley_reference_table(first..=last, &intensities)?;
    write_reference_csv(std::io::stdout().lock(), &rows)
}

fn parse_rep_range(raw: &str) -> Result<(u32, u32)> {
    let invalid = || Error::Other(format!("Invalid rep range: {} (expected e.g. 1-12)", raw));
    let (first, last) = match raw.split_once('-') {
        Some((a, b)) => (a.trim(), b.trim()),
        None => (raw.trim(), raw.trim()),
    };
    let first: u32 = first.parse().map_err(|_| invalid())?;
    let last: u32 = last.parse().map_err(|_| invalid())?;
    if first > last {
        return Err(invalid());
    }
    Ok((first, last))
}
