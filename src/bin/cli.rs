//! Fuelplan CLI
//!
//! Command-line interface that works directly against the configured
//! weight log, no server required:
//! - Compute calorie and macro targets
//! - Log and list weigh-ins
//! - Show the meal and training plans
//! - Generate a config file

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use fuelplan::config::{generate_default_config, Config};
use fuelplan::logging::init_tracing;
use fuelplan::nutrition::{
    ActivityLevel, AthleteProfile, Goal, NutritionCalculator, Sex, TargetBreakdown,
};
use fuelplan::plans::{meal_plan, training_week, Equipment};
use fuelplan::session::Session;
use fuelplan::storage::{export_csv, WeightHistory};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuelplan-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Nutrition targets and weight log for a single athlete")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute daily calorie and macro targets
    Targets {
        /// Body weight in kg
        #[arg(long)]
        weight: f64,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// male or female
        #[arg(long)]
        sex: String,
        /// Tier name (sedentary, light, moderate, active, extreme) or factor (1.2 .. 1.9)
        #[arg(long, default_value = "moderate")]
        activity: String,
        /// fat-loss, maintenance, muscle-gain, or deadline
        #[arg(long, default_value = "maintenance")]
        goal: String,
        /// Target weight in kg (deadline goal)
        #[arg(long)]
        target_weight: Option<f64>,
        /// Deadline date YYYY-MM-DD (deadline goal)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },

    /// Append a weigh-in to the log
    Log {
        /// Weight in kg
        weight: f64,
        /// Date YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show the weight history
    History,

    /// Show the meal or training plan
    Plan {
        #[command(subcommand)]
        which: PlanCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Daily meal plan
    Meals,
    /// Weekly training protocol
    Training {
        /// gym or home
        #[arg(short, long, default_value = "gym")]
        equipment: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    match cli.command {
        Commands::Targets {
            weight,
            height,
            age,
            sex,
            activity,
            goal,
            target_weight,
            deadline,
        } => {
            let sex: Sex = sex.parse()?;
            let profile = AthleteProfile::new(weight, height, age, sex)?;
            let activity = parse_activity(&activity)?;
            let goal = parse_goal(&goal, target_weight, deadline)?;

            let calculator = NutritionCalculator::new(config.nutrition.clone())?;
            let breakdown = calculator.calculate(&profile, activity, &goal, Utc::now().date_naive());

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
                OutputFormat::Table | OutputFormat::Csv => print_targets(&breakdown, &goal),
            }
        }

        Commands::Log { weight, date } => {
            let session = Session::new(config.storage.open()?);
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let entry = session.record_weight(date, weight)?;
            println!("Logged {} kg on {}", entry.weight_kg, entry.date);
        }

        Commands::History => {
            let session = Session::new(config.storage.open()?);
            let history = session.weight_history();
            print_history(&history, cli.format)?;
        }

        Commands::Plan { which } => match which {
            PlanCommand::Meals => {
                if cli.format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(meal_plan())?);
                } else {
                    for meal in meal_plan() {
                        println!("{:<10} {}", meal.slot, meal.description);
                    }
                }
            }
            PlanCommand::Training { equipment } => {
                let equipment: Equipment = equipment.parse().map_err(anyhow::Error::msg)?;
                let week = training_week(equipment);

                if cli.format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&week)?);
                } else {
                    println!("Training week ({})", equipment);
                    println!("{:<10} | {:<8} | Exercises", "Day", "Focus");
                    println!("{}", "-".repeat(60));
                    for day in week {
                        println!("{:<10} | {:<8} | {}", day.day, day.focus, day.exercises);
                    }
                }
            }
        },

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Accept either a tier name or its numeric factor
fn parse_activity(s: &str) -> anyhow::Result<ActivityLevel> {
    match s.trim().parse::<f64>() {
        Ok(factor) => Ok(ActivityLevel::from_factor(factor)?),
        Err(_) => Ok(s.parse()?),
    }
}

fn parse_goal(
    s: &str,
    target_weight: Option<f64>,
    deadline: Option<NaiveDate>,
) -> anyhow::Result<Goal> {
    if s.trim().eq_ignore_ascii_case("deadline") {
        let (Some(target), Some(date)) = (target_weight, deadline) else {
            bail!("deadline goal needs --target-weight and --deadline");
        };
        return Ok(Goal::deadline(target, date)?);
    }
    Ok(s.parse()?)
}

fn print_targets(breakdown: &TargetBreakdown, goal: &Goal) {
    let t = &breakdown.targets;

    println!("Goal:        {}", goal);
    println!("BMR:         {:.0} kcal", breakdown.bmr);
    println!("TDEE:        {:.0} kcal", breakdown.tdee);
    println!("Adjustment:  {:+.0} kcal/day", breakdown.daily_adjustment_kcal);
    println!("{}", "-".repeat(30));
    println!("Calories:    {} kcal", t.calories);
    println!("Protein:     {} g", t.protein_g);
    println!("Carbs:       {} g", t.carbs_g);
    println!("Fat:         {} g", t.fat_g);

    for warning in &breakdown.warnings {
        println!("warning: {}", warning);
    }
}

fn print_history(history: &WeightHistory, format: OutputFormat) -> anyhow::Result<()> {
    if let WeightHistory::Unavailable { reason } = history {
        eprintln!("Weight log unavailable: {}", reason);
    }

    let entries = history.entries();
    if entries.is_empty() && format != OutputFormat::Json {
        println!("No data");
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        OutputFormat::Csv => {
            print!("{}", export_csv(entries)?);
        }
        OutputFormat::Table => {
            println!("{:<12} | {:>8}", "Date", "kg");
            println!("{}", "-".repeat(23));
            for entry in entries {
                println!("{:<12} | {:>8.1}", entry.date.to_string(), entry.weight_kg);
            }

            if let Some(trend) = history.trend() {
                println!();
                println!(
                    "{} entries, {:+.1} kg since {}",
                    trend.entries, trend.change_kg, trend.first_date
                );
            }
        }
    }

    Ok(())
}
