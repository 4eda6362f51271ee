use std::{
    path::{
        Path,
        PathBuf,
    },
    process::ExitCode,
};

use clap::{
    Args,
    Parser,
    Subcommand,
};
use kanji_architect::{
    curriculum::{
        filter,
        level_view,
        warnings,
        RecordReport,
        Statistics,
    },
    parser::{
        export_file_name,
        read_curriculum,
        write_curriculum,
    },
    persistence::Settings,
    ArchitectError,
    Curriculum,
    Level,
    MoveOutcome,
    Record,
};
use tracing::{
    error,
    warn,
};
use tracing_subscriber::EnvFilter;

/// Plan kanji and radicals across 72 levels and check component ordering
#[derive(Parser)]
#[command(name = "kanji-architect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to the app data directory)
    #[arg(long, global = true, env = "KANJI_ARCHITECT_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List characters whose components are placed after them
    Check {
        file: PathBuf,
        /// Only report characters at this level
        #[arg(long)]
        level: Option<i64>,
        #[arg(long)]
        json: bool,
    },

    /// Print levels in order, optionally filtered by glyph or meaning
    Show {
        file: PathBuf,
        #[arg(long)]
        level: Option<i64>,
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Move one character to another level and export the result
    Move {
        file: PathBuf,
        /// Record id (e.g. "林-12") or glyph
        record: String,
        level: i64,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Move one character to its suggested level and export the result
    Fix {
        file: PathBuf,
        /// Record id (e.g. "林-12") or glyph
        record: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summary counts for a curriculum
    Stats {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Recently opened curricula
    Recent {
        /// Forget entries whose file no longer exists
        #[arg(long)]
        prune: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (defaults to <export prefix>_<date>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> Result<(), ArchitectError> {
    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&settings_path);

    match cli.command {
        Commands::Check { file, level, json } => {
            let curriculum = open(&file, &settings_path, &mut settings)?;
            let level = level.map(parse_level).transpose()?;
            let index = curriculum.placement_index();

            let reports: Vec<RecordReport> = warnings(curriculum.records(), &index)
                .into_iter()
                .filter(|report| level.map_or(true, |level| report.level == level))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else if reports.is_empty() {
                println!("No dependency violations.");
            } else {
                for report in &reports {
                    print_warning(report);
                }
                println!("\n{} violation(s)", reports.len());
            }
        }

        Commands::Show { file, level, query } => {
            let curriculum = open(&file, &settings_path, &mut settings)?;
            let index = curriculum.placement_index();
            let view = filter(curriculum.records(), query.as_deref().unwrap_or(""));

            let levels: Vec<Level> = match level {
                Some(level) => vec![parse_level(level)?],
                None => Level::all().collect(),
            };

            for level in levels {
                let row = level_view(&view, level);
                if row.is_empty() {
                    continue;
                }
                let cells: Vec<String> = row
                    .iter()
                    .map(|record| {
                        let flag = if kanji_architect::evaluate(record, &index).has_violations() {
                            "!"
                        } else {
                            ""
                        };
                        format!("{}{}", record.glyph, flag)
                    })
                    .collect();
                println!("L{:<3} {}", level, cells.join(" "));
            }
        }

        Commands::Move { file, record, level, output } => {
            let mut curriculum = open(&file, &settings_path, &mut settings)?;
            let target = parse_level(level)?;
            let id = resolve(&curriculum, &record)?.id.clone();

            let outcome = curriculum.move_to_level(&id, target);
            report_outcome(&record, outcome);
            export(&curriculum, output.output, &settings)?;
        }

        Commands::Fix { file, record, output } => {
            let mut curriculum = open(&file, &settings_path, &mut settings)?;
            let id = resolve(&curriculum, &record)?.id.clone();

            let outcome = curriculum.apply_suggestion(&id);
            report_outcome(&record, outcome);
            if outcome.is_moved() {
                export(&curriculum, output.output, &settings)?;
            }
        }

        Commands::Stats { file, json } => {
            let curriculum = open(&file, &settings_path, &mut settings)?;
            let stats = Statistics::collect(curriculum.records(), &curriculum.placement_index());

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total: {} items", stats.total);
                println!("Radicals: {}", stats.radicals);
                println!("Kanji: {}", stats.kanji);
                println!("Glyphs containing kanji: {}", stats.kanji_glyphs);
                println!("Occupied levels: {}/{}", stats.occupied_levels, Level::COUNT);
                println!("Dependency violations: {}", stats.violations);
            }
        }

        Commands::Recent { prune } => {
            if prune {
                let forgotten = settings.recent_files.prune_missing();
                if forgotten > 0 {
                    settings.save(&settings_path)?;
                    println!("Forgot {} missing file(s)", forgotten);
                }
            }
            if settings.recent_files.is_empty() {
                println!("No recent files.");
            }
            for entry in settings.recent_files.get_files() {
                let missing = if entry.file_exists() { "" } else { " (missing)" };
                println!(
                    "{}  {:<24} {}  {}{}",
                    entry.format_last_opened(),
                    entry.get_filename(),
                    entry.format_record_count(),
                    entry.file_path,
                    missing
                );
            }
        }
    }

    Ok(())
}

fn open(file: &Path, settings_path: &Path, settings: &mut Settings) -> Result<Curriculum, ArchitectError> {
    let records = read_curriculum(file)?;

    settings.recent_files.add_file(file.to_string_lossy().to_string(), records.len());
    if let Err(e) = settings.save(settings_path) {
        warn!(error = %e, "could not update recent files");
    }

    Ok(Curriculum::new(records))
}

fn parse_level(value: i64) -> Result<Level, ArchitectError> {
    u8::try_from(value).ok().and_then(Level::new).ok_or(ArchitectError::InvalidLevel(value))
}

fn resolve<'a>(curriculum: &'a Curriculum, key: &str) -> Result<&'a Record, ArchitectError> {
    curriculum.resolve(key).ok_or_else(|| ArchitectError::RecordNotFound(key.to_string()))
}

fn print_warning(report: &RecordReport) {
    let details: Vec<String> = report
        .diagnostic
        .component_details
        .iter()
        .map(|detail| match detail.level {
            Some(level) => format!("{} L{}", detail.glyph, level),
            None => format!("{} L?", detail.glyph),
        })
        .collect();

    let suggestion = match report.diagnostic.fix_level() {
        Some(level) => format!(" -> fix: L{}", level),
        None => String::new(),
    };

    println!(
        "L{:<3} {} [{}] needs {} ({}){}",
        report.level,
        report.glyph,
        report.id,
        report.diagnostic.violations.join(" "),
        details.join(", "),
        suggestion
    );
}

fn report_outcome(key: &str, outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Moved { from, to, order } => {
            println!("Moved {} from L{} to L{} (position {})", key, from, to, order)
        }
        MoveOutcome::Unchanged => println!("{} left in place", key),
    }
}

fn export(curriculum: &Curriculum, output: Option<PathBuf>, settings: &Settings) -> Result<(), ArchitectError> {
    let path = output.unwrap_or_else(|| {
        PathBuf::from(export_file_name(&settings.export_prefix, chrono::Local::now().date_naive()))
    });
    write_curriculum(&path, curriculum.records())?;
    println!("Exported {} records to {}", curriculum.len(), path.display());
    Ok(())
}
