use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod analytics;
mod kv;
mod models;
mod report;
mod seed;
mod store;
mod submit;
mod validate;

use analytics::{Filters, Timeframe};
use kv::{FileStore, KeyValueStore, PgStore};
use models::{FacultyKey, FeedbackDraft};
use seed::SeedOutcome;
use submit::{SubmitError, Submitter};

#[derive(Parser)]
#[command(name = "feedback-portal")]
#[command(about = "Collect and analyse student course feedback", long_about = None)]
struct Cli {
    /// Postgres connection; when unset, feedback is kept in local files
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,
    /// Directory for the local file store
    #[arg(long, env = "FEEDBACK_PORTAL_DIR", default_value = ".feedback-portal", global = true)]
    data_dir: PathBuf,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    department: Option<String>,
    /// One of all, 7days, 30days, 90days
    #[arg(long, default_value = "all")]
    timeframe: Timeframe,
}

impl FilterArgs {
    fn into_filters(self) -> Filters {
        Filters {
            department: self.department.filter(|d| d != "all"),
            timeframe: self.timeframe,
        }
    }
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    student_name: String,
    #[arg(long, default_value = "")]
    student_id: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    department: String,
    #[arg(long, default_value = "")]
    semester: String,
    #[arg(long, default_value = "")]
    faculty_name: String,
    #[arg(long, default_value = "")]
    course_name: String,
    #[arg(long, default_value = "")]
    course_code: String,
    #[arg(long, default_value = "")]
    overall_rating: String,
    #[arg(long, default_value = "")]
    teaching_quality: String,
    #[arg(long, default_value = "")]
    course_content: String,
    #[arg(long, default_value = "")]
    communication: String,
    #[arg(long, default_value = "")]
    feedback: String,
    #[arg(long)]
    anonymous: bool,
    /// Simulated round trip before the record is stored
    #[arg(long, default_value_t = submit::DEFAULT_ROUND_TRIP.as_millis() as u64)]
    delay_ms: u64,
}

impl SubmitArgs {
    fn into_draft(self) -> (FeedbackDraft, Duration) {
        let draft = FeedbackDraft {
            student_name: self.student_name,
            student_id: self.student_id,
            email: self.email,
            department: self.department,
            semester: self.semester,
            faculty_name: self.faculty_name,
            course_name: self.course_name,
            course_code: self.course_code,
            overall_rating: self.overall_rating,
            teaching_quality: self.teaching_quality,
            course_content: self.course_content,
            communication: self.communication,
            feedback: self.feedback,
            anonymous: self.anonymous,
        };
        (draft, Duration::from_millis(self.delay_ms))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the Postgres schema
    InitDb,
    /// Load sample feedback if none exists
    Seed,
    /// Submit one feedback record
    Submit(SubmitArgs),
    /// Import feedback from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Show dashboard analytics
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// List faculty with their ratings
    Faculty {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    /// Show one faculty member in detail
    FacultyProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown dashboard report
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_store(cli: &Cli) -> anyhow::Result<Box<dyn KeyValueStore>> {
    match &cli.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .context("failed to connect to Postgres")?;
            Ok(Box::new(PgStore::new(pool)))
        }
        None => {
            let store = FileStore::new(&cli.data_dir);
            debug!(dir = %store.dir().display(), "using local file store");
            Ok(Box::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let backend = open_store(&cli).await?;
    let backend = &*backend;

    match cli.command {
        Commands::InitDb => {
            let database_url = cli
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set to initialise Postgres")?;
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
                .context("failed to connect to Postgres")?;
            kv::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => match seed::seed(backend).await? {
            SeedOutcome::Seeded {
                count,
                departments,
                faculty_count,
                average_rating,
                first,
                last,
            } => {
                println!("Sample data seeded: {count} feedback entries.");
                println!(
                    "- Departments: {} ({})",
                    departments.len(),
                    departments.join(", ")
                );
                println!("- Faculty members: {faculty_count}");
                println!("- Average rating: {average_rating:.1}/5.0");
                println!(
                    "- Date range: {} - {}",
                    first.format("%b %Y"),
                    last.format("%b %Y")
                );
            }
            SeedOutcome::AlreadyPresent { count } => {
                println!("Sample data already exists. Skipping seeding.");
                println!("Current feedback count: {count}");
            }
            SeedOutcome::Unreadable { reason } => {
                println!("Stored feedback could not be read ({reason}). Skipping seeding.");
            }
        },
        Commands::Submit(args) => {
            let (draft, delay) = args.into_draft();
            let submitter = Submitter::new(backend, delay);
            match submitter.submit(draft).await {
                Ok(record) => {
                    println!("Feedback submitted successfully! Thank you for your valuable feedback.");
                    println!("Reference id: {}", record.id);
                }
                Err(err) => {
                    if let SubmitError::Invalid(errors) = &err {
                        for (field, message) in errors.iter() {
                            println!("- {field}: {message}");
                        }
                        anyhow::bail!("validation error: {err}");
                    }
                    anyhow::bail!("submission failed: {err}");
                }
            }
        }
        Commands::Import { csv } => {
            let summary = store::import_csv(backend, &csv).await?;
            println!(
                "Imported {} feedback entries from {} ({} skipped).",
                summary.inserted,
                csv.display(),
                summary.skipped
            );
        }
        Commands::Dashboard { filters, json } => {
            let filters = filters.into_filters();
            let records = store::load_all(backend).await?;
            let now = Utc::now();
            let dashboard = analytics::build_dashboard(&records, &filters, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", report::build_report(&filters, now, &dashboard));
            }
        }
        Commands::Faculty { search, json } => {
            let records = store::load_all(backend).await?;
            let directory = analytics::faculty_directory(&records);
            let matches = analytics::search_faculty(&directory, &search);

            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                let totals = analytics::directory_totals(&directory);
                print!("{}", report::build_directory(&totals, &matches));
            }
        }
        Commands::FacultyProfile {
            name,
            department,
            json,
        } => {
            let records = store::load_all(backend).await?;
            let key = FacultyKey::new(name, department);
            let Some(profile) = analytics::faculty_profile(&records, &key) else {
                println!("No feedback found for {} ({}).", key.name, key.department);
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print!("{}", report::build_profile(&profile));
            }
        }
        Commands::Report { filters, out } => {
            let filters = filters.into_filters();
            let records = store::load_all(backend).await?;
            let now = Utc::now();
            let dashboard = analytics::build_dashboard(&records, &filters, now);
            let report = report::build_report(&filters, now, &dashboard);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
