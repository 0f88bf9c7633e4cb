use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;

mod chart;
mod config;
mod error;
mod import;
mod logging;
mod models;
mod report;
mod risk;
mod score;
mod session;
mod store;
mod sync;
#[cfg(test)]
mod testing;

use config::Config;
use models::Metrics;
use report::Dashboard;
use session::Session;
use store::{HttpStudentStore, StudentStore};
use sync::Synchronizer;

#[derive(Parser)]
#[command(name = "wellbeing-dashboard")]
#[command(about = "Student well-being dashboard: risk scoring and record sync", long_about = None)]
struct Cli {
    /// Base URL of the student API (overrides WELLBEING_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct MetricArgs {
    #[arg(long, default_value_t = Metrics::seed().gpa)]
    gpa: f64,
    /// Hours of sleep per night
    #[arg(long, default_value_t = Metrics::seed().sleep)]
    sleep: f64,
    /// Stress level in percent
    #[arg(long, default_value_t = Metrics::seed().stress)]
    stress: f64,
    /// Study hours per day
    #[arg(long, default_value_t = Metrics::seed().study)]
    study: f64,
    /// Social hours per day
    #[arg(long, default_value_t = Metrics::seed().social)]
    social: f64,
    /// Exercise hours per day
    #[arg(long, default_value_t = Metrics::seed().exercise)]
    exercise: f64,
}

impl MetricArgs {
    fn into_metrics(self) -> anyhow::Result<Metrics> {
        let metrics = Metrics {
            gpa: self.gpa,
            sleep: self.sleep,
            stress: self.stress,
            study: self.study,
            social: self.social,
            exercise: self.exercise,
        };
        metrics.validate()?;
        Ok(metrics)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the dashboard locally
    Show {
        #[command(flatten)]
        metrics: MetricArgs,
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the dashboard as a markdown report
    Report {
        #[command(flatten)]
        metrics: MetricArgs,
        #[arg(long)]
        username: Option<String>,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Show the dashboard, then save the wellbeing score to the server
    Submit {
        #[arg(long)]
        username: String,
        #[command(flatten)]
        metrics: MetricArgs,
    },
    /// Look up the stored record for a student
    Status {
        #[arg(long)]
        username: String,
    },
    /// Submit metrics for many students from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Administer student records directly
    #[command(subcommand)]
    Students(StudentCommands),
    /// Check that the API is reachable
    Health,
}

#[derive(Subcommand)]
enum StudentCommands {
    /// List one page of students
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = config::DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Fetch a student by id
    Get { id: i64 },
    /// Delete a student by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }

    match cli.command {
        Commands::Show { metrics, json } => {
            let dashboard = Dashboard::build(&metrics.into_metrics()?, &config.weights);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", report::render_dashboard(None, &dashboard));
            }
        }
        Commands::Report {
            metrics,
            username,
            out,
        } => {
            let session = username.as_deref().map(Session::login).transpose()?;
            let dashboard = Dashboard::build(&metrics.into_metrics()?, &config.weights);
            let report = report::render_dashboard(session.as_ref().map(Session::email), &dashboard);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Submit { username, metrics } => {
            let mut session = Session::login(&username)?;
            let metrics = metrics.into_metrics()?;
            let dashboard = Dashboard::build(&metrics, &config.weights);
            print!("{}", report::render_dashboard(Some(session.email()), &dashboard));

            let sync = Synchronizer::new(HttpStudentStore::new(&config)?, config.page_limit)
                .with_weights(config.weights);
            let result = sync.synchronize(&mut session, &metrics).await;
            println!();
            println!("{}", report::render_sync_result(&result));
            if result.is_err() {
                println!("Dashboard updated! (Note: Could not save to server)");
            }
            session.logout();
        }
        Commands::Status { username } => {
            let mut session = Session::login(&username)?;
            let sync = Synchronizer::new(HttpStudentStore::new(&config)?, config.page_limit)
                .with_weights(config.weights);
            match sync.load(&mut session).await {
                Ok(record) => println!("{}", report::render_welcome(record.as_ref())),
                Err(err) => {
                    warn!(error = %err, "could not load student data");
                    println!("Could not connect to server. Using offline mode.");
                }
            }
        }
        Commands::Import { csv } => {
            let sync = Synchronizer::new(HttpStudentStore::new(&config)?, config.page_limit)
                .with_weights(config.weights);
            let summary = import::import_csv(&sync, &csv).await?;
            println!(
                "Synchronized {} students from {} ({} failed).",
                summary.synced,
                csv.display(),
                summary.failed
            );
        }
        Commands::Students(command) => {
            let store = HttpStudentStore::new(&config)?;
            run_student_command(&store, command).await?;
        }
        Commands::Health => {
            let store = HttpStudentStore::new(&config)?;
            let status = store
                .health()
                .await
                .with_context(|| format!("API at {} is unreachable", config.api_url))?;
            println!("API at {} is {status}.", config.api_url);
        }
    }

    Ok(())
}

async fn run_student_command<S: StudentStore>(
    store: &S,
    command: StudentCommands,
) -> anyhow::Result<()> {
    match command {
        StudentCommands::List { skip, limit } => {
            let students = store.list(skip, limit).await?;
            if students.is_empty() {
                println!("No students found.");
                return Ok(());
            }
            for student in students {
                println!(
                    "- #{} {} ({}, {}) score {}",
                    student.id,
                    student.name,
                    student.email,
                    student.cohort.as_deref().unwrap_or("no cohort"),
                    student
                        .wellbeing_score
                        .map(|score| format!("{score}%"))
                        .unwrap_or_else(|| "n/a".to_string())
                );
            }
        }
        StudentCommands::Get { id } => match store.get(id).await? {
            Some(student) => println!("{}", serde_json::to_string_pretty(&student)?),
            None => println!("Student with id {id} not found."),
        },
        StudentCommands::Delete { id } => {
            store.delete(id).await?;
            println!("Deleted student {id}.");
        }
    }
    Ok(())
}
