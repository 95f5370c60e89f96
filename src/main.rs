use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{init_tracing, load_settings, Settings};
use core_types::{EmailAddress, ScenarioInput, ScenarioResult};
use database::{connect, open_storage, run_migrations, DbRepository, LeadStore, ScenarioStore};
use report::format::{currency, payback};
use report::ReportRenderer;
use rust_decimal::Decimal;
use simulator::RoiCalculator;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;
use web_server::AppState;

/// The main entry point for the invoice automation ROI service.
#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env become visible to both the config layer and DATABASE_URL.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = load_settings().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Simulate(args) => handle_simulate(args, &settings),
        Commands::Scenarios {
            command: ScenarioCommands::List,
        } => handle_list_scenarios(&settings).await,
        Commands::Report(args) => handle_report(args, &settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Estimates the savings of automating accounts-payable invoice processing.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Validate and calculate a scenario locally, without storing it.
    Simulate(SimulateArgs),
    /// Inspect stored scenarios (requires the database).
    Scenarios {
        #[command(subcommand)]
        command: ScenarioCommands,
    },
    /// Render a stored scenario's report to a file and record the lead.
    Report(ReportArgs),
}

#[derive(Subcommand)]
enum ScenarioCommands {
    /// List every stored scenario, newest first.
    List,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,
    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// A JSON file with the scenario parameters. Flags override its values.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Invoices processed per month.
    #[arg(long)]
    volume: Option<Decimal>,
    /// Accounts-payable staff count.
    #[arg(long)]
    staff: Option<Decimal>,
    /// Hours of manual work per invoice.
    #[arg(long)]
    hours: Option<Decimal>,
    /// Hourly wage of AP staff.
    #[arg(long)]
    wage: Option<Decimal>,
    /// Manual error rate, in percent.
    #[arg(long)]
    error_rate: Option<Decimal>,
    /// Cost of correcting one error.
    #[arg(long)]
    error_cost: Option<Decimal>,
    /// Projection horizon in months.
    #[arg(long)]
    months: Option<i64>,
    /// One-time implementation cost (defaults to 0).
    #[arg(long)]
    implementation_cost: Option<Decimal>,
    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ReportArgs {
    /// The stored scenario to report on.
    #[arg(long)]
    scenario_id: Uuid,
    /// The address the report is prepared for.
    #[arg(long)]
    email: String,
    /// Output path (defaults to the report's own file name).
    #[arg(long, short)]
    out: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    let storage = open_storage(&settings.database)
        .await
        .context("Failed to open storage")?;
    if storage.ephemeral {
        tracing::warn!("Scenarios and leads will be lost when the server stops.");
    }

    let calculator = RoiCalculator::new(settings.calculation);
    let state = Arc::new(AppState::new(storage, calculator));
    web_server::run_server(state, &settings.server).await
}

fn handle_simulate(args: SimulateArgs, settings: &Settings) -> Result<()> {
    let mut input = match &args.file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<ScenarioInput>(&raw)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => ScenarioInput::default(),
    };
    apply_overrides(&mut input, &args);

    let params = match simulator::validated(&input) {
        Ok(params) => params,
        Err(violations) => {
            for violation in &violations {
                eprintln!("  - {violation}");
            }
            bail!("{} invalid parameter(s)", violations.len());
        }
    };

    let results = RoiCalculator::new(settings.calculation).calculate(&params);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", results_table(&results, params.time_horizon_months));
    }
    Ok(())
}

async fn handle_list_scenarios(settings: &Settings) -> Result<()> {
    let repo = connect_required(settings).await?;
    let scenarios = repo.list_scenarios().await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Monthly Savings", "Payback", "ROI", "Created"]);
    for scenario in &scenarios {
        table.add_row(vec![
            scenario.id.to_string(),
            scenario.scenario_name.clone(),
            currency(scenario.results.monthly_savings),
            payback(scenario.results.payback_months),
            scenario.results.roi_percentage.to_string(),
            scenario.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!("{} scenario(s).", scenarios.len());
    Ok(())
}

async fn handle_report(args: ReportArgs, settings: &Settings) -> Result<()> {
    let email = EmailAddress::parse(args.email.trim()).context("Invalid email format")?;
    let repo = connect_required(settings).await?;
    let scenario = repo
        .get_scenario(args.scenario_id)
        .await
        .with_context(|| format!("Scenario {} could not be loaded", args.scenario_id))?;

    let now = Utc::now();
    let report = ReportRenderer::new().render(&scenario, &email, now.date_naive())?;
    let out = args.out.unwrap_or_else(|| PathBuf::from(&report.filename));
    tokio::fs::write(&out, &report.bytes)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;

    repo.record_lead(&email, scenario.id, now).await?;
    println!("Report for '{}' written to {}", scenario.scenario_name, out.display());
    Ok(())
}

/// Connects without the in-memory fallback; these commands only make sense
/// against stored data.
async fn connect_required(settings: &Settings) -> Result<DbRepository> {
    let pool = connect(&settings.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(DbRepository::new(pool))
}

fn apply_overrides(input: &mut ScenarioInput, args: &SimulateArgs) {
    input.monthly_invoice_volume = args.volume.or(input.monthly_invoice_volume);
    input.num_ap_staff = args.staff.or(input.num_ap_staff);
    input.avg_hours_per_invoice = args.hours.or(input.avg_hours_per_invoice);
    input.hourly_wage = args.wage.or(input.hourly_wage);
    input.error_rate_manual = args.error_rate.or(input.error_rate_manual);
    input.error_cost = args.error_cost.or(input.error_cost);
    input.time_horizon_months = args.months.or(input.time_horizon_months);
    input.one_time_implementation_cost = args
        .implementation_cost
        .or(input.one_time_implementation_cost);
}

fn results_table(results: &ScenarioResult, months: i64) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Monthly savings", currency(results.monthly_savings)),
        (
            "Cumulative savings",
            format!("{} over {months} months", currency(results.cumulative_savings)),
        ),
        ("Net savings", currency(results.net_savings)),
        ("Payback period", payback(results.payback_months)),
        ("ROI", results.roi_percentage.to_string()),
        ("Manual labor cost / month", currency(results.labor_cost_manual)),
        ("Automation cost / month", currency(results.auto_cost)),
        ("Error savings / month", currency(results.error_savings)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    table
}
