//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDutyTableAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::schedule_csv_adapter::CsvScheduleWriter;
use crate::domain::config_validation::{parse_date, validate_config};
use crate::domain::error::MortgageError;
use crate::domain::loan::Loan;
use crate::domain::purchase::{PurchaseBreakdown, PurchasePlan};
use crate::domain::scenario_cache::ScenarioCache;
use crate::domain::simulation::{self, SimulationParams, SimulationResult};
use crate::domain::stamp_duty::StampDutyTable;
use crate::ports::config_port::ConfigPort;
use crate::ports::duty_table_port::DutyTablePort;
use crate::ports::report_port::ReportPort;

const DEFAULT_STATE: &str = "Vic";
const DEFAULT_TERM_YEARS: i64 = 30;
const DEFAULT_EXPENSES: f64 = 2_500.0;

#[derive(Parser, Debug)]
#[command(name = "mortgage", about = "Mortgage amortization and offset account simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a purchase and simulate the loan month by month
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the monthly schedule as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Look up stamp duty for a purchase price
    StampDuty {
        #[arg(long)]
        state: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Show the minimum monthly payment for a loan
    Payment {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=50))]
        term_years: u32,
    },
    /// Compare payoff time across monthly reserve levels
    Sweep {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 500.0)]
        step: f64,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything a run needs, resolved from one config file.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub plan: PurchasePlan,
    pub breakdown: PurchaseBreakdown,
    pub params: SimulationParams,
    /// Term used for the displayed minimum payment.
    pub term_months: u32,
    pub start_date: Option<NaiveDate>,
}

impl Scenario {
    pub fn minimum_payment(&self) -> Result<f64, MortgageError> {
        Ok(Loan::new(self.params.principal, self.params.rate, self.term_months)?.monthly_payment)
    }
}

pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mortgage=warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();

    let result = match cli.command {
        Command::Simulate { config, output } => run_simulate(&config, output.as_deref()),
        Command::StampDuty {
            state,
            price,
            table,
        } => run_stamp_duty(&state, price, table),
        Command::Payment {
            principal,
            rate,
            term_years,
        } => run_payment(principal, rate, term_years),
        Command::Sweep { config, step } => run_sweep(&config, step),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, MortgageError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Table named by `[stamp_duty] table_path`, or the built-in one.
pub fn load_duty_table(config: &dyn ConfigPort) -> Result<StampDutyTable, MortgageError> {
    match config
        .get_string("stamp_duty", "table_path")
        .filter(|p| !p.trim().is_empty())
    {
        Some(path) => CsvDutyTableAdapter::from_path(PathBuf::from(path.trim())).load_table(),
        None => CsvDutyTableAdapter::builtin().load_table(),
    }
}

pub fn build_purchase_plan(config: &dyn ConfigPort) -> PurchasePlan {
    PurchasePlan {
        house_cost: config.get_double("purchase", "house_cost", 0.0),
        cash: config.get_double("purchase", "cash", 0.0),
        jurisdiction: config
            .get_string("purchase", "state")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STATE.to_string()),
        borrow: config.get_optional_double("purchase", "borrow"),
    }
}

pub fn build_simulation_params(
    config: &dyn ConfigPort,
    breakdown: &PurchaseBreakdown,
) -> SimulationParams {
    SimulationParams {
        rate: config.get_double("loan", "rate", 0.0),
        principal: breakdown.borrow,
        income: config.get_double("budget", "income", 0.0),
        starting_cash: breakdown.cash_left,
        monthly_expenses: config.get_double("budget", "expenses", DEFAULT_EXPENSES),
        monthly_reserve: config.get_double("budget", "reserve", 0.0),
        use_offset: config.get_bool("budget", "offset", true),
        horizon_months: config.get_int(
            "simulation",
            "horizon_months",
            simulation::DEFAULT_HORIZON_MONTHS as i64,
        ) as u32,
        amortization_term_months: config.get_int(
            "simulation",
            "amortization_months",
            simulation::AMORTIZATION_TERM_MONTHS as i64,
        ) as u32,
    }
}

pub fn prepare_scenario(config: &dyn ConfigPort) -> Result<Scenario, MortgageError> {
    validate_config(config)?;

    let table = load_duty_table(config)?;
    let plan = build_purchase_plan(config);
    let breakdown = plan.breakdown(&table)?;
    let params = build_simulation_params(config, &breakdown);

    let start_date = config
        .get_string("loan", "start_date")
        .map(|s| parse_date(&s, "loan", "start_date"))
        .transpose()?;

    Ok(Scenario {
        plan,
        breakdown,
        params,
        term_months: (config.get_int("loan", "term_years", DEFAULT_TERM_YEARS) * 12) as u32,
        start_date,
    })
}

pub fn run_simulate(config_path: &Path, output_path: Option<&Path>) -> Result<(), MortgageError> {
    // Stage 1: Load and validate config, plan the purchase
    let config = load_config(config_path)?;
    let scenario = prepare_scenario(&config)?;
    print_purchase(&scenario)?;

    // Stage 2: Simulate
    eprintln!(
        "Simulating up to {} months ({})",
        scenario.params.horizon_months,
        if scenario.params.use_offset {
            "offset account"
        } else {
            "no offset"
        }
    );
    let result = simulation::run(&scenario.params)?;

    // Stage 3: Summary
    print_summary(&scenario, &result);

    // Stage 4: Export schedule
    if let Some(path) = output_path {
        CsvScheduleWriter.write(&result, path)?;
        eprintln!("\nSchedule written to: {}", path.display());
    }
    Ok(())
}

fn print_purchase(scenario: &Scenario) -> Result<(), MortgageError> {
    let b = &scenario.breakdown;
    eprintln!("\n=== Purchase ===");
    eprintln!("House cost:       ${:.0}", scenario.plan.house_cost);
    if b.stamp_duty.note.is_empty() {
        eprintln!("Stamp duty:       ${}", b.stamp_duty.amount);
    } else {
        eprintln!(
            "Stamp duty:       ${} ({})",
            b.stamp_duty.amount, b.stamp_duty.note
        );
    }
    eprintln!("Borrow:           ${:.0}", b.borrow);
    eprintln!("Cash left:        ${:.0}", b.cash_left);
    eprintln!("LVR:              {:.1}%", b.lvr * 100.0);
    eprintln!("Min. payment:     ${:.0}", scenario.minimum_payment()?);
    Ok(())
}

fn print_summary(scenario: &Scenario, result: &SimulationResult) {
    eprintln!("\n=== Simulation ===");
    eprintln!("Monthly payment:  ${:.0}", result.monthly_payment);
    eprintln!("Outcome:          {}", result.termination);
    eprintln!(
        "Finished in {:.1} years. Total interest paid: ${:.0}",
        result.years_elapsed(),
        result.total_interest()
    );
    if let Some(last) = result.final_record() {
        eprintln!("Final principal:  ${:.0}", last.principal);
        if scenario.params.use_offset {
            eprintln!("Final offset:     ${:.0}", last.offset_balance);
        }
    }
    if let Some(finish) = scenario.start_date.and_then(|d| result.finish_date(d)) {
        eprintln!("Finish date:      {}", finish.format("%B %Y"));
    }
}

fn run_stamp_duty(state: &str, price: f64, table_path: Option<PathBuf>) -> Result<(), MortgageError> {
    let adapter = match table_path {
        Some(path) => CsvDutyTableAdapter::from_path(path),
        None => CsvDutyTableAdapter::builtin(),
    };
    let quote = adapter.load_table()?.duty_for(state, price)?;

    if quote.note.is_empty() {
        println!("{}", quote.amount);
    } else {
        println!("{} ({})", quote.amount, quote.note);
    }
    Ok(())
}

pub fn run_payment(principal: f64, rate: f64, term_years: u32) -> Result<(), MortgageError> {
    let term_months = term_years
        .checked_mul(12)
        .ok_or_else(|| MortgageError::invalid("term_years", "term is too long"))?;
    let loan = Loan::new(principal, rate, term_months)?;
    println!("{:.2}", loan.monthly_payment);
    Ok(())
}

/// Reserve amounts from zero up to whatever the budget can spare above the
/// minimum payment, in `step` increments.
pub fn reserve_levels(
    params: &SimulationParams,
    minimum_payment: f64,
    step: f64,
) -> Result<Vec<f64>, MortgageError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(MortgageError::invalid("step", "step must be positive"));
    }
    let ceiling = params.income - params.monthly_expenses - minimum_payment;
    if ceiling < 0.0 {
        tracing::warn!(ceiling, "income does not cover expenses and the minimum payment");
    }

    // Tolerates a ceiling that sits on a step boundary up to rounding.
    let count = if ceiling >= 0.0 {
        (ceiling / step + 1e-9).floor() as usize
    } else {
        0
    };
    Ok((0..=count).map(|i| step * i as f64).collect())
}

pub fn sweep_reserves(
    scenario: &Scenario,
    step: f64,
    cache: &mut ScenarioCache,
) -> Result<Vec<(f64, SimulationResult)>, MortgageError> {
    let levels = reserve_levels(&scenario.params, scenario.minimum_payment()?, step)?;
    levels
        .into_iter()
        .map(|reserve| {
            let params = SimulationParams {
                monthly_reserve: reserve,
                ..scenario.params.clone()
            };
            cache
                .get_or_run(&params)
                .map(|result| (reserve, result.clone()))
        })
        .collect()
}

fn run_sweep(config_path: &Path, step: f64) -> Result<(), MortgageError> {
    let config = load_config(config_path)?;
    let scenario = prepare_scenario(&config)?;

    let mut cache = ScenarioCache::new();
    let rows = sweep_reserves(&scenario, step, &mut cache)?;

    println!("reserve,years,total_interest,outcome");
    for (reserve, result) in &rows {
        println!(
            "{:.0},{:.1},{:.0},{}",
            reserve,
            result.years_elapsed(),
            result.total_interest(),
            result.termination
        );
    }
    eprintln!("{} reserve levels simulated", rows.len());
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), MortgageError> {
    let config = load_config(config_path)?;
    let scenario = prepare_scenario(&config)?;
    eprintln!(
        "Borrowing ${:.0} at {}% with ${:.0} cash left",
        scenario.breakdown.borrow, scenario.params.rate, scenario.breakdown.cash_left
    );
    eprintln!("\nConfiguration is valid.");
    Ok(())
}
