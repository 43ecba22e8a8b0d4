//! Property Investment CLI
//!
//! Command-line interface for loan cost and investment projections

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use property_investment::{
    loan::LoanCostCalculator,
    projection::{ProjectionConfig, ProjectionEngine, ProjectionSummary},
    amortization, sweep, InputError, InputField, InputForm, LoanResult, ProjectionResult,
    RateTables, RentScenario, Scenario, ScenarioRunner,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "property-investment", version, about = "Mortgage cost and investment projection")]
struct Cli {
    /// Purchase price
    #[arg(long)]
    property_value: Option<String>,

    /// Deposit as a percent of the price
    #[arg(long)]
    deposit: Option<String>,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<String>,

    /// Loan term in years
    #[arg(long)]
    term: Option<String>,

    /// Annual council rates
    #[arg(long)]
    council_rates: Option<String>,

    /// Annual strata levies
    #[arg(long)]
    strata: Option<String>,

    /// Annual land tax
    #[arg(long)]
    land_tax: Option<String>,

    /// Annual sinking fund contribution
    #[arg(long)]
    sinking_fund: Option<String>,

    /// Other annual holding costs
    #[arg(long)]
    other_costs: Option<String>,

    /// Target weekly rent
    #[arg(long)]
    rent: Option<String>,

    /// Annual capital growth in percent
    #[arg(long)]
    growth: Option<String>,

    /// Annual inflation in percent
    #[arg(long)]
    inflation: Option<String>,

    /// Reject non-numeric inputs instead of falling back to defaults
    #[arg(long)]
    strict: bool,

    /// Print the month-by-month repayment schedule
    #[arg(long)]
    schedule: bool,

    /// Hold growth and inflation at zero
    #[arg(long)]
    no_projection: bool,

    /// Project fewer years than the loan term
    #[arg(long)]
    horizon: Option<u32>,

    /// Directory with stamp_duty_brackets.csv, lmi_rates.csv and fees.csv
    #[arg(long)]
    rates_dir: Option<PathBuf>,

    /// Write the yearly records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also compare these interest rates (percent), e.g. 5,6,7
    #[arg(long, value_delimiter = ',')]
    compare_rates: Vec<f64>,
}

impl Cli {
    /// Raw flag text routed through the bounded input provider
    fn form(&self) -> Result<InputForm, InputError> {
        let mut form = InputForm::new();
        let supplied = [
            (InputField::PropertyValue, &self.property_value),
            (InputField::DepositPercent, &self.deposit),
            (InputField::InterestRate, &self.rate),
            (InputField::LoanTerm, &self.term),
            (InputField::CouncilRates, &self.council_rates),
            (InputField::Strata, &self.strata),
            (InputField::LandTax, &self.land_tax),
            (InputField::SinkingFund, &self.sinking_fund),
            (InputField::OtherCosts, &self.other_costs),
            (InputField::WeeklyRent, &self.rent),
            (InputField::CapitalGrowth, &self.growth),
            (InputField::Inflation, &self.inflation),
        ];
        for (field, raw) in supplied {
            let Some(raw) = raw else { continue };
            if self.strict {
                form.set_raw_strict(field.name(), raw)?;
            } else {
                form.set_raw(field.name(), raw)?;
            }
        }
        Ok(form)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    loan: &'a LoanResult,
    summary: ProjectionSummary,
    projection: &'a ProjectionResult,
    rent_sweep: &'a [RentScenario],
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let tables = match &cli.rates_dir {
        Some(dir) => RateTables::from_csv_path(dir)
            .with_context(|| format!("loading rate tables from {}", dir.display()))?,
        None => RateTables::default_act(),
    };

    let form = cli.form().context("reading inputs")?;
    let loan_inputs = form.loan_inputs();
    let investment = form.investment_inputs(!cli.no_projection);

    let config = ProjectionConfig {
        horizon_years: cli.horizon,
    };
    let loan = LoanCostCalculator::new(tables.clone()).compute_loan(&loan_inputs);
    let projection = ProjectionEngine::new(config.clone()).project(&loan, &investment);
    let summary = projection.summary();
    let rent_sweep = sweep::compute_rent_sweep(
        investment.target_weekly_rent,
        sweep::total_monthly_costs(&loan, &investment),
    );

    if let Some(path) = &cli.csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for record in &projection.years {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    if cli.json {
        let report = Report {
            loan: &loan,
            summary,
            projection: &projection,
            rent_sweep: &rent_sweep,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Loan");
    println!("  Property value:  ${:>14.2}", loan.property_value);
    println!("  Deposit:         ${:>14.2}", loan.deposit_amount);
    println!("  Stamp duty:      ${:>14.2}", loan.stamp_duty);
    println!("  Total fees:      ${:>14.2}", loan.total_fees);
    println!("  Base loan:       ${:>14.2}", loan.base_loan);
    println!("  LVR:             {:>14.2}%", loan.lvr_percent);
    println!("  LMI:             ${:>14.2}", loan.lmi_cost);
    println!("  Total loan:      ${:>14.2}", loan.total_loan);
    println!("  Monthly payment: ${:>14.2}", loan.monthly_payment);
    if loan.is_high_lvr() {
        println!("  WARNING: LVR above 95%");
    }
    println!();

    if cli.schedule {
        println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Interest", "Principal", "Balance");
        let rows = amortization::amortization_schedule(
            loan.total_loan,
            loan.annual_interest_rate_percent,
            loan.loan_term_years,
        );
        for row in &rows {
            println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                row.month, row.payment, row.interest, row.principal, row.balance);
        }
        println!();
    }

    println!("{:>4} {:>14} {:>14} {:>14} {:>12} {:>12} {:>14} {:>14}",
        "Year", "Balance", "Property", "Equity", "Rent", "Net CF", "Net position", "Real net");
    println!("{}", "-".repeat(106));
    for row in &projection.years {
        println!("{:>4} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
            row.year,
            row.remaining_balance,
            row.property_value,
            row.equity,
            row.rental_income,
            row.net_cashflow,
            row.total_net_position,
            row.real_net_position,
        );
    }

    println!("\nSummary:");
    println!("  Years projected:     {}", summary.total_years);
    println!("  Total repayments:    ${:.2}", summary.total_repayments);
    println!("  Total interest:      ${:.2}", summary.total_interest);
    println!("  Total holding costs: ${:.2}", summary.total_holding_costs);
    println!("  Total rental income: ${:.2}", summary.total_rental_income);
    println!("  Net cashflow total:  ${:.2}", summary.net_cashflow_total);
    match summary.break_even_year {
        Some(year) => println!("  Break-even year:     {}", year),
        None => println!("  Break-even year:     not reached"),
    }

    println!("\nRent sensitivity (net monthly position):");
    for point in &rent_sweep {
        println!("  ${:>8.2}/wk  ${:>12.2}", point.weekly_rent, point.net_monthly_position);
    }

    if !cli.compare_rates.is_empty() {
        let compare_rates: Vec<f64> = cli
            .compare_rates
            .iter()
            .map(|&r| InputField::InterestRate.bounds().clamp(r))
            .collect();
        let scenario = Scenario {
            loan: loan_inputs,
            investment,
        };
        let outcomes = ScenarioRunner::with_rates(tables)
            .interest_rate_sensitivity(&scenario, &compare_rates, &config);

        println!("\nInterest rate comparison:");
        println!("{:>8} {:>14} {:>16} {:>16} {:>10}", "Rate", "Payment", "Total interest", "Final net", "Break-even");
        for outcome in &outcomes {
            let summary = outcome.projection.summary();
            println!("{:>7.2}% {:>14.2} {:>16.2} {:>16.2} {:>10}",
                outcome.loan.annual_interest_rate_percent,
                outcome.loan.monthly_payment,
                summary.total_interest,
                summary.final_net_position,
                summary.break_even_year.map_or("-".to_string(), |y| y.to_string()),
            );
        }
    }

    if let Some(path) = &cli.csv {
        println!("\nYearly records written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("property-investment").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_non_numeric_flag_falls_back_to_default() {
        let form = parse(&["--rate", "lots", "--deposit", "150"]).form().unwrap();

        assert_eq!(form.get(InputField::InterestRate), 6.0);
        assert_eq!(form.get(InputField::DepositPercent), 100.0);
    }

    #[test]
    fn test_strict_rejects_non_numeric_flag() {
        let cli = parse(&["--strict", "--rate", "lots"]);
        assert_eq!(cli.form().unwrap_err(), InputError::InvalidNumber("lots".to_string()));

        let form = parse(&["--strict", "--term", "25"]).form().unwrap();
        assert_eq!(form.loan_inputs().loan_term_years, 25);
    }
}
