//! fincalc CLI
//!
//! Command-line front end for the formula engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use fincalc::engine::{
    compound_growth, compute_amortization, plan_goal, present_value_of_annuity, project_annual_accrual,
    project_sip, sip_schedule, AccrualPlan, Schedule,
};
use fincalc::planning::{fire_plan, FireInputs, DEFAULT_WITHDRAWAL_RATE_PERCENT};
use fincalc::scenario::{emi_rate_sweep, rate_grid};
use fincalc::tax::{self, apply_cess, compare_regimes, compute_slab_tax, Deductions, TaxSlabTable};
use fincalc::CompoundingFrequency;

#[derive(Parser)]
#[command(name = "fincalc", version, about = "Deposit, SIP, loan and tax calculators")]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lump-sum deposit maturity value
    Fd {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: f64,
        /// Compounding periods per year (1, 2, 4 or 12)
        #[arg(long, default_value_t = 4)]
        frequency: u32,
    },
    /// Loan EMI and amortization schedule
    Emi {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
        /// Roll the schedule up into yearly rows
        #[arg(long)]
        yearly: bool,
    },
    /// Monthly SIP future value
    Sip {
        #[arg(long)]
        monthly: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Monthly SIP needed to reach a target
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        existing: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Yearly accrual ledger (PPF, EPF, SSY)
    Accrual {
        #[arg(long)]
        yearly: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 0.0)]
        opening: f64,
        /// Stop contributing after this many years
        #[arg(long)]
        contribution_years: Option<u32>,
    },
    /// Present value of a level annual payment
    Pv {
        #[arg(long)]
        payment: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
    },
    /// Slab tax on taxable income
    Tax {
        #[arg(long)]
        income: f64,
        /// CSV slab table; defaults to the new regime
        #[arg(long)]
        slabs: Option<String>,
        #[arg(long, default_value_t = tax::DEFAULT_CESS_PERCENT)]
        cess: f64,
    },
    /// Old versus new regime comparison
    Regime {
        #[arg(long)]
        income: f64,
        #[arg(long, default_value_t = 0.0)]
        section_80c: f64,
        #[arg(long, default_value_t = 0.0)]
        section_80d: f64,
        #[arg(long, default_value_t = 0.0)]
        hra: f64,
        #[arg(long, default_value_t = 0.0)]
        lta: f64,
    },
    /// Retirement corpus and required SIP
    Fire {
        #[arg(long)]
        current_age: u32,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long)]
        monthly_expenses: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, default_value_t = 12.0)]
        returns: f64,
        #[arg(long, default_value_t = 6.0)]
        inflation: f64,
        #[arg(long, default_value_t = DEFAULT_WITHDRAWAL_RATE_PERCENT)]
        withdrawal_rate: f64,
    },
    /// EMI across a range of interest rates
    Sweep {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        months: u32,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_schedule(schedule: &Schedule, label: &str) {
    println!(
        "{:>6} {:>16} {:>14} {:>14} {:>14} {:>16}",
        label, "Opening", "Paid In", "Interest", "Principal", "Closing"
    );
    println!("{}", "-".repeat(85));
    for row in schedule {
        println!(
            "{:>6} {:>16.2} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            row.period, row.opening_balance, row.contribution, row.interest, row.principal, row.closing_balance
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fd {
            principal,
            rate,
            years,
            frequency,
        } => {
            info!("fd: {principal} at {rate}% for {years} years, {frequency}x per year");
            let frequency = CompoundingFrequency::try_from(frequency)?;
            let maturity = compound_growth(principal, rate, years, frequency)?;
            if cli.json {
                emit(&serde_json::json!({ "maturity_value": maturity, "interest": maturity - principal }))?;
            } else {
                println!("Maturity value: {maturity:.2}");
                println!("Interest earned: {:.2}", maturity - principal);
            }
        }
        Command::Emi {
            principal,
            rate,
            months,
            yearly,
        } => {
            info!("emi: {principal} at {rate}% over {months} months");
            let result = compute_amortization(principal, rate, months)?;
            if cli.json {
                emit(&result)?;
            } else {
                println!("EMI: {:.2}", result.periodic_payment);
                println!("Total paid: {:.2}", result.total_paid);
                println!("Total interest: {:.2}\n", result.total_interest);
                if yearly {
                    print_schedule(&result.schedule.by_year(12), "Year");
                } else {
                    print_schedule(&result.schedule, "Month");
                }
            }
        }
        Command::Sip { monthly, rate, months } => {
            info!("sip: {monthly}/month at {rate}% for {months} months");
            let future_value = project_sip(monthly, rate, months)?;
            if cli.json {
                emit(&serde_json::json!({
                    "future_value": future_value,
                    "schedule": sip_schedule(monthly, rate, months)?.by_year(12),
                }))?;
            } else {
                let invested = monthly * months as f64;
                println!("Invested: {invested:.2}");
                println!("Future value: {future_value:.2}");
                println!("Gains: {:.2}", future_value - invested);
            }
        }
        Command::Goal {
            target,
            existing,
            rate,
            months,
        } => {
            info!("goal: {target} in {months} months with {existing} saved");
            let result = plan_goal(target, existing, rate, months)?;
            if cli.json {
                emit(&result)?;
            } else if result.goal_already_met() {
                println!("Goal already met: savings grow to {:.2}", result.projected_value);
            } else {
                println!("Required monthly SIP: {:.2}", result.required_periodic_contribution);
                println!("Projected value: {:.2}", result.projected_value);
            }
        }
        Command::Accrual {
            yearly,
            rate,
            years,
            opening,
            contribution_years,
        } => {
            info!("accrual: {yearly}/year at {rate}% for {years} years");
            let mut plan = AccrualPlan::new(yearly, rate, years).with_opening_balance(opening);
            if let Some(limit) = contribution_years {
                plan = plan.contributing_for(limit);
            }
            let result = project_annual_accrual(&plan)?;
            if cli.json {
                emit(&result)?;
            } else {
                println!("Maturity value: {:.2}", result.maturity_value);
                println!("Total contributed: {:.2}", result.total_contributed);
                println!("Total interest: {:.2}\n", result.total_interest);
                print_schedule(&result.schedule, "Year");
            }
        }
        Command::Pv { payment, rate, years } => {
            info!("pv: {payment}/year at {rate}% for {years} years");
            let pv = present_value_of_annuity(payment, rate, years)?;
            if cli.json {
                emit(&serde_json::json!({ "present_value": pv }))?;
            } else {
                println!("Present value: {pv:.2}");
            }
        }
        Command::Tax { income, slabs, cess } => {
            info!("tax: income {income}");
            let table = match slabs {
                Some(path) => tax::load_slab_table(&path)
                    .with_context(|| format!("failed to load slab table from {path}"))?,
                None => TaxSlabTable::new_regime_2024(),
            };
            let slab_tax = compute_slab_tax(income, &table)?;
            let total = apply_cess(slab_tax, cess)?;
            if cli.json {
                emit(&serde_json::json!({ "slab_tax": slab_tax, "total_tax": total }))?;
            } else {
                println!("Slab tax: {slab_tax:.2}");
                println!("Tax with {cess}% cess: {total:.2}");
                println!("Marginal rate: {}%", table.marginal_rate(income));
            }
        }
        Command::Regime {
            income,
            section_80c,
            section_80d,
            hra,
            lta,
        } => {
            info!("regime comparison: income {income}");
            let deductions = Deductions {
                section_80c,
                section_80d,
                hra_exemption: hra,
                lta_exemption: lta,
            };
            let comparison = compare_regimes(income, &deductions)?;
            if cli.json {
                emit(&comparison)?;
            } else {
                println!("{:>8} {:>16} {:>14}", "Regime", "Taxable", "Tax");
                println!("{:>8} {:>16.2} {:>14.2}", "Old", comparison.old.taxable_income, comparison.old.total_tax);
                println!("{:>8} {:>16.2} {:>14.2}", "New", comparison.new.taxable_income, comparison.new.total_tax);
                println!("\nBetter: {:?} (saves {:.2})", comparison.better, comparison.savings);
            }
        }
        Command::Fire {
            current_age,
            retirement_age,
            monthly_expenses,
            savings,
            returns,
            inflation,
            withdrawal_rate,
        } => {
            info!("fire: age {current_age} -> {retirement_age}");
            let plan = fire_plan(&FireInputs {
                current_age,
                retirement_age,
                monthly_expenses,
                current_savings: savings,
                expected_return_percent: returns,
                inflation_percent: inflation,
                withdrawal_rate_percent: withdrawal_rate,
            })?;
            if cli.json {
                emit(&plan)?;
            } else {
                println!("Monthly expenses at retirement: {:.2}", plan.future_monthly_expenses);
                println!("Required corpus: {:.2}", plan.required_corpus);
                println!("Savings at retirement: {:.2}", plan.projected_savings);
                println!("Required monthly SIP: {:.2}", plan.required_monthly_sip);
            }
        }
        Command::Sweep {
            principal,
            months,
            from,
            to,
            step,
        } => {
            let rates = rate_grid(from, to, step)?;
            info!("sweep: {} rates for {principal} over {months} months", rates.len());
            let rows = emi_rate_sweep(principal, &rates, months)?;
            if cli.json {
                emit(&rows)?;
            } else {
                println!("{:>8} {:>14} {:>16} {:>16}", "Rate", "EMI", "Total Paid", "Interest");
                println!("{}", "-".repeat(57));
                for row in &rows {
                    println!(
                        "{:>7.2}% {:>14.2} {:>16.2} {:>16.2}",
                        row.annual_rate_percent, row.emi, row.total_paid, row.total_interest
                    );
                }
            }
        }
    }

    Ok(())
}
