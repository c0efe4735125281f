//! Command-line front end. Each subcommand is one user action: load the
//! journal, apply the action, persist, print the result.

mod render;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use crate::app::AppState;
use crate::commands;
use crate::db::LoadOutcome;
use crate::journal::SymbolAdded;
use crate::models::{parse_date, Outcome, RiskReward, Settings, TradeFilters, TradeInput, TradeType, UpdateSettingsInput};
use crate::stats::Period;

#[derive(Parser, Debug)]
#[command(name = "trade-journal", author, version, about = "Log TP/SL trades and review your performance", long_about = None)]
pub struct Cli {
    /// Journal data file
    #[arg(long, env = "TRADE_JOURNAL_DATA", global = true)]
    pub data_file: Option<PathBuf>,

    /// Pairs a new or cleared journal starts with (repeat or comma separate)
    #[arg(long = "default-pair", env = "TRADE_JOURNAL_DEFAULT_PAIRS", value_delimiter = ',', global = true)]
    pub default_pairs: Option<Vec<String>>,

    /// Directory exports are written to when no --output is given
    #[arg(long, env = "TRADE_JOURNAL_EXPORT_DIR", global = true)]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Record a new trade
    Add {
        /// Trading date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long)]
        pair: Option<String>,
        /// TP or SL
        #[arg(long = "type")]
        trade_type: TradeType,
        /// 1:1 or 1:2
        #[arg(long)]
        ratio: RiskReward,
    },
    /// Replace a trade's fields; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long)]
        pair: Option<String>,
        #[arg(long = "type")]
        trade_type: Option<TradeType>,
        #[arg(long)]
        ratio: Option<RiskReward>,
    },
    /// Delete a trade
    Delete { id: String },
    /// Delete all trades and reset the pair list
    Clear {
        /// Required, there is no undo (a backup copy is kept)
        #[arg(long)]
        yes: bool,
    },
    /// Add a trading pair (e.g. GBPUSD)
    AddPair { name: String },
    /// List known trading pairs
    Pairs,
    /// Show the trade history
    List {
        #[arg(long)]
        pair: Option<String>,
        #[arg(long = "type")]
        trade_type: Option<TradeType>,
        #[arg(long)]
        outcome: Option<Outcome>,
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Show one trade
    Show { id: String },
    /// Performance analysis
    Report {
        #[arg(value_enum, default_value_t = ReportKind::Summary)]
        kind: ReportKind,
        /// Do not split periods by pair
        #[arg(long)]
        no_pair: bool,
        #[arg(long)]
        json: bool,
    },
    /// Export the history as a workbook (one sheet per month plus Summary)
    Export {
        /// Write a flat CSV instead
        #[arg(long)]
        csv: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dump the journal as JSON (stdout unless --output)
    Backup {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge a journal JSON file into this one
    Import { file: PathBuf },
    /// Print the effective settings
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Summary,
    Monthly,
    Weekly,
    Yearly,
    Advanced,
    Equity,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings::default().with_overrides(UpdateSettingsInput {
            data_file: self.data_file.clone(),
            default_pairs: self.default_pairs.clone(),
            export_dir: self.export_dir.clone(),
        })
    }
}

pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let (mut state, outcome) = AppState::open(cli.settings());
    if let LoadOutcome::Recovered { reason, backup } = &outcome {
        eprintln!("Error loading data: {}. Starting with an empty journal.", reason);
        if let Some(path) = backup {
            eprintln!("The unreadable file was copied to {}", path.display());
        }
    }

    match cli.command {
        Command::Add {
            date,
            pair,
            trade_type,
            ratio,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let trade = commands::create_trade(
                &mut state,
                TradeInput {
                    date,
                    pair,
                    trade_type,
                    ratio,
                },
            )?;
            println!(
                "Added {} trade with {} ratio for {} on {}",
                trade.trade_type,
                trade.ratio,
                trade.pair_or_dash(),
                trade.date
            );
            println!("{}", trade.id);
        }
        Command::Edit {
            id,
            date,
            pair,
            trade_type,
            ratio,
        } => {
            let current = commands::get_trade(&state, &id)?;
            let input = TradeInput {
                date: date.unwrap_or(current.date),
                pair: pair.or(current.pair),
                trade_type: trade_type.unwrap_or(current.trade_type),
                ratio: ratio.unwrap_or(current.ratio),
            };
            let trade = commands::update_trade(&mut state, &id, input)?;
            println!("Updated {}", trade.label());
        }
        Command::Delete { id } => {
            let label = commands::get_trade(&state, &id)?.label();
            commands::delete_trade(&mut state, &id)?;
            println!("Deleted {}", label);
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to clear {} without --yes", state.store.path().display());
            }
            let backup = commands::delete_all_trades(&mut state)?;
            println!("All data cleared.");
            if let Some(path) = backup {
                println!("Previous journal saved to {}", path.display());
            }
        }
        Command::AddPair { name } => match commands::add_trading_pair(&mut state, &name)? {
            SymbolAdded::Added(pair) => println!("Added new trading pair: {}", pair),
            SymbolAdded::AlreadyPresent(pair) => eprintln!("Warning: pair {} already exists.", pair),
        },
        Command::Pairs => {
            for pair in commands::get_trading_pairs(&state) {
                println!("{}", pair);
            }
        }
        Command::List {
            pair,
            trade_type,
            outcome,
            from,
            to,
            limit,
            json,
        } => {
            let trades = commands::get_trades(
                &state,
                Some(TradeFilters {
                    pair,
                    trade_type,
                    outcome,
                    start_date: from,
                    end_date: to,
                    limit,
                }),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&trades)?);
            } else if trades.is_empty() {
                println!("No trades recorded yet.");
            } else {
                render::print_trades(&trades);
            }
        }
        Command::Show { id } => {
            let trade = commands::get_trade(&state, &id)?;
            render::print_trades(std::slice::from_ref(&trade));
        }
        Command::Report { kind, no_pair, json } => report(&state, kind, !no_pair, json)?,
        Command::Export { csv, output } => {
            let today = Local::now().date_naive();
            let written = if csv {
                commands::export_csv(&state, output.as_deref(), today)?
            } else {
                commands::export_workbook(&state, output.as_deref(), today)?
            };
            match written {
                Some(path) => println!("Exported to {}", path.display()),
                None => println!("No trades recorded yet, nothing to export."),
            }
        }
        Command::Backup { output } => {
            let json = commands::export_all_data(&state)?;
            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    println!("Journal written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Import { file } => {
            let json = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let summary = commands::import_all_data(&mut state, &json)?;
            println!(
                "Imported {} new and {} replaced trade(s), {} new pair(s)",
                summary.added, summary.replaced, summary.pairs_added
            );
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&commands::get_settings(&state))?);
        }
    }

    Ok(())
}

fn report(state: &AppState, kind: ReportKind, by_pair: bool, json: bool) -> anyhow::Result<()> {
    let period = match kind {
        ReportKind::Summary => {
            let dashboard = commands::get_dashboard_stats(state);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                render::print_dashboard(&dashboard);
            }
            return Ok(());
        }
        ReportKind::Advanced => {
            let advanced = commands::get_dashboard_stats(state).advanced;
            if json {
                println!("{}", serde_json::to_string_pretty(&advanced)?);
            } else {
                render::print_advanced(&advanced);
            }
            return Ok(());
        }
        ReportKind::Equity => {
            let curve = commands::get_equity_curve(state);
            if json {
                println!("{}", serde_json::to_string_pretty(&curve)?);
            } else {
                render::print_equity(&curve);
            }
            return Ok(());
        }
        ReportKind::Monthly => Period::Monthly,
        ReportKind::Weekly => Period::Weekly,
        ReportKind::Yearly => Period::Yearly,
    };

    let rows = commands::get_period_report(state, period, by_pair);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No trades recorded yet.");
    } else {
        render::print_summaries(&rows, by_pair);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "trade-journal",
            "--data-file",
            "/tmp/j.json",
            "add",
            "--date",
            "2024-01-05",
            "--pair",
            "eurusd",
            "--type",
            "tp",
            "--ratio",
            "1:2",
        ])
        .unwrap();

        assert_eq!(cli.settings().data_file, PathBuf::from("/tmp/j.json"));
        match cli.command {
            Command::Add {
                date,
                pair,
                trade_type,
                ratio,
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5));
                assert_eq!(pair.as_deref(), Some("eurusd"));
                assert_eq!(trade_type, TradeType::TakeProfit);
                assert_eq!(ratio, RiskReward::OneToTwo);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_ratio() {
        let result = Cli::try_parse_from(["trade-journal", "add", "--type", "TP", "--ratio", "1:3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_pairs_are_comma_separated() {
        let cli = Cli::try_parse_from(["trade-journal", "--default-pair", "gbpusd,xauusd", "pairs"]).unwrap();
        assert_eq!(cli.settings().default_pairs, vec!["GBPUSD", "XAUUSD"]);
    }

    #[test]
    fn test_report_defaults_to_summary() {
        let cli = Cli::try_parse_from(["trade-journal", "report"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Report {
                kind: ReportKind::Summary,
                no_pair: false,
                json: false
            }
        ));
    }
}
