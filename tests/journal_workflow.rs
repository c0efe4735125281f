use std::fs;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use trade_journal_lib::commands;
use trade_journal_lib::db::LoadOutcome;
use trade_journal_lib::models::{Outcome, RiskReward, Settings, TradeInput, TradeType};
use trade_journal_lib::stats::{self, Period, PeriodKey};
use trade_journal_lib::{AppState, JournalError, SymbolAdded};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn settings_in(dir: &tempfile::TempDir) -> Settings {
    Settings {
        data_file: dir.path().join("trade_data.json"),
        export_dir: dir.path().to_path_buf(),
        ..Settings::default()
    }
}

fn trade(d: NaiveDate, pair: &str, trade_type: TradeType, ratio: RiskReward) -> TradeInput {
    TradeInput {
        date: d,
        pair: Some(pair.to_string()),
        trade_type,
        ratio,
    }
}

/// Two months of trades across two pairs
fn seeded_state(dir: &tempfile::TempDir) -> AppState {
    let (mut state, outcome) = AppState::open(settings_in(dir));
    assert_eq!(outcome, LoadOutcome::Fresh);

    commands::add_trading_pair(&mut state, "gbpusd").unwrap();
    let inputs = [
        trade(date(2024, 2, 12), "EURUSD", TradeType::TakeProfit, RiskReward::OneToTwo),
        trade(date(2024, 1, 8), "EURUSD", TradeType::StopLoss, RiskReward::OneToOne),
        trade(date(2024, 1, 9), "GBPUSD", TradeType::StopLoss, RiskReward::OneToTwo),
        trade(date(2024, 1, 10), "EURUSD", TradeType::TakeProfit, RiskReward::OneToOne),
        trade(date(2024, 2, 13), "GBPUSD", TradeType::StopLoss, RiskReward::OneToOne),
    ];
    for input in inputs {
        commands::create_trade(&mut state, input).unwrap();
    }
    state
}

#[test]
fn history_stays_sorted_and_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = seeded_state(&dir);

    let dates: Vec<NaiveDate> = state.journal.trades().iter().map(|t| t.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    // Move the earliest trade to the end of the range
    let first_id = state.journal.trades()[0].id.clone();
    commands::update_trade(
        &mut state,
        &first_id,
        trade(date(2024, 3, 1), "GBPUSD", TradeType::TakeProfit, RiskReward::OneToTwo),
    )
    .unwrap();
    assert_eq!(state.journal.trades().last().unwrap().id, first_id);

    let (reloaded, outcome) = AppState::open(settings_in(&dir));
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(reloaded.journal, state.journal);
    let moved = reloaded.journal.get(&first_id).unwrap();
    assert_eq!(moved.points, 2);
    assert_eq!(moved.outcome, Outcome::Profit);
}

#[test]
fn duplicate_pair_is_a_warning_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = seeded_state(&dir);
    let before = state.journal.pairs().to_vec();

    let result = commands::add_trading_pair(&mut state, " GbpUsd ").unwrap();
    assert_eq!(result, SymbolAdded::AlreadyPresent("GBPUSD".to_string()));
    assert_eq!(state.journal.pairs(), before.as_slice());
}

#[test]
fn trades_for_unknown_pairs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = seeded_state(&dir);
    let result = commands::create_trade(
        &mut state,
        trade(date(2024, 4, 1), "AUDCAD", TradeType::TakeProfit, RiskReward::OneToOne),
    );
    assert!(matches!(result, Err(JournalError::UnknownPair(_))));
    assert_eq!(state.journal.len(), 5);
}

#[test]
fn reports_over_seeded_history() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir);

    let monthly = commands::get_period_report(&state, Period::Monthly, false);
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].period, PeriodKey::Month { year: 2024, month: 1 });
    assert_eq!(monthly[0].total_trades, 3);
    assert_eq!(monthly[0].total_points, -1);
    assert_eq!(monthly[0].win_rate_display, "33.33%");
    assert_eq!(monthly[1].total_points, 1);

    let by_pair = commands::get_period_report(&state, Period::Yearly, true);
    assert_eq!(by_pair.len(), 2);
    assert_eq!(by_pair[0].pair.as_deref(), Some("EURUSD"));
    assert_eq!(by_pair[0].total_points, 2);
    assert_eq!(by_pair[1].pair.as_deref(), Some("GBPUSD"));
    assert_eq!(by_pair[1].total_points, -2);

    // Date order: SL, SL, TP(1), TP(2), SL -> points [-1,-1,1,2,-1]
    let dashboard = commands::get_dashboard_stats(&state);
    assert_eq!(dashboard.total_trades, 5);
    assert_eq!(dashboard.wins, 2);
    assert_eq!(dashboard.total_points, 0);
    assert_eq!(dashboard.win_rate, "40.00%");
    assert_eq!(dashboard.advanced.consecutive_losses, 2);
    // cumulative [-1,-2,-1,1,0] against running peak [-1,-1,-1,1,1]
    assert_eq!(dashboard.advanced.max_drawdown, 1);

    let analysis = commands::get_analysis(&state).unwrap();
    assert_eq!(analysis.monthly.len(), 4);
    assert_eq!(analysis.advanced, dashboard.advanced);

    let curve = commands::get_equity_curve(&state);
    assert_eq!(curve.len(), 5);
    assert_eq!(curve.last().unwrap().cumulative_points, 0);
}

#[test]
fn workbook_has_month_sheets_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let state = seeded_state(&dir);

    let path = commands::export_workbook(&state, None, date(2026, 10, 19))
        .unwrap()
        .unwrap();
    assert!(path.ends_with("trade_history_2026-10-19.xlsx"));

    let bytes = fs::read(&path).unwrap();
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["January_2024", "February_2024", "Summary"]
    );

    let january = workbook.worksheet_range("January_2024").unwrap();
    assert_eq!(january.get_size().0, 4); // header + 3 trades
    assert_eq!(january.get((0, 6)), Some(&Data::String("P/L".to_string())));
    assert_eq!(january.get((1, 1)), Some(&Data::String("2024-01-08".to_string())));
    assert_eq!(january.get((1, 5)), Some(&Data::Float(-1.0)));

    let summary = workbook.worksheet_range("Summary").unwrap();
    // header + (Jan EURUSD, Jan GBPUSD, Feb EURUSD, Feb GBPUSD)
    assert_eq!(summary.get_size().0, 5);
    assert_eq!(summary.get((1, 1)), Some(&Data::String("January".to_string())));
    assert_eq!(summary.get((1, 2)), Some(&Data::String("EURUSD".to_string())));
    assert_eq!(summary.get((1, 3)), Some(&Data::Float(2.0)));
    assert_eq!(summary.get((1, 6)), Some(&Data::Float(0.0)));
}

#[test]
fn clearing_keeps_a_backup_and_resets_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = seeded_state(&dir);

    let backup = commands::delete_all_trades(&mut state).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(saved["trade_history"].as_array().unwrap().len(), 5);

    let (reloaded, _) = AppState::open(settings_in(&dir));
    assert!(reloaded.journal.is_empty());
    assert_eq!(reloaded.journal.pairs(), &["USDJPY", "EURUSD"]);
    assert!(stats::analyze(reloaded.journal.trades()).is_none());
}

#[test]
fn corrupt_file_falls_back_to_empty_journal() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir);
    fs::write(&settings.data_file, "{\"trade_history\": [{\"ID\": 1}]}").unwrap();

    let (state, outcome) = AppState::open(settings);
    assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
    assert!(state.journal.is_empty());
    assert_eq!(state.journal.pairs(), &["USDJPY", "EURUSD"]);
}

#[test]
fn history_behind_one_bad_row_is_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = seeded_state(&dir).settings.data_file;

    let mut doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&data_file).unwrap()).unwrap();
    doc["trade_history"][2]["Type"] = serde_json::json!("BE");
    let original = serde_json::to_string(&doc).unwrap();
    fs::write(&data_file, &original).unwrap();

    let (mut recovered, outcome) = AppState::open(settings_in(&dir));
    let LoadOutcome::Recovered { backup: Some(backup), .. } = outcome else {
        panic!("expected a recovered load with a backup, got {:?}", outcome);
    };
    commands::create_trade(
        &mut recovered,
        trade(date(2024, 4, 1), "EURUSD", TradeType::TakeProfit, RiskReward::OneToOne),
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
    let kept: serde_json::Value = serde_json::from_str(&original).unwrap();
    assert_eq!(kept["trade_history"].as_array().unwrap().len(), 5);

    // The kept copy imports cleanly once the bad row is fixed
    let mut fixed = kept;
    fixed["trade_history"][2]["Type"] = serde_json::json!("TP");
    let summary = commands::import_all_data(&mut recovered, &fixed.to_string()).unwrap();
    assert_eq!(summary.added, 5);
    assert_eq!(recovered.journal.len(), 6);
}
