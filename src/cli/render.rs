use crate::commands::DashboardStats;
use crate::models::Trade;
use crate::stats::{AdvancedMetrics, EquityPoint, PeriodSummary};

pub fn print_trades(trades: &[Trade]) {
    println!(
        "{:<36}  {:<10}  {:<8}  {:<4}  {:<5}  {:>6}  {:<6}",
        "ID", "Date", "Pair", "Type", "Ratio", "Points", "P/L"
    );
    for t in trades {
        println!(
            "{:<36}  {:<10}  {:<8}  {:<4}  {:<5}  {:>6}  {:<6}",
            t.id,
            t.date.to_string(),
            t.pair_or_dash(),
            t.trade_type.as_str(),
            t.ratio.as_str(),
            t.points,
            t.outcome.as_str()
        );
    }
}

pub fn print_summaries(rows: &[PeriodSummary], by_pair: bool) {
    if by_pair {
        println!(
            "{:<16}  {:<8}  {:>6}  {:>4}  {:>4}  {:>6}  {:>8}",
            "Period", "Pair", "Trades", "TP", "SL", "Points", "Win Rate"
        );
    } else {
        println!(
            "{:<16}  {:>6}  {:>4}  {:>4}  {:>6}  {:>8}",
            "Period", "Trades", "TP", "SL", "Points", "Win Rate"
        );
    }

    for row in rows {
        let period = row.period.to_string();
        if by_pair {
            println!(
                "{:<16}  {:<8}  {:>6}  {:>4}  {:>4}  {:>6}  {:>8}",
                period,
                row.pair.as_deref().unwrap_or("-"),
                row.total_trades,
                row.tp,
                row.sl,
                row.total_points,
                row.win_rate_display
            );
        } else {
            println!(
                "{:<16}  {:>6}  {:>4}  {:>4}  {:>6}  {:>8}",
                period, row.total_trades, row.tp, row.sl, row.total_points, row.win_rate_display
            );
        }
    }
}

pub fn print_advanced(advanced: &AdvancedMetrics) {
    println!("Maximum Consecutive Losses: {}", advanced.consecutive_losses);
    println!("Maximum Drawdown: {} points", advanced.max_drawdown);
    println!("Total Win Rate: {}", advanced.total_win_rate);
}

pub fn print_dashboard(stats: &DashboardStats) {
    println!("Trades: {} ({} won, {} lost)", stats.total_trades, stats.wins, stats.losses);
    println!("Total Points: {}", stats.total_points);
    print_advanced(&stats.advanced);
}

pub fn print_equity(curve: &[EquityPoint]) {
    if curve.is_empty() {
        println!("No trades recorded yet.");
        return;
    }
    println!("{:<10}  {:>6}  {:>6}  {:>10}", "Date", "Trades", "Points", "Cumulative");
    for point in curve {
        println!(
            "{:<10}  {:>6}  {:>6}  {:>10}",
            point.date.to_string(),
            point.trade_count,
            point.daily_points,
            point.cumulative_points
        );
    }
}
