//! Display formatting shared by the console summary and the HTML dashboard.

use crate::domain::config::JournalConfig;
use crate::domain::stats::DerivedReport;
use crate::domain::trade::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub number: usize,
    pub r_multiple: String,
    pub comment: String,
    pub pnl: String,
    pub cumulative_pnl: String,
    pub streak: i64,
}

/// Two decimals with comma thousands separators, e.g. `-1,234.50`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_r(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}R")
    } else {
        format!("{value}R")
    }
}

/// Three rows of headline metrics: money, performance, streaks.
pub fn metric_rows(report: &DerivedReport, config: &JournalConfig) -> Vec<Vec<Metric>> {
    let net_pct = config.account_size.percent_of(report.total_pnl);
    vec![
        vec![
            Metric {
                label: "Net PnL",
                value: format!("{} ({net_pct:.2}%)", format_money(report.total_pnl)),
            },
            Metric {
                label: "Total Profit",
                value: format_money(report.total_profit),
            },
            Metric {
                label: "Total Loss",
                value: format_money(report.total_loss),
            },
            Metric {
                label: "Max Drawdown",
                value: format_money(report.max_drawdown),
            },
        ],
        vec![
            Metric {
                label: "Win Rate",
                value: format!("{:.1}%", report.win_rate),
            },
            Metric {
                label: "Profit Factor",
                value: format!("{:.2}", report.profit_factor),
            },
            Metric {
                label: "Expectancy",
                value: format!("{:.2} R", report.expectancy),
            },
        ],
        vec![
            Metric {
                label: "Current Streak",
                value: report.current_streak.to_string(),
            },
            Metric {
                label: "Max Wins",
                value: report.max_consecutive_wins.to_string(),
            },
            Metric {
                label: "Max Losses",
                value: report.max_consecutive_losses.to_string(),
            },
        ],
    ]
}

pub fn history_rows(trades: &[TradeRecord], report: &DerivedReport) -> Vec<HistoryRow> {
    trades
        .iter()
        .zip(&report.pnl_series)
        .zip(&report.cumulative_pnl_series)
        .zip(&report.streak_series)
        .enumerate()
        .map(|(i, (((trade, &pnl), &cumulative), &streak))| HistoryRow {
            number: i + 1,
            r_multiple: format_r(trade.r_multiple),
            comment: trade.comment.clone().unwrap_or_default(),
            pnl: format_money(pnl),
            cumulative_pnl: format_money(cumulative),
            streak,
        })
        .collect()
}
