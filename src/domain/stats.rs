//! Trade statistics engine.
//!
//! Maps an ordered trade log plus a fixed risk amount to PnL, win rate,
//! profit factor, expectancy, streaks, drawdown and the equity curve. The
//! computation is pure: identical inputs always produce identical reports.
//!
//! Boundary conventions:
//! - a trade with `pnl == 0` counts as a loss;
//! - `profit_factor` is `0` for an empty log or a log of breakeven trades
//!   only, and `+inf` when there are gains but no losses;
//! - a trade whose PnL or running totals leave the finite range is rejected
//!   as `InvalidTrade`.

use super::error::JournalError;
use super::trade::TradeRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedReport {
    pub pnl_series: Vec<f64>,
    pub cumulative_pnl_series: Vec<f64>,
    pub drawdown_series: Vec<f64>,
    pub streak_series: Vec<i64>,
    pub total_pnl: f64,
    pub total_profit: f64,
    pub total_loss: f64,
    pub winners: usize,
    pub losers: usize,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
    pub current_streak: i64,
    pub max_consecutive_wins: i64,
    pub max_consecutive_losses: i64,
    pub max_drawdown: f64,
}

impl DerivedReport {
    pub fn total_trades(&self) -> usize {
        self.pnl_series.len()
    }
}

pub fn compute(trades: &[TradeRecord], risk_per_trade: f64) -> Result<DerivedReport, JournalError> {
    if !risk_per_trade.is_finite() || risk_per_trade <= 0.0 {
        return Err(JournalError::InvalidConfiguration {
            reason: format!("risk_per_trade must be positive, got {risk_per_trade}"),
        });
    }

    let mut pnl_series = Vec::with_capacity(trades.len());
    let mut cumulative_pnl_series = Vec::with_capacity(trades.len());
    let mut running = 0.0_f64;
    let mut total_profit = 0.0_f64;
    let mut total_loss = 0.0_f64;
    let mut winners = 0usize;
    let mut losers = 0usize;
    let mut r_sum = 0.0_f64;

    for (index, trade) in trades.iter().enumerate() {
        let pnl = trade.r_multiple * risk_per_trade;
        running += pnl;
        r_sum += trade.r_multiple;

        if pnl > 0.0 {
            winners += 1;
            total_profit += pnl;
        } else {
            losers += 1;
            total_loss += pnl;
        }

        if ![pnl, running, r_sum, total_profit, total_loss]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(JournalError::InvalidTrade {
                input: trade.r_multiple.to_string(),
                reason: format!(
                    "trade #{} overflows the PnL totals at risk {risk_per_trade}",
                    index + 1
                ),
            });
        }

        pnl_series.push(pnl);
        cumulative_pnl_series.push(running);
    }

    let total_trades = trades.len();
    let streak_series = compute_streaks(&pnl_series);
    let (max_consecutive_wins, max_consecutive_losses) = longest_runs(&streak_series);
    let drawdown_series = compute_drawdown(&cumulative_pnl_series);
    let max_drawdown = drawdown_series.iter().copied().fold(0.0_f64, f64::min);

    let win_rate = if total_trades > 0 {
        100.0 * winners as f64 / total_trades as f64
    } else {
        0.0
    };

    let profit_factor = if total_loss != 0.0 {
        total_profit / total_loss.abs()
    } else if total_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let expectancy = if total_trades > 0 {
        r_sum / total_trades as f64
    } else {
        0.0
    };

    let avg_win = if winners > 0 {
        total_profit / winners as f64
    } else {
        0.0
    };

    let avg_loss = if losers > 0 {
        total_loss / losers as f64
    } else {
        0.0
    };

    Ok(DerivedReport {
        total_pnl: running,
        current_streak: streak_series.last().copied().unwrap_or(0),
        pnl_series,
        cumulative_pnl_series,
        drawdown_series,
        streak_series,
        total_profit,
        total_loss,
        winners,
        losers,
        avg_win,
        avg_loss,
        win_rate,
        profit_factor,
        expectancy,
        max_consecutive_wins,
        max_consecutive_losses,
        max_drawdown,
    })
}

/// Signed run length per trade: positive counts consecutive wins, negative
/// counts consecutive losses. A sign change restarts the count at one.
pub fn compute_streaks(pnl_series: &[f64]) -> Vec<i64> {
    let mut current = 0i64;
    pnl_series
        .iter()
        .map(|&pnl| {
            current = if pnl > 0.0 {
                if current >= 0 { current + 1 } else { 1 }
            } else if current <= 0 {
                current - 1
            } else {
                -1
            };
            current
        })
        .collect()
}

fn longest_runs(streak_series: &[i64]) -> (i64, i64) {
    let wins = streak_series.iter().copied().filter(|&s| s > 0).max().unwrap_or(0);
    let losses = streak_series.iter().copied().filter(|&s| s < 0).min().unwrap_or(0);
    (wins, losses.abs())
}

/// Distance below the running peak of the equity curve, one value per point.
pub fn compute_drawdown(cumulative_pnl: &[f64]) -> Vec<f64> {
    let Some(&first) = cumulative_pnl.first() else {
        return Vec::new();
    };

    let mut peak = first;
    cumulative_pnl
        .iter()
        .map(|&equity| {
            peak = peak.max(equity);
            equity - peak
        })
        .collect()
}
