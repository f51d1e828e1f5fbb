//! HTML report adapter implementing ReportPort.
//!
//! Generates a single self-contained dashboard page using Askama templates
//! with inline SVG charts.

use std::fs;
use std::path::Path;

use askama::Template;
use tracing::info;

use crate::adapters::chart_svg;
use crate::adapters::summary::{self, format_money, HistoryRow, Metric};
use crate::domain::error::JournalError;
use crate::ports::report_port::{ReportContext, ReportPort};

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    account_size: String,
    account_kind: &'static str,
    risk_per_trade: String,
    trade_count: usize,
    metric_rows: Vec<Vec<Metric>>,
    history: Vec<HistoryRow>,
    equity_svg: String,
    drawdown_svg: String,
}

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, ctx: &ReportContext) -> Result<String, JournalError> {
        let report = ctx.report;
        let template = ReportTemplate {
            account_size: format_money(ctx.config.account_size.value()),
            account_kind: if ctx.config.account_size.is_preset() {
                "preset"
            } else {
                "custom"
            },
            risk_per_trade: format_money(ctx.config.risk_per_trade),
            trade_count: report.total_trades(),
            metric_rows: summary::metric_rows(report, ctx.config),
            history: summary::history_rows(ctx.trades, report),
            equity_svg: chart_svg::generate_equity_svg(
                &report.cumulative_pnl_series,
                report.total_pnl >= 0.0,
            ),
            drawdown_svg: chart_svg::generate_drawdown_svg(&report.drawdown_series),
        };

        template.render().map_err(|e| JournalError::Report {
            reason: e.to_string(),
        })
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), JournalError> {
        let html = self.render(ctx)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, html)?;

        info!(path = %output_path.display(), "report written");
        Ok(())
    }
}
