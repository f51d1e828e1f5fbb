//! CLI integration tests for the journal commands.
//!
//! Tests cover:
//! - Config parsing (build_journal_config, resolve_config overrides)
//! - Record / undo / stats / history cycles against a real CSV file
//! - Export and import, including journals in the legacy `R,Comment` shape
//! - HTML report generation
//! - Error paths and their exit codes

mod common;

use common::*;
use rjournal::adapters::csv_adapter::CsvTradeStore;
use rjournal::adapters::file_config_adapter::FileConfigAdapter;
use rjournal::cli;
use rjournal::domain::error::JournalError;
use rjournal::ports::trade_store_port::TradeStorePort;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[journal]
path = journal/trades.csv

[account]
size = 100000
risk_per_trade = 250

[report]
output = out/dashboard.html
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_journal_config_valid_full() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_journal_config(&adapter).unwrap();

        assert_eq!(config.journal_path, PathBuf::from("journal/trades.csv"));
        assert_eq!(config.report_path, PathBuf::from("out/dashboard.html"));
        assert_eq!(config.account_size.value(), 100_000.0);
        assert!(config.account_size.is_preset());
        assert!((config.risk_per_trade - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_journal_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[account]\n").unwrap();
        let config = cli::build_journal_config(&adapter).unwrap();

        assert_eq!(config.journal_path, PathBuf::from("trades.csv"));
        assert_eq!(config.report_path, PathBuf::from("report.html"));
        assert_eq!(config.account_size.value(), 50_000.0);
        assert!((config.risk_per_trade - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_journal_config_custom_account_size() {
        let adapter = FileConfigAdapter::from_string("[account]\nsize = 25000\n").unwrap();
        let config = cli::build_journal_config(&adapter).unwrap();
        assert!(!config.account_size.is_preset());
    }

    #[test]
    fn build_journal_config_rejects_zero_risk() {
        let adapter = FileConfigAdapter::from_string("[account]\nrisk_per_trade = 0\n").unwrap();
        let err = cli::build_journal_config(&adapter).unwrap_err();
        assert!(
            matches!(err, JournalError::ConfigInvalid { key, .. } if key == "risk_per_trade")
        );
    }

    #[test]
    fn build_journal_config_rejects_tiny_account() {
        let adapter = FileConfigAdapter::from_string("[account]\nsize = 10\n").unwrap();
        let err = cli::build_journal_config(&adapter).unwrap_err();
        assert!(matches!(err, JournalError::ConfigInvalid { key, .. } if key == "size"));
    }

    #[test]
    fn resolve_config_from_file() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::resolve_config(Some(file.path()), None, None).unwrap();
        assert!((config.risk_per_trade - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn resolve_config_overrides_win() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::resolve_config(
            Some(file.path()),
            Some(PathBuf::from("elsewhere.csv")),
            Some(42.0),
        )
        .unwrap();

        assert_eq!(config.journal_path, PathBuf::from("elsewhere.csv"));
        assert!((config.risk_per_trade - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn resolve_config_rejects_bad_risk_override() {
        let err = cli::resolve_config(None, None, Some(-5.0)).unwrap_err();
        assert!(matches!(err, JournalError::ConfigInvalid { .. }));
    }

    #[test]
    fn resolve_config_rejects_blank_journal_override() {
        let err = cli::resolve_config(None, Some(PathBuf::from("  ")), None).unwrap_err();
        assert!(matches!(
            err,
            JournalError::ConfigInvalid { section, key, .. } if section == "journal" && key == "path"
        ));
    }

    #[test]
    fn blank_journal_flag_fails_before_touching_disk() {
        let err = run_cli(&["--journal", "   ", "stats"]).unwrap_err();
        assert!(matches!(err, JournalError::ConfigInvalid { .. }));
    }

    #[test]
    fn resolve_config_missing_file_is_parse_error() {
        let path = PathBuf::from("/nonexistent/path/rjournal.ini");
        let err = cli::resolve_config(Some(path.as_path()), None, None).unwrap_err();
        assert!(matches!(err, JournalError::ConfigParse { .. }));
    }
}

mod journal_cycle {
    use super::*;

    #[test]
    fn record_appends_and_prints_summary() {
        let journal = TempJournal::new();
        let out = run_cli(&["--journal", &journal.journal_arg(), "record", "+1R"]).unwrap();

        assert!(out.contains("Recorded +1R as trade #1"));
        assert!(out.contains("Net PnL:"));
        assert!(out.contains("100.00"));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn record_accepts_negative_outcome_and_comment() {
        let journal = TempJournal::new();
        run_cli(&[
            "--journal",
            &journal.journal_arg(),
            "record",
            "-1R",
            "--comment",
            "stopped at the low",
        ])
        .unwrap();

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored[0].r_multiple, -1.0);
        assert_eq!(stored[0].comment.as_deref(), Some("stopped at the low"));
    }

    #[test]
    fn full_session_matches_expected_statistics() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        for outcome in ["1", "1", "-1", "2"] {
            run_cli(&["--journal", &j, "record", outcome]).unwrap();
        }

        let out = run_cli(&["--journal", &j, "stats"]).unwrap();
        assert!(out.contains("=== 4 trades"));
        assert!(out.contains("Win Rate:       75.0%"));
        assert!(out.contains("Profit Factor:  4.00"));
        assert!(out.contains("Max Drawdown:   -100.00"));
        assert!(out.contains("Current Streak: 1"));
        assert!(out.contains("Max Wins:       2"));
    }

    #[test]
    fn risk_override_scales_pnl() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "2R"]).unwrap();

        let out = run_cli(&["--journal", &j, "--risk", "1500", "stats"]).unwrap();
        assert!(out.contains("3,000.00"));
    }

    #[test]
    fn invalid_outcome_leaves_journal_untouched() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1"]).unwrap();

        let err = run_cli(&["--journal", &j, "record", "big"]).unwrap_err();
        assert!(matches!(err, JournalError::InvalidTrade { .. }));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn overflowing_outcome_is_not_saved() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "-1R"]).unwrap();

        let err = run_cli(&["--journal", &j, "record", "1e307R"]).unwrap_err();
        assert!(matches!(err, JournalError::InvalidTrade { .. }));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn undo_removes_last_trade() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1"]).unwrap();
        run_cli(&["--journal", &j, "record", "-1"]).unwrap();

        let out = run_cli(&["--journal", &j, "undo"]).unwrap();
        assert!(out.contains("Last trade entry removed (-1R). 1 trades remain."));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored, trades(&[1.0]));
    }

    #[test]
    fn undo_on_empty_journal_is_not_an_error() {
        let journal = TempJournal::new();
        let out = run_cli(&["--journal", &journal.journal_arg(), "undo"]).unwrap();
        assert!(out.contains("No trades to undo."));
        assert!(!journal.config.journal_path.exists());
    }

    #[test]
    fn stats_on_empty_journal() {
        let journal = TempJournal::new();
        let out = run_cli(&["--journal", &journal.journal_arg(), "stats"]).unwrap();
        assert!(out.contains("No trades recorded yet."));
    }

    #[test]
    fn history_lists_each_trade() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "0.5", "-m", "scaled"]).unwrap();
        run_cli(&["--journal", &j, "record", "-1"]).unwrap();

        let out = run_cli(&["--journal", &j, "history"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("+0.5R"));
        assert!(lines[1].ends_with("scaled"));
        assert!(lines[2].contains("-50.00"));
    }

    #[test]
    fn presets_need_no_config() {
        let out = run_cli(&["--config", "/nonexistent/rjournal.ini", "presets"]).unwrap();
        assert!(out.contains("+0.5R"));
        assert!(out.contains("-1R"));
        assert_eq!(out.lines().count(), 4);
    }
}

mod export_import {
    use super::*;

    #[test]
    fn export_writes_copy() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1", "-m", "first"]).unwrap();
        run_cli(&["--journal", &j, "record", "-1"]).unwrap();

        let target = journal.path("backup/export.csv");
        let out = run_cli(&[
            "--journal",
            &j,
            "export",
            "--output",
            target.to_str().unwrap(),
        ])
        .unwrap();
        assert!(out.contains("Trades saved to"));

        let exported = CsvTradeStore::new(target).load().unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].comment.as_deref(), Some("first"));
    }

    #[test]
    fn export_with_derived_columns() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "2"]).unwrap();

        let target = journal.path("derived.csv");
        run_cli(&[
            "--journal",
            &j,
            "export",
            "--output",
            target.to_str().unwrap(),
            "--with-derived",
        ])
        .unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("r_multiple,comment,pnl,cumulative_pnl,streak\n"));
        assert!(content.contains("2.0,,200.0,200.0,1"));
    }

    #[test]
    fn export_empty_journal_writes_nothing() {
        let journal = TempJournal::new();
        let target = journal.path("export.csv");
        let out = run_cli(&[
            "--journal",
            &journal.journal_arg(),
            "export",
            "--output",
            target.to_str().unwrap(),
        ])
        .unwrap();

        assert!(out.contains("No trades to export."));
        assert!(!target.exists());
    }

    #[test]
    fn import_replaces_journal_wholesale() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1"]).unwrap();

        let source = journal.path("old_dashboard.csv");
        fs::write(&source, "R,Comment\n1,\n1,\n-1,faded\n2,\n").unwrap();

        let out = run_cli(&["--journal", &j, "import", "--input", source.to_str().unwrap()])
            .unwrap();
        assert!(out.contains("Trades loaded: 4 (replaced 1)"));
        assert!(out.contains("Profit Factor:  4.00"));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[2].comment.as_deref(), Some("faded"));
    }

    #[test]
    fn import_missing_file_fails() {
        let journal = TempJournal::new();
        let missing = journal.path("missing.csv");
        let err = run_cli(&[
            "--journal",
            &journal.journal_arg(),
            "import",
            "--input",
            missing.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, JournalError::TradeFile { .. }));
    }

    #[test]
    fn import_malformed_file_keeps_current_journal() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1"]).unwrap();

        let source = journal.path("bad.csv");
        fs::write(&source, "R,Comment\nwin,\n").unwrap();

        let err = run_cli(&["--journal", &j, "import", "--input", source.to_str().unwrap()])
            .unwrap_err();
        assert!(matches!(err, JournalError::TradeFile { .. }));

        let stored = CsvTradeStore::new(journal.config.journal_path.clone())
            .load()
            .unwrap();
        assert_eq!(stored, trades(&[1.0]));
    }

    #[test]
    fn import_overwrites_unreadable_journal() {
        let journal = TempJournal::new();
        fs::write(&journal.config.journal_path, "r_multiple\nnot-a-number\n").unwrap();

        let source = journal.path("good.csv");
        fs::write(&source, "r_multiple,comment\n-1,\n").unwrap();

        let out = run_cli(&[
            "--journal",
            &journal.journal_arg(),
            "import",
            "--input",
            source.to_str().unwrap(),
        ])
        .unwrap();
        assert!(out.contains("Trades loaded: 1 (replaced 0)"));
    }
}

mod report {
    use super::*;

    #[test]
    fn report_uses_configured_output() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "1"]).unwrap();

        let mut out = Vec::new();
        cli::run_report(&journal.config, None, &mut out).unwrap();

        let html = fs::read_to_string(&journal.config.report_path).unwrap();
        assert!(html.contains("Equity Curve"));
        assert!(String::from_utf8(out).unwrap().contains("Report written to"));
    }

    #[test]
    fn report_output_flag_wins() {
        let journal = TempJournal::new();
        let j = journal.journal_arg();
        run_cli(&["--journal", &j, "record", "-1"]).unwrap();

        let target = journal.path("dash/index.html");
        run_cli(&["--journal", &j, "report", "-o", target.to_str().unwrap()]).unwrap();

        assert!(target.exists());
        assert!(!journal.config.report_path.exists());
    }

    #[test]
    fn report_for_empty_journal() {
        let journal = TempJournal::new();
        let target = journal.path("empty.html");
        run_cli(&[
            "--journal",
            &journal.journal_arg(),
            "report",
            "-o",
            target.to_str().unwrap(),
        ])
        .unwrap();

        let html = fs::read_to_string(&target).unwrap();
        assert!(html.contains("No trades recorded yet."));
    }
}

mod exit_codes {
    use super::*;

    fn code(err: &JournalError) -> String {
        format!("{:?}", ExitCode::from(err))
    }

    #[test]
    fn error_kinds_map_to_distinct_codes() {
        let config = JournalError::ConfigInvalid {
            section: "account".into(),
            key: "size".into(),
            reason: "bad".into(),
        };
        let file = JournalError::TradeFile {
            path: "x.csv".into(),
            reason: "bad".into(),
        };
        let trade = JournalError::InvalidTrade {
            input: "x".into(),
            reason: "bad".into(),
        };
        let report = JournalError::Report {
            reason: "bad".into(),
        };

        assert_eq!(code(&config), format!("{:?}", ExitCode::from(2)));
        assert_eq!(code(&file), format!("{:?}", ExitCode::from(3)));
        assert_eq!(code(&trade), format!("{:?}", ExitCode::from(4)));
        assert_eq!(code(&report), format!("{:?}", ExitCode::from(5)));
    }

    #[test]
    fn run_reports_failure_exit_code() {
        use clap::Parser;

        let journal = TempJournal::new();
        let j = journal.journal_arg();
        let cli = cli::Cli::parse_from(["rjournal", "--journal", j.as_str(), "record", "nope"]);
        let exit = cli::run(cli);
        assert_eq!(format!("{exit:?}"), format!("{:?}", ExitCode::from(4)));
    }
}
