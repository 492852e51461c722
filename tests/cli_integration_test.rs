//! CLI integration tests: config handling, report orchestration and the
//! preferences subcommand against real files on disk.

mod common;

use clap::Parser;
use common::*;
use elitekpi::adapters::file_config_adapter::FileConfigAdapter;
use elitekpi::cli::{self, Cli};
use elitekpi::domain::error::KpiError;
use elitekpi::domain::preferences::Theme;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tempfile::tempdir;

fn is_success(code: ExitCode) -> bool {
    format!("{code:?}") == format!("{:?}", ExitCode::SUCCESS)
}

fn run(args: &[&str]) -> ExitCode {
    let mut argv = vec!["elitekpi"];
    argv.extend_from_slice(args);
    cli::run(Cli::try_parse_from(argv).unwrap())
}

mod config {
    use super::*;

    #[test]
    fn missing_config_file_fails() {
        let path = PathBuf::from("/nonexistent/path/elitekpi.ini");
        assert!(cli::load_config(Some(&path)).is_err());
    }

    #[test]
    fn absent_config_is_empty() {
        assert!(cli::load_config(None).is_ok());
    }

    #[test]
    fn period_override_beats_config() {
        let config = FileConfigAdapter::from_string("[report]\nperiod = 2025-01\nuser_name = Jordan\n").unwrap();
        let port = MockRecordPort::new(sample_records());
        let summary =
            cli::build_report_summary(&config, &port, Some("2025-02"), date(2025, 3, 1)).unwrap();
        assert_eq!(summary.period.label(), "February 2025");
        assert_eq!(summary.user_name, "Jordan");
    }

    #[test]
    fn config_period_used_when_no_override() {
        let config = FileConfigAdapter::from_string("[report]\nperiod = month\n").unwrap();
        let port = MockRecordPort::new(sample_records());
        let summary = cli::build_report_summary(&config, &port, None, date(2025, 1, 20)).unwrap();
        assert_eq!(summary.period.label(), "January 2025");
        assert_eq!(summary.user_name, "Agent");
    }

    #[test]
    fn invalid_mileage_rejected_before_loading() {
        let config = FileConfigAdapter::from_string("[mileage]\nmpg = 0\n").unwrap();
        let port = MockRecordPort::failing("should not be reached");
        let err = cli::build_report_summary(&config, &port, None, date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, KpiError::ConfigInvalid { ref key, .. } if key == "mpg"));
    }

    #[test]
    fn bad_period_rejected() {
        let config = FileConfigAdapter::empty();
        let port = MockRecordPort::new(sample_records());
        let err = cli::build_report_summary(&config, &port, Some("last-week"), date(2025, 3, 1))
            .unwrap_err();
        assert!(matches!(err, KpiError::ConfigInvalid { ref key, .. } if key == "period"));
    }
}

mod commands {
    use super::*;

    #[test]
    fn metrics_over_sample_directory() {
        let dir = tempdir().unwrap();
        write_sample_data_dir(dir.path());
        let data = dir.path().to_str().unwrap();
        assert!(is_success(run(&["metrics", "--data", data])));
    }

    #[test]
    fn metrics_rejects_bad_csv() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("expenses.csv"), "category,amount\nrent,10\n").unwrap();
        let data = dir.path().to_str().unwrap();
        assert!(!is_success(run(&["metrics", "--data", data])));
    }

    #[test]
    fn report_writes_html_and_queues_email() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        write_sample_data_dir(&data);
        let outbox = dir.path().join("outbox");
        let html = dir.path().join("out/report.html");
        let ini = write_temp_ini(&format!(
            "[report]\nuser_name = Jordan Lee\n\n[email]\nfrom = reports@elitekpi.test\nto = jordan@example.com\noutbox = {}\n",
            outbox.display()
        ));

        let code = run(&[
            "report",
            "--data",
            data.to_str().unwrap(),
            "--config",
            ini.path().to_str().unwrap(),
            "--period",
            "2025-02",
            "--deliver",
            "--html",
            html.to_str().unwrap(),
        ]);
        assert!(is_success(code));

        let page = fs::read_to_string(&html).unwrap();
        assert!(page.contains("February 2025"));
        assert!(page.contains("$11,250"));
        assert_eq!(fs::read_dir(&outbox).unwrap().count(), 1);
    }

    #[test]
    fn report_delivery_fails_without_channels() {
        let dir = tempdir().unwrap();
        write_sample_data_dir(dir.path());
        let code = run(&["report", "--data", dir.path().to_str().unwrap(), "--deliver"]);
        assert!(!is_success(code));
    }

    #[test]
    fn report_without_delivery_succeeds() {
        let dir = tempdir().unwrap();
        write_sample_data_dir(dir.path());
        let code = run(&["report", "--data", dir.path().to_str().unwrap(), "--period", "all"]);
        assert!(is_success(code));
    }
}

mod prefs {
    use super::*;
    use elitekpi::adapters::ini_preferences_adapter::IniPreferencesAdapter;
    use elitekpi::ports::preferences_port::PreferencesPort;

    #[test]
    fn set_theme_persists_to_store() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("prefs.ini");
        let store_arg = store.to_str().unwrap();

        assert!(is_success(run(&["prefs", "--store", store_arg, "set-theme", "dark"])));
        assert!(is_success(run(&["prefs", "--store", store_arg, "complete-step", "welcome"])));
        assert!(is_success(run(&["prefs", "--store", store_arg, "dismiss-notice", "beta"])));

        let prefs = IniPreferencesAdapter::new(store.clone()).load().unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.tutorial_completed_steps.contains("welcome"));
        assert!(prefs.is_notice_dismissed("beta"));

        assert!(is_success(run(&["prefs", "--store", store_arg, "reset"])));
        let prefs = IniPreferencesAdapter::new(store).load().unwrap();
        assert_eq!(prefs.theme, Theme::System);
    }

    #[test]
    fn unknown_theme_fails() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("prefs.ini");
        let code = run(&["prefs", "--store", store.to_str().unwrap(), "set-theme", "neon"]);
        assert!(!is_success(code));
        assert!(!store.exists());
    }

    #[test]
    fn store_path_from_config() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("from-config.ini");
        let ini = write_temp_ini(&format!("[preferences]\npath = {}\n", store.display()));
        let code = run(&[
            "prefs",
            "--config",
            ini.path().to_str().unwrap(),
            "set-theme",
            "light",
        ]);
        assert!(is_success(code));
        assert!(store.exists());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_store_from_config() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("prefs.db");
        let ini = write_temp_ini(&format!("[sqlite]\npath = {}\nprofile = jordan\n", db.display()));
        let config_arg = ini.path().to_str().unwrap();

        assert!(is_success(run(&["prefs", "--config", config_arg, "set-theme", "dark"])));

        let config = FileConfigAdapter::from_file(ini.path()).unwrap();
        let store = cli::preferences_store(None, &config).unwrap();
        assert_eq!(store.load().unwrap().theme, Theme::Dark);
    }
}
