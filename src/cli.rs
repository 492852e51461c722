//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::adapters::ini_preferences_adapter::IniPreferencesAdapter;
use crate::adapters::outbox_email_adapter::OutboxEmailAdapter;
use crate::adapters::sms_log_adapter::SmsLogAdapter;
use crate::domain::config_validation::{mileage_rates, validate_report_config};
use crate::domain::error::KpiError;
use crate::domain::format::{format_currency, format_percentage};
use crate::domain::metrics::DashboardMetrics;
use crate::domain::period::ReportPeriod;
use crate::domain::preferences::{Preferences, Theme};
use crate::domain::report::ReportSummary;
use crate::ports::config_port::ConfigPort;
use crate::ports::delivery_port::{DeliveryPort, Message, deliver_with_fallback};
use crate::ports::preferences_port::PreferencesPort;
use crate::ports::record_port::RecordPort;

/// Onboarding steps the tutorial walks through, in order.
pub const TUTORIAL_STEPS: &[&str] = &[
    "welcome",
    "add_property",
    "log_commission",
    "track_expense",
    "view_dashboard",
];

#[derive(Parser, Debug)]
#[command(name = "elitekpi", about = "Financial KPI engine for real-estate agents")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print dashboard metrics for a data directory
    Metrics {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Build a period report and optionally deliver it
    Report {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// all, month, or YYYY-MM
        #[arg(short, long)]
        period: Option<String>,
        #[arg(long)]
        deliver: bool,
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Inspect or change stored preferences
    Prefs {
        #[arg(short, long)]
        store: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    Show,
    SetTheme { theme: String },
    CompleteStep { step: String },
    DismissNotice { notice: String },
    Reset,
}

pub fn run(cli: Cli) -> ExitCode {
    let today = Local::now().date_naive();
    match cli.command {
        Command::Metrics { data, config } => run_metrics(&data, config.as_ref(), today),
        Command::Report {
            data,
            config,
            period,
            deliver,
            html,
        } => run_report(
            &data,
            config.as_ref(),
            period.as_deref(),
            deliver,
            html.as_ref(),
            today,
        ),
        Command::Prefs {
            store,
            config,
            action,
        } => run_prefs(store.as_ref(), config.as_ref(), &action),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    debug!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path).map_err(|e| {
        error!("{e}");
        ExitCode::from(&e)
    })
}

fn fail(e: KpiError) -> ExitCode {
    error!("{e}");
    eprintln!("error: {e}");
    (&e).into()
}

fn run_metrics(data: &Path, config_path: Option<&PathBuf>, today: NaiveDate) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_report_config(&config, today) {
        return fail(e);
    }

    let records = match CsvAdapter::new(data.to_path_buf()).load_all() {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    let metrics = DashboardMetrics::compute(&records, &mileage_rates(&config));
    print!("{}", format_dashboard(&metrics));
    ExitCode::SUCCESS
}

/// Human-readable dashboard table.
pub fn format_dashboard(m: &DashboardMetrics) -> String {
    let money = |v: f64| format_currency(Some(v));
    let pct = |v: f64| format_percentage(Some(v));
    let lines = [
        ("Total Revenue", money(m.total_revenue)),
        ("Total Volume", money(m.total_volume)),
        ("Properties Closed", m.properties_closed.to_string()),
        ("Active Listings", m.active_listings.to_string()),
        (
            "Under Contract",
            format!("{} ({})", m.under_contract_count, money(m.under_contract_value)),
        ),
        (
            "Pending",
            format!("{} ({})", m.pending_count, money(m.pending_value)),
        ),
        ("Withdrawn", m.withdrawn_properties.to_string()),
        ("Expired", m.expired_properties.to_string()),
        ("Terminated", m.terminated_properties.to_string()),
        ("Avg Sale Price", money(m.avg_home_sale_price)),
        ("Avg Commission", money(m.avg_commission)),
        ("Avg Days on Market", format!("{:.0}", m.avg_days_on_market)),
        ("Avg Offer Ratio", pct(m.avg_offer_ratio)),
        ("Hours Logged", format!("{:.1}", m.total_hours)),
        ("Revenue per Hour", money(m.revenue_per_hour)),
        ("Conversion Rate", pct(m.conversion_rate)),
        ("ROI", pct(m.roi_performance)),
        ("Total Expenses", money(m.total_expenses)),
        ("Gas Costs", money(m.mileage_gas_costs)),
        ("Net Profit", money(m.net_profit)),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{label:<20}{value}\n"))
        .collect()
}

/// Loads records and builds the summary for the requested window. An explicit
/// `period` overrides `[report] period`.
pub fn build_report_summary(
    config: &dyn ConfigPort,
    records: &dyn RecordPort,
    period: Option<&str>,
    today: NaiveDate,
) -> Result<ReportSummary, KpiError> {
    validate_report_config(config, today)?;
    let period = match period.map(str::to_string).or_else(|| config.get_string("report", "period")) {
        Some(raw) => ReportPeriod::parse(&raw, today)?,
        None => ReportPeriod::AllTime,
    };
    let user_name = config.get_string("report", "user_name").unwrap_or_default();
    let records = records.load_all()?;
    debug!(period = %period.label(), "building report");
    Ok(ReportSummary::build(
        &user_name,
        period,
        &records,
        &mileage_rates(config),
        today,
    ))
}

fn run_report(
    data: &Path,
    config_path: Option<&PathBuf>,
    period: Option<&str>,
    deliver: bool,
    html_path: Option<&PathBuf>,
    today: NaiveDate,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let records = CsvAdapter::new(data.to_path_buf());
    let summary = match build_report_summary(&config, &records, period, today) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    print!("{}", summary.text_body());

    let html = HtmlReportAdapter::new();
    if let Some(path) = html_path {
        if let Err(e) = html.write(&summary, path) {
            return fail(e);
        }
        info!(path = %path.display(), "HTML report written");
    }

    if deliver || config.get_bool("report", "deliver", false) {
        let html_body = match html.render(&summary) {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("HTML body unavailable, sending text only: {e}");
                None
            }
        };
        let message = Message::from_summary(&summary, html_body);
        let email = OutboxEmailAdapter::from_config(&config);
        let sms = SmsLogAdapter::from_config(&config);
        let channels: [&dyn DeliveryPort; 2] = [&email, &sms];
        let outcome = deliver_with_fallback(&channels, &message);
        match outcome.delivered_via {
            Some(channel) => eprintln!("Report delivered via {channel}"),
            None => {
                eprintln!(
                    "error: report delivery failed (tried {})",
                    outcome.attempted.join(", ")
                );
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}

/// Picks the preferences backend: an explicit `--store` file wins, then
/// `[sqlite] path`, then `[preferences] path`.
pub fn preferences_store(
    store: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<Box<dyn PreferencesPort>, KpiError> {
    if let Some(path) = store {
        return Ok(Box::new(IniPreferencesAdapter::new(path.clone())));
    }

    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_preferences_adapter::SqlitePreferencesAdapter;
        if config.get_string("sqlite", "path").is_some() {
            return Ok(Box::new(SqlitePreferencesAdapter::from_config(config)?));
        }
    }

    config
        .get_string("preferences", "path")
        .map(|path| Box::new(IniPreferencesAdapter::new(PathBuf::from(path))) as Box<dyn PreferencesPort>)
        .ok_or_else(|| KpiError::ConfigMissing {
            section: "preferences".into(),
            key: "path".into(),
        })
}

/// Applies one preferences action and returns the resulting state.
pub fn apply_prefs_action(
    store: &dyn PreferencesPort,
    action: &PrefsAction,
) -> Result<Preferences, KpiError> {
    match action {
        PrefsAction::Show => store.load(),
        PrefsAction::SetTheme { theme } => {
            let theme: Theme = theme.parse()?;
            store.update(&|p| p.theme = theme)
        }
        PrefsAction::CompleteStep { step } => store.update(&|p| {
            p.complete_step(step);
        }),
        PrefsAction::DismissNotice { notice } => store.update(&|p| {
            p.dismiss_notice(notice);
        }),
        PrefsAction::Reset => store.update(&|p| *p = Preferences::default()),
    }
}

pub fn format_preferences(prefs: &Preferences) -> String {
    let list = |set: &std::collections::BTreeSet<String>| {
        if set.is_empty() {
            "-".to_string()
        } else {
            set.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };
    format!(
        "theme: {}\ntutorial steps completed: {}\ntutorial dismissed: {}\nshow tutorial: {}\ndismissed notices: {}\n",
        prefs.theme,
        list(&prefs.tutorial_completed_steps),
        prefs.tutorial_dismissed,
        prefs.should_show_tutorial(TUTORIAL_STEPS),
        list(&prefs.dismissed_notices),
    )
}

fn run_prefs(
    store_path: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    action: &PrefsAction,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match preferences_store(store_path, &config) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    match apply_prefs_action(store.as_ref(), action) {
        Ok(prefs) => {
            print!("{}", format_preferences(&prefs));
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
