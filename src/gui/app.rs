//! Balanço Main Application
//! Main window with control panel and dashboard.

use crate::charts::export_summary_png;
use crate::config::Settings;
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use crate::pipeline::{self, AnalyzeOptions, DashboardData, Source};
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Result from the background ingest/analyze thread
enum JobResult {
    Progress(f32, String),
    Loaded { df: DataFrame, rows: usize },
    Complete(Box<DashboardData>),
    Error(String),
}

/// Main application window.
pub struct BalancoApp {
    control_panel: ControlPanel,
    dashboard: Dashboard,

    /// Raw projected table kept so option changes re-analyze without a refetch.
    raw: Option<DataFrame>,

    // Async pipeline run
    job_rx: Option<Receiver<JobResult>>,
    is_running: bool,
}

impl BalancoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            control_panel: ControlPanel::new(Settings::load()),
            dashboard: Dashboard::new(),
            raw: None,
            job_rx: None,
            is_running: false,
        }
    }

    fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            drop_policy: self.control_panel.settings.drop_policy,
            top_n: self.control_panel.settings.top_n,
        }
    }

    /// Fetch + analyze in a background thread.
    fn start_ingest(&mut self, source: Source) {
        if self.is_running {
            return;
        }

        self.dashboard.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(5.0, "Starting...");
        self.is_running = true;

        let options = self.analyze_options();
        let (tx, rx) = channel();
        self.job_rx = Some(rx);

        thread::spawn(move || Self::run_ingest(tx, source, options));
    }

    /// Run fetch + analyze (called from background thread)
    fn run_ingest(tx: Sender<JobResult>, source: Source, options: AnalyzeOptions) {
        let _ = tx.send(JobResult::Progress(
            10.0,
            "Fetching spreadsheet...".to_string(),
        ));

        let df = match pipeline::fetch_table(&source) {
            Ok(df) => df,
            Err(e) => {
                let _ = tx.send(JobResult::Error(e.to_string()));
                return;
            }
        };

        let rows = df.height();
        let _ = tx.send(JobResult::Loaded {
            df: df.clone(),
            rows,
        });
        let _ = tx.send(JobResult::Progress(60.0, "Analyzing...".to_string()));

        match pipeline::analyze(&df, options) {
            Ok(data) => {
                let _ = tx.send(JobResult::Complete(Box::new(data)));
            }
            Err(e) => {
                let _ = tx.send(JobResult::Error(e.to_string()));
            }
        }
    }

    /// Re-analyze the cached raw table after an option change.
    fn start_reanalyze(&mut self) {
        if self.is_running {
            return;
        }
        let Some(df) = self.raw.clone() else {
            return;
        };

        self.control_panel.set_progress(30.0, "Analyzing...");
        self.is_running = true;

        let options = self.analyze_options();
        let (tx, rx) = channel();
        self.job_rx = Some(rx);

        thread::spawn(move || match pipeline::analyze(&df, options) {
            Ok(data) => {
                let _ = tx.send(JobResult::Complete(Box::new(data)));
            }
            Err(e) => {
                let _ = tx.send(JobResult::Error(e.to_string()));
            }
        });
    }

    /// Check for background pipeline results
    fn check_job_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.job_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    JobResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    JobResult::Loaded { df, rows } => {
                        self.raw = Some(df);
                        self.control_panel
                            .set_progress(50.0, &format!("Loaded {rows} rows"));
                    }
                    JobResult::Complete(data) => {
                        let expenses = data.expenses.records.len();
                        let income = data.income.records.len();
                        self.dashboard.set_data(*data);
                        self.control_panel.set_progress(
                            100.0,
                            &format!(
                                "Complete! {expenses} expense / {income} income records"
                            ),
                        );
                        self.control_panel.export_enabled = true;
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                    JobResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {error}"));
                        self.is_running = false;
                        should_keep_receiver = false;
                    }
                }
            }

            // Put receiver back if still needed
            if should_keep_receiver {
                self.job_rx = Some(rx);
            }
        }
    }

    fn handle_fetch_remote(&mut self) {
        let url = self.control_panel.settings.source_url.trim().to_string();
        if url.is_empty() {
            self.control_panel.set_progress(0.0, "Error: no source URL");
            return;
        }
        self.start_ingest(Source::Url(url));
    }

    fn handle_browse_csv(&mut self) {
        if self.is_running {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_ingest(Source::Path(path));
        }
    }

    /// Export the summary charts as a PNG and open it.
    fn handle_export_png(&mut self) {
        let Some(data) = self.dashboard.data() else {
            self.control_panel.set_progress(0.0, "No data to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("balanco_summary.png")
            .save_file()
        else {
            return; // User cancelled
        };

        match export_summary_png(data, &path) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
                let _ = open::that(&path);
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: export failed: {e}"));
            }
        }
    }
}

impl eframe::App for BalancoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_job_results();

        // Request repaint while the pipeline runs
        if self.is_running {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::FetchRemote => self.handle_fetch_remote(),
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::OptionsChanged => self.start_reanalyze(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui);
        });
    }
}
