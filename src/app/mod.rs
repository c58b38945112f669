use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::infra::{Diagnostic, Hierarchy, demo_snapshot, load_snapshot};
use crate::layout::{LayoutError, LayoutParams, Viewport};
use crate::session::VizSession;

mod icicle;
mod ui;

type LoadResult = Result<(Hierarchy, Vec<Diagnostic>), String>;

pub struct CapacityApp {
    snapshot_path: Option<String>,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    session: VizSession,
    diagnostics: Vec<Diagnostic>,
    search: String,
    /// Arena index of the last node hovered on the canvas, for the details
    /// panel. Reset when a fresh snapshot replaces the arena.
    inspected: Option<usize>,
    min_extent: f32,
    show_capacity_labels: bool,
    show_percent_labels: bool,
}

impl ViewModel {
    fn new(tree: Hierarchy, diagnostics: Vec<Diagnostic>) -> Result<Self, LayoutError> {
        let params = LayoutParams::default();
        // Placeholder viewport until the first frame reports the canvas size.
        let mut session = VizSession::new(tree, Viewport::new(1280.0, 800.0), params)?;
        session.set_observer(|rects| {
            log::debug!("layout recomputed: {} rectangles", rects.len());
        });

        Ok(Self {
            session,
            diagnostics,
            search: String::new(),
            inspected: None,
            min_extent: params.min_extent,
            show_capacity_labels: true,
            show_percent_labels: true,
        })
    }
}

impl CapacityApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, snapshot_path: Option<String>) -> Self {
        let state = Self::start_load(snapshot_path.clone());
        Self {
            snapshot_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(snapshot_path: Option<String>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = match snapshot_path {
                Some(path) => load_snapshot(&path).map_err(|error| format!("{error:#}")),
                None => Ok(demo_snapshot()),
            };
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(snapshot_path: Option<String>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(snapshot_path),
        }
    }

    fn ready_state(result: LoadResult) -> AppState {
        match result {
            Ok((tree, diagnostics)) => match ViewModel::new(tree, diagnostics) {
                Ok(model) => AppState::Ready(Box::new(model)),
                Err(error) => AppState::Error(error.to_string()),
            },
            Err(error) => AppState::Error(error),
        }
    }
}

impl eframe::App for CapacityApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(Self::ready_state(result));
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading capacity snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load capacity snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.snapshot_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                let snapshot_label = self
                    .snapshot_path
                    .as_deref()
                    .unwrap_or("built-in demo inventory")
                    .to_owned();
                model.show(ctx, &snapshot_label, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.snapshot_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok((tree, diagnostics))) => {
                            // Swap the snapshot in place so the zoom focus can
                            // survive the reload when its node still exists.
                            model.session.replace_snapshot(tree);
                            model.diagnostics = diagnostics;
                            model.inspected = None;
                        }
                        Ok(Err(error)) => {
                            transition = Some(AppState::Error(error));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
