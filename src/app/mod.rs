use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context as _, Result};
use dreamspace::config::Config;
use dreamspace::engine::{EngineState, Node};
use dreamspace::search::FuzzySearch;
use dreamspace::vault::scan_vault;
use eframe::egui::{self, Context, Pos2};
use glam::DVec3;
use tracing::{error, info};

use self::camera::OrbitCamera;

mod camera;
mod graph;
mod render_utils;
mod ui;

pub struct DreamSpaceApp {
    source: VaultSource,
    state: AppState,
    reload_rx: Option<Receiver<Result<LoadedVault, String>>>,
}

#[derive(Clone)]
struct VaultSource {
    vault_path: PathBuf,
    config_path: Option<PathBuf>,
}

struct LoadedVault {
    nodes: Vec<Node>,
    config: Config,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedVault, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    engine: EngineState,
    search: FuzzySearch,
    search_text: String,
    camera: OrbitCamera,
    hovered: Option<String>,
    display_positions: Vec<DVec3>,
    view_scratch: ViewScratch,
    animate_transitions: bool,
    show_labels: bool,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    depths: Vec<f64>,
    draw_order: Vec<usize>,
}

impl VaultSource {
    fn load(&self) -> Result<LoadedVault> {
        let config = match &self.config_path {
            Some(path) => Config::from_file(path),
            None => Config::load(&self.vault_path),
        }
        .context("failed to load settings")?;

        let nodes = scan_vault(&self.vault_path)
            .with_context(|| format!("failed to scan vault {}", self.vault_path.display()))?;

        Ok(LoadedVault { nodes, config })
    }
}

impl DreamSpaceApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        vault_path: PathBuf,
        config_path: Option<PathBuf>,
    ) -> Self {
        let source = VaultSource {
            vault_path,
            config_path,
        };
        let state = Self::start_load(source.clone());
        Self {
            source,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: VaultSource) -> Receiver<Result<LoadedVault, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = source.load().map_err(|error| {
                error!(error = %format!("{error:#}"), "vault load failed");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: VaultSource) -> AppState {
        info!(vault = %source.vault_path.display(), "loading vault");
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready(loaded: LoadedVault) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(loaded.nodes, loaded.config)))
    }
}

impl eframe::App for DreamSpaceApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(loaded) => Self::ready(loaded),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Scanning vault...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the vault");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source.vault_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(loaded) => Self::ready(loaded),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
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
