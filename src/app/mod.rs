use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::Context;
use serde_json::Value;

use crate::layout::Scene;
use crate::projection::{Camera, ProjectedNode};
use crate::settings::PosterSettings;
use crate::tree::{PosterError, read_tree_source};

mod poster;
mod render_utils;
mod ui;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct PosterApp {
    input_path: PathBuf,
    session: PosterSession,
    load_rx: Option<Receiver<Result<String, PosterError>>>,
}

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
    Loading,
    Parsing,
    Ready,
    Error(String),
}

impl LoadStatus {
    fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Loading directory tree...",
            Self::Parsing => "Parsing directory tree...",
            Self::Ready => "Nothing to display",
            Self::Error(_) => "Failed to load directory tree",
        }
    }
}

/// The document, the laid out scene and the camera for one input file.
struct PosterSession {
    status: LoadStatus,
    settings: PosterSettings,
    document: Option<Value>,
    pending_source: Option<String>,
    parse_deferred: bool,
    poster_dirty: bool,
    scene: Scene,
    camera: Camera,
    rotation: f32,
    view_scratch: ViewScratch,
}

#[derive(Default)]
struct ViewScratch {
    projected: Vec<ProjectedNode>,
    draw_order: Vec<usize>,
    visible: Vec<bool>,
}

impl PosterApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        input_path: PathBuf,
        settings: PosterSettings,
    ) -> Self {
        let load_rx = Some(Self::spawn_load(input_path.clone()));
        Self {
            input_path,
            session: PosterSession::new(settings),
            load_rx,
        }
    }

    fn spawn_load(input_path: PathBuf) -> Receiver<Result<String, PosterError>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            log::info!("reading {}", input_path.display());
            let _ = tx.send(read_tree_source(&input_path));
        });

        rx
    }

    fn poll_loader(&mut self, ctx: &Context) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(source)) => self.session.receive_source(source),
            Ok(Err(error)) => self.session.fail(error.to_string()),
            Err(TryRecvError::Empty) => {
                self.load_rx = Some(rx);
                ctx.request_repaint_after(LOAD_POLL_INTERVAL);
            }
            Err(TryRecvError::Disconnected) => {
                self.session
                    .fail("Background load worker disconnected".to_owned());
            }
        }
    }
}

impl eframe::App for PosterApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);
        if self.session.step_parse() {
            ctx.request_repaint();
        }

        let mut reload_requested = false;
        let is_loading = self.load_rx.is_some();
        self.session
            .show(ctx, &self.input_path, &mut reload_requested, is_loading);

        if reload_requested && self.load_rx.is_none() {
            self.session.status = LoadStatus::Loading;
            self.load_rx = Some(Self::spawn_load(self.input_path.clone()));
        }
    }
}
