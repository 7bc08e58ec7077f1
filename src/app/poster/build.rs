use crate::layout::{Scene, layout};
use crate::projection::Camera;
use crate::settings::PosterSettings;
use crate::tree::{build_tree, parse_tree_source};

use super::super::{LoadStatus, PosterSession, ViewScratch};

impl PosterSession {
    pub(in crate::app) fn new(settings: PosterSettings) -> Self {
        Self {
            status: LoadStatus::Loading,
            settings,
            document: None,
            pending_source: None,
            parse_deferred: false,
            poster_dirty: false,
            scene: Scene::default(),
            camera: Camera::default(),
            rotation: 0.0,
            view_scratch: ViewScratch::default(),
        }
    }

    /// Holds freshly read text until one frame showing the parsing status
    /// has been painted.
    pub(in crate::app) fn receive_source(&mut self, source: String) {
        log::info!("read {} bytes of directory JSON", source.len());
        self.pending_source = Some(source);
        self.parse_deferred = true;
        self.status = LoadStatus::Parsing;
    }

    /// Runs the deferred parse. Returns true while the parse is still
    /// waiting for its status frame.
    pub(in crate::app) fn step_parse(&mut self) -> bool {
        if self.status != LoadStatus::Parsing {
            return false;
        }

        if self.parse_deferred {
            self.parse_deferred = false;
            return true;
        }

        let Some(source) = self.pending_source.take() else {
            self.fail("No directory JSON was received".to_owned());
            return false;
        };

        match parse_tree_source(&source) {
            Ok(document) => {
                self.document = Some(document);
                self.make_poster();
                self.camera.reset();
                self.status = LoadStatus::Ready;
            }
            Err(error) => self.fail(error.to_string()),
        }
        false
    }

    pub(in crate::app) fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.pending_source = None;
        self.document = None;
        self.scene = Scene {
            bounds: self.scene.bounds,
            ..Scene::default()
        };
        self.status = LoadStatus::Error(message);
    }

    /// Rebuilds the tree and layout from the current document and settings.
    pub(in crate::app) fn make_poster(&mut self) {
        self.poster_dirty = false;
        let Some(document) = &self.document else {
            return;
        };

        let tree = build_tree(document, self.settings.limits);
        if let Some(message) = tree.truncation_message() {
            log::warn!("{message}; raise the node cap to see the rest");
        }

        let previous_bounds = self.scene.bounds;
        let mut scene = layout(tree, self.settings.strategy, &self.settings.layout);
        if scene.is_empty() {
            scene.bounds = previous_bounds;
        }

        log::info!(
            "built {} poster: {} nodes, {} edges, depth {}",
            scene.strategy.label(),
            scene.node_count(),
            scene.tree.edges.len(),
            scene.max_depth
        );
        self.scene = scene;
    }
}
