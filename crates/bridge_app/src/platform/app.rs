use std::sync::mpsc;
use std::time::Duration;

use bridge_core::{update, AppState, AppViewModel, BackendConfig, Msg};
use bridge_engine::DispatchSettings;
use bridge_logging::bridge_info;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::persistence::{load_backend_url, LocalStorage};
use super::{logging, ui};

/// Repaint cadence while a dispatch is outstanding, keeps the spinner moving.
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> eframe::Result<()> {
    let config = AppConfig::from_env();
    logging::initialize(config.log_destination);

    let storage = LocalStorage::new(config.storage_dir.clone());
    let saved = load_backend_url(&storage);
    let state = AppState::with_config(BackendConfig::load(saved, &config.default_backend_url));
    bridge_info!(
        "Starting with backend {} (storage {:?})",
        state.config().active_url(),
        storage.path()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::constants::WINDOW_TITLE)
            .with_inner_size([640.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..eframe::NativeOptions::default()
    };

    let dispatch = config.dispatch;
    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(BridgeApp::new(cc, state, storage, dispatch)))),
    )
}

struct BridgeApp {
    state: AppState,
    view: AppViewModel,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl BridgeApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        state: AppState,
        storage: LocalStorage,
        settings: DispatchSettings,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(storage, settings, msg_tx, cc.egui_ctx.clone());
        Self {
            view: state.view(),
            state,
            effects,
            msg_rx,
        }
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.enqueue(effects);
    }
}

impl eframe::App for BridgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        for msg in ui::render::render(ctx, &self.view) {
            self.dispatch_msg(msg);
        }
        // Effects can resolve synchronously (e.g. a rejected submit).
        self.process_pending_messages();

        if self.view.loading {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}
