use eframe::egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::deck::panels::DeckMode;
use crate::deck::session::DeckSession;
use crate::deck::shortcuts::{Key, KeyEvent, KeyEventKind};
use crate::deck::slide::SlideRegistry;
use crate::deck::state::DeckState;
use crate::error::DeckError;
use crate::render::{self, panels};
use crate::render::transition::ActiveTransition;
use crate::sync::companion::{self, CompanionMode, CompanionProcess, Role};
use crate::sync::file_medium::FileMedium;
use crate::sync::medium::{BroadcastMedium, MemoryStore};
use crate::sync::{SyncPublisher, SyncReceiver};
use crate::theme::Theme;

/// Fallback repaint interval while synchronized, for media whose waker is late.
const SYNC_POLL: Duration = Duration::from_millis(250);

/// What the command line asked for.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub role: Role,
    pub mode: Option<DeckMode>,
    pub companion: Option<CompanionMode>,
    pub channel: Option<PathBuf>,
    pub no_sync: bool,
    pub windowed: bool,
    /// 1-indexed.
    pub start_slide: Option<usize>,
}

/// Launch settings after command line flags are laid over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
    pub role: Role,
    pub mode: DeckMode,
    pub companion: CompanionMode,
    pub sync: bool,
    pub channel_dir: PathBuf,
    pub start_index: usize,
    pub dark: bool,
    pub windowed: bool,
}

impl LaunchPlan {
    pub fn resolve(options: &LaunchOptions, config: &Config) -> Self {
        let role = options.role;
        let configured_mode = match role {
            Role::Primary => config.mode(),
            Role::Companion => None,
        };
        let sync = !options.no_sync && config.sync_enabled();
        let companion = match role {
            Role::Companion => CompanionMode::None,
            Role::Primary if !sync => CompanionMode::None,
            Role::Primary => options.companion.unwrap_or_else(|| config.companion()),
        };

        Self {
            role,
            mode: options
                .mode
                .or(configured_mode)
                .unwrap_or_else(|| role.default_mode()),
            companion,
            sync,
            channel_dir: options
                .channel
                .clone()
                .or_else(|| config.channel_dir())
                .unwrap_or_else(FileMedium::default_dir),
            start_index: options
                .start_slide
                .or_else(|| config.start_slide())
                .unwrap_or(1)
                .saturating_sub(1),
            dark: config.dark_theme(),
            windowed: options.windowed,
        }
    }

    /// Whether the views talk through the channel directory.
    pub fn uses_channel(&self) -> bool {
        self.sync && self.companion != CompanionMode::Window
    }
}

fn window_title(mode: DeckMode) -> String {
    format!("{} - {}", render::DECK_TITLE, render::subtitle(mode))
}

fn map_key(key: egui::Key) -> Option<Key> {
    Some(match key {
        egui::Key::ArrowRight => Key::ArrowRight,
        egui::Key::ArrowLeft => Key::ArrowLeft,
        egui::Key::ArrowUp => Key::ArrowUp,
        egui::Key::ArrowDown => Key::ArrowDown,
        egui::Key::Space => Key::Space,
        egui::Key::Enter => Key::Enter,
        egui::Key::Backspace => Key::Backspace,
        egui::Key::Escape => Key::Escape,
        egui::Key::C => Key::C,
        egui::Key::D => Key::D,
        egui::Key::H => Key::H,
        egui::Key::N => Key::N,
        egui::Key::T => Key::T,
        _ => return None,
    })
}

fn key_event(key: egui::Key, pressed: bool, repeat: bool) -> Option<KeyEvent> {
    let kind = match (pressed, repeat) {
        (false, _) => KeyEventKind::Up,
        (true, true) => KeyEventKind::Repeat,
        (true, false) => KeyEventKind::Down,
    };
    Some(KeyEvent {
        key: map_key(key)?,
        kind,
    })
}

/// One window onto a deck session.
struct DeckView {
    name: &'static str,
    session: DeckSession,
    theme: Theme,
    shown: usize,
    transition: Option<ActiveTransition>,
    changes: Rc<RefCell<Vec<DeckState>>>,
}

impl DeckView {
    fn new(name: &'static str, mut session: DeckSession, ctx: &egui::Context) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let repaint = ctx.clone();
        session
            .navigator_mut()
            .state_mut()
            .subscribe(move |state: &DeckState| {
                sink.borrow_mut().push(*state);
                repaint.request_repaint();
            });

        Self {
            name,
            theme: Theme::from_dark_mode(session.dark_mode()),
            shown: session.navigator().current_index(),
            session,
            transition: None,
            changes,
        }
    }

    fn id(&self, part: &str) -> egui::Id {
        egui::Id::new(self.name).with(part)
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let mut key_events = Vec::new();
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            for event in &i.events {
                let egui::Event::Key {
                    key,
                    physical_key,
                    pressed,
                    repeat,
                    ..
                } = event
                else {
                    continue;
                };
                let key = physical_key.unwrap_or(*key);
                if let Some(event) = key_event(key, *pressed, *repeat) {
                    key_events.push(event);
                    continue;
                }
                if !*pressed || *repeat {
                    continue;
                }
                match key {
                    egui::Key::Q => viewport_cmds.push(egui::ViewportCommand::Close),
                    egui::Key::F => viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                        !i.viewport().fullscreen.unwrap_or(false),
                    )),
                    _ => {}
                }
            }
        });

        // Viewport commands must not be sent from inside the input closure.
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for event in key_events {
            self.session.handle_key(event);
        }
    }

    /// Start animating toward whatever the state observer reported.
    fn follow_state_changes(&mut self) {
        let changes: Vec<DeckState> = self.changes.borrow_mut().drain(..).collect();
        let registry = self.session.navigator().registry();
        for state in changes {
            if state.slide_index == self.shown {
                continue;
            }
            let (Some(from), Some(to)) = (registry.get(self.shown), registry.get(state.slide_index))
            else {
                continue;
            };
            self.transition = Some(ActiveTransition::new(from, to, state.direction));
            self.shown = state.slide_index;
        }

        if self.transition.as_ref().is_some_and(|t| t.is_complete()) {
            self.transition = None;
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        self.session.pump_sync();
        self.handle_input(ctx);
        self.follow_state_changes();

        if self.session.dark_mode() != self.theme.is_dark() {
            self.theme = self.theme.toggled();
        }

        let panels_state = *self.session.panels();
        let panel_frame = egui::Frame::new()
            .fill(self.theme.panel_background)
            .inner_margin(12.0);

        if panels_state.toolbar_visible() {
            let clicked = egui::TopBottomPanel::top(self.id("toolbar"))
                .frame(panel_frame)
                .show(ctx, |ui| {
                    ui.style_mut().visuals = self.theme.visuals();
                    panels::toolbar(
                        ui,
                        &self.theme,
                        self.session.current_slide(),
                        self.session.navigator().current_index(),
                        self.session.navigator().registry().len(),
                    )
                })
                .inner;
            if clicked {
                self.session.toggle_theme();
            }
        }

        if panels_state.hint_visible() {
            egui::TopBottomPanel::bottom(self.id("hint"))
                .frame(panel_frame)
                .show(ctx, |ui| {
                    ui.style_mut().visuals = self.theme.visuals();
                    panels::hint(ui, &self.theme);
                });
        }

        if panels_state.table_of_content_visible() {
            let picked = egui::SidePanel::left(self.id("toc"))
                .frame(panel_frame)
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.style_mut().visuals = self.theme.visuals();
                    panels::table_of_contents(
                        ui,
                        &self.theme,
                        self.session.navigator().registry().slides(),
                        self.session.navigator().current_index(),
                    )
                })
                .inner;
            if let Some(index) = picked {
                debug!(index, "table of contents jump");
                self.session.navigator_mut().jump_to_index(index);
            }
        }

        if panels_state.shortcuts_visible() {
            egui::SidePanel::right(self.id("shortcuts"))
                .frame(panel_frame)
                .resizable(false)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui.style_mut().visuals = self.theme.visuals();
                    panels::shortcuts_guide(ui, &self.theme);
                });
        }

        if panels_state.notes_visible() {
            egui::SidePanel::right(self.id("notes"))
                .frame(panel_frame)
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui.style_mut().visuals = self.theme.visuals();
                    panels::notes(ui, &self.theme, self.session.notes());
                });
        }

        // Pick up a table of contents jump before drawing.
        self.follow_state_changes();

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                render::draw_presentation(
                    ui,
                    self.session.current_slide(),
                    self.transition.as_ref(),
                    self.session.mode(),
                    &self.theme,
                    rect,
                );
            });

        if self.transition.is_some() {
            ctx.request_repaint();
        } else if self.session.is_syncing() {
            ctx.request_repaint_after(SYNC_POLL);
        }
    }
}

fn attach_sync(
    session: &mut DeckSession,
    medium: Arc<dyn BroadcastMedium>,
    ctx: &egui::Context,
) -> Result<(), DeckError> {
    let repaint = ctx.clone();
    let receiver = SyncReceiver::listen(Arc::clone(&medium), move || repaint.request_repaint())?;
    session.attach_publisher(SyncPublisher::new(medium));
    session.attach_receiver(receiver);
    Ok(())
}

struct DeckApp {
    primary: DeckView,
    companion: Option<DeckView>,
    companion_process: Option<CompanionProcess>,
}

impl DeckApp {
    fn build(
        plan: &LaunchPlan,
        channel: Option<Arc<FileMedium>>,
        ctx: &egui::Context,
    ) -> Result<Self, DeckError> {
        let registry = SlideRegistry::deck();
        let mut primary = DeckSession::new(registry.clone(), plan.mode, plan.start_index)
            .with_dark_mode(plan.dark);
        let mut local = None;

        if let Some(medium) = channel {
            attach_sync(&mut primary, medium, ctx)?;
        } else if plan.sync && plan.companion == CompanionMode::Window {
            let store = MemoryStore::new();
            attach_sync(&mut primary, Arc::new(store.handle()), ctx)?;

            let mut session = DeckSession::new(registry, Role::Companion.default_mode(), 0)
                .with_dark_mode(plan.dark);
            attach_sync(&mut session, Arc::new(store.handle()), ctx)?;
            local = Some(session);
        }

        match plan.role {
            Role::Primary => primary.announce(),
            Role::Companion => {
                primary.catch_up();
            }
        }
        let companion = local.map(|mut session| {
            session.catch_up();
            DeckView::new("companion", session, ctx)
        });

        let mut companion_process = None;
        if plan.role == Role::Primary && plan.companion == CompanionMode::Process {
            match companion::spawn_companion(&plan.channel_dir) {
                Ok(process) => companion_process = Some(process),
                Err(e) => warn!("could not open companion view: {e}"),
            }
        }

        Ok(Self {
            primary: DeckView::new("primary", primary, ctx),
            companion,
            companion_process,
        })
    }

    /// Close the companion process along with this window.
    fn shutdown(&mut self) {
        if let Some(mut process) = self.companion_process.take() {
            process.terminate();
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.primary.show(ctx);

        let Some(view) = self.companion.as_mut() else {
            return;
        };
        let builder = egui::ViewportBuilder::default()
            .with_title(window_title(view.session.mode()))
            .with_inner_size([1100.0, 700.0]);
        let closed = ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("skideck-companion"),
            builder,
            |ctx, _class| {
                view.show(ctx);
                ctx.input(|i| i.viewport().close_requested())
            },
        );
        if closed {
            info!("companion window closed");
            self.companion = None;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let plan = LaunchPlan::resolve(&options, &config);
    info!(
        role = ?plan.role,
        mode = plan.mode.name(),
        companion = plan.companion.name(),
        sync = plan.sync,
        "starting deck"
    );

    let channel = if plan.uses_channel() {
        Some(Arc::new(FileMedium::open(&plan.channel_dir)?))
    } else {
        None
    };

    let title = window_title(plan.mode);
    let viewport = if plan.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let app = DeckApp::build(&plan, channel, &cc.egui_ctx)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
