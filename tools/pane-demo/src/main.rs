//! Scripted headless session for pane-gui
//!
//! Builds windows from a scene file, replays its input frames through the
//! engine and prints the resulting layout snapshot as JSON.
//!
//! Usage: `pane-demo [scene.json] [snapshot-out.json]`
//!
//! Without a scene file a built-in scene is played.

use std::{env, fs};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use pane_gui::{
    Anchor, ButtonAction, Gui, GuiConfig, HeadlessBackend, InputEvent, Point, PointerButton, Size,
    WindowConfig,
};

/// Our crates log at debug, everything else at warn.
const DEFAULT_FILTER: &str = "warn,pane_gui=debug,pane_demo=debug";

fn init_logging() -> Result<()> {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let format = fmt::format().compact().with_line_number(true);
    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().event_format(format).with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber).context("unable to install log subscriber")?;
    Ok(())
}

/// A window to create, optionally nested under an earlier one
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SceneWindow {
    #[serde(flatten)]
    config: WindowConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchor: Option<Anchor>,
}

/// Windows plus input events grouped per frame
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Scene {
    config: GuiConfig,
    windows: Vec<SceneWindow>,
    frames: Vec<Vec<InputEvent>>,
}

impl Scene {
    fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading scene {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path))
    }

    /// Editor with a nested inspector; drags the editor, then focuses the inspector
    fn builtin() -> Self {
        let window = |name: &str, x, y, width, height| WindowConfig {
            name: name.to_string(),
            title: name.to_string(),
            position: Point::new(x, y),
            size: Size::new(width, height),
            ..Default::default()
        };
        let press = |action| InputEvent::PointerButton {
            button: PointerButton::Primary,
            action,
        };

        Self {
            config: GuiConfig::default(),
            windows: vec![
                SceneWindow {
                    config: window("editor", 40, 40, 640, 480),
                    parent: None,
                    anchor: None,
                },
                SceneWindow {
                    config: window("inspector", 0, 0, 260, 240),
                    parent: Some("editor".to_string()),
                    anchor: Some(Anchor::BottomRight),
                },
                SceneWindow {
                    config: window("log", 720, 40, 400, 300),
                    parent: None,
                    anchor: None,
                },
            ],
            frames: vec![
                vec![
                    InputEvent::PointerMove { x: 120, y: 50 },
                    press(ButtonAction::Pressed),
                ],
                vec![InputEvent::PointerMove { x: 160, y: 90 }],
                vec![InputEvent::PointerMove { x: 200, y: 130 }],
                vec![press(ButtonAction::Released)],
                vec![
                    InputEvent::PointerMove { x: 600, y: 500 },
                    press(ButtonAction::Pressed),
                    press(ButtonAction::Released),
                ],
                vec![InputEvent::SurfaceResize { width: 1024, height: 640 }],
                vec![],
                vec![],
                vec![InputEvent::SurfaceClose],
            ],
        }
    }
}

fn build(scene: &Scene) -> Result<Gui> {
    let mut gui = Gui::new(scene.config.clone());
    for entry in &scene.windows {
        let id = gui
            .create_window(&entry.config)
            .with_context(|| format!("creating window {:?}", entry.config.name))?;
        let Some(parent) = &entry.parent else {
            continue;
        };
        let Some(parent_id) = gui.window_manager().id_of(parent) else {
            bail!("window {:?} names unknown parent {:?}", entry.config.name, parent);
        };
        gui.attach(parent_id, id, entry.anchor.unwrap_or(Anchor::Movable))
            .with_context(|| format!("nesting {:?} under {:?}", entry.config.name, parent))?;
    }
    Ok(gui)
}

fn focused_name(gui: &Gui) -> String {
    gui.focused_window()
        .and_then(|id| gui.registry().visual(id))
        .map(|v| v.name().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = env::args().skip(1).collect();

    let scene = match args.first() {
        Some(path) => Scene::load(path)?,
        None => Scene::builtin(),
    };
    let mut gui = build(&scene)?;
    let mut backend = HeadlessBackend::new();
    info!("scene ready with {} windows", gui.window_manager().len());

    for (frame, events) in scene.frames.iter().enumerate() {
        for event in events {
            debug!("frame {}: {:?}", frame, event);
            gui.handle_event(event);
        }
        gui.update();
        let drawn = gui.render(&mut backend);
        info!(
            "frame {}: drawn={} calls={} focused={} cursor={:?}",
            frame,
            drawn,
            if drawn { backend.calls().len() } else { 0 },
            focused_name(&gui),
            gui.cursor(),
        );
        if gui.close_requested() {
            info!("surface closed after frame {}", frame);
            break;
        }
    }

    if !gui.registry().is_consistent() {
        warn!("registry indices diverged during the session");
    }

    let json = serde_json::to_string_pretty(&gui.snapshot()).context("serializing snapshot")?;
    match args.get(1) {
        Some(out) => {
            fs::write(out, &json).with_context(|| format!("writing snapshot {}", out))?;
            info!("snapshot written to {}", out);
        }
        None => println!("{}", json),
    }
    Ok(())
}
