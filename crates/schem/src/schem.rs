//! Schem: a schematic editor
//!
//! Double click to place an LED, drag components around, and right click a
//! component to wire it to the selection.

use anyhow::{Context as _, Result};
use canvas::{CanvasConfig, SchemCanvas};
use editor::Editor;
use gpui::{
    actions, point, px, App, AppContext, Application, Focusable, KeyBinding, Menu, MenuItem,
    TitlebarOptions, WindowOptions,
};
use images::EmbeddedLoader;
use logger::SchemLogger;
use schematic::Catalog;
use std::rc::Rc;

mod editor;
mod element;
mod images;
mod logger;

/// Environment variable naming a JSON settings file.
const CONFIG_VAR: &str = "SCHEM_CONFIG";

actions!(schem, [Quit]);

/// Read settings from the file named by `SCHEM_CONFIG`, or use the defaults.
fn load_config() -> Result<CanvasConfig> {
    let Ok(path) = std::env::var(CONFIG_VAR) else {
        return Ok(CanvasConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config =
        CanvasConfig::from_json(&text).with_context(|| format!("Invalid config in {}", path))?;
    log::info!("Loaded config from {}", path);
    Ok(config)
}

fn open_main_window(config: &CanvasConfig, cx: &mut App) -> Result<()> {
    let mut loader = EmbeddedLoader::new();
    let catalog = Rc::new(Catalog::load(&mut loader));
    let canvas = SchemCanvas::new(catalog, config)?;
    let pending = loader.take_pending();
    let arc_segments = config.arc_segments;

    let window = cx.open_window(
        WindowOptions {
            titlebar: Some(TitlebarOptions {
                title: Some("Schem".into()),
                appears_transparent: false,
                traffic_light_position: Some(point(px(8.0), px(8.0))),
            }),
            ..Default::default()
        },
        |_window, cx| cx.new(|cx| Editor::new(canvas, pending, arc_segments, cx)),
    )?;

    window.update(cx, |editor, window, cx| {
        window.focus(&editor.focus_handle(cx));
        cx.activate(true);
    })?;
    Ok(())
}

fn main() {
    if let Err(err) = SchemLogger::init_from_env() {
        eprintln!("Failed to initialize logging: {:#}", err);
    }

    let config = load_config().unwrap_or_else(|err| {
        log::error!("{:#}; using default settings", err);
        CanvasConfig::default()
    });

    Application::new().run(move |cx: &mut App| {
        cx.on_action(quit);
        cx.set_menus(vec![Menu {
            name: "Schem".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        }]);
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

        if let Err(err) = open_main_window(&config, cx) {
            log::error!("Failed to open window: {:#}", err);
            cx.quit();
        }
    });
}

fn quit(_: &Quit, cx: &mut App) {
    cx.quit();
}
