// filepath: src/main.rs

use log::{error, info, warn};
use safe_area_canvas::config::SafeAreaConfig;
use safe_area_canvas::{
    LifecycleEvent, MemoryScene, NodeId, SafeAreaController, SceneMutator, StaticScreen,
    TemplateRegistry,
};

const SAMPLE_CONTENT: [&str; 3] = ["Header", "Content", "Footer"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting safe-area preview");

    let mut config = SafeAreaConfig::load_from_file().unwrap_or_else(|e| {
        warn!("Failed to load configuration: {}", e);
        SafeAreaConfig::default()
    });
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error {
            error!("Config: {}", issue);
        } else {
            warn!("Config: {}", issue);
        }
    }
    if issues.iter().any(|i| i.is_error) {
        error!("Config has errors; falling back to defaults.");
        config = SafeAreaConfig::default();
    }
    info!("Configuration loaded");

    let screen = StaticScreen(config.preview.metrics());
    let mut scene = MemoryScene::new();
    let canvas = scene.create_root("Canvas", screen.0.width, screen.0.height);
    for name in SAMPLE_CONTENT {
        let node = scene.create_node(name);
        scene.set_parent(node, canvas)?;
    }

    let mut controller =
        SafeAreaController::new(canvas, config.settings(), TemplateRegistry::with_builtins());

    let mut events = vec![LifecycleEvent::Init, LifecycleEvent::FirstActive];
    for _ in 0..config.preview.ticks {
        events.push(LifecycleEvent::Tick);
        events.push(LifecycleEvent::FixedTick);
    }
    let mut updates = 0;
    for event in events {
        if controller.on_lifecycle(event, &mut scene, &screen) {
            updates += 1;
        }
    }
    if updates == 0 {
        info!("Timing {:?} never fired, updating manually", config.update_timing);
        controller.update_safe_area(&mut scene, &screen);
    }
    report(&scene, canvas, "Safe area applied");

    #[cfg(feature = "notch-simulator")]
    {
        if let Some(orientation) = config.preview.notch {
            controller.show_notch(&mut scene, orientation);
            report(&scene, canvas, "Notch shown");
            controller.hide_notch(&mut scene);
            report(&scene, canvas, "Notch hidden");
        }
    }

    Ok(())
}

fn report(scene: &MemoryScene, canvas: NodeId, title: &str) {
    info!("{} ({} nodes):\n{}", title, scene.len(), scene.dump(canvas));
}
