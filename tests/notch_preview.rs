#![cfg(feature = "notch-simulator")]
//! Controller and notch simulation driven through the public API.

use safe_area_canvas::{
    Anchors, AxisMask, LifecycleEvent, MemoryScene, NodeId, Orientation, Rect, SafeAreaController,
    SafeAreaSettings, SceneMutator, ScreenMetrics, StaticScreen, Template, TemplateRegistry,
    UpdateTiming,
};

fn canvas_with_content(width: f32, height: f32) -> (MemoryScene, NodeId, Vec<NodeId>) {
    let mut scene = MemoryScene::new();
    let canvas = scene.create_root("Canvas", width, height);
    let content = ["Header", "Content", "Footer"]
        .iter()
        .map(|name| {
            let node = scene.create_node(name);
            scene.set_parent(node, canvas).unwrap();
            node
        })
        .collect();
    (scene, canvas, content)
}

#[test]
fn every_tick_update_keeps_single_root_and_cover() {
    let (mut scene, canvas, content) = canvas_with_content(1080.0, 2220.0);
    let settings = SafeAreaSettings {
        update_timing: UpdateTiming::OnEveryTick,
        cover_unsafe_area: true,
        ..SafeAreaSettings::default()
    };
    let mut controller = SafeAreaController::new(canvas, settings, TemplateRegistry::with_builtins());
    let screen = StaticScreen(ScreenMetrics::new(
        1080.0,
        2220.0,
        Rect::new(0.0, 102.0, 1080.0, 2016.0),
    ));

    for _ in 0..5 {
        controller.on_lifecycle(LifecycleEvent::Tick, &mut scene, &screen);
    }

    let names: Vec<_> = scene
        .children(canvas)
        .into_iter()
        .map(|c| scene.name(c).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Safe Root", "Notch Cover"]);

    let root = controller.safe_root(&scene).unwrap();
    assert_eq!(scene.children(root), content);
    // canvas + root + 3 content + cover + 4 panels
    assert_eq!(scene.len(), 10);
}

#[test]
fn vertical_only_mask_ignores_horizontal_insets() {
    let (mut scene, canvas, _) = canvas_with_content(2220.0, 1080.0);
    let settings = SafeAreaSettings {
        axes: AxisMask {
            safe_horizontal: false,
            safe_vertical: true,
        },
        ..SafeAreaSettings::default()
    };
    let mut controller = SafeAreaController::new(canvas, settings, TemplateRegistry::with_builtins());
    controller.show_notch(&mut scene, Orientation::Landscape);

    let root = controller.safe_root(&scene).unwrap();
    assert_eq!(scene.anchors(root), Some(Anchors::STRETCH));
    assert!(scene.find_child_by_name(canvas, "Notch").is_some());
}

#[test]
fn notch_round_trip_leaves_no_managed_visuals() {
    let (mut scene, canvas, content) = canvas_with_content(1080.0, 2220.0);
    let settings = SafeAreaSettings {
        cover_unsafe_area: true,
        ..SafeAreaSettings::default()
    };
    let mut controller = SafeAreaController::new(canvas, settings, TemplateRegistry::with_builtins());

    controller.show_notch(&mut scene, Orientation::Portrait);
    assert!(controller.is_notch_showing());
    controller.hide_notch(&mut scene);
    assert!(!controller.is_notch_showing());

    let root = controller.safe_root(&scene).unwrap();
    assert_eq!(scene.children(canvas), vec![root]);
    assert_eq!(scene.children(root), content);
    assert_eq!(scene.anchors(root), Some(Anchors::STRETCH));
    assert_eq!(scene.count_named(canvas, "Notch"), 0);
    assert_eq!(scene.count_named(canvas, "Notch Cover"), 0);
}

#[test]
fn custom_cover_template_is_used() {
    let (mut scene, canvas, _) = canvas_with_content(1000.0, 1000.0);
    let mut templates = TemplateRegistry::new();
    templates.register(
        Template::new("Notch Cover")
            .child(Template::new("Top"))
            .child(Template::new("Bottom")),
    );
    let settings = SafeAreaSettings {
        cover_unsafe_area: true,
        cover_color: [0, 0, 255, 255],
        ..SafeAreaSettings::default()
    };
    let mut controller = SafeAreaController::new(canvas, settings, templates);
    controller.compute_and_apply(
        &mut scene,
        &ScreenMetrics::new(1000.0, 1000.0, Rect::new(0.0, 100.0, 1000.0, 800.0)),
    );

    let cover = scene.find_child_by_name(canvas, "Notch Cover").unwrap();
    let top = scene.find_child_by_name(cover, "Top").unwrap();
    let anchors = scene.anchors(top).unwrap();
    assert!((anchors.min.y - 0.9).abs() < 1e-6);
    assert_eq!(scene.color(top), Some([0, 0, 255, 255]));
}
