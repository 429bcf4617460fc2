//! Integration tests for the GUI engine
//!
//! These tests drive the engine through host input events and verify:
//! - Window stacking and focus arbitration
//! - Drag and resize gestures
//! - Anchor layout and clamping
//! - Title bar controls and the destroy cascade
//! - Widgets reacting to input
//! - Layout snapshots and redraw bookkeeping

use pane_gui::{
    Anchor, ButtonAction, ButtonConfig, CursorIcon, EditMode, Gui, GuiConfig, GuiError,
    HeadlessBackend, InputEvent, Key, KeyAction, LayoutSnapshot, ObjectId, Point, PointerButton,
    Rect, Size, TextConfig, WindowConfig, WindowState,
};
use pane_gui::object::Widget;
use pane_gui::window::ResizeHandle;

fn window_config(name: &str, x: i32, y: i32, width: i32, height: i32) -> WindowConfig {
    WindowConfig {
        name: name.to_string(),
        title: name.to_string(),
        position: Point::new(x, y),
        size: Size::new(width, height),
        ..Default::default()
    }
}

fn move_to(gui: &mut Gui, x: i32, y: i32) {
    gui.handle_event(&InputEvent::PointerMove { x, y });
}

fn primary(gui: &mut Gui, action: ButtonAction) {
    gui.handle_event(&InputEvent::PointerButton {
        button: PointerButton::Primary,
        action,
    });
}

fn click(gui: &mut Gui, x: i32, y: i32) {
    move_to(gui, x, y);
    primary(gui, ButtonAction::Pressed);
    primary(gui, ButtonAction::Released);
}

fn press_key(gui: &mut Gui, key: Key) {
    gui.handle_event(&InputEvent::Key {
        key,
        action: KeyAction::Pressed,
    });
    gui.handle_event(&InputEvent::Key {
        key,
        action: KeyAction::Released,
    });
}

fn layer(gui: &Gui, id: ObjectId) -> i32 {
    gui.registry().layer_of(id).unwrap()
}

fn rect(gui: &Gui, id: ObjectId) -> Rect {
    gui.registry().visual(id).unwrap().rect()
}

fn is_focused(gui: &Gui, id: ObjectId) -> bool {
    gui.registry().window(id).unwrap().is_focused()
}

// =============================================================================
// Layering and Focus Tests
// =============================================================================

#[test]
fn test_nested_windows_stack_above_parent_and_siblings() {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 0, 0, 500, 500)).unwrap();
    let first = gui.create_window(&window_config("first", 10, 10, 225, 225)).unwrap();
    gui.attach(root, first, Anchor::Movable).unwrap();
    let second = gui.create_window(&window_config("second", 20, 20, 225, 225)).unwrap();
    gui.attach(root, second, Anchor::Movable).unwrap();

    assert_eq!(layer(&gui, root), 0);
    assert_eq!(layer(&gui, first), 2);

    let first_highest = gui.window_manager().subtree_highest(gui.registry(), first);
    assert!(layer(&gui, second) >= 4);
    assert!(layer(&gui, second) > first_highest);

    // Root and the newest nested window are focused
    assert!(is_focused(&gui, root));
    assert!(is_focused(&gui, second));
    assert!(!is_focused(&gui, first));
    assert_eq!(gui.focused_window(), Some(second));
}

#[test]
fn test_overlapping_click_keeps_upper_window_focused() {
    let mut gui = Gui::default();
    let lower = gui
        .create_window(&WindowConfig {
            layer: 4,
            ..window_config("lower", 100, 100, 400, 300)
        })
        .unwrap();
    let upper = gui
        .create_window(&WindowConfig {
            layer: 6,
            ..window_config("upper", 200, 150, 400, 300)
        })
        .unwrap();
    assert_eq!(layer(&gui, lower), 4);
    assert_eq!(layer(&gui, upper), 6);

    click(&mut gui, 300, 200);

    assert!(is_focused(&gui, upper));
    assert!(!is_focused(&gui, lower));
    assert_eq!(layer(&gui, lower), 4);
    assert_eq!(layer(&gui, upper), 6);
}

#[test]
fn test_click_raises_uncovered_window() {
    let mut gui = Gui::default();
    let lower = gui
        .create_window(&WindowConfig {
            layer: 4,
            ..window_config("lower", 100, 100, 400, 300)
        })
        .unwrap();
    let upper = gui
        .create_window(&WindowConfig {
            layer: 6,
            ..window_config("upper", 200, 150, 400, 300)
        })
        .unwrap();

    click(&mut gui, 120, 200);

    assert!(is_focused(&gui, lower));
    assert!(!is_focused(&gui, upper));
    let upper_highest = gui.window_manager().subtree_highest(gui.registry(), upper);
    assert!(layer(&gui, lower) > upper_highest);
    assert_eq!(gui.focused_window(), Some(lower));
}

#[test]
fn test_nested_click_focuses_in_one_press() {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 0, 0, 600, 600)).unwrap();
    let left = gui.create_window(&window_config("left", 0, 0, 250, 250)).unwrap();
    let right = gui.create_window(&window_config("right", 0, 0, 250, 250)).unwrap();
    gui.attach(root, left, Anchor::BottomLeft).unwrap();
    gui.attach(root, right, Anchor::BottomRight).unwrap();
    assert!(is_focused(&gui, right));

    let target = rect(&gui, left);
    click(&mut gui, target.x + 100, target.y + 150);

    assert!(is_focused(&gui, root));
    assert!(is_focused(&gui, left));
    assert!(!is_focused(&gui, right));
    let right_highest = gui.window_manager().subtree_highest(gui.registry(), right);
    assert!(layer(&gui, left) > right_highest);
}

#[test]
fn test_attach_rejects_cycles_and_control_anchors() {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 0, 0, 500, 500)).unwrap();
    let child = gui.create_window(&window_config("child", 0, 0, 225, 225)).unwrap();
    gui.attach(root, child, Anchor::Movable).unwrap();

    assert_eq!(
        gui.attach(child, root, Anchor::Movable),
        Err(GuiError::InvalidParent { parent: child, child: root })
    );
    assert!(matches!(
        gui.attach(root, child, Anchor::Close),
        Err(GuiError::InvalidAnchor(_))
    ));
    assert_eq!(gui.parent_of(child), Some(root));
}

// =============================================================================
// Gesture Tests
// =============================================================================

#[test]
fn test_resize_stops_at_minimum_size() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("small", 0, 0, 300, 300)).unwrap();

    move_to(&mut gui, 305, 305);
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.cursor(), CursorIcon::ResizeNwSe);

    move_to(&mut gui, -500, -500);
    gui.update();
    assert_eq!(rect(&gui, id), Rect::new(0, 0, 225, 225));

    primary(&mut gui, ButtonAction::Released);
    gui.update();
    assert_eq!(gui.cursor(), CursorIcon::Default);
    assert!(gui.window_manager().gestures.active().is_none());
}

#[test]
fn test_title_drag_moves_window_and_children() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(id, icon, Anchor::Center).unwrap();
    let before = rect(&gui, icon).position();

    move_to(&mut gui, 200, 110);
    primary(&mut gui, ButtonAction::Pressed);
    move_to(&mut gui, 250, 150);
    gui.update();

    assert_eq!(rect(&gui, id).position(), Point::new(150, 140));
    assert_eq!(rect(&gui, icon).position(), before + Point::new(50, 40));
    primary(&mut gui, ButtonAction::Released);
}

#[test]
fn test_only_one_window_holds_the_gesture() {
    let mut gui = Gui::default();
    let a = gui.create_window(&window_config("a", 100, 100, 400, 300)).unwrap();
    let b = gui.create_window(&window_config("b", 700, 100, 400, 300)).unwrap();

    move_to(&mut gui, 800, 110);
    primary(&mut gui, ButtonAction::Pressed);
    move_to(&mut gui, 850, 150);

    let active = gui.window_manager().gestures.active().unwrap();
    assert_eq!(active.window, b);
    assert!(!gui.window_manager().is_free_to_interact(a));
    assert!(gui.window_manager().is_free_to_interact(b));

    gui.update();
    assert_eq!(rect(&gui, b).position(), Point::new(750, 140));
    assert_eq!(rect(&gui, a).position(), Point::new(100, 100));

    primary(&mut gui, ButtonAction::Released);
    assert!(gui.window_manager().gestures.active().is_none());
    assert!(gui.window_manager().is_free_to_interact(a));
}

/// Root at (100,100) 600x500 with a focused movable nested window
fn root_with_nested(x: i32, y: i32, width: i32, height: i32) -> (Gui, ObjectId, ObjectId) {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 100, 100, 600, 500)).unwrap();
    let nested = gui.create_window(&window_config("nested", x, y, width, height)).unwrap();
    gui.attach(root, nested, Anchor::Movable).unwrap();
    assert!(is_focused(&gui, root));
    assert!(is_focused(&gui, nested));
    assert!(layer(&gui, nested) > layer(&gui, root));
    (gui, root, nested)
}

#[test]
fn test_title_press_over_parent_drags_nested_window() {
    let (mut gui, root, nested) = root_with_nested(100, 100, 300, 250);

    // Both title bars lie under the press; the nested window is on top
    move_to(&mut gui, 150, 110);
    primary(&mut gui, ButtonAction::Pressed);
    move_to(&mut gui, 200, 160);
    gui.update();

    assert_eq!(gui.window_manager().gestures.active().unwrap().window, nested);
    assert_eq!(rect(&gui, nested).position(), Point::new(150, 150));
    assert_eq!(rect(&gui, root).position(), Point::new(100, 100));

    primary(&mut gui, ButtonAction::Released);
    assert!(gui.window_manager().gestures.active().is_none());
}

#[test]
fn test_shared_hot_zone_resizes_upper_window() {
    // Right edges of both windows end at x=700
    let (mut gui, root, nested) = root_with_nested(400, 300, 300, 250);

    move_to(&mut gui, 705, 400);
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.window_manager().gestures.active().unwrap().window, nested);
    assert_eq!(gui.cursor(), CursorIcon::ResizeHorizontal);

    move_to(&mut gui, 655, 400);
    gui.update();
    assert_eq!(rect(&gui, nested), Rect::new(400, 300, 250, 250));
    assert_eq!(rect(&gui, root), Rect::new(100, 100, 600, 500));
    primary(&mut gui, ButtonAction::Released);
}

#[test]
fn test_gesture_suppresses_hover_in_other_windows() {
    let (mut gui, root, nested) = root_with_nested(400, 300, 300, 250);
    let close = gui.registry().window(nested).unwrap().controls().close.unwrap();
    let close_rect = rect(&gui, close);
    let over_close = (close_rect.x + close_rect.width / 2, close_rect.y + close_rect.height / 2);

    // East edge of the root, clear of the nested window's hot zones
    move_to(&mut gui, 705, 150);
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.window_manager().gestures.active().unwrap().window, root);
    assert!(!gui.window_manager().is_free_to_interact(nested));

    move_to(&mut gui, 708, 400);
    let hover = |gui: &Gui, id| gui.registry().window(id).unwrap().gesture.hover;
    assert_eq!(hover(&gui, root), Some(ResizeHandle::E));
    assert_eq!(hover(&gui, nested), None);

    move_to(&mut gui, over_close.0, over_close.1);
    let hovered = |gui: &Gui| match gui.registry().widget(close) {
        Some(Widget::Button(button)) => button.is_hovered(),
        _ => false,
    };
    assert!(!hovered(&gui));

    primary(&mut gui, ButtonAction::Released);
    move_to(&mut gui, over_close.0, over_close.1);
    assert!(hovered(&gui));
    assert!(!gui.read_press(close));
}

#[test]
fn test_east_resize_at_surface_edge_keeps_left_edge() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("wide", 100, 100, 400, 300)).unwrap();

    move_to(&mut gui, 505, 250);
    primary(&mut gui, ButtonAction::Pressed);
    move_to(&mut gui, 1505, 250);
    gui.update();

    assert_eq!(rect(&gui, id), Rect::new(100, 100, 1180, 300));
    primary(&mut gui, ButtonAction::Released);
}

#[test]
fn test_west_resize_at_surface_edge_keeps_right_edge() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("left", 200, 100, 400, 300)).unwrap();

    move_to(&mut gui, 195, 250);
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.cursor(), CursorIcon::ResizeHorizontal);
    move_to(&mut gui, -300, 250);
    gui.update();

    assert_eq!(rect(&gui, id), Rect::new(0, 100, 600, 300));
    primary(&mut gui, ButtonAction::Released);
}

#[test]
fn test_north_resize_inside_parent_keeps_bottom_edge() {
    let (mut gui, _, nested) = root_with_nested(300, 300, 300, 250);

    move_to(&mut gui, 450, 295);
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.cursor(), CursorIcon::ResizeVertical);
    move_to(&mut gui, 450, -100);
    gui.update();

    // Parent rectangle starts at y=100
    assert_eq!(rect(&gui, nested), Rect::new(300, 100, 300, 450));
    primary(&mut gui, ButtonAction::Released);
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_anchor_layout_is_idempotent() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(id, icon, Anchor::Center).unwrap();

    // Interior (101, 134, 398, 265), icon 58x32
    assert_eq!(rect(&gui, icon).position(), Point::new(271, 250));

    gui.set_anchor(icon, Anchor::Center).unwrap();
    gui.set_position(id, Point::new(100, 100)).unwrap();
    assert_eq!(rect(&gui, icon).position(), Point::new(271, 250));

    gui.set_anchor(icon, Anchor::BottomRight).unwrap();
    assert_eq!(rect(&gui, icon).position(), Point::new(441, 367));
}

#[test]
fn test_free_children_stay_inside_window() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(id, icon, Anchor::Free).unwrap();

    gui.set_position(icon, Point::new(-1000, -1000)).unwrap();
    assert_eq!(rect(&gui, icon).position(), Point::new(100, 100));

    gui.set_position(id, Point::new(300, 300)).unwrap();
    assert!(rect(&gui, id).contains_rect(&rect(&gui, icon)));

    gui.set_position(icon, Point::new(5000, 5000)).unwrap();
    assert!(rect(&gui, id).contains_rect(&rect(&gui, icon)));
}

#[test]
fn test_top_level_windows_stay_on_surface() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();

    gui.set_position(id, Point::new(-200, 5000)).unwrap();
    assert_eq!(rect(&gui, id).position(), Point::new(0, 420));

    gui.handle_event(&InputEvent::SurfaceResize { width: 800, height: 600 });
    assert_eq!(gui.surface(), Size::new(800, 600));
    assert_eq!(rect(&gui, id).position(), Point::new(0, 300));
}

#[test]
fn test_surface_shrink_fits_oversized_windows() {
    let mut gui = Gui::default();
    let big = gui.create_window(&window_config("big", 100, 50, 1000, 600)).unwrap();
    let small = gui.create_window(&window_config("small", 500, 300, 300, 250)).unwrap();

    gui.handle_event(&InputEvent::SurfaceResize { width: 800, height: 500 });

    assert_eq!(rect(&gui, big), Rect::new(0, 0, 800, 500));
    assert_eq!(rect(&gui, small), Rect::new(500, 250, 300, 250));
}

#[test]
fn test_wheel_scrolls_marked_children() {
    let mut gui = Gui::default();
    let id = gui
        .create_window(&WindowConfig {
            wheel_scroll: true,
            ..window_config("list", 100, 100, 400, 300)
        })
        .unwrap();
    let row = gui.create_image("row", "row.png", 0).unwrap();
    let fixed = gui.create_image("fixed", "fixed.png", 0).unwrap();
    gui.attach(id, row, Anchor::TopLeft).unwrap();
    gui.attach(id, fixed, Anchor::TopRight).unwrap();
    gui.set_scrollable(id, row, true).unwrap();

    move_to(&mut gui, 300, 250);
    gui.handle_event(&InputEvent::Scroll { dx: 0.0, dy: 1.0 });

    assert_eq!(rect(&gui, row).position(), Point::new(101, 166));
    assert_eq!(rect(&gui, fixed).position(), Point::new(441, 134));
}

#[test]
fn test_registry_stays_consistent() {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 0, 0, 600, 600)).unwrap();
    let child = gui.create_window(&window_config("child", 0, 0, 300, 300)).unwrap();
    gui.attach(root, child, Anchor::Movable).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(child, icon, Anchor::Top).unwrap();
    gui.set_child_layer(icon, 3).unwrap();
    gui.focus_window(root).unwrap();
    gui.focus_window(child).unwrap();
    gui.destroy(icon).unwrap();
    gui.update();

    assert!(gui.registry().is_consistent());
    assert_eq!(gui.registry().desync_events(), 0);
}

// =============================================================================
// Window Operation Tests
// =============================================================================

#[test]
fn test_maximize_and_split_restore_rect() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();

    gui.maximize(id).unwrap();
    assert_eq!(rect(&gui, id), Rect::new(0, 0, 1280, 720));
    let window = gui.registry().window(id).unwrap();
    assert_eq!(window.state(), WindowState::Maximized);
    let maximize = window.controls().maximize.unwrap();
    let split = window.controls().split.unwrap();
    assert!(!gui.registry().visual(maximize).unwrap().is_visible());
    assert!(gui.registry().visual(split).unwrap().is_visible());

    gui.split(id).unwrap();
    assert_eq!(rect(&gui, id), Rect::new(100, 100, 400, 300));
    assert_eq!(gui.registry().window(id).unwrap().state(), WindowState::Normal);
    assert!(gui.registry().visual(maximize).unwrap().is_visible());
    assert!(!gui.registry().visual(split).unwrap().is_visible());
}

#[test]
fn test_maximized_window_follows_surface() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    gui.maximize(id).unwrap();

    gui.handle_event(&InputEvent::SurfaceResize { width: 800, height: 600 });
    assert_eq!(rect(&gui, id), Rect::new(0, 0, 800, 600));
}

#[test]
fn test_maximize_control_click() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    gui.update();

    // Maximize slot at (383, 101)
    click(&mut gui, 410, 117);
    gui.update();
    assert_eq!(gui.registry().window(id).unwrap().state(), WindowState::Maximized);
}

#[test]
fn test_minimize_and_restore() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(id, icon, Anchor::Center).unwrap();

    gui.minimize(id).unwrap();
    assert!(!gui.registry().visual(id).unwrap().is_visible());
    assert!(!gui.registry().visual(icon).unwrap().is_visible());
    assert!(!is_focused(&gui, id));

    gui.restore_window(id).unwrap();
    assert!(gui.registry().visual(id).unwrap().is_visible());
    assert!(gui.registry().visual(icon).unwrap().is_visible());
    assert!(is_focused(&gui, id));
    assert_eq!(gui.registry().window(id).unwrap().state(), WindowState::Normal);
}

#[test]
fn test_close_control_destroys_subtree_and_releases_textures() {
    let mut gui = Gui::default();
    let mut backend = HeadlessBackend::new();
    let root = gui.create_window(&window_config("doomed", 100, 100, 400, 300)).unwrap();
    let child = gui.create_window(&window_config("inner", 0, 0, 225, 225)).unwrap();
    gui.attach(root, child, Anchor::BottomLeft).unwrap();
    let icon = gui.create_image("icon", "icon.png", 0).unwrap();
    gui.attach(root, icon, Anchor::TopRight).unwrap();
    gui.focus_window(root).unwrap();

    gui.update();
    assert!(gui.render(&mut backend));
    assert!(backend.live_textures() > 0);

    // Close slot at (441, 101)
    click(&mut gui, 470, 117);
    gui.update();

    assert!(gui.registry().is_empty());
    assert!(gui.window_manager().is_empty());
    assert!(gui.id_of("inner").is_none());
    assert!(gui.id_of("doomed#close").is_none());
    assert_eq!(gui.cursor(), CursorIcon::Default);

    gui.render(&mut backend);
    assert_eq!(backend.live_textures(), 0);
}

#[test]
fn test_remove_child_makes_window_top_level() {
    let mut gui = Gui::default();
    let root = gui.create_window(&window_config("root", 0, 0, 500, 500)).unwrap();
    let child = gui.create_window(&window_config("child", 0, 0, 225, 225)).unwrap();
    gui.attach(root, child, Anchor::Center).unwrap();

    assert_eq!(gui.remove_child(root, child), Ok(Anchor::Center));
    assert_eq!(gui.parent_of(child), None);
    assert!(gui.registry().window(child).unwrap().is_top_level());
    assert!(gui.window_manager().top_level(gui.registry()).contains(&child));
}

// =============================================================================
// Widget Tests
// =============================================================================

#[test]
fn test_button_click_reads_once() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let config = ButtonConfig::new(["ok_normal.png", "ok_hover.png", "ok_pressed.png"]);
    let button = gui.create_button("ok", &config, 0).unwrap();
    gui.attach(id, button, Anchor::Center).unwrap();
    assert_eq!(rect(&gui, button).position(), Point::new(271, 250));

    move_to(&mut gui, 300, 266);
    assert_eq!(gui.frame(button), Some(1));
    primary(&mut gui, ButtonAction::Pressed);
    assert_eq!(gui.frame(button), Some(2));
    primary(&mut gui, ButtonAction::Released);

    assert!(gui.read_press(button));
    assert!(!gui.read_press(button));
}

#[test]
fn test_button_release_outside_does_not_press() {
    let mut gui = Gui::default();
    let id = gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();
    let config = ButtonConfig::new(["ok_normal.png", "ok_hover.png", "ok_pressed.png"]);
    let button = gui.create_button("ok", &config, 0).unwrap();
    gui.attach(id, button, Anchor::Center).unwrap();

    move_to(&mut gui, 300, 266);
    primary(&mut gui, ButtonAction::Pressed);
    move_to(&mut gui, 200, 200);
    primary(&mut gui, ButtonAction::Released);

    assert!(!gui.read_press(button));
    assert_eq!(gui.frame(button), Some(0));
}

#[test]
fn test_typing_requires_focused_window() {
    let mut gui = Gui::default();
    let console = gui.create_window(&window_config("console", 0, 0, 400, 300)).unwrap();
    let input = gui
        .create_writable_text_box("input", TextConfig::default(), EditMode::Console, 0)
        .unwrap();
    gui.attach(console, input, Anchor::TopLeft).unwrap();
    gui.create_window(&window_config("other", 600, 0, 400, 300)).unwrap();

    press_key(&mut gui, Key::X);
    gui.update();
    assert_eq!(gui.text(input).as_deref(), Some(""));

    gui.focus_window(console).unwrap();
    press_key(&mut gui, Key::H);
    press_key(&mut gui, Key::I);
    gui.update();
    assert_eq!(gui.text(input).as_deref(), Some("hi"));

    press_key(&mut gui, Key::Enter);
    gui.update();
    assert_eq!(gui.take_submitted(input), vec!["hi".to_string()]);
    assert_eq!(gui.text(input).as_deref(), Some(""));
}

#[test]
fn test_animation_frames() {
    let mut gui = Gui::default();
    let anim = gui.create_animation("spinner", &["s0.png", "s1.png", "s2.png"], 0).unwrap();

    assert_eq!(gui.frame(anim), Some(0));
    gui.set_frame(anim, 2).unwrap();
    assert_eq!(gui.frame(anim), Some(2));
    assert!(matches!(
        gui.set_frame(anim, 3),
        Err(GuiError::InvalidFrame { frame: 3, frames: 3, .. })
    ));
    assert_eq!(gui.frame(anim), Some(2));

    let shown = gui.id_of("spinner#2").unwrap();
    let hidden = gui.id_of("spinner#0").unwrap();
    assert!(gui.registry().visual(shown).unwrap().is_visible());
    assert!(!gui.registry().visual(hidden).unwrap().is_visible());
}

#[test]
fn test_duplicate_names_rejected() {
    let mut gui = Gui::default();
    gui.create_window(&window_config("main", 0, 0, 400, 300)).unwrap();
    assert!(matches!(
        gui.create_image("main", "x.png", 0),
        Err(GuiError::DuplicateName(_))
    ));
    assert!(matches!(
        gui.create_window(&window_config("main", 0, 0, 400, 300)),
        Err(GuiError::DuplicateName(_))
    ));
    assert!(gui.registry().is_consistent());
}

// =============================================================================
// Snapshot and Frame Tests
// =============================================================================

#[test]
fn test_snapshot_round_trip_through_json() {
    let mut gui = Gui::default();
    let editor = gui.create_window(&window_config("editor", 50, 60, 500, 400)).unwrap();
    let tools = gui.create_window(&window_config("tools", 600, 100, 300, 300)).unwrap();
    gui.maximize(tools).unwrap();

    let json = serde_json::to_string(&gui.snapshot()).unwrap();

    gui.set_position(editor, Point::new(200, 200)).unwrap();
    gui.split(tools).unwrap();
    gui.minimize(editor).unwrap();

    let snapshot: LayoutSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.window("tools").unwrap().rect, Rect::new(600, 100, 300, 300));
    assert_eq!(gui.apply_snapshot(&snapshot), 2);

    assert_eq!(rect(&gui, editor), Rect::new(50, 60, 500, 400));
    assert!(gui.registry().visual(editor).unwrap().is_visible());
    assert_eq!(gui.registry().window(tools).unwrap().state(), WindowState::Maximized);

    gui.split(tools).unwrap();
    assert_eq!(rect(&gui, tools), Rect::new(600, 100, 300, 300));
}

#[test]
fn test_surface_close_requests_shutdown() {
    let mut gui = Gui::default();
    assert!(!gui.close_requested());
    gui.handle_event(&InputEvent::SurfaceClose);
    assert!(gui.close_requested());
}

#[test]
fn test_redraw_settles_after_quiet_frames() {
    let mut gui = Gui::new(GuiConfig::default());
    let mut backend = HeadlessBackend::new();
    gui.create_window(&window_config("main", 100, 100, 400, 300)).unwrap();

    for _ in 0..5 {
        gui.update();
        gui.render(&mut backend);
    }
    assert!(!gui.redraw_needed());
    let frames = backend.frames();
    gui.update();
    assert!(!gui.render(&mut backend));
    assert_eq!(backend.frames(), frames);

    move_to(&mut gui, 10, 10);
    assert!(gui.redraw_needed());
    gui.update();
    assert!(gui.render(&mut backend));
    assert_eq!(backend.frames(), frames + 1);
}

#[test]
fn test_continuous_redraw_always_draws() {
    let mut gui = Gui::default();
    let mut backend = HeadlessBackend::new();
    gui.set_continuous_redraw(true);
    for _ in 0..5 {
        gui.update();
        assert!(gui.render(&mut backend));
    }
    assert_eq!(backend.frames(), 5);
}
