use super::*;
use crate::draw::{BLACK, Shape, ShapeKind, ShapeStyle};
use crate::input::{MouseButton, Tool};
use crate::util::{Point, Rect};

fn create_test_input_state() -> InputState {
    InputState::with_defaults(ShapeStyle::new(BLACK, None), 3.0)
}

fn drag(state: &mut InputState, path: &[(f64, f64)]) {
    let (first, rest) = path.split_first().expect("non-empty path");
    state.on_mouse_press(MouseButton::Left, first.0, first.1);
    for &(x, y) in rest {
        state.on_mouse_motion(x, y);
    }
    let last = path.last().unwrap();
    state.on_mouse_release(MouseButton::Left, last.0, last.1);
}

fn event_types(state: &mut InputState) -> Vec<String> {
    state
        .take_events()
        .into_iter()
        .map(|e| e.event_type)
        .collect()
}

#[test]
fn test_default_tool_is_select() {
    let state = create_test_input_state();
    assert_eq!(state.active_tool(), Tool::Select);
    assert!(state.frame.is_empty());
}

#[test]
fn test_pen_stroke_records_points_and_count() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Pen);
    state.take_events();

    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_motion(10.0, 0.0);
    state.on_mouse_motion(10.0, 10.0);
    state.on_mouse_release(MouseButton::Left, 10.0, 10.0);

    let item = state.frame.iter().next().expect("path committed");
    assert_eq!(item.shape.point_count(), 3);

    let events = state.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, "pen_start");
    assert_eq!(events[1].event_type, "pen_end");
    assert_eq!(events[1].fields.point_count, Some(3));
    assert_eq!(state.take_committed(), Some(ShapeKind::Freehand));
    assert_eq!(state.take_committed(), None);
}

#[test]
fn test_pen_click_without_motion_gives_single_point_path() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Pen);
    drag(&mut state, &[(5.0, 5.0)]);

    let item = state.frame.iter().next().unwrap();
    assert_eq!(item.shape.point_count(), 1);
}

#[test]
fn test_shape_visible_while_drawing() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Ellipse);
    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_motion(20.0, 10.0);

    assert_eq!(state.frame.len(), 1);
    assert!(matches!(state.state, GestureState::Drawing { .. }));
}

#[test]
fn test_rect_reverse_drag_normalizes() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(50.0, 50.0), (10.0, 10.0)]);

    let item = state.frame.iter().next().unwrap();
    assert_eq!(
        item.shape.bounding_box(),
        Rect {
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 40.0
        }
    );
    let events = state.take_events();
    let end = events.last().unwrap();
    assert_eq!(end.event_type, "rect_end");
    assert_eq!(end.fields.notes.as_deref(), Some("x=10.0;y=10.0;w=40.0;h=40.0"));
}

#[test]
fn test_boxed_shapes_never_have_negative_size() {
    let drags = [
        [(0.0, 0.0), (-30.0, 12.0), (-5.0, -40.0)],
        [(10.0, 10.0), (10.0, 10.0), (9.5, 30.0)],
        [(-3.0, 7.0), (100.0, -100.0), (-50.0, 2.0)],
    ];
    for tool in [Tool::Rect, Tool::Ellipse] {
        for path in &drags {
            let mut state = create_test_input_state();
            state.set_tool(tool);
            drag(&mut state, path);
            let bounds = state.frame.iter().next().unwrap().shape.bounding_box();
            assert!(bounds.width >= 0.0 && bounds.height >= 0.0, "{tool} {path:?}");
        }
    }
}

#[test]
fn test_line_end_logs_both_endpoints() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Line);
    state.take_events();
    drag(&mut state, &[(1.0, 2.0), (30.0, 40.5)]);

    let events = state.take_events();
    assert_eq!(events[0].event_type, "line_start");
    assert_eq!(events[1].event_type, "line_end");
    assert_eq!(
        events[1].fields.notes.as_deref(),
        Some("x1=1.0;y1=2.0;x2=30.0;y2=40.5")
    );
    assert_eq!(events[1].fields.item_type.as_deref(), Some("line"));
}

#[test]
fn test_eraser_drag_removes_each_shape_in_order() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Ellipse);
    drag(&mut state, &[(100.0, 0.0), (120.0, 20.0)]);
    state.set_tool(Tool::Eraser);
    state.take_events();

    assert!(state.on_mouse_press(MouseButton::Left, 10.0, 10.0));
    assert!(!state.on_mouse_motion(60.0, 10.0));
    assert!(state.on_mouse_motion(110.0, 10.0));
    state.on_mouse_release(MouseButton::Left, 110.0, 10.0);

    assert!(state.frame.is_empty());
    let events = state.take_events();
    let erased: Vec<_> = events
        .iter()
        .map(|e| (e.event_type.as_str(), e.fields.item_type.as_deref()))
        .collect();
    assert_eq!(erased, vec![("erase", Some("rect")), ("erase", Some("ellipse"))]);
}

#[test]
fn test_eraser_ignores_motion_without_button() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Eraser);

    assert!(!state.on_mouse_motion(10.0, 10.0));
    assert_eq!(state.frame.len(), 1);

    // Any held button erases.
    state.on_mouse_press(MouseButton::Right, 50.0, 50.0);
    assert!(state.on_mouse_motion(10.0, 10.0));
    assert!(state.frame.is_empty());
}

#[test]
fn test_eraser_press_on_empty_canvas_is_not_accepted() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Eraser);
    state.take_events();
    assert!(!state.on_mouse_press(MouseButton::Left, 5.0, 5.0));
    assert!(state.take_events().is_empty());
}

#[test]
fn test_select_drag_moves_shape_and_logs() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Select);
    state.take_events();

    drag(&mut state, &[(10.0, 10.0), (15.0, 12.0), (40.0, 30.0)]);

    let item = state.frame.iter().next().unwrap();
    assert_eq!(item.shape.bounding_box().x, 30.0);
    assert_eq!(item.shape.bounding_box().y, 20.0);
    assert!(state.selection.contains(&item.id));

    let events = state.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "moved");
    assert_eq!(events[0].fields.notes.as_deref(), Some("dx=30.0;dy=20.0"));
}

#[test]
fn test_select_click_within_threshold_is_not_a_move() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Select);
    state.take_events();

    drag(&mut state, &[(10.0, 10.0), (11.0, 11.0)]);
    assert!(state.take_events().is_empty());
    assert_eq!(state.state, GestureState::Idle);
}

#[test]
fn test_select_on_empty_canvas_clears_selection() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Select);
    drag(&mut state, &[(5.0, 5.0)]);
    assert_eq!(state.selection.len(), 1);

    drag(&mut state, &[(500.0, 500.0), (520.0, 520.0)]);
    assert!(state.selection.is_empty());
    assert!(!event_types(&mut state).contains(&"moved".to_string()));
}

#[test]
fn test_select_picks_topmost_overlapping_shape() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (50.0, 50.0)]);
    drag(&mut state, &[(10.0, 10.0), (60.0, 60.0)]);
    let top = state.frame.iter().last().unwrap().id;

    state.set_tool(Tool::Select);
    state.on_mouse_press(MouseButton::Left, 30.0, 30.0);
    assert_eq!(
        state.state,
        GestureState::Selecting {
            target: Some(top),
            press: Point::new(30.0, 30.0),
            last: Point::new(30.0, 30.0),
        }
    );
}

#[test]
fn test_tool_switch_mid_drag_freezes_shape() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    state.take_events();
    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_motion(30.0, 30.0);

    state.set_tool(Tool::Pen);
    assert_eq!(state.state, GestureState::Idle);

    // Motion after the switch must not reach the abandoned rectangle.
    state.on_mouse_motion(90.0, 90.0);
    state.on_mouse_release(MouseButton::Left, 90.0, 90.0);

    let item = state.frame.iter().next().unwrap();
    assert_eq!(item.shape.bounding_box().width, 30.0);
    assert_eq!(state.take_committed(), None);
    assert_eq!(event_types(&mut state), vec!["rect_start", "tool_change"]);
}

#[test]
fn test_set_same_tool_is_not_logged() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Select);
    assert!(state.take_events().is_empty());

    state.set_tool(Tool::Line);
    let events = state.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].fields.tool.as_deref(), Some("line"));
}

#[test]
fn test_right_button_does_not_start_drawing() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Pen);
    assert!(!state.on_mouse_press(MouseButton::Right, 0.0, 0.0));
    assert!(state.frame.is_empty());
}

#[test]
fn test_new_shapes_use_current_style() {
    let mut state = create_test_input_state();
    state.style.fill = Some(crate::draw::RED);
    state.set_tool(Tool::Ellipse);
    drag(&mut state, &[(0.0, 0.0), (10.0, 10.0)]);

    match &state.frame.iter().next().unwrap().shape {
        Shape::Ellipse { style, .. } => assert_eq!(style.fill, Some(crate::draw::RED)),
        other => panic!("expected ellipse, got {other:?}"),
    }
}

#[test]
fn test_non_finite_motion_keeps_box_normalized() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_motion(20.0, 10.0);
    assert!(!state.on_mouse_motion(f64::NAN, 10.0));
    assert!(!state.on_mouse_motion(5.0, f64::INFINITY));
    state.on_mouse_release(MouseButton::Left, f64::NAN, 10.0);

    let bounds = state.frame.iter().next().unwrap().shape.bounding_box();
    assert_eq!(
        bounds,
        Rect {
            x: 0.0,
            y: 0.0,
            width: 20.0,
            height: 10.0
        }
    );
    assert_eq!(state.state, GestureState::Idle);
    assert_eq!(state.take_committed(), Some(ShapeKind::Rect));
}

#[test]
fn test_non_finite_press_is_ignored() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Pen);
    state.take_events();

    assert!(!state.on_mouse_press(MouseButton::Left, f64::NAN, 0.0));
    assert!(state.frame.is_empty());
    assert_eq!(state.state, GestureState::Idle);
    assert!(state.take_events().is_empty());
}

#[test]
fn test_select_release_at_non_finite_uses_last_position() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Rect);
    drag(&mut state, &[(0.0, 0.0), (20.0, 20.0)]);
    state.set_tool(Tool::Select);
    state.take_events();

    state.on_mouse_press(MouseButton::Left, 10.0, 10.0);
    state.on_mouse_motion(20.0, 15.0);
    state.on_mouse_release(MouseButton::Left, f64::NAN, f64::NAN);

    let events = state.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].fields.notes.as_deref(), Some("dx=10.0;dy=5.0"));
    assert_eq!(state.state, GestureState::Idle);
}

#[test]
fn test_other_button_release_does_not_end_left_drag() {
    let mut state = create_test_input_state();
    state.set_tool(Tool::Line);
    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_press(MouseButton::Right, 5.0, 5.0);
    assert!(!state.on_mouse_release(MouseButton::Right, 5.0, 5.0));
    assert!(matches!(state.state, GestureState::Drawing { .. }));

    state.on_mouse_motion(30.0, 0.0);
    assert!(state.on_mouse_release(MouseButton::Left, 30.0, 0.0));
    assert_eq!(state.state, GestureState::Idle);
    assert_eq!(
        state.frame.iter().next().unwrap().shape.bounding_box().width,
        30.0
    );
}
