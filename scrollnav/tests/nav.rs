use std::time::{Duration, Instant};

use scrollnav::{
    find_element, layout, Element, Event, NavOptions, Overflow, Rect, ScrollNav, ScrollState, Size,
};

const SETTLE: Duration = Duration::from_millis(300);
const QUIET: Duration = Duration::from_millis(600);

/// Host tree with a horizontal region of `items` children, `item_width` cells
/// each, inside a `region_width`-cell viewport. Gap-free so the arithmetic of
/// the scenarios stays whole.
fn host(region_width: u16, items: usize, item_width: u16) -> Element {
    Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(Element::text("above").id("above"))
        .child(
            Element::row()
                .id("region")
                .width(Size::Fixed(region_width))
                .height(Size::Fixed(3))
                .overflow(Overflow::Scroll)
                .children((0..items).map(|i| {
                    Element::box_()
                        .id(format!("item-{i}"))
                        .width(Size::Fixed(item_width))
                        .height(Size::Fill)
                })),
        )
        .child(Element::text("below").id("below"))
}

fn setup(
    region_width: u16,
    items: usize,
    item_width: u16,
    options: NavOptions,
    viewport: Rect,
) -> (Element, ScrollState, ScrollNav, Instant) {
    let mut root = host(region_width, items, item_width);
    let mut scroll = ScrollState::new();
    let t0 = Instant::now();
    let nav = ScrollNav::new(&mut root, "region", options, &mut scroll, viewport, t0);
    (root, scroll, nav, t0)
}

fn disabled(root: &Element, id: &str) -> Option<bool> {
    find_element(root, id).map(|el| el.disabled)
}

/// Click a control, play the smooth scroll out, and feed the settle event
/// back into the component. Returns the time after settling.
fn click_and_settle(
    nav: &mut ScrollNav,
    target: &str,
    root: &mut Element,
    scroll: &mut ScrollState,
    viewport: Rect,
    at: Instant,
) -> Instant {
    let click = Event::Click {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: scrollnav::MouseButton::Left,
    };
    nav.process_events(&[click], root, scroll, viewport, at);
    let settled_at = at + SETTLE;
    let settled = scroll.tick(settled_at);
    nav.process_events(&settled, root, scroll, viewport, settled_at);
    settled_at
}

// ============================================================================
// Structure building
// ============================================================================

#[test]
fn test_wrapper_takes_region_position() {
    let (root, _, nav, _) = setup(30, 10, 10, NavOptions::default(), Rect::from_size(80, 24));

    // The wrapper sits where the region used to, between its old siblings
    assert_eq!(
        root.child_ids(),
        vec!["above", nav.wrapper_id(), "below"]
    );

    let wrapper = find_element(&root, nav.wrapper_id()).unwrap();
    assert!(wrapper.has_class("scroll-nav"));
    let region = find_element(&root, "region").unwrap();
    assert!(region.has_class("scroll-nav-region"));
}

#[test]
fn test_missing_target_degrades_silently() {
    let mut root = host(30, 10, 10);
    let mut scroll = ScrollState::new();
    let t0 = Instant::now();

    let mut nav = ScrollNav::new(
        &mut root,
        "nope",
        NavOptions::default(),
        &mut scroll,
        Rect::from_size(80, 24),
        t0,
    );

    assert!(!nav.attached());
    assert_eq!(root.child_ids(), vec!["above", "region", "below"]);

    // Events keep being a no-op rather than a panic
    let resize = Event::Resize {
        width: 100,
        height: 30,
    };
    nav.process_events(
        &[resize],
        &mut root,
        &mut scroll,
        Rect::from_size(100, 30),
        t0,
    );
    nav.tick(t0 + QUIET, &mut root, &mut scroll, Rect::from_size(100, 30));
    assert!(!nav.attached());
}

#[test]
fn test_custom_icons_reach_buttons() {
    let options = NavOptions {
        prev_icon: "<<".into(),
        next_icon: ">>".into(),
        breakpoint: None,
    };
    let (root, _, nav, _) = setup(30, 10, 10, options, Rect::from_size(80, 24));

    let prev = find_element(&root, nav.prev_id()).unwrap();
    assert!(matches!(&prev.content, scrollnav::Content::Text(t) if t == "<<"));
    assert!(prev.has_class("scroll-nav-button"));
}

// ============================================================================
// Overflow evaluation (P1, P2, P3)
// ============================================================================

#[test]
fn test_overflow_attaches_both_controls() {
    let (root, _, nav, _) = setup(30, 10, 10, NavOptions::default(), Rect::from_size(80, 24));

    assert!(nav.attached());
    let wrapper = find_element(&root, nav.wrapper_id()).unwrap();
    assert_eq!(
        wrapper.child_ids(),
        vec![nav.prev_id(), "region", nav.next_id()]
    );
}

#[test]
fn test_no_overflow_means_no_controls() {
    let (root, _, nav, _) = setup(30, 2, 10, NavOptions::default(), Rect::from_size(80, 24));

    assert!(!nav.attached());
    assert!(find_element(&root, nav.prev_id()).is_none());
    let wrapper = find_element(&root, nav.wrapper_id()).unwrap();
    assert_eq!(wrapper.child_ids(), vec!["region"]);
}

#[test]
fn test_breakpoint_suppresses_controls() {
    let options = NavOptions {
        breakpoint: Some(600),
        ..Default::default()
    };
    let (root, _, nav, _) = setup(300, 10, 100, options, Rect::from_size(500, 24));

    assert!(!nav.attached());
    let wrapper = find_element(&root, nav.wrapper_id()).unwrap();
    assert_eq!(wrapper.child_ids(), vec!["region"]);
}

#[test]
fn test_breakpoint_still_resets_scroll() {
    let options = NavOptions {
        breakpoint: Some(40),
        ..Default::default()
    };
    let viewport = Rect::from_size(80, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(30, 10, 10, options, viewport);

    // Scroll away, then shrink the viewport below the breakpoint
    let next_id = nav.next_id().to_string();
    click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, t0);
    assert!(scroll.get("region") > 0);

    let narrow = Rect::from_size(30, 24);
    nav.reevaluate(&mut root, &mut scroll, narrow, t0 + Duration::from_secs(1));

    assert!(!nav.attached());
    assert_eq!(scroll.get("region"), 0);
}

#[test]
fn test_reevaluate_reattaches_after_growth() {
    let viewport = Rect::from_size(80, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(30, 2, 10, NavOptions::default(), viewport);
    assert!(!nav.attached());

    // Narrow the region so the same content now overflows
    find_element_mut_width(&mut root, "region", Size::Fixed(15));
    nav.reevaluate(&mut root, &mut scroll, viewport, t0);

    assert!(nav.attached());
}

fn find_element_mut_width(root: &mut Element, id: &str, width: Size) {
    if let Some(el) = scrollnav::find_element_mut(root, id) {
        el.width = width;
    }
}

// ============================================================================
// Enablement (P4, P5, P6, P7)
// ============================================================================

#[test]
fn test_enablement_at_start() {
    // Scenario: scrollable 1000, visible 300, offset 0
    let (root, _, nav, _) = setup(300, 10, 100, NavOptions::default(), Rect::from_size(400, 24));

    assert_eq!(disabled(&root, nav.prev_id()), Some(true));
    assert_eq!(disabled(&root, nav.next_id()), Some(false));
}

#[test]
fn test_enablement_in_middle() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(300, 10, 100, NavOptions::default(), viewport);

    let next_id = nav.next_id().to_string();
    click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, t0);
    assert_eq!(scroll.get("region"), 150);

    assert_eq!(disabled(&root, nav.prev_id()), Some(false));
    assert_eq!(disabled(&root, nav.next_id()), Some(false));
}

#[test]
fn test_enablement_at_end() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(300, 10, 100, NavOptions::default(), viewport);

    // Click next until the host clamps the offset at 700:
    // 150, 300, 450, 600, then 750 clamped to 700
    let next_id = nav.next_id().to_string();
    let mut at = t0;
    for expected in [150, 300, 450, 600, 700] {
        at = click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, at);
        assert_eq!(scroll.get("region"), expected);
    }

    // offset + visible == scrollable, exactly
    assert_eq!(disabled(&root, nav.prev_id()), Some(false));
    assert_eq!(disabled(&root, nav.next_id()), Some(true));
}

#[test]
fn test_prev_walks_back_from_end() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(300, 10, 100, NavOptions::default(), viewport);

    let next_id = nav.next_id().to_string();
    let prev_id = nav.prev_id().to_string();
    let mut at = t0;
    for _ in 0..5 {
        at = click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, at);
    }
    assert_eq!(scroll.get("region"), 700);

    at = click_and_settle(&mut nav, &prev_id, &mut root, &mut scroll, viewport, at);
    assert_eq!(scroll.get("region"), 550);
    assert_eq!(disabled(&root, nav.prev_id()), Some(false));
    assert_eq!(disabled(&root, nav.next_id()), Some(false));
}

#[test]
fn test_enablement_is_idempotent() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, scroll, mut nav, _) = setup(300, 10, 100, NavOptions::default(), viewport);

    let result = layout(&root, viewport);
    nav.update_enablement(&mut root, &scroll, &result);
    let first = (disabled(&root, nav.prev_id()), disabled(&root, nav.next_id()));

    nav.update_enablement(&mut root, &scroll, &result);
    let second = (disabled(&root, nav.prev_id()), disabled(&root, nav.next_id()));

    assert_eq!(first, second);
    assert_eq!(first, (Some(true), Some(false)));
    assert!(nav.attached());
}

// ============================================================================
// Resize debouncing (P8)
// ============================================================================

#[test]
fn test_resize_burst_coalesces_into_one_reevaluation() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(300, 10, 100, NavOptions::default(), viewport);

    // Move away from zero so the re-evaluation's reset is observable
    let next_id = nav.next_id().to_string();
    let at = click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, t0);
    assert_eq!(scroll.get("region"), 150);

    let resize = Event::Resize {
        width: 400,
        height: 24,
    };
    let bursts = [
        at,
        at + Duration::from_millis(300),
        at + Duration::from_millis(550),
    ];
    for t in bursts {
        nav.process_events(&[resize.clone()], &mut root, &mut scroll, viewport, t);
        nav.tick(t, &mut root, &mut scroll, viewport);
    }

    // Deadlines from the first two events were cancelled
    nav.tick(at + Duration::from_millis(1100), &mut root, &mut scroll, viewport);
    assert_eq!(scroll.get("region"), 150);

    // Only the last event's deadline fires, and the reset settles exactly once
    nav.tick(at + Duration::from_millis(1150), &mut root, &mut scroll, viewport);
    assert_eq!(scroll.get("region"), 0);
    let settled = scroll.tick(at + Duration::from_millis(1150));
    assert_eq!(settled.len(), 1);

    // Nothing left pending
    nav.tick(at + Duration::from_secs(10), &mut root, &mut scroll, viewport);
    assert!(scroll.tick(at + Duration::from_secs(10)).is_empty());
}

// ============================================================================
// Multiple instances
// ============================================================================

#[test]
fn test_instances_keep_independent_state() {
    let viewport = Rect::from_size(80, 24);
    let mut root = Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .children(["one", "two"].map(|id| {
            Element::row()
                .id(id)
                .width(Size::Fixed(20))
                .height(Size::Fixed(3))
                .overflow(Overflow::Scroll)
                .children((0..5).map(|i| {
                    Element::box_()
                        .id(format!("{id}-item-{i}"))
                        .width(Size::Fixed(10))
                        .height(Size::Fill)
                }))
        }));
    let mut scroll = ScrollState::new();
    let t0 = Instant::now();

    let mut first = ScrollNav::new(&mut root, "one", NavOptions::default(), &mut scroll, viewport, t0);
    let mut second = ScrollNav::new(&mut root, "two", NavOptions::default(), &mut scroll, viewport, t0);
    assert!(first.attached());
    assert!(second.attached());

    // Clicking the first region's button moves only that region
    let next_id = first.next_id().to_string();
    click_and_settle(&mut first, &next_id, &mut root, &mut scroll, viewport, t0);
    assert_eq!(scroll.get("one"), 10);
    assert_eq!(scroll.get("two"), 0);

    // Each instance debounces the shared resize stream on its own
    let resize = Event::Resize {
        width: 80,
        height: 24,
    };
    let at = t0 + Duration::from_secs(1);
    first.process_events(&[resize.clone()], &mut root, &mut scroll, viewport, at);
    second.process_events(&[resize], &mut root, &mut scroll, viewport, at);
    let fired = at + QUIET;
    first.tick(fired, &mut root, &mut scroll, viewport);
    second.tick(fired, &mut root, &mut scroll, viewport);
    assert_eq!(scroll.get("one"), 0);
    assert_eq!(scroll.get("two"), 0);
}

// ============================================================================
// Disposal
// ============================================================================

#[test]
fn test_dispose_cancels_pending_reevaluation() {
    let viewport = Rect::from_size(400, 24);
    let (mut root, mut scroll, mut nav, t0) = setup(300, 10, 100, NavOptions::default(), viewport);

    let next_id = nav.next_id().to_string();
    let at = click_and_settle(&mut nav, &next_id, &mut root, &mut scroll, viewport, t0);
    assert_eq!(scroll.get("region"), 150);

    let resize = Event::Resize {
        width: 400,
        height: 24,
    };
    nav.process_events(&[resize.clone()], &mut root, &mut scroll, viewport, at);
    nav.dispose();

    // The pending debounce never fires
    nav.tick(at + Duration::from_secs(10), &mut root, &mut scroll, viewport);
    assert_eq!(scroll.get("region"), 150);

    // And new events are ignored
    nav.process_events(&[resize], &mut root, &mut scroll, viewport, at);
    let click = Event::Click {
        target: Some(next_id),
        x: 0,
        y: 0,
        button: scrollnav::MouseButton::Left,
    };
    nav.process_events(&[click], &mut root, &mut scroll, viewport, at);
    assert!(scroll.tick(at + Duration::from_secs(20)).is_empty());
    assert_eq!(scroll.get("region"), 150);
}
