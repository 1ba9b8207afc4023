use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CrosstermEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use scrollnav::{
    find_element, layout, Element, NavOptions, Overflow, Rect, ScrollNav, ScrollState, Size,
};
use simplelog::{Config, LevelFilter, SimpleLogger};

/// Deterministic walkthrough of the widget: build a card strip, wrap it in a
/// ScrollNav, then replay a click, a scroll settling, and a resize burst.
fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).expect("Failed to initialize logger");

    let mut root = ui();
    let mut scroll = ScrollState::new();
    let mut viewport = Rect::from_size(80, 24);
    let t0 = Instant::now();

    let mut nav = ScrollNav::new(
        &mut root,
        "cards",
        NavOptions {
            breakpoint: Some(40),
            ..Default::default()
        },
        &mut scroll,
        viewport,
        t0,
    );
    report("after setup", &root, &scroll, &nav);

    // Click the next button where the layout puts it
    let result = layout(&root, viewport);
    let rect = result.get(nav.next_id()).expect("next button laid out");
    let raw = vec![CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: rect.x,
        row: rect.y,
        modifiers: KeyModifiers::NONE,
    })];
    let events = scrollnav::translate(&raw, &root, &result);
    nav.process_events(&events, &mut root, &mut scroll, viewport, t0);

    // Let the smooth scroll play out and feed the settle event back in
    let t1 = t0 + Duration::from_millis(300);
    let settled = scroll.tick(t1);
    nav.process_events(&settled, &mut root, &mut scroll, viewport, t1);
    report("after next click settled", &root, &scroll, &nav);

    // A resize burst coalesces into a single re-evaluation
    for i in 0..3 {
        let at = t1 + Duration::from_millis(100 * i);
        let raw = vec![CrosstermEvent::Resize(30, 24)];
        let events = scrollnav::translate(&raw, &root, &layout(&root, viewport));
        viewport = Rect::from_size(30, 24);
        nav.process_events(&events, &mut root, &mut scroll, viewport, at);
        nav.tick(at, &mut root, &mut scroll, viewport);
    }
    let settled_at = t1 + Duration::from_millis(200) + Duration::from_millis(600);
    nav.tick(settled_at, &mut root, &mut scroll, viewport);
    report("after resize below breakpoint", &root, &scroll, &nav);

    nav.dispose();
}

fn ui() -> Element {
    Element::col()
        .id("app")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(Element::text("Card strip demo").id("title"))
        .child(
            Element::row()
                .id("cards")
                .width(Size::Fixed(40))
                .height(Size::Fixed(5))
                .overflow(Overflow::Scroll)
                .gap(1)
                .children((1..=12).map(|i| {
                    Element::col()
                        .id(format!("card-{i}"))
                        .width(Size::Fixed(10))
                        .height(Size::Fixed(5))
                        .child(Element::text(format!("Card {i}")))
                })),
        )
}

fn report(stage: &str, root: &Element, scroll: &ScrollState, nav: &ScrollNav) {
    let prev = find_element(root, nav.prev_id());
    let next = find_element(root, nav.next_id());
    println!(
        "{stage}: offset={} attached={} prev_disabled={:?} next_disabled={:?}",
        scroll.get(nav.region_id()),
        nav.attached(),
        prev.map(|el| el.disabled),
        next.map(|el| el.disabled),
    );
}
