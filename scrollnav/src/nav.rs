use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::dom::{self, Element};
use crate::event::Event;
use crate::layout::{layout, LayoutResult, Rect};
use crate::scroll::ScrollState;
use crate::types::{ScrollBehavior, Size};

/// Quiet period between the last resize event and re-evaluation.
const RESIZE_QUIET: Duration = Duration::from_millis(600);

pub const WRAPPER_CLASS: &str = "scroll-nav";
pub const REGION_CLASS: &str = "scroll-nav-region";
pub const BUTTON_CLASS: &str = "scroll-nav-button";

/// Options accepted at construction. Immutable afterwards.
#[derive(Debug, Clone)]
pub struct NavOptions {
    /// Markup injected into the previous button.
    pub prev_icon: String,
    /// Markup injected into the next button.
    pub next_icon: String,
    /// Viewport width below which the buttons are suppressed even when the
    /// content overflows.
    pub breakpoint: Option<u16>,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            prev_icon: "‹".into(),
            next_icon: "›".into(),
            breakpoint: None,
        }
    }
}

/// Previous/next navigation for a horizontally scrollable element.
///
/// Wraps the target element in a wrapper and keeps two buttons attached to it
/// while the content overflows, with their disabled state tracking the scroll
/// position. The host loop feeds events in via [`ScrollNav::process_events`]
/// and time via [`ScrollNav::tick`]; settle events come from
/// [`ScrollState::tick`].
#[derive(Debug)]
pub struct ScrollNav {
    region: String,
    wrapper: String,
    prev_id: String,
    next_id: String,
    /// Buttons are held here while detached and live in the tree while
    /// attached.
    prev: Option<Element>,
    next: Option<Element>,
    breakpoint: Option<u16>,
    debounce: Debouncer,
    disposed: bool,
}

impl ScrollNav {
    /// Wrap the element with id `target` and run the initial evaluation.
    ///
    /// Mutates the tree exactly once: the wrapper takes the target's position
    /// and the target moves inside it. A missing target is not an error; the
    /// component stays in its detached, non-overflowing state.
    pub fn new(
        root: &mut Element,
        target: &str,
        options: NavOptions,
        scroll: &mut ScrollState,
        viewport: Rect,
        now: Instant,
    ) -> Self {
        let wrapper = Element::row().width(Size::Fill).class(WRAPPER_CLASS);
        let wrapper_id = wrapper.id.clone();

        let prev = Element::button(options.prev_icon).class(BUTTON_CLASS);
        let next = Element::button(options.next_icon).class(BUTTON_CLASS);

        if let Some(region) = dom::find_element_mut(root, target) {
            region.class.push(REGION_CLASS.to_string());
        }
        if !dom::wrap(root, target, wrapper) {
            log::debug!("[nav] target {target} not in tree, controls stay detached");
        }

        let mut nav = Self {
            region: target.to_string(),
            wrapper: wrapper_id,
            prev_id: prev.id.clone(),
            next_id: next.id.clone(),
            prev: Some(prev),
            next: Some(next),
            breakpoint: options.breakpoint,
            debounce: Debouncer::new(RESIZE_QUIET),
            disposed: false,
        };
        nav.reevaluate(root, scroll, viewport, now);
        nav
    }

    pub fn region_id(&self) -> &str {
        &self.region
    }

    pub fn wrapper_id(&self) -> &str {
        &self.wrapper
    }

    pub fn prev_id(&self) -> &str {
        &self.prev_id
    }

    pub fn next_id(&self) -> &str {
        &self.next_id
    }

    /// Whether the buttons currently live in the tree.
    pub fn attached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }

    /// Re-read the layout metrics and attach or detach the buttons.
    ///
    /// When the content overflows, the scroll offset is reset to zero and the
    /// buttons are attached (previous before the region, next after it),
    /// unless the viewport is narrower than the configured breakpoint, in
    /// which case the reset and the enablement pass still run but the buttons
    /// end up detached.
    pub fn reevaluate(
        &mut self,
        root: &mut Element,
        scroll: &mut ScrollState,
        viewport: Rect,
        now: Instant,
    ) {
        let result = layout(root, viewport);
        let (content_width, _) = result.content_size(&self.region).unwrap_or_default();
        let (client_width, _) = result.viewport_size(&self.region).unwrap_or_default();
        let overflowing = content_width > client_width;
        log::debug!(
            "[reevaluate] region={} content={} client={} overflowing={}",
            self.region,
            content_width,
            client_width,
            overflowing
        );

        if overflowing {
            let suppressed = self.breakpoint.is_some_and(|b| viewport.width < b);
            scroll.request(&self.region, 0, ScrollBehavior::Auto, &result, now);
            if suppressed {
                self.update_enablement(root, scroll, &result);
                self.detach_controls(root);
            } else {
                self.attach_controls(root);
                self.update_enablement(root, scroll, &result);
            }
        } else {
            self.detach_controls(root);
        }
    }

    /// Scroll half a viewport towards the start of the region.
    pub fn scroll_to_prev(&self, scroll: &mut ScrollState, layout: &LayoutResult, now: Instant) {
        let Some((client_width, _)) = layout.viewport_size(&self.region) else {
            return;
        };
        let left = scroll.get(&self.region) as i32 - client_width as i32 / 2;
        scroll.request(&self.region, left, ScrollBehavior::Smooth, layout, now);
    }

    /// Scroll half a viewport towards the end of the region.
    pub fn scroll_to_next(&self, scroll: &mut ScrollState, layout: &LayoutResult, now: Instant) {
        let Some((client_width, _)) = layout.viewport_size(&self.region) else {
            return;
        };
        let left = scroll.get(&self.region) as i32 + client_width as i32 / 2;
        scroll.request(&self.region, left, ScrollBehavior::Smooth, layout, now);
    }

    /// Recompute the disabled state of both buttons from the current offset.
    /// Clears both flags first, then disables previous at offset zero and
    /// next when the end of the content is exactly in view. Idempotent.
    pub fn update_enablement(
        &mut self,
        root: &mut Element,
        scroll: &ScrollState,
        layout: &LayoutResult,
    ) {
        let Some((content_width, _)) = layout.content_size(&self.region) else {
            return;
        };
        let Some((client_width, _)) = layout.viewport_size(&self.region) else {
            return;
        };
        let offset = scroll.get(&self.region);

        self.set_disabled(root, Control::Prev, false);
        self.set_disabled(root, Control::Next, false);

        if offset == 0 {
            self.set_disabled(root, Control::Prev, true);
        }
        if offset as u32 + client_width as u32 == content_width as u32 {
            self.set_disabled(root, Control::Next, true);
        }
    }

    /// React to clicks, resizes and settled scrolls. Inert after `dispose`.
    pub fn process_events(
        &mut self,
        events: &[Event],
        root: &mut Element,
        scroll: &mut ScrollState,
        viewport: Rect,
        now: Instant,
    ) {
        if self.disposed {
            return;
        }

        for event in events {
            match event {
                Event::Click {
                    target: Some(target),
                    ..
                } if *target == self.prev_id => {
                    let result = layout(root, viewport);
                    self.scroll_to_prev(scroll, &result, now);
                }
                Event::Click {
                    target: Some(target),
                    ..
                } if *target == self.next_id => {
                    let result = layout(root, viewport);
                    self.scroll_to_next(scroll, &result, now);
                }
                Event::Resize { .. } => {
                    self.debounce.schedule(now);
                }
                Event::ScrollEnd { target } if *target == self.region => {
                    let result = layout(root, viewport);
                    self.update_enablement(root, scroll, &result);
                }
                _ => {}
            }
        }
    }

    /// Fire the pending resize re-evaluation once its quiet period has
    /// elapsed. Inert after `dispose`.
    pub fn tick(
        &mut self,
        now: Instant,
        root: &mut Element,
        scroll: &mut ScrollState,
        viewport: Rect,
    ) {
        if self.disposed {
            return;
        }
        if self.debounce.fire(now) {
            log::debug!("[tick] resize settled, reevaluating region={}", self.region);
            self.reevaluate(root, scroll, viewport, now);
        }
    }

    /// Cancel the pending debounce and stop reacting to events and ticks.
    /// The wrapper and any attached buttons stay in the tree.
    pub fn dispose(&mut self) {
        log::debug!("[dispose] region={}", self.region);
        self.debounce.cancel();
        self.disposed = true;
    }

    fn attach_controls(&mut self, root: &mut Element) {
        if let Some(prev) = self.prev.take() {
            self.prev = dom::insert_before(root, &self.region, prev);
        }
        if let Some(next) = self.next.take() {
            self.next = dom::append_child(root, &self.wrapper, next);
        }
    }

    fn detach_controls(&mut self, root: &mut Element) {
        if self.prev.is_none() {
            self.prev = dom::detach(root, &self.prev_id);
        }
        if self.next.is_none() {
            self.next = dom::detach(root, &self.next_id);
        }
    }

    fn set_disabled(&mut self, root: &mut Element, control: Control, value: bool) {
        let (id, held) = match control {
            Control::Prev => (&self.prev_id, &mut self.prev),
            Control::Next => (&self.next_id, &mut self.next),
        };
        if let Some(el) = held.as_mut() {
            el.disabled = value;
        } else if let Some(el) = dom::find_element_mut(root, id) {
            el.disabled = value;
        }
    }
}

#[derive(Clone, Copy)]
enum Control {
    Prev,
    Next,
}
