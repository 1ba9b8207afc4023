use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::event::Event;
use crate::layout::LayoutResult;
use crate::types::ScrollBehavior;

/// Duration of a smooth scroll animation.
const SMOOTH_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
struct ActiveScroll {
    from: u16,
    to: u16,
    start: Instant,
}

/// Horizontal scroll offsets for scrollable elements.
/// User-managed state that persists across frames; it also owns in-flight
/// smooth-scroll animations and reports when they come to rest.
#[derive(Debug, Default)]
pub struct ScrollState {
    offsets: HashMap<String, u16>,
    /// At most one in-flight animation per element.
    active: HashMap<String, ActiveScroll>,
    /// Settle events queued by instant requests, drained by `tick`.
    settled: Vec<Event>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset for an element.
    pub fn get(&self, id: &str) -> u16 {
        self.offsets.get(id).copied().unwrap_or_default()
    }

    pub fn is_animating(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// Issue a scroll request against an element. The target is clamped to
    /// the element's valid range; settling is reported by `tick` as a
    /// `ScrollEnd` event. A new request supersedes any in-flight animation
    /// for the same element without a settle event for the old one. A request
    /// that results in no motion settles silently.
    pub fn request(
        &mut self,
        id: &str,
        left: i32,
        behavior: ScrollBehavior,
        layout: &LayoutResult,
        now: Instant,
    ) {
        let max = max_offset(layout, id);
        let to = left.clamp(0, max as i32) as u16;
        let from = self.get(id);

        self.active.remove(id);
        if from == to {
            return;
        }

        match behavior {
            ScrollBehavior::Auto => {
                self.offsets.insert(id.to_string(), to);
                self.settled.push(Event::ScrollEnd {
                    target: id.to_string(),
                });
            }
            ScrollBehavior::Smooth => {
                self.active
                    .insert(id.to_string(), ActiveScroll { from, to, start: now });
            }
        }
    }

    /// Advance in-flight animations and drain settle events.
    pub fn tick(&mut self, now: Instant) -> Vec<Event> {
        let mut events = std::mem::take(&mut self.settled);

        let mut done = Vec::new();
        for (id, anim) in &self.active {
            let t = progress(anim, now);
            let x = lerp_u16(anim.from, anim.to, ease_out(t));
            self.offsets.insert(id.clone(), x);
            if t >= 1.0 {
                done.push(id.clone());
            }
        }

        for id in done {
            self.active.remove(&id);
            log::trace!("[scroll] settled id={} offset={}", id, self.get(&id));
            events.push(Event::ScrollEnd { target: id });
        }

        events
    }
}

fn max_offset(layout: &LayoutResult, id: &str) -> u16 {
    let Some((content, _)) = layout.content_size(id) else {
        return 0;
    };
    let Some((viewport, _)) = layout.viewport_size(id) else {
        return 0;
    };
    content.saturating_sub(viewport)
}

fn progress(anim: &ActiveScroll, now: Instant) -> f32 {
    let elapsed = now.saturating_duration_since(anim.start);
    (elapsed.as_secs_f32() / SMOOTH_DURATION.as_secs_f32()).min(1.0)
}

/// Ease-out curve for smooth scrolling.
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Linear interpolation for u16 values.
fn lerp_u16(from: u16, to: u16, t: f32) -> u16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as u16
}
