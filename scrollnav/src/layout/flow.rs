use std::collections::HashMap;

use super::Rect;
use crate::dom::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Overflow, Size};

/// Result of a layout pass: per-element rectangles, plus content and viewport
/// sizes for scroll containers.
#[derive(Debug, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
    content_sizes: HashMap<String, (u16, u16)>,
    viewport_sizes: HashMap<String, (u16, u16)>,
}

impl LayoutResult {
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// Unclipped size of a scroll container's content.
    pub fn content_size(&self, id: &str) -> Option<(u16, u16)> {
        self.content_sizes.get(id).copied()
    }

    /// Visible size of a scroll container.
    pub fn viewport_size(&self, id: &str) -> Option<(u16, u16)> {
        self.viewport_sizes.get(id).copied()
    }
}

pub fn layout(root: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::default();
    layout_element(root, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    let width = resolve_size(element.width, available.width, element, true);
    let height = resolve_size(element.height, available.height, element, false);
    let rect = Rect::new(available.x, available.y, width, height);
    result.rects.insert(element.id.clone(), rect);
    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        if element.overflow == Overflow::Scroll {
            result.content_sizes.insert(element.id.clone(), (0, 0));
            result
                .viewport_sizes
                .insert(element.id.clone(), (rect.width, rect.height));
        }
        return;
    };

    let is_row = element.direction == Direction::Row;
    let main_avail = if is_row { rect.width } else { rect.height };
    let gap_total = element.gap * children.len().saturating_sub(1) as u16;

    // First pass: fixed and auto sizes, count of fill items
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in children {
        match main_size_of(child, is_row) {
            Size::Fixed(n) => fixed_total = fixed_total.saturating_add(n),
            Size::Auto => fixed_total = fixed_total.saturating_add(estimate_size(child, is_row)),
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = main_avail.saturating_sub(fixed_total.saturating_add(gap_total));
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    // Second pass: place children along the main axis
    let mut cursor = if is_row { rect.x } else { rect.y };
    let mut content_main = 0u16;
    for (i, child) in children.iter().enumerate() {
        let main = match main_size_of(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => fill_size,
        };
        let child_avail = if is_row {
            Rect::new(cursor, rect.y, main, rect.height)
        } else {
            Rect::new(rect.x, cursor, rect.width, main)
        };
        layout_element(child, child_avail, result);
        cursor = cursor.saturating_add(main);
        content_main = content_main.saturating_add(main);
        if i + 1 < children.len() {
            cursor = cursor.saturating_add(element.gap);
            content_main = content_main.saturating_add(element.gap);
        }
    }

    if element.overflow == Overflow::Scroll {
        let content = if is_row {
            (content_main, rect.height)
        } else {
            (rect.width, content_main)
        };
        result.content_sizes.insert(element.id.clone(), content);
        result
            .viewport_sizes
            .insert(element.id.clone(), (rect.width, rect.height));
    }
}

fn main_size_of(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn resolve_size(size: Size, available: u16, element: &Element, horizontal: bool) -> u16 {
    match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Auto => estimate_size(element, horizontal),
    }
}

/// Intrinsic size of an element along one axis, from its content.
fn estimate_size(element: &Element, horizontal: bool) -> u16 {
    match &element.content {
        Content::None => 0,
        Content::Text(text) => {
            if horizontal {
                display_width(text)
            } else {
                1
            }
        }
        Content::Children(children) => {
            let along_main = (element.direction == Direction::Row) == horizontal;
            let sizes = children.iter().map(|child| {
                match if horizontal { child.width } else { child.height } {
                    Size::Fixed(n) => n,
                    _ => estimate_size(child, horizontal),
                }
            });
            if along_main {
                let gap_total = element.gap * children.len().saturating_sub(1) as u16;
                sizes.fold(0u16, |acc, n| acc.saturating_add(n))
                    .saturating_add(gap_total)
            } else {
                sizes.max().unwrap_or(0)
            }
        }
    }
}
