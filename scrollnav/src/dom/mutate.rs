use super::node::{Content, Element};

/// Insert `el` immediately before the child with id `anchor`, wherever that
/// child sits in the tree. Returns the element back if the anchor is absent.
pub fn insert_before(root: &mut Element, anchor: &str, el: Element) -> Option<Element> {
    let mut el = Some(el);
    insert_before_impl(root, anchor, &mut el);
    el
}

fn insert_before_impl(node: &mut Element, anchor: &str, el: &mut Option<Element>) {
    if el.is_none() {
        return;
    }
    if let Content::Children(children) = &mut node.content {
        if let Some(idx) = children.iter().position(|c| c.id == anchor) {
            if let Some(e) = el.take() {
                children.insert(idx, e);
            }
            return;
        }
        for child in children {
            insert_before_impl(child, anchor, el);
            if el.is_none() {
                return;
            }
        }
    }
}

/// Append `el` as the last child of the element with id `parent`.
/// Returns the element back if the parent is absent.
pub fn append_child(root: &mut Element, parent: &str, el: Element) -> Option<Element> {
    let mut el = Some(el);
    append_child_impl(root, parent, &mut el);
    el
}

fn append_child_impl(node: &mut Element, parent: &str, el: &mut Option<Element>) {
    if el.is_none() {
        return;
    }
    if node.id == parent {
        if let Some(e) = el.take() {
            match &mut node.content {
                Content::Children(children) => children.push(e),
                Content::None => node.content = Content::Children(vec![e]),
                _ => node.content = Content::Children(vec![e]),
            }
        }
        return;
    }
    if let Content::Children(children) = &mut node.content {
        for child in children {
            append_child_impl(child, parent, el);
            if el.is_none() {
                return;
            }
        }
    }
}

/// Remove the element with id `id` from the tree and return it.
pub fn detach(root: &mut Element, id: &str) -> Option<Element> {
    if let Content::Children(children) = &mut root.content {
        if let Some(idx) = children.iter().position(|c| c.id == id) {
            return Some(children.remove(idx));
        }
        for child in children {
            if let Some(found) = detach(child, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Replace the element with id `target` by `wrapper`, moving the target
/// inside it. The wrapper takes the target's position among its siblings.
/// The wrapper is dropped if the target is not found below `root`.
pub fn wrap(root: &mut Element, target: &str, wrapper: Element) -> bool {
    let mut wrapper = Some(wrapper);
    wrap_impl(root, target, &mut wrapper)
}

fn wrap_impl(node: &mut Element, target: &str, wrapper: &mut Option<Element>) -> bool {
    if let Content::Children(children) = &mut node.content {
        if let Some(idx) = children.iter().position(|c| c.id == target) {
            let region = children.remove(idx);
            if let Some(w) = wrapper.take() {
                children.insert(idx, w.child(region));
            }
            return true;
        }
        for child in children {
            if wrap_impl(child, target, wrapper) {
                return true;
            }
        }
    }
    false
}
