//! Input dispatch against a composed tree.
//!
//! Later children paint over earlier ones. A scrim swallows input aimed at
//! anything painted before it, so content under an open modal cannot be
//! clicked.

use sheet_core::{Callback, View, ViewKind};

enum Hit {
    Found(Callback),
    Blocked,
    Miss,
}

fn find_button(view: &View, label: &str) -> Hit {
    if let ViewKind::Button {
        text,
        on_click: Some(cb),
    } = &view.kind
        && text == label
    {
        return Hit::Found(cb.clone());
    }
    for child in view.children.iter().rev() {
        match find_button(child, label) {
            Hit::Miss => {}
            hit => return hit,
        }
        if matches!(child.kind, ViewKind::Scrim { .. }) {
            return Hit::Blocked;
        }
    }
    Hit::Miss
}

/// Clicks the top-most reachable button labelled `label`.
pub fn click(root: &View, label: &str) -> bool {
    match find_button(root, label) {
        Hit::Found(cb) => {
            log::debug!("click '{label}'");
            cb();
            true
        }
        Hit::Blocked => {
            log::debug!("click '{label}' blocked by a modal scrim");
            false
        }
        Hit::Miss => {
            log::debug!("no button '{label}'");
            false
        }
    }
}

fn top_scrim(view: &View) -> Option<&View> {
    for child in view.children.iter().rev() {
        if let Some(s) = top_scrim(child) {
            return Some(s);
        }
    }
    matches!(view.kind, ViewKind::Scrim { .. }).then_some(view)
}

/// Taps the top-most scrim. Returns `true` if it reacted.
pub fn tap_outside(root: &View) -> bool {
    match top_scrim(root).map(|s| &s.kind) {
        Some(ViewKind::Scrim { on_tap: Some(cb) }) => {
            cb();
            true
        }
        Some(_) => {
            log::debug!("scrim is not dismissible");
            false
        }
        None => false,
    }
}

pub fn has_button(root: &View, label: &str) -> bool {
    let mut found = false;
    root.walk(&mut |v| {
        if let ViewKind::Button { text, .. } = &v.kind {
            found |= text == label;
        }
    });
    found
}
