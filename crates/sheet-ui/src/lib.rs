#![allow(non_snake_case)]
//! Widgets, the modal bottom sheet and a headless host.
//!
//! Widgets are plain functions returning a [`View`]; children are attached
//! with [`ViewExt::child`]. There is no GPU backend: [`dump`] renders a tree
//! as indented text and [`Host`] dispatches clicks, outside taps and back
//! presses against the last composed frame.

pub mod back;
pub mod dump;
pub mod host;
pub mod input;
pub mod sheet;

use std::rc::Rc;

use sheet_core::*;

pub use dump::dump;
pub use host::Host;
pub use sheet::{ModalBottomSheet, SheetProperties, SheetState, SheetValue};

const DEFAULT_FONT_SIZE: f32 = 16.0;
const SCRIM_ALPHA: f32 = 0.32;

fn node(kind: ViewKind, modifier: Modifier) -> View {
    View::new(kind).modifier(modifier)
}

/// Sheet or screen background holding a single child.
pub fn Surface(modifier: Modifier, child: View) -> View {
    node(ViewKind::Surface, modifier).child(child)
}

pub fn Box(modifier: Modifier) -> View {
    node(ViewKind::Box, modifier)
}

pub fn Column(modifier: Modifier) -> View {
    node(ViewKind::Column, modifier)
}

/// Children painted on top of each other, last on top.
pub fn Stack(modifier: Modifier) -> View {
    node(ViewKind::Stack, modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text {
        text: text.into(),
        font_size: DEFAULT_FONT_SIZE,
    })
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(ViewKind::Button {
        text: text.into(),
        on_click: Some(Rc::new(on_click)),
    })
}

pub fn Scrim(on_tap: Option<Callback>) -> View {
    node(
        ViewKind::Scrim { on_tap },
        Modifier::new().fill_max_size().alpha(SCRIM_ALPHA),
    )
}

/// Full-size screen frame. `content` receives the padding the frame reserves.
pub fn Scaffold(content: impl FnOnce(PaddingValues) -> View) -> View {
    let padding = PaddingValues::default();
    Surface(
        Modifier::new().fill_max_size(),
        Box(Modifier::new().fill_max_size().padding_values(padding)).child(content(padding)),
    )
}

/// Appends children; accepts a view, an optional view, a `Vec` or a tuple.
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(mut self, children: impl IntoChildren) -> Self {
        children.push_into(&mut self.children);
        self
    }
}

pub trait IntoChildren {
    fn push_into(self, out: &mut Vec<View>);
}

impl IntoChildren for View {
    fn push_into(self, out: &mut Vec<View>) {
        out.push(self);
    }
}

impl IntoChildren for Vec<View> {
    fn push_into(self, out: &mut Vec<View>) {
        out.extend(self);
    }
}

impl IntoChildren for Option<View> {
    fn push_into(self, out: &mut Vec<View>) {
        out.extend(self);
    }
}

macro_rules! tuple_children {
    ($($name:ident)+) => {
        impl<$($name: IntoChildren),+> IntoChildren for ($($name,)+) {
            #[allow(non_snake_case)]
            fn push_into(self, out: &mut Vec<View>) {
                let ($($name,)+) = self;
                $($name.push_into(out);)+
            }
        }
    };
}

tuple_children!(A B);
tuple_children!(A B C);
tuple_children!(A B C D);

pub trait TextStyle {
    fn size(self, font_size: f32) -> View;
}

impl TextStyle for View {
    /// No effect on anything but text.
    fn size(mut self, size: f32) -> View {
        if let ViewKind::Text { font_size, .. } = &mut self.kind {
            *font_size = size;
        }
        self
    }
}
