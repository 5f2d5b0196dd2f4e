//! The view tree: plain data rebuilt from state every frame.

use std::fmt;
use std::rc::Rc;

use crate::Modifier;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone)]
pub enum ViewKind {
    Surface,
    Box,
    Column,
    Stack,
    Text {
        text: String,
        font_size: f32,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    /// Dimmed layer under a modal. Blocks input to everything painted before
    /// it; `on_tap` is `None` when tapping outside does not dismiss.
    Scrim {
        on_tap: Option<Callback>,
    },
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Surface => f.write_str("Surface"),
            ViewKind::Box => f.write_str("Box"),
            ViewKind::Column => f.write_str("Column"),
            ViewKind::Stack => f.write_str("Stack"),
            ViewKind::Text { text, font_size } => {
                write!(f, "Text({text:?}, {font_size}sp)")
            }
            ViewKind::Button { text, on_click } => {
                write!(f, "Button({text:?}, enabled: {})", on_click.is_some())
            }
            ViewKind::Scrim { on_tap } => {
                write!(f, "Scrim(dismissible: {})", on_tap.is_some())
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            modifier: Modifier::default(),
            children: Vec::new(),
        }
    }

    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }

    /// Depth-first, paint order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |v| {
            if let ViewKind::Text { text, .. } = &v.kind {
                out.push(text.as_str());
            }
        });
        out
    }
}
