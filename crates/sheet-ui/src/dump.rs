use std::fmt::Write;

use sheet_core::{View, ViewKind};

/// Renders `view` as an indented outline, one node per line.
pub fn dump(view: &View) -> String {
    let mut out = String::new();
    write_node(&mut out, view, 0);
    out
}

fn write_node(out: &mut String, view: &View, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = match &view.kind {
        ViewKind::Text { text, font_size } if *font_size != 16.0 => {
            writeln!(out, "{pad}Text {text:?} ({font_size}sp)")
        }
        ViewKind::Text { text, .. } => writeln!(out, "{pad}Text {text:?}"),
        ViewKind::Button { text, .. } => writeln!(out, "{pad}Button {text:?}"),
        ViewKind::Scrim { on_tap } => writeln!(
            out,
            "{pad}Scrim{}",
            if on_tap.is_some() { " (dismissible)" } else { "" }
        ),
        ViewKind::Surface => match view.modifier.offset_fraction_y {
            Some(y) => writeln!(out, "{pad}Surface offset={y:.2}"),
            None => writeln!(out, "{pad}Surface"),
        },
        kind => writeln!(out, "{pad}{kind:?}"),
    };
    for c in &view.children {
        write_node(out, c, depth + 1);
    }
}
