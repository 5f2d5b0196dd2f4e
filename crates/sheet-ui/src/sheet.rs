use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use bitflags::bitflags;
use sheet_core::*;

use crate::back::BackHandler;
use crate::{Box, Column, Scrim, Stack, Surface, ViewExt};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetValue {
    Hidden,
    PartiallyExpanded,
    Expanded,
}

impl SheetValue {
    /// Offset as a fraction of the sheet height; 1.0 is fully off-screen.
    pub fn offset(self) -> f32 {
        match self {
            SheetValue::Hidden => 1.0,
            SheetValue::PartiallyExpanded => 0.5,
            SheetValue::Expanded => 0.0,
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SheetProperties: u8 {
        const DISMISS_ON_BACK = 1 << 0;
        const DISMISS_ON_OUTSIDE_TAP = 1 << 1;
        const SKIP_PARTIALLY_EXPANDED = 1 << 2;
    }
}

impl Default for SheetProperties {
    fn default() -> Self {
        SheetProperties::all()
    }
}

/// Animated position of a modal sheet.
#[derive(Clone)]
pub struct SheetState {
    current: Signal<SheetValue>,
    offset: Signal<f32>,
    skip_partially_expanded: bool,
    spec: Rc<Cell<AnimationSpec>>,
}

impl SheetState {
    pub fn new(skip_partially_expanded: bool, spec: AnimationSpec) -> Self {
        Self {
            current: signal(SheetValue::Hidden),
            offset: signal(SheetValue::Hidden.offset()),
            skip_partially_expanded,
            spec: Rc::new(Cell::new(spec)),
        }
    }

    pub fn current_value(&self) -> SheetValue {
        self.current.get()
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn is_visible(&self) -> bool {
        self.current.get() != SheetValue::Hidden
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec.get()
    }

    /// Applies to the next animation; one already running keeps its timing.
    /// Clones share the spec.
    pub fn set_spec(&self, spec: AnimationSpec) {
        self.spec.set(spec);
    }

    pub async fn show(&self) {
        let target = if self.skip_partially_expanded {
            SheetValue::Expanded
        } else {
            SheetValue::PartiallyExpanded
        };
        self.animate_to(target).await;
    }

    pub async fn expand(&self) {
        self.animate_to(SheetValue::Expanded).await;
    }

    pub async fn hide(&self) {
        self.animate_to(SheetValue::Hidden).await;
    }

    async fn animate_to(&self, target: SheetValue) {
        if self.current.get_untracked() == target && self.offset.get_untracked() == target.offset()
        {
            return;
        }
        let mut anim = AnimatedValue::new(self.offset.get_untracked(), self.spec.get());
        anim.set_target(target.offset());
        while anim.update() {
            self.offset.set(anim.get());
            tokio::time::sleep(FRAME).await;
        }
        self.offset.set(target.offset());
        self.current.set(target);
        log::debug!("sheet settled at {target:?}");
    }
}

/// Modal sheet over the rest of the screen: a scrim and a surface sliding up
/// from the bottom edge. Back presses and outside taps call
/// `on_dismiss_request` when `properties` allow them.
pub fn ModalBottomSheet(
    state: &SheetState,
    properties: SheetProperties,
    on_dismiss_request: Rc<dyn Fn()>,
    content: View,
) -> View {
    {
        let on_dismiss = on_dismiss_request.clone();
        BackHandler(
            "modal_bottom_sheet",
            properties.contains(SheetProperties::DISMISS_ON_BACK),
            move || {
                on_dismiss();
                true
            },
        );
    }

    let on_tap: Option<Callback> = properties
        .contains(SheetProperties::DISMISS_ON_OUTSIDE_TAP)
        .then(|| {
            let on_dismiss = on_dismiss_request.clone();
            Rc::new(move || on_dismiss()) as Callback
        });

    Stack(Modifier::new().fill_max_size()).child((
        Scrim(on_tap),
        Surface(
            Modifier::new()
                .fill_max_width()
                .offset_fraction_y(state.offset()),
            Column(Modifier::new().fill_max_width().center_horizontally()).child((
                // Drag handle
                Box(Modifier::new().padding(8.0)),
                content,
            )),
        ),
    ))
}
