use std::time::Duration;

use serde::{Deserialize, Serialize};
use sheet_core::{AnimationSpec, Easing};
use sheet_ui::SheetProperties;

/// What happens to the shown screen when `show` replaces it before a `hide`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// The replaced screen's scope stays open; a warning is logged.
    #[default]
    Retain,
    /// The replaced screen's scope is closed when it leaves the sheet.
    CloseReplaced,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub animation_ms: u64,
    pub dismiss_on_back: bool,
    pub dismiss_on_outside_tap: bool,
    pub replace_policy: ReplacePolicy,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            animation_ms: 300,
            dismiss_on_back: true,
            dismiss_on_outside_tap: true,
            replace_policy: ReplacePolicy::Retain,
        }
    }
}

impl SheetConfig {
    /// The sheet always opens fully expanded.
    pub fn properties(&self) -> SheetProperties {
        let mut p = SheetProperties::SKIP_PARTIALLY_EXPANDED;
        p.set(SheetProperties::DISMISS_ON_BACK, self.dismiss_on_back);
        p.set(
            SheetProperties::DISMISS_ON_OUTSIDE_TAP,
            self.dismiss_on_outside_tap,
        );
        p
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.animation_ms), Easing::EaseInOut)
    }
}
