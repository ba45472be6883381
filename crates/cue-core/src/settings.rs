//! Display settings shared between the control surface and the prompter

use std::time::Duration;

/// Valid range for the prompter font size.
pub const FONT_SIZE_MIN: u16 = 10;
pub const FONT_SIZE_MAX: u16 = 200;

/// Valid range for the scroll speed. The tick interval is `1000 / speed`
/// milliseconds, so zero must never be representable here.
pub const SCROLL_SPEED_MIN: u16 = 10;
pub const SCROLL_SPEED_MAX: u16 = 200;

/// Configuration bundle applied to the prompter.
///
/// Defaults are applied once at construction; consumers never fall back on
/// their own. Mutation goes through [`DisplaySettings::apply`], which clamps
/// numeric fields to their valid ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub font_family: String,
    pub font_size: u16,
    pub scroll_speed: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_family: "Monospace".to_string(),
            font_size: 48,
            scroll_speed: 50,
        }
    }
}

impl DisplaySettings {
    /// Merge a partial update. Unspecified fields retain their values.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(family) = patch.font_family {
            self.font_family = family;
        }
        if let Some(size) = patch.font_size {
            self.font_size = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        }
        if let Some(speed) = patch.scroll_speed {
            self.scroll_speed = speed.clamp(SCROLL_SPEED_MIN, SCROLL_SPEED_MAX);
        }
    }

    /// Scroll tick interval derived from the speed.
    ///
    /// `scroll_speed` is clamped to >= 1 on every write path, so the
    /// division is an invariant rather than a runtime check.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.scroll_speed))
    }
}

/// Partial update for [`DisplaySettings`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub font_family: Option<String>,
    pub font_size: Option<u16>,
    pub scroll_speed: Option<u16>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none() && self.font_size.is_none() && self.scroll_speed.is_none()
    }

    /// Whether the patch touches a field that affects text layout.
    pub fn changes_layout(&self) -> bool {
        self.font_family.is_some() || self.font_size.is_some()
    }
}
