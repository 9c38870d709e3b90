// Copyright 2025 the Undersheet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual and interaction parameters for a sheet.

use undersheet_gesture::sensitivity;

/// Appearance and interaction parameters, fixed at controller creation.
///
/// The controller itself only reads [`SheetStyle::top_bar_extent`] (for
/// content-sized stops) and `scroll_sensitivity`; the remaining fields are
/// carried for the host's renderer so a sheet's full look lives in one value.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    /// Hides the grip bar above the content.
    pub is_grip_bar_hidden: bool,
    /// Height of the grip bar itself.
    pub grip_bar_height: f64,
    /// Vertical padding on each side of the grip bar.
    pub grip_bar_vertical_padding: f64,
    /// Draws a drop shadow behind the sheet.
    pub is_shadow_enabled: bool,
    /// Sheet background color as RGBA bytes.
    pub background: [u8; 4],
    /// Radius of the sheet's top corners.
    pub corner_radius: f64,
    /// Hysteresis level for drag resolution, see
    /// [`undersheet_gesture::sensitivity`].
    pub scroll_sensitivity: f64,
}

impl SheetStyle {
    /// Vertical space consumed above the content by the grip bar area.
    #[must_use]
    pub fn top_bar_extent(&self) -> f64 {
        if self.is_grip_bar_hidden {
            0.0
        } else {
            self.grip_bar_height + 2.0 * self.grip_bar_vertical_padding
        }
    }
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            is_grip_bar_hidden: false,
            grip_bar_height: 4.0,
            grip_bar_vertical_padding: 8.0,
            is_shadow_enabled: true,
            background: [0xff, 0xff, 0xff, 0xff],
            corner_radius: 16.0,
            scroll_sensitivity: sensitivity::MEDIUM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_bar_extent_covers_bar_and_padding() {
        let style = SheetStyle::default();
        assert_eq!(style.top_bar_extent(), 4.0 + 2.0 * 8.0);
    }

    #[test]
    fn hidden_grip_bar_consumes_no_space() {
        let style = SheetStyle {
            is_grip_bar_hidden: true,
            ..SheetStyle::default()
        };
        assert_eq!(style.top_bar_extent(), 0.0);
    }
}
