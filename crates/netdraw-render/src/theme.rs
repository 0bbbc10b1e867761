//! Colours and stroke widths used by the scene builder.

use netdraw_core::Status;
use peniko::Color;

/// Visual theme for topology diagrams.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub group_fill: Color,
    pub group_stroke: Color,
    pub device_fill: Color,
    pub device_stroke: Color,
    pub connection: Color,
    pub draft: Color,
    /// Highlight for the selected element.
    pub selection: Color,
    pub label: Color,
    pub delete_affordance: Color,
    pub status_up: Color,
    pub status_down: Color,
    pub status_alarm: Color,
    /// Stroke width in screen pixels; divided by zoom when building a scene.
    pub stroke_width: f64,
    pub selected_stroke_width: f64,
    pub port_radius: f64,
    /// Radius of the status dot in a device's corner.
    pub status_radius: f64,
    pub label_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(250, 250, 250, 255),
            group_fill: Color::from_rgba8(59, 130, 246, 20),
            group_stroke: Color::from_rgba8(148, 163, 184, 255),
            device_fill: Color::from_rgba8(255, 255, 255, 255),
            device_stroke: Color::from_rgba8(71, 85, 105, 255),
            connection: Color::from_rgba8(100, 116, 139, 255),
            draft: Color::from_rgba8(236, 72, 153, 200),
            selection: Color::from_rgba8(59, 130, 246, 255),
            label: Color::from_rgba8(30, 41, 59, 255),
            delete_affordance: Color::from_rgba8(239, 68, 68, 255),
            status_up: Color::from_rgba8(16, 185, 129, 255),
            status_down: Color::from_rgba8(148, 163, 184, 255),
            status_alarm: Color::from_rgba8(245, 158, 11, 255),
            stroke_width: 1.5,
            selected_stroke_width: 3.0,
            port_radius: 4.0,
            status_radius: 4.0,
            label_size: 12.0,
        }
    }
}

impl Theme {
    /// Colour for a device or port status.
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Up => self.status_up,
            Status::Down => self.status_down,
            Status::Alarm => self.status_alarm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_differ() {
        let theme = Theme::default();
        let up = theme.status_color(Status::Up).to_rgba8();
        let down = theme.status_color(Status::Down).to_rgba8();
        let alarm = theme.status_color(Status::Alarm).to_rgba8();
        assert_ne!(up, down);
        assert_ne!(up, alarm);
        assert_ne!(down, alarm);
    }
}
