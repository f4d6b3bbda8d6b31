use plotters::style::{RGBAColor, RGBColor};

pub const USAGE_BLUE: RGBColor = RGBColor(59, 130, 246);
pub const SUCCESS_GREEN: RGBColor = RGBColor(16, 185, 129);
pub const FAILURE_RED: RGBColor = RGBColor(248, 113, 113);

/// Chart theme configuration
#[derive(Clone)]
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Usage series
    pub usage_color: RGBColor,
    /// Success rate series and the "Successful" pie slice
    pub success_color: RGBColor,
    /// "Failed" pie slice
    pub failure_color: RGBColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            usage_color: USAGE_BLUE,
            success_color: SUCCESS_GREEN,
            failure_color: FAILURE_RED,
        }
    }
}

/// Chart style configuration
#[derive(Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    pub theme: ChartTheme,
}

impl ChartStyle {
    /// Default style at a specific size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 760,
            height: 340,
            line_width: 2,
            font_size: 15,
            caption_size: 20,
            margin: 10,
            label_area_size: 50,
            theme: ChartTheme::default(),
        }
    }
}
