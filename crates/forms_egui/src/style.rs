//! Window tinting and text scaling shared by dialog windows.

use std::collections::BTreeMap;

use forms_core::DialogIcon;

const PINK: egui::Color32 = egui::Color32::from_rgb(255, 192, 203);
const YELLOW: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const LIGHT_SKY_BLUE: egui::Color32 = egui::Color32::from_rgb(135, 206, 250);

fn lighten(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

/// Background tint keyed by icon kind; `None` keeps the theme's window fill.
pub fn icon_tint(icon: DialogIcon) -> Option<egui::Color32> {
    match icon {
        DialogIcon::Error => Some(lighten(PINK, 0.35)),
        DialogIcon::Question => Some(lighten(YELLOW, 0.35)),
        DialogIcon::Information => Some(lighten(LIGHT_SKY_BLUE, 0.35)),
        DialogIcon::Warning | DialogIcon::None => None,
    }
}

pub fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

pub(crate) fn apply_text_scale(ui: &mut egui::Ui, text_scale: Option<f32>) {
    if let Some(scale) = text_scale {
        ui.style_mut().text_styles = scaled_text_styles(scale);
    }
}

/// Tinted windows force dark text so the classic light fills stay readable
/// under dark themes.
pub(crate) fn tinted_frame(
    ctx: &egui::Context,
    icon: DialogIcon,
) -> (egui::Frame, Option<egui::Color32>) {
    let tint = icon_tint(icon);
    let fill = tint.unwrap_or(ctx.style().visuals.window_fill);
    let frame = egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(
            1.0,
            ctx.style().visuals.window_stroke().color,
        ))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 10));
    let text_color = tint.map(|_| egui::Color32::from_rgb(40, 40, 40));
    (frame, text_color)
}
