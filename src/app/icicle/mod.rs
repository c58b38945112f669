use eframe::egui::Color32;

mod interaction;
mod view;

/// Fill color per hierarchy level, shaded by the node's share of its parent
/// so heavier slices read brighter.
pub(super) fn node_fill(depth: u8, share: f32) -> Color32 {
    let share = share.clamp(0.0, 1.0);
    let (r, g, b) = match depth {
        1 => (
            52.0 + (62.0 * share),
            96.0 + (46.0 * share),
            164.0 + (52.0 * share),
        ),
        2 => (
            42.0 + (44.0 * share),
            124.0 + (56.0 * share),
            116.0 + (38.0 * share),
        ),
        _ => (
            172.0 + (58.0 * share),
            116.0 + (46.0 * share),
            52.0 + (30.0 * share),
        ),
    };
    Color32::from_rgb(r as u8, g as u8, b as u8)
}

pub(super) fn merged_fill(depth: u8) -> Color32 {
    match depth {
        1 => Color32::from_rgb(74, 80, 92),
        2 => Color32::from_rgb(88, 94, 104),
        _ => Color32::from_rgb(102, 108, 118),
    }
}
