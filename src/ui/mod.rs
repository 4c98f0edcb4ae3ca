use egui::Color32;

pub mod season_list;
pub mod text;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);
pub(crate) const PALETTE_GOLD: Color32 = Color32::from_rgb(212, 175, 55);

/// Short country tag shown next to a name, e.g. `"[NL]"`. The default egui
/// fonts have no flag glyphs so the GUI uses codes instead of emoji.
pub(crate) fn country_tag(nationality: Option<&str>) -> Option<String> {
    nationality
        .and_then(crate::format::nationality_country_code)
        .map(|code| format!("[{code}]"))
}
