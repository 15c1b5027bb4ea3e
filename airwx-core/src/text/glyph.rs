use unicode_general_category::{GeneralCategory, get_general_category};

fn is_symbol(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}

// Code points that never stand alone and render as part of the preceding
// glyph: variation selectors, ZWJ, enclosing and nonspacing marks.
fn extends_glyph(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark | GeneralCategory::EnclosingMark | GeneralCategory::Format
    )
}

/// Split an `icon + description` token into its two visual parts.
///
/// `"⛅ Partly Cloudy"` splits on its first space. A glued token such as
/// `"⛅Partly"` is scanned left to right and split before the first code
/// point that is not in a Unicode symbol category. Tokens without a leading
/// symbol come back whole as the description with an empty icon.
pub fn split_glyph(token: &str) -> (&str, &str) {
    if let Some((icon, description)) = token.split_once(' ') {
        if icon.chars().next().is_some_and(is_symbol) {
            return (icon, description);
        }
    }

    let mut in_icon = false;
    for (idx, c) in token.char_indices() {
        if is_symbol(c) || (in_icon && extends_glyph(c)) {
            in_icon = true;
            continue;
        }
        return token.split_at(idx);
    }

    (token, "")
}
