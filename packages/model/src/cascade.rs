//! Two-level style cascade
//!
//! A part's effective style is its sparse override map merged over the
//! variant's root style. The merge is an explicit two-map operation; there
//! is no dynamic inheritance to chase when debugging a resolved value.

use crate::part::Part;
use crate::style::{RootStyle, StyleValue, BODY_PROPS, CURRENT_SCHEMA_VERSION};
use std::collections::BTreeMap;

/// Fully resolved style map for one part
pub type EffectiveStyle = BTreeMap<String, StyleValue>;

/// Properties a part inherits from the root style when not overridden
pub const INHERITABLE: &[&str] = &["color", "fontFamily", "fontSize", "lineHeight", "align"];

/// Numeric properties that gain a `px` suffix at the display boundary
pub const PIXEL_PROPS: &[&str] = &[
    "marginTop",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "paddingTop",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
    "borderWidth",
    "borderRadius",
    "fontSize",
];

/// Structural defaults that are elided from compiled body markup
pub fn is_structural_default(prop: &str, value: &StyleValue) -> bool {
    match prop {
        "borderStyle" => value.as_str() == Some("none"),
        "align" => value.as_str() == Some("center"),
        _ => false,
    }
}

/// Resolve a part's effective style against the root style
///
/// Overrides win; everything else inherits the root value, except
/// background properties (parts never inherit the body background) and
/// paddings, which parts own outright: 0 under the current schema, the
/// legacy flat default of 10 before migration.
pub fn resolve(part: &Part, root: &RootStyle) -> EffectiveStyle {
    let mut style = part.overrides.clone();

    for prop in BODY_PROPS {
        if style.contains_key(*prop) {
            continue;
        }
        if let Some(value) = inherited_value(root, prop) {
            style.insert((*prop).to_string(), value);
        }
    }

    style
}

/// The value a part inherits for `prop` when it has no override
///
/// Also drives the override-minimality rule: storing an override equal to
/// this value is redundant and must delete the entry instead.
pub fn inherited_value(root: &RootStyle, prop: &str) -> Option<StyleValue> {
    if prop.starts_with("background") {
        return None;
    }
    if prop.starts_with("padding") {
        let legacy = root.version < CURRENT_SCHEMA_VERSION;
        return Some(StyleValue::Num(if legacy { 10.0 } else { 0.0 }));
    }
    root.get(prop)
}

fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

/// Pixel-unit conversion for the rendering boundary
///
/// Pure: returns a new map, never touches the model. Only numeric spacing
/// and size properties are converted.
pub fn display(style: &EffectiveStyle) -> EffectiveStyle {
    let mut out = style.clone();
    for prop in PIXEL_PROPS {
        if let Some(StyleValue::Num(n)) = out.get(*prop) {
            let n = *n;
            out.insert((*prop).to_string(), StyleValue::Str(px(n)));
        }
    }
    out
}

/// The root style as an effective-style map, for compiling the body
/// container itself
pub fn body_style(root: &RootStyle) -> EffectiveStyle {
    let mut style = EffectiveStyle::new();
    for prop in BODY_PROPS {
        if let Some(value) = root.get(prop) {
            style.insert((*prop).to_string(), value);
        }
    }
    style
}

/// Body style for display: structural defaults elided, pixels applied
pub fn body_display(root: &RootStyle) -> EffectiveStyle {
    let mut style = body_style(root);
    style.retain(|prop, value| !is_structural_default(prop, value));
    display(&style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use crate::part::PartKind;

    fn part_with(kind: PartKind) -> Part {
        let mut ids = IdGenerator::new("cascade");
        Part::new(kind, false, false, &mut ids)
    }

    #[test]
    fn test_inheritable_props_fall_back_to_root() {
        let part = part_with(PartKind::Spacer);
        let mut root = RootStyle::default();
        root.color = "#112233".to_string();

        let style = resolve(&part, &root);
        assert_eq!(style.get("color"), Some(&StyleValue::from("#112233")));
        assert_eq!(style.get("fontFamily"), Some(&StyleValue::from("Helvetica")));
    }

    #[test]
    fn test_override_wins_over_root() {
        let mut part = part_with(PartKind::Spacer);
        part.overrides
            .insert("color".to_string(), StyleValue::from("#ff0000"));
        let root = RootStyle::default();

        let style = resolve(&part, &root);
        assert_eq!(style.get("color"), Some(&StyleValue::from("#ff0000")));
    }

    #[test]
    fn test_parts_do_not_inherit_background() {
        let part = part_with(PartKind::Spacer);
        let mut root = RootStyle::default();
        root.background_color = "#000000".to_string();

        let style = resolve(&part, &root);
        assert_eq!(style.get("backgroundColor"), None);
        assert_eq!(style.get("backgroundType"), None);
    }

    #[test]
    fn test_padding_ownership_by_schema_version() {
        let part = part_with(PartKind::Spacer);

        let mut root = RootStyle::default();
        root.padding_top = 40.0;
        let style = resolve(&part, &root);
        assert_eq!(style.get("paddingTop"), Some(&StyleValue::Num(0.0)));

        root.version = 2;
        let style = resolve(&part, &root);
        assert_eq!(style.get("paddingTop"), Some(&StyleValue::Num(10.0)));
    }

    #[test]
    fn test_display_appends_pixels_without_mutating() {
        let mut style = EffectiveStyle::new();
        style.insert("fontSize".to_string(), StyleValue::Num(16.0));
        style.insert("color".to_string(), StyleValue::from("#333333"));
        style.insert("lineHeight".to_string(), StyleValue::Num(1.3));

        let shown = display(&style);
        assert_eq!(shown.get("fontSize"), Some(&StyleValue::from("16px")));
        // lineHeight is unitless and colors are untouched
        assert_eq!(shown.get("lineHeight"), Some(&StyleValue::Num(1.3)));
        assert_eq!(shown.get("color"), Some(&StyleValue::from("#333333")));
        // Source map unchanged
        assert_eq!(style.get("fontSize"), Some(&StyleValue::Num(16.0)));
    }

    #[test]
    fn test_body_display_elides_structural_defaults() {
        let root = RootStyle::default();
        let shown = body_display(&root);
        assert!(!shown.contains_key("borderStyle"));
        assert!(!shown.contains_key("align"));

        let mut root = RootStyle::default();
        root.align = "left".to_string();
        let shown = body_display(&root);
        assert_eq!(shown.get("align"), Some(&StyleValue::from("left")));
    }
}
