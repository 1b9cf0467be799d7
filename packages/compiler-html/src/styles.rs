//! Fixed-order inline style builders
//!
//! Each builder returns an ordered property list for one concern of a
//! part wrapper. Ordering is part of the output contract: compiled markup
//! must be byte-identical for identical documents.

use mailcraft_model::{EffectiveStyle, StyleValue};

pub type StylePairs = Vec<(&'static str, String)>;

pub fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn css_value(value: &StyleValue) -> String {
    match value {
        StyleValue::Str(s) => s.clone(),
        StyleValue::Num(n) => fmt_num(*n),
        StyleValue::Bool(b) => b.to_string(),
    }
}

pub fn str_of<'a>(style: &'a EffectiveStyle, prop: &str) -> Option<&'a str> {
    style.get(prop).and_then(|v| v.as_str())
}

pub fn num_of(style: &EffectiveStyle, prop: &str) -> Option<f64> {
    style.get(prop).and_then(|v| v.as_f64())
}

pub fn css_of(style: &EffectiveStyle, prop: &str) -> Option<String> {
    style.get(prop).map(css_value)
}

/// Numeric override that may arrive px-suffixed from the display pass
pub fn px_of(style: &EffectiveStyle, prop: &str, default: f64) -> String {
    match style.get(prop) {
        Some(StyleValue::Num(n)) => format!("{}px", fmt_num(*n)),
        Some(StyleValue::Str(s)) if !s.is_empty() => s.clone(),
        _ => format!("{}px", fmt_num(default)),
    }
}

pub fn background_style(style: &EffectiveStyle) -> StylePairs {
    match str_of(style, "backgroundType") {
        None => Vec::new(),
        Some("color") => vec![(
            "background-color",
            str_of(style, "backgroundColor")
                .filter(|c| !c.is_empty())
                .unwrap_or("#ffffff")
                .to_string(),
        )],
        Some(_) => {
            let mut pairs = vec![(
                "background",
                format!("url({})", str_of(style, "backgroundImage").unwrap_or("")),
            )];
            if str_of(style, "backgroundSize") == Some("cover") {
                pairs.push(("background-size", "cover".to_string()));
            }
            pairs
        }
    }
}

pub fn border_style(style: &EffectiveStyle) -> StylePairs {
    match str_of(style, "borderStyle") {
        None | Some("none") => vec![("border-style", "none".to_string())],
        Some(kind) => {
            let mut pairs = vec![("border-style", kind.to_string())];
            if let Some(color) = css_of(style, "borderColor") {
                pairs.push(("border-color", color));
            }
            if let Some(width) = css_of(style, "borderWidth") {
                pairs.push(("border-width", width));
            }
            if let Some(radius) = css_of(style, "borderRadius") {
                pairs.push(("border-radius", radius));
            }
            pairs.push(("overflow", "hidden".to_string()));
            pairs
        }
    }
}

pub fn width_style(style: &EffectiveStyle) -> StylePairs {
    if str_of(style, "bodyType") == Some("fixed") {
        let width = num_of(style, "bodyWidth").unwrap_or(580.0);
        vec![
            ("margin", "0 auto".to_string()),
            ("width", format!("{}px", fmt_num(width))),
        ]
    } else {
        vec![("width", "100%".to_string())]
    }
}

pub fn margin_style(style: &EffectiveStyle) -> StylePairs {
    let mut pairs = Vec::with_capacity(4);
    for (name, prop) in [
        ("margin-top", "marginTop"),
        ("margin-bottom", "marginBottom"),
        ("margin-left", "marginLeft"),
        ("margin-right", "marginRight"),
    ] {
        if let Some(value) = css_of(style, prop) {
            pairs.push((name, value));
        }
    }
    pairs
}

/// Halve a px length, used for the shared gutters of column cells
fn half_px(value: &str) -> String {
    let n: f64 = value.trim_end_matches("px").parse().unwrap_or(0.0);
    format!("{}px", fmt_num(n * 0.5))
}

pub fn padding_style(style: &EffectiveStyle, for_columns: bool) -> StylePairs {
    let mut left = css_of(style, "paddingLeft");
    let mut right = css_of(style, "paddingRight");

    if for_columns {
        left = left.as_deref().map(half_px);
        right = right.as_deref().map(half_px);
    }

    let mut pairs = Vec::with_capacity(4);
    if let Some(value) = css_of(style, "paddingTop") {
        pairs.push(("padding-top", value));
    }
    if let Some(value) = css_of(style, "paddingBottom") {
        pairs.push(("padding-bottom", value));
    }
    if let Some(value) = left {
        pairs.push(("padding-left", value));
    }
    if let Some(value) = right {
        pairs.push(("padding-right", value));
    }
    pairs
}

/// Render an ordered property list as a `style` attribute
pub fn style_attr(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(";");
    format!(" style=\"{}\"", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_with(entries: &[(&str, StyleValue)]) -> EffectiveStyle {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_background_color_default() {
        let f = style_with(&[("backgroundType", "color".into())]);
        assert_eq!(
            background_style(&f),
            vec![("background-color", "#ffffff".to_string())]
        );
    }

    #[test]
    fn test_background_image_cover() {
        let f = style_with(&[
            ("backgroundType", "image".into()),
            ("backgroundImage", "https://cdn/bg.png".into()),
            ("backgroundSize", "cover".into()),
        ]);
        assert_eq!(
            background_style(&f),
            vec![
                ("background", "url(https://cdn/bg.png)".to_string()),
                ("background-size", "cover".to_string()),
            ]
        );
    }

    #[test]
    fn test_border_none_collapses() {
        let f = style_with(&[
            ("borderStyle", "none".into()),
            ("borderColor", "#333333".into()),
        ]);
        assert_eq!(border_style(&f), vec![("border-style", "none".to_string())]);
    }

    #[test]
    fn test_padding_halved_for_columns() {
        let f = style_with(&[
            ("paddingTop", "10px".into()),
            ("paddingBottom", "10px".into()),
            ("paddingLeft", "10px".into()),
            ("paddingRight", "20px".into()),
        ]);
        let pairs = padding_style(&f, true);
        assert!(pairs.contains(&("padding-left", "5px".to_string())));
        assert!(pairs.contains(&("padding-right", "10px".to_string())));
        assert!(pairs.contains(&("padding-top", "10px".to_string())));
    }

    #[test]
    fn test_style_attr_format() {
        let pairs = vec![("width", "100%".to_string())];
        assert_eq!(style_attr(&pairs), " style=\"width:100%\"");
        assert_eq!(style_attr(&[]), "");
    }
}
