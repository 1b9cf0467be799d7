use crate::context::Context;
use crate::parts::render_part;
use crate::styles::{background_style, fmt_num, style_attr, width_style, StylePairs};
use mailcraft_model::{cascade, BodyType, EffectiveStyle, Part, PartBody, RootStyle, Variant};

/// Output of whole-document compilation
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMarkup {
    /// Raw concatenated fragments, for the live preview surface
    pub preview: String,
    /// Fragments wrapped in the email-safe outer container
    pub email: String,
}

/// Compile a single part to its nested-table fragment
///
/// Pure: the output depends only on the part and the root style it
/// cascades against. This is the value the part's markup cache must hold.
pub fn compile_part(part: &Part, root: &RootStyle, form: bool) -> String {
    render_part(part, root, form, false)
}

fn body_container_styles(display: &EffectiveStyle) -> StylePairs {
    let mut pairs = vec![("border-collapse", "collapse".to_string())];
    for (name, prop) in [
        ("color", "color"),
        ("font-family", "fontFamily"),
        ("font-size", "fontSize"),
        ("line-height", "lineHeight"),
        ("text-align", "align"),
        ("padding-top", "paddingTop"),
        ("padding-bottom", "paddingBottom"),
        ("padding-left", "paddingLeft"),
        ("padding-right", "paddingRight"),
    ] {
        if let Some(value) = display.get(prop) {
            pairs.push((name, crate::styles::css_value(value)));
        }
    }
    pairs.extend(background_style(&display));
    pairs
}

/// Compile a whole variant
///
/// Walks the part list in order, concatenating compiled fragments, and
/// applies the root container exactly once. Invisible markers are skipped
/// in both outputs, matching the editor's export behavior.
pub fn compile_document(variant: &Variant, form: bool) -> DocumentMarkup {
    let fragments: Vec<String> = variant
        .parts
        .iter()
        .filter(|p| !matches!(p.body, PartBody::Invisible))
        .map(|p| compile_part(p, &variant.root, form))
        .collect();

    let mut preview = Context::new();
    for fragment in &fragments {
        preview.add_line(fragment);
    }
    let preview = preview.into_output();

    let display = cascade::body_display(&variant.root);

    let mut email = Context::new();
    email.add(&format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\"{}>",
        style_attr(&body_container_styles(&display))
    ));
    email.add("<tr><td align=\"center\">");

    match variant.root.body_type {
        BodyType::Fixed => {
            let width = fmt_num(variant.root.body_width);
            let mut pairs = vec![("border-collapse", "collapse".to_string())];
            pairs.extend(width_style(&display));
            email.add(&format!(
                "<table role=\"presentation\" width=\"{width}\" cellpadding=\"0\" cellspacing=\"0\"{}><tr>\
<td style=\"text-align:left;vertical-align:top\">",
                style_attr(&pairs)
            ));
            email.add(&preview);
            email.add("</td></tr></table>");
        }
        BodyType::Full => {
            email.add(&preview);
        }
    }

    email.add("</td></tr></table>");

    DocumentMarkup {
        preview,
        email: email.into_output(),
    }
}
