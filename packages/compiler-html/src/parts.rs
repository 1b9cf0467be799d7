//! Per-kind part renderers
//!
//! Each part compiles to a self-contained table fragment: a wrapper table
//! whose cell carries the cascade-resolved box styles, around kind-specific
//! inner markup.

use crate::context::Context;
use crate::escape::{escape_attr, escape_html};
use crate::styles::{
    background_style, border_style, css_of, margin_style, padding_style, px_of, str_of,
    style_attr, StylePairs,
};
use mailcraft_model::{cascade, EffectiveStyle, Part, PartBody, RootStyle, SocialLayout};

/// Paragraph fixup applied to rich-text exports: email viewers add their
/// own paragraph margins, so every `<p>` gets an explicit zero margin and
/// empty paragraphs keep their height with a non-breaking space.
fn rich_html(html: &str) -> String {
    html.replace("<p></p>", "<p>&nbsp;</p>")
        .replace("<p>", "<p style=\"margin:0; Margin: 0\">")
}

fn text_styles(f: &EffectiveStyle) -> StylePairs {
    let mut pairs = Vec::new();
    if let Some(align) = str_of(f, "align") {
        pairs.push(("text-align", align.to_string()));
    }
    if let Some(family) = css_of(f, "fontFamily") {
        pairs.push(("font-family", family));
    }
    if let Some(size) = css_of(f, "fontSize") {
        pairs.push(("font-size", size));
    }
    if let Some(height) = css_of(f, "lineHeight") {
        pairs.push(("line-height", height));
    }
    if let Some(color) = css_of(f, "color") {
        pairs.push(("color", color));
    }
    pairs
}

fn decoration(f: &EffectiveStyle) -> Option<String> {
    let flag = |prop: &str| f.get(prop).and_then(|v| v.as_bool()).unwrap_or(false);
    match (flag("underline"), flag("strikethrough")) {
        (true, true) => Some("underline line-through".to_string()),
        (true, false) => Some("underline".to_string()),
        (false, true) => Some("line-through".to_string()),
        (false, false) => None,
    }
}

fn weight_styles(f: &EffectiveStyle, pairs: &mut StylePairs) {
    let flag = |prop: &str| f.get(prop).and_then(|v| v.as_bool()).unwrap_or(false);
    if flag("bold") {
        pairs.push(("font-weight", "bold".to_string()));
    }
    if flag("italic") {
        pairs.push(("font-style", "italic".to_string()));
    }
    if let Some(deco) = decoration(f) {
        pairs.push(("text-decoration", deco));
    }
}

/// Compile one part against its variant's root style
///
/// `in_columns` halves the horizontal paddings, matching how column cells
/// share their gutters.
pub fn render_part(part: &Part, root: &RootStyle, form: bool, in_columns: bool) -> String {
    if matches!(part.body, PartBody::Invisible) {
        return String::new();
    }

    let f = cascade::display(&cascade::resolve(part, root));
    let mut ctx = Context::new();

    // Parts always span their container; only the document root carries
    // the fixed-vs-fluid width decision
    let table_pairs: StylePairs = {
        let mut pairs = vec![
            ("border-collapse", "collapse".to_string()),
            ("width", "100%".to_string()),
        ];
        pairs.extend(margin_style(&f));
        pairs
    };

    let mut cell_pairs = StylePairs::new();
    if text_bearing(part) {
        cell_pairs.extend(text_styles(&f));
    }
    cell_pairs.extend(padding_style(&f, in_columns));
    cell_pairs.extend(border_style(&f));
    cell_pairs.extend(background_style(&f));

    ctx.add(&format!(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\"{}>",
        style_attr(&table_pairs)
    ));
    ctx.add(&format!("<tr><td{}>", style_attr(&cell_pairs)));

    match &part.body {
        PartBody::Headline { content } | PartBody::Text { content } => {
            ctx.add(&rich_html(&content.html));
        }
        PartBody::Image {
            src,
            width,
            scale,
            link,
            ..
        } => render_image(&mut ctx, src, *width, *scale, link, &f),
        PartBody::Divider {
            size,
            top,
            bottom,
            left,
            right,
        } => render_divider(&mut ctx, *size, *top, *bottom, *left, *right, &f),
        PartBody::Button { text, link } => render_button(&mut ctx, text, link, &f),
        PartBody::Input {
            placeholder,
            field,
            input_type,
            required,
        } => render_input(&mut ctx, placeholder, field, input_type, *required, &f),
        PartBody::Columns {
            slots,
            valign,
            stack: _,
        } => render_columns(&mut ctx, slots, valign, root, form),
        PartBody::Social {
            networks,
            labels,
            icon_color,
            icon_custom,
            layout,
        } => render_social(&mut ctx, networks, *labels, icon_color, icon_custom, *layout, &f),
        PartBody::Spacer { height } => {
            let h = crate::styles::fmt_num(*height);
            ctx.add(&format!(
                "<div style=\"height:{h}px;line-height:{h}px;font-size:0\">&nbsp;</div>"
            ));
        }
        PartBody::Invisible => {}
    }

    ctx.add("</td></tr></table>");
    ctx.into_output()
}

fn text_bearing(part: &Part) -> bool {
    matches!(
        part.body,
        PartBody::Headline { .. }
            | PartBody::Text { .. }
            | PartBody::Button { .. }
            | PartBody::Input { .. }
            | PartBody::Social { .. }
    )
}

fn render_image(
    ctx: &mut Context,
    src: &str,
    width: Option<f64>,
    scale: f64,
    link: &str,
    f: &EffectiveStyle,
) {
    let align = str_of(f, "align").unwrap_or("center");
    let width_attr = width
        .map(|w| format!(" width=\"{}\"", (w * scale / 100.0).floor() as i64))
        .unwrap_or_default();

    let img = format!(
        "<img src=\"{}\" alt=\"\"{} style=\"border:0;max-width:100%\"/>",
        escape_attr(src),
        width_attr
    );

    ctx.add(&format!("<div style=\"text-align:{}\">", align));
    if link.is_empty() {
        ctx.add(&img);
    } else {
        ctx.add(&format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_attr(link),
            img
        ));
    }
    ctx.add("</div>");
}

fn render_divider(
    ctx: &mut Context,
    size: f64,
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
    f: &EffectiveStyle,
) {
    let color = str_of(f, "color").unwrap_or("#333333");
    let n = crate::styles::fmt_num;
    ctx.add(&format!(
        "<hr style=\"border-color:{};border-style:solid;border-top-width:{}px;\
border-bottom-width:0;border-left-width:0;border-right-width:0;\
margin:{}px {}px {}px {}px\"/>",
        color,
        n(size),
        n(top),
        n(right),
        n(bottom),
        n(left)
    ));
}

fn render_button(ctx: &mut Context, text: &str, link: &str, f: &EffectiveStyle) {
    let transparent = f
        .get("buttonTransparent")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let button_color = str_of(f, "buttonColor").unwrap_or("#ff5d55");
    let background = if transparent { "transparent" } else { button_color };
    let pad_w = px_of(f, "buttonWidth", 10.0);
    let pad_h = px_of(f, "buttonHeight", 10.0);
    let radius = px_of(f, "buttonRadius", 4.0);
    let align = str_of(f, "align").unwrap_or("center");

    let mut label_pairs: StylePairs = Vec::new();
    if let Some(color) = css_of(f, "color") {
        label_pairs.push(("color", color));
    }
    weight_styles(f, &mut label_pairs);

    ctx.add(&format!("<div style=\"text-align:{}\">", align));
    ctx.add(&format!(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" \
style=\"border-collapse:collapse;display:inline-table\"><tr>\
<td style=\"background-color:{bg};border-style:solid;border-width:1px;border-color:{bc};\
border-radius:{radius};padding:{pad_h} {pad_w};text-align:center\">",
        bg = background,
        bc = button_color,
    ));
    ctx.add(&format!(
        "<a href=\"{}\" style=\"text-decoration:none\"><span{}>{}</span></a>",
        escape_attr(if link.is_empty() { "#" } else { link }),
        style_attr(&label_pairs),
        escape_html(text)
    ));
    ctx.add("</td></tr></table></div>");
}

fn render_input(
    ctx: &mut Context,
    placeholder: &str,
    field: &str,
    input_type: &str,
    required: bool,
    f: &EffectiveStyle,
) {
    let mut pairs: StylePairs = vec![
        (
            "background-color",
            str_of(f, "inputColor").unwrap_or("#ffffff").to_string(),
        ),
        (
            "color",
            str_of(f, "color").unwrap_or("#333333").to_string(),
        ),
        ("border-style", "solid".to_string()),
        ("border-width", "1px".to_string()),
        (
            "border-color",
            str_of(f, "inputBorderColor").unwrap_or("#c0c0c0").to_string(),
        ),
        ("border-radius", px_of(f, "inputRadius", 4.0)),
        ("padding-top", px_of(f, "inputHeight", 10.0)),
        ("padding-bottom", px_of(f, "inputHeight", 10.0)),
        ("padding-left", px_of(f, "inputWidth", 10.0)),
        ("padding-right", px_of(f, "inputWidth", 10.0)),
        ("width", "100%".to_string()),
        ("margin", "0".to_string()),
        ("box-sizing", "border-box".to_string()),
    ];
    if let Some(size) = css_of(f, "fontSize") {
        pairs.push(("font-size", size));
    }
    if let Some(family) = css_of(f, "fontFamily") {
        pairs.push(("font-family", family));
    }
    if let Some(align) = str_of(f, "align") {
        pairs.push(("text-align", align.to_string()));
    }
    weight_styles(f, &mut pairs);

    ctx.add(&format!(
        "<input type=\"{}\" name=\"{}\" placeholder=\"{}\"{}{}/>",
        escape_attr(input_type),
        escape_attr(field),
        escape_attr(placeholder),
        style_attr(&pairs),
        if required { " required" } else { "" }
    ));
}

fn render_columns(ctx: &mut Context, slots: &[mailcraft_model::Slot], valign: &str, root: &RootStyle, form: bool) {
    ctx.add(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" \
style=\"border-collapse:collapse\"><tr>",
    );
    for slot in slots {
        let pct = ((slot.width as f64) * 100.0 / 12.0).round() as i64;
        ctx.add(&format!(
            "<td width=\"{pct}%\" style=\"vertical-align:{valign}\">"
        ));
        for occupant in slot.content.parts() {
            ctx.add(&render_part(occupant, root, form, true));
        }
        ctx.add("</td>");
    }
    ctx.add("</tr></table>");
}

fn brand_color(network: &str) -> &'static str {
    match network {
        "facebook" => "rgb(59,89,152)",
        "twitter" => "rgb(85,172,238)",
        "instagram" => "rgb(63,114,155)",
        "pinterest" => "rgb(189,8,28)",
        "linkedin" => "rgb(0,119,181)",
        _ => "#aaaaaa",
    }
}

fn render_social(
    ctx: &mut Context,
    networks: &[mailcraft_model::SocialNetwork],
    labels: bool,
    icon_color: &str,
    icon_custom: &str,
    layout: SocialLayout,
    f: &EffectiveStyle,
) {
    let align = str_of(f, "align").unwrap_or("center");
    let text_color = str_of(f, "color").unwrap_or("#333333").to_string();

    let cell = |network: &mailcraft_model::SocialNetwork| -> String {
        let color = if icon_color == "default" {
            brand_color(&network.network).to_string()
        } else {
            icon_custom.to_string()
        };
        let href = escape_attr(&network.link);
        let mut out = format!(
            "<td style=\"padding:4px;vertical-align:middle\">\
<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" \
style=\"background:{color};border-radius:3px;width:20px;border:none\"><tr>\
<td style=\"font-size:0px;padding:0;vertical-align:middle;width:20px;height:20px\">\
<a href=\"{href}\"><img alt=\"{name}\" height=\"20\" width=\"20\" \
src=\"/img/{name}-icon.png\" style=\"display:block;border-radius:3px\"/></a>\
</td></tr></table></td>",
            name = escape_attr(&network.network),
        );
        if labels {
            out.push_str(&format!(
                "<td style=\"padding:4px 4px 4px 0;vertical-align:middle\">\
<a href=\"{href}\" style=\"text-decoration:none;color:{text_color}\">{}</a></td>",
                escape_html(&network.label),
            ));
        }
        out
    };

    ctx.add(&format!("<div style=\"text-align:{}\">", align));
    ctx.add(
        "<table role=\"presentation\" cellpadding=\"0\" cellspacing=\"0\" \
style=\"border-collapse:collapse;display:inline-table\">",
    );
    match layout {
        SocialLayout::Horizontal => {
            ctx.add("<tr>");
            for network in networks.iter().filter(|n| n.enabled) {
                ctx.add(&cell(network));
            }
            ctx.add("</tr>");
        }
        SocialLayout::Vertical => {
            for network in networks.iter().filter(|n| n.enabled) {
                ctx.add("<tr>");
                ctx.add(&cell(network));
                ctx.add("</tr>");
            }
        }
    }
    ctx.add("</table></div>");
}
