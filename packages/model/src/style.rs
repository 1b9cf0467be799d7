use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Current root-style schema version. Documents at version 2 (or with no
/// version marker at all) are legacy and must be migrated before editing.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// A single style property value
///
/// Style maps are heterogeneous: colors and keywords are strings, spacing
/// and sizes are numbers, toggles are booleans. Untagged so the persisted
/// document reads naturally (`"align": "center"`, `"fontSize": 16`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Num(f64),
    Str(String),
}

impl StyleValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Num(n)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Num(n as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

/// Sparse per-part style override map
///
/// Only properties that diverge from the inherited or default value are
/// stored. Ordered map so serialization and compiled markup stay
/// deterministic.
pub type StyleOverrides = BTreeMap<String, StyleValue>;

/// Outer container sizing for a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// Fixed-width, centered
    Fixed,
    /// Fluid, fills the viewport
    Full,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown root style property: {0}")]
    UnknownProperty(String),

    #[error("invalid value for root style property: {0}")]
    InvalidValue(String),
}

/// Every body-wide property that participates in the part cascade
pub const BODY_PROPS: &[&str] = &[
    "marginTop",
    "marginBottom",
    "marginLeft",
    "marginRight",
    "paddingTop",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
    "borderStyle",
    "borderColor",
    "borderWidth",
    "borderRadius",
    "align",
    "color",
    "linkColor",
    "linkUnderline",
    "backgroundType",
    "backgroundColor",
    "backgroundSize",
    "backgroundImage",
    "fontFamily",
    "fontSize",
    "lineHeight",
    "bodyType",
    "bodyWidth",
    "mobileWidth",
    "formCloseEnable",
    "formCloseBorder",
    "formCloseStyle",
    "formCloseTop",
    "formCloseRight",
    "formCloseSize",
];

/// Body-wide style defaults for a variant
///
/// Fully materialized (no sparse map): every property always has a value,
/// so cascade resolution never needs a third fallback tier beyond the
/// structural defaults baked into `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootStyle {
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub border_style: String,
    pub border_color: String,
    pub border_width: f64,
    pub border_radius: f64,
    pub align: String,
    pub color: String,
    pub link_color: String,
    pub link_underline: bool,
    pub background_type: String,
    pub background_color: String,
    pub background_size: String,
    pub background_image: String,
    pub font_family: String,
    pub font_size: f64,
    pub line_height: f64,
    pub body_type: BodyType,
    pub body_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_width: Option<f64>,
    pub form_close_enable: bool,
    pub form_close_border: bool,
    pub form_close_style: String,
    pub form_close_top: f64,
    pub form_close_right: f64,
    pub form_close_size: f64,

    /// Schema version marker. Absent in pre-v2 documents, so the field
    /// default is 0 rather than the struct default of the current version.
    #[serde(default)]
    pub version: u32,
}

impl Default for RootStyle {
    fn default() -> Self {
        Self {
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            padding_right: 0.0,
            border_style: "none".to_string(),
            border_color: "#333333".to_string(),
            border_width: 1.0,
            border_radius: 0.0,
            align: "center".to_string(),
            color: "#333333".to_string(),
            link_color: "#3b5998".to_string(),
            link_underline: true,
            background_type: "color".to_string(),
            background_color: "#ffffff".to_string(),
            background_size: String::new(),
            background_image: String::new(),
            font_family: "Helvetica".to_string(),
            font_size: 16.0,
            line_height: 1.3,
            body_type: BodyType::Fixed,
            body_width: 580.0,
            mobile_width: None,
            form_close_enable: true,
            form_close_border: true,
            form_close_style: String::new(),
            form_close_top: 0.0,
            form_close_right: 0.0,
            form_close_size: 26.0,
            version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl RootStyle {
    /// Project a property as a cascade input
    pub fn get(&self, prop: &str) -> Option<StyleValue> {
        let v = match prop {
            "marginTop" => self.margin_top.into(),
            "marginBottom" => self.margin_bottom.into(),
            "marginLeft" => self.margin_left.into(),
            "marginRight" => self.margin_right.into(),
            "paddingTop" => self.padding_top.into(),
            "paddingBottom" => self.padding_bottom.into(),
            "paddingLeft" => self.padding_left.into(),
            "paddingRight" => self.padding_right.into(),
            "borderStyle" => self.border_style.as_str().into(),
            "borderColor" => self.border_color.as_str().into(),
            "borderWidth" => self.border_width.into(),
            "borderRadius" => self.border_radius.into(),
            "align" => self.align.as_str().into(),
            "color" => self.color.as_str().into(),
            "linkColor" => self.link_color.as_str().into(),
            "linkUnderline" => self.link_underline.into(),
            "backgroundType" => self.background_type.as_str().into(),
            "backgroundColor" => self.background_color.as_str().into(),
            "backgroundSize" => self.background_size.as_str().into(),
            "backgroundImage" => self.background_image.as_str().into(),
            "fontFamily" => self.font_family.as_str().into(),
            "fontSize" => self.font_size.into(),
            "lineHeight" => self.line_height.into(),
            "bodyType" => match self.body_type {
                BodyType::Fixed => "fixed".into(),
                BodyType::Full => "full".into(),
            },
            "bodyWidth" => self.body_width.into(),
            "mobileWidth" => match self.mobile_width {
                Some(w) => w.into(),
                None => StyleValue::Str(String::new()),
            },
            "formCloseEnable" => self.form_close_enable.into(),
            "formCloseBorder" => self.form_close_border.into(),
            "formCloseStyle" => self.form_close_style.as_str().into(),
            "formCloseTop" => self.form_close_top.into(),
            "formCloseRight" => self.form_close_right.into(),
            "formCloseSize" => self.form_close_size.into(),
            _ => return None,
        };
        Some(v)
    }

    /// Assign a property from a cascade-typed value
    pub fn set(&mut self, prop: &str, value: &StyleValue) -> Result<(), StyleError> {
        let bad = || StyleError::InvalidValue(prop.to_string());

        match prop {
            "marginTop" => self.margin_top = value.as_f64().ok_or_else(bad)?,
            "marginBottom" => self.margin_bottom = value.as_f64().ok_or_else(bad)?,
            "marginLeft" => self.margin_left = value.as_f64().ok_or_else(bad)?,
            "marginRight" => self.margin_right = value.as_f64().ok_or_else(bad)?,
            "paddingTop" => self.padding_top = value.as_f64().ok_or_else(bad)?,
            "paddingBottom" => self.padding_bottom = value.as_f64().ok_or_else(bad)?,
            "paddingLeft" => self.padding_left = value.as_f64().ok_or_else(bad)?,
            "paddingRight" => self.padding_right = value.as_f64().ok_or_else(bad)?,
            "borderStyle" => self.border_style = value.as_str().ok_or_else(bad)?.to_string(),
            "borderColor" => self.border_color = value.as_str().ok_or_else(bad)?.to_string(),
            "borderWidth" => self.border_width = value.as_f64().ok_or_else(bad)?,
            "borderRadius" => self.border_radius = value.as_f64().ok_or_else(bad)?,
            "align" => self.align = value.as_str().ok_or_else(bad)?.to_string(),
            "color" => self.color = value.as_str().ok_or_else(bad)?.to_string(),
            "linkColor" => self.link_color = value.as_str().ok_or_else(bad)?.to_string(),
            "linkUnderline" => self.link_underline = value.as_bool().ok_or_else(bad)?,
            "backgroundType" => self.background_type = value.as_str().ok_or_else(bad)?.to_string(),
            "backgroundColor" => self.background_color = value.as_str().ok_or_else(bad)?.to_string(),
            "backgroundSize" => self.background_size = value.as_str().ok_or_else(bad)?.to_string(),
            "backgroundImage" => self.background_image = value.as_str().ok_or_else(bad)?.to_string(),
            "fontFamily" => self.font_family = value.as_str().ok_or_else(bad)?.to_string(),
            "fontSize" => self.font_size = value.as_f64().ok_or_else(bad)?,
            "lineHeight" => self.line_height = value.as_f64().ok_or_else(bad)?,
            "bodyType" => {
                self.body_type = match value.as_str().ok_or_else(bad)? {
                    "fixed" => BodyType::Fixed,
                    "full" => BodyType::Full,
                    _ => return Err(bad()),
                }
            }
            "bodyWidth" => self.body_width = value.as_f64().ok_or_else(bad)?,
            "mobileWidth" => {
                self.mobile_width = match value {
                    StyleValue::Num(w) => Some(*w),
                    StyleValue::Str(s) if s.is_empty() => None,
                    _ => return Err(bad()),
                }
            }
            "formCloseEnable" => self.form_close_enable = value.as_bool().ok_or_else(bad)?,
            "formCloseBorder" => self.form_close_border = value.as_bool().ok_or_else(bad)?,
            "formCloseStyle" => self.form_close_style = value.as_str().ok_or_else(bad)?.to_string(),
            "formCloseTop" => self.form_close_top = value.as_f64().ok_or_else(bad)?,
            "formCloseRight" => self.form_close_right = value.as_f64().ok_or_else(bad)?,
            "formCloseSize" => self.form_close_size = value.as_f64().ok_or_else(bad)?,
            _ => return Err(StyleError::UnknownProperty(prop.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_schema() {
        let root = RootStyle::default();
        assert_eq!(root.align, "center");
        assert_eq!(root.border_style, "none");
        assert_eq!(root.body_type, BodyType::Fixed);
        assert_eq!(root.version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_missing_version_deserializes_as_legacy() {
        let root: RootStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(root.version, 0);
        // Everything else still gets the structural defaults
        assert_eq!(root.font_family, "Helvetica");
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut root = RootStyle::default();
        for prop in BODY_PROPS {
            let v = root.get(prop).unwrap();
            root.set(prop, &v).unwrap();
            assert_eq!(root.get(prop).unwrap(), v, "{prop}");
        }
    }

    #[test]
    fn test_set_rejects_unknown_property() {
        let mut root = RootStyle::default();
        let err = root.set("bogus", &StyleValue::from(1.0)).unwrap_err();
        assert_eq!(err, StyleError::UnknownProperty("bogus".to_string()));
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let mut root = RootStyle::default();
        assert!(root.set("fontSize", &StyleValue::from("large")).is_err());
    }

    #[test]
    fn test_style_value_untagged_round_trip() {
        let vals = vec![
            StyleValue::from(true),
            StyleValue::from(12.0),
            StyleValue::from("#ff5d55"),
        ];
        let json = serde_json::to_string(&vals).unwrap();
        let back: Vec<StyleValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(vals, back);
    }
}
