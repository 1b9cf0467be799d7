use crate::id::IdGenerator;
use crate::style::{StyleOverrides, StyleValue};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type PartId = String;

/// Opaque rich-text payload owned by the external editor collaborator
///
/// `raw` is the editor's own block structure and is never interpreted
/// here; `html` is the collaborator's exported markup, embedded verbatim
/// (modulo the paragraph-margin fixup) by the compiler. Both round-trip
/// untouched through duplicate and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub raw: serde_json::Value,
    #[serde(default)]
    pub html: String,
}

impl RichText {
    /// Seed a payload from plain text, as the composer does for freshly
    /// dropped Text/Headline parts before the editor takes over.
    pub fn plain(text: &str) -> Self {
        let escaped = escape_text(text);
        Self {
            raw: json!({
                "blocks": [{
                    "text": text,
                    "type": "unstyled",
                    "depth": 0,
                    "inlineStyleRanges": [],
                    "entityRanges": [],
                }],
                "entityMap": {},
            }),
            html: format!("<p>{}</p>", escaped),
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// One social network entry of a Social part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialNetwork {
    pub network: String,
    pub enabled: bool,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub label: String,
}

impl SocialNetwork {
    fn new(network: &str, enabled: bool, label: &str) -> Self {
        Self {
            network: network.to_string(),
            enabled,
            link: String::new(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialLayout {
    #[serde(rename = "horizontal")]
    Horizontal,
    #[serde(rename = "vertical")]
    Vertical,
}

/// Occupancy of a column slot
///
/// Serialized untagged so a slot reads as `null`, a single part object, or
/// an array of stacked parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SlotContent {
    #[default]
    Empty,
    Single(Box<Part>),
    Stack(Vec<Part>),
}

impl SlotContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SlotContent::Empty => true,
            SlotContent::Single(_) => false,
            SlotContent::Stack(parts) => parts.is_empty(),
        }
    }

    /// Number of occupants
    pub fn len(&self) -> usize {
        match self {
            SlotContent::Empty => 0,
            SlotContent::Single(_) => 1,
            SlotContent::Stack(parts) => parts.len(),
        }
    }

    pub fn parts(&self) -> Vec<&Part> {
        match self {
            SlotContent::Empty => Vec::new(),
            SlotContent::Single(part) => vec![part],
            SlotContent::Stack(parts) => parts.iter().collect(),
        }
    }

    pub fn parts_mut(&mut self) -> Vec<&mut Part> {
        match self {
            SlotContent::Empty => Vec::new(),
            SlotContent::Single(part) => vec![part],
            SlotContent::Stack(parts) => parts.iter_mut().collect(),
        }
    }

    /// Insert an occupant at `index`, promoting the variant as needed.
    /// `index` past the current occupant count is out of bounds.
    pub fn insert_at(&mut self, index: usize, part: Part) -> bool {
        if index > self.len() {
            return false;
        }
        let current = std::mem::take(self);
        *self = match current {
            SlotContent::Empty => SlotContent::Single(Box::new(part)),
            SlotContent::Single(existing) => {
                let mut stack = vec![*existing];
                stack.insert(index, part);
                SlotContent::Stack(stack)
            }
            SlotContent::Stack(mut stack) => {
                stack.insert(index, part);
                SlotContent::Stack(stack)
            }
        };
        true
    }

    /// Remove the occupant at `index`; an emptied slot reverts to `Empty`.
    pub fn remove_at(&mut self, index: usize) -> Option<Part> {
        let current = std::mem::take(self);
        match current {
            SlotContent::Empty => None,
            SlotContent::Single(part) => {
                if index == 0 {
                    Some(*part)
                } else {
                    *self = SlotContent::Single(part);
                    None
                }
            }
            SlotContent::Stack(mut stack) => {
                if index >= stack.len() {
                    *self = SlotContent::Stack(stack);
                    return None;
                }
                let removed = stack.remove(index);
                if !stack.is_empty() {
                    *self = SlotContent::Stack(stack);
                }
                Some(removed)
            }
        }
    }
}

/// A column slot: a 12-grid width plus its occupants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub width: u8,
    #[serde(default)]
    pub content: SlotContent,
}

impl Slot {
    pub fn empty(width: u8) -> Self {
        Self {
            width,
            content: SlotContent::Empty,
        }
    }
}

/// Part kind discriminant, used wherever only the shape matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Headline,
    Text,
    Image,
    Divider,
    Button,
    Input,
    Columns,
    Social,
    Spacer,
    Invisible,
}

/// Kind-specific content payload of a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PartBody {
    Headline {
        content: RichText,
    },
    Text {
        content: RichText,
    },
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        scale: f64,
        link: String,
    },
    Divider {
        size: f64,
        top: f64,
        bottom: f64,
        left: f64,
        right: f64,
    },
    Button {
        text: String,
        link: String,
    },
    Input {
        placeholder: String,
        field: String,
        #[serde(rename = "inputType")]
        input_type: String,
        required: bool,
    },
    Columns {
        slots: Vec<Slot>,
        stack: bool,
        valign: String,
    },
    Social {
        networks: Vec<SocialNetwork>,
        labels: bool,
        #[serde(rename = "iconColor")]
        icon_color: String,
        #[serde(rename = "iconCustom")]
        icon_custom: String,
        layout: SocialLayout,
    },
    Spacer {
        height: f64,
    },
    Invisible,
}

impl PartBody {
    pub fn kind(&self) -> PartKind {
        match self {
            PartBody::Headline { .. } => PartKind::Headline,
            PartBody::Text { .. } => PartKind::Text,
            PartBody::Image { .. } => PartKind::Image,
            PartBody::Divider { .. } => PartKind::Divider,
            PartBody::Button { .. } => PartKind::Button,
            PartBody::Input { .. } => PartKind::Input,
            PartBody::Columns { .. } => PartKind::Columns,
            PartBody::Social { .. } => PartKind::Social,
            PartBody::Spacer { .. } => PartKind::Spacer,
            PartBody::Invisible => PartKind::Invisible,
        }
    }
}

/// A content block in the template tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,

    #[serde(flatten)]
    pub body: PartBody,

    /// Sparse style overrides; only divergence from the cascade is stored
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub overrides: StyleOverrides,

    /// Reserved footer part, paired with a preceding Invisible marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub footer: bool,

    /// Denormalized compiled-markup cache; must always equal the compiler
    /// output for this part, staleness after a mutation is a defect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl Part {
    /// Create a part with the composer's per-kind content defaults
    pub fn new(kind: PartKind, form: bool, in_columns: bool, ids: &mut IdGenerator) -> Self {
        let mut overrides = StyleOverrides::new();
        if form && !in_columns {
            overrides.insert("backgroundType".to_string(), "color".into());
            overrides.insert("backgroundColor".to_string(), "#ffffff".into());
        }

        let body = match kind {
            PartKind::Headline => {
                overrides.insert("fontSize".to_string(), 30.0.into());
                PartBody::Headline {
                    content: RichText::plain("Headline That Grabs Your Attention"),
                }
            }
            PartKind::Text => {
                overrides.insert("align".to_string(), "left".into());
                PartBody::Text {
                    content: RichText::plain(
                        "A text block which can contain different styles and links.",
                    ),
                }
            }
            PartKind::Image => PartBody::Image {
                src: String::new(),
                width: None,
                height: None,
                scale: 100.0,
                link: String::new(),
            },
            PartKind::Divider => PartBody::Divider {
                size: 3.0,
                top: 20.0,
                bottom: 20.0,
                left: 0.0,
                right: 0.0,
            },
            PartKind::Button => {
                overrides.insert("fontSize".to_string(), 24.0.into());
                overrides.insert("color".to_string(), "#FFFFFF".into());
                overrides.insert("buttonColor".to_string(), "#ff5d55".into());
                PartBody::Button {
                    text: if form { "Subscribe" } else { "Click Me" }.to_string(),
                    link: String::new(),
                }
            }
            PartKind::Input => {
                overrides.insert("fontSize".to_string(), 16.0.into());
                overrides.insert("color".to_string(), "#333333".into());
                overrides.insert("inputColor".to_string(), "#ffffff".into());
                overrides.insert("inputBorderColor".to_string(), "#c0c0c0".into());
                overrides.insert("inputHeight".to_string(), 6.0.into());
                overrides.insert("inputWidth".to_string(), 6.0.into());
                overrides.insert("inputRadius".to_string(), 2.0.into());
                overrides.insert("align".to_string(), "left".into());
                PartBody::Input {
                    placeholder: String::new(),
                    field: String::new(),
                    input_type: "text".to_string(),
                    required: true,
                }
            }
            PartKind::Columns => PartBody::Columns {
                slots: vec![Slot::empty(6), Slot::empty(6)],
                stack: true,
                valign: "top".to_string(),
            },
            PartKind::Social => {
                overrides.insert("fontSize".to_string(), 12.0.into());
                PartBody::Social {
                    networks: vec![
                        SocialNetwork::new("facebook", true, "Share"),
                        SocialNetwork::new("twitter", true, "Tweet"),
                        SocialNetwork::new("instagram", true, "Share"),
                        SocialNetwork::new("pinterest", false, "Pin it"),
                        SocialNetwork::new("linkedin", false, "Share"),
                    ],
                    labels: true,
                    icon_color: "default".to_string(),
                    icon_custom: "#AAAAAA".to_string(),
                    layout: SocialLayout::Horizontal,
                }
            }
            PartKind::Spacer => PartBody::Spacer { height: 50.0 },
            PartKind::Invisible => PartBody::Invisible,
        };

        Self {
            id: ids.next_id(),
            body,
            overrides,
            footer: false,
            html: None,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.body.kind()
    }

    pub fn is_columns(&self) -> bool {
        matches!(self.body, PartBody::Columns { .. })
    }

    /// Slots of a Columns part
    pub fn slots(&self) -> Option<&Vec<Slot>> {
        match &self.body {
            PartBody::Columns { slots, .. } => Some(slots),
            _ => None,
        }
    }

    pub fn slots_mut(&mut self) -> Option<&mut Vec<Slot>> {
        match &mut self.body {
            PartBody::Columns { slots, .. } => Some(slots),
            _ => None,
        }
    }

    /// Deep-clone with a fresh id at every level
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Self {
        let mut clone = self.clone();
        clone.reassign_ids(ids);
        clone
    }

    fn reassign_ids(&mut self, ids: &mut IdGenerator) {
        self.id = ids.next_id();
        if let Some(slots) = self.slots_mut() {
            for slot in slots {
                match &mut slot.content {
                    SlotContent::Empty => {}
                    SlotContent::Single(part) => part.reassign_ids(ids),
                    SlotContent::Stack(parts) => {
                        for part in parts {
                            part.reassign_ids(ids);
                        }
                    }
                }
            }
        }
    }

    /// Visit this part and every nested occupant, depth first
    pub fn walk(&self, f: &mut impl FnMut(&Part)) {
        f(self);
        if let Some(slots) = self.slots() {
            for slot in slots {
                for part in slot.content.parts() {
                    part.walk(f);
                }
            }
        }
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Part)) {
        f(self);
        if let Some(slots) = self.slots_mut() {
            for slot in slots {
                for part in slot.content.parts_mut() {
                    part.walk_mut(f);
                }
            }
        }
    }

    pub fn style(&self, prop: &str) -> Option<&StyleValue> {
        self.overrides.get(prop)
    }
}
