use crate::part::{Part, PartId, SlotContent};
use crate::style::{BodyType, RootStyle};
use serde::{Deserialize, Serialize};

/// Which of the two designs a mutation or lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Desktop,
    Mobile,
}

/// Position of a part within a variant's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Locator {
    /// Top-level part list position
    Top { index: usize },
    /// Occupant of a Columns part: top-level index of the container, slot
    /// number, and position within the slot's stack
    Slot {
        columns: usize,
        slot: usize,
        index: usize,
    },
}

/// One design of a template: body-wide style plus the ordered part list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(rename = "bodyStyle")]
    pub root: RootStyle,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Variant {
    pub fn new(root: RootStyle) -> Self {
        Self {
            root,
            parts: Vec::new(),
        }
    }

    /// Whether the trailing Invisible/footer pair is present
    pub fn has_footer(&self) -> bool {
        self.parts.last().is_some_and(|p| p.footer)
    }

    /// Find a part anywhere in the tree by id
    pub fn find_part(&self, id: &str) -> Option<&Part> {
        fn find_in<'a>(part: &'a Part, id: &str) -> Option<&'a Part> {
            if part.id == id {
                return Some(part);
            }
            for slot in part.slots().into_iter().flatten() {
                for occupant in slot.content.parts() {
                    if let Some(found) = find_in(occupant, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        self.parts.iter().find_map(|p| find_in(p, id))
    }

    pub fn find_part_mut(&mut self, id: &str) -> Option<&mut Part> {
        fn find_in<'a>(part: &'a mut Part, id: &str) -> Option<&'a mut Part> {
            if part.id == id {
                return Some(part);
            }
            for slot in part.slots_mut().into_iter().flatten() {
                for occupant in slot.content.parts_mut() {
                    if let Some(found) = find_in(occupant, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        self.parts.iter_mut().find_map(|p| find_in(p, id))
    }

    /// Locate a part by id, top-level or nested
    pub fn locate(&self, id: &str) -> Option<Locator> {
        for (i, part) in self.parts.iter().enumerate() {
            if part.id == id {
                return Some(Locator::Top { index: i });
            }
            if let Some(slots) = part.slots() {
                for (s, slot) in slots.iter().enumerate() {
                    for (j, occupant) in slot.content.parts().iter().enumerate() {
                        if occupant.id == id {
                            return Some(Locator::Slot {
                                columns: i,
                                slot: s,
                                index: j,
                            });
                        }
                    }
                }
            }
        }
        None
    }

    /// Resolve a locator to the part it points at
    pub fn part_at(&self, locator: &Locator) -> Option<&Part> {
        match locator {
            Locator::Top { index } => self.parts.get(*index),
            Locator::Slot {
                columns,
                slot,
                index,
            } => {
                let slots = self.parts.get(*columns)?.slots()?;
                let content = &slots.get(*slot)?.content;
                match content {
                    SlotContent::Empty => None,
                    SlotContent::Single(part) => (*index == 0).then_some(part.as_ref()),
                    SlotContent::Stack(parts) => parts.get(*index),
                }
            }
        }
    }

    /// Every part id in the variant, nested occupants included
    pub fn all_ids(&self) -> Vec<PartId> {
        let mut ids = Vec::new();
        for part in &self.parts {
            part.walk(&mut |p| ids.push(p.id.clone()));
        }
        ids
    }
}

/// A complete template document: two variants sharing nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Form templates get close-button styling and footer-less bodies
    #[serde(default)]
    pub form: bool,
    pub desktop: Variant,
    pub mobile: Variant,
}

impl Document {
    pub fn new(form: bool) -> Self {
        let mut mobile_root = RootStyle::default();
        mobile_root.body_type = BodyType::Full;
        mobile_root.body_width = 300.0;
        mobile_root.padding_top = 20.0;
        mobile_root.padding_bottom = 20.0;
        mobile_root.padding_left = 20.0;
        mobile_root.padding_right = 20.0;

        Self {
            form,
            desktop: Variant::new(RootStyle::default()),
            mobile: Variant::new(mobile_root),
        }
    }

    pub fn variant(&self, kind: VariantKind) -> &Variant {
        match kind {
            VariantKind::Desktop => &self.desktop,
            VariantKind::Mobile => &self.mobile,
        }
    }

    pub fn variant_mut(&mut self, kind: VariantKind) -> &mut Variant {
        match kind {
            VariantKind::Desktop => &mut self.desktop,
            VariantKind::Mobile => &mut self.mobile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use crate::part::{PartKind, Slot};

    fn sample_variant() -> (Variant, IdGenerator) {
        let mut ids = IdGenerator::new("doc");
        let mut variant = Variant::new(RootStyle::default());

        variant
            .parts
            .push(Part::new(PartKind::Headline, false, false, &mut ids));

        let mut columns = Part::new(PartKind::Columns, false, false, &mut ids);
        let inner = Part::new(PartKind::Text, false, true, &mut ids);
        columns.slots_mut().unwrap()[1].content = SlotContent::Single(Box::new(inner));
        variant.parts.push(columns);

        (variant, ids)
    }

    #[test]
    fn test_locate_top_level_and_nested() {
        let (variant, _) = sample_variant();

        let head_id = variant.parts[0].id.clone();
        assert_eq!(variant.locate(&head_id), Some(Locator::Top { index: 0 }));

        let nested_id = variant.parts[1].slots().unwrap()[1]
            .content
            .parts()[0]
            .id
            .clone();
        assert_eq!(
            variant.locate(&nested_id),
            Some(Locator::Slot {
                columns: 1,
                slot: 1,
                index: 0
            })
        );
        assert_eq!(variant.locate("missing"), None);
    }

    #[test]
    fn test_part_at_follows_locator() {
        let (variant, _) = sample_variant();
        let loc = Locator::Slot {
            columns: 1,
            slot: 1,
            index: 0,
        };
        assert_eq!(variant.part_at(&loc).unwrap().kind(), PartKind::Text);

        let missing = Locator::Slot {
            columns: 1,
            slot: 0,
            index: 0,
        };
        assert!(variant.part_at(&missing).is_none());
    }

    #[test]
    fn test_find_part_by_id() {
        let (variant, _) = sample_variant();
        let ids = variant.all_ids();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert_eq!(variant.find_part(id).unwrap().id, *id);
        }
    }

    #[test]
    fn test_mobile_variant_defaults() {
        let doc = Document::new(true);
        assert_eq!(doc.mobile.root.body_type, BodyType::Full);
        assert_eq!(doc.mobile.root.body_width, 300.0);
        assert_eq!(doc.desktop.root.body_type, BodyType::Fixed);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let (variant, _) = sample_variant();
        let mut doc = Document::new(false);
        doc.desktop = variant;

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_slot_geometry_helpers() {
        let slot = Slot::empty(6);
        assert!(slot.content.is_empty());
        assert_eq!(slot.content.len(), 0);
    }
}
