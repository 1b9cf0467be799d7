//! Schema migration
//!
//! Version 2 documents let parts inherit the flat body padding of 10;
//! version 3 parts own their paddings outright and inherit 0. Migration
//! materializes the legacy value as explicit overrides wherever a part
//! has none, so resolved styles are unchanged by the version bump.

use mailcraft_model::{Document, PartBody, StyleValue, Variant, CURRENT_SCHEMA_VERSION};

const MIGRATED_PADDINGS: [&str; 4] = [
    "paddingTop",
    "paddingBottom",
    "paddingLeft",
    "paddingRight",
];

/// Bring both variants to the current schema version
///
/// Idempotent: a current-version variant is left untouched. Returns
/// whether anything changed.
pub fn migrate(doc: &mut Document) -> bool {
    let desktop = migrate_variant(&mut doc.desktop);
    let mobile = migrate_variant(&mut doc.mobile);
    desktop || mobile
}

fn migrate_variant(variant: &mut Variant) -> bool {
    if variant.root.version >= CURRENT_SCHEMA_VERSION {
        return false;
    }

    for part in &mut variant.parts {
        part.walk_mut(&mut |p| {
            if matches!(p.body, PartBody::Invisible) {
                return;
            }
            for prop in MIGRATED_PADDINGS {
                p.overrides
                    .entry(prop.to_string())
                    .or_insert(StyleValue::Num(10.0));
            }
            p.html = None;
        });
    }

    variant.root.version = CURRENT_SCHEMA_VERSION;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_model::{IdGenerator, Part, PartKind, RootStyle, SlotContent};

    fn legacy_variant() -> (Variant, IdGenerator) {
        let mut ids = IdGenerator::new("legacy");
        let mut root = RootStyle::default();
        root.version = 2;
        let mut variant = Variant::new(root);

        variant
            .parts
            .push(Part::new(PartKind::Text, false, false, &mut ids));
        let mut columns = Part::new(PartKind::Columns, false, false, &mut ids);
        let inner = Part::new(PartKind::Spacer, false, true, &mut ids);
        columns.slots_mut().unwrap()[0].content = SlotContent::Single(Box::new(inner));
        variant.parts.push(columns);
        variant
            .parts
            .push(Part::new(PartKind::Invisible, false, false, &mut ids));

        (variant, ids)
    }

    #[test]
    fn test_migration_fills_missing_paddings() {
        let (variant, _) = legacy_variant();
        let mut doc = Document::new(false);
        doc.desktop = variant;

        assert!(migrate(&mut doc));
        assert_eq!(doc.desktop.root.version, CURRENT_SCHEMA_VERSION);

        let text = &doc.desktop.parts[0];
        for prop in MIGRATED_PADDINGS {
            assert_eq!(text.overrides.get(prop), Some(&StyleValue::Num(10.0)));
        }

        // Nested occupants migrate too
        let inner = doc.desktop.parts[1].slots().unwrap()[0].content.parts()[0];
        assert_eq!(
            inner.overrides.get("paddingTop"),
            Some(&StyleValue::Num(10.0))
        );
    }

    #[test]
    fn test_migration_keeps_existing_overrides() {
        let (mut variant, _) = legacy_variant();
        variant.parts[0]
            .overrides
            .insert("paddingTop".to_string(), StyleValue::Num(25.0));
        let mut doc = Document::new(false);
        doc.desktop = variant;

        migrate(&mut doc);
        assert_eq!(
            doc.desktop.parts[0].overrides.get("paddingTop"),
            Some(&StyleValue::Num(25.0))
        );
    }

    #[test]
    fn test_migration_skips_invisible_markers() {
        let (variant, _) = legacy_variant();
        let mut doc = Document::new(false);
        doc.desktop = variant;

        migrate(&mut doc);
        assert!(doc.desktop.parts[2].overrides.is_empty());
    }

    #[test]
    fn test_migration_is_idempotent() {
        let (variant, _) = legacy_variant();
        let mut doc = Document::new(false);
        doc.desktop = variant;

        assert!(migrate(&mut doc));
        let snapshot = doc.clone();
        assert!(!migrate(&mut doc));
        assert_eq!(doc, snapshot);
    }
}
