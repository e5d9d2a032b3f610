use serde_json::Value;

use shopkeep_core::document::{count_field, number_field, parsed_field, str_field};
use shopkeep_core::fields::{
    ensure_not_blank, ensure_price, parse_count, parse_price, parse_value, required,
};
use shopkeep_core::record::{ensure_known_field, resolve_variant};
use shopkeep_core::{Document, ExpiryDate, RawFields, Record, RecordError, RecordResult};

/// Tag of an electronic item.
pub const ELECTRONIC_ITEM: &str = "ProductoElectronico";
/// Tag of a perishable (food) item.
pub const PERISHABLE_ITEM: &str = "ProductoAlimenticio";

/// On-disk field names.
pub mod field {
    pub const NAME: &str = "nombre";
    pub const PRICE: &str = "precio";
    pub const QUANTITY: &str = "cantidad";
    pub const WARRANTY_MONTHS: &str = "garantia";
    pub const EXPIRY_DATE: &str = "fecha_caducidad";
}

const ELECTRONIC_FIELDS: &[&str] = &[
    field::NAME,
    field::PRICE,
    field::QUANTITY,
    field::WARRANTY_MONTHS,
];
const PERISHABLE_FIELDS: &[&str] = &[
    field::NAME,
    field::PRICE,
    field::QUANTITY,
    field::EXPIRY_DATE,
];

/// Variant-specific part of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Electronic { warranty_months: u32 },
    Perishable { expiry_date: ExpiryDate },
}

/// A stocked product line.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    price: f64,
    quantity: u32,
    kind: ItemKind,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        kind: ItemKind,
    ) -> RecordResult<Self> {
        let item = Self {
            name: name.into(),
            price,
            quantity,
            kind,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn electronic(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        warranty_months: u32,
    ) -> RecordResult<Self> {
        Self::new(name, price, quantity, ItemKind::Electronic { warranty_months })
    }

    pub fn perishable(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        expiry_date: ExpiryDate,
    ) -> RecordResult<Self> {
        Self::new(name, price, quantity, ItemKind::Perishable { expiry_date })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }
}

impl Record for Item {
    const NOUN: &'static str = "item";
    const VARIANT_TAGS: &'static [&'static str] = &[ELECTRONIC_ITEM, PERISHABLE_ITEM];

    fn variant_tag(&self) -> &'static str {
        match self.kind {
            ItemKind::Electronic { .. } => ELECTRONIC_ITEM,
            ItemKind::Perishable { .. } => PERISHABLE_ITEM,
        }
    }

    fn create(variant: &str, fields: &RawFields) -> RecordResult<Self> {
        let variant = resolve_variant::<Self>(variant)
            .ok_or_else(|| RecordError::validation(format!("unknown item variant {variant:?}")))?;

        let name = required(fields, field::NAME)?;
        let price = parse_price(field::PRICE, required(fields, field::PRICE)?)?;
        let quantity = parse_count(field::QUANTITY, required(fields, field::QUANTITY)?)?;

        let kind = match variant {
            ELECTRONIC_ITEM => ItemKind::Electronic {
                warranty_months: parse_count(
                    field::WARRANTY_MONTHS,
                    required(fields, field::WARRANTY_MONTHS)?,
                )?,
            },
            _ => ItemKind::Perishable {
                expiry_date: parse_value(
                    field::EXPIRY_DATE,
                    required(fields, field::EXPIRY_DATE)?,
                )?,
            },
        };

        Self::new(name, price, quantity, kind)
    }

    fn validate(&self) -> RecordResult<()> {
        ensure_not_blank(field::NAME, &self.name)?;
        ensure_price(field::PRICE, self.price)
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self.kind {
            ItemKind::Electronic { .. } => ELECTRONIC_FIELDS,
            ItemKind::Perishable { .. } => PERISHABLE_FIELDS,
        }
    }

    fn set_field(&mut self, name: &str, raw: &str) -> RecordResult<()> {
        ensure_known_field(self, name)?;
        let tag = self.variant_tag();
        match (name, &mut self.kind) {
            (field::NAME, _) => self.name = raw.trim().to_string(),
            (field::PRICE, _) => self.price = parse_price(field::PRICE, raw)?,
            (field::QUANTITY, _) => self.quantity = parse_count(field::QUANTITY, raw)?,
            (field::WARRANTY_MONTHS, ItemKind::Electronic { warranty_months }) => {
                *warranty_months = parse_count(field::WARRANTY_MONTHS, raw)?;
            }
            (field::EXPIRY_DATE, ItemKind::Perishable { expiry_date }) => {
                *expiry_date = parse_value(field::EXPIRY_DATE, raw)?;
            }
            _ => {
                return Err(RecordError::validation(format!(
                    "field `{name}` cannot be set on {tag}"
                )));
            }
        }
        Ok(())
    }

    fn write_fields(&self, doc: &mut Document) {
        doc.insert(field::NAME.into(), Value::String(self.name.clone()));
        doc.insert(field::PRICE.into(), Value::from(self.price));
        doc.insert(field::QUANTITY.into(), Value::from(self.quantity));
        match &self.kind {
            ItemKind::Electronic { warranty_months } => {
                doc.insert(field::WARRANTY_MONTHS.into(), Value::from(*warranty_months));
            }
            ItemKind::Perishable { expiry_date } => {
                doc.insert(
                    field::EXPIRY_DATE.into(),
                    Value::String(expiry_date.to_string()),
                );
            }
        }
    }

    fn read_fields(variant: &'static str, doc: &Document) -> RecordResult<Self> {
        let kind = match variant {
            ELECTRONIC_ITEM => ItemKind::Electronic {
                warranty_months: count_field(doc, field::WARRANTY_MONTHS)?,
            },
            _ => ItemKind::Perishable {
                expiry_date: parsed_field(doc, field::EXPIRY_DATE)?,
            },
        };

        Ok(Self {
            name: str_field(doc, field::NAME)?,
            price: number_field(doc, field::PRICE)?,
            quantity: count_field(doc, field::QUANTITY)?,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopkeep_core::{deserialize, raw_fields, serialize};

    fn mouse() -> Item {
        Item::electronic("Mouse", 15.5, 3, 12).unwrap()
    }

    fn milk() -> Item {
        Item::perishable("Leche", 1.2, 40, "2025-06-30".parse().unwrap()).unwrap()
    }

    #[test]
    fn electronic_item_serializes_with_explicit_tag() {
        assert_eq!(
            Value::Object(serialize(&mouse())),
            json!({
                "tipo": "ProductoElectronico",
                "nombre": "Mouse",
                "precio": 15.5,
                "cantidad": 3,
                "garantia": 12
            })
        );
    }

    #[test]
    fn perishable_item_round_trips() {
        let back: Item = deserialize(&Value::Object(serialize(&milk()))).unwrap();
        assert_eq!(back, milk());
        assert_eq!(back.variant_tag(), PERISHABLE_ITEM);
    }

    #[test]
    fn negative_or_non_finite_price_is_rejected() {
        assert!(matches!(
            Item::electronic("Mouse", -0.5, 1, 12),
            Err(RecordError::Validation(_))
        ));
        assert!(Item::electronic("Mouse", f64::INFINITY, 1, 12).is_err());
        assert!(Item::electronic("", 1.0, 1, 12).is_err());
    }

    #[test]
    fn create_parses_raw_input() {
        let fields = raw_fields([
            ("nombre", "Leche"),
            ("precio", "1.2"),
            ("cantidad", "40"),
            ("fecha_caducidad", "2025-06-30"),
        ]);
        assert_eq!(Item::create(PERISHABLE_ITEM, &fields).unwrap(), milk());
    }

    #[test]
    fn create_rejects_wrong_semantic_types() {
        let fields = raw_fields([
            ("nombre", "Mouse"),
            ("precio", "15.5"),
            ("cantidad", "tres"),
            ("garantia", "12"),
        ]);
        let err = Item::create(ELECTRONIC_ITEM, &fields).unwrap_err();
        assert!(matches!(err, RecordError::Validation(msg) if msg.contains("cantidad")));

        let fields = raw_fields([
            ("nombre", "Leche"),
            ("precio", "1.2"),
            ("cantidad", "40"),
            ("fecha_caducidad", "30/06/2025"),
        ]);
        assert!(matches!(
            Item::create(PERISHABLE_ITEM, &fields),
            Err(RecordError::Validation(_))
        ));
    }

    #[test]
    fn numeric_strings_written_by_older_files_are_accepted() {
        let doc = json!({
            "tipo": "ProductoElectronico",
            "nombre": "Mouse",
            "precio": "15.5",
            "cantidad": "3",
            "garantia": 12
        });
        assert_eq!(deserialize::<Item>(&doc).unwrap(), mouse());
    }

    #[test]
    fn documents_without_tag_or_with_unknown_tag_are_format_errors() {
        let untagged = json!({ "nombre": "Mouse", "precio": 15.5, "cantidad": 3, "garantia": 12 });
        assert!(matches!(deserialize::<Item>(&untagged), Err(RecordError::Format(_))));

        let unknown = json!({ "tipo": "ProductoTextil", "nombre": "Camisa", "precio": 9, "cantidad": 1 });
        assert!(matches!(deserialize::<Item>(&unknown), Err(RecordError::Format(_))));
    }

    #[test]
    fn negative_price_in_document_fails_validation() {
        let doc = json!({
            "tipo": "ProductoElectronico",
            "nombre": "Mouse",
            "precio": -3,
            "cantidad": 3,
            "garantia": 12
        });
        assert!(matches!(deserialize::<Item>(&doc), Err(RecordError::Validation(_))));
    }

    #[test]
    fn set_field_respects_variant_schema() {
        let mut item = mouse();
        item.set_field("precio", "17.25").unwrap();
        item.set_field("garantia", "24").unwrap();
        assert_eq!(item.price(), 17.25);
        assert_eq!(item.kind(), &ItemKind::Electronic { warranty_months: 24 });

        let err = item.set_field("fecha_caducidad", "2025-01-01").unwrap_err();
        assert!(matches!(err, RecordError::Validation(msg) if msg.contains("garantia")));
        assert!(item.set_field("color", "rojo").is_err());
        assert!(item.set_field("cantidad", "-2").is_err());
        assert_eq!(item.quantity(), 3);
    }

    mod proptest_tests {
        use super::*;
        use chrono::NaiveDate;
        use proptest::prelude::*;

        proptest! {
            /// Property: every valid item survives serialize -> deserialize unchanged.
            #[test]
            fn round_trip_preserves_every_field(
                name in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                price in 0.0f64..1_000_000.0,
                quantity in any::<u32>(),
                months in any::<u32>(),
                days in 0i64..40_000,
                electronic in any::<bool>(),
            ) {
                let item = if electronic {
                    Item::electronic(name, price, quantity, months).unwrap()
                } else {
                    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
                    let expiry = ExpiryDate::from(base + chrono::Duration::days(days));
                    Item::perishable(name, price, quantity, expiry).unwrap()
                };

                let back: Item = deserialize(&Value::Object(serialize(&item))).unwrap();
                prop_assert_eq!(back, item);
            }
        }
    }
}
