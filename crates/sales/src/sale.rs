use shopkeep_core::document::{list_field, parsed_field, str_field};
use shopkeep_core::fields::{ensure_not_blank, parse_list, parse_value, required};
use shopkeep_core::record::{ensure_known_field, resolve_variant};
use shopkeep_core::{Document, RawFields, Record, RecordError, RecordResult, Timestamp};

use serde_json::Value;

/// Tag of an online sale.
pub const ONLINE_SALE: &str = "VentaOnline";
/// Tag of an in-store sale.
pub const LOCAL_SALE: &str = "VentaLocal";

/// On-disk field names.
pub mod field {
    pub const DATE: &str = "fecha";
    pub const CUSTOMER: &str = "cliente";
    pub const PRODUCTS: &str = "productos";
    pub const PLATFORM: &str = "plataforma";
    pub const BRANCH: &str = "sucursal";
}

const ONLINE_FIELDS: &[&str] = &[field::DATE, field::CUSTOMER, field::PRODUCTS, field::PLATFORM];
const LOCAL_FIELDS: &[&str] = &[field::DATE, field::CUSTOMER, field::PRODUCTS, field::BRANCH];

/// Where the sale happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleChannel {
    Online { platform: String },
    Local { branch: String },
}

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    occurred_at: Timestamp,
    customer: String,
    products: Vec<String>,
    channel: SaleChannel,
}

impl Sale {
    pub fn new(
        occurred_at: Timestamp,
        customer: impl Into<String>,
        products: Vec<String>,
        channel: SaleChannel,
    ) -> RecordResult<Self> {
        let sale = Self {
            occurred_at,
            customer: customer.into(),
            products,
            channel,
        };
        sale.validate()?;
        Ok(sale)
    }

    pub fn online(
        occurred_at: Timestamp,
        customer: impl Into<String>,
        products: Vec<String>,
        platform: impl Into<String>,
    ) -> RecordResult<Self> {
        Self::new(
            occurred_at,
            customer,
            products,
            SaleChannel::Online {
                platform: platform.into(),
            },
        )
    }

    pub fn local(
        occurred_at: Timestamp,
        customer: impl Into<String>,
        products: Vec<String>,
        branch: impl Into<String>,
    ) -> RecordResult<Self> {
        Self::new(
            occurred_at,
            customer,
            products,
            SaleChannel::Local {
                branch: branch.into(),
            },
        )
    }

    pub fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn channel(&self) -> &SaleChannel {
        &self.channel
    }

    pub fn is_online(&self) -> bool {
        matches!(self.channel, SaleChannel::Online { .. })
    }
}

impl Record for Sale {
    const NOUN: &'static str = "sale";
    const VARIANT_TAGS: &'static [&'static str] = &[ONLINE_SALE, LOCAL_SALE];

    fn variant_tag(&self) -> &'static str {
        match self.channel {
            SaleChannel::Online { .. } => ONLINE_SALE,
            SaleChannel::Local { .. } => LOCAL_SALE,
        }
    }

    /// `fecha` is optional in raw input; a sale entered without one is stamped with the current time.
    fn create(variant: &str, fields: &RawFields) -> RecordResult<Self> {
        let variant = resolve_variant::<Self>(variant)
            .ok_or_else(|| RecordError::validation(format!("unknown sale variant {variant:?}")))?;

        let occurred_at = match fields.get(field::DATE).map(|v| v.trim()) {
            Some(raw) if !raw.is_empty() => parse_value::<Timestamp>(field::DATE, raw)?,
            _ => Timestamp::now(),
        };
        let customer = required(fields, field::CUSTOMER)?;
        let products = parse_list(fields.get(field::PRODUCTS).map(String::as_str).unwrap_or(""));

        let channel = match variant {
            ONLINE_SALE => SaleChannel::Online {
                platform: required(fields, field::PLATFORM)?.to_string(),
            },
            _ => SaleChannel::Local {
                branch: required(fields, field::BRANCH)?.to_string(),
            },
        };

        Self::new(occurred_at, customer, products, channel)
    }

    fn validate(&self) -> RecordResult<()> {
        ensure_not_blank(field::CUSTOMER, &self.customer)?;
        match &self.channel {
            SaleChannel::Online { platform } => ensure_not_blank(field::PLATFORM, platform),
            SaleChannel::Local { branch } => ensure_not_blank(field::BRANCH, branch),
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self.channel {
            SaleChannel::Online { .. } => ONLINE_FIELDS,
            SaleChannel::Local { .. } => LOCAL_FIELDS,
        }
    }

    fn set_field(&mut self, name: &str, raw: &str) -> RecordResult<()> {
        ensure_known_field(self, name)?;
        let tag = self.variant_tag();
        match (name, &mut self.channel) {
            (field::DATE, _) => self.occurred_at = parse_value(field::DATE, raw)?,
            (field::CUSTOMER, _) => self.customer = raw.trim().to_string(),
            (field::PRODUCTS, _) => self.products = parse_list(raw),
            (field::PLATFORM, SaleChannel::Online { platform }) => *platform = raw.trim().to_string(),
            (field::BRANCH, SaleChannel::Local { branch }) => *branch = raw.trim().to_string(),
            _ => {
                return Err(RecordError::validation(format!(
                    "field `{name}` cannot be set on {tag}"
                )));
            }
        }
        Ok(())
    }

    fn write_fields(&self, doc: &mut Document) {
        doc.insert(field::DATE.into(), Value::String(self.occurred_at.to_string()));
        doc.insert(field::CUSTOMER.into(), Value::String(self.customer.clone()));
        doc.insert(
            field::PRODUCTS.into(),
            Value::Array(self.products.iter().cloned().map(Value::String).collect()),
        );
        match &self.channel {
            SaleChannel::Online { platform } => {
                doc.insert(field::PLATFORM.into(), Value::String(platform.clone()));
            }
            SaleChannel::Local { branch } => {
                doc.insert(field::BRANCH.into(), Value::String(branch.clone()));
            }
        }
    }

    fn read_fields(variant: &'static str, doc: &Document) -> RecordResult<Self> {
        let channel = match variant {
            ONLINE_SALE => SaleChannel::Online {
                platform: str_field(doc, field::PLATFORM)?,
            },
            _ => SaleChannel::Local {
                branch: str_field(doc, field::BRANCH)?,
            },
        };

        Ok(Self {
            occurred_at: parsed_field(doc, field::DATE)?,
            customer: str_field(doc, field::CUSTOMER)?,
            products: list_field(doc, field::PRODUCTS)?,
            channel,
        })
    }

    /// Untagged sale documents are recognised by their channel key.
    fn infer_variant(doc: &Document) -> Option<&'static str> {
        if doc.contains_key(field::PLATFORM) {
            Some(ONLINE_SALE)
        } else if doc.contains_key(field::BRANCH) {
            Some(LOCAL_SALE)
        } else {
            None
        }
    }
}
