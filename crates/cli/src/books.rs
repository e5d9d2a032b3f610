//! Menu descriptions of the two books: which variants exist and what to ask for each.

use shopkeep_inventory::item::field as item_field;
use shopkeep_inventory::{ELECTRONIC_ITEM, Item, PERISHABLE_ITEM};
use shopkeep_sales::sale::field as sale_field;
use shopkeep_sales::{LOCAL_SALE, ONLINE_SALE, Sale};

/// One prompt of an entry form: the on-disk field it fills and the question shown.
pub type Prompt = (&'static str, &'static str);

/// Entry form for one record variant.
#[derive(Debug)]
pub struct VariantForm {
    pub tag: &'static str,
    pub label: &'static str,
    pub prompts: &'static [Prompt],
}

/// Everything the menu needs to know about one kind of record.
pub struct Book<R> {
    pub title: &'static str,
    /// Plural noun for messages ("sales", "items").
    pub plural: &'static str,
    pub variants: &'static [VariantForm],
    /// Enables "delete by name" when records carry a name.
    pub name_of: Option<fn(&R) -> &str>,
}

const SALE_VARIANTS: &[VariantForm] = &[
    VariantForm {
        tag: ONLINE_SALE,
        label: "online sale",
        prompts: &[
            (sale_field::CUSTOMER, "Customer name"),
            (sale_field::PRODUCTS, "Products sold (comma-separated)"),
            (sale_field::PLATFORM, "Sales platform"),
        ],
    },
    VariantForm {
        tag: LOCAL_SALE,
        label: "in-store sale",
        prompts: &[
            (sale_field::CUSTOMER, "Customer name"),
            (sale_field::PRODUCTS, "Products sold (comma-separated)"),
            (sale_field::BRANCH, "Branch"),
        ],
    },
];

const ITEM_VARIANTS: &[VariantForm] = &[
    VariantForm {
        tag: ELECTRONIC_ITEM,
        label: "electronic item",
        prompts: &[
            (item_field::NAME, "Name"),
            (item_field::PRICE, "Price"),
            (item_field::QUANTITY, "Quantity"),
            (item_field::WARRANTY_MONTHS, "Warranty (months)"),
        ],
    },
    VariantForm {
        tag: PERISHABLE_ITEM,
        label: "perishable item",
        prompts: &[
            (item_field::NAME, "Name"),
            (item_field::PRICE, "Price"),
            (item_field::QUANTITY, "Quantity"),
            (item_field::EXPIRY_DATE, "Expiry date (YYYY-MM-DD)"),
        ],
    },
];

pub fn sales_book() -> Book<Sale> {
    Book {
        title: "SALES",
        plural: "sales",
        variants: SALE_VARIANTS,
        name_of: None,
    }
}

pub fn inventory_book() -> Book<Item> {
    Book {
        title: "INVENTORY",
        plural: "items",
        variants: ITEM_VARIANTS,
        name_of: Some(Item::name),
    }
}
