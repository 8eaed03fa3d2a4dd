//! Bound types used by the hydrator tests.

use std::rc::Rc;

use chrono::NaiveDate;
use docbind::{Bind, Binding, Ref, SimpleContent};

/// Identity-bearing root holding a chain of levels.
#[derive(Debug, Default)]
pub struct Root {
    pub id: String,
    pub level: Rc<Level>,
}

impl Bind for Root {
    const NAME: &'static str = "Root";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .primitive("@id", |root: &mut Root, id| root.id = id)
            .complex("Level", |root: &mut Root, level| root.level = level);
    }
}

#[derive(Debug, Default)]
pub struct Level {
    pub next: Option<Rc<Level>>,
    pub pointer: Option<Rc<Pointer>>,
}

impl Bind for Level {
    const NAME: &'static str = "Level";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .optional_complex("Level", |level: &mut Level, next| level.next = next)
            .optional_complex("Pointer", |level: &mut Level, pointer| level.pointer = pointer);
    }
}

/// Refers back to a [`Root`].
#[derive(Debug, Default)]
pub struct Pointer {
    pub target: Ref<Root>,
}

impl Bind for Pointer {
    const NAME: &'static str = "Pointer";

    fn bind(binding: &mut Binding<Self>) {
        binding.reference("@ref", |pointer: &mut Pointer, target| pointer.target = target);
    }
}

#[derive(Debug, Default)]
pub struct Item {
    pub name: String,
}

impl Bind for Item {
    const NAME: &'static str = "Item";

    fn bind(binding: &mut Binding<Self>) {
        binding.primitive("@name", |item: &mut Item, name| item.name = name);
    }
}

/// A collection of [`Item`]s.
#[derive(Debug, Default)]
pub struct Bag {
    pub items: Vec<Rc<Item>>,
}

impl Bind for Bag {
    const NAME: &'static str = "Bag";

    fn bind(binding: &mut Binding<Self>) {
        binding.collection("Item", |bag: &mut Bag, item| bag.items.push(item));
    }
}

impl Bag {
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

/// Refers to an [`Item`].
#[derive(Debug, Default)]
pub struct ItemLink {
    pub item: Ref<Item>,
}

impl Bind for ItemLink {
    const NAME: &'static str = "ItemLink";

    fn bind(binding: &mut Binding<Self>) {
        binding.reference("@ref", |link: &mut ItemLink, item| link.item = item);
    }
}

/// The link is declared, and therefore visited, before the bag it points
/// into.
#[derive(Debug, Default)]
pub struct Shelf {
    pub link: Rc<ItemLink>,
    pub bag: Rc<Bag>,
}

impl Bind for Shelf {
    const NAME: &'static str = "Shelf";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .complex("Link", |shelf: &mut Shelf, link| shelf.link = link)
            .complex("Bag", |shelf: &mut Shelf, bag| shelf.bag = bag);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Price {
    pub currency: Option<String>,
    pub value: String,
}

impl Bind for Price {
    const NAME: &'static str = "Price";

    fn bind(binding: &mut Binding<Self>) {
        binding.optional_primitive("@currency", |price: &mut Price, currency| {
            price.currency = currency
        });
    }
}

impl SimpleContent for Price {
    fn set_content(&mut self, content: String) {
        self.value = content;
    }
}

/// One property of every kind, most of them nullable.
#[derive(Debug, Default)]
pub struct Record {
    pub name: String,
    pub created: NaiveDate,
    pub closed: Option<NaiveDate>,
    pub count: Option<u32>,
    pub active: bool,
    pub price: Rc<Price>,
    pub discount: Option<Rc<Price>>,
    pub owner: Option<Rc<Item>>,
}

impl Bind for Record {
    const NAME: &'static str = "Record";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .primitive("@name", |record: &mut Record, name| record.name = name)
            .date("Created", |record: &mut Record, date| record.created = date)
            .optional_date("Closed", |record: &mut Record, date| record.closed = date)
            .optional_primitive("Count", |record: &mut Record, count| record.count = count)
            .primitive("Active", |record: &mut Record, active| record.active = active)
            .simple_content("Price", |record: &mut Record, price| record.price = price)
            .optional_simple_content("Discount", |record: &mut Record, discount| {
                record.discount = discount
            })
            .optional_complex("Owner", |record: &mut Record, owner| record.owner = owner);
    }
}
