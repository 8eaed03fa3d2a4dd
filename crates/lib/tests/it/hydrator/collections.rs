use std::rc::Rc;

use docbind::{Hydrator, data::Element};

use super::helpers::{Bag, Shelf};
use crate::helpers::data_error;

fn bag(names: &[&str]) -> Element {
    names.iter().fold(Element::new("Bag"), |bag, name| {
        bag.child(Element::new("Item").attribute("name", *name))
    })
}

#[test]
fn test_items_in_document_order() {
    let bag: Rc<Bag> = Hydrator::new().hydrate(&bag(&["x", "y", "z"]).into_data()).unwrap();
    assert_eq!(bag.names(), vec!["x", "y", "z"]);
}

#[test]
fn test_order_and_length_for_many_items() {
    let names: Vec<String> = (0..100).map(|i| format!("item-{i:03}")).rev().collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let bag: Rc<Bag> = Hydrator::new().hydrate(&bag(&refs).into_data()).unwrap();
    assert_eq!(bag.items.len(), 100);
    assert_eq!(bag.names(), refs);
}

#[test]
fn test_empty_collection() {
    let bag: Rc<Bag> = Hydrator::new().hydrate(&bag(&[]).into_data()).unwrap();
    assert!(bag.items.is_empty());
}

#[test]
fn test_other_children_are_not_items() {
    let element = bag(&["x"])
        .child(Element::new("Label").text("groceries"))
        .child(Element::new("Item").attribute("name", "y"));
    let bag: Rc<Bag> = Hydrator::new().hydrate(&element.into_data()).unwrap();
    assert_eq!(bag.names(), vec!["x", "y"]);
}

#[test]
fn test_collection_as_nested_property() {
    let element = Element::new("Shelf")
        .child(Element::new("Link").attribute("ref", "b"))
        .child(
            Element::new("Bag")
                .child(Element::new("Item").attribute("name", "a"))
                .child(Element::new("Item").attribute("name", "b").attribute("id", "b")),
        );
    let shelf: Rc<Shelf> = Hydrator::new().hydrate(&element.into_data()).unwrap();
    assert_eq!(shelf.bag.names(), vec!["a", "b"]);
}

#[test]
fn test_failing_item_aborts_the_collection() {
    let element = bag(&["x"]).child(Element::new("Item")).child(Element::new("Item"));
    let err = Hydrator::new().hydrate::<Bag>(&element.into_data()).unwrap_err();
    let err = data_error(err);
    assert!(err.is_missing());
    assert_eq!(err.path(), Some("/Bag/Item[2]/@name"));
}
