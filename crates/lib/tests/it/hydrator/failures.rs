use std::rc::Rc;

use docbind::{
    Bind, Binding, DataError, Hydrator, HydratorConfig,
    binding::Reflector,
    data::Element,
    hydrator::HydrationContext,
};

use super::helpers::{Item, Root, Shelf};
use crate::helpers::data_error;

fn shelf(link: &str, ids: &[&str]) -> Element {
    let bag = ids.iter().fold(Element::new("Bag"), |bag, id| {
        bag.child(Element::new("Item").attribute("name", *id).attribute("id", *id))
    });
    Element::new("Shelf")
        .child(Element::new("Link").attribute("ref", link))
        .child(bag)
}

#[test]
fn test_failed_call_does_not_leak_identities() {
    let hydrator = Hydrator::new();

    let err = hydrator
        .hydrate::<Shelf>(&shelf("missing", &["A"]).into_data())
        .unwrap_err();
    assert!(err.is_reference_error());

    // "A" was registered by the failed call; a fresh call must not see it
    let shelf: Rc<Shelf> = hydrator.hydrate(&shelf("A", &["A"]).into_data()).unwrap();
    assert!(Rc::ptr_eq(&shelf.link.item.get().unwrap(), &shelf.bag.items[0]));
}

#[test]
fn test_context_reuse_after_traversal_failure() {
    let reflector = Reflector::new();
    let config = HydratorConfig::default();
    let mut context = HydrationContext::new(&reflector, &config);

    let err = context
        .hydrate::<Shelf>(&shelf("A", &["A", "A"]).into_data())
        .unwrap_err();
    assert!(matches!(err, DataError::DuplicateIdentity { .. }));
    assert_eq!(context.depth(), 0);

    let shelf = context.hydrate::<Shelf>(&shelf("A", &["A", "B"]).into_data()).unwrap();
    assert_eq!(shelf.link.item.get().unwrap().name, "A");
}

#[test]
fn test_traversal_failure_skips_resolution() {
    // The link is recorded before the bag fails; the traversal error is reported
    let element = Element::new("Shelf")
        .child(Element::new("Link").attribute("ref", "nowhere"))
        .child(Element::new("Bag").child(Element::new("Item")));
    let err = data_error(Hydrator::new().hydrate::<Shelf>(&element.into_data()).unwrap_err());
    assert_eq!(
        err,
        DataError::MissingRequiredChild {
            key: "@name".to_string(),
            path: "/Shelf/Bag/Item/@name".to_string(),
        }
    );
}

#[test]
fn test_depth_limit() {
    // Root, three levels, pointer: five nested objects
    let element = Element::new("Root").attribute("id", "A").child(
        Element::new("Level").child(
            Element::new("Level").child(
                Element::new("Level").child(Element::new("Pointer").attribute("ref", "A")),
            ),
        ),
    );
    let data = element.into_data();

    let hydrator = Hydrator::with_config(HydratorConfig::default().with_max_depth(4));
    let err = data_error(hydrator.hydrate::<Root>(&data).unwrap_err());
    assert_eq!(
        err,
        DataError::DepthLimitExceeded {
            limit: 4,
            path: "/Root/Level/Level/Level/Pointer".to_string(),
        }
    );

    let hydrator = Hydrator::with_config(HydratorConfig::default().with_max_depth(5));
    assert!(hydrator.hydrate::<Root>(&data).is_ok());
}

#[test]
fn test_library_error_helpers() {
    let err = Hydrator::new()
        .hydrate::<Shelf>(&shelf("missing", &[]).into_data())
        .unwrap_err();
    assert_eq!(err.module(), "data");
    assert!(err.is_reference_error());
    assert!(!err.is_missing_data());
    assert_eq!(err.path(), Some("/Shelf/Link/@ref"));
    assert_eq!(
        err.to_string(),
        "Referenced element 'missing' not found (referenced at /Shelf/Link/@ref)"
    );
}

#[test]
fn test_bindings_are_built_once() {
    let hydrator = Hydrator::new();
    assert!(hydrator.reflector().is_empty());

    let data = shelf("A", &["A", "B"]).into_data();
    hydrator.hydrate::<Shelf>(&data).unwrap();
    // Shelf, ItemLink, Bag, Item
    assert_eq!(hydrator.reflector().len(), 4);

    hydrator.hydrate::<Shelf>(&data).unwrap();
    assert_eq!(hydrator.reflector().len(), 4);
}

/// A collection declared without an item key.
#[derive(Debug, Default)]
struct Unkeyed {
    items: Vec<Rc<Item>>,
}

impl Bind for Unkeyed {
    const NAME: &'static str = "Unkeyed";

    fn bind(binding: &mut Binding<Self>) {
        binding.collection("", |bag: &mut Unkeyed, item| bag.items.push(item));
    }
}

/// A property declared with an empty key.
#[derive(Debug, Default)]
struct Blank {
    name: String,
}

impl Bind for Blank {
    const NAME: &'static str = "Blank";

    fn bind(binding: &mut Binding<Self>) {
        binding.primitive("", |blank: &mut Blank, name| blank.name = name);
    }
}

#[test]
fn test_collection_without_item_key() {
    let element = Element::new("Unkeyed").child(Element::new("Item").attribute("name", "A"));
    let err = data_error(Hydrator::new().hydrate::<Unkeyed>(&element.into_data()).unwrap_err());
    assert!(err.is_metadata_error());
    assert!(matches!(
        &err,
        DataError::UnsupportedMetadata { reason } if reason.contains("Unkeyed")
    ));
    assert_eq!(err.path(), None);
}

#[test]
fn test_property_with_empty_key() {
    let element = Element::new("Blank").attribute("name", "A");
    let err = data_error(Hydrator::new().hydrate::<Blank>(&element.into_data()).unwrap_err());
    assert!(matches!(
        &err,
        DataError::UnsupportedMetadata { reason } if reason.contains("empty key")
    ));
}
