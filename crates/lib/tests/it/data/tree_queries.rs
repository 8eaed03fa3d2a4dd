use docbind::{
    Data, DataError,
    data::{Element, Segment},
};

fn payment_means() -> Data {
    Element::new("PaymentMeans")
        .attribute("id", "PM")
        .child(
            Element::new("Payment")
                .attribute("partialPayment", "true")
                .child(Element::new("PaidAmount").text("10")),
        )
        .child(Element::new("Payment").child(Element::new("PaidAmount").text("20")))
        .child(Element::new("Payment").child(Element::new("PaidAmount").text("30")))
        .child(Element::new("Note").text("three payments"))
        .into_data()
}

#[test]
fn test_absent_is_distinguishable_from_empty() {
    let data = Element::new("Invoice")
        .child(Element::new("Note"))
        .into_data();

    assert!(data.has_value("Note"));
    assert!(data.get_value("Note").unwrap().is_empty());
    assert!(!data.has_value("TaxPointDate"));
    assert!(!data.has_value("@id"));
}

#[test]
fn test_get_child_list_preserves_order() {
    let data = payment_means();
    let amounts: Vec<String> = data
        .get_child_list("Payment")
        .iter()
        .map(|payment| payment.get_value("PaidAmount").unwrap().to_string())
        .collect();
    assert_eq!(amounts, vec!["10", "20", "30"]);

    // Repeated siblings are indexed, single ones are not
    assert_eq!(data.get_child_list("Payment")[2].path(), "/PaymentMeans/Payment[3]");
    assert_eq!(data.get_child("Note").unwrap().path(), "/PaymentMeans/Note");
}

#[test]
fn test_get_child_list_absent_is_empty() {
    let data = payment_means();
    assert!(data.get_child_list("Refund").is_empty());
    assert!(data.get_child_list("@id").is_empty());
}

#[test]
fn test_repeated_children_are_not_values() {
    let data = payment_means();
    assert!(data.has_child("Payment"));
    assert!(!data.has_value("Payment"));
    // The first occurrence is the child
    assert_eq!(
        data.get_child("Payment")
            .unwrap()
            .get_value("@partialPayment")
            .unwrap()
            .to_string(),
        "true"
    );
}

#[test]
fn test_missing_lookups_report_the_expected_location() {
    let data = payment_means();

    let err = data.get_value("IssueDate").unwrap_err();
    assert_eq!(
        err,
        DataError::MissingRequiredChild {
            key: "IssueDate".to_string(),
            path: "/PaymentMeans/IssueDate".to_string(),
        }
    );

    let err = data.get_child("Refund").unwrap_err();
    assert!(err.is_missing());
    assert_eq!(err.path(), Some("/PaymentMeans/Refund"));

    let err = data.get_value("@currency").unwrap_err();
    assert_eq!(err.path(), Some("/PaymentMeans/@currency"));
}

#[test]
fn test_create_empty() {
    let data = payment_means();
    let empty = Data::create_empty(&data, "Note");

    assert_eq!(empty.name(), "Note");
    assert_eq!(empty.path(), "/PaymentMeans/Note");
    assert!(empty.attributes().is_empty());
    assert!(empty.children().is_empty());
    assert!(empty.content().is_none());
    assert!(!empty.has_value("#"));
}

#[test]
fn test_value_locations() {
    let data = payment_means();
    let first = &data.get_child_list("Payment")[0];

    let partial = first.get_value("@partialPayment").unwrap();
    assert_eq!(partial.location().to_string(), "/PaymentMeans/Payment[1]/@partialPayment");
    assert_eq!(
        partial.location().last(),
        Some(&Segment::Attribute("partialPayment".to_string()))
    );

    // A flat leaf's value lives at the leaf element itself
    let amount = first.get_value("PaidAmount").unwrap();
    assert_eq!(amount.location().to_string(), "/PaymentMeans/Payment[1]/PaidAmount");
    assert_eq!(amount.location().depth(), 3);
}
