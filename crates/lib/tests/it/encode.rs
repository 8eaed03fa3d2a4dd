use std::rc::Rc;

use docbind::{Hydrator, encode, schema::Invoice};
use serde_json::json;

use crate::helpers::{INVOICE_XML, hydrate_invoice_json, hydrate_invoice_xml};

#[test]
fn test_value_uses_key_convention() {
    let invoice = hydrate_invoice_xml(INVOICE_XML).unwrap();
    let value = encode::to_value(&invoice).unwrap();

    assert_eq!(value["@id"], json!("INV"));
    assert_eq!(value["IssueDate"], json!("2024-03-15"));
    assert_eq!(value["VATApplicable"], json!(true));
    assert!(value["LegalMonetaryTotal"].get("PaidDepositsAmount").is_none());

    let line = &value["InvoiceLines"]["InvoiceLine"][0];
    assert_eq!(
        line["LineExtensionAmount"],
        json!({ "@currencyID": "CZK", "#": "1000.00" })
    );
    // References encode as the identity they point to
    assert_eq!(line["DeliveryNoteReference"]["@ref"], json!("DL-2"));
    assert_eq!(value["InvoiceLines"]["InvoiceLine"].as_array().unwrap().len(), 3);
}

#[test]
fn test_data_tree_from_value() {
    let invoice = hydrate_invoice_xml(INVOICE_XML).unwrap();
    let data = encode::to_data(&invoice, "Invoice").unwrap();

    assert_eq!(data.get_value("@id").unwrap().to_string(), "INV");
    let notes = data.get_child("DeliveryNotes").unwrap().get_child_list("DeliveryNote");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1].path(), "/Invoice/DeliveryNotes/DeliveryNote[2]");
}

#[test]
fn test_xml_output_hydrates_to_the_same_invoice() {
    let invoice = hydrate_invoice_xml(INVOICE_XML).unwrap();
    let xml = encode::to_xml(&invoice, "Invoice").unwrap();
    assert!(xml.contains(r#"<DeliveryNoteReference ref="DL-2">"#));
    assert!(xml.contains(r#"<Payment partialPayment="false">"#));

    let again = hydrate_invoice_xml(&xml).unwrap();
    assert_eq!(
        encode::to_value(&again).unwrap(),
        encode::to_value(&invoice).unwrap()
    );

    let lines = &again.lines.lines;
    let notes = &again.delivery_notes.as_ref().unwrap().notes;
    let target = lines[0].delivery.as_ref().unwrap().note.get().unwrap();
    assert!(Rc::ptr_eq(&target, &notes[1]));
}

#[test]
fn test_json_output_hydrates_to_the_same_invoice() {
    let invoice = hydrate_invoice_xml(INVOICE_XML).unwrap();
    let text = encode::to_json(&invoice, "Invoice").unwrap();

    let again = hydrate_invoice_json(&text).unwrap();
    assert_eq!(again.id, invoice.id);
    assert_eq!(again.line_total(), invoice.line_total());
    assert_eq!(again.payment_means.as_ref().unwrap().payments[0].partial, Some(false));
}

#[test]
fn test_encoded_data_hydrates_directly() {
    let invoice = hydrate_invoice_xml(INVOICE_XML).unwrap();
    let data = encode::to_data(&invoice, "Invoice").unwrap();
    let again: Rc<Invoice> = Hydrator::new().hydrate(&data).unwrap();
    assert_eq!(again.supplier.name, "Dodavatel s.r.o.");
    assert!(again.vat_applicable);
    assert_eq!(again.identity.as_deref(), Some("INV"));
}
