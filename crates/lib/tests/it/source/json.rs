use docbind::{data::Raw, source::json};

use crate::helpers::INVOICE_JSON;

#[test]
fn test_invoice_document_tree() {
    let data = json::parse(INVOICE_JSON).unwrap();
    assert_eq!(data.name(), "Invoice");
    assert_eq!(data.get_value("@version").unwrap().to_string(), "6.0.1");
    assert_eq!(data.get_value("VATApplicable").unwrap().raw(), &Raw::Bool(false));

    let line = &data.get_child("InvoiceLines").unwrap().get_child_list("InvoiceLine")[0];
    // A single array element is not indexed
    assert_eq!(line.path(), "/Invoice/InvoiceLines/InvoiceLine");
    assert_eq!(line.get_value("InvoicedQuantity").unwrap().to_string(), "3");
}

#[test]
fn test_content_key_and_attributes() {
    let data = json::parse(INVOICE_JSON).unwrap();
    let payable = data
        .get_child("LegalMonetaryTotal")
        .unwrap()
        .get_child("PayableAmount")
        .unwrap();
    assert!(!payable.is_flat());
    assert_eq!(payable.get_value("@currencyID").unwrap().to_string(), "EUR");
    let content = payable.get_value("#").unwrap();
    assert_eq!(content.to_string(), "30");
    assert_eq!(
        content.location().to_string(),
        "/Invoice/LegalMonetaryTotal/PayableAmount/#"
    );
}

#[test]
fn test_root_must_be_single_member_object() {
    assert!(json::parse("[]").unwrap_err().is_malformed());
    assert!(json::parse("{}").unwrap_err().is_malformed());
    assert!(json::parse(r#"{ "A": 1, "B": 2 }"#).unwrap_err().is_malformed());
    assert!(json::parse("not json").unwrap_err().is_syntax_error());
}
