//! A small invoice schema bound to documents.
//!
//! The types follow the shape of an ISDOC-style invoice closely enough to
//! read real documents, and between them use every kind of property the
//! hydrator supports:
//!
//! | Property kind  | Example                                        |
//! |----------------|------------------------------------------------|
//! | primitive      | `Invoice::id`, `InvoiceLine::quantity`         |
//! | date           | `Invoice::issue_date`, `Invoice::tax_point_date` |
//! | simple content | [`Amount`] with its `@currencyID`              |
//! | complex        | `Invoice::supplier`                            |
//! | collection     | [`InvoiceLines`], [`DeliveryNotes`], [`PaymentMeans`] |
//! | reference      | [`DeliveryNoteReference`] pointing at a [`DeliveryNote`] |
//!
//! Every type also serializes with the same key convention, so a hydrated
//! invoice can be encoded back with [`crate::encode`].

mod invoice;

pub use invoice::{
    Amount, DeliveryNote, DeliveryNoteReference, DeliveryNotes, Invoice, InvoiceLine,
    InvoiceLines, MonetaryTotal, Party, Payment, PaymentMeans,
};

/// Element name of the invoice document root.
pub const INVOICE_ROOT: &str = "Invoice";
