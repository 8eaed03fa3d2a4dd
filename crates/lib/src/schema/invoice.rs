use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::binding::{Bind, Binding, Ref, SimpleContent};

/// The invoice document.
///
/// The root may carry an `@id`, which makes it referenceable like any other
/// identity-bearing node.
#[derive(Debug, Default, Serialize)]
pub struct Invoice {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(rename = "@version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "IssueDate")]
    pub issue_date: NaiveDate,
    #[serde(rename = "TaxPointDate", skip_serializing_if = "Option::is_none")]
    pub tax_point_date: Option<NaiveDate>,
    #[serde(rename = "VATApplicable")]
    pub vat_applicable: bool,
    #[serde(rename = "Note", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "AccountingSupplierParty")]
    pub supplier: Rc<Party>,
    #[serde(rename = "DeliveryNotes", skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<Rc<DeliveryNotes>>,
    #[serde(rename = "InvoiceLines")]
    pub lines: Rc<InvoiceLines>,
    #[serde(rename = "PaymentMeans", skip_serializing_if = "Option::is_none")]
    pub payment_means: Option<Rc<PaymentMeans>>,
    #[serde(rename = "LegalMonetaryTotal")]
    pub totals: Rc<MonetaryTotal>,
}

impl Bind for Invoice {
    const NAME: &'static str = "Invoice";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .optional_primitive("@id", |invoice: &mut Invoice, id| invoice.identity = id)
            .optional_primitive("@version", |invoice: &mut Invoice, v| invoice.version = v)
            .primitive("ID", |invoice: &mut Invoice, id| invoice.id = id)
            .date("IssueDate", |invoice: &mut Invoice, date| invoice.issue_date = date)
            .optional_date("TaxPointDate", |invoice: &mut Invoice, date| {
                invoice.tax_point_date = date
            })
            .primitive("VATApplicable", |invoice: &mut Invoice, applicable| {
                invoice.vat_applicable = applicable
            })
            .optional_primitive("Note", |invoice: &mut Invoice, note| invoice.note = note)
            .complex("AccountingSupplierParty", |invoice: &mut Invoice, party| {
                invoice.supplier = party
            })
            .optional_complex("DeliveryNotes", |invoice: &mut Invoice, notes| {
                invoice.delivery_notes = notes
            })
            .complex("InvoiceLines", |invoice: &mut Invoice, lines| invoice.lines = lines)
            .optional_complex("PaymentMeans", |invoice: &mut Invoice, means| {
                invoice.payment_means = means
            })
            .complex("LegalMonetaryTotal", |invoice: &mut Invoice, totals| {
                invoice.totals = totals
            });
    }
}

impl Invoice {
    /// Sum of the line extension amounts, or `None` if any amount is not a
    /// number.
    pub fn line_total(&self) -> Option<Decimal> {
        self.lines
            .lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| Some(sum + line.amount.decimal()?))
    }
}

/// A trading party.
#[derive(Debug, Default, Serialize)]
pub struct Party {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "VATID", skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
}

impl Bind for Party {
    const NAME: &'static str = "Party";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .primitive("Name", |party: &mut Party, name| party.name = name)
            .optional_primitive("VATID", |party: &mut Party, id| party.vat_id = id);
    }
}

/// A monetary amount: textual content with an optional currency attribute.
///
/// Given as a flat value (`<PaidAmount>10</PaidAmount>`) the amount has no
/// currency.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Amount {
    #[serde(rename = "@currencyID", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "#")]
    pub value: String,
}

impl Amount {
    /// The amount as an exact decimal.
    pub fn decimal(&self) -> Option<Decimal> {
        self.value.trim().parse().ok()
    }
}

impl Bind for Amount {
    const NAME: &'static str = "Amount";

    fn bind(binding: &mut Binding<Self>) {
        binding.optional_primitive("@currencyID", |amount: &mut Amount, currency| {
            amount.currency = currency
        });
    }
}

impl SimpleContent for Amount {
    fn set_content(&mut self, content: String) {
        self.value = content;
    }
}

/// Document totals.
#[derive(Debug, Default, Serialize)]
pub struct MonetaryTotal {
    #[serde(rename = "TaxExclusiveAmount")]
    pub tax_exclusive: Rc<Amount>,
    #[serde(rename = "PaidDepositsAmount", skip_serializing_if = "Option::is_none")]
    pub paid_deposits: Option<Rc<Amount>>,
    #[serde(rename = "PayableAmount")]
    pub payable: Rc<Amount>,
}

impl Bind for MonetaryTotal {
    const NAME: &'static str = "MonetaryTotal";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .simple_content("TaxExclusiveAmount", |total: &mut MonetaryTotal, amount| {
                total.tax_exclusive = amount
            })
            .optional_simple_content("PaidDepositsAmount", |total: &mut MonetaryTotal, amount| {
                total.paid_deposits = amount
            })
            .simple_content("PayableAmount", |total: &mut MonetaryTotal, amount| {
                total.payable = amount
            });
    }
}

/// The delivery notes an invoice covers.
#[derive(Debug, Default, Serialize)]
pub struct DeliveryNotes {
    #[serde(rename = "DeliveryNote")]
    pub notes: Vec<Rc<DeliveryNote>>,
}

impl Bind for DeliveryNotes {
    const NAME: &'static str = "DeliveryNotes";

    fn bind(binding: &mut Binding<Self>) {
        binding.collection("DeliveryNote", |notes: &mut DeliveryNotes, note| {
            notes.notes.push(note)
        });
    }
}

/// A delivery note. Its `@id` is what invoice lines refer to.
#[derive(Debug, Default, Serialize)]
pub struct DeliveryNote {
    #[serde(rename = "@id")]
    pub identity: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "IssueDate", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
}

impl Bind for DeliveryNote {
    const NAME: &'static str = "DeliveryNote";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .primitive("@id", |note: &mut DeliveryNote, id| note.identity = id)
            .primitive("ID", |note: &mut DeliveryNote, id| note.id = id)
            .optional_date("IssueDate", |note: &mut DeliveryNote, date| {
                note.issue_date = date
            });
    }
}

#[derive(Debug, Default, Serialize)]
pub struct InvoiceLines {
    #[serde(rename = "InvoiceLine")]
    pub lines: Vec<Rc<InvoiceLine>>,
}

impl Bind for InvoiceLines {
    const NAME: &'static str = "InvoiceLines";

    fn bind(binding: &mut Binding<Self>) {
        binding.collection("InvoiceLine", |lines: &mut InvoiceLines, line| {
            lines.lines.push(line)
        });
    }
}

#[derive(Debug, Default, Serialize)]
pub struct InvoiceLine {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "InvoicedQuantity")]
    pub quantity: Decimal,
    #[serde(rename = "LineExtensionAmount")]
    pub amount: Rc<Amount>,
    #[serde(rename = "Note", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "DeliveryNoteReference", skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Rc<DeliveryNoteReference>>,
}

impl Bind for InvoiceLine {
    const NAME: &'static str = "InvoiceLine";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .primitive("ID", |line: &mut InvoiceLine, id| line.id = id)
            .primitive("InvoicedQuantity", |line: &mut InvoiceLine, quantity| {
                line.quantity = quantity
            })
            .simple_content("LineExtensionAmount", |line: &mut InvoiceLine, amount| {
                line.amount = amount
            })
            .optional_primitive("Note", |line: &mut InvoiceLine, note| line.note = note)
            .optional_complex("DeliveryNoteReference", |line: &mut InvoiceLine, delivery| {
                line.delivery = delivery
            });
    }
}

/// A line's link to the delivery note it was shipped with.
#[derive(Debug, Default, Serialize)]
pub struct DeliveryNoteReference {
    #[serde(rename = "@ref")]
    pub note: Ref<DeliveryNote>,
    #[serde(rename = "LineID", skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
}

impl Bind for DeliveryNoteReference {
    const NAME: &'static str = "DeliveryNoteReference";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .reference("@ref", |reference: &mut DeliveryNoteReference, note| {
                reference.note = note
            })
            .optional_primitive("LineID", |reference: &mut DeliveryNoteReference, id| {
                reference.line_id = id
            });
    }
}

#[derive(Debug, Default, Serialize)]
pub struct PaymentMeans {
    #[serde(rename = "Payment")]
    pub payments: Vec<Rc<Payment>>,
}

impl Bind for PaymentMeans {
    const NAME: &'static str = "PaymentMeans";

    fn bind(binding: &mut Binding<Self>) {
        binding.collection("Payment", |means: &mut PaymentMeans, payment| {
            means.payments.push(payment)
        });
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Payment {
    #[serde(rename = "@partialPayment", skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
    #[serde(rename = "PaidAmount")]
    pub amount: Rc<Amount>,
    #[serde(rename = "PaymentMeansCode")]
    pub code: u32,
}

impl Bind for Payment {
    const NAME: &'static str = "Payment";

    fn bind(binding: &mut Binding<Self>) {
        binding
            .optional_primitive("@partialPayment", |payment: &mut Payment, partial| {
                payment.partial = partial
            })
            .simple_content("PaidAmount", |payment: &mut Payment, amount| {
                payment.amount = amount
            })
            .primitive("PaymentMeansCode", |payment: &mut Payment, code| payment.code = code);
    }
}
