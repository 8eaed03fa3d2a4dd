//! Hydrate command - prints the invoice object graph.

use docbind::{encode, schema::Invoice};

use crate::cli::HydrateArgs;
use crate::document::hydrate_invoice;
use crate::output::{OutputFormat, print_fields, print_table};

/// Run the hydrate command
pub fn run(args: &HydrateArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let invoice = hydrate_invoice(&args.input)?;

    match format {
        OutputFormat::Human => print_summary(&invoice),
        OutputFormat::Json => {
            let value = encode::to_value(&invoice)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn print_summary(invoice: &Invoice) {
    let payable = &invoice.totals.payable;
    print_fields(&[
        ("Invoice", invoice.id.clone()),
        ("Issued", invoice.issue_date.to_string()),
        ("Supplier", invoice.supplier.name.clone()),
        (
            "Payable",
            format!(
                "{} {}",
                payable.value,
                payable.currency.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string(),
        ),
    ]);
    println!();

    let rows: Vec<Vec<String>> = invoice
        .lines
        .lines
        .iter()
        .map(|line| {
            let delivery = line
                .delivery
                .as_ref()
                .and_then(|reference| reference.note.get())
                .map(|note| note.id.clone())
                .unwrap_or_default();
            vec![
                line.id.clone(),
                line.quantity.to_string(),
                line.amount.value.clone(),
                delivery,
            ]
        })
        .collect();
    print_table(&["LINE", "QUANTITY", "AMOUNT", "DELIVERY NOTE"], &rows);
}
