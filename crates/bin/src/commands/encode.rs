//! Encode command - hydrates a document and writes it back out.

use docbind::encode;

use crate::cli::{EncodeArgs, EncodeFormat};
use crate::document::hydrate_invoice;

/// Run the encode command
pub fn run(args: &EncodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let invoice = hydrate_invoice(&args.input)?;

    let text = match args.to {
        EncodeFormat::Xml => encode::to_xml(&invoice, &args.root)?,
        EncodeFormat::Json => encode::to_json(&invoice, &args.root)?,
    };
    println!("{text}");

    Ok(())
}
