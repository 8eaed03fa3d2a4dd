//! Check command - reports whether a document hydrates into a valid invoice.

use crate::cli::CheckArgs;
use crate::document::hydrate_invoice;
use crate::output::{OutputFormat, print_json};

/// Run the check command
///
/// Exits with status 1 when the document does not hydrate.
pub fn run(args: &CheckArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match hydrate_invoice(&args.input) {
        Ok(invoice) => {
            match format {
                OutputFormat::Human => println!("ok: invoice {}", invoice.id),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "ok",
                    "invoice": invoice.id,
                }))?,
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Check failed");
            match format {
                OutputFormat::Human => eprintln!("error ({}): {e}", e.module()),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "status": "error",
                    "module": e.module(),
                    "path": e.path(),
                    "message": e.to_string(),
                }))?,
            }
            std::process::exit(1);
        }
    }
}
