//! Reading input documents and hydrating invoices from them.

use std::rc::Rc;

use docbind::{
    Data, Hydrator, HydratorConfig,
    schema::Invoice,
    source::{self, Format},
};

use crate::cli::{InputArgs, InputFormat};

/// Parse the input document into a data tree.
pub fn load(args: &InputArgs) -> docbind::Result<Data> {
    let data = match args.format {
        InputFormat::Auto => source::parse_file(&args.file)?,
        InputFormat::Xml => Format::Xml.parse(&std::fs::read_to_string(&args.file)?)?,
        InputFormat::Json => Format::Json.parse(&std::fs::read_to_string(&args.file)?)?,
    };
    tracing::debug!(file = %args.file.display(), root = data.name(), "Loaded document");
    Ok(data)
}

/// Build the hydrator from the optional configuration file.
pub fn hydrator(args: &InputArgs) -> docbind::Result<Hydrator> {
    let config = match &args.config {
        Some(path) => {
            let config = HydratorConfig::from_json_file(path)?;
            tracing::info!(path = %path.display(), "Loaded hydrator configuration");
            config
        }
        None => HydratorConfig::default(),
    };
    Ok(Hydrator::with_config(config))
}

/// Parse the input document and hydrate it as an invoice.
pub fn hydrate_invoice(args: &InputArgs) -> docbind::Result<Rc<Invoice>> {
    let data = load(args)?;
    hydrator(args)?.hydrate(&data)
}
