use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ccd_ingest::CdaDocument;
use ccd_model::{DocumentSource, DomainStore};
use ccd_text::{CcdText, TracingSink};
use ccd_cli::render::{
    column_names, domains_table, records_table, select_domain, summary_table, to_json,
};

use crate::cli::{ExtractArgs, FieldArgs, OutputFormatArg};

pub fn run_domains() -> Result<()> {
    println!("{}", domains_table());
    Ok(())
}

pub fn run_extract(args: &ExtractArgs, sink: TracingSink) -> Result<()> {
    let (document, store) = extract_file(&args.file, sink)?;
    let store = match args.domain {
        Some(domain) => select_domain(&store, domain),
        None => store,
    };
    match args.format {
        OutputFormatArg::Json => {
            println!("{}", to_json(&store).context("serialize domains")?);
        }
        OutputFormatArg::Table => {
            println!("Document: {}", args.file.display());
            println!("{}", summary_table(&store, document.sections()));
            for (domain, records) in store.iter() {
                if column_names(records).is_empty() {
                    continue;
                }
                println!();
                println!("{domain}");
                println!("{}", records_table(records));
            }
        }
    }
    Ok(())
}

pub fn run_field(args: &FieldArgs, sink: TracingSink) -> Result<()> {
    let (_, store) = extract_file(&args.file, sink)?;
    let value = store
        .field(&args.domain, args.index, &args.column)
        .unwrap_or_default();
    println!("{value}");
    Ok(())
}

fn extract_file(path: &Path, sink: TracingSink) -> Result<(CdaDocument, DomainStore)> {
    let span = info_span!("document", path = %path.display());
    let _guard = span.enter();
    let document =
        CdaDocument::from_path(path).with_context(|| format!("read {}", path.display()))?;
    let mut ccd = CcdText::with_sink(sink);
    let store = ccd.set_document(&document);
    info!(domains = store.len(), "document extracted");
    Ok((document, ccd.into_store()))
}
