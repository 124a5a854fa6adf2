// UI layer: turns the command line into an upload and prints the result.
// Output contract on stdout is exactly two lines (status, body); the
// spinner and any logging go to stderr.

use crate::api::{Ingest, IngestResponse};
use crate::error::IngestError;
use crate::payload::{Document, IngestPayload, DEFAULT_TENANT};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upload a text file to the ingestion service.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "edge-ingest", version)]
pub struct IngestArgs {
    /// Text file to upload
    #[arg(allow_hyphen_values = true)]
    pub path: String,

    /// Tenant the document belongs to [default: public]
    #[arg(allow_hyphen_values = true)]
    pub tenant: Option<String>,

    /// Label for where the text came from [default: the file path]
    #[arg(allow_hyphen_values = true)]
    pub source: Option<String>,

    /// Fixed document id instead of a server-generated one
    #[arg(long)]
    pub id: Option<String>,

    /// Anything after the source label is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl IngestArgs {
    pub fn tenant(&self) -> &str {
        self.tenant.as_deref().unwrap_or(DEFAULT_TENANT)
    }

    /// The source label, or the path exactly as it was typed.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.path)
    }
}

/// Parse a full argv (program name first). Every failure, including
/// `--help` and `--version`, comes back as `IngestError::Usage`.
pub fn parse_args<I, T>(argv: I) -> Result<IngestArgs, IngestError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = IngestArgs::try_parse_from(argv).map_err(IngestError::Usage)?;
    if !args.rest.is_empty() {
        debug!(ignored = ?args.rest, "ignoring extra arguments");
    }
    Ok(args)
}

/// Read the file, upload it once, and print status and body to `out`.
/// A non-2xx status is still a successful run.
pub fn run<C, W>(client: &C, args: &IngestArgs, out: &mut W) -> Result<IngestResponse, IngestError>
where
    C: Ingest,
    W: Write,
{
    let document = Document::load(&args.path, args.tenant(), args.source())?.with_id(args.id.clone());
    debug!(
        path = %args.path,
        tenant = %document.tenant,
        source = %document.source,
        bytes = document.text.len(),
        "loaded document"
    );
    let payload = IngestPayload::single(document);

    // Drawn on stderr and hidden when that is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Uploading {}...", args.source()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.ingest(&payload);
    spinner.finish_and_clear();
    let response = result?;
    if response.is_success() {
        info!(status = response.status, "ingest accepted");
    } else {
        warn!(status = response.status, "ingest service returned an error status");
    }

    writeln!(out, "{}", response.status).map_err(IngestError::Output)?;
    writeln!(out, "{}", response.body).map_err(IngestError::Output)?;
    out.flush().map_err(IngestError::Output)?;
    Ok(response)
}
