//! Print the OpenAPI document.
//!
//! JSON by default; pass `--yaml` for YAML.

use std::io::Write;

use color_eyre::eyre::Result;
use members_api::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().skip(1).any(|arg| arg == "--yaml") {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
