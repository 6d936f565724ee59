//! Print the OpenAPI document as pretty JSON, or YAML with `--yaml`.

use color_eyre::eyre::{Result, WrapErr};
use tracker::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().skip(1).any(|arg| arg == "--yaml") {
        doc.to_yaml().wrap_err("render OpenAPI document as YAML")?
    } else {
        doc.to_pretty_json()
            .wrap_err("render OpenAPI document as JSON")?
    };
    println!("{rendered}");
    Ok(())
}
