//! Print the OpenAPI document as JSON.

use data_api::doc::{ApiDoc, DEFAULT_PUBLIC_URL, DOCUMENTED_RESOURCE_PATH, render};

fn main() -> Result<(), serde_json::Error> {
    let doc = render(&ApiDoc::build(DOCUMENTED_RESOURCE_PATH, DEFAULT_PUBLIC_URL))?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
