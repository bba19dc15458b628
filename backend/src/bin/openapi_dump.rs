#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;
    writeln!(io::stdout().lock(), "{json}")
}
