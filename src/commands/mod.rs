//! Command handlers for the brewboard CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod products;
mod report;

use crate::sheet::Locator;
use crate::{Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;
use tracing::info;

pub use init::init;
pub use products::products;
pub use report::report;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, a payload for stdout: either structured data (printed as JSON) or pre-rendered
/// text. The message goes to the log so the stdout payload stays pipeable.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// Pre-rendered text output, printed verbatim instead of the structure when present.
    rendered: Option<String>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

/// The output format for commands that print a dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Plain text for reading in a terminal.
    #[default]
    Text,
    /// The serialized presentation bundle, for an external renderer.
    Json,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
            rendered: None,
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            rendered: None,
        }
    }

    /// Create a new `Out` object carrying pre-rendered text for stdout.
    pub fn new_rendered<S>(message: S, rendered: String) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            rendered: Some(rendered),
        }
    }

    /// Attach pre-rendered text; it takes precedence over the structure on stdout.
    pub fn set_rendered(&mut self, rendered: String) {
        self.rendered = Some(rendered);
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Get the pre-rendered text stored in `rendered`.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Print the message to `info!` and the payload (if any) to stdout: the rendered text
    /// verbatim, or the structured data as JSON.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(rendered) = self.rendered() {
            println!("{rendered}");
        } else if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                println!("{json}");
            }
        }
    }
}

/// The workbook source and worksheet for a data-reading command: the `--source` override when
/// given, otherwise the configured source. With neither, the user needs to run `init`.
pub(crate) async fn resolve_source(
    home: &Path,
    flag: Option<&Locator>,
) -> Result<(Locator, Option<String>)> {
    if let Some(locator) = flag {
        return Ok((locator.clone(), None));
    }
    let config = Config::load(home).await.context(
        "No workbook source was given. Pass --source, or run 'brewboard init' to configure one",
    )?;
    Ok((
        config.source().clone(),
        config.sheet().map(str::to_string),
    ))
}
