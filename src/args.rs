//! These structs provide the CLI interface for the brewboard CLI.

use crate::commands::Format;
use crate::model::{CoffeeSelector, FilterState, MONTH_MAX, MONTH_MIN};
use crate::sheet::Locator;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// brewboard: A command-line dashboard for coffee sales spreadsheets.
///
/// The purpose of this program is to load a spreadsheet of coffee sales transactions, filter it
/// by product name and month range, and report aggregate KPIs, a time-of-day sales breakdown,
/// and top-seller rankings.
///
/// Run `brewboard init` once to record where the sales workbook lives, then use
/// `brewboard report` to print the dashboard. Any report flag can narrow the filter, and the
/// configured workbook source can be overridden per invocation with --source.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and write the configuration file.
    ///
    /// This is the first command you should run when setting up the brewboard CLI. Decide what
    /// directory you want configuration stored in and pass it as --brewboard-home (by default it
    /// will be $HOME/brewboard), then tell brewboard where the sales workbook lives with
    /// --source.
    Init(InitArgs),
    /// Load the sales data, apply the filter flags, and print the dashboard.
    Report(ReportArgs),
    /// Print the product filter options found in the sales data.
    Products(ProductsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where brewboard configuration is held. Defaults to ~/brewboard
    #[arg(long, env = "BREWBOARD_HOME", default_value_t = default_brewboard_home())]
    brewboard_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, brewboard_home: PathBuf) -> Self {
        Self {
            log_level,
            brewboard_home: brewboard_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn brewboard_home(&self) -> &DisplayPath {
        &self.brewboard_home
    }
}

/// Args for the `brewboard init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Where the sales workbook lives: an http(s) URL or a path to an .xlsx or .csv file.
    #[arg(long)]
    source: Locator,

    /// The worksheet to read. Defaults to the first sheet in the workbook.
    #[arg(long)]
    sheet: Option<String>,
}

impl InitArgs {
    pub fn new(source: Locator, sheet: Option<String>) -> Self {
        Self { source, sheet }
    }

    pub fn source(&self) -> &Locator {
        &self.source
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }
}

/// Args for the `brewboard report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The product to report on, or "All" for every product.
    #[arg(long, default_value_t = CoffeeSelector::All)]
    coffee: CoffeeSelector,

    /// The lower bound of the month range, 1-12 inclusive.
    #[arg(long, default_value_t = MONTH_MIN)]
    month_min: u8,

    /// The upper bound of the month range, 1-12 inclusive.
    #[arg(long, default_value_t = MONTH_MAX)]
    month_max: u8,

    /// The output format for the dashboard.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Overrides the configured workbook source for this invocation.
    #[arg(long)]
    source: Option<Locator>,
}

impl ReportArgs {
    pub fn new(
        coffee: CoffeeSelector,
        month_min: u8,
        month_max: u8,
        format: Format,
        source: Option<Locator>,
    ) -> Self {
        Self {
            coffee,
            month_min,
            month_max,
            format,
            source,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn source(&self) -> Option<&Locator> {
        self.source.as_ref()
    }

    /// The filter described by the flags. Out-of-range or crossed month bounds are clamped the
    /// same way the interactive controls clamp them.
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.coffee.clone(), self.month_min, self.month_max)
    }
}

/// Args for the `brewboard products` command.
#[derive(Debug, Parser, Clone)]
pub struct ProductsArgs {
    /// Overrides the configured workbook source for this invocation.
    #[arg(long)]
    source: Option<Locator>,
}

impl ProductsArgs {
    pub fn new(source: Option<Locator>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Option<&Locator> {
        self.source.as_ref()
    }
}

fn default_brewboard_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("brewboard"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --brewboard-home or BREWBOARD_HOME instead of relying on the \
                default brewboard home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("brewboard")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
