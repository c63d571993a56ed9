use crate::args::ReportArgs;
use crate::commands::{resolve_source, Format, Out};
use crate::model::SalesData;
use crate::view::DashboardView;
use crate::{sheet, Result};
use std::path::Path;
use tracing::debug;

/// Runs one load-normalize-filter-aggregate pass and prints the dashboard.
///
/// A source that fails to load is not an error here: the loader logs the failure and the
/// dashboard renders over an empty dataset with zero-valued KPIs.
pub async fn report(brewboard_home: &Path, args: ReportArgs) -> Result<Out<DashboardView>> {
    let (source, sheet_name) = resolve_source(brewboard_home, args.source()).await?;
    let rows = sheet::load_rows(&source, sheet_name.as_deref()).await;
    let data = SalesData::from_raw(&rows);

    let filter = args.filter_state();
    debug!(
        "Building the dashboard over {} transactions with filter {filter:?}",
        data.len()
    );
    let view = DashboardView::build(&data, &filter);

    let message = format!("Dashboard for '{source}'");
    Ok(match args.format() {
        Format::Text => Out::new_rendered(message, view.render_text()),
        Format::Json => Out::new(message, view),
    })
}
