use crate::args::ProductsArgs;
use crate::commands::{resolve_source, Out};
use crate::model::SalesData;
use crate::{sheet, Result};
use std::path::Path;

/// Prints the product filter options found in the sales data: `All` followed by every distinct
/// product name, ascending.
pub async fn products(brewboard_home: &Path, args: ProductsArgs) -> Result<Out<Vec<String>>> {
    let (source, sheet_name) = resolve_source(brewboard_home, args.source()).await?;
    let rows = sheet::load_rows(&source, sheet_name.as_deref()).await;
    let data = SalesData::from_raw(&rows);

    let options = data.coffee_options();
    let message = format!("{} product filter options from '{source}'", options.len());
    let rendered = options.join("\n");
    let mut out = Out::new(message, options);
    out.set_rendered(rendered);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Locator;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_products_lists_distinct_names_with_all_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(
            &path,
            "coffee_name,Sales_amount\nLatte,5\nEspresso,10\nLatte,3\n",
        )
        .unwrap();
        let source: Locator = path.to_str().unwrap().parse().unwrap();

        let out = products(dir.path(), ProductsArgs::new(Some(source)))
            .await
            .unwrap();
        assert_eq!(out.rendered(), Some("All\nEspresso\nLatte"));
    }

    #[tokio::test]
    async fn test_products_over_an_empty_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let source: Locator = path.to_str().unwrap().parse().unwrap();

        let out = products(dir.path(), ProductsArgs::new(Some(source)))
            .await
            .unwrap();
        assert_eq!(out.rendered(), Some("All"));
    }
}
