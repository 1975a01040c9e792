use std::fmt::{Display, Formatter, Result};

use crate::aggregate::Report;

/// Narrowest the product column gets.
const MIN_NAME_WIDTH: usize = 30;
const UNITS_WIDTH: usize = 20;

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (top_name, top_units) = self.most_sold();
        let (rich_name, rich_revenue) = self.highest_revenue();
        writeln!(f, "Total revenue: {}", self.total_revenue())?;
        writeln!(f, "Most sold product: {top_name} ({top_units} units)")?;
        writeln!(f, "Highest revenue product: {rich_name} ({rich_revenue})")?;
        writeln!(f)?;
        writeln!(f, "Per-product report:")?;
        let width = self
            .products()
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or_default()
            .max(MIN_NAME_WIDTH);
        let units_width = UNITS_WIDTH;
        writeln!(
            f,
            "{:width$} {:units_width$} Revenue share",
            "Product", "Units sold"
        )?;
        for (name, prod) in self.products() {
            write!(f, "{name:width$} {:<units_width$} ", prod.units)?;
            match self.revenue_share(name) {
                Some(share) => writeln!(f, "{share:.2}%")?,
                None => writeln!(f, "N/A")?,
            }
        }
        Ok(())
    }
}
