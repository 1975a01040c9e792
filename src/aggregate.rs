use indexmap::IndexMap;
use tracing::debug;

use std::collections::HashMap;

use crate::{error::ReportError, money::Money, record::SalesRecord};

/// Holds sales data on a specific product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Product {
    pub units: u64,
    pub revenue: Money,
}

/// Per-product totals, in order of each product's first appearance.
pub type ProductTable = IndexMap<String, Product>;

/// A quantity that can be totalled without overflowing silently.
trait Tally: Copy + Default + Ord {
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

impl Tally for u64 {
    fn checked_add(self, rhs: Self) -> Option<Self> {
        u64::checked_add(self, rhs)
    }
}

impl Tally for Money {
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Money::checked_add(self, rhs)
    }
}

fn add_to<V: Tally>(total: &mut V, value: V) -> Result<(), ReportError> {
    *total = total.checked_add(value).ok_or(ReportError::Overflow)?;
    Ok(())
}

/// Returns the sum of every record's revenue.
///
/// # Errors
///
/// Returns [`ReportError::Overflow`] if the sum can't be represented.
pub fn total_revenue(records: &[SalesRecord]) -> Result<Money, ReportError> {
    let mut total = Money::ZERO;
    for record in records {
        add_to(&mut total, record.revenue)?;
    }
    Ok(total)
}

/// Accumulates units and revenue for each product.
///
/// Products appear in the order their first record appears in `records`.
///
/// # Errors
///
/// Returns [`ReportError::Overflow`] if a product's totals can't be
/// represented.
pub fn product_table(records: &[SalesRecord]) -> Result<ProductTable, ReportError> {
    let mut products = ProductTable::new();
    for record in records {
        let prod = products.entry(record.product.clone()).or_default();
        add_to(&mut prod.units, u64::from(record.quantity))?;
        add_to(&mut prod.revenue, record.revenue)?;
    }
    Ok(products)
}

/// Returns the best-selling product by units, with its unit count.
///
/// If several products share the highest count, the one whose running total
/// reached that count first, reading `records` in order, wins.
///
/// # Errors
///
/// Returns [`ReportError::EmptyInput`] if `records` is empty, or
/// [`ReportError::Overflow`] if a product's total can't be represented.
pub fn most_sold_product(records: &[SalesRecord]) -> Result<(String, u64), ReportError> {
    first_to_reach_max(records, |r| u64::from(r.quantity))
}

/// Returns the product with the highest revenue, with that revenue.
///
/// Ties are broken as for [`most_sold_product`].
///
/// # Errors
///
/// Returns [`ReportError::EmptyInput`] if `records` is empty, or
/// [`ReportError::Overflow`] if a product's total can't be represented.
pub fn highest_revenue_product(records: &[SalesRecord]) -> Result<(String, Money), ReportError> {
    first_to_reach_max(records, |r| r.revenue)
}

fn first_to_reach_max<V: Tally>(
    records: &[SalesRecord],
    metric: impl Fn(&SalesRecord) -> V,
) -> Result<(String, V), ReportError> {
    let mut totals: HashMap<&str, V> = HashMap::new();
    for record in records {
        add_to(totals.entry(record.product.as_str()).or_default(), metric(record))?;
    }
    let max = totals
        .values()
        .copied()
        .max()
        .ok_or(ReportError::EmptyInput)?;
    // A product's running total may pass through `max` and then fall (refunds),
    // so only products finishing on `max` qualify.
    let mut running: HashMap<&str, V> = HashMap::new();
    for record in records {
        let name = record.product.as_str();
        let sum = running.entry(name).or_default();
        add_to(sum, metric(record))?;
        if *sum == max && totals.get(name) == Some(&max) {
            return Ok((name.to_string(), max));
        }
    }
    Err(ReportError::EmptyInput)
}

/// Holds the summary of a set of sales records.
///
/// To build a `Report`, use [`Report::generate`].
///
/// To get a printable version of the report, use its [`Display`](std::fmt::Display)
/// implementation.
#[derive(Debug)]
pub struct Report {
    total_revenue: Money,
    most_sold: (String, u64),
    highest_revenue: (String, Money),
    products: ProductTable,
}

impl Report {
    /// Summarises `records`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptyInput`] if `records` is empty, or
    /// [`ReportError::Overflow`] if a total can't be represented.
    pub fn generate(records: &[SalesRecord]) -> Result<Self, ReportError> {
        let report = Self {
            total_revenue: total_revenue(records)?,
            most_sold: most_sold_product(records)?,
            highest_revenue: highest_revenue_product(records)?,
            products: product_table(records)?,
        };
        debug!(
            products = report.products.len(),
            total_revenue = %report.total_revenue,
            "generated report"
        );
        Ok(report)
    }

    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.total_revenue
    }

    /// Returns the best-selling product by units, and its unit count.
    #[must_use]
    pub fn most_sold(&self) -> (&str, u64) {
        (self.most_sold.0.as_str(), self.most_sold.1)
    }

    /// Returns the product with the highest revenue, and that revenue.
    #[must_use]
    pub fn highest_revenue(&self) -> (&str, Money) {
        (self.highest_revenue.0.as_str(), self.highest_revenue.1)
    }

    #[must_use]
    pub fn products(&self) -> &ProductTable {
        &self.products
    }

    /// Returns units sold per product, in first-appearance order.
    pub fn quantities(&self) -> impl Iterator<Item = (&str, u64)> {
        self.products.iter().map(|(name, p)| (name.as_str(), p.units))
    }

    /// Returns revenue per product, in first-appearance order.
    pub fn revenues(&self) -> impl Iterator<Item = (&str, Money)> {
        self.products.iter().map(|(name, p)| (name.as_str(), p.revenue))
    }

    /// Returns `product`'s revenue as a percentage of total revenue.
    ///
    /// Returns `None` for an unknown product, or when total revenue is zero.
    #[must_use]
    pub fn revenue_share(&self, product: &str) -> Option<f64> {
        self.products
            .get(product)?
            .revenue
            .share_of(self.total_revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(product: &str, quantity: u32, cents: i64) -> SalesRecord {
        SalesRecord::new(product, quantity, Money::from_cents(cents))
    }

    fn example() -> Vec<SalesRecord> {
        vec![
            rec("Widget", 3, 3000),
            rec("Gadget", 5, 2500),
            rec("Widget", 2, 2000),
        ]
    }

    fn fixtures() -> Vec<Vec<SalesRecord>> {
        vec![
            example(),
            vec![rec("Solo", 0, 0)],
            vec![
                rec("A", 1, 199),
                rec("B", 7, 1),
                rec("C", 3, 5000),
                rec("A", 9, 1),
                rec("B", 1, -50),
                rec("D", 4, 333),
            ],
            vec![rec("Refund", 1, -1000), rec("Other", 1, -10)],
        ]
    }

    #[test]
    fn generate_fn_summarises_example_sales() {
        let report = Report::generate(&example()).unwrap();
        assert_eq!(report.total_revenue(), Money::from_cents(7500));
        assert_eq!(report.most_sold(), ("Gadget", 5));
        assert_eq!(report.highest_revenue(), ("Widget", Money::from_cents(5000)));
        assert_eq!(
            report.quantities().collect::<Vec<_>>(),
            vec![("Widget", 5), ("Gadget", 5)]
        );
        assert_eq!(
            report.revenues().collect::<Vec<_>>(),
            vec![
                ("Widget", Money::from_cents(5000)),
                ("Gadget", Money::from_cents(2500))
            ]
        );
        assert_eq!(
            format!("{:.2}", report.revenue_share("Widget").unwrap()),
            "66.67"
        );
        assert_eq!(report.revenue_share("Nothing"), None);
    }

    #[test]
    fn generate_fn_returns_error_for_empty_input() {
        assert_eq!(Report::generate(&[]).unwrap_err(), ReportError::EmptyInput);
        assert_eq!(most_sold_product(&[]), Err(ReportError::EmptyInput));
        assert_eq!(highest_revenue_product(&[]), Err(ReportError::EmptyInput));
    }

    #[test]
    fn total_revenue_equals_sum_of_product_revenues() {
        for records in fixtures() {
            let table_total = product_table(&records)
                .unwrap()
                .values()
                .try_fold(Money::ZERO, |acc, p| acc.checked_add(p.revenue))
                .unwrap();
            assert_eq!(total_revenue(&records).unwrap(), table_total, "{records:?}");
        }
    }

    #[test]
    fn winners_are_at_least_every_other_product() {
        for records in fixtures() {
            let table = product_table(&records).unwrap();
            let (top, units) = most_sold_product(&records).unwrap();
            let (rich, revenue) = highest_revenue_product(&records).unwrap();
            assert_eq!(table[&top].units, units);
            assert_eq!(table[&rich].revenue, revenue);
            for prod in table.values() {
                assert!(units >= prod.units, "{records:?}");
                assert!(revenue >= prod.revenue, "{records:?}");
            }
        }
    }

    #[test]
    fn ties_go_to_the_product_that_reached_the_maximum_first() {
        let records = vec![rec("First", 4, 100), rec("Second", 4, 100)];
        assert_eq!(most_sold_product(&records).unwrap().0, "First");
        assert_eq!(highest_revenue_product(&records).unwrap().0, "First");

        let records = vec![rec("Early", 1, 0), rec("Late", 2, 0), rec("Early", 1, 0)];
        assert_eq!(most_sold_product(&records).unwrap(), ("Late".into(), 2));
    }

    #[test]
    fn highest_revenue_ignores_products_that_fall_back_below_the_maximum() {
        let records = vec![
            rec("Returned", 1, 5000),
            rec("Steady", 1, 3000),
            rec("Returned", 0, -4000),
            rec("Steady", 1, 2000),
        ];
        assert_eq!(
            highest_revenue_product(&records).unwrap(),
            ("Steady".into(), Money::from_cents(5000))
        );
    }

    #[test]
    fn product_table_keeps_first_appearance_order() {
        let records = vec![rec("Zed", 1, 1), rec("Alpha", 1, 1), rec("Zed", 1, 1)];
        let names: Vec<_> = product_table(&records).unwrap().into_keys().collect();
        assert_eq!(names, vec!["Zed", "Alpha"]);
    }

    #[test]
    fn generate_fn_returns_fresh_aggregates_each_call() {
        let first = Report::generate(&example()).unwrap();
        let second = Report::generate(&example()).unwrap();
        assert_eq!(first.products(), second.products());
        assert_eq!(second.total_revenue(), Money::from_cents(7500));
    }

    #[test]
    fn generate_fn_returns_error_when_revenue_overflows() {
        let huge: Money = "50000000000000000000000000000".parse().unwrap();
        let records = vec![
            SalesRecord::new("Big", 1, huge),
            SalesRecord::new("Bigger", 1, huge),
        ];
        assert_eq!(total_revenue(&records), Err(ReportError::Overflow));
        assert_eq!(Report::generate(&records).unwrap_err(), ReportError::Overflow);

        let same_product = vec![
            SalesRecord::new("Big", 1, huge),
            SalesRecord::new("Big", 1, huge),
        ];
        assert_eq!(product_table(&same_product), Err(ReportError::Overflow));
        assert_eq!(
            highest_revenue_product(&same_product),
            Err(ReportError::Overflow)
        );
    }
}
