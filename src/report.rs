use std::fmt::Write;

use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::{core::comparison::ComparisonSet, prelude::*, quantity::price::Price};

const RULE_WIDTH: usize = 70;

/// Render the plain-text report with the current timestamp.
#[must_use]
pub fn text(results: &ComparisonSet) -> String {
    text_at(results, Local::now())
}

/// Render the plain-text report: header, summary, and per-product details
/// sorted by product name, with each product's prices ascending by price.
#[must_use]
pub fn text_at(results: &ComparisonSet, generated_at: DateTime<Local>) -> String {
    let mut report = String::new();

    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(report, "{rule}");
    let _ = writeln!(report, "{:^RULE_WIDTH$}", "PRICE COMPARISON REPORT");
    let _ = writeln!(report, "{rule}");
    let _ = writeln!(report, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(report);

    let total_savings: Price =
        results.values().map(|comparison| comparison.statistics.price_range).sum();
    let _ = writeln!(report, "SUMMARY");
    let _ = writeln!(report, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(report, "Total Products: {}", results.len());
    let _ = writeln!(report, "Total Potential Savings: {total_savings}");
    let _ = writeln!(report);

    let _ = writeln!(report, "DETAILED COMPARISONS");
    let _ = writeln!(report, "{}", "-".repeat(RULE_WIDTH));
    for (product, comparison) in results {
        let _ = writeln!(report);
        let _ = writeln!(report, "{}", product.to_uppercase());
        let _ = writeln!(report, "  Best Deal:");
        let _ = writeln!(report, "    Store: {}", comparison.best_deal.store);
        let _ = writeln!(report, "    Price: {}", comparison.best_deal.price);
        let _ = writeln!(report, "  All Prices:");
        for (store, price) in
            comparison.all_prices.iter().sorted_by_key(|(_, price)| **price)
        {
            let _ = writeln!(report, "    {store}: {price}");
        }
        let statistics = &comparison.statistics;
        let _ = writeln!(report, "  Statistics:");
        let _ = writeln!(report, "    Average Price: {}", statistics.average_price);
        let _ = writeln!(
            report,
            "    Price Range: {} - {}",
            statistics.min_price, statistics.max_price
        );
        let _ = writeln!(
            report,
            "    Potential Savings: {} ({})",
            statistics.price_range, statistics.savings_percentage
        );
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "{rule}");
    let _ = writeln!(report, "{:^RULE_WIDTH$}", "END OF REPORT");
    let _ = write!(report, "{rule}");
    report
}

/// Render the CSV report, one row per product sorted by name.
#[must_use]
pub fn csv(results: &ComparisonSet) -> String {
    let mut lines =
        vec!["Product,Best Store,Best Price,Average Price,Max Price,Savings Amount,Savings %"
            .to_string()];
    for (product, comparison) in results {
        let statistics = &comparison.statistics;
        lines.push(format!(
            "{product},{},{},{},{},{},{}",
            comparison.best_deal.store,
            comparison.best_deal.price,
            statistics.average_price,
            statistics.max_price,
            statistics.price_range,
            statistics.savings_percentage,
        ));
    }
    lines.join("\n")
}

/// Render the comparison mapping as indented JSON.
pub fn json(results: &ComparisonSet) -> Result<String> {
    serde_json::to_string_pretty(results).context("failed to serialize the comparison results")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::{comparison::compare, snapshot::PriceSnapshot};

    fn laptop_results() -> ComparisonSet {
        let snapshot = PriceSnapshot(BTreeMap::from([(
            "Laptop".to_string(),
            BTreeMap::from([
                ("Amazon".to_string(), Price(899.99)),
                ("Walmart".to_string(), Price(850.0)),
                ("Best Buy".to_string(), Price(910.0)),
            ]),
        )]));
        compare(&snapshot)
    }

    #[test]
    fn csv_header_and_row() {
        let csv = csv(&laptop_results());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Product,Best Store,Best Price,Average Price,Max Price,Savings Amount,Savings %"),
        );
        assert_eq!(lines.next(), Some("Laptop,Walmart,$850.00,$886.66,$910.00,$60.00,6.6%"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_uses_camel_case_field_names() -> Result {
        let rendered = json(&laptop_results())?;
        assert!(rendered.contains("\"bestDeal\""));
        assert!(rendered.contains("\"allPrices\""));
        assert!(rendered.contains("\"savingsPercentage\""));

        let parsed: ComparisonSet = serde_json::from_str(&rendered)?;
        assert_eq!(parsed, laptop_results());
        Ok(())
    }

    #[test]
    fn text_lists_prices_in_ascending_order() {
        let report = text(&laptop_results());
        assert!(report.contains("Total Products: 1"));
        assert!(report.contains("Total Potential Savings: $60.00"));
        assert!(report.contains("LAPTOP"));
        assert!(report.contains("    Store: Walmart"));

        let walmart = report.find("Walmart: $850.00").unwrap();
        let amazon = report.find("Amazon: $899.99").unwrap();
        let best_buy = report.find("Best Buy: $910.00").unwrap();
        assert!(walmart < amazon);
        assert!(amazon < best_buy);
    }
}
