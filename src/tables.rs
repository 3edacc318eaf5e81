use std::collections::BTreeMap;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{
    comparison::{ComparisonSet, StoreDeal},
    drops::PriceDrop,
};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(header);
    table
}

pub fn build_comparison_table(results: &ComparisonSet) -> Table {
    let mut table = new_table(vec![
        "Product", "Best store", "Best price", "Average", "Max", "Savings", "Savings %",
    ]);
    for (product, comparison) in results {
        let statistics = &comparison.statistics;
        table.add_row(vec![
            Cell::new(product),
            Cell::new(&comparison.best_deal.store),
            Cell::new(comparison.best_deal.price)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(statistics.average_price).set_alignment(CellAlignment::Right),
            Cell::new(statistics.max_price)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(statistics.price_range).set_alignment(CellAlignment::Right),
            Cell::new(statistics.savings_percentage).set_alignment(CellAlignment::Right).fg(
                if statistics.savings_percentage.0 > 0.0 { Color::Green } else { Color::Reset },
            ),
        ]);
    }
    table
}

pub fn build_deals_by_store_table(deals_by_store: &BTreeMap<String, Vec<StoreDeal>>) -> Table {
    let mut table = new_table(vec!["Store", "Product", "Best price"]);
    for (store, deals) in deals_by_store {
        for deal in deals {
            table.add_row(vec![
                Cell::new(store),
                Cell::new(&deal.product),
                Cell::new(deal.price).set_alignment(CellAlignment::Right).fg(Color::Green),
            ]);
        }
    }
    table
}

pub fn build_drops_table(drops: &BTreeMap<String, PriceDrop>) -> Table {
    let mut table = new_table(vec!["Product", "Old price", "New price", "Drop", "Drop %"]);
    for (product, drop) in drops {
        table.add_row(vec![
            Cell::new(product),
            Cell::new(drop.old_price).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(drop.new_price).set_alignment(CellAlignment::Right).fg(Color::Green),
            Cell::new(drop.drop_amount).set_alignment(CellAlignment::Right),
            Cell::new(drop.drop_percentage).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    table
}
