use anyhow::Result;
use cashcast_core::CashFlowPrediction;
use std::fmt::Write;

use crate::config::OutputFormat;

pub fn render(p: &CashFlowPrediction, format: OutputFormat, risky_limit: usize) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(p)?),
        OutputFormat::Text => Ok(render_text(p, risky_limit)),
    }
}

fn render_text(p: &CashFlowPrediction, risky_limit: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}-day cash-flow outlook\n", p.horizon_days);
    let _ = writeln!(out, "Income:            {:>12.2}", p.total_income);
    let _ = writeln!(out, "Expenses:          {:>12.2}", p.total_expenses);
    let _ = writeln!(out, "Net cash flow:     {:>12.2}", p.net_cash_flow);
    let _ = writeln!(out, "Savings rate:      {:>11.1}%", p.savings_rate());
    match p.latest_known_balance {
        Some(b) => {
            let _ = writeln!(out, "Latest balance:    {:>12.2}", b);
        }
        None => {
            let _ = writeln!(out, "Latest balance:    {:>12}", "unknown");
        }
    }
    let _ = writeln!(out, "Predicted balance: {:>12.2}", p.predicted_balance);

    let _ = writeln!(out, "\n## Top categories\n");
    if p.top_categories.is_empty() {
        let _ = writeln!(out, "(no spending)");
    }
    for c in &p.top_categories {
        let _ = writeln!(out, "- {:<16} {:>12.2}", c.category.label(), c.amount);
    }

    let _ = writeln!(out, "\n## Risky days\n");
    if p.risky_days.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for d in p.risky_days_shown(risky_limit) {
        let _ = writeln!(out, "- {d}");
    }
    if p.risky_days.len() > risky_limit {
        let _ = writeln!(out, "  ... and {} more", p.risky_days.len() - risky_limit);
    }

    let _ = writeln!(out, "\n## Recommendation\n");
    let _ = writeln!(out, "{}", p.recommendation);

    let _ = writeln!(
        out,
        "\n({} transactions over {} days, {} messages skipped)",
        p.transaction_count, p.days_with_data, p.skipped_records
    );

    out
}
