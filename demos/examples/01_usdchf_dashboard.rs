use macrocorr::{Cadence, Interval, MacroCorr};
use macrocorr_demos::common::{default_indicators, get_connectors, init_tracing, usdchf};
use macrocorr_demos::render::{render_matrix, render_table};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,macrocorr=debug
    init_tracing();

    let mut builder = MacroCorr::builder();
    for c in get_connectors() {
        builder = builder.with_connector(c);
    }
    let mc = builder.build()?;

    let report = mc
        .dashboard()
        .primary(usdchf())
        .secondaries(&default_indicators())
        .interval(Interval::Monthly)
        .normalize_primary(Cadence::Monthly)
        .run()
        .await?;

    println!("## Data preview (last 10 rows)");
    println!("{}", render_table(&report.table, 10));

    println!("## Correlation matrix (relative changes)");
    println!("{}", render_matrix(&report.matrix));

    if !report.warnings.is_empty() {
        eprintln!("warnings:");
        for w in &report.warnings {
            eprintln!("- {w}");
        }
    }

    Ok(())
}
