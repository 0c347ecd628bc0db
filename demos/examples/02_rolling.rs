use chrono::{Datelike, NaiveDate, Utc};
use macrocorr::{Cadence, DateRange, Interval, MacroCorr, SeriesSpec};
use macrocorr_demos::common::{get_connectors, init_tracing, usdchf};
use macrocorr_demos::render::{render_matrix, render_rolling};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut builder = MacroCorr::builder();
    for c in get_connectors() {
        builder = builder.with_connector(c);
    }
    let mc = builder.rolling_window(12).trim_leading_rows(true).build()?;

    // Ten full calendar years up to the end of last year.
    let last_year = Utc::now().year() - 1;
    let start = NaiveDate::from_ymd_opt(last_year - 9, 1, 1).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(last_year, 12, 31).ok_or("invalid end date")?;

    let report = mc
        .dashboard()
        .primary(usdchf())
        .add_secondary(SeriesSpec::macro_series("CPIAUCSL").labeled("CPI"))
        .add_secondary(SeriesSpec::macro_series("FEDFUNDS").labeled("FedFunds"))
        .range(DateRange::try_new(start, end)?)
        .interval(Interval::Monthly)
        .normalize_primary(Cadence::Monthly)
        .run()
        .await?;

    println!("## Full-period correlation");
    println!("{}", render_matrix(&report.matrix));

    println!("## Rolling 12-month correlation (last 12 windows)");
    println!("{}", render_rolling(&report.rolling, 12));

    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    Ok(())
}
