use chrono::{Datelike, NaiveDate, NaiveTime};
use macrocorr_core::{DateRange, Observation, TimeSeries};

pub mod fx;
pub mod indicators;

/// Fixture epoch; generated data starts here and runs to the end of any
/// requested range.
const FIRST: (i32, u32, u32) = (2015, 1, 1);

pub fn by_symbol(symbol: &str, range: &DateRange) -> Option<TimeSeries> {
    let points = match symbol {
        "CHF=X" => monthly(range, fx::usdchf),
        "CPIAUCSL" => monthly(range, indicators::cpi),
        "UNRATE" => monthly(range, indicators::unemployment),
        "FEDFUNDS" => monthly(range, indicators::fed_funds),
        "DGS10" => daily(range, indicators::treasury_10y),
        _ => return None,
    };
    TimeSeries::try_new(symbol, points).ok()
}

fn bounds(range: &DateRange) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(FIRST.0, FIRST.1, FIRST.2)?;
    let start = range.start().max(first);
    (start <= range.end()).then_some((start, range.end()))
}

/// One observation at the first of each month; `f` receives months since the
/// fixture epoch.
fn monthly(range: &DateRange, f: fn(f64) -> f64) -> Vec<Observation> {
    let Some((start, end)) = bounds(range) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let mut y = start.year();
    let mut m = start.month();
    if start.day() != 1 {
        (y, m) = next_month(y, m);
    }
    while let Some(d) = NaiveDate::from_ymd_opt(y, m, 1)
        && d <= end
    {
        let idx = (y - FIRST.0) * 12 + i32::try_from(m).unwrap_or(1) - 1;
        out.push(Observation::new(
            d.and_time(NaiveTime::MIN).and_utc(),
            f(f64::from(idx)),
        ));
        (y, m) = next_month(y, m);
    }
    out
}

const fn next_month(y: i32, m: u32) -> (i32, u32) {
    if m == 12 { (y + 1, 1) } else { (y, m + 1) }
}

/// Business days, minus a pseudo-holiday every 17th day; `f` receives days since
/// the fixture epoch.
fn daily(range: &DateRange, f: fn(f64) -> f64) -> Vec<Observation> {
    let Some((start, end)) = bounds(range) else {
        return Vec::new();
    };
    let Some(epoch) = NaiveDate::from_ymd_opt(FIRST.0, FIRST.1, FIRST.2) else {
        return Vec::new();
    };
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| d.weekday().number_from_monday() <= 5)
        .filter_map(|d| {
            let idx = (d - epoch).num_days();
            #[allow(clippy::cast_precision_loss)]
            let x = idx as f64;
            (idx % 17 != 0).then(|| Observation::new(d.and_time(NaiveTime::MIN).and_utc(), f(x)))
        })
        .collect()
}
