// Interactive command-line driver.
// Prompts for a date and coordinate, prints the forecast, then every saved forecast.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::cache::CacheStorage;
use crate::error::{ForecastAppError, Result};
use crate::fetcher::ForecastFetcher;
use crate::status::precipitation_status;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-mm-dd` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ForecastAppError::InvalidDate(input.to_string()))
}

/// Run one interactive session against `input`/`output`.
///
/// `today` anchors the default date (the day after). An invalid date ends the
/// session after a message, before any lookup; so does end of input at any prompt.
pub async fn run<S, R, W>(
    fetcher: &mut ForecastFetcher<S>,
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<()>
where
    S: CacheStorage,
    R: BufRead,
    W: Write,
{
    let Some(entered) = prompt(
        input,
        output,
        "Enter a date (YYYY-mm-dd) or leave empty for tomorrow: ",
    )?
    else {
        return Ok(());
    };

    // A date that parses is used exactly as typed, so it matches earlier keys.
    let date = if entered.is_empty() {
        let tomorrow = today.succ_opt().unwrap_or(today);
        tomorrow.format(DATE_FORMAT).to_string()
    } else {
        if let Err(e) = parse_date(&entered) {
            tracing::debug!("{e}");
            writeln!(output, "Invalid date format. Please use YYYY-mm-dd.")?;
            return Ok(());
        }
        entered
    };

    let Some(lat) = prompt(input, output, "Enter latitude (e.g., 51.5074): ")? else {
        return Ok(());
    };
    let Some(lon) = prompt(input, output, "Enter longitude (e.g., -0.1278): ")? else {
        return Ok(());
    };

    let precipitation = fetcher.fetch(&lat, &lon, &date).await?;
    writeln!(output, "{}", precipitation_status(precipitation))?;

    writeln!(output, "\nSaved forecasts:")?;
    for (key, value) in fetcher.cache().iter() {
        writeln!(output, "{key}: {}", precipitation_status(value))?;
    }

    Ok(())
}

/// Print `message` and read one trimmed line, or `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        tracing::debug!("End of input at prompt");
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
