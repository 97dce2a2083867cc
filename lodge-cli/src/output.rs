//! Rendering of bookings and availability rows.
//!
//! Every listing supports the four [`OutputFormat`]s. Tables are
//! tab-separated with uppercase headers; CSV and TSV use the lowercase
//! headers; JSON is a pretty-printed array.

use std::io::{self, Write};

use lodge::config::OutputFormat;
use lodge::{Availability, Booking};

use crate::error::CliError;
use crate::utils::format_timestamp;

const BOOKING_HEADERS: [&str; 8] = [
    "id",
    "property",
    "guest",
    "start",
    "end",
    "status",
    "total",
    "created_at",
];

const AVAILABILITY_HEADERS: [&str; 4] = ["date", "available", "price", "booking"];

fn booking_fields(booking: &Booking) -> [String; 8] {
    [
        booking.id().to_string(),
        booking.property_id().to_string(),
        booking.guest_id().to_string(),
        booking.dates().start().to_string(),
        booking.dates().end().to_string(),
        booking.status().to_string(),
        booking.total_price().to_string(),
        format_timestamp(booking.created_at()),
    ]
}

fn availability_fields(day: &Availability) -> [String; 4] {
    [
        day.date().to_string(),
        day.is_available().to_string(),
        day.price().map(|p| p.to_string()).unwrap_or_default(),
        day.booking_id().map(|id| id.to_string()).unwrap_or_default(),
    ]
}

fn booking_json(booking: &Booking) -> serde_json::Value {
    serde_json::json!({
        "id": booking.id().get(),
        "property": booking.property_id().as_str(),
        "guest": booking.guest_id().as_str(),
        "start": booking.dates().start().to_string(),
        "end": booking.dates().end().to_string(),
        "status": booking.status().as_str(),
        "total": booking.total_price().to_string(),
        "created_at": format_timestamp(booking.created_at()),
        "updated_at": format_timestamp(booking.updated_at()),
    })
}

fn availability_json(day: &Availability) -> serde_json::Value {
    serde_json::json!({
        "date": day.date().to_string(),
        "available": day.is_available(),
        "price": day.price().map(|p| p.to_string()),
        "booking": day.booking_id().map(lodge::BookingId::get),
    })
}

/// Writes bookings to stdout in `format`.
pub fn write_bookings(bookings: &[Booking], format: OutputFormat) -> Result<(), CliError> {
    let rows: Vec<_> = bookings.iter().map(booking_fields).collect();
    match format {
        OutputFormat::Json => write_json(bookings.iter().map(booking_json).collect()),
        OutputFormat::Table => write_table(&BOOKING_HEADERS, &rows),
        OutputFormat::Csv => write_delimited(&BOOKING_HEADERS, &rows, b','),
        OutputFormat::Tsv => write_delimited(&BOOKING_HEADERS, &rows, b'\t'),
    }
}

/// Writes one booking to stdout: a JSON object or a `key: value` block.
pub fn write_booking(booking: &Booking, format: OutputFormat) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut handle, &booking_json(booking)).map_err(json_error)?;
        writeln!(handle)?;
        return Ok(());
    }

    for (header, value) in BOOKING_HEADERS.iter().zip(booking_fields(booking)) {
        writeln!(handle, "{header}: {value}")?;
    }
    writeln!(handle, "updated_at: {}", format_timestamp(booking.updated_at()))?;
    Ok(())
}

/// Writes availability rows to stdout in `format`.
pub fn write_availability(days: &[Availability], format: OutputFormat) -> Result<(), CliError> {
    let rows: Vec<_> = days.iter().map(availability_fields).collect();
    match format {
        OutputFormat::Json => write_json(days.iter().map(availability_json).collect()),
        OutputFormat::Table => write_table(&AVAILABILITY_HEADERS, &rows),
        OutputFormat::Csv => write_delimited(&AVAILABILITY_HEADERS, &rows, b','),
        OutputFormat::Tsv => write_delimited(&AVAILABILITY_HEADERS, &rows, b'\t'),
    }
}

fn write_table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let header_line = headers
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        let line = row
            .iter()
            .map(|field| if field.is_empty() { "-" } else { field.as_str() })
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(handle, "{line}")?;
    }

    Ok(())
}

fn write_json(values: Vec<serde_json::Value>) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &values).map_err(json_error)?;
    writeln!(handle)?;
    Ok(())
}

fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(io::Error::other(e))
}

fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(io::Error::other(e))
}

fn write_delimited<const N: usize>(
    headers: &[&str; N],
    rows: &[[String; N]],
    delimiter: u8,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}
