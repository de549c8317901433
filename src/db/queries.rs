use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    AvailabilityWindow, Booking, BookingStatus, Payment, PaymentStatus, TimeSlot, Tutor,
    DEFAULT_HOURLY_RATE,
};
use crate::models::slot::DATE_FORMAT;
use crate::time::TimeOfDay;

// ── Tutors ──

pub fn create_tutor(conn: &Connection, name: &str, hourly_rate: Option<f64>) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO tutors (name, hourly_rate) VALUES (?1, ?2)",
        params![name, hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_tutor(conn: &Connection, id: i64) -> anyhow::Result<Option<Tutor>> {
    let result = conn.query_row(
        "SELECT id, name, hourly_rate FROM tutors WHERE id = ?1",
        params![id],
        |row| {
            Ok(Tutor {
                id: row.get(0)?,
                name: row.get(1)?,
                hourly_rate: row.get(2)?,
            })
        },
    );

    match result {
        Ok(tutor) => Ok(Some(tutor)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Availability ──

pub fn add_availability(
    conn: &Connection,
    tutor_id: i64,
    day_of_week: u8,
    slot: &TimeSlot,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO availability (tutor_id, day_of_week, start_time, end_time, is_available) \
         VALUES (?1, ?2, ?3, ?4, 1)",
        params![
            tutor_id,
            day_of_week,
            slot.start().to_string(),
            slot.end().to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Enabled windows for one weekday, ordered by start time.
pub fn get_availability_for_day(
    conn: &Connection,
    tutor_id: i64,
    day_of_week: u8,
) -> anyhow::Result<Vec<AvailabilityWindow>> {
    let mut stmt = conn.prepare(
        "SELECT id, tutor_id, day_of_week, start_time, end_time, is_available FROM availability \
         WHERE tutor_id = ?1 AND day_of_week = ?2 AND is_available = 1 ORDER BY start_time",
    )?;

    let rows = stmt.query_map(params![tutor_id, day_of_week], |row| {
        Ok(parse_availability_row(row))
    })?;

    let mut windows = vec![];
    for row in rows {
        windows.push(row??);
    }
    Ok(windows)
}

fn parse_availability_row(row: &rusqlite::Row) -> anyhow::Result<AvailabilityWindow> {
    let start: String = row.get(3)?;
    let end: String = row.get(4)?;

    Ok(AvailabilityWindow {
        id: row.get(0)?,
        tutor_id: row.get(1)?,
        day_of_week: row.get(2)?,
        slot: parse_slot(&start, &end)?,
        is_available: row.get(5)?,
    })
}

// ── Bookings ──

pub fn create_booking(
    conn: &Connection,
    student_id: i64,
    tutor_id: i64,
    booking_date: NaiveDate,
    slot: &TimeSlot,
    status: BookingStatus,
) -> anyhow::Result<i64> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO bookings (student_id, tutor_id, booking_date, start_time, end_time, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            student_id,
            tutor_id,
            booking_date.format(DATE_FORMAT).to_string(),
            slot.start().to_string(),
            slot.end().to_string(),
            status.as_str(),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_bookings_on_date(
    conn: &Connection,
    tutor_id: i64,
    booking_date: NaiveDate,
    status: BookingStatus,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, tutor_id, booking_date, start_time, end_time, status, created_at \
         FROM bookings WHERE tutor_id = ?1 AND booking_date = ?2 AND status = ?3 ORDER BY start_time",
    )?;

    let rows = stmt.query_map(
        params![
            tutor_id,
            booking_date.format(DATE_FORMAT).to_string(),
            status.as_str()
        ],
        |row| Ok(parse_booking_row(row)),
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, student_id, tutor_id, booking_date, start_time, end_time, status, created_at \
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let changed = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(changed > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let booking_date_str: String = row.get(3)?;
    let start: String = row.get(4)?;
    let end: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let booking_date = NaiveDate::parse_from_str(&booking_date_str, DATE_FORMAT)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Booking {
        id: row.get(0)?,
        student_id: row.get(1)?,
        tutor_id: row.get(2)?,
        booking_date,
        slot: parse_slot(&start, &end)?,
        status: BookingStatus::parse(&status_str),
        created_at,
    })
}

// ── Payments ──

pub fn create_payment(
    conn: &Connection,
    booking_id: i64,
    amount: f64,
    status: PaymentStatus,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO payments (booking_id, amount, currency, status) VALUES (?1, ?2, 'EUR', ?3)",
        params![booking_id, amount, status.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_payment_for_booking(conn: &Connection, booking_id: i64) -> anyhow::Result<Option<Payment>> {
    let result = conn.query_row(
        "SELECT id, booking_id, amount, currency, status FROM payments \
         WHERE booking_id = ?1 ORDER BY id LIMIT 1",
        params![booking_id],
        |row| {
            let status_str: String = row.get(4)?;
            Ok(Payment {
                id: row.get(0)?,
                booking_id: row.get(1)?,
                amount: row.get(2)?,
                currency: row.get(3)?,
                status: PaymentStatus::parse(&status_str),
            })
        },
    );

    match result {
        Ok(payment) => Ok(Some(payment)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_payment_status(
    conn: &Connection,
    id: i64,
    status: PaymentStatus,
) -> anyhow::Result<bool> {
    let changed = conn.execute(
        "UPDATE payments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(changed > 0)
}

fn parse_slot(start: &str, end: &str) -> anyhow::Result<TimeSlot> {
    let start: TimeOfDay = start.parse()?;
    let end: TimeOfDay = end.parse()?;
    TimeSlot::new(start, end)
        .ok_or_else(|| anyhow::anyhow!("stored slot {start}-{end} has start after end"))
}
