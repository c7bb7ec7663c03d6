//! Quotes and payment recording.

use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

use crate::booking_lookup::load_booking_from_studio;
use crate::config_loader::load_studio_configuration;
use crate::error::StudioError;
use crate::file_io::get_configuration_path;
use crate::models::{BookingData, BookingStatus, PaymentRecord, StudioConfiguration};
use crate::record_files::write_booking_to_file;

/// Price breakdown for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuote {
    pub package_price: i64,
    pub add_on_total: i64,
    pub total: i64,
    pub paid: i64,
    pub balance: i64,
}

/// Compute the quote for a booking from the catalog.
///
/// # Arguments
/// * `configuration` - Studio configuration holding the catalog.
/// * `booking` - Booking to price.
///
/// # Errors
/// Returns `StudioError::BookingOperation` if the booking references a
/// package or add-on no longer in the catalog.
pub fn compute_booking_quote(
    configuration: &StudioConfiguration,
    booking: &BookingData,
) -> Result<BookingQuote, StudioError> {
    let package = configuration.packages.get(&booking.package).ok_or_else(|| {
        StudioError::BookingOperation(format!("unknown package '{}'", booking.package))
    })?;

    let mut add_on_total = 0;
    for key in &booking.add_ons {
        let add_on = configuration.add_ons.get(key).ok_or_else(|| {
            StudioError::BookingOperation(format!("unknown add-on '{key}'"))
        })?;
        add_on_total += add_on.price;
    }

    let total = package.price + add_on_total;
    let paid: i64 = booking.payments.iter().map(|payment| payment.amount).sum();
    Ok(BookingQuote {
        package_price: package.price,
        add_on_total,
        total,
        paid,
        balance: total - paid,
    })
}

/// Quote a booking by identifier.
///
/// # Errors
/// Returns `StudioError` if the booking or catalog entries are missing.
pub fn quote_booking(root: &Path, identifier: &str) -> Result<BookingQuote, StudioError> {
    let lookup = load_booking_from_studio(root, identifier)?;
    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    compute_booking_quote(&configuration, &lookup.booking)
}

/// Record a payment against an approved booking.
///
/// # Arguments
/// * `root` - Repository root path.
/// * `identifier` - Booking identifier.
/// * `amount` - Payment amount in the studio currency.
/// * `method` - Payment method, e.g. "cash" or "bank-transfer".
///
/// # Errors
/// Returns `StudioError::BookingOperation` for non-approved bookings,
/// non-positive amounts, or amounts beyond the outstanding balance.
pub fn record_payment(
    root: &Path,
    identifier: &str,
    amount: i64,
    method: &str,
) -> Result<BookingData, StudioError> {
    if amount <= 0 {
        return Err(StudioError::BookingOperation(
            "payment amount must be positive".to_string(),
        ));
    }

    let lookup = load_booking_from_studio(root, identifier)?;
    if lookup.booking.status != BookingStatus::Approved {
        return Err(StudioError::BookingOperation(
            "payments require an approved booking".to_string(),
        ));
    }

    let configuration = load_studio_configuration(&get_configuration_path(root)?)?;
    let quote = compute_booking_quote(&configuration, &lookup.booking)?;
    if amount > quote.balance {
        return Err(StudioError::BookingOperation(format!(
            "payment of {amount} exceeds the outstanding balance of {}",
            quote.balance
        )));
    }

    let mut updated = lookup.booking.clone();
    updated.payments.push(PaymentRecord {
        id: Uuid::new_v4().to_string(),
        amount,
        method: method.trim().to_string(),
        paid_at: Utc::now(),
    });
    updated.updated_at = Utc::now();
    write_booking_to_file(&updated, &lookup.booking_path)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_studio_configuration;
    use crate::models::WorkloadData;
    use chrono::{NaiveDate, TimeZone};

    fn sample_booking(package: &str, add_ons: &[&str]) -> BookingData {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        BookingData {
            identifier: "shutter-abc".to_string(),
            client: "Reyes".to_string(),
            package: package.to_string(),
            add_ons: add_ons.iter().map(|key| key.to_string()).collect(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            status: BookingStatus::Approved,
            notes: String::new(),
            payments: Vec::new(),
            feedback: Vec::new(),
            workload: WorkloadData::default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[test]
    fn quote_sums_package_and_add_ons() {
        let configuration = default_studio_configuration();
        let booking = sample_booking("portrait", &["extra-hour", "drone"]);
        let quote = compute_booking_quote(&configuration, &booking).unwrap();
        assert_eq!(quote.package_price, 8_000);
        assert_eq!(quote.add_on_total, 8_000);
        assert_eq!(quote.total, 16_000);
        assert_eq!(quote.balance, 16_000);
    }

    #[test]
    fn quote_subtracts_recorded_payments() {
        let configuration = default_studio_configuration();
        let mut booking = sample_booking("portrait", &[]);
        booking.payments.push(PaymentRecord {
            id: "pay-1".to_string(),
            amount: 3_000,
            method: "cash".to_string(),
            paid_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        });
        let quote = compute_booking_quote(&configuration, &booking).unwrap();
        assert_eq!(quote.paid, 3_000);
        assert_eq!(quote.balance, 5_000);
    }

    #[test]
    fn quote_rejects_unknown_catalog_keys() {
        let configuration = default_studio_configuration();
        let booking = sample_booking("mural", &[]);
        assert!(compute_booking_quote(&configuration, &booking).is_err());
    }
}
