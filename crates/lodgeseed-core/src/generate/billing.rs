//! Payment methods, payments, bookings and payout accounts.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::catalogue::{
    CARD_BRANDS, CARD_EXP_MONTHS, CARD_EXP_YEARS, CARD_LAST4, PAYMENT_METHOD_TYPES,
    PAYMENT_STATUSES, PAYOUT_ACCOUNT_TYPES, PAYPAL_ID_CHARSET, PAYPAL_ID_LENGTH, PAYPAL_ID_PREFIX,
    STAY_NIGHTS,
};
use crate::config::SeedConfig;
use crate::error::{Result, SeedError};
use crate::generate::{pick, random_between, random_string, random_timestamp, require_parents};
use crate::lookup::{CustomerMethod, MethodEmail, PaymentRef, PricedListing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub customer_id: i64,
    pub method_type: &'static str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCreditCard {
    pub payment_method_id: i64,
    pub brand: &'static str,
    pub last4: i32,
    pub exp_month: i32,
    pub exp_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaypal {
    pub payment_method_id: i64,
    pub paypal_user_id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayoutAccount {
    pub host_account_id: i64,
    pub account_type: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub customer_id: i64,
    pub amount_cents: i64,
    pub status: &'static str,
    pub payment_method_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub guest_account_id: i64,
    pub accommodation_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_id: i64,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
}

/// Payment methods owned by guests, each either a card or a PayPal account.
pub fn generate_payment_methods(
    config: &SeedConfig,
    guest_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewPaymentMethod>> {
    require_parents(guest_ids, "payment_methods", "accounts (role = guest)")?;

    Ok((0..config.rows)
        .map(|_| NewPaymentMethod {
            customer_id: *pick(guest_ids, rng),
            method_type: *pick(PAYMENT_METHOD_TYPES, rng),
            created_at: random_timestamp(&config.window, rng),
        })
        .collect())
}

/// One card per payment method of type `card`.
pub fn generate_credit_cards(card_method_ids: &[i64], rng: &mut impl Rng) -> Vec<NewCreditCard> {
    card_method_ids
        .iter()
        .map(|&payment_method_id| NewCreditCard {
            payment_method_id,
            brand: *pick(CARD_BRANDS, rng),
            last4: rng.random_range(CARD_LAST4),
            exp_month: rng.random_range(CARD_EXP_MONTHS),
            exp_year: rng.random_range(CARD_EXP_YEARS),
        })
        .collect()
}

/// One PayPal account per payment method of type `paypal`, registered under
/// the owner's account email.
pub fn generate_paypal(methods: &[MethodEmail], rng: &mut impl Rng) -> Vec<NewPaypal> {
    methods
        .iter()
        .map(|method| NewPaypal {
            payment_method_id: method.payment_method_id,
            paypal_user_id: format!(
                "{}{}",
                PAYPAL_ID_PREFIX,
                random_string(PAYPAL_ID_CHARSET, PAYPAL_ID_LENGTH, rng)
            ),
            email: method.email.clone(),
        })
        .collect()
}

/// Payout accounts for hosts. A host's first payout account is its default.
pub fn generate_payout_accounts(
    config: &SeedConfig,
    host_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewPayoutAccount>> {
    require_parents(host_ids, "payout_accounts", "accounts (role = host)")?;

    let mut has_default = HashSet::new();
    Ok((0..config.rows)
        .map(|_| {
            let host_account_id = *pick(host_ids, rng);
            NewPayoutAccount {
                host_account_id,
                account_type: *pick(PAYOUT_ACCOUNT_TYPES, rng),
                is_default: has_default.insert(host_account_id),
            }
        })
        .collect())
}

/// Payments by customers with a payment method. The amount is a listing's
/// nightly price times a stay length, so a booking can be matched to it later.
pub fn generate_payments(
    config: &SeedConfig,
    customers: &[CustomerMethod],
    listings: &[PricedListing],
    rng: &mut impl Rng,
) -> Result<Vec<NewPayment>> {
    require_parents(customers, "payments", "payment_methods")?;
    require_parents(listings, "payments", "accommodations")?;

    Ok((0..config.rows)
        .map(|_| {
            let customer = pick(customers, rng);
            let listing = pick(listings, rng);
            let nights = rng.random_range(STAY_NIGHTS);
            NewPayment {
                customer_id: customer.customer_id,
                amount_cents: i64::from(listing.price_cents) * nights,
                status: *pick(PAYMENT_STATUSES, rng),
                payment_method_id: customer.payment_method_id,
            }
        })
        .collect())
}

/// One booking per payment. The booked listing is one whose price divides
/// the payment amount into a valid stay length.
pub fn generate_bookings(
    config: &SeedConfig,
    payments: &[PaymentRef],
    listings: &[PricedListing],
    rng: &mut impl Rng,
) -> Result<Vec<NewBooking>> {
    require_parents(payments, "bookings", "payments")?;
    require_parents(listings, "bookings", "accommodations")?;

    let first_day = config.window.start.date();
    let last_day = config.window.stop.date();

    payments
        .iter()
        .map(|payment| {
            let matches: Vec<(i64, i64)> = listings
                .iter()
                .filter_map(|listing| {
                    stay_nights(payment.amount_cents, listing.price_cents)
                        .map(|nights| (listing.id, nights))
                })
                .collect();
            if matches.is_empty() {
                return Err(SeedError::MissingParentRows {
                    table: "bookings".to_string(),
                    parent: format!(
                        "accommodations priced to match payment {} ({} cents)",
                        payment.id, payment.amount_cents
                    ),
                });
            }
            let &(accommodation_id, nights) = pick(&matches, rng);

            let latest_start = (last_day - Duration::days(nights)).max(first_day);
            let offset = rng.random_range(0..=(latest_start - first_day).num_days());
            let start_date = first_day + Duration::days(offset);
            let end_date = start_date + Duration::days(nights);

            let check_in = start_date
                .and_hms_opt(0, 0, 0)
                .unwrap_or(config.window.start)
                .clamp(config.window.start, config.window.stop);
            let created_at = random_between(config.window.start, check_in, rng);

            Ok(NewBooking {
                guest_account_id: payment.customer_id,
                accommodation_id,
                start_date,
                end_date,
                payment_id: payment.id,
                status: booking_status(&payment.status, rng),
                created_at,
            })
        })
        .collect()
}

/// Nights covered by `amount_cents` at `price_cents` a night, if that is a
/// whole stay length.
fn stay_nights(amount_cents: i64, price_cents: i32) -> Option<i64> {
    let price = i64::from(price_cents);
    if price <= 0 || amount_cents % price != 0 {
        return None;
    }
    Some(amount_cents / price).filter(|nights| STAY_NIGHTS.contains(nights))
}

fn booking_status(payment_status: &str, rng: &mut impl Rng) -> &'static str {
    match payment_status {
        "succeeded" => {
            if rng.random_bool(0.5) {
                "completed"
            } else {
                "confirmed"
            }
        }
        "pending" => "pending",
        _ => "cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn listings() -> Vec<PricedListing> {
        vec![
            PricedListing {
                id: 1,
                price_cents: 5_000,
            },
            PricedListing {
                id: 2,
                price_cents: 12_300,
            },
            PricedListing {
                id: 3,
                price_cents: 50_000,
            },
        ]
    }

    #[test]
    fn test_payment_methods_use_guests() {
        let config = SeedConfig::default();
        let guests = [2_i64, 3, 5];
        let mut rng = StdRng::seed_from_u64(31);
        let methods = generate_payment_methods(&config, &guests, &mut rng).unwrap();

        assert_eq!(methods.len(), config.rows);
        for method in &methods {
            assert!(guests.contains(&method.customer_id));
            assert!(["card", "paypal"].contains(&method.method_type));
            assert!(config.window.contains(method.created_at));
        }
    }

    #[test]
    fn test_credit_card_ranges() {
        let mut rng = StdRng::seed_from_u64(32);
        let cards = generate_credit_cards(&[10, 20, 30], &mut rng);

        assert_eq!(cards.len(), 3);
        for (card, id) in cards.iter().zip([10, 20, 30]) {
            assert_eq!(card.payment_method_id, id);
            assert!(CARD_BRANDS.contains(&card.brand));
            assert!((0..=9999).contains(&card.last4));
            assert!((1..=12).contains(&card.exp_month));
            assert!((2023..=2053).contains(&card.exp_year));
        }
    }

    #[test]
    fn test_paypal_ids_and_emails() {
        let methods = vec![
            MethodEmail {
                payment_method_id: 101,
                email: "luna.bork@winkhub.org".to_string(),
            },
            MethodEmail {
                payment_method_id: 102,
                email: "kai.mcfluff@luvmail.net".to_string(),
            },
        ];
        let mut rng = StdRng::seed_from_u64(33);
        let rows = generate_paypal(&methods, &mut rng);

        assert_eq!(rows.len(), 2);
        for (row, method) in rows.iter().zip(&methods) {
            assert_eq!(row.payment_method_id, method.payment_method_id);
            assert!(row.paypal_user_id.starts_with("PP-"));
            assert_eq!(row.paypal_user_id.len(), 3 + PAYPAL_ID_LENGTH);
            assert!(row.email.contains('@'));
        }
    }

    #[test]
    fn test_one_default_payout_account_per_host() {
        let config = SeedConfig::default();
        let hosts = [7_i64, 8];
        let mut rng = StdRng::seed_from_u64(34);
        let rows = generate_payout_accounts(&config, &hosts, &mut rng).unwrap();

        assert_eq!(rows.len(), config.rows);
        for host in hosts {
            let defaults = rows
                .iter()
                .filter(|r| r.host_account_id == host && r.is_default)
                .count();
            let total = rows.iter().filter(|r| r.host_account_id == host).count();
            assert_eq!(defaults, usize::from(total > 0));
        }
    }

    #[test]
    fn test_payment_amounts_are_whole_stays() {
        let config = SeedConfig::default();
        let customers = [
            CustomerMethod {
                customer_id: 4,
                payment_method_id: 40,
            },
            CustomerMethod {
                customer_id: 6,
                payment_method_id: 61,
            },
        ];
        let listings = listings();
        let mut rng = StdRng::seed_from_u64(35);
        let payments = generate_payments(&config, &customers, &listings, &mut rng).unwrap();

        assert_eq!(payments.len(), config.rows);
        for payment in &payments {
            assert!(customers.contains(&CustomerMethod {
                customer_id: payment.customer_id,
                payment_method_id: payment.payment_method_id,
            }));
            assert!(PAYMENT_STATUSES.contains(&payment.status));
            assert!(listings
                .iter()
                .any(|l| stay_nights(payment.amount_cents, l.price_cents).is_some()));
        }
    }

    #[test]
    fn test_bookings_follow_payments() {
        let config = SeedConfig::default();
        let listings = listings();
        let payments = vec![
            PaymentRef {
                id: 1,
                customer_id: 4,
                amount_cents: 12_300 * 3,
                status: "succeeded".to_string(),
            },
            PaymentRef {
                id: 2,
                customer_id: 6,
                amount_cents: 50_000 * 14,
                status: "failed".to_string(),
            },
            PaymentRef {
                id: 3,
                customer_id: 6,
                amount_cents: 5_000,
                status: "pending".to_string(),
            },
        ];
        let mut rng = StdRng::seed_from_u64(36);
        let bookings = generate_bookings(&config, &payments, &listings, &mut rng).unwrap();

        assert_eq!(bookings.len(), payments.len());
        for (booking, payment) in bookings.iter().zip(&payments) {
            assert_eq!(booking.payment_id, payment.id);
            assert_eq!(booking.guest_account_id, payment.customer_id);

            let listing = listings
                .iter()
                .find(|l| l.id == booking.accommodation_id)
                .unwrap();
            let nights = (booking.end_date - booking.start_date).num_days();
            assert_eq!(i64::from(listing.price_cents) * nights, payment.amount_cents);

            assert!(booking.start_date >= config.window.start.date());
            assert!(booking.end_date <= config.window.stop.date());
            assert!(config.window.contains(booking.created_at));
            assert!(booking.created_at.date() <= booking.start_date);
        }
        assert!(["confirmed", "completed"].contains(&bookings[0].status));
        assert_eq!(bookings[1].status, "cancelled");
        assert_eq!(bookings[2].status, "pending");
    }

    #[test]
    fn test_booking_without_matching_listing_fails() {
        let payments = vec![PaymentRef {
            id: 9,
            customer_id: 1,
            amount_cents: 777,
            status: "succeeded".to_string(),
        }];
        let mut rng = StdRng::seed_from_u64(37);
        let err =
            generate_bookings(&SeedConfig::default(), &payments, &listings(), &mut rng)
                .unwrap_err();
        assert!(matches!(err, SeedError::MissingParentRows { .. }));
    }

    #[test]
    fn test_stay_nights() {
        assert_eq!(stay_nights(15_000, 5_000), Some(3));
        assert_eq!(stay_nights(15_001, 5_000), None);
        assert_eq!(stay_nights(5_000 * 15, 5_000), None);
        assert_eq!(stay_nights(5_000, 0), None);
    }
}
