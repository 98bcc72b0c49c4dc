//! # Marketplace Tables
//!
//! The seeded tables and the foreign-key parents each one needs. This is the
//! single place the dependency relation is declared; insertion order is
//! derived from it by `graph::topo`.

use std::fmt;
use std::str::FromStr;

use crate::error::SeedError;

/// A table populated by one generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Accounts,
    Credentials,
    Addresses,
    Accommodations,
    Images,
    PaymentMethods,
    CreditCards,
    Paypal,
    Reviews,
    Conversations,
    Messages,
    ReviewImages,
    AccommodationImages,
    Notifications,
    PayoutAccounts,
    Payments,
    Bookings,
}

impl Table {
    /// Every seeded table, in declaration order.
    pub const ALL: [Table; 17] = [
        Table::Accounts,
        Table::Credentials,
        Table::Addresses,
        Table::Accommodations,
        Table::Images,
        Table::PaymentMethods,
        Table::CreditCards,
        Table::Paypal,
        Table::Reviews,
        Table::Conversations,
        Table::Messages,
        Table::ReviewImages,
        Table::AccommodationImages,
        Table::Notifications,
        Table::PayoutAccounts,
        Table::Payments,
        Table::Bookings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Accounts => "accounts",
            Table::Credentials => "credentials",
            Table::Addresses => "addresses",
            Table::Accommodations => "accommodations",
            Table::Images => "images",
            Table::PaymentMethods => "payment_methods",
            Table::CreditCards => "credit_cards",
            Table::Paypal => "paypal",
            Table::Reviews => "reviews",
            Table::Conversations => "conversations",
            Table::Messages => "messages",
            Table::ReviewImages => "review_images",
            Table::AccommodationImages => "accommodation_images",
            Table::Notifications => "notifications",
            Table::PayoutAccounts => "payout_accounts",
            Table::Payments => "payments",
            Table::Bookings => "bookings",
        }
    }

    /// Tables that must be populated before this one.
    pub fn parents(self) -> &'static [Table] {
        match self {
            Table::Accounts | Table::Addresses | Table::Images | Table::Conversations => &[],
            Table::Credentials
            | Table::PaymentMethods
            | Table::Notifications
            | Table::PayoutAccounts => &[Table::Accounts],
            Table::Accommodations => &[Table::Accounts, Table::Addresses],
            Table::CreditCards | Table::Paypal => &[Table::PaymentMethods],
            Table::Reviews => &[Table::Accommodations, Table::Accounts],
            Table::Messages => &[Table::Accounts, Table::Conversations],
            Table::ReviewImages => &[Table::Reviews, Table::Images],
            // Images already attached to a review are kept out of galleries.
            Table::AccommodationImages => {
                &[Table::Accommodations, Table::Images, Table::ReviewImages]
            }
            Table::Payments => &[
                Table::Accounts,
                Table::PaymentMethods,
                Table::Accommodations,
            ],
            Table::Bookings => &[Table::Accounts, Table::Accommodations, Table::Payments],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Table::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SeedError::UnknownTable {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_names() {
        assert_eq!("accounts".parse::<Table>().unwrap(), Table::Accounts);
        assert_eq!(
            " Review_Images ".parse::<Table>().unwrap(),
            Table::ReviewImages
        );
        assert!(matches!(
            "amenities".parse::<Table>(),
            Err(SeedError::UnknownTable { .. })
        ));
    }

    #[test]
    fn test_parents_are_declared_tables() {
        for table in Table::ALL {
            for parent in table.parents() {
                assert!(Table::ALL.contains(parent));
                assert_ne!(*parent, table, "{table} depends on itself");
            }
        }
    }
}
