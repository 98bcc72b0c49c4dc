//! Accounts and their credentials.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use chrono::NaiveDateTime;
use rand::Rng;

use crate::catalogue::{
    EMAIL_DOMAINS, FIRST_NAME_SYLLABLES, FIRST_NAME_SYLLABLE_COUNT, LAST_NAME_SYLLABLES,
    LAST_NAME_SYLLABLE_COUNT, PASSWORD_CHARSET,
};
use crate::config::SeedConfig;
use crate::error::{Result, SeedError};
use crate::generate::{pick, random_string, random_timestamp, require_parents};

/// Attempts per row before giving up on a unique email.
const MAX_EMAIL_RETRIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRole {
    Guest,
    Host,
    Admin,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountRole::Guest => "guest",
            AccountRole::Host => "host",
            AccountRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub account_id: i64,
    pub password_hash: String,
    pub password_updated_at: NaiveDateTime,
}

/// Generate `config.rows` accounts. The last `config.admin_count` are admins;
/// the rest are guests or hosts, with at least one of each when there is room.
pub fn generate_accounts(config: &SeedConfig, rng: &mut impl Rng) -> Result<Vec<NewAccount>> {
    let roles = assign_roles(config.rows, config.admin_count, rng);
    let mut seen_emails = HashSet::with_capacity(config.rows);
    let mut accounts = Vec::with_capacity(config.rows);

    for (row_index, role) in roles.into_iter().enumerate() {
        let mut attempts = 0;
        let (first_name, last_name, email) = loop {
            let first_name = syllable_name(FIRST_NAME_SYLLABLES, FIRST_NAME_SYLLABLE_COUNT, rng);
            let last_name = syllable_name(LAST_NAME_SYLLABLES, LAST_NAME_SYLLABLE_COUNT, rng);
            let email = format!("{}.{}@{}", first_name, last_name, pick(EMAIL_DOMAINS, rng));
            if seen_emails.insert(email.clone()) {
                break (first_name, last_name, email);
            }
            attempts += 1;
            if attempts >= MAX_EMAIL_RETRIES {
                return Err(SeedError::UniqueExhausted {
                    table: "accounts".to_string(),
                    column: "email".to_string(),
                    row_index,
                    max_retries: MAX_EMAIL_RETRIES,
                });
            }
        };

        accounts.push(NewAccount {
            email,
            first_name,
            last_name,
            role,
            created_at: random_timestamp(&config.window, rng),
        });
    }

    Ok(accounts)
}

/// One credential per account id, in the order given.
pub fn generate_credentials(
    config: &SeedConfig,
    account_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewCredential>> {
    require_parents(account_ids, "credentials", "accounts")?;

    Ok(account_ids
        .iter()
        .map(|&account_id| NewCredential {
            account_id,
            password_hash: random_string(PASSWORD_CHARSET, config.password_length, rng),
            password_updated_at: random_timestamp(&config.window, rng),
        })
        .collect())
}

fn syllable_name(
    syllables: &[&str],
    count: RangeInclusive<usize>,
    rng: &mut impl Rng,
) -> String {
    let n = rng.random_range(count);
    (0..n).map(|_| *pick(syllables, rng)).collect()
}

fn assign_roles(rows: usize, admin_count: usize, rng: &mut impl Rng) -> Vec<AccountRole> {
    let regular = rows.saturating_sub(admin_count);
    let mut roles: Vec<AccountRole> = (0..regular)
        .map(|_| {
            if rng.random_bool(0.5) {
                AccountRole::Guest
            } else {
                AccountRole::Host
            }
        })
        .collect();

    if regular >= 2 {
        let has_guest = roles.contains(&AccountRole::Guest);
        let has_host = roles.contains(&AccountRole::Host);
        if !has_guest || !has_host {
            let flip = rng.random_range(0..regular);
            roles[flip] = if has_guest {
                AccountRole::Host
            } else {
                AccountRole::Guest
            };
        }
    }

    roles.extend(std::iter::repeat(AccountRole::Admin).take(rows - regular));
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SeedConfig {
        SeedConfig {
            rng_seed: Some(7),
            ..SeedConfig::default()
        }
    }

    #[test]
    fn test_account_count_and_admins() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(7);
        let accounts = generate_accounts(&config, &mut rng).unwrap();

        assert_eq!(accounts.len(), config.rows);
        let admins = accounts
            .iter()
            .filter(|a| a.role == AccountRole::Admin)
            .count();
        assert_eq!(admins, config.admin_count);
        assert!(accounts[..config.rows - config.admin_count]
            .iter()
            .all(|a| matches!(a.role, AccountRole::Guest | AccountRole::Host)));
    }

    #[test]
    fn test_email_contains_names_and_is_unique() {
        let mut rng = StdRng::seed_from_u64(8);
        let accounts = generate_accounts(&config(), &mut rng).unwrap();

        let mut seen = HashSet::new();
        for account in &accounts {
            assert!(account.email.contains(&account.first_name));
            assert!(account.email.contains(&account.last_name));
            assert!(account.email.starts_with(&format!(
                "{}.{}@",
                account.first_name, account.last_name
            )));
            assert!(seen.insert(account.email.clone()), "duplicate {}", account.email);
        }
    }

    #[test]
    fn test_account_timestamps_in_window() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(9);
        for account in generate_accounts(&config, &mut rng).unwrap() {
            assert!(config.window.contains(account.created_at));
        }
    }

    #[test]
    fn test_guest_and_host_always_present() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roles = assign_roles(5, 3, &mut rng);
            assert!(roles.contains(&AccountRole::Guest));
            assert!(roles.contains(&AccountRole::Host));
            assert_eq!(roles.iter().filter(|r| **r == AccountRole::Admin).count(), 3);
        }
    }

    #[test]
    fn test_all_admins() {
        let mut rng = StdRng::seed_from_u64(1);
        let roles = assign_roles(3, 3, &mut rng);
        assert_eq!(roles, vec![AccountRole::Admin; 3]);
    }

    #[test]
    fn test_name_syllable_counts() {
        let mut rng = StdRng::seed_from_u64(10);
        for _ in 0..100 {
            let first = syllable_name(FIRST_NAME_SYLLABLES, FIRST_NAME_SYLLABLE_COUNT, &mut rng);
            assert!(FIRST_NAME_SYLLABLES.contains(&first.as_str()));
        }
    }

    #[test]
    fn test_credentials_reference_given_accounts() {
        let config = config();
        let account_ids: Vec<i64> = (101..=140).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let credentials = generate_credentials(&config, &account_ids, &mut rng).unwrap();

        assert_eq!(credentials.len(), account_ids.len());
        for (credential, id) in credentials.iter().zip(&account_ids) {
            assert_eq!(credential.account_id, *id);
            assert_eq!(credential.password_hash.len(), config.password_length);
            assert!(credential
                .password_hash
                .bytes()
                .all(|b| PASSWORD_CHARSET.contains(&b)));
            assert!(config.window.contains(credential.password_updated_at));
        }
    }

    #[test]
    fn test_credentials_need_accounts() {
        let mut rng = StdRng::seed_from_u64(12);
        let err = generate_credentials(&config(), &[], &mut rng).unwrap_err();
        assert!(matches!(err, SeedError::MissingParentRows { .. }));
    }
}
