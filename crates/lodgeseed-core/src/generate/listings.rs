//! Addresses, accommodations and their images.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::catalogue::{
    BUILDING_NUMBERS, CITIES, HOUSE_NUMBERS, IMAGE_CAPTIONS, IMAGE_MIMES, NIGHTLY_PRICE_UNITS,
    ROOM_TAGS, TITLE_ADJECTIVES, TITLE_CONNECTORS, TITLE_LOCATION_ADJECTIVES, TITLE_NOUNS,
    TITLE_PLACES, UNIT_NUMBERS,
};
use crate::config::SeedConfig;
use crate::error::Result;
use crate::generate::{pick, random_timestamp, require_parents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: &'static str,
    pub postal_code: &'static str,
    pub country: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccommodation {
    pub host_account_id: i64,
    pub title: String,
    pub address_id: i64,
    pub price_cents: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub mime: &'static str,
    pub storage_key: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccommodationImage {
    pub accommodation_id: i64,
    pub image_id: i64,
    pub sort_order: i32,
    pub is_cover: bool,
    pub caption: &'static str,
    pub room_tag: &'static str,
}

pub fn generate_addresses(config: &SeedConfig, rng: &mut impl Rng) -> Vec<NewAddress> {
    (0..config.rows)
        .map(|_| {
            let city = pick(CITIES, rng);
            let street = pick(city.streets, rng);
            let line1 = format!("{} {}", street, rng.random_range(HOUSE_NUMBERS));
            let line2 = city.unit_terms.map(|(building, unit)| {
                format!(
                    "{} {}, {} {}",
                    building,
                    rng.random_range(BUILDING_NUMBERS),
                    unit,
                    rng.random_range(UNIT_NUMBERS)
                )
            });
            NewAddress {
                line1,
                line2,
                city: city.name,
                postal_code: city.postal_code,
                country: city.country,
            }
        })
        .collect()
}

/// Listings owned by hosts, each placed at one of the given addresses.
pub fn generate_accommodations(
    config: &SeedConfig,
    host_ids: &[i64],
    address_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewAccommodation>> {
    require_parents(host_ids, "accommodations", "accounts (role = host)")?;
    require_parents(address_ids, "accommodations", "addresses")?;

    Ok((0..config.rows)
        .map(|_| NewAccommodation {
            host_account_id: *pick(host_ids, rng),
            title: listing_title(rng),
            address_id: *pick(address_ids, rng),
            price_cents: rng.random_range(NIGHTLY_PRICE_UNITS) * 100,
            is_active: rng.random_bool(0.5),
            created_at: random_timestamp(&config.window, rng),
        })
        .collect())
}

/// `config.rows × multipliers.images` images with storage keys
/// `images/<uuid>.<subtype>`.
pub fn generate_images(config: &SeedConfig, rng: &mut impl Rng) -> Vec<NewImage> {
    (0..config.image_rows())
        .map(|_| {
            let mime = *pick(IMAGE_MIMES, rng);
            let extension = mime.split_once('/').map(|(_, sub)| sub).unwrap_or(mime);
            let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
            NewImage {
                mime,
                storage_key: storage_key(id, extension),
                created_at: random_timestamp(&config.window, rng),
            }
        })
        .collect()
}

pub fn storage_key(id: Uuid, extension: &str) -> String {
    format!("images/{}.{}", id.hyphenated(), extension)
}

/// Spread every free image over the listings, round-robin in random order.
/// Each listing's first image has `sort_order` 0 and is its cover.
pub fn generate_accommodation_images(
    accommodation_ids: &[i64],
    free_image_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewAccommodationImage>> {
    if free_image_ids.is_empty() {
        return Ok(Vec::new());
    }
    require_parents(accommodation_ids, "accommodation_images", "accommodations")?;

    let mut listings = accommodation_ids.to_vec();
    listings.shuffle(rng);
    let mut images = free_image_ids.to_vec();
    images.shuffle(rng);

    let mut next_sort_order: HashMap<i64, i32> = HashMap::with_capacity(listings.len());
    Ok(images
        .into_iter()
        .enumerate()
        .map(|(i, image_id)| {
            let accommodation_id = listings[i % listings.len()];
            let slot = next_sort_order.entry(accommodation_id).or_insert(0);
            let sort_order = *slot;
            *slot += 1;
            NewAccommodationImage {
                accommodation_id,
                image_id,
                sort_order,
                is_cover: sort_order == 0,
                caption: *pick(IMAGE_CAPTIONS, rng),
                room_tag: *pick(ROOM_TAGS, rng),
            }
        })
        .collect())
}

fn listing_title(rng: &mut impl Rng) -> String {
    [
        *pick(TITLE_ADJECTIVES, rng),
        *pick(TITLE_NOUNS, rng),
        *pick(TITLE_CONNECTORS, rng),
        *pick(TITLE_LOCATION_ADJECTIVES, rng),
        *pick(TITLE_PLACES, rng),
    ]
    .join(" ")
}
