//! # Seed Catalogue
//!
//! Static reference data every generator draws from: name syllables, email
//! domains, cities with their streets and postal codes, listing title words,
//! image types, card brands and the numeric ranges used for prices, ratings
//! and expiry dates.

use std::ops::RangeInclusive;

/// A city the address generator can place a listing in.
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub postal_code: &'static str,
    pub country: &'static str,
    pub streets: &'static [&'static str],
    /// Local words for (building, unit); cities without them get no line2.
    pub unit_terms: Option<(&'static str, &'static str)>,
}

pub const CITIES: &[City] = &[
    City {
        name: "berlin",
        postal_code: "10115",
        country: "germany",
        streets: &[
            "unter den linden",
            "friedrichstraße",
            "karl-marx-allee",
            "kurfürstendamm",
            "potsdamer platz",
        ],
        unit_terms: Some(("wohnung", "haustür")),
    },
    City {
        name: "paris",
        postal_code: "75001",
        country: "france",
        streets: &[
            "rue de rivoli",
            "avenue des champs-élysées",
            "boulevard saint-germain",
            "rue mouffetard",
            "rue de la paix",
        ],
        unit_terms: Some(("appartement", "porte")),
    },
    City {
        name: "madrid",
        postal_code: "28001",
        country: "spain",
        streets: &[
            "gran vía",
            "calle de alcalá",
            "paseo del prado",
            "calle mayor",
            "plaza de españa",
        ],
        unit_terms: Some(("piso", "puerta")),
    },
    City {
        name: "rome",
        postal_code: "00184",
        country: "italy",
        streets: &[
            "via del corso",
            "via nazionale",
            "via condotti",
            "via veneto",
            "piazza navona",
        ],
        unit_terms: Some(("scala", "interno")),
    },
    City {
        name: "amsterdam",
        postal_code: "1012 WX",
        country: "netherlands",
        streets: &[
            "damrak",
            "kalverstraat",
            "leidsestraat",
            "prinsengracht",
            "herengracht",
        ],
        unit_terms: Some(("appartement", "verdieping")),
    },
    City {
        name: "vienna",
        postal_code: "1010",
        country: "austria",
        streets: &[
            "karntner straße",
            "mariahilfer straße",
            "graben",
            "ringstraße",
            "naschmarktgasse",
        ],
        unit_terms: Some(("stiege", "tür")),
    },
    City {
        name: "zurich",
        postal_code: "8001",
        country: "switzerland",
        streets: &[
            "bahnhofstrasse",
            "langstrasse",
            "niederdorfstrasse",
            "augustinergasse",
            "seefeldstrasse",
        ],
        unit_terms: Some(("wohnung", "eingang")),
    },
    City {
        name: "oslo",
        postal_code: "0150",
        country: "norway",
        streets: &[
            "karl johans gate",
            "bogstadveien",
            "torggata",
            "akersgata",
            "grünerløkka",
        ],
        unit_terms: Some(("leilighet", "inngang")),
    },
    City {
        name: "prague",
        postal_code: "110 00",
        country: "czech republic",
        streets: &[
            "wenceslas square",
            "narodni trida",
            "parizska",
            "celetna",
            "vaclavske namesti",
        ],
        unit_terms: Some(("byt", "vchod")),
    },
    City {
        name: "copenhagen",
        postal_code: "1050",
        country: "denmark",
        streets: &[
            "stroget",
            "nyhavn",
            "vestergade",
            "norrebrogade",
            "osterbrogade",
        ],
        unit_terms: Some(("lejlighed", "opgang")),
    },
];

pub const HOUSE_NUMBERS: RangeInclusive<u32> = 1..=200;
pub const BUILDING_NUMBERS: RangeInclusive<u32> = 1..=10;
pub const UNIT_NUMBERS: RangeInclusive<u32> = 1..=50;

// === Accounts ===

pub const FIRST_NAME_SYLLABLES: &[&str] = &[
    "roxy", "lola", "ruby", "max", "cassie", "nina", "jett", "lexi", "vera", "trixie", "rico",
    "gigi", "zane", "luna", "dante", "cleo", "raven", "jade", "mila", "axel", "kai", "enzo",
    "finn", "jax", "ryder", "romeo", "blake", "luca", "troy", "asher",
];

/// How many syllables make up a first name.
pub const FIRST_NAME_SYLLABLE_COUNT: RangeInclusive<usize> = 1..=1;

pub const LAST_NAME_SYLLABLES: &[&str] = &[
    "wig", "gle", "pants", "snort", "ington", "bork", "fluff", "bottom", "sniff", "blaster",
    "face", "dozer", "puff", "tastrophe", "sauce", "smash", "nugget", "bucket", "snuggle",
    "muffin", "von", "mc", "the", "nator",
];

/// How many syllables make up a last name.
pub const LAST_NAME_SYLLABLE_COUNT: RangeInclusive<usize> = 1..=3;

pub const EMAIL_DOMAINS: &[&str] = &[
    "spicyinbox.com",
    "luvmail.net",
    "winkhub.org",
    "afterdarkmail.co",
    "smoothoperator.biz",
    "cupidconnect.club",
    "hotbeans.online",
    "saucypigeon.lol",
    "midnightmsg.xyz",
];

/// Characters a generated password hash is made of.
pub const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()";

// === Accommodations ===

pub const TITLE_ADJECTIVES: &[&str] = &[
    "deranged",
    "glorious",
    "crusty",
    "juicy",
    "feral",
    "moist",
    "sparkly",
    "delirious",
    "grumpy",
    "suspicious",
    "flamboyant",
    "chunky",
    "chaotic",
    "greasy",
    "magnificent",
];

pub const TITLE_NOUNS: &[&str] = &[
    "shack",
    "palace",
    "dumpster",
    "lair",
    "bunker",
    "yurt",
    "situation",
    "compound",
    "crib",
    "shed",
    "mansion",
    "toilet",
    "dojo",
    "fortress",
    "nest",
];

pub const TITLE_CONNECTORS: &[&str] = &[
    "in the middle of",
    "next to",
    "right behind",
    "under",
    "overlooking",
    "adjacent to",
    "across from",
    "beneath",
    "lost inside",
    "deep within",
];

pub const TITLE_LOCATION_ADJECTIVES: &[&str] = &[
    "cursed",
    "radioactive",
    "shady",
    "chaotic",
    "slippery",
    "fermented",
    "haunted",
    "illegal",
    "drippy",
    "glorious",
    "unholy",
    "sticky",
    "vibrating",
    "derelict",
    "spark-coated",
];

pub const TITLE_PLACES: &[&str] = &[
    "yeet canyon",
    "dumpster lagoon",
    "boink mountain",
    "cringe valley",
    "snacc swamp",
    "bongo desert",
    "dripfield",
    "meme gulch",
    "goober bay",
    "fizzle hill",
    "sauce plains",
    "burp island",
    "blorb forest",
    "void beach",
    "chonk cliffs",
];

/// Nightly price in whole currency units; stored as cents.
pub const NIGHTLY_PRICE_UNITS: RangeInclusive<i32> = 50..=500;

// === Images ===

pub const IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub const ROOM_TAGS: &[&str] = &[
    "bedroom",
    "bathroom",
    "kitchen",
    "living room",
    "exterior",
    "balcony",
    "garden",
];

pub const IMAGE_CAPTIONS: &[&str] = &[
    "morning light through the blinds",
    "freshly cleaned, mostly",
    "the view nobody asked for",
    "cozy if you squint",
    "as seen on no television",
    "recently renovated by a raccoon",
    "plenty of space for regrets",
    "guests say it smells fine",
];

// === Payments ===

pub const PAYMENT_METHOD_TYPES: &[&str] = &["card", "paypal"];

pub const CARD_BRANDS: &[&str] = &[
    "Visa",
    "Mastercard",
    "American Express",
    "Discover",
    "JCB",
    "Diners Club",
    "UnionPay",
    "Maestro",
];

pub const CARD_LAST4: RangeInclusive<i32> = 0..=9999;
pub const CARD_EXP_MONTHS: RangeInclusive<i32> = 1..=12;
pub const CARD_EXP_YEARS: RangeInclusive<i32> = 2023..=2053;

pub const PAYPAL_ID_PREFIX: &str = "PP-";
pub const PAYPAL_ID_LENGTH: usize = 12;
pub const PAYPAL_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const PAYMENT_STATUSES: &[&str] = &["pending", "succeeded", "failed", "refunded"];

/// Length of a stay; a payment amount is always price × nights.
pub const STAY_NIGHTS: RangeInclusive<i64> = 1..=14;

pub const PAYOUT_ACCOUNT_TYPES: &[&str] = &["bank_account", "paypal"];

// === Reviews, messages, notifications ===

pub const RATINGS: RangeInclusive<i32> = 1..=5;

/// Words per generated review sentence.
pub const REVIEW_WORDS: std::ops::Range<usize> = 6..16;

/// Words per generated chat message.
pub const MESSAGE_WORDS: std::ops::Range<usize> = 3..12;

/// (kind, title) pairs for notification payloads.
pub const NOTIFICATION_KINDS: &[(&str, &str)] = &[
    ("booking_confirmed", "Your booking is confirmed"),
    ("new_message", "You have a new message"),
    ("review_received", "Someone reviewed your stay"),
    ("payout_sent", "Your payout is on its way"),
    ("price_drop", "A saved listing dropped its price"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_city_has_streets() {
        for city in CITIES {
            assert!(!city.streets.is_empty(), "{} has no streets", city.name);
        }
    }

    #[test]
    fn test_mimes_have_subtypes() {
        for mime in IMAGE_MIMES {
            let (kind, subtype) = mime.split_once('/').unwrap();
            assert_eq!(kind, "image");
            assert!((3..=4).contains(&subtype.len()));
        }
    }
}
