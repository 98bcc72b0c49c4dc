//! Reviews, messaging and notifications.

use chrono::NaiveDateTime;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::catalogue::{MESSAGE_WORDS, NOTIFICATION_KINDS, RATINGS, REVIEW_WORDS};
use crate::config::SeedConfig;
use crate::error::Result;
use crate::generate::{pick, random_timestamp, random_timestamp_after, require_parents};
use crate::lookup::ConversationRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub accommodation_id: i64,
    pub author_account_id: i64,
    pub rating: i32,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewReviewImage {
    pub review_id: i64,
    pub image_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewConversation {
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub conversation_id: i64,
    pub body: String,
    pub sent_at: NaiveDateTime,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub account_id: i64,
    pub payload: serde_json::Value,
    pub sent_at: NaiveDateTime,
}

pub fn generate_reviews(
    config: &SeedConfig,
    accommodation_ids: &[i64],
    guest_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewReview>> {
    require_parents(accommodation_ids, "reviews", "accommodations")?;
    require_parents(guest_ids, "reviews", "accounts (role = guest)")?;

    Ok((0..config.rows)
        .map(|_| NewReview {
            accommodation_id: *pick(accommodation_ids, rng),
            author_account_id: *pick(guest_ids, rng),
            rating: rng.random_range(RATINGS),
            description: Sentence(REVIEW_WORDS).fake_with_rng(rng),
            created_at: random_timestamp(&config.window, rng),
        })
        .collect())
}

/// Attach one distinct image to each review, as far as the images go.
pub fn generate_review_images(
    review_ids: &[i64],
    image_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewReviewImage>> {
    require_parents(review_ids, "review_images", "reviews")?;
    require_parents(image_ids, "review_images", "images")?;

    let mut images = image_ids.to_vec();
    images.shuffle(rng);

    Ok(review_ids
        .iter()
        .zip(images)
        .map(|(&review_id, image_id)| NewReviewImage { review_id, image_id })
        .collect())
}

pub fn generate_conversations(config: &SeedConfig, rng: &mut impl Rng) -> Vec<NewConversation> {
    (0..config.rows)
        .map(|_| NewConversation {
            created_at: random_timestamp(&config.window, rng),
        })
        .collect()
}

/// Spread `config.message_rows()` messages over the conversations. Each
/// conversation is between one guest and one host who take turns, guest
/// first, and its messages are sent in order after it was opened.
pub fn generate_messages(
    config: &SeedConfig,
    conversations: &[ConversationRef],
    guest_ids: &[i64],
    host_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewMessage>> {
    require_parents(conversations, "messages", "conversations")?;
    require_parents(guest_ids, "messages", "accounts (role = guest)")?;
    require_parents(host_ids, "messages", "accounts (role = host)")?;

    let total = config.message_rows();
    let per_conversation = total / conversations.len();
    let remainder = total % conversations.len();

    let mut messages = Vec::with_capacity(total);
    for (index, conversation) in conversations.iter().enumerate() {
        let count = per_conversation + usize::from(index < remainder);
        if count == 0 {
            continue;
        }

        let guest = *pick(guest_ids, rng);
        let host = *pick(host_ids, rng);

        let mut sent_times: Vec<NaiveDateTime> = (0..count)
            .map(|_| random_timestamp_after(&config.window, conversation.created_at, rng))
            .collect();
        sent_times.sort_unstable();

        for (turn, sent_at) in sent_times.into_iter().enumerate() {
            let (sender_id, receiver_id) = if turn % 2 == 0 {
                (guest, host)
            } else {
                (host, guest)
            };
            messages.push(NewMessage {
                sender_id,
                receiver_id,
                conversation_id: conversation.id,
                body: Sentence(MESSAGE_WORDS).fake_with_rng(rng),
                sent_at,
                is_read: rng.random_bool(0.5),
            });
        }
    }

    Ok(messages)
}

pub fn generate_notifications(
    config: &SeedConfig,
    account_ids: &[i64],
    rng: &mut impl Rng,
) -> Result<Vec<NewNotification>> {
    require_parents(account_ids, "notifications", "accounts")?;

    Ok((0..config.rows)
        .map(|_| {
            let (kind, title) = *pick(NOTIFICATION_KINDS, rng);
            let body: String = Sentence(MESSAGE_WORDS).fake_with_rng(rng);
            NewNotification {
                account_id: *pick(account_ids, rng),
                payload: json!({ "kind": kind, "title": title, "body": body }),
                sent_at: random_timestamp(&config.window, rng),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedError;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_reviews_reference_parents() {
        let config = SeedConfig::default();
        let listings = [3_i64, 5, 8];
        let guests = [1_i64, 2];
        let mut rng = StdRng::seed_from_u64(41);
        let reviews = generate_reviews(&config, &listings, &guests, &mut rng).unwrap();

        assert_eq!(reviews.len(), config.rows);
        for review in &reviews {
            assert!(listings.contains(&review.accommodation_id));
            assert!(guests.contains(&review.author_account_id));
            assert!((1..=5).contains(&review.rating));
            assert!(!review.description.is_empty());
            assert!(config.window.contains(review.created_at));
        }
    }

    #[test]
    fn test_review_images_are_distinct() {
        let reviews: Vec<i64> = (1..=5).collect();
        let images: Vec<i64> = (100..103).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let rows = generate_review_images(&reviews, &images, &mut rng).unwrap();

        assert_eq!(rows.len(), 3);
        let used: HashSet<i64> = rows.iter().map(|r| r.image_id).collect();
        assert_eq!(used.len(), rows.len());
        assert!(rows.iter().all(|r| images.contains(&r.image_id)));
        assert_eq!(
            rows.iter().map(|r| r.review_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_conversation_count() {
        let config = SeedConfig::default();
        let mut rng = StdRng::seed_from_u64(43);
        let conversations = generate_conversations(&config, &mut rng);
        assert_eq!(conversations.len(), config.rows);
        assert!(conversations
            .iter()
            .all(|c| config.window.contains(c.created_at)));
    }

    #[test]
    fn test_messages_alternate_between_participants() {
        let config = SeedConfig::default();
        let opened = config.window.start + Duration::days(30);
        let conversations: Vec<ConversationRef> = (1..=7)
            .map(|id| ConversationRef {
                id,
                created_at: opened + Duration::days(id * 10),
            })
            .collect();
        let guests = [1_i64, 2, 3];
        let hosts = [10_i64, 11];
        let mut rng = StdRng::seed_from_u64(44);
        let messages =
            generate_messages(&config, &conversations, &guests, &hosts, &mut rng).unwrap();

        assert_eq!(messages.len(), config.message_rows());
        for conversation in &conversations {
            let thread: Vec<&NewMessage> = messages
                .iter()
                .filter(|m| m.conversation_id == conversation.id)
                .collect();
            assert!(!thread.is_empty());

            let guest = thread[0].sender_id;
            let host = thread[0].receiver_id;
            assert!(guests.contains(&guest));
            assert!(hosts.contains(&host));

            for (turn, message) in thread.iter().enumerate() {
                let expected = if turn % 2 == 0 { (guest, host) } else { (host, guest) };
                assert_eq!((message.sender_id, message.receiver_id), expected);
                assert!(message.sent_at >= conversation.created_at);
                assert!(config.window.contains(message.sent_at));
            }
            assert!(thread.windows(2).all(|w| w[0].sent_at <= w[1].sent_at));
        }
    }

    #[test]
    fn test_messages_need_hosts() {
        let conversations = [ConversationRef {
            id: 1,
            created_at: SeedConfig::default().window.start,
        }];
        let mut rng = StdRng::seed_from_u64(45);
        let err = generate_messages(&SeedConfig::default(), &conversations, &[1], &[], &mut rng)
            .unwrap_err();
        assert!(matches!(err, SeedError::MissingParentRows { .. }));
    }

    #[test]
    fn test_notification_payload_shape() {
        let config = SeedConfig::default();
        let accounts: Vec<i64> = (1..=10).collect();
        let mut rng = StdRng::seed_from_u64(46);
        let rows = generate_notifications(&config, &accounts, &mut rng).unwrap();

        assert_eq!(rows.len(), config.rows);
        for row in &rows {
            assert!(accounts.contains(&row.account_id));
            let kind = row.payload["kind"].as_str().unwrap();
            let title = row.payload["title"].as_str().unwrap();
            assert!(NOTIFICATION_KINDS.contains(&(kind, title)));
            assert!(row.payload["body"].is_string());
            assert!(config.window.contains(row.sent_at));
        }
    }
}
