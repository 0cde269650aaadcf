//! Discussion and message generation.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Duration, PrimitiveDateTime};

pub const MESSAGE_TEMPLATES: &[&str] = &[
    "Bonjour, je suis intéressé(e) par votre annonce. Pourriez-vous me donner plus de détails ?",
    "J'ai de l'expérience dans ce domaine et je serais ravi(e) de vous aider.",
    "Quelles sont les horaires exacts requis pour cette mission ?",
    "Merci pour votre réponse. Je suis disponible pour un entretien si vous le souhaitez.",
    "Parfait, cela me convient. Quand pouvons-nous commencer ?",
    "J'ai quelques questions concernant la rémunération et les conditions.",
    "D'accord, je comprends. Je suis prêt(e) à commencer dès que possible.",
    "Merci beaucoup pour cette opportunité !",
    "Pourriez-vous me donner plus d'informations sur les tâches à effectuer ?",
    "Je suis disponible pour discuter de cette annonce en détail.",
];

#[derive(Debug, Clone)]
pub struct GeneratedMessage {
    pub author: String,
    pub content: String,
    pub created_at: PrimitiveDateTime,
}

/// A conversation about one announcement between two distinct users.
#[derive(Debug, Clone)]
pub struct GeneratedDiscussion {
    pub announcement_id: i64,
    pub sender: String,
    pub recipient: String,
    pub created_at: PrimitiveDateTime,
    /// Ordered oldest first; authorship alternates starting with the sender.
    pub messages: Vec<GeneratedMessage>,
}

#[derive(Debug, Clone)]
pub struct ChatGenConfig {
    pub messages_per_discussion: RangeInclusive<usize>,
    /// Minutes between consecutive messages.
    pub gap_minutes: RangeInclusive<i64>,
}

impl Default for ChatGenConfig {
    fn default() -> Self {
        Self {
            messages_per_discussion: 2..=5,
            gap_minutes: 5..=60,
        }
    }
}

pub struct ChatGenerator {
    config: ChatGenConfig,
}

impl ChatGenerator {
    pub fn new() -> Self {
        Self {
            config: ChatGenConfig::default(),
        }
    }

    pub fn with_config(config: ChatGenConfig) -> Self {
        Self { config }
    }

    /// Picks the announcements that get a discussion: a little over half of
    /// them, never fewer than one.
    pub fn select_announcements(&self, announcement_ids: &[i64], rng: &mut impl Rng) -> Vec<i64> {
        let n = announcement_ids.len();
        let k = n.min(n / 2 + 1);
        announcement_ids.choose_multiple(rng, k).copied().collect()
    }

    /// Generates a discussion with its messages, or `None` with fewer than two
    /// users.
    pub fn generate_discussion(
        &self,
        announcement_id: i64,
        users: &[String],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Option<GeneratedDiscussion> {
        let pair: Vec<&String> = users.choose_multiple(rng, 2).collect();
        let [sender, recipient] = pair.as_slice() else {
            return None;
        };

        let count = rng.gen_range(self.config.messages_per_discussion.clone());
        let mut message_time = now - Duration::hours(count as i64);
        let mut messages = Vec::with_capacity(count);

        for i in 0..count {
            let author = if i % 2 == 0 { sender } else { recipient };
            message_time += Duration::minutes(rng.gen_range(self.config.gap_minutes.clone()));
            let content = MESSAGE_TEMPLATES
                .choose(rng)
                .copied()
                .unwrap_or(MESSAGE_TEMPLATES[0]);

            messages.push(GeneratedMessage {
                author: author.to_string(),
                content: content.to_string(),
                created_at: message_time,
            });
        }

        Some(GeneratedDiscussion {
            announcement_id,
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            created_at: now,
            messages,
        })
    }

    /// Generates discussions for a selection of `announcement_ids`.
    pub fn generate_batch(
        &self,
        announcement_ids: &[i64],
        users: &[String],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedDiscussion> {
        if users.len() < 2 {
            return Vec::new();
        }

        self.select_announcements(announcement_ids, rng)
            .into_iter()
            .filter_map(|id| self.generate_discussion(id, users, now, rng))
            .collect()
    }
}

impl Default for ChatGenerator {
    fn default() -> Self {
        Self::new()
    }
}
