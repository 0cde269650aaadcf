//! Announcement generation from fixed templates.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, PrimitiveDateTime};

/// Owner used when no usernames are known.
pub const FALLBACK_OWNER: &str = "alice_martin";

/// Lifecycle status given to every seeded announcement.
pub const PUBLISHED: &str = "PUBLISHED";

#[derive(Debug, Clone, Copy)]
pub struct AnnouncementTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub visit_frequency: &'static str,
    pub remuneration: f32,
    pub urgent: bool,
}

pub const ANNOUNCEMENT_TEMPLATES: &[AnnouncementTemplate] = &[
    AnnouncementTemplate {
        title: "Garde de chat pendant les vacances",
        description: "Recherche une personne de confiance pour s'occuper de mon chat pendant mes vacances. Nourriture et câlins quotidiens requis.",
        visit_frequency: "Quotidien",
        remuneration: 25.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Accompagnement médical hebdomadaire",
        description: "Besoin d'accompagnement pour rendez-vous médicaux hebdomadaires. Transport et assistance requis.",
        visit_frequency: "Hebdomadaire",
        remuneration: 50.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Préparation de repas pour personne âgée",
        description: "Recherche aide pour préparation de repas équilibrés pour une personne âgée. 3 fois par semaine.",
        visit_frequency: "3 fois par semaine",
        remuneration: 30.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Soins à domicile urgents",
        description: "Besoin urgent de soins à domicile suite à une opération. Assistance personnelle et médicale requise.",
        visit_frequency: "Quotidien",
        remuneration: 60.0,
        urgent: true,
    },
    AnnouncementTemplate {
        title: "Ménage et entretien régulier",
        description: "Recherche aide ménagère pour entretien régulier d'un appartement. Tâches ménagères et courses.",
        visit_frequency: "2 fois par semaine",
        remuneration: 35.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Companionship et activités",
        description: "Recherche compagnon pour activités et sorties. Personne agréable et patiente recherchée.",
        visit_frequency: "2 fois par semaine",
        remuneration: 20.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Gestion de médicaments",
        description: "Besoin d'aide pour gestion quotidienne des médicaments et suivi médical.",
        visit_frequency: "Quotidien",
        remuneration: 40.0,
        urgent: false,
    },
    AnnouncementTemplate {
        title: "Thérapie physique à domicile",
        description: "Recherche assistant pour exercices de thérapie physique à domicile. Expérience requise.",
        visit_frequency: "3 fois par semaine",
        remuneration: 55.0,
        urgent: false,
    },
];

pub const LOCATIONS: &[&str] = &[
    "Paris, France",
    "Lyon, France",
    "Marseille, France",
    "Toulouse, France",
    "Nice, France",
    "Bordeaux, France",
];

/// Generated announcement ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedAnnouncement {
    pub owner_username: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub specific_instructions: String,
    pub care_type_id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub visit_frequency: String,
    pub remuneration: f32,
    pub identity_verification_required: bool,
    pub urgent_request: bool,
    pub status: &'static str,
    pub creation_date: PrimitiveDateTime,
}

/// Configuration for announcement generation.
#[derive(Debug, Clone)]
pub struct AnnouncementGenConfig {
    /// Days between today and the start date.
    pub start_offset_days: RangeInclusive<i64>,
    /// Days between the start and end dates.
    pub duration_days: RangeInclusive<i64>,
}

impl Default for AnnouncementGenConfig {
    fn default() -> Self {
        Self {
            start_offset_days: 1..=14,
            duration_days: 7..=28,
        }
    }
}

/// Generates announcements with random owners, dates, care types and places.
pub struct AnnouncementGenerator {
    config: AnnouncementGenConfig,
}

impl AnnouncementGenerator {
    pub fn new() -> Self {
        Self {
            config: AnnouncementGenConfig::default(),
        }
    }

    pub fn with_config(config: AnnouncementGenConfig) -> Self {
        Self { config }
    }

    /// Generates one announcement, or `None` when there is no care type to
    /// reference.
    pub fn generate(
        &self,
        template: &AnnouncementTemplate,
        owners: &[String],
        care_type_ids: &[i64],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Option<GeneratedAnnouncement> {
        let owner_username = owners
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_OWNER.to_string());

        let start_date =
            now.date() + Duration::days(rng.gen_range(self.config.start_offset_days.clone()));
        let end_date = start_date + Duration::days(rng.gen_range(self.config.duration_days.clone()));

        let care_type_id = *care_type_ids.choose(rng)?;
        let location = LOCATIONS.choose(rng).copied().unwrap_or(LOCATIONS[0]);

        Some(GeneratedAnnouncement {
            owner_username,
            title: template.title.to_string(),
            location: location.to_string(),
            description: template.description.to_string(),
            specific_instructions: format!("Instructions spécifiques pour {}", template.title),
            care_type_id,
            start_date,
            end_date,
            visit_frequency: template.visit_frequency.to_string(),
            remuneration: template.remuneration,
            identity_verification_required: rng.r#gen(),
            urgent_request: template.urgent,
            status: PUBLISHED,
            creation_date: now,
        })
    }

    /// Generates one announcement per entry of [`ANNOUNCEMENT_TEMPLATES`].
    pub fn generate_batch(
        &self,
        owners: &[String],
        care_type_ids: &[i64],
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedAnnouncement> {
        ANNOUNCEMENT_TEMPLATES
            .iter()
            .filter_map(|template| self.generate(template, owners, care_type_ids, now, rng))
            .collect()
    }
}

impl Default for AnnouncementGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn owners() -> Vec<String> {
        crate::generators::user::SAMPLE_USERS
            .iter()
            .map(|p| p.username.to_string())
            .collect()
    }

    #[test]
    fn test_generate_batch() {
        let announcement_gen = AnnouncementGenerator::new();
        let mut rng = rand::thread_rng();
        let now = datetime!(2026-03-01 10:00);
        let owners = owners();
        let care_types = vec![1, 2, 3];

        let announcements = announcement_gen.generate_batch(&owners, &care_types, now, &mut rng);
        assert_eq!(announcements.len(), 8);

        for a in &announcements {
            assert!(owners.contains(&a.owner_username));
            assert!(care_types.contains(&a.care_type_id));
            assert!(LOCATIONS.contains(&a.location.as_str()));
            assert!(a.end_date > a.start_date);
            assert_eq!(a.status, PUBLISHED);

            let lead = (a.start_date - now.date()).whole_days();
            assert!((1..=14).contains(&lead));
            let span = (a.end_date - a.start_date).whole_days();
            assert!((7..=28).contains(&span));
        }

        let urgent: Vec<_> = announcements.iter().filter(|a| a.urgent_request).collect();
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].title, "Soins à domicile urgents");
    }

    #[test]
    fn test_fallback_owner_without_usernames() {
        let announcement_gen = AnnouncementGenerator::new();
        let mut rng = rand::thread_rng();

        let announcements =
            announcement_gen.generate_batch(&[], &[7], datetime!(2026-03-01 10:00), &mut rng);

        assert!(
            announcements
                .iter()
                .all(|a| a.owner_username == FALLBACK_OWNER)
        );
    }

    #[test]
    fn test_no_care_types_yields_nothing() {
        let announcement_gen = AnnouncementGenerator::new();
        let mut rng = rand::thread_rng();

        let announcements =
            announcement_gen.generate_batch(&owners(), &[], datetime!(2026-03-01 10:00), &mut rng);
        assert!(announcements.is_empty());
    }
}
