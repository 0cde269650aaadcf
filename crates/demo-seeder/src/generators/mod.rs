//! Entity generators for demo data.
//!
//! Generators only plan rows; they never touch a database:
//! - [`reference`]: fixed language, specialisation and care-type catalogs
//! - [`UserGenerator`]: the sample roster with random verification and skills
//! - [`AnnouncementGenerator`]: templated announcements with random owners and dates
//! - [`ApplicationGenerator`]: guardians applying to announcements
//! - [`ChatGenerator`]: discussions with alternating messages

pub mod announcement;
pub mod application;
pub mod chat;
pub mod reference;
pub mod user;

pub use announcement::{AnnouncementGenerator, GeneratedAnnouncement};
pub use application::{ApplicationGenerator, ApplicationStatus, GeneratedApplication};
pub use chat::{ChatGenerator, GeneratedDiscussion, GeneratedMessage};
pub use user::{GeneratedUser, SAMPLE_USERS, UserGenerator};

use rand::Rng;
use rand::seq::SliceRandom;

/// Picks between `min` and `max` distinct elements of `pool`, capped by its
/// length. Returns nothing when the pool holds fewer than `min` elements.
pub(crate) fn sample_between<T: Clone>(
    pool: &[T],
    min: usize,
    max: usize,
    rng: &mut impl Rng,
) -> Vec<T> {
    let upper = max.min(pool.len());
    if upper < min {
        return Vec::new();
    }

    let amount = rng.gen_range(min..=upper);
    pool.choose_multiple(rng, amount).cloned().collect()
}
