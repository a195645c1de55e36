//! Group planner.
//!
//! Partitions the victim pool into disjoint groups, each with one sender,
//! at least one recipient, and one randomly chosen message. Planning is
//! pure: it never touches the network and never mutates its inputs.

use mailsalvo_smtp::Address;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::message::Message;

/// Planning failure. Reported before any network I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Group size bounds are unusable. A group needs a sender plus at
    /// least one recipient, so `min` must be at least 2 and at most `max`.
    #[error("invalid group bounds [{min}, {max}]")]
    InvalidGroupBounds {
        /// Requested minimum addresses per group.
        min: usize,
        /// Requested maximum addresses per group.
        max: usize,
    },

    /// The victim pool cannot fill the requested number of groups.
    #[error(
        "not enough victims for group {group_index}: \
         needed {needed} in total, {available} available"
    )]
    InsufficientVictims {
        /// Index of the group that could not be filled.
        group_index: usize,
        /// Total victims needed through this group.
        needed: usize,
        /// Victims available overall.
        available: usize,
    },

    /// The message pool is empty.
    #[error("message pool is empty")]
    NoMessages,
}

/// One planned delivery: a sender, its recipients, and the chosen message.
///
/// Immutable once built; consumed exactly once by the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Envelope and header sender, drawn from the victim pool.
    pub sender: Address,
    /// Recipients; non-empty and never containing the sender.
    pub recipients: Vec<Address>,
    /// Message delivered to every recipient of this group.
    pub message: Message,
}

/// Partitions `victims` into `number_of_groups` disjoint groups.
///
/// Both pools are copied before shuffling; the caller's slices are never
/// reordered. One group size is drawn uniformly from
/// `[min_per_group, max_per_group]` for the whole run (not re-rolled per
/// group), then each group takes the next `group_size` addresses from the
/// shuffled pool: the first becomes the sender, the rest the recipients.
/// Messages are drawn independently per group and may repeat; addresses
/// are never reused across groups.
///
/// # Errors
///
/// All-or-nothing: any [`PlanError`] aborts with no partial plan.
pub fn plan_groups(
    victims: &[Address],
    messages: &[Message],
    number_of_groups: usize,
    min_per_group: usize,
    max_per_group: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Group>, PlanError> {
    if min_per_group < 2 || min_per_group > max_per_group {
        return Err(PlanError::InvalidGroupBounds {
            min: min_per_group,
            max: max_per_group,
        });
    }
    if messages.is_empty() {
        return Err(PlanError::NoMessages);
    }

    let mut victims = victims.to_vec();
    let mut pool = messages.to_vec();
    victims.shuffle(rng);
    pool.shuffle(rng);

    // One size for the whole run.
    let group_size = rng.gen_range(min_per_group..=max_per_group);
    debug!(group_size, number_of_groups, "planning groups");

    let mut groups = Vec::with_capacity(number_of_groups);
    for group_index in 0..number_of_groups {
        let start = group_index * group_size;
        let end = start + group_size;
        if end > victims.len() {
            return Err(PlanError::InsufficientVictims {
                group_index,
                needed: end,
                available: victims.len(),
            });
        }

        let slice = &victims[start..end];
        let message = pool[rng.gen_range(0..pool.len())].clone();
        groups.push(Group {
            sender: slice[0].clone(),
            recipients: slice[1..].to_vec(),
            message,
        });
    }

    Ok(groups)
}
