//! Poll aggregate - A question with a fixed set of options
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: identity, title and options are only reachable
//!   through accessors
//! - **Newtypes**: `PollTitle`, `PollDescription`, `OptionText` are valid by
//!   construction
//! - **Two constructors**: [`Poll::create`] enforces creation rules (option
//!   count), while [`Poll::new`] plus builders rehydrate a stored snapshot
//!   as-is

use chrono::{DateTime, Utc};

use crate::common::parse_expiration;
use crate::entities::PollOption;
use crate::error::DomainError;
use crate::value_objects::{OptionText, PollDescription, PollTitle};
use crate::{PollId, PollOptionId, UserId};

/// Minimum number of options a newly created poll must have
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of options a newly created poll may have
pub const MAX_OPTIONS: usize = 10;

/// A poll snapshot.
///
/// # Invariants
///
/// - `title` is non-empty and <= 200 characters (enforced by `PollTitle`)
/// - option order is the order the store returned; it carries no meaning
///   (the aggregator re-sorts)
/// - polls built through [`Poll::create`] have between 2 and 10 options
///
/// # Example
///
/// ```
/// use ballotbox_domain::aggregates::Poll;
/// use ballotbox_domain::value_objects::PollTitle;
/// use ballotbox_domain::UserId;
/// use chrono::Utc;
///
/// let poll = Poll::new(PollTitle::new("Lunch?").unwrap(), UserId::new(), Utc::now());
/// assert!(poll.is_active());
/// assert!(poll.options().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Poll {
    // Identity
    id: PollId,

    // Core attributes
    title: PollTitle,
    description: Option<PollDescription>,
    creator_id: UserId,

    // Lifecycle
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,

    options: Vec<PollOption>,
}

impl Poll {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an active poll with no options and no expiration.
    pub fn new(title: PollTitle, creator_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PollId::new(),
            title,
            description: None,
            creator_id,
            created_at,
            expires_at: None,
            is_active: true,
            options: Vec::new(),
        }
    }

    /// Create a brand new poll from validated input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the draft has fewer than 2 or
    /// more than 10 options.
    pub fn create(
        draft: NewPoll,
        creator_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let count = draft.options.len();
        if count < MIN_OPTIONS {
            return Err(DomainError::validation(format!(
                "At least {} options are required",
                MIN_OPTIONS
            )));
        }
        if count > MAX_OPTIONS {
            return Err(DomainError::validation(format!(
                "Maximum {} options allowed",
                MAX_OPTIONS
            )));
        }

        let options = draft.options.into_iter().map(PollOption::new).collect();
        let mut poll = Self::new(draft.title, creator_id, now).with_options(options);
        poll.description = draft.description;
        poll.expires_at = draft.expires_at;
        Ok(poll)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PollId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &PollTitle {
        &self.title
    }

    #[inline]
    pub fn description(&self) -> Option<&PollDescription> {
        self.description.as_ref()
    }

    #[inline]
    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the stored active flag. This does not account for expiry;
    /// see [`Poll::is_open`].
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    pub fn option(&self, id: PollOptionId) -> Option<&PollOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn has_option(&self, id: PollOptionId) -> bool {
        self.option(id).is_some()
    }

    pub fn is_created_by(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }

    // =========================================================================
    // Time-dependent status
    // =========================================================================

    /// A poll is expired when it has an expiration strictly before `now`.
    /// A poll without an expiration never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Active flag set and not expired at `now`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }

    // =========================================================================
    // Builder Methods (for rehydration)
    // =========================================================================

    /// Set the poll's ID (used when loading from storage).
    pub fn with_id(mut self, id: PollId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: Option<PollDescription>) -> Self {
        self.description = description;
        self
    }

    pub fn with_expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_options(mut self, options: Vec<PollOption>) -> Self {
        self.options = options;
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

/// Validated input for creating a poll.
///
/// Field-level validation happens here; the option-count rule is applied by
/// [`Poll::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPoll {
    pub title: PollTitle,
    pub description: Option<PollDescription>,
    pub options: Vec<OptionText>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewPoll {
    /// Validate raw form input.
    ///
    /// Blank description and expiration are treated as absent. The
    /// expiration accepts RFC3339 or `datetime-local` (`YYYY-MM-DDTHH:MM`,
    /// read as UTC).
    pub fn parse(
        title: &str,
        description: Option<&str>,
        options: &[String],
        expires_at: Option<&str>,
    ) -> Result<Self, DomainError> {
        let title = PollTitle::new(title)?;
        let description = PollDescription::optional(description)?;
        let options = options
            .iter()
            .map(|text| OptionText::new(text.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let expires_at = match expires_at {
            Some(raw) => parse_expiration(raw)?,
            None => None,
        };

        Ok(Self {
            title,
            description,
            options,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn options(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn create_builds_active_poll_with_zero_counts() {
        let draft = NewPoll::parse("Best pet?", Some(""), &options(&["Cat", "Dog"]), None).unwrap();
        let creator = UserId::new();
        let poll = Poll::create(draft, creator, now()).unwrap();

        assert_eq!(poll.title().as_str(), "Best pet?");
        assert!(poll.description().is_none());
        assert!(poll.is_active());
        assert!(poll.is_created_by(creator));
        assert_eq!(poll.created_at(), now());
        assert_eq!(poll.options().len(), 2);
        assert!(poll.options().iter().all(|o| o.vote_count == 0));
    }

    #[test]
    fn create_requires_two_options() {
        let draft = NewPoll::parse("Solo", None, &options(&["Only"]), None).unwrap();
        let err = Poll::create(draft, UserId::new(), now()).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: At least 2 options are required");
    }

    #[test]
    fn create_caps_options_at_ten() {
        let texts: Vec<String> = (1..=11).map(|i| format!("Option {i}")).collect();
        let draft = NewPoll::parse("Many", None, &texts, None).unwrap();
        let err = Poll::create(draft, UserId::new(), now()).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Maximum 10 options allowed");

        let draft = NewPoll::parse("Ten", None, &texts[..10], None).unwrap();
        assert!(Poll::create(draft, UserId::new(), now()).is_ok());
    }

    #[test]
    fn parse_rejects_blank_option() {
        let err = NewPoll::parse("Q", None, &options(&["A", "  "]), None).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Option text is required");
    }

    #[test]
    fn parse_reads_datetime_local_expiry() {
        let draft =
            NewPoll::parse("Q", None, &options(&["A", "B"]), Some("2025-06-02T09:30")).unwrap();
        assert_eq!(
            draft.expires_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap())
        );

        let draft = NewPoll::parse("Q", None, &options(&["A", "B"]), Some("")).unwrap();
        assert_eq!(draft.expires_at, None);
    }

    #[test]
    fn expiry_is_strict() {
        let title = PollTitle::new("Q").unwrap();
        let poll = Poll::new(title, UserId::new(), now()).with_expires_at(Some(now()));

        // Exactly at the expiration instant the poll is still open
        assert!(!poll.is_expired(now()));
        assert!(poll.is_expired(now() + Duration::seconds(1)));
    }

    #[test]
    fn no_expiry_never_expires() {
        let title = PollTitle::new("Q").unwrap();
        let poll = Poll::new(title, UserId::new(), now());
        assert!(!poll.is_expired(now() + Duration::days(365 * 100)));
    }

    #[test]
    fn is_open_needs_active_flag() {
        let title = PollTitle::new("Q").unwrap();
        let mut poll = Poll::new(title, UserId::new(), now());
        assert!(poll.is_open(now()));
        poll.set_active(false);
        assert!(!poll.is_open(now()));
    }
}
