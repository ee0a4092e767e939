//! Per-session tracking of the active phrase.
//!
//! Each study session owns its own memo of the previously resolved phrase,
//! so concurrent sessions over the same clip never cross-talk. The session
//! re-resolves on every position tick and reports a transition only when the
//! resolved identity actually changed, sparing callers redundant updates.

use super::locate;
use crate::catalog::Phrase;
use uuid::Uuid;

/// Outcome of one position tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult<'a> {
    /// Same phrase (or same absence) as the previous tick.
    Unchanged,
    /// A different phrase became active.
    Entered(&'a Phrase),
    /// The previous phrase ended and no phrase is active.
    Cleared,
}

/// One learner's study context for a clip.
#[derive(Debug, Default)]
pub struct StudySession {
    active_phrase: Option<Uuid>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the currently active phrase, if any.
    pub fn active_phrase_id(&self) -> Option<Uuid> {
        self.active_phrase
    }

    /// Resolve the active phrase for the current position.
    ///
    /// Position updates come from the external playback clock and may jump
    /// backward on seeks; every tick is a fresh lookup.
    pub fn tick<'a>(&mut self, position: f64, phrases: &'a [Phrase]) -> TickResult<'a> {
        let resolved = locate(position, phrases);
        let resolved_id = resolved.map(|p| p.id);

        if resolved_id == self.active_phrase {
            return TickResult::Unchanged;
        }

        self.active_phrase = resolved_id;
        match resolved {
            Some(phrase) => TickResult::Entered(phrase),
            None => TickResult::Cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::test_support::contiguous;
    use crate::timeline::seek;

    #[test]
    fn test_tick_reports_transitions_only() {
        let phrases = contiguous(&[0.0, 3.0, 6.0]);
        let mut session = StudySession::new();

        assert!(matches!(
            session.tick(0.0, &phrases),
            TickResult::Entered(p) if p.start_seconds == 0.0
        ));
        assert_eq!(session.tick(1.0, &phrases), TickResult::Unchanged);
        assert_eq!(session.tick(2.9, &phrases), TickResult::Unchanged);
        assert!(matches!(
            session.tick(3.0, &phrases),
            TickResult::Entered(p) if p.start_seconds == 3.0
        ));
        assert_eq!(session.tick(6.0, &phrases), TickResult::Cleared);
        assert_eq!(session.tick(7.0, &phrases), TickResult::Unchanged);
        assert_eq!(session.active_phrase_id(), None);
    }

    #[test]
    fn test_tick_before_first_phrase_is_not_a_transition() {
        let phrases = contiguous(&[5.0, 10.0]);
        let mut session = StudySession::new();

        // Fresh session with no active phrase: resolving to nothing again is
        // not a change.
        assert_eq!(session.tick(1.0, &phrases), TickResult::Unchanged);
    }

    #[test]
    fn test_backward_seek_reenters_phrase() {
        let phrases = contiguous(&[0.0, 3.0, 6.0]);
        let mut session = StudySession::new();

        session.tick(4.0, &phrases);
        assert_eq!(session.active_phrase_id(), Some(phrases[1].id));

        let target = seek(&phrases[0]);
        assert!(matches!(
            session.tick(target, &phrases),
            TickResult::Entered(p) if p.id == phrases[0].id
        ));
        assert_eq!(session.active_phrase_id(), Some(phrases[0].id));
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let phrases = contiguous(&[0.0, 3.0]);
        let mut a = StudySession::new();
        let mut b = StudySession::new();

        a.tick(1.0, &phrases);
        assert_eq!(a.active_phrase_id(), Some(phrases[0].id));
        assert_eq!(b.active_phrase_id(), None);

        // b's first resolution is its own transition, regardless of a.
        assert!(matches!(b.tick(1.0, &phrases), TickResult::Entered(_)));
    }
}
