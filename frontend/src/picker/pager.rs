//! Pagination / scroll-trigger state machine
//!
//! Tracks which load (if any) is in flight and hands out request tokens so
//! that only the response to the most recently issued request is ever
//! applied. Stale responses, including out-of-order arrivals from superseded
//! searches, are discarded by the token check.

use shared::Direction;

/// Monotonic token identifying one issued page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Load state of one picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    AwaitingCenterLoad,
    AwaitingDownLoad,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pager {
    phase: LoadPhase,
    centered_once: bool,
    next_token: u64,
    in_flight: Option<(RequestToken, Direction)>,
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Begin a fresh anchor-relative load (dropdown open, search change).
    ///
    /// Always allowed: a new center load supersedes whatever was in flight,
    /// whose response then fails the token check.
    pub fn begin_center(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.phase = LoadPhase::AwaitingCenterLoad;
        self.in_flight = Some((token, Direction::Center));
        token
    }

    /// Begin a continuation page load from the scroll trigger.
    ///
    /// Only issued from `Idle`, and never before the first center load has
    /// completed. Rapid scroll events therefore cannot stack concurrent
    /// down requests.
    pub fn begin_down(&mut self) -> Option<RequestToken> {
        if self.phase != LoadPhase::Idle || !self.centered_once {
            return None;
        }
        let token = self.issue_token();
        self.phase = LoadPhase::AwaitingDownLoad;
        self.in_flight = Some((token, Direction::Down));
        Some(token)
    }

    /// Record the arrival of a response (successful or not).
    ///
    /// Returns the direction of the finished request when `token` matches
    /// the latest issued one; the pager then returns to `Idle`. A stale
    /// token returns `None` and leaves the state untouched, because a newer
    /// request owns the phase.
    pub fn finish(&mut self, token: RequestToken) -> Option<Direction> {
        match self.in_flight {
            Some((latest, direction)) if latest == token => {
                self.in_flight = None;
                self.phase = LoadPhase::Idle;
                if direction == Direction::Center {
                    self.centered_once = true;
                }
                Some(direction)
            }
            _ => None,
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_is_refused_before_first_center_completes() {
        let mut pager = Pager::new();

        // No center load yet
        assert_eq!(pager.begin_down(), None);

        // Center issued but still in flight
        let center = pager.begin_center();
        assert_eq!(pager.begin_down(), None);

        // After the center response, down is allowed
        assert_eq!(pager.finish(center), Some(Direction::Center));
        assert!(pager.begin_down().is_some());
    }

    #[test]
    fn down_is_only_issued_from_idle() {
        let mut pager = Pager::new();
        let center = pager.begin_center();
        pager.finish(center);

        let first = pager.begin_down().unwrap();
        // A second scroll event while the first down is in flight is ignored
        assert_eq!(pager.begin_down(), None);

        pager.finish(first);
        assert!(pager.begin_down().is_some());
    }

    #[test]
    fn center_supersedes_in_flight_requests() {
        let mut pager = Pager::new();
        let first = pager.begin_center();
        let second = pager.begin_center();

        // The superseded response is stale and must not flip the phase
        assert_eq!(pager.finish(first), None);
        assert_eq!(pager.phase(), LoadPhase::AwaitingCenterLoad);

        assert_eq!(pager.finish(second), Some(Direction::Center));
        assert_eq!(pager.phase(), LoadPhase::Idle);
    }

    #[test]
    fn search_change_supersedes_in_flight_down_load() {
        let mut pager = Pager::new();
        let center = pager.begin_center();
        pager.finish(center);

        let down = pager.begin_down().unwrap();
        let fresh_center = pager.begin_center();

        assert_eq!(pager.finish(down), None);
        assert_eq!(pager.finish(fresh_center), Some(Direction::Center));
    }

    #[test]
    fn finish_returns_to_idle_even_for_empty_or_failed_loads() {
        // The caller reports arrival regardless of outcome; the pager has no
        // error state.
        let mut pager = Pager::new();
        let center = pager.begin_center();
        assert_eq!(pager.finish(center), Some(Direction::Center));
        assert_eq!(pager.phase(), LoadPhase::Idle);
    }
}
