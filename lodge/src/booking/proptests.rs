//! Property-based tests for the booking status rules.

use super::policy::{authorize_deletion, authorize_transition};
use super::BookingStatus;
use crate::model::Role;
use crate::ErrorKind;
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Pending),
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::Cancelled),
    ]
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Host), Just(Role::Admin)]
}

proptest! {
    // Nothing ever leaves CANCELLED.
    #[test]
    fn cancelled_is_terminal(role in role_strategy(), owner in any::<bool>(), next in status_strategy()) {
        prop_assert!(authorize_transition(role, owner, BookingStatus::Cancelled, next).is_err());
    }

    // Every allowed change is an edge of the state machine.
    #[test]
    fn allowed_implies_edge(role in role_strategy(), owner in any::<bool>(), from in status_strategy(), to in status_strategy()) {
        if authorize_transition(role, owner, from, to).is_ok() {
            prop_assert!(from.can_transition_to(to));
        }
    }

    // Non-owning users and hosts are always refused with Unauthorized.
    #[test]
    fn non_owner_unauthorized(host in any::<bool>(), from in status_strategy(), to in status_strategy()) {
        let role = if host { Role::Host } else { Role::User };
        let err = authorize_transition(role, false, from, to).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = authorize_deletion(role, false, from).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    // Admins are allowed exactly the state machine edges.
    #[test]
    fn admin_allowed_exactly_edges(owner in any::<bool>(), from in status_strategy(), to in status_strategy()) {
        prop_assert_eq!(
            authorize_transition(Role::Admin, owner, from, to).is_ok(),
            from.can_transition_to(to)
        );
    }

    // Guests only ever reach CANCELLED.
    #[test]
    fn guest_only_cancels(from in status_strategy(), to in status_strategy()) {
        if authorize_transition(Role::User, true, from, to).is_ok() {
            prop_assert_eq!(to, BookingStatus::Cancelled);
        }
    }
}
