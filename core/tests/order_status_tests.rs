// tests/order_status_tests.rs
use dishdash_core::order::next_statuses_for;
use dishdash_core::{
  get_next_possible_statuses, validate_customer_cancel, validate_transition, OrderStatus, StatusError,
};

use OrderStatus::*;

#[test]
fn test_transition_table() {
  assert_eq!(get_next_possible_statuses(Placed), vec![Preparing, Cancelled]);
  assert_eq!(get_next_possible_statuses(Preparing), vec![Ready]);
  assert_eq!(get_next_possible_statuses(Ready), vec![Delivered]);
  assert_eq!(get_next_possible_statuses(Delivered), Vec::<OrderStatus>::new());
  assert_eq!(get_next_possible_statuses(Cancelled), Vec::<OrderStatus>::new());
}

#[test]
fn test_string_entry_point() {
  assert_eq!(next_statuses_for("PLACED"), vec![Preparing, Cancelled]);
  assert_eq!(next_statuses_for("DELIVERED"), Vec::<OrderStatus>::new());
  assert_eq!(next_statuses_for("ON_THE_WAY"), Vec::<OrderStatus>::new());
}

#[test]
fn test_every_pair_matches_the_table() {
  for from in OrderStatus::ALL {
    for to in OrderStatus::ALL {
      let allowed = from.next_possible_statuses().contains(&to);
      assert_eq!(from.can_transition_to(to), allowed, "{} -> {}", from, to);
      assert_eq!(validate_transition(from, to).is_ok(), allowed, "{} -> {}", from, to);
    }
  }
}

#[test]
fn test_no_skipping_or_going_back() {
  assert_eq!(
    validate_transition(Placed, Delivered),
    Err(StatusError::IllegalTransition {
      from: Placed,
      to: Delivered
    })
  );
  assert!(validate_transition(Ready, Preparing).is_err());
  assert!(validate_transition(Preparing, Cancelled).is_err());
  assert!(validate_transition(Placed, Placed).is_err());
}

#[test]
fn test_customer_cancel_only_while_placed() {
  assert!(validate_customer_cancel(Placed).is_ok());
  for status in [Preparing, Ready, Delivered, Cancelled] {
    assert_eq!(validate_customer_cancel(status), Err(StatusError::NotCancellable(status)));
  }
  assert_eq!(
    StatusError::NotCancellable(Preparing).to_string(),
    "Order is PREPARING and can no longer be cancelled"
  );
}

#[test]
fn test_only_delivered_orders_are_reviewable() {
  let reviewable: Vec<_> = OrderStatus::ALL.into_iter().filter(|s| s.is_reviewable()).collect();
  assert_eq!(reviewable, vec![Delivered]);
}
