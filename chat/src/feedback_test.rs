use super::*;

#[test]
fn counter_floors_at_zero() {
    let mut monitor = FeedbackMonitor::default();
    assert!(monitor.observe(-1).is_none());
    assert_eq!(monitor.dislikes(), 0);
}

#[test]
fn no_escalation_at_threshold() {
    let mut monitor = FeedbackMonitor::default();
    assert!(monitor.observe(1).is_none());
    assert!(monitor.observe(1).is_none());
    assert_eq!(monitor.dislikes(), DISLIKE_THRESHOLD);
    assert!(!monitor.escalated());
}

#[test]
fn escalates_once_above_threshold() {
    let mut monitor = FeedbackMonitor::default();
    monitor.observe(1);
    monitor.observe(1);
    assert_eq!(monitor.observe(1), Some(ESCALATION_MESSAGE));
    assert!(monitor.escalated());

    // Still above threshold: no second escalation.
    assert!(monitor.observe(1).is_none());
}

#[test]
fn never_escalates_twice_even_after_dropping_back() {
    let mut monitor = FeedbackMonitor::default();

    // Up to 3, back down to 1, back up to 3.
    assert!(monitor.observe(1).is_none());
    assert!(monitor.observe(1).is_none());
    assert!(monitor.observe(1).is_some());
    monitor.observe(-1);
    monitor.observe(-1);
    assert_eq!(monitor.dislikes(), 1);
    assert!(monitor.escalated());

    assert!(monitor.observe(1).is_none());
    assert!(monitor.observe(1).is_none());
    assert_eq!(monitor.dislikes(), 3);
}

#[test]
fn zero_deltas_change_nothing() {
    let mut monitor = FeedbackMonitor::default();
    monitor.observe(1);
    assert!(monitor.observe(0).is_none());
    assert_eq!(monitor.dislikes(), 1);
}
