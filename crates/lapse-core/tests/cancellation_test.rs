//! Tests for the cooperative cancellation token.

use rayon::prelude::*;

use lapse_core::traits::{Cancellable, CancellationToken};

#[test]
fn test_cancel_is_visible_through_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
    clone.reset();
    assert!(!token.is_cancelled());
}

#[test]
fn test_workers_stop_after_cancel() {
    let token = CancellationToken::new();
    token.cancel();
    let processed: usize = (0..1000)
        .into_par_iter()
        .filter(|_| !token.is_cancelled())
        .count();
    assert_eq!(processed, 0);
}
