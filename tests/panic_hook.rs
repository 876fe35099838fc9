use safecall::safe_exec;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn recovered_panics_stay_away_from_the_previous_hook() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let error = safe_exec(|| panic!("recovered")).unwrap_err();
    assert!(error.to_string().starts_with("panic occurred: recovered\n"));
    assert_eq!(seen.load(Ordering::SeqCst), 0);

    let outcome = panic::catch_unwind(|| panic!("outside"));
    assert!(outcome.is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    let _ = safe_exec(|| panic!("recovered again"));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
