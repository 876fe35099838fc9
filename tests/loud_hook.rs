use safecall::{init, safe_exec, safe_exec_with_no_result, Config};
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn quiet_hook_off_forwards_recovered_panics() {
    init(Config::new().with_quiet_hook(false).with_log_faults(true)).unwrap();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let error = safe_exec(|| panic!("recovered")).unwrap_err();
    assert!(error.to_string().starts_with("panic occurred: recovered\n"));
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    assert!(safe_exec_with_no_result(|| {}).is_ok());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
