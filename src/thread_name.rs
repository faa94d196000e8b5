use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_NAME: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Name the calling thread in log output. Later calls replace earlier ones.
pub fn set_thread_name(name: &str) {
    THREAD_NAME.with(|n| *n.borrow_mut() = Some(name.to_string()));
}

/// the display name of the calling thread, its numeric id if it was never named
pub fn thread_name() -> String {
    THREAD_NAME.with(|n| match n.borrow().as_ref() {
        Some(name) => name.clone(),
        None => thread_id().to_string(),
    })
}

/// small process-unique id, assigned on first use per thread
pub fn thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}
