//! Integration tests for the shared scope context.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use admin_query::scope::{Scope, ScopeChange, ScopeContext, ScopeMode, TenantId};
use parking_lot::Mutex;
use rstest::rstest;

#[rstest]
fn test_concurrent_switches_are_each_seen_once() {
    let context = ScopeContext::default();
    let seen: Arc<Mutex<Vec<ScopeChange>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let _subscription = context.subscribe(move |change| log.lock().push(change.clone()));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let context = context.clone();
            thread::spawn(move || {
                context.switch_scope(Scope::tenant(format!("shop{index}")));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let changes = seen.lock();
    assert_eq!(changes.len(), 8);
    for pair in changes.windows(2) {
        assert_eq!(pair[0].current, pair[1].previous);
    }
    assert_eq!(changes.last().map(|change| change.current.clone()), Some(context.current()));
}

#[rstest]
fn test_observer_sees_committed_scope() {
    let context = ScopeContext::default();
    let reader = context.clone();
    let matched = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&matched);
    let _subscription = context.subscribe(move |change| {
        if reader.current() == change.current {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    context.switch_scope(Scope::tenant("shopA"));
    context.switch_scope(Scope::Admin);
    assert_eq!(matched.load(Ordering::SeqCst), 2);
}

#[rstest]
#[case(ScopeMode::Admin, None, Scope::Admin)]
#[case(ScopeMode::Tenant, Some("shopA"), Scope::tenant("shopA"))]
fn test_from_parts(
    #[case] mode: ScopeMode,
    #[case] tenant: Option<&str>,
    #[case] expected: Scope,
) {
    assert_eq!(Scope::from_parts(mode, tenant.map(|id| TenantId::new(id))), expected);
}

#[rstest]
fn test_display() {
    assert_eq!(Scope::Admin.to_string(), "admin");
    assert_eq!(Scope::tenant("shopA").to_string(), "tenant:shopA");
}
