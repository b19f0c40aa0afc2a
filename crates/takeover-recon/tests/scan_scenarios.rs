//! End-to-end scan scenarios against deterministic resolvers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use takeover_core::report::write_vulnerable_file;
use takeover_core::{DnsState, FingerprintSet, TakeoverError};
use takeover_recon::{ErrorPolicy, RawAnswer, Resolver, Scanner, StaticResolver};

fn subs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Answers instantly for `fail`, sleeps for everything else.
struct SlowResolver {
    fail: &'static str,
    delay: Duration,
    completed: AtomicUsize,
}

#[async_trait]
impl Resolver for SlowResolver {
    async fn resolve(&self, hostname: &str) -> RawAnswer {
        if hostname == self.fail {
            return RawAnswer::failure("communications error: connection refused");
        }
        tokio::time::sleep(self.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        RawAnswer::empty()
    }
}

#[tokio::test]
async fn scenario_a_s3_cname_is_vulnerable() {
    let resolver =
        StaticResolver::new().with_cname("a.example.com", "a.example.com.s3.amazonaws.com.");
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["amazonaws.com"]);

    let results = scanner.scan(&subs(&["a.example.com"]), &fps).await.unwrap();

    let record = results.get("a.example.com").unwrap();
    assert_eq!(record.state, DnsState::CnameFound);
    assert!(record.is_vulnerable);
}

#[tokio::test]
async fn scenario_b_empty_answer_is_no_cname() {
    let resolver = StaticResolver::new().with("b.example.com", RawAnswer::empty());
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["amazonaws.com"]);

    let results = scanner.scan(&subs(&["b.example.com"]), &fps).await.unwrap();

    let record = results.get("b.example.com").unwrap();
    assert_eq!(record.state, DnsState::NoCname);
    assert!(!record.is_vulnerable);
}

#[tokio::test]
async fn scenario_c_nxdomain() {
    let resolver = StaticResolver::new().with(
        "c.example.com",
        RawAnswer::failure(";; ->>HEADER<<- opcode: QUERY, status: NXDOMAIN, id: 1"),
    );
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["amazonaws.com"]);

    let results = scanner.scan(&subs(&["c.example.com"]), &fps).await.unwrap();

    let record = results.get("c.example.com").unwrap();
    assert_eq!(record.state, DnsState::NxDomain);
    assert!(!record.is_vulnerable);
}

#[tokio::test]
async fn scenario_d_filtered_report_has_one_line() {
    let resolver = StaticResolver::new()
        .with_cname("shop.example.com", "shop-example.myshopify.com.")
        .with_cname("www.example.com", "example.cdn.safe-host.net.");
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["myshopify.com"]);

    let results = scanner
        .scan(&subs(&["shop.example.com", "www.example.com"]), &fps)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vulnerable.txt");
    assert_eq!(write_vulnerable_file(&path, &results).unwrap(), 1);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["Subdomain: shop.example.com, CNAME: shop-example.myshopify.com., Vulnerable: Yes"]
    );
}

#[tokio::test]
async fn wildcard_target_matches_after_normalization() {
    let resolver = StaticResolver::new().with_cname("docs.example.com", "*.docs.github.io.");
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["docs.github.io"]);

    let results = scanner.scan(&subs(&["docs.example.com"]), &fps).await.unwrap();
    assert!(results.get("docs.example.com").unwrap().is_vulnerable);
}

#[tokio::test]
async fn scanning_twice_is_idempotent() {
    let resolver = Arc::new(
        StaticResolver::new()
            .with_cname("a.example.com", "a.herokuapp.com.")
            .with("b.example.com", RawAnswer::empty()),
    );
    let scanner = Scanner::new(resolver).concurrency(4);
    let fps = FingerprintSet::new(["herokuapp.com"]);
    let input = subs(&["a.example.com", "b.example.com", "gone.example.com"]);

    let first = scanner.scan(&input, &fps).await.unwrap();
    let second = scanner.scan(&input, &fps).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn duplicates_are_all_kept() {
    let resolver = StaticResolver::new().with_cname("a.example.com", "a.herokuapp.com.");
    let scanner = Scanner::new(Arc::new(resolver));
    let fps = FingerprintSet::new(["herokuapp.com"]);

    let results = scanner
        .scan(&subs(&["a.example.com", "a.example.com"]), &fps)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results.summary().vulnerable, 2);
}

#[tokio::test]
async fn abort_policy_fails_whole_scan() {
    let resolver = StaticResolver::new()
        .with_cname("a.example.com", "a.herokuapp.com.")
        .with("b.example.com", RawAnswer::failure("network unreachable"));
    let scanner = Scanner::new(Arc::new(resolver)).concurrency(1);
    let fps = FingerprintSet::new(["herokuapp.com"]);

    let err = scanner
        .scan(&subs(&["a.example.com", "b.example.com"]), &fps)
        .await
        .unwrap_err();

    match err {
        TakeoverError::Query { subdomain, message } => {
            assert_eq!(subdomain, "b.example.com");
            assert_eq!(message, "network unreachable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn abort_policy_cancels_in_flight_queries() {
    let resolver = Arc::new(SlowResolver {
        fail: "bad.example.com",
        delay: Duration::from_secs(5),
        completed: AtomicUsize::new(0),
    });
    let scanner = Scanner::new(Arc::clone(&resolver) as Arc<dyn Resolver>).concurrency(4);
    let input = subs(&[
        "slow1.example.com",
        "slow2.example.com",
        "bad.example.com",
        "slow3.example.com",
    ]);

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        scanner.scan(&input, &FingerprintSet::default()),
    )
    .await
    .expect("scan should abort before slow queries finish");

    assert!(outcome.unwrap_err().is_query_error());
    assert_eq!(resolver.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn isolate_policy_records_failures() {
    let resolver = StaticResolver::new()
        .with_cname("a.example.com", "a.herokuapp.com.")
        .with("b.example.com", RawAnswer::failure("network unreachable"));
    let scanner = Scanner::new(Arc::new(resolver)).error_policy(ErrorPolicy::Isolate);
    let fps = FingerprintSet::new(["herokuapp.com"]);

    let results = scanner
        .scan(&subs(&["a.example.com", "b.example.com"]), &fps)
        .await
        .unwrap();

    assert!(results.get("a.example.com").unwrap().is_vulnerable);
    let failed = results.get("b.example.com").unwrap();
    assert_eq!(failed.state, DnsState::QueryError);
    assert!(!failed.is_vulnerable);
    assert_eq!(failed.raw_answer, "network unreachable");
}

#[tokio::test]
async fn slow_query_times_out() {
    let resolver = SlowResolver {
        fail: "never.example.com",
        delay: Duration::from_secs(2),
        completed: AtomicUsize::new(0),
    };
    let scanner = Scanner::new(Arc::new(resolver))
        .timeout(Duration::from_millis(50))
        .error_policy(ErrorPolicy::Isolate);

    let results = scanner
        .scan(&subs(&["stuck.example.com"]), &FingerprintSet::default())
        .await
        .unwrap();

    let record = results.get("stuck.example.com").unwrap();
    assert_eq!(record.state, DnsState::QueryError);
    assert!(record.raw_answer.contains("timed out"));
}
