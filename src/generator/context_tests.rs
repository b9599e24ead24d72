use crate::generator::context::{ContextError, Cursor, TestContext, load_seed_emails, sample_product_ids};
use std::io::Write;
use std::sync::Arc;

fn ctx_with(seeds: &[&str]) -> TestContext {
    TestContext::new(
        seeds.iter().map(|s| s.to_string()).collect(),
        500_000,
        vec![10_001, 42_000, 499_999],
    )
}

#[test]
fn concurrent_claims_are_distinct_and_contiguous() {
    let ctx = Arc::new(ctx_with(&[]));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let ctx = Arc::clone(&ctx);
        handles.push(std::thread::spawn(move || {
            (0..100).map(|_| ctx.claim(Cursor::UserWrite)).collect::<Vec<_>>()
        }));
    }

    let mut all: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort_unstable();
    let expected: Vec<u64> = (500_000..500_800).collect();
    assert_eq!(all, expected);
}

#[test]
fn cursors_advance_independently() {
    let ctx = ctx_with(&[]);
    assert_eq!(ctx.claim(Cursor::UserWrite), 500_000);
    assert_eq!(ctx.claim(Cursor::ProductWrite), 500_000);
    assert_eq!(ctx.claim(Cursor::UserRead), 0);
    assert_eq!(ctx.claim(Cursor::ProductWrite), 500_001);
    assert_eq!(ctx.claim(Cursor::UserRead), 1);
}

#[test]
fn claim_user_read_walks_the_pool_then_faults() {
    let ctx = ctx_with(&["a@x.com", "b@y.com"]);
    assert_eq!(ctx.claim_user_read().unwrap(), (0, "a@x.com".to_string()));
    assert_eq!(ctx.claim_user_read().unwrap(), (1, "b@y.com".to_string()));
    match ctx.claim_user_read() {
        Err(ContextError::EmailIndexOutOfRange { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected out-of-range error, got {other:?}"),
    }
}

#[test]
fn failed_read_claim_does_not_advance_the_cursor() {
    let ctx = ctx_with(&[]);
    assert!(ctx.claim_user_read().is_err());
    assert!(ctx.claim_user_read().is_err());

    let write_now = ctx.push_email("late@example.com".to_string());
    assert_eq!(write_now, 500_000);
    assert_eq!(
        ctx.claim_user_read().unwrap(),
        (0, "late@example.com".to_string())
    );
}

#[test]
fn push_email_claims_write_index_and_extends_pool() {
    let ctx = ctx_with(&["seed@example.com"]);
    assert_eq!(ctx.email_pool_len(), 1);
    assert_eq!(ctx.push_email("one@example.com".to_string()), 500_000);
    assert_eq!(ctx.push_email("two@example.com".to_string()), 500_001);
    assert_eq!(ctx.email_pool_len(), 3);

    // Every claimed read index is backed by an email at that position.
    assert_eq!(ctx.claim_user_read().unwrap().1, "seed@example.com");
    assert_eq!(ctx.claim_user_read().unwrap().1, "one@example.com");
    assert_eq!(ctx.claim_user_read().unwrap().1, "two@example.com");
}

#[test]
fn product_pick_stays_inside_the_sample() {
    let ctx = ctx_with(&[]);
    for _ in 0..50 {
        let id = ctx.pick_product_id();
        assert!(ctx.product_read_ids().contains(&id));
    }
}

#[test]
fn product_sample_respects_bounds_and_size() {
    let ids = sample_product_ids(10_001, 500_000, 10);
    assert_eq!(ids.len(), 10);
    assert!(ids.iter().all(|&id| (10_001..500_000).contains(&id)));
}

#[test]
fn seed_emails_load_from_csv_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,username,email").unwrap();
    writeln!(file, "1,alpha,a@x.com").unwrap();
    writeln!(file, "2,beta,b@y.com").unwrap();
    writeln!(file, "3,gamma,").unwrap();
    file.flush().unwrap();

    let emails = load_seed_emails(file.path()).unwrap();
    assert_eq!(emails, vec!["a@x.com".to_string(), "b@y.com".to_string()]);
}

#[test]
fn seed_file_without_email_column_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,name").unwrap();
    writeln!(file, "1,alpha").unwrap();
    file.flush().unwrap();

    let err = load_seed_emails(file.path()).unwrap_err();
    assert!(err.to_string().contains("email"));
}
