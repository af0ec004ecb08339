//! Tests for the issue/validate lifecycle

use std::sync::Arc;

use crate::domain::verification_code::is_well_formed;
use crate::errors::{IssueError, ValidateError};
use crate::services::verification::{VerificationConfig, VerificationService};

use super::mocks::MockCodeStore;

fn service(should_fail: bool) -> VerificationService<MockCodeStore> {
    VerificationService::new(
        Arc::new(MockCodeStore::new(should_fail)),
        VerificationConfig::default(),
    )
}

#[tokio::test]
async fn test_issue_then_validate_succeeds() {
    let service = service(false);

    let code = service.issue_code("a@b.com").await.unwrap();
    assert!(is_well_formed(&code));

    assert_eq!(service.validate_code("a@b.com", &code).await, Ok(()));
}

#[tokio::test]
async fn test_wrong_code_rejected() {
    let service = service(false);

    let code = service.issue_code("a@b.com").await.unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    assert_eq!(
        service.validate_code("a@b.com", wrong).await,
        Err(ValidateError::InvalidOrExpired)
    );

    // The pending code survives a failed attempt
    assert_eq!(service.validate_code("a@b.com", &code).await, Ok(()));
}

#[tokio::test]
async fn test_code_is_single_use() {
    let service = service(false);

    let code = service.issue_code("a@b.com").await.unwrap();

    assert_eq!(service.validate_code("a@b.com", &code).await, Ok(()));
    assert_eq!(
        service.validate_code("a@b.com", &code).await,
        Err(ValidateError::InvalidOrExpired)
    );
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let service = service(false);

    let first = service.issue_code("a@b.com").await.unwrap();
    let second = service.issue_code("a@b.com").await.unwrap();

    if first != second {
        assert_eq!(
            service.validate_code("a@b.com", &first).await,
            Err(ValidateError::InvalidOrExpired)
        );
    }
    assert_eq!(service.validate_code("a@b.com", &second).await, Ok(()));
}

#[tokio::test]
async fn test_email_case_is_normalized() {
    let service = service(false);

    let code = service.issue_code("User@Example.com").await.unwrap();

    assert_eq!(service.validate_code("user@example.com", &code).await, Ok(()));
}

#[tokio::test]
async fn test_codes_for_different_emails_are_independent() {
    let service = service(false);

    let code_a = service.issue_code("a@b.com").await.unwrap();
    let code_b = service.issue_code("c@d.com").await.unwrap();

    assert_eq!(service.validate_code("a@b.com", &code_a).await, Ok(()));
    assert_eq!(service.validate_code("c@d.com", &code_b).await, Ok(()));
}

#[tokio::test(start_paused = true)]
async fn test_expired_code_rejected() {
    let service = service(false);

    let code = service.issue_code("a@b.com").await.unwrap();

    tokio::time::advance(std::time::Duration::from_secs(301)).await;

    assert_eq!(
        service.validate_code("a@b.com", &code).await,
        Err(ValidateError::InvalidOrExpired)
    );
}

#[tokio::test(start_paused = true)]
async fn test_code_valid_just_before_expiry() {
    let service = service(false);

    let code = service.issue_code("a@b.com").await.unwrap();

    tokio::time::advance(std::time::Duration::from_secs(299)).await;

    assert_eq!(service.validate_code("a@b.com", &code).await, Ok(()));
}

#[tokio::test]
async fn test_issue_store_failure_is_unavailable() {
    let service = service(true);

    assert_eq!(
        service.issue_code("a@b.com").await,
        Err(IssueError::StoreUnavailable)
    );
}

#[tokio::test]
async fn test_validate_store_failure_is_unavailable() {
    let service = service(true);

    assert_eq!(
        service.validate_code("a@b.com", "483920").await,
        Err(ValidateError::StoreUnavailable)
    );
}

#[tokio::test]
async fn test_malformed_candidate_rejected_without_store_access() {
    // Store failure would surface as StoreUnavailable, so getting
    // InvalidOrExpired proves the store was never consulted.
    let service = service(true);

    for candidate in ["", "12345", "1234567", "12a456", "012345"] {
        assert_eq!(
            service.validate_code("a@b.com", candidate).await,
            Err(ValidateError::InvalidOrExpired),
            "candidate: {:?}",
            candidate
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_validation_has_one_winner() {
    let service = Arc::new(service(false));
    let code = service.issue_code("a@b.com").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&service);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service.validate_code("a@b.com", &code).await
        }));
    }

    let mut successes = 0;
    let mut rejections = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(ValidateError::InvalidOrExpired) => rejections += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(rejections, 15);
}
