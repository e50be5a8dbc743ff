//! Tests for the delegation client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::NewUser;
use crate::domain::ports::{MockDelegationMetrics, MockProcessingService};

const SHORT_TIMEOUT: Duration = Duration::from_millis(50);

#[fixture]
fn ana() -> User {
    User::new(
        UserId::new(1),
        NewUser::try_from_parts("Ana", "a@x.com", 30).expect("valid user"),
    )
}

fn client(service: MockProcessingService) -> DelegationClient {
    DelegationClient::new(Arc::new(service), Duration::from_secs(10))
}

/// Service double that never answers within any sensible deadline.
struct StalledProcessingService;

#[async_trait]
impl ProcessingService for StalledProcessingService {
    async fn submit_user(&self, _user: &User) -> Result<(), ProcessingServiceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn fetch_processed(
        &self,
        _id: UserId,
    ) -> Result<Option<ProcessedData>, ProcessingServiceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Some(ProcessedData::empty()))
    }

    async fn discard_processed(&self, _id: UserId) -> Result<(), ProcessingServiceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn fetch_success_returns_payload() {
    let mut service = MockProcessingService::new();
    service
        .expect_fetch_processed()
        .withf(|id| *id == UserId::new(2))
        .times(1)
        .return_once(|_| {
            Ok(Some(
                [("score".to_owned(), json!(5))].into_iter().collect(),
            ))
        });

    let result = client(service).fetch_processed(UserId::new(2)).await;
    let ProcessingResult::Success(data) = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(data.get("score"), Some(&json!(5)));
}

#[rstest]
#[tokio::test]
async fn fetch_without_remote_record_is_not_found_remote() {
    let mut service = MockProcessingService::new();
    service
        .expect_fetch_processed()
        .times(1)
        .return_once(|_| Ok(None));

    let result = client(service).fetch_processed(UserId::new(7)).await;
    assert_eq!(result, ProcessingResult::NotFoundRemote);
}

#[rstest]
#[case::transport(ProcessingServiceError::transport("connection refused"), "connection refused")]
#[case::timeout(ProcessingServiceError::timeout("read timed out"), TIMEOUT_MESSAGE)]
#[case::decode(ProcessingServiceError::decode("expected object"), "expected object")]
#[tokio::test]
async fn fetch_failures_become_failure_messages(
    #[case] error: ProcessingServiceError,
    #[case] expected: &str,
) {
    let mut service = MockProcessingService::new();
    service
        .expect_fetch_processed()
        .times(1)
        .return_once(move |_| Err(error));

    let result = client(service).fetch_processed(UserId::new(1)).await;
    assert_eq!(result, ProcessingResult::Failure(expected.to_owned()));
}

#[tokio::test]
async fn stalled_fetch_is_cut_off_as_timeout() {
    let client = DelegationClient::new(Arc::new(StalledProcessingService), SHORT_TIMEOUT);

    let result = client.fetch_processed(UserId::new(1)).await;
    assert_eq!(result, ProcessingResult::Failure(TIMEOUT_MESSAGE.to_owned()));
}

#[rstest]
#[tokio::test]
async fn stalled_notifications_are_ignored(ana: User) {
    let client = DelegationClient::new(Arc::new(StalledProcessingService), SHORT_TIMEOUT);

    assert!(matches!(
        client.notify_created(&ana).await,
        NotifyOutcome::Ignored { .. }
    ));
    assert!(matches!(
        client.notify_deleted(ana.id()).await,
        NotifyOutcome::Ignored { .. }
    ));
}

#[rstest]
#[tokio::test]
async fn notify_created_reports_delivery(ana: User) {
    let mut service = MockProcessingService::new();
    service
        .expect_submit_user()
        .withf(|user| user.name().as_ref() == "Ana")
        .times(1)
        .return_once(|_| Ok(()));

    assert_eq!(client(service).notify_created(&ana).await, NotifyOutcome::Delivered);
}

#[rstest]
#[tokio::test]
async fn fixture_service_accepts_notices_and_holds_no_records(ana: User) {
    let client = DelegationClient::new(
        Arc::new(crate::domain::ports::FixtureProcessingService),
        SHORT_TIMEOUT,
    );

    assert_eq!(client.notify_created(&ana).await, NotifyOutcome::Delivered);
    assert_eq!(
        client.fetch_processed(ana.id()).await,
        ProcessingResult::NotFoundRemote
    );
    assert_eq!(client.notify_deleted(ana.id()).await, NotifyOutcome::Delivered);
}

#[rstest]
#[tokio::test]
async fn rejected_deletion_notice_is_ignored_with_reason() {
    let mut service = MockProcessingService::new();
    service
        .expect_discard_processed()
        .times(1)
        .return_once(|_| Err(ProcessingServiceError::rejected(500_u16)));

    let outcome = client(service).notify_deleted(UserId::new(3)).await;
    let NotifyOutcome::Ignored { reason } = outcome else {
        panic!("expected ignored outcome");
    };
    assert!(reason.contains("500"), "reason should mention the status: {reason}");
}

#[rstest]
#[tokio::test]
async fn outcomes_are_counted(ana: User) {
    let mut service = MockProcessingService::new();
    service.expect_submit_user().return_once(|_| Ok(()));
    service
        .expect_fetch_processed()
        .return_once(|_| Err(ProcessingServiceError::transport("refused")));
    service.expect_discard_processed().return_once(|_| Ok(()));

    let mut metrics = MockDelegationMetrics::new();
    metrics
        .expect_record()
        .withf(|call, outcome| {
            *call == DelegationCall::NotifyCreated && *outcome == DelegationOutcome::Delivered
        })
        .times(1)
        .return_const(());
    metrics
        .expect_record()
        .withf(|call, outcome| {
            *call == DelegationCall::FetchProcessed && *outcome == DelegationOutcome::Failed
        })
        .times(1)
        .return_const(());
    metrics
        .expect_record()
        .withf(|call, outcome| {
            *call == DelegationCall::NotifyDeleted && *outcome == DelegationOutcome::Delivered
        })
        .times(1)
        .return_const(());

    let client = client(service).with_metrics(Arc::new(metrics));
    assert_eq!(client.notify_created(&ana).await, NotifyOutcome::Delivered);
    assert!(matches!(
        client.fetch_processed(ana.id()).await,
        ProcessingResult::Failure(_)
    ));
    assert_eq!(client.notify_deleted(ana.id()).await, NotifyOutcome::Delivered);
}

#[rstest]
#[case(ProcessingResult::NotFoundRemote, DelegationStatus::NotFoundRemote)]
#[case(
    ProcessingResult::Failure("timeout".to_owned()),
    DelegationStatus::Error("timeout".to_owned())
)]
fn degraded_results_carry_no_data(
    ana: User,
    #[case] result: ProcessingResult,
    #[case] status: DelegationStatus,
) {
    let view = result.into_processed_user(ana);
    assert!(view.processed_data().is_empty());
    assert_eq!(view.delegation_status(), &status);
}
