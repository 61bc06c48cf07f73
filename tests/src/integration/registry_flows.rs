//! # Registry Flows
//!
//! The registry service and the event bus together: the end-to-end
//! scenario, receipts, event order and variant gating.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sc_01_project_registry::adapters::ManualClock;
    use sc_01_project_registry::config::{ContractVariant, Feature, FileHashPolicy, RegistryConfig};
    use sc_01_project_registry::domain::NewProject;
    use sc_01_project_registry::errors::RegistryError;
    use sc_01_project_registry::ports::{
        CallOutput, ProjectRegistryApi, RegistryCall, SkillCertifierApi, TransactionExecutor,
    };
    use sc_01_project_registry::service::{
        create_test_service, create_test_service_with, RegistryService, TEST_ADMIN,
        TEST_GENESIS_TIME,
    };
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, RegistryEvent};
    use shared_types::{keccak256, Address, Hash};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ALICE: Address = Address::new([0xA1; 20]);
    const BOB: Address = Address::new([0xB0; 20]);

    fn resume_ai() -> NewProject {
        NewProject::new("Resume AI", "", ["AI", "Blockchain"])
    }

    // =============================================================================
    // END-TO-END
    // =============================================================================

    #[tokio::test]
    async fn test_resume_ai_scenario() {
        let registry = create_test_service().await.unwrap();

        let id = registry.submit_project(ALICE, resume_ai()).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(registry.get_total_projects().await, 1);

        registry.upvote_project(BOB, 1).await.unwrap();
        assert_eq!(registry.get_vote_count(1).await.unwrap(), 1);

        let again = registry.upvote_project(BOB, 1).await.unwrap_err();
        assert_eq!(
            again,
            RegistryError::AlreadyVoted {
                token_id: 1,
                voter: BOB
            }
        );
        assert_eq!(registry.get_vote_count(1).await.unwrap(), 1);

        let hash = Hash::new([0xAB; 32]);
        registry.store_file_hash(ALICE, 1, hash).await.unwrap();
        assert_eq!(registry.get_file_hash(1).await.unwrap(), hash);

        let summary = registry.get_project(1).await.unwrap();
        assert_eq!(summary.name, "Resume AI");
        assert_eq!(summary.owner, ALICE);
        assert_eq!(summary.tags, vec!["AI", "Blockchain"]);
        assert_eq!(summary.timestamp, TEST_GENESIS_TIME);
    }

    #[tokio::test]
    async fn test_rejections_leave_state_untouched() {
        let registry = create_test_service().await.unwrap();
        registry.submit_project(ALICE, resume_ai()).await.unwrap();

        assert!(matches!(
            registry.store_file_hash(BOB, 1, Hash::new([1; 32])).await,
            Err(RegistryError::NotOwner { owner: ALICE, .. })
        ));
        assert!(registry.get_file_hash(1).await.unwrap().is_zero());

        assert!(matches!(
            registry.set_verified_issuer(BOB, BOB, true).await,
            Err(RegistryError::NotAdmin { caller: BOB })
        ));
        assert!(!registry.is_verified_issuer(BOB).await);

        assert!(matches!(
            registry.upvote_project(BOB, 2).await,
            Err(RegistryError::OutOfRange { token_id: 2, total: 1 })
        ));
        assert_eq!(registry.get_total_projects().await, 1);
    }

    // =============================================================================
    // RECEIPTS & EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_receipts_are_gap_free() {
        let registry = create_test_service().await.unwrap();

        let submit = registry
            .execute(ALICE, RegistryCall::SubmitProject(resume_ai()))
            .await
            .unwrap();
        assert_eq!(submit.sequence, 1);
        assert_eq!(submit.output, CallOutput::TokenId(1));
        assert_eq!(submit.minted_token_id(), Some(1));

        // Rejected: no sequence number consumed.
        registry
            .execute(BOB, RegistryCall::UpvoteProject { token_id: 9 })
            .await
            .unwrap_err();

        let vote = registry
            .execute(BOB, RegistryCall::UpvoteProject { token_id: 1 })
            .await
            .unwrap();
        assert_eq!(vote.sequence, 2);
        assert_eq!(vote.output, CallOutput::VoteCount(1));
        assert_eq!(vote.minted_token_id(), None);
        assert_eq!(vote.caller, BOB);
    }

    #[tokio::test]
    async fn test_bus_sees_events_in_commit_order() {
        let registry = create_test_service().await.unwrap();
        let mut all = registry.publisher().subscribe(EventFilter::all());
        let mut votes = registry
            .publisher()
            .subscribe(EventFilter::topics(vec![EventTopic::Votes]));

        let hash = keccak256(b"resume.pdf");
        registry.submit_project(ALICE, resume_ai()).await.unwrap();
        registry.upvote_project(BOB, 1).await.unwrap();
        registry.store_file_hash(ALICE, 1, hash).await.unwrap();

        let events = all.drain().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            RegistryEvent::Transfer {
                from: Address::ZERO,
                to: ALICE,
                token_id: 1
            }
        );
        assert!(matches!(
            &events[1],
            RegistryEvent::ProjectSubmitted { token_id: 1, owner, .. } if *owner == ALICE
        ));
        assert!(matches!(
            events[2],
            RegistryEvent::ProjectUpvoted { token_id: 1, vote_count: 1, .. }
        ));
        assert_eq!(
            events[3],
            RegistryEvent::FileHashStored {
                token_id: 1,
                owner: ALICE,
                file_hash: hash
            }
        );

        let only_votes = votes.drain().unwrap();
        assert_eq!(only_votes.len(), 1);
        assert_eq!(only_votes[0].token_id(), Some(1));
    }

    #[tokio::test]
    async fn test_deploy_flags_admin_before_any_subscriber_call() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::all());
        let registry = RegistryService::deploy(
            RegistryConfig::for_variant(TEST_ADMIN, ContractVariant::MultiDomain),
            Arc::new(ManualClock::new(TEST_GENESIS_TIME)),
            Arc::clone(&bus),
        )
        .await
        .unwrap();

        assert!(registry.is_verified_issuer(TEST_ADMIN).await);
        assert_eq!(
            sub.drain().unwrap(),
            vec![RegistryEvent::VerifiedIssuerUpdated {
                issuer: TEST_ADMIN,
                verified: true
            }]
        );
    }

    // =============================================================================
    // BLOCK TIME
    // =============================================================================

    #[tokio::test]
    async fn test_timestamps_follow_the_clock() {
        let clock = Arc::new(ManualClock::new(TEST_GENESIS_TIME));
        let registry = RegistryService::deploy(
            RegistryConfig::for_variant(TEST_ADMIN, ContractVariant::SkillChain),
            Arc::clone(&clock),
            Arc::new(InMemoryEventBus::new()),
        )
        .await
        .unwrap();

        registry.submit_project(ALICE, NewProject::new("a", "", ["x"])).await.unwrap();
        clock.advance(12);
        registry.submit_project(BOB, NewProject::new("b", "", ["y"])).await.unwrap();

        assert_eq!(registry.get_project(1).await.unwrap().timestamp, TEST_GENESIS_TIME);
        assert_eq!(registry.get_project(2).await.unwrap().timestamp, TEST_GENESIS_TIME + 12);
    }

    // =============================================================================
    // VARIANTS & POLICIES
    // =============================================================================

    #[tokio::test]
    async fn test_skillchain_variant_has_no_issuer_registry() {
        let registry = create_test_service_with(RegistryConfig::for_variant(
            TEST_ADMIN,
            ContractVariant::SkillChain,
        ))
        .await
        .unwrap();

        assert_eq!(
            registry.set_verified_issuer(TEST_ADMIN, BOB, true).await,
            Err(RegistryError::FeatureDisabled(Feature::IssuerRegistry))
        );
        assert!(!registry.is_verified_issuer(TEST_ADMIN).await);

        registry.submit_project(ALICE, resume_ai()).await.unwrap();
        registry.upvote_project(BOB, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_certifier_variant_records_and_reads_only() {
        let registry = create_test_service_with(RegistryConfig::for_variant(
            TEST_ADMIN,
            ContractVariant::SkillCertifier,
        ))
        .await
        .unwrap();

        let id = registry
            .add_project(
                ALICE,
                "Portfolio".into(),
                "Static site".into(),
                vec!["html".into(), "css".into()],
            )
            .await
            .unwrap();
        assert_eq!(id, 1);

        let records = registry.get_projects(ALICE).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Portfolio");
        assert_eq!(records[0].description, "Static site");
        assert_eq!(records[0].skills, vec!["html", "css"]);

        // Same record through the registry ABI.
        assert_eq!(registry.get_project(1).await.unwrap().github_link, "Static site");
        assert_eq!(registry.get_vote_count(1).await.unwrap(), 0);

        assert_eq!(
            registry.upvote_project(BOB, 1).await,
            Err(RegistryError::FeatureDisabled(Feature::Voting))
        );
        assert_eq!(
            registry.store_file_hash(ALICE, 1, Hash::new([1; 32])).await,
            Err(RegistryError::FeatureDisabled(Feature::FileHash))
        );
    }

    #[tokio::test]
    async fn test_overwrite_policy_keeps_last_hash() {
        let registry = create_test_service_with(
            RegistryConfig::for_variant(TEST_ADMIN, ContractVariant::MultiDomain)
                .with_file_hash_policy(FileHashPolicy::Overwrite),
        )
        .await
        .unwrap();
        registry.submit_project(ALICE, resume_ai()).await.unwrap();

        let first = keccak256(b"v1");
        let second = keccak256(b"v2");
        registry.store_file_hash(ALICE, 1, first).await.unwrap();
        registry.store_file_hash(ALICE, 1, second).await.unwrap();
        assert_eq!(registry.get_file_hash(1).await.unwrap(), second);

        // Ownership still enforced.
        assert!(registry.store_file_hash(BOB, 1, first).await.is_err());
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_votes_count_each_voter_once() {
        let registry = Arc::new(create_test_service().await.unwrap());
        registry.submit_project(ALICE, resume_ai()).await.unwrap();

        let mut handles = Vec::new();
        for voter in 1..=20u8 {
            for _ in 0..3 {
                let registry = Arc::clone(&registry);
                handles.push(tokio::spawn(async move {
                    registry.upvote_project(Address::new([voter; 20]), 1).await
                }));
            }
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 20);
        assert_eq!(registry.get_vote_count(1).await.unwrap(), 20);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_get_dense_ids() {
        let registry = Arc::new(create_test_service().await.unwrap());

        let handles: Vec<_> = (0..32u8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    let owner = Address::new([i % 4 + 1; 20]);
                    registry
                        .submit_project(owner, NewProject::new(format!("p{i}"), "", ["t"]))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<u64>>());
        assert_eq!(registry.get_total_projects().await, 32);

        let mut owned = 0;
        for owner in 1..=4u8 {
            let of = registry.get_projects_of(Address::new([owner; 20])).await;
            assert!(of.windows(2).all(|w| w[0] < w[1]));
            owned += of.len();
        }
        assert_eq!(owned, 32);
    }
}
