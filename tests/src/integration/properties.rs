//! # Registry Properties
//!
//! Property tests over the full service: arbitrary call sequences from a
//! small pool of callers, checked against the observable contract.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sc_01_project_registry::config::{ContractVariant, FileHashPolicy, RegistryConfig};
    use sc_01_project_registry::domain::NewProject;
    use sc_01_project_registry::errors::RegistryError;
    use sc_01_project_registry::ports::ProjectRegistryApi;
    use sc_01_project_registry::service::{
        create_test_service, create_test_service_with, TEST_ADMIN,
    };
    use sc_02_project_catalog::prelude::{classify_tags, SubmissionDraft};
    use shared_types::{Address, Domain, Hash};
    use tokio::runtime::Runtime;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    fn caller() -> impl Strategy<Value = Address> {
        (1u8..=5).prop_map(|b| Address::new([b; 20]))
    }

    fn new_project() -> impl Strategy<Value = NewProject> {
        (
            "[a-zA-Z0-9 ]{0,16}",
            "(https://github.com/[a-z]{1,8})?",
            prop::collection::vec("[a-z]{1,6}", 0..4),
        )
            .prop_map(|(name, github_link, tags)| NewProject {
                name,
                github_link,
                tags,
            })
    }

    fn domain() -> impl Strategy<Value = Domain> {
        prop::sample::select(Domain::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// After N submissions the total is N and every record reads back
        /// exactly, owned by its submitter, listed in creation order.
        #[test]
        fn prop_submissions_read_back(
            calls in prop::collection::vec((caller(), new_project()), 0..12)
        ) {
            runtime().block_on(async {
                let registry = create_test_service().await.unwrap();
                for (who, project) in &calls {
                    registry.submit_project(*who, project.clone()).await.unwrap();
                }

                prop_assert_eq!(registry.get_total_projects().await, calls.len() as u64);
                for (k, (who, project)) in calls.iter().enumerate() {
                    let summary = registry.get_project(k as u64 + 1).await.unwrap();
                    prop_assert_eq!(&summary.name, &project.name);
                    prop_assert_eq!(&summary.github_link, &project.github_link);
                    prop_assert_eq!(&summary.tags, &project.tags);
                    prop_assert_eq!(summary.owner, *who);
                }

                for b in 1u8..=5 {
                    let owner = Address::new([b; 20]);
                    let expected: Vec<u64> = calls
                        .iter()
                        .enumerate()
                        .filter(|(_, (who, _))| *who == owner)
                        .map(|(k, _)| k as u64 + 1)
                        .collect();
                    prop_assert_eq!(registry.get_projects_of(owner).await, expected);
                }

                let n = calls.len() as u64;
                let zero_is_out_of_range = matches!(
                    registry.get_project(0).await,
                    Err(RegistryError::OutOfRange { .. })
                );
                let past_end_is_out_of_range = matches!(
                    registry.get_project(n + 1).await,
                    Err(RegistryError::OutOfRange { .. })
                );
                prop_assert!(zero_is_out_of_range);
                prop_assert!(past_end_is_out_of_range);
                Ok(())
            })?;
        }

        /// The tally equals the number of distinct voters; repeats fail
        /// without changing it.
        #[test]
        fn prop_one_vote_per_address(voters in prop::collection::vec(caller(), 1..24)) {
            runtime().block_on(async {
                let registry = create_test_service().await.unwrap();
                registry.submit_project(TEST_ADMIN, NewProject::default()).await.unwrap();

                let mut seen: Vec<Address> = Vec::new();
                for voter in &voters {
                    let before = registry.get_vote_count(1).await.unwrap();
                    let result = registry.upvote_project(*voter, 1).await;
                    let after = registry.get_vote_count(1).await.unwrap();

                    if seen.contains(voter) {
                        let rejected = matches!(result, Err(RegistryError::AlreadyVoted { .. }));
                        prop_assert!(rejected);
                        prop_assert_eq!(after, before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(after, before + 1);
                        seen.push(*voter);
                    }
                }
                prop_assert_eq!(registry.get_vote_count(1).await.unwrap(), seen.len() as u64);
                Ok(())
            })?;
        }

        /// Zero until the first store; write-once keeps the first hash,
        /// overwrite keeps the last.
        #[test]
        fn prop_file_hash_policy(
            hashes in prop::collection::vec(
                any::<[u8; 32]>().prop_filter("non-zero", |b| b != &[0u8; 32]),
                1..5,
            ),
            overwrite in any::<bool>(),
        ) {
            runtime().block_on(async {
                let policy = if overwrite {
                    FileHashPolicy::Overwrite
                } else {
                    FileHashPolicy::WriteOnce
                };
                let registry = create_test_service_with(
                    RegistryConfig::for_variant(TEST_ADMIN, ContractVariant::MultiDomain)
                        .with_file_hash_policy(policy),
                )
                .await
                .unwrap();
                let owner = Address::new([1; 20]);
                registry.submit_project(owner, NewProject::default()).await.unwrap();
                prop_assert_eq!(registry.get_file_hash(1).await.unwrap(), Hash::ZERO);

                for (i, bytes) in hashes.iter().enumerate() {
                    let result = registry.store_file_hash(owner, 1, Hash::new(*bytes)).await;
                    if i == 0 || overwrite {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert_eq!(result, Err(RegistryError::AlreadySet { token_id: 1 }));
                    }
                }

                let expected = if overwrite { hashes[hashes.len() - 1] } else { hashes[0] };
                prop_assert_eq!(registry.get_file_hash(1).await.unwrap(), Hash::new(expected));
                Ok(())
            })?;
        }

        /// A prepared submission's domain survives the registry round trip.
        #[test]
        fn prop_domain_marker_recovered(
            d in domain(),
            tags in prop::collection::vec("[a-z]{1,6}", 0..4),
        ) {
            let draft = SubmissionDraft { tags, domain: d, ..SubmissionDraft::default() };
            let prepared = draft.prepare();
            let (recovered, _) = classify_tags(&prepared.project.tags);
            // A user tag spelling an earlier marker wins the scan.
            let first_marker = prepared.project.tags.iter().find_map(|t| Domain::from_tag(t));
            prop_assert_eq!(Some(recovered), first_marker);
            prop_assert_eq!(prepared.project.tags.last().map(String::as_str), Some(d.as_tag()));
        }
    }
}
