//! # Catalog Flows
//!
//! The catalog read model and submission path over a live registry.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use sc_01_project_registry::adapters::ManualClock;
    use sc_01_project_registry::config::{ContractVariant, Feature, RegistryConfig};
    use sc_01_project_registry::errors::RegistryError;
    use sc_01_project_registry::ports::ProjectRegistryApi;
    use sc_01_project_registry::service::{
        create_test_service_with, RegistryService, TEST_ADMIN, TEST_GENESIS_TIME,
    };
    use sc_02_project_catalog::prelude::*;
    use shared_bus::InMemoryEventBus;
    use shared_types::{keccak256, Address, Domain};

    type Registry = RegistryService<ManualClock, InMemoryEventBus>;

    const ALICE: Address = Address::new([0xA1; 20]);
    const BOB: Address = Address::new([0xB0; 20]);

    /// Catalog plus the clock driving its registry.
    async fn catalog() -> (ProjectCatalog<Registry>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(TEST_GENESIS_TIME));
        let registry = RegistryService::deploy(
            RegistryConfig::for_variant(TEST_ADMIN, ContractVariant::MultiDomain),
            Arc::clone(&clock),
            Arc::new(InMemoryEventBus::new()),
        )
        .await
        .unwrap();
        (ProjectCatalog::new(Arc::new(registry)), clock)
    }

    fn draft(title: &str, domain: Domain, tags: &[&str]) -> SubmissionDraft {
        SubmissionDraft {
            title: title.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            domain,
            ..SubmissionDraft::default()
        }
    }

    // =============================================================================
    // SUBMISSION
    // =============================================================================

    #[tokio::test]
    async fn test_submission_with_document_is_attested() {
        let (catalog, _) = catalog().await;
        let document = b"%PDF-1.7 diploma".to_vec();
        let mut d = draft("BSc Computer Science", Domain::University, &[" cs ", "", "cs"]);
        d.document = Some(document.clone());

        let outcome = catalog.submit(ALICE, &d).await.unwrap();
        assert_eq!(outcome.token_id, 1);
        assert_eq!(outcome.file_hash, Some(keccak256(&document)));

        let registry = catalog.registry();
        assert_eq!(
            registry.get_file_hash(1).await.unwrap(),
            keccak256(&document)
        );
        // Normalized tags, then the domain marker.
        assert_eq!(registry.get_project(1).await.unwrap().tags, vec!["cs", "university"]);

        let listing = catalog.listing(1).await.unwrap();
        assert_eq!(listing.domain, Domain::University);
        assert_eq!(listing.tags, vec!["cs"]);
        assert_eq!(listing.github_link, None);
    }

    #[tokio::test]
    async fn test_blank_title_becomes_untitled() {
        let (catalog, _) = catalog().await;
        catalog
            .submit(ALICE, &draft("   ", Domain::Gaming, &[]))
            .await
            .unwrap();
        assert_eq!(catalog.listing(1).await.unwrap().name, UNTITLED_PROJECT);
    }

    #[tokio::test]
    async fn test_failed_attestation_reports_created_project() {
        let registry = create_test_service_with(RegistryConfig::for_variant(
            TEST_ADMIN,
            ContractVariant::SkillCertifier,
        ))
        .await
        .unwrap();
        let catalog = ProjectCatalog::new(Arc::new(registry));

        let mut d = draft("Contract", Domain::Legal, &["nda"]);
        d.document = Some(b"signed".to_vec());

        let err = catalog.submit(ALICE, &d).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::AttestationFailed {
                token_id: 1,
                source: RegistryError::FeatureDisabled(Feature::FileHash),
            }
        );
        assert_eq!(err.kind(), "FeatureDisabled");
        assert_eq!(catalog.registry().get_total_projects().await, 1);
    }

    // =============================================================================
    // READ MODEL
    // =============================================================================

    #[tokio::test]
    async fn test_explore_search_and_sort() {
        let (catalog, clock) = catalog().await;
        catalog
            .submit(ALICE, &draft("Chess Engine", Domain::Developer, &["rust"]))
            .await
            .unwrap();
        clock.advance(10);
        catalog
            .submit(BOB, &draft("Speedrun Record", Domain::Gaming, &["any%"]))
            .await
            .unwrap();
        clock.advance(10);
        catalog
            .submit(ALICE, &draft("Chess Opening Paper", Domain::Research, &["chess"]))
            .await
            .unwrap();

        let registry = catalog.registry();
        registry.upvote_project(BOB, 2).await.unwrap();
        registry.upvote_project(ALICE, 2).await.unwrap();
        registry.upvote_project(BOB, 3).await.unwrap();

        let all = catalog.explore().await;
        assert_eq!(all.iter().map(|l| l.token_id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let chess = catalog
            .search(&ProjectQuery {
                search: "CHESS".into(),
                ..ProjectQuery::default()
            })
            .await;
        // Newest first by default.
        assert_eq!(chess.iter().map(|l| l.token_id).collect::<Vec<_>>(), vec![3, 1]);

        let by_votes = catalog
            .search(&ProjectQuery {
                sort: SortOrder::Votes,
                ..ProjectQuery::default()
            })
            .await;
        assert_eq!(by_votes.iter().map(|l| l.votes).collect::<Vec<_>>(), vec![2, 1, 0]);

        let gaming = catalog
            .search(&ProjectQuery {
                domain: DomainFilter::Only(Domain::Gaming),
                ..ProjectQuery::default()
            })
            .await;
        assert_eq!(gaming.len(), 1);
        assert_eq!(gaming[0].owner, BOB);
    }

    #[tokio::test]
    async fn test_dashboard_and_portfolio() {
        let (catalog, clock) = catalog().await;
        catalog
            .submit(ALICE, &draft("One", Domain::Artist, &[]))
            .await
            .unwrap();
        clock.advance(1);
        catalog
            .submit(ALICE, &draft("Two", Domain::Artist, &[]))
            .await
            .unwrap();
        clock.advance(1);
        catalog
            .submit(ALICE, &draft("Three", Domain::Legal, &[]))
            .await
            .unwrap();
        catalog.registry().upvote_project(BOB, 1).await.unwrap();

        let mine = catalog.my_projects(ALICE).await;
        assert_eq!(mine.iter().map(|l| l.token_id).collect::<Vec<_>>(), vec![3, 2, 1]);

        assert_eq!(
            catalog.dashboard(Some(ALICE)).await,
            DashboardStats {
                total_projects: 3,
                my_projects: 3,
                total_votes: 1,
            }
        );
        assert_eq!(catalog.dashboard(None).await.my_projects, 0);

        assert_eq!(
            catalog.portfolio(ALICE).await,
            PortfolioStats {
                projects: 3,
                total_votes: 1,
                domains: 2,
            }
        );
        assert_eq!(catalog.portfolio(BOB).await, PortfolioStats::default());
    }

    #[tokio::test]
    async fn test_listing_out_of_range() {
        let (catalog, _) = catalog().await;
        assert!(matches!(
            catalog.listing(1).await,
            Err(CatalogError::Registry(RegistryError::OutOfRange { token_id: 1, total: 0 }))
        ));
    }

    // =============================================================================
    // FORMS
    // =============================================================================

    #[test]
    fn test_forms_gate_submission_drafts() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "  ".to_string());

        for domain in Domain::ALL {
            match validate_form(domain, &fields, true) {
                Err(CatalogError::MissingFields(missing)) => assert!(!missing.is_empty()),
                other => panic!("{domain}: blank title accepted: {other:?}"),
            }
        }
    }
}
