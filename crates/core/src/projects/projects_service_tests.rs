//! Tests for the project service and its ledger cascades.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pointfolio_feeds::PointBalance;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::constants::{CUSTOM_ASSETS_KEY, PROJECTS_KEY};
    use crate::errors::{Error, ValidationError};
    use crate::ledger::LedgerAsset;
    use crate::projects::{NewProject, ProjectService, ProjectServiceTrait, ProjectUpdate};
    use crate::state::test_support::{store_with, MockStateRepository};
    use crate::state::StateStore;

    fn asset(name: &str, quantity: Decimal) -> LedgerAsset {
        LedgerAsset {
            id: format!("a-{name}"),
            name: name.to_string(),
            quantity,
            price: Decimal::ZERO,
            has_project: false,
        }
    }

    async fn seed_assets(store: &StateStore, assets: Vec<LedgerAsset>) {
        store
            .mutate(move |state| {
                state.assets = assets;
                Ok(())
            })
            .await
            .unwrap();
    }

    fn setup() -> (Arc<MockStateRepository>, Arc<StateStore>, ProjectService) {
        let repo = Arc::new(MockStateRepository::new());
        let store = store_with(&repo);
        let service = ProjectService::new(store.clone());
        (repo, store, service)
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_prices_matching_assets() {
        let (_repo, store, service) = setup();
        seed_assets(&store, vec![asset("extended", dec!(8000))]).await;

        let project = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();

        assert_eq!(project.point_price, dec!(0.01));
        let assets = store.load_assets().unwrap();
        assert!(assets[0].has_project);
        assert_eq!(assets[0].price, dec!(0.01));
        assert_eq!(assets[0].value(), dec!(80));
    }

    #[tokio::test]
    async fn test_create_overwrites_by_name_and_keeps_id() {
        let (_repo, _store, service) = setup();
        let first = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();
        let second = service
            .create_project(NewProject::new(" extended", "200", "10", "1000"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let projects = service.get_projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].point_price, dec!(0.02));
    }

    #[tokio::test]
    async fn test_invalid_create_is_rejected_without_writing() {
        let (repo, _store, service) = setup();

        let err = service
            .create_project(NewProject::new("extended", "100", "0", "1000"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(repo.write_count(), 0);
        assert!(service.get_projects().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_reconciles_latest_points_snapshot() {
        let (_repo, store, service) = setup();
        store
            .mutate(|state| {
                state.points = Some(vec![PointBalance::new("extended", dec!(8000))]);
                Ok(())
            })
            .await
            .unwrap();
        assert!(store.load_assets().unwrap().is_empty());

        service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();

        let assets = store.load_assets().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "extended");
        assert_eq!(assets[0].quantity, dec!(8000));
        assert!(assets[0].has_project);
        assert_eq!(assets[0].value(), dec!(80));
    }

    #[tokio::test]
    async fn test_overflowing_price_is_rejected_without_writing() {
        let (repo, store, service) = setup();
        seed_assets(&store, vec![asset("big", dec!(1))]).await;
        let writes = repo.write_count();

        let err = service
            .create_project(NewProject::new(
                "big",
                "10000000000000000000000000000",
                "100",
                "0.001",
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(repo.write_count(), writes);
        assert!(service.get_projects().unwrap().is_empty());
        assert!(!store.load_assets().unwrap()[0].has_project);
    }

    #[tokio::test]
    async fn test_update_into_overflowing_price_is_rejected() {
        let (repo, _store, service) = setup();
        let project = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();
        let projects_before = repo.raw(PROJECTS_KEY);

        let result = service
            .update_project(ProjectUpdate {
                id: project.id.clone(),
                fdv: Some("10000000000000000000000000000".to_string()),
                total_points: Some("0.001".to_string()),
                percent: Some("100".to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repo.raw(PROJECTS_KEY), projects_before);
    }

    // ==================== Update ====================

    #[tokio::test]
    async fn test_update_reprices_ledger() {
        let (_repo, store, service) = setup();
        seed_assets(&store, vec![asset("extended", dec!(8000))]).await;
        let project = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();

        let updated = service
            .update_project(ProjectUpdate {
                id: project.id.clone(),
                fdv: Some("1000".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.point_price, dec!(0.1));
        assert_eq!(store.load_assets().unwrap()[0].price, dec!(0.1));
    }

    #[tokio::test]
    async fn test_rename_cascades_in_one_commit() {
        let (repo, store, service) = setup();
        seed_assets(
            &store,
            vec![asset("alpha", dec!(50)), asset("other", dec!(1))],
        )
        .await;
        let project = service
            .create_project(NewProject::new("alpha", "100", "10", "1000"))
            .await
            .unwrap();
        let writes_before = repo.write_count();

        let renamed = service
            .update_project(ProjectUpdate {
                id: project.id.clone(),
                name: Some("beta".to_string()),
                percent: Some("20".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(renamed.id, project.id);
        assert_eq!(renamed.point_price, dec!(0.02));

        let writes = repo.writes();
        assert_eq!(writes.len(), writes_before + 1);
        let keys: Vec<_> = writes[writes_before]
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(keys, vec![PROJECTS_KEY, CUSTOM_ASSETS_KEY]);

        let state = store.load().unwrap();
        assert!(!state.projects.contains("alpha"));
        assert!(state.projects.contains("beta"));
        let beta = &state.assets[0];
        assert_eq!(beta.name, "beta");
        assert_eq!(beta.id, "a-alpha");
        assert_eq!(beta.quantity, dec!(50));
        assert!(beta.has_project);
        assert_eq!(beta.price, dec!(0.02));
        assert!(!state.assets[1].has_project);
    }

    #[tokio::test]
    async fn test_rename_onto_existing_project_rejected() {
        let (repo, _store, service) = setup();
        let alpha = service
            .create_project(NewProject::new("alpha", "100", "10", "1000"))
            .await
            .unwrap();
        service
            .create_project(NewProject::new("beta", "100", "10", "1000"))
            .await
            .unwrap();
        let writes_before = repo.write_count();

        let err = service
            .update_project(ProjectUpdate {
                id: alpha.id,
                name: Some("beta".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert_eq!(repo.write_count(), writes_before);
        assert_eq!(service.get_projects().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_project_not_found() {
        let (_repo, _store, service) = setup();
        let err = service
            .update_project(ProjectUpdate {
                id: "missing".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_state_unmodified() {
        let (repo, store, service) = setup();
        seed_assets(&store, vec![asset("extended", dec!(8000))]).await;
        let project = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();
        let assets_before = repo.raw(CUSTOM_ASSETS_KEY);
        let projects_before = repo.raw(PROJECTS_KEY);

        let result = service
            .update_project(ProjectUpdate {
                id: project.id,
                name: Some("renamed".to_string()),
                fdv: Some("NaN".to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repo.raw(CUSTOM_ASSETS_KEY), assets_before);
        assert_eq!(repo.raw(PROJECTS_KEY), projects_before);
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_unprices_matched_assets() {
        let (_repo, store, service) = setup();
        seed_assets(&store, vec![asset("extended", dec!(8000))]).await;
        let project = service
            .create_project(NewProject::new("extended", "100", "10", "1000"))
            .await
            .unwrap();

        let deleted = service.delete_project(&project.id).await.unwrap();

        assert_eq!(deleted.name, "extended");
        let state = store.load().unwrap();
        assert!(state.projects.is_empty());
        assert_eq!(state.assets.len(), 1);
        assert!(!state.assets[0].has_project);
        assert_eq!(state.assets[0].price, Decimal::ZERO);
        assert_eq!(state.assets[0].quantity, dec!(8000));
    }

    #[tokio::test]
    async fn test_delete_unknown_project_not_found() {
        let (repo, _store, service) = setup();
        let err = service.delete_project("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(repo.write_count(), 0);
    }
}
