    use super::*;
    use crate::model::{Language, LanguageResource};
    use crate::store::{JsonStore, SortDirection};

    fn languages() -> Repository<Language> {
        Repository::new(
            Arc::new(JsonStore::in_memory()),
            CollectionConfig::new("Languages"),
        )
    }

    fn language(name: &str, culture: &str) -> Language {
        Language {
            name: name.to_string(),
            flag: culture.to_string(),
            culture: culture.to_string(),
            ..Language::default()
        }
    }

    #[test]
    fn parse_sort_accepts_pairs_and_rejects_bare_fields() {
        let keys = parse_sort(Some("name:asc")).expect("single");
        assert_eq!(keys, vec![SortKey::new("name", SortDirection::Asc)]);

        let keys = parse_sort(Some("name:asc,id:DESC")).expect("pair");
        assert_eq!(
            keys,
            vec![
                SortKey::new("name", SortDirection::Asc),
                SortKey::new("id", SortDirection::Desc),
            ]
        );

        assert!(parse_sort(None).expect("none").is_empty());
        assert!(parse_sort(Some("   ")).expect("blank").is_empty());

        let err = parse_sort(Some("name")).unwrap_err();
        assert_eq!(err.to_string(), "sorting column format error : name");
        assert!(parse_sort(Some("name:asc:x")).is_err());
        assert!(parse_sort(Some("name:sideways")).is_err());
    }

    #[test]
    fn pagination_window_requires_positive_page_and_limit() {
        assert_eq!(Pagination::new(None, 2, 10).window(), Some((10, 10)));
        assert_eq!(Pagination::new(None, 1, 5).window(), Some((0, 5)));
        assert_eq!(Pagination::new(None, 0, 10).window(), None);
        assert_eq!(Pagination::new(None, 2, 0).window(), None);

        let lenient = Pagination {
            sort: None,
            page: Some("3abc".to_string()),
            limit: Some("nope".to_string()),
        };
        assert_eq!(lenient.page(), 3);
        assert_eq!(lenient.limit(), 0);
        assert_eq!(lenient.window(), None);
    }

    #[tokio::test]
    async fn insert_then_get_exposes_public_id_only() {
        let repo = languages();
        let created = repo.insert(&language("English", "gb")).await.expect("insert");
        let id = created.id.clone().expect("id populated");

        let fetched = repo.get_by_id(&id).await.expect("get");
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "English");

        let raw = to_document(&fetched).expect("to document");
        assert!(!raw.contains_key("id"));
        assert!(!raw.contains_key("_id"));
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_and_malformed_ids_as_not_found() {
        let repo = languages();
        let missing = ObjectId::generate().expect("id");

        let err = repo.get_by_id(missing.as_str()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "{:?}", err);

        let err = repo.get_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn list_applies_sort_and_window() {
        let repo = languages();
        repo.insert_many(&[
            language("French", "fr"),
            language("English", "gb"),
            language("German", "de"),
        ])
        .await
        .expect("insert many");

        let page = Pagination::new(Some("name:asc"), 1, 2);
        let listed = repo.list(Filter::All, None, Some(&page)).await.expect("list");
        let names: Vec<&str> = listed.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["English", "French"]);

        let page = Pagination::new(Some("name:desc"), 2, 2);
        let listed = repo.list(Filter::All, None, Some(&page)).await.expect("list");
        let names: Vec<&str> = listed.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["English"]);

        let bad = Pagination::new(Some("name"), 1, 2);
        assert!(matches!(
            repo.list(Filter::All, None, Some(&bad)).await,
            Err(ApiError::UnprocessableEntity { .. })
        ));
    }

    #[tokio::test]
    async fn update_merges_by_default_and_replaces_on_request() {
        let repo = languages();
        let mut created = repo.insert(&language("English", "gb")).await.expect("insert");
        repo.push_to_array_field(&created, "resources", "r1")
            .await
            .expect("push");

        created.name = "British English".to_string();
        let merged = repo.update(&created, false).await.expect("merge");
        assert_eq!(merged.name, "British English");
        assert_eq!(merged.resources, Some(vec!["r1".to_string()]));

        let replaced = repo.update(&created, true).await.expect("replace");
        assert_eq!(replaced.resources, None);
        assert_eq!(replaced.id, created.id);
    }

    #[tokio::test]
    async fn update_without_target_is_not_found() {
        let repo = languages();
        let mut ghost = language("Ghost", "gh");
        ghost.id = Some(ObjectId::generate().expect("id").to_string());
        assert!(matches!(
            repo.update(&ghost, false).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn save_inserts_or_updates() {
        let repo: Repository<LanguageResource> = Repository::new(
            Arc::new(JsonStore::in_memory()),
            CollectionConfig::new("LanguageResources"),
        );
        let mut res = repo
            .save(&LanguageResource {
                id: None,
                key: "hello".to_string(),
                value: "Hello".to_string(),
            })
            .await
            .expect("insert");
        assert!(res.id.is_some());

        res.value = "Hi".to_string();
        let saved = repo.save(&res).await.expect("update");
        assert_eq!(saved.value, "Hi");
        assert_eq!(repo.count(&Filter::All).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn remove_many_skips_malformed_ids() {
        let repo = languages();
        let created = repo
            .insert_many(&[language("English", "gb"), language("French", "fr")])
            .await
            .expect("insert many");
        let mut ids: Vec<String> = created.iter().filter_map(|l| l.id.clone()).collect();
        ids.push("garbage".to_string());

        assert_eq!(repo.remove_many(&ids).await.expect("remove many"), 2);
        assert_eq!(repo.remove_many(&["garbage".to_string()]).await.expect("noop"), 0);
    }

    #[tokio::test]
    async fn unset_and_pull_touch_only_named_fields() {
        let repo = languages();
        let created = repo.insert(&language("English", "gb")).await.expect("insert");
        let id = created.id.clone().expect("id");
        repo.push_to_array_field(&created, "resources", "r1")
            .await
            .expect("push r1");
        repo.push_to_array_field(&created, "resources", "r2")
            .await
            .expect("push r2");
        repo.pull_from_array_field(&created, "resources", "r1")
            .await
            .expect("pull");
        assert_eq!(
            repo.get_by_id(&id).await.expect("get").resources,
            Some(vec!["r2".to_string()])
        );

        repo.unset_fields(&id, &["resources"]).await.expect("unset");
        let after = repo.get_by_id(&id).await.expect("get");
        assert_eq!(after.resources, None);
        assert_eq!(after.name, "English");
    }

    #[tokio::test]
    async fn sort_by_public_id_uses_storage_id() {
        let repo = languages();
        let created = repo
            .insert_many(&[language("B", "bb"), language("A", "aa")])
            .await
            .expect("insert many");
        let mut expected: Vec<String> = created.iter().filter_map(|l| l.id.clone()).collect();
        expected.sort();

        let page = Pagination {
            sort: Some("id:asc".to_string()),
            ..Pagination::default()
        };
        let listed = repo.list(Filter::All, None, Some(&page)).await.expect("list");
        let ids: Vec<String> = listed.iter().filter_map(|l| l.id.clone()).collect();
        assert_eq!(ids, expected);
    }
