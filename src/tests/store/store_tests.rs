    use super::*;
    use serde_json::{Value, json};

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn names(docs: &[Document]) -> Vec<&str> {
        docs.iter()
            .map(|d| d.get("name").and_then(Value::as_str).unwrap_or(""))
            .collect()
    }

    #[test]
    fn filter_eq_addresses_nested_paths_and_array_elements() {
        let user = doc(json!({
            "providers": {"local": {"username": "a@b.c"}},
            "rights": ["R_API_USER_R", "R_API_USER_U"]
        }));

        assert!(Filter::eq("providers.local.username", "a@b.c").matches(&user));
        assert!(!Filter::eq("providers.local.username", "x@b.c").matches(&user));
        assert!(Filter::eq("rights", "R_API_USER_U").matches(&user));
        assert!(!Filter::eq("rights", "R_API_USER_D").matches(&user));
        assert!(Filter::eq("missing", Value::Null).matches(&user));
    }

    #[test]
    fn search_is_case_insensitive_and_blank_matches_everything() {
        let a = doc(json!({"email": "alice@example.com", "lastname": "Martin"}));
        let b = doc(json!({"email": "bob@example.com", "lastname": "Durand"}));

        let f = Filter::search(&["email", "lastname"], Some("MART")).expect("regex");
        assert!(f.matches(&a));
        assert!(!f.matches(&b));

        let all = Filter::search(&["email"], Some("  ")).expect("regex");
        assert!(matches!(all, Filter::All));
        assert!(Filter::search(&["email"], Some("(")).is_err());
    }

    #[test]
    fn projection_include_keeps_id_unless_dropped() {
        let d = doc(json!({"_id": "x", "key": "k", "value": "v"}));

        let kept = Projection::include(&["key"]).apply(d.clone());
        assert_eq!(Value::Object(kept), json!({"_id": "x", "key": "k"}));

        let dropped = Projection::include(&["key", "value"]).without_id().apply(d.clone());
        assert_eq!(Value::Object(dropped), json!({"key": "k", "value": "v"}));

        let excluded = Projection::exclude(&["value"]).apply(d);
        assert_eq!(Value::Object(excluded), json!({"_id": "x", "key": "k"}));
    }

    #[test]
    fn find_query_sorts_before_windowing() {
        let docs: Vec<Document> = ["delta", "alpha", "charlie", "bravo"]
            .iter()
            .map(|n| doc(json!({"name": n})))
            .collect();

        let q = FindQuery {
            sort: vec![SortKey::new("name", SortDirection::Asc)],
            ..FindQuery::default()
        }
        .window(1, 2);
        assert_eq!(names(&q.run(&docs)), vec!["bravo", "charlie"]);

        let q = FindQuery {
            sort: vec![SortKey::new("name", SortDirection::Desc)],
            ..FindQuery::default()
        };
        assert_eq!(names(&q.run(&docs)), vec!["delta", "charlie", "bravo", "alpha"]);

        // Without sort, insertion order is kept.
        assert_eq!(
            names(&FindQuery::default().run(&docs)),
            vec!["delta", "alpha", "charlie", "bravo"]
        );
    }

    #[test]
    fn push_creates_array_and_pull_removes_every_copy() {
        let mut d = doc(json!({"name": "English"}));

        Update::Push {
            field: "resources".to_string(),
            value: json!("r1"),
        }
        .apply(&mut d)
        .expect("push");
        Update::Push {
            field: "resources".to_string(),
            value: json!("r1"),
        }
        .apply(&mut d)
        .expect("push again");
        assert_eq!(d["resources"], json!(["r1", "r1"]));

        Update::Pull {
            field: "resources".to_string(),
            value: json!("r1"),
        }
        .apply(&mut d)
        .expect("pull");
        assert_eq!(d["resources"], json!([]));

        let err = Update::Push {
            field: "name".to_string(),
            value: json!("x"),
        }
        .apply(&mut d)
        .unwrap_err();
        assert!(err.to_string().contains("non-array"), "{}", err);
    }

    #[test]
    fn replace_keeps_storage_id() {
        let mut d = doc(json!({"_id": "abc", "name": "old", "flag": "gb"}));
        Update::Replace(doc(json!({"_id": "zzz", "name": "new"})))
            .apply(&mut d)
            .expect("replace");
        assert_eq!(Value::Object(d), json!({"_id": "abc", "name": "new"}));
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_update_touches_first_match() {
        let store = JsonStore::in_memory();
        let ids = store
            .insert(
                "Languages",
                vec![doc(json!({"name": "a"})), doc(json!({"name": "a"}))],
            )
            .await
            .expect("insert");
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ids[0].as_str().len(), 24);

        let matched = store
            .update(
                "Languages",
                &Filter::eq("name", "a"),
                &Update::Set(doc(json!({"flag": "fr"}))),
            )
            .await
            .expect("update");
        assert_eq!(matched, 1);
        assert_eq!(
            store
                .count("Languages", &Filter::eq("flag", "fr"))
                .await
                .expect("count"),
            1
        );

        let deleted = store
            .delete("Languages", &Filter::ids(&ids))
            .await
            .expect("delete");
        assert_eq!(deleted, 2);
        assert_eq!(
            store.count("Languages", &Filter::All).await.expect("count"),
            0
        );
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let store = JsonStore::in_memory();
        let id = ObjectId::generate().expect("id");
        store
            .insert("Users", vec![doc(json!({"_id": id.as_str()}))])
            .await
            .expect("first insert");
        let err = store
            .insert("Users", vec![doc(json!({"_id": id.as_str()}))])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("duplicate id"), "{}", err);
    }

    #[tokio::test]
    async fn json_store_survives_reopen() {
        let tmp = tempfile::tempdir().expect("tempdir");

        let store = JsonStore::open(tmp.path()).expect("open");
        let ids = store
            .insert("LanguageResources", vec![doc(json!({"key": "hello", "value": "Hello"}))])
            .await
            .expect("insert");
        assert!(tmp.path().join("LanguageResources.json").exists());
        drop(store);

        let reopened = JsonStore::open(tmp.path()).expect("reopen");
        let found = reopened
            .find("LanguageResources", &FindQuery::new(Filter::id(&ids[0])))
            .await
            .expect("find");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["key"], json!("hello"));
    }

    #[tokio::test]
    async fn unknown_collection_reads_empty() {
        let store = JsonStore::in_memory();
        let found = store
            .find("Nope", &FindQuery::default())
            .await
            .expect("find");
        assert!(found.is_empty());
        assert_eq!(
            store
                .update("Nope", &Filter::All, &Update::Unset(vec!["x".to_string()]))
                .await
                .expect("update"),
            0
        );
    }

    #[tokio::test]
    async fn failed_persist_leaves_collection_untouched() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::open(tmp.path()).expect("open");
        let ids = store
            .insert("Languages", vec![doc(json!({"name": "English"}))])
            .await
            .expect("insert");

        // A non-empty directory where the collection file belongs makes every rename fail.
        let file = tmp.path().join("Languages.json");
        std::fs::remove_file(&file).expect("remove collection file");
        std::fs::create_dir(&file).expect("create blocking dir");
        std::fs::write(file.join("x"), b"x").expect("fill blocking dir");

        assert!(
            store
                .insert("Languages", vec![doc(json!({"name": "Deutsch"}))])
                .await
                .is_err()
        );
        assert!(
            store
                .update(
                    "Languages",
                    &Filter::id(&ids[0]),
                    &Update::Set(doc(json!({"name": "Changed"}))),
                )
                .await
                .is_err()
        );
        assert!(store.delete("Languages", &Filter::All).await.is_err());

        let found = store
            .find("Languages", &FindQuery::default())
            .await
            .expect("find");
        assert_eq!(names(&found), vec!["English"]);

        let leftovers: Vec<String> = std::fs::read_dir(tmp.path())
            .expect("read dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "{:?}", leftovers);
    }
