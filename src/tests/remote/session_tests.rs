    use super::*;

    fn session(rights: &[&str]) -> Session {
        Session {
            base_url: "http://127.0.0.1:8080".to_string(),
            username: "ada@example.com".to_string(),
            token: "access".to_string(),
            refresh: Some("id.refresh".to_string()),
            rights: rights.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn can_requires_one_matching_right() {
        let s = session(&[rights::R_API_USER_R]);
        assert!(s.can(&[rights::R_API_USER_R, rights::R_API_USER_U]));
        assert!(!s.can(&[rights::R_API_LANGUAGE_R]));
        assert!(!s.can(&[]));
    }

    #[test]
    fn save_load_and_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");

        assert_eq!(Session::load(&path).unwrap(), None);

        let s = session(&[rights::R_ADM_DASHBOARD]);
        s.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), Some(s));

        Session::clear(&path).unwrap();
        assert!(!path.exists());
        Session::clear(&path).unwrap();
    }

    #[test]
    fn load_rejects_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(Session::load(&path).is_err());
    }
