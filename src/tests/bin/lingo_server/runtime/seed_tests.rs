use super::super::app::{build_state, open_store};
use super::*;

fn in_memory_args() -> Args {
    Args {
        addr: "127.0.0.1:0".parse().expect("parse socket addr"),
        addr_file: None,
        data_dir: std::path::PathBuf::from("unused"),
        in_memory: true,
        jwt_secret: Some("seed-test-secret".to_string()),
        token_ttl_secs: 120,
        admin_email: "root@example.com".to_string(),
        admin_password: "rootpass1".to_string(),
        log_level: "info".to_string(),
    }
}

#[tokio::test]
async fn seeds_one_system_administrator() {
    let args = in_memory_args();
    let state = build_state(&args, open_store(&args).expect("store")).expect("state");

    seed_system_user(&state, &args).await.expect("seed");
    seed_system_user(&state, &args).await.expect("seed again");
    assert_eq!(state.users.count(None).await.expect("count"), 1);

    let admin = state
        .users
        .find_by_username("root@example.com")
        .await
        .expect("find")
        .expect("seeded");
    assert!(admin.system());
}

#[tokio::test]
async fn seeded_administrator_can_log_in() {
    let args = in_memory_args();
    let state = build_state(&args, open_store(&args).expect("store")).expect("state");
    seed_system_user(&state, &args).await.expect("seed");

    let resp = state
        .auth
        .login(&lingo::model::Credentials {
            email: "root@example.com".to_string(),
            password: "rootpass1".to_string(),
        })
        .await
        .expect("login");
    assert_eq!(resp.rights, lingo::rights::all());
}

#[test]
fn on_disk_store_is_created_under_data_dir() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut args = in_memory_args();
    args.in_memory = false;
    args.data_dir = temp.path().join("data");

    open_store(&args).expect("open store");
    assert!(args.data_dir.is_dir());
}
