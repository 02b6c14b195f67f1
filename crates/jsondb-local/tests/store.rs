use std::path::Path;

use futures::future::join_all;
use jsondb_local::{open, Store, StoreError, StoreOptions};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
    contact: String,
    company: String,
    address: Address,
}

fn employees() -> Vec<User> {
    vec![
        User {
            name: "Mrinal".to_string(),
            age: 19,
            contact: "3423251".to_string(),
            company: "Aramco".to_string(),
            address: Address {
                city: "Varanasi".to_string(),
                state: "Up".to_string(),
                country: "India".to_string(),
                pincode: "3424".to_string(),
            },
        },
        User {
            name: "Utkarsh".to_string(),
            age: 18,
            contact: "3423234".to_string(),
            company: "Airtel".to_string(),
            address: Address {
                city: "JanakPuri".to_string(),
                state: "Delhi".to_string(),
                country: "India".to_string(),
                pincode: "8912".to_string(),
            },
        },
        User {
            name: "Prachi".to_string(),
            age: 17,
            contact: "3423251".to_string(),
            company: "Aramco".to_string(),
            address: Address {
                city: "Bhidaur".to_string(),
                state: "Tamil Nadu".to_string(),
                country: "India".to_string(),
                pincode: "1321".to_string(),
            },
        },
    ]
}

async fn setup() -> (Store, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = open(temp_dir.path(), StoreOptions::default()).await.unwrap();
    (store, temp_dir)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_round_trip() {
    let (store, _temp) = setup().await;

    for user in employees() {
        store.write("users", &user.name, &user).await.unwrap();
        let loaded: User = store.read("users", &user.name).await.unwrap();
        assert_eq!(loaded, user);
    }
}

#[tokio::test]
async fn test_listing_scenario() {
    let (store, temp) = setup().await;
    let users = employees();
    for (key, user) in ["a", "b", "c"].iter().zip(&users) {
        store.write("users", key, user).await.unwrap();
    }

    let records = store.read_all("users").await.unwrap();
    assert_eq!(records.len(), 3);

    let mut decoded: Vec<User> = records
        .iter()
        .map(|r| serde_json::from_str(r).unwrap())
        .collect();
    decoded.sort_by_key(|u| u.age);
    let mut expected = users.clone();
    expected.sort_by_key(|u| u.age);
    assert_eq!(decoded, expected);

    assert_eq!(
        file_names(&temp.path().join("users")),
        vec!["a.json", "b.json", "c.json"]
    );
}

#[tokio::test]
async fn test_idempotent_overwrite() {
    let (store, temp) = setup().await;
    let users = employees();

    store.write("users", "u1", &users[0]).await.unwrap();
    store.write("users", "u1", &users[1]).await.unwrap();

    assert_eq!(file_names(&temp.path().join("users")), vec!["u1.json"]);
    let loaded: User = store.read("users", "u1").await.unwrap();
    assert_eq!(loaded, users[1]);
}

#[tokio::test]
async fn test_missing_name_validation() {
    let (store, temp) = setup().await;
    let users = employees();
    let user = &users[0];

    let results = [
        store.write("", "r", user).await,
        store.write("c", "", user).await,
        store.read::<User>("", "r").await.map(|_| ()),
        store.delete("c", "").await,
    ];
    for result in results {
        assert!(
            matches!(result, Err(StoreError::InvalidArgument(_))),
            "got {:?}",
            result
        );
    }

    assert!(file_names(temp.path()).is_empty());
}

#[tokio::test]
async fn test_not_found_semantics() {
    let (store, temp) = setup().await;

    let err = store.read::<User>("c", "missing").await.unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);

    let err = store.delete("c", "missing").await.unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
    assert!(!temp.path().join("c").exists());

    let err = store.read_all("c").await.unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_collection_is_not_missing() {
    let (store, _temp) = setup().await;
    let users = employees();
    let user = &users[0];

    store.write("users", "only", user).await.unwrap();
    store.delete("users", "only").await.unwrap();

    let records = store.read_all("users").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_read_into_wrong_shape() {
    let (store, _temp) = setup().await;
    store.write("users", "u1", &vec![1, 2, 3]).await.unwrap();

    let err = store.read::<User>("users", "u1").await.unwrap_err();
    assert!(matches!(err, StoreError::Deserialization(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_reopen_sees_existing_records() {
    let temp = TempDir::new().unwrap();
    let user = employees().remove(2);

    {
        let store = open(temp.path(), StoreOptions::default()).await.unwrap();
        store.write("users", "Prachi", &user).await.unwrap();
    }

    let store = open(temp.path(), StoreOptions::default()).await.unwrap();
    assert_eq!(store.backend().backend_name(), "local");
    let loaded: User = store.read("users", "Prachi").await.unwrap();
    assert_eq!(loaded, user);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_across_collections() {
    let (store, _temp) = setup().await;
    let users = employees();

    let writes = (0..30).map(|i| {
        let store = store.clone();
        let user = users[i % users.len()].clone();
        tokio::spawn(async move {
            let collection = format!("team-{}", i % 3);
            let resource = format!("member-{}", i);
            store.write(&collection, &resource, &user).await
        })
    });

    for result in join_all(writes).await {
        result.expect("task panicked").unwrap();
    }

    for team in 0..3 {
        let members: Vec<User> = store.read_all_as(&format!("team-{}", team)).await.unwrap();
        assert_eq!(members.len(), 10);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_partial_records() {
    let (store, _temp) = setup().await;
    let users = employees();
    store.write("users", "hot", &users[0]).await.unwrap();

    let writer = {
        let store = store.clone();
        let users = users.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                store
                    .write("users", "hot", &users[i % users.len()])
                    .await
                    .unwrap();
            }
        })
    };

    let readers = (0..4).map(|_| {
        let store = store.clone();
        let users = users.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let loaded: User = store.read("users", "hot").await.unwrap();
                assert!(users.contains(&loaded));
            }
        })
    });

    writer.await.expect("writer panicked");
    for reader in join_all(readers).await {
        reader.expect("reader panicked");
    }
}
