//! Redis integration tests.
//!
//! These run against a live server only when `SVCKIT_TEST_REDIS_URL` is set,
//! e.g. `SVCKIT_TEST_REDIS_URL=redis://127.0.0.1:6379/15`. Each test uses its
//! own key prefix and clears it afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use svckit_cache::redis::InsertPosition;
use svckit_cache::{Json, RedisClient, RedisStore};
use svckit_core::config::cache::RedisConfig;

static COUNTER: AtomicU32 = AtomicU32::new(0);

async fn store(name: &str) -> Option<RedisStore> {
    let url = std::env::var("SVCKIT_TEST_REDIS_URL").ok()?;
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let config = RedisConfig {
        url: Some(url),
        key_prefix: format!("svckit-test-{}-{name}-{id}", std::process::id()),
        ..RedisConfig::default()
    };
    let client = RedisClient::connect(&config)
        .await
        .expect("Failed to connect to test Redis");
    let store = RedisStore::new(client);
    store.clear_namespace().await.expect("clear");
    Some(store)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
}

#[tokio::test]
async fn test_string_round_trip_and_prefix() {
    let Some(store) = store("strings").await else {
        return;
    };
    let prefix = store.namespace().prefix().to_string();

    store.set("user:1", "alice", None).await.expect("set");
    assert_eq!(
        store.get::<String>("user:1").await.expect("get"),
        Some("alice".to_string())
    );
    assert_eq!(
        store
            .get_raw(&format!("{prefix}:user:1"))
            .await
            .expect("raw"),
        Some("alice".to_string())
    );
    assert_eq!(store.get::<String>("missing").await.expect("get"), None);

    store.set("n", &42i64, None).await.expect("set");
    assert_eq!(store.incr_by("n", 8).await.expect("incr"), 50);
    assert_eq!(store.get::<i64>("n").await.expect("get"), Some(50));

    store.set("word", "abc", None).await.expect("set");
    assert_eq!(store.get::<i64>("word").await.expect("get"), Some(0));

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_composite_and_ttl() {
    let Some(store) = store("composite").await else {
        return;
    };
    let profile = Profile {
        name: "bob".into(),
        age: 31,
    };
    store
        .set("profile", &Json(&profile), Some(Duration::from_secs(60)))
        .await
        .expect("set");
    let loaded = store
        .get::<Json<Profile>>("profile")
        .await
        .expect("get")
        .map(Json::into_inner);
    assert_eq!(loaded, Some(profile));

    let ttl = store.ttl("profile").await.expect("ttl").expect("has ttl");
    assert!(ttl <= Duration::from_secs(60));

    store.set("forever", "x", Some(Duration::ZERO)).await.expect("set");
    assert_eq!(store.ttl("forever").await.expect("ttl"), None);

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_mset_mget_lossy() {
    let Some(store) = store("mget").await else {
        return;
    };
    store
        .mset(&[("a", "1"), ("b", "2")])
        .await
        .expect("mset");
    store.set("c", "{", None).await.expect("set");

    let values = store
        .mget::<Json<Vec<u8>>, _>(&["a", "missing", "c"])
        .await
        .expect("mget");
    assert!(values.iter().all(Option::is_none));

    let numbers = store.mget::<i64, _>(&["a", "b", "missing"]).await.expect("mget");
    assert_eq!(numbers, vec![Some(1), Some(2), None]);

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_hashes() {
    let Some(store) = store("hashes").await else {
        return;
    };
    store
        .hmset("h", &[("x", 1i64), ("y", 2i64)])
        .await
        .expect("hmset");
    assert!(store.hset("h", "z", "nan").await.expect("hset"));

    let all: HashMap<String, i64> = store.hget_all("h").await.expect("hgetall");
    assert_eq!(all.len(), 3);
    assert_eq!(all.get("z"), Some(&0));

    let objects: HashMap<String, Json<Profile>> = store.hget_all("h").await.expect("hgetall");
    assert!(objects.is_empty());

    assert_eq!(store.hincr_by("h", "x", 4).await.expect("hincrby"), 5);
    assert_eq!(
        store.hmget::<i64, _>("h", &["x", "nope"]).await.expect("hmget"),
        vec![Some(5), None]
    );
    assert_eq!(store.hlen("h").await.expect("hlen"), 3);

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_lists() {
    let Some(store) = store("lists").await else {
        return;
    };
    assert_eq!(store.rpush("l", &[1i64, 2, 3]).await.expect("rpush"), 3);
    assert_eq!(
        store
            .linsert("l", InsertPosition::Before, &2i64, &9i64)
            .await
            .expect("linsert"),
        4
    );
    assert_eq!(
        store.lrange::<i64>("l", 0, -1).await.expect("lrange"),
        vec![1, 9, 2, 3]
    );

    let popped: Option<i64> = store
        .blpop(&["empty", "l"], Duration::from_millis(100))
        .await
        .expect("blpop");
    assert_eq!(popped, Some(1));

    let timed_out: Option<i64> = store
        .brpop(&["empty"], Duration::from_millis(100))
        .await
        .expect("brpop");
    assert_eq!(timed_out, None);

    let waited: Option<i64> = store
        .blpop(&["empty"], Duration::from_secs(1))
        .await
        .expect("blpop past the response timeout");
    assert_eq!(waited, None);

    let moved: Option<i64> = store.rpoplpush("l", "other").await.expect("rpoplpush");
    assert_eq!(moved, Some(3));
    assert_eq!(store.llen("other").await.expect("llen"), 1);

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_set_algebra_is_namespaced() {
    let Some(store) = store("sets").await else {
        return;
    };
    store.sadd("s1", &["a", "b", "c"]).await.expect("sadd");
    store.sadd("s2", &["b", "c", "d"]).await.expect("sadd");

    let mut inter: Vec<String> = store.sinter(&["s1", "s2"]).await.expect("sinter");
    inter.sort();
    assert_eq!(inter, vec!["b", "c"]);

    let diff: Vec<String> = store.sdiff(&["s1", "s2"]).await.expect("sdiff");
    assert_eq!(diff, vec!["a"]);

    assert_eq!(
        store.sunionstore("all", &["s1", "s2"]).await.expect("sunionstore"),
        4
    );
    assert_eq!(store.scard("all").await.expect("scard"), 4);
    assert!(store.smove("s1", "s2", "a").await.expect("smove"));
    assert!(store.sismember("s2", "a").await.expect("sismember"));

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_sorted_sets() {
    let Some(store) = store("zsets").await else {
        return;
    };
    store
        .zadd("z", &[("a", 1.0), ("b", 2.5), ("c", 4.0)])
        .await
        .expect("zadd");

    assert_eq!(store.zcount("z", "-inf", "+inf").await.expect("zcount"), 3);
    assert_eq!(
        store
            .zrange_with_scores::<String>("z", 0, 1)
            .await
            .expect("zrange"),
        vec![("a".to_string(), 1.0), ("b".to_string(), 2.5)]
    );
    assert_eq!(
        store
            .zrevrange_by_score::<String>("z", "+inf", "(2.5")
            .await
            .expect("zrevrangebyscore"),
        vec!["c".to_string()]
    );
    assert_eq!(store.zrank("z", "c").await.expect("zrank"), Some(2));
    assert_eq!(store.zscore("z", "missing").await.expect("zscore"), None);

    store.zadd("z2", &[("a", 10.0)]).await.expect("zadd");
    assert_eq!(
        store.zinterstore("both", &["z", "z2"]).await.expect("zinterstore"),
        1
    );

    store.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_clear_namespace_leaves_other_prefixes() {
    let (Some(a), Some(b)) = (store("iso-a").await, store("iso-b").await) else {
        return;
    };
    a.set("k", "a", None).await.expect("set");
    b.set("k", "b", None).await.expect("set");

    assert_eq!(a.clear_namespace().await.expect("clear"), 1);
    assert!(!a.exists("k").await.expect("exists"));
    assert_eq!(b.get::<String>("k").await.expect("get"), Some("b".into()));

    b.clear_namespace().await.expect("clear");
}

#[tokio::test]
async fn test_publish_subscribe() {
    let Some(store) = store("pubsub").await else {
        return;
    };
    let channel = format!("{}-events", store.namespace().prefix());
    let mut sub = store.subscribe(&[channel.as_str()]).await.expect("subscribe");

    store.publish(&channel, &7u32).await.expect("publish");
    let value = tokio::time::timeout(Duration::from_secs(5), sub.next_value::<u32>())
        .await
        .expect("message in time")
        .expect("decode");
    assert_eq!(value, Some(7));
}
