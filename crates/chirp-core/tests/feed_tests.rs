mod common;

use std::sync::Arc;
use std::thread;

use chirp_core::{Chirp, CoreConfig, ErrorKind, Session};
use common::Fixture;

fn texts(messages: &[chirp_types::models::Message]) -> Vec<&str> {
    messages.iter().map(|m| m.text.as_str()).collect()
}

#[test]
fn feed_is_own_plus_followed_newest_first() {
    let fx = Fixture::new();
    let user3 = common::signup(&fx.chirp, "user3");
    let as_user3 = Session::for_user(user3.id);

    fx.chirp.follow(&fx.as_user1(), fx.user2.id).unwrap();

    fx.chirp.create_message(&fx.as_user2(), "u2 first").unwrap();
    fx.chirp.create_message(&as_user3, "u3 hidden").unwrap();
    fx.chirp.create_message(&fx.as_user1(), "u1 own").unwrap();
    fx.chirp.create_message(&fx.as_user2(), "u2 second").unwrap();

    let feed = fx.chirp.home_feed(&fx.as_user1(), None).unwrap();
    assert_eq!(texts(&feed), ["u2 second", "u1 own", "u2 first"]);
    assert!(feed.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let feed = fx.chirp.home_feed(&fx.as_user2(), None).unwrap();
    assert_eq!(texts(&feed), ["u2 second", "u2 first"]);
}

#[test]
fn unfollow_drops_messages_from_feed() {
    let fx = Fixture::new();
    fx.chirp.follow(&fx.as_user1(), fx.user2.id).unwrap();
    fx.chirp.create_message(&fx.as_user2(), "from u2").unwrap();
    assert_eq!(fx.chirp.home_feed(&fx.as_user1(), None).unwrap().len(), 1);

    fx.chirp.unfollow(&fx.as_user1(), fx.user2.id).unwrap();
    assert!(fx.chirp.home_feed(&fx.as_user1(), None).unwrap().is_empty());
}

#[test]
fn feed_limit_is_capped_by_config() {
    let chirp = Chirp::open_in_memory(CoreConfig {
        feed_limit: 3,
        ..CoreConfig::default()
    })
    .unwrap();
    let user = common::signup(&chirp, "poster");
    let session = Session::for_user(user.id);
    for i in 0..5 {
        chirp.create_message(&session, &format!("m{i}")).unwrap();
    }

    assert_eq!(texts(&chirp.home_feed(&session, None).unwrap()), ["m4", "m3", "m2"]);
    assert_eq!(texts(&chirp.home_feed(&session, Some(50)).unwrap()).len(), 3);
    assert_eq!(texts(&chirp.home_feed(&session, Some(1)).unwrap()), ["m4"]);
}

#[test]
fn feed_needs_a_session() {
    let fx = Fixture::new();
    let err = fx.chirp.home_feed(&Session::anonymous(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test]
fn concurrent_likes_on_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let chirp = Arc::new(Chirp::open(&dir.path().join("chirp.db"), CoreConfig::default()).unwrap());

    let author = common::signup(&chirp, "author");
    let msg_id = chirp
        .create_message(&Session::for_user(author.id), "popular")
        .unwrap()
        .id;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let chirp = Arc::clone(&chirp);
            let fan = common::signup(&chirp, &format!("fan{i}"));
            thread::spawn(move || chirp.toggle_like(&Session::for_user(fan.id), msg_id).unwrap())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(chirp.like_count(msg_id).unwrap(), 4);
}
