#![allow(dead_code)]

use chirp_core::{Chirp, CoreConfig, Session};
use chirp_types::forms::SignupForm;
use chirp_types::models::User;

pub const PASSWORD: &str = "pwd";

/// A fresh in-memory instance with two signed-up users.
pub struct Fixture {
    pub chirp: Chirp,
    pub user1: User,
    pub user2: User,
}

impl Fixture {
    pub fn new() -> Self {
        let chirp = Chirp::open_in_memory(CoreConfig::default()).unwrap();
        let user1 = signup(&chirp, "user1");
        let user2 = signup(&chirp, "user2");
        Self { chirp, user1, user2 }
    }

    pub fn as_user1(&self) -> Session {
        Session::for_user(self.user1.id)
    }

    pub fn as_user2(&self) -> Session {
        Session::for_user(self.user2.id)
    }

    /// Row count of a table, read straight from the store.
    pub fn count(&self, table: &str) -> i64 {
        count(&self.chirp, table)
    }
}

pub fn signup_form(username: &str) -> SignupForm {
    SignupForm {
        username: username.into(),
        email: format!("{username}@test.com"),
        password: PASSWORD.into(),
        image_url: None,
    }
}

pub fn signup(chirp: &Chirp, username: &str) -> User {
    chirp.signup(&signup_form(username)).unwrap()
}

pub fn count(chirp: &Chirp, table: &str) -> i64 {
    chirp
        .db()
        .with_conn(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
        })
        .unwrap()
}
