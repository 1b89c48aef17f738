mod follows;
mod likes;
mod messages;
mod users;

#[cfg(test)]
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::Database;
    use crate::models::NewUser;

    pub fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    pub fn user(db: &Database, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        let email = format!("{}@example.com", username);
        db.insert_user(&NewUser {
            id,
            username,
            email: &email,
            password_hash: "$argon2id$fake",
            image_url: "/img.png",
            header_image_url: "/hdr.png",
        })
        .unwrap();
        id
    }

    pub fn message(db: &Database, author: Uuid, text: &str) -> Uuid {
        let id = Uuid::new_v4();
        db.insert_message(id, author, text).unwrap();
        id
    }
}
