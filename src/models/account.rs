/// A registered user. The password is only ever held as an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
