pub const SCHEMA: &str = r#"
-- accounts table
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

-- posts table (AUTOINCREMENT keeps ids of deleted posts from being reused)
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    author TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author);
"#;
