use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{Post, PostId};

const POST_COLUMNS: &str = "id, title, content, author";

#[derive(Clone)]
pub struct PostStore {
    conn: Connection,
}

impl PostStore {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, title: &str, content: &str, author: &str) -> Result<PostId> {
        require("title", title)?;
        require("content", content)?;
        require("author", author)?;

        let title = title.to_string();
        let content = content.to_string();
        let author = author.to_string();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO posts (title, content, author) VALUES (?1, ?2, ?3)",
                    params![title, content, author],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        tracing::debug!(post_id = id, "created post");
        Ok(id)
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>> {
        let post = self
            .conn
            .call(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"))?;
                let post = stmt.query_row(params![id], post_from_row).optional()?;
                Ok(post)
            })
            .await?;
        Ok(post)
    }

    /// Overwrites title and content. Author and id never change.
    pub async fn update(&self, id: PostId, title: &str, content: &str) -> Result<()> {
        require("title", title)?;
        require("content", content)?;

        let (title, content) = (title.to_string(), content.to_string());
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE posts SET title = ?1, content = ?2 WHERE id = ?3",
                    params![title, content, id],
                )?;
                Ok(changed)
            })
            .await?;

        if changed == 0 {
            return Err(AppError::NotFound(id));
        }
        tracing::debug!(post_id = id, "updated post");
        Ok(())
    }

    pub async fn delete(&self, id: PostId) -> Result<()> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
                Ok(changed)
            })
            .await?;

        if changed == 0 {
            return Err(AppError::NotFound(id));
        }
        tracing::debug!(post_id = id, "deleted post");
        Ok(())
    }

    /// Every post in creation order (oldest first).
    pub async fn list_all(&self) -> Result<Vec<Post>> {
        let posts = self
            .conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id ASC"))?;
                let posts = stmt
                    .query_map([], post_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(posts)
            })
            .await?;
        Ok(posts)
    }

    /// Posts by one author, newest first. Note the ordering differs from
    /// `list_all`.
    pub async fn list_by_author(&self, author: &str) -> Result<Vec<Post>> {
        let author = author.to_string();
        let posts = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {POST_COLUMNS} FROM posts WHERE author = ?1 ORDER BY id DESC"
                ))?;
                let posts = stmt
                    .query_map(params![author], post_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(posts)
            })
            .await?;
        Ok(posts)
    }

    pub async fn authors(&self) -> Result<Vec<String>> {
        let authors = self
            .conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT DISTINCT author FROM posts ORDER BY author")?;
                let authors = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<String>, _>>()?;
                Ok(authors)
            })
            .await?;
        Ok(authors)
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::InvalidInput(field));
    }
    Ok(())
}

fn post_from_row(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::db::Database;

    async fn store() -> PostStore {
        Database::open_in_memory().await.unwrap().posts()
    }

    fn ids(posts: &[Post]) -> Vec<PostId> {
        posts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let posts = store().await;
        let id = posts.create("Rust tips", "Use clippy.", "alice").await.unwrap();

        let post = posts.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(
            post,
            Post {
                id,
                title: "Rust tips".into(),
                content: "Use clippy.".into(),
                author: "alice".into(),
            }
        );
    }

    #[tokio::test]
    async fn create_rejects_empty_fields() {
        let posts = store().await;

        for (title, content, author, field) in [
            ("", "body", "alice", "title"),
            ("t", "", "alice", "content"),
            ("t", "body", "", "author"),
        ] {
            match posts.create(title, content, author).await {
                Err(AppError::InvalidInput(f)) => assert_eq!(f, field),
                other => panic!("expected InvalidInput({field}), got {other:?}"),
            }
        }
        assert!(posts.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn whitespace_fields_are_kept_verbatim() {
        let posts = store().await;
        let id = posts.create(" ", "  body  ", "   ").await.unwrap();

        let post = posts.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.title, " ");
        assert_eq!(post.content, "  body  ");
        assert_eq!(post.author, "   ");
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let posts = store().await;

        match posts.update(404, "", "body").await {
            Err(AppError::InvalidInput(field)) => assert_eq!(field, "title"),
            other => panic!("expected InvalidInput(title), got {other:?}"),
        }
        assert!(matches!(
            posts.update(404, "t", "body").await,
            Err(AppError::NotFound(404))
        ));
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let posts = store().await;
        assert!(posts.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_changes_title_and_content_only() {
        let posts = store().await;
        let id = posts.create("Draft", "old body", "bob").await.unwrap();

        assert_ok!(posts.update(id, "Final", "new body").await);

        let post = posts.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.author, "bob");
        assert_eq!(post.title, "Final");
        assert_eq!(post.content, "new body");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_changes_nothing() {
        let posts = store().await;
        let id = posts.create("Keep", "me", "bob").await.unwrap();

        let err = posts.update(id + 1, "x", "y").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(missing) if missing == id + 1));

        let all = posts.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Keep");
    }

    #[tokio::test]
    async fn update_rejects_blank_title() {
        let posts = store().await;
        let id = posts.create("Keep", "me", "bob").await.unwrap();

        assert_err!(posts.update(id, "", "y").await);
        assert_eq!(posts.get_by_id(id).await.unwrap().unwrap().title, "Keep");
    }

    #[tokio::test]
    async fn delete_removes_post() {
        let posts = store().await;
        let id = posts.create("Bye", "soon gone", "carol").await.unwrap();

        assert_ok!(posts.delete(id).await);
        assert!(posts.get_by_id(id).await.unwrap().is_none());

        let err = posts.delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_orderings_differ_by_query() {
        let posts = store().await;
        let a1 = posts.create("one", "1", "alice").await.unwrap();
        let b2 = posts.create("two", "2", "bob").await.unwrap();
        let a3 = posts.create("three", "3", "alice").await.unwrap();

        assert_eq!(ids(&posts.list_all().await.unwrap()), vec![a1, b2, a3]);
        assert_eq!(ids(&posts.list_by_author("alice").await.unwrap()), vec![a3, a1]);
        assert_eq!(ids(&posts.list_by_author("bob").await.unwrap()), vec![b2]);
    }

    #[tokio::test]
    async fn author_match_is_exact() {
        let posts = store().await;
        posts.create("hi", "there", "Alice").await.unwrap();

        assert!(posts.list_by_author("alice").await.unwrap().is_empty());
        assert!(posts.list_by_author("Ali").await.unwrap().is_empty());
        assert_eq!(posts.list_by_author("Alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn authors_are_distinct_and_sorted() {
        let posts = store().await;
        posts.create("a", "a", "zoe").await.unwrap();
        posts.create("b", "b", "alice").await.unwrap();
        posts.create("c", "c", "zoe").await.unwrap();

        assert_eq!(posts.authors().await.unwrap(), vec!["alice", "zoe"]);
    }
}
