use crate::db::PostStore;
use crate::error::Result;
use crate::models::Post;
use crate::session::FeedSelection;

/// Picks the post query for a viewer based on their session's author filter.
///
/// Holds no state of its own: the selection is borrowed from the session, so
/// changes made here are visible to the next controller built for the same
/// session.
pub struct FeedView<'a> {
    posts: &'a PostStore,
    selection: &'a mut FeedSelection,
}

impl<'a> FeedView<'a> {
    pub fn new(posts: &'a PostStore, selection: &'a mut FeedSelection) -> Self {
        Self { posts, selection }
    }

    /// With an author selected: that author's posts, newest first.
    /// Otherwise every post, latest created first.
    pub async fn view_feed(&self) -> Result<Vec<Post>> {
        match &self.selection.selected_author {
            Some(author) => self.posts.list_by_author(author).await,
            None => {
                let mut posts = self.posts.list_all().await?;
                posts.reverse();
                Ok(posts)
            }
        }
    }

    pub fn select_author(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(author = %name, "feed filtered by author");
        self.selection.selected_author = Some(name);
    }

    pub fn clear_selection(&mut self) {
        self.selection.selected_author = None;
    }

    pub fn selected_author(&self) -> Option<&str> {
        self.selection.selected_author.as_deref()
    }

    pub fn heading(&self) -> String {
        match self.selected_author() {
            Some(author) => format!("Posts by {author}"),
            None => "Latest Posts".to_string(),
        }
    }
}
