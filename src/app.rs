use crate::config::Config;
use crate::db::{AccountStore, Database, PostStore};
use crate::error::{AppError, Result};
use crate::feed::FeedView;
use crate::models::{Post, PostId};
use crate::session::Session;
use crate::tui::{AppAction, Form, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Feed,
    AllPosts,
    Login,
    Register,
    AddPost,
    EditPost,
    DeletePost,
}

impl Screen {
    pub fn is_form(self) -> bool {
        !matches!(self, Screen::Feed | Screen::AllPosts)
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Feed => "Feed",
            Screen::AllPosts => "All Posts",
            Screen::Login => "User Login",
            Screen::Register => "User Registration",
            Screen::AddPost => "Add New Post",
            Screen::EditPost => "Edit Post",
            Screen::DeletePost => "Delete Post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Feed,
    Login,
    Register,
    AddPost,
    EditPost,
    DeletePost,
    ViewPosts,
    Logout,
}

const GUEST_MENU: &[MenuEntry] = &[MenuEntry::Feed, MenuEntry::Login, MenuEntry::Register];

const MEMBER_MENU: &[MenuEntry] = &[
    MenuEntry::Feed,
    MenuEntry::AddPost,
    MenuEntry::EditPost,
    MenuEntry::DeletePost,
    MenuEntry::ViewPosts,
    MenuEntry::Logout,
];

impl MenuEntry {
    pub fn for_session(logged_in: bool) -> &'static [MenuEntry] {
        if logged_in {
            MEMBER_MENU
        } else {
            GUEST_MENU
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Feed => "Feed",
            MenuEntry::Login => "Login",
            MenuEntry::Register => "Register",
            MenuEntry::AddPost => "Add Post",
            MenuEntry::EditPost => "Edit Post",
            MenuEntry::DeletePost => "Delete Post",
            MenuEntry::ViewPosts => "View Posts",
            MenuEntry::Logout => "Logout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    // Data
    pub posts: Vec<Post>,
    pub heading: String,

    // UI State
    pub screen: Screen,
    pub selected_index: usize,
    pub form: Form,
    pub editing: Option<PostId>,
    pub status: Option<StatusMessage>,
    pub show_help: bool,

    pub session: Session,

    // Services
    accounts: AccountStore,
    post_store: PostStore,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let db = Database::open(&config.db_path).await?;
        Self::with_database(&db).await
    }

    pub async fn with_database(db: &Database) -> Result<Self> {
        let mut app = Self {
            posts: Vec::new(),
            heading: String::new(),
            screen: Screen::Feed,
            selected_index: 0,
            form: Form::default(),
            editing: None,
            status: None,
            show_help: false,
            session: Session::new(),
            accounts: db.accounts(),
            post_store: db.posts(),
        };
        app.reload_posts().await?;
        Ok(app)
    }

    pub fn menu(&self) -> &'static [MenuEntry] {
        MenuEntry::for_session(self.session.is_logged_in())
    }

    pub fn input_active(&self) -> bool {
        self.screen.is_form()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected_index)
    }

    /// Applies one action. Recoverable errors become a warning on the status
    /// line; anything else is returned to the caller.
    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match self.dispatch(action).await {
            Ok(quit) => Ok(quit),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{}", e);
                self.set_status(StatusKind::Warning, e.to_string());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn dispatch(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            AppAction::MoveDown => {
                let len = self.posts.len();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                }
            }

            AppAction::MoveToTop => {
                self.selected_index = 0;
            }

            AppAction::MoveToBottom => {
                self.selected_index = self.posts.len().saturating_sub(1);
            }

            AppAction::SelectMenu(index) => {
                if let Some(&entry) = self.menu().get(index) {
                    self.open(entry).await?;
                }
            }

            AppAction::FilterByAuthor => {
                if self.screen == Screen::Feed {
                    if let Some(author) = self.selected_post().map(|p| p.author.clone()) {
                        FeedView::new(&self.post_store, &mut self.session.selection)
                            .select_author(author);
                        self.selected_index = 0;
                        self.reload_posts().await?;
                    }
                }
            }

            AppAction::ShowAllPosts => {
                if self.screen == Screen::Feed {
                    FeedView::new(&self.post_store, &mut self.session.selection)
                        .clear_selection();
                    self.selected_index = 0;
                    self.reload_posts().await?;
                }
            }

            AppAction::Reload => {
                self.reload_posts().await?;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::InputChar(c) => {
                self.form.push_char(c);
            }

            AppAction::InputBackspace => {
                self.form.backspace();
            }

            AppAction::NextField => {
                self.form.next_field();
            }

            AppAction::PrevField => {
                self.form.prev_field();
            }

            AppAction::InputConfirm => {
                self.submit().await?;
            }

            AppAction::InputCancel => {
                self.open(MenuEntry::Feed).await?;
            }
        }

        Ok(false)
    }

    async fn open(&mut self, entry: MenuEntry) -> Result<()> {
        self.status = None;
        self.editing = None;
        self.form = Form::default();

        match entry {
            MenuEntry::Feed => self.show_list(Screen::Feed).await?,
            MenuEntry::ViewPosts => self.show_list(Screen::AllPosts).await?,
            MenuEntry::Logout => {
                self.session.logout();
                self.show_list(Screen::Feed).await?;
                self.set_status(StatusKind::Success, "You have been logged out.");
            }
            MenuEntry::Login => self.show_form(Screen::Login, credential_fields()),
            MenuEntry::Register => self.show_form(Screen::Register, credential_fields()),
            MenuEntry::AddPost => self.show_form(
                Screen::AddPost,
                vec![FormField::text("Title"), FormField::text("Content")],
            ),
            MenuEntry::EditPost => self.show_form(Screen::EditPost, post_id_field()),
            MenuEntry::DeletePost => self.show_form(Screen::DeletePost, post_id_field()),
        }
        Ok(())
    }

    async fn show_list(&mut self, screen: Screen) -> Result<()> {
        self.screen = screen;
        self.selected_index = 0;
        self.reload_posts().await
    }

    fn show_form(&mut self, screen: Screen, fields: Vec<FormField>) {
        self.screen = screen;
        self.form = Form::new(fields);
    }

    async fn submit(&mut self) -> Result<()> {
        match self.screen {
            Screen::Login => self.submit_login().await,
            Screen::Register => self.submit_registration().await,
            Screen::AddPost => self.submit_new_post().await,
            Screen::EditPost => self.submit_edit().await,
            Screen::DeletePost => self.submit_delete().await,
            Screen::Feed | Screen::AllPosts => Ok(()),
        }
    }

    async fn submit_login(&mut self) -> Result<()> {
        let (username, password) = (self.form.value(0), self.form.value(1));
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("username and password"));
        }

        let account = self
            .accounts
            .authenticate(username, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let welcome = format!("Welcome, {}!", account.username);
        self.session.login(account);
        self.open(MenuEntry::Feed).await?;
        self.set_status(StatusKind::Success, welcome);
        Ok(())
    }

    async fn submit_registration(&mut self) -> Result<()> {
        let account = self
            .accounts
            .register(self.form.value(0), self.form.value(1))
            .await?;

        self.show_form(
            Screen::Login,
            vec![
                FormField::text("Username").with_value(account.username),
                FormField::secret("Password"),
            ],
        );
        self.form.focus = 1;
        self.set_status(StatusKind::Success, "Registration successful! Please login.");
        Ok(())
    }

    async fn submit_new_post(&mut self) -> Result<()> {
        let author = self.session.require_login()?.to_string();
        let id = self
            .post_store
            .create(self.form.value(0), self.form.value(1), &author)
            .await?;

        self.form = Form::new(vec![FormField::text("Title"), FormField::text("Content")]);
        self.set_status(StatusKind::Success, format!("Post {id} added successfully!"));
        Ok(())
    }

    /// First submit looks the post up and pre-fills it; the second one saves.
    async fn submit_edit(&mut self) -> Result<()> {
        self.session.require_login()?;

        match self.editing {
            None => {
                let id = parse_post_id(self.form.value(0))?;
                let post = self
                    .post_store
                    .get_by_id(id)
                    .await?
                    .ok_or(AppError::NotFound(id))?;

                self.editing = Some(id);
                self.form = Form::new(vec![
                    FormField::text("Title").with_value(post.title),
                    FormField::text("Content").with_value(post.content),
                ]);
                self.set_status(StatusKind::Info, format!("Editing post {id}"));
            }
            Some(id) => {
                self.post_store
                    .update(id, self.form.value(0), self.form.value(1))
                    .await?;

                self.editing = None;
                self.form = Form::new(post_id_field());
                self.set_status(StatusKind::Success, "Post updated successfully!");
            }
        }
        Ok(())
    }

    async fn submit_delete(&mut self) -> Result<()> {
        self.session.require_login()?;
        let id = parse_post_id(self.form.value(0))?;
        self.post_store.delete(id).await?;

        self.form = Form::new(post_id_field());
        self.set_status(StatusKind::Success, "Post deleted successfully!");
        Ok(())
    }

    async fn reload_posts(&mut self) -> Result<()> {
        match self.screen {
            Screen::AllPosts => {
                self.posts = self.post_store.list_all().await?;
                self.heading = "All Posts".to_string();
            }
            _ => {
                let feed = FeedView::new(&self.post_store, &mut self.session.selection);
                self.posts = feed.view_feed().await?;
                self.heading = feed.heading();
            }
        }

        if self.selected_index >= self.posts.len() {
            self.selected_index = self.posts.len().saturating_sub(1);
        }
        Ok(())
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }
}

fn credential_fields() -> Vec<FormField> {
    vec![FormField::text("Username"), FormField::secret("Password")]
}

fn post_id_field() -> Vec<FormField> {
    vec![FormField::text("Post ID")]
}

fn parse_post_id(input: &str) -> Result<PostId> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput("post ID"))
}
