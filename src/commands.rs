//! Terminal front end: one subcommand per screen or action of the blog client.

use clap::Subcommand;

use crate::api::models::{Post, PostDetail, PostForm};
use crate::auth::guard::{GuardOutcome, LOGIN_REQUIRED};
use crate::error::{ClientError, ClientResult};
use crate::forms::definitions::{self, PASSWORD_CHANGED, PROFILE_UPDATED};
use crate::forms::{FormSpec, FormState, FormValues};
use crate::render::{self, CardMode};
use crate::routes::{NavItem, Route};
use crate::state::App;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account and log in
    Register {
        #[arg(long, default_value_t)]
        username: String,
        #[arg(long, default_value_t)]
        email: String,
        #[arg(long, default_value_t)]
        first_name: String,
        #[arg(long, default_value_t)]
        last_name: String,
        #[arg(long, default_value_t)]
        password: String,
        /// Repeat the password
        #[arg(long, default_value_t)]
        confirm: String,
    },
    Login {
        #[arg(long, default_value_t)]
        email: String,
        #[arg(long, default_value_t)]
        password: String,
    },
    Logout,
    /// Show the logged-in user and the menu
    Whoami,
    /// Update profile fields; omitted fields keep their current value
    Profile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Change the password
    Password {
        #[arg(long, default_value_t)]
        current: String,
        #[arg(long, default_value_t)]
        new: String,
        #[arg(long, default_value_t)]
        confirm: String,
    },
    /// List posts
    Posts {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one post with its comments
    Show { id: String },
    /// Write a new post
    Add {
        #[arg(long, default_value_t)]
        title: String,
        /// Category id or name
        #[arg(long, default_value_t)]
        category: String,
        /// HTML body
        #[arg(long, default_value_t)]
        content: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit a post; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    Delete { id: String },
    /// Like or unlike a post
    Like { id: String },
    Comment { id: String, text: String },
    Categories,
}

impl Default for Command {
    fn default() -> Self {
        Command::Posts { page: None }
    }
}

impl Command {
    /// Screen the command belongs to, for the route guard.
    pub fn route(&self) -> Route {
        match self {
            Command::Register { .. } => Route::Register,
            Command::Login { .. } => Route::Login,
            Command::Logout | Command::Whoami | Command::Posts { .. } | Command::Categories => {
                Route::Home
            }
            Command::Profile { .. } | Command::Password { .. } => Route::Profile,
            Command::Add { .. } => Route::AddPost,
            Command::Edit { id, .. } => Route::EditPost(id.clone()),
            Command::Show { id }
            | Command::Delete { id }
            | Command::Like { id }
            | Command::Comment { id, .. } => Route::PostDetails(id.clone()),
        }
    }
}

/// Run one command. Failures have already been reported through the app's notifier
/// or as inline form errors by the time this returns `Err`.
pub async fn run(app: &mut App, command: Command) -> ClientResult<()> {
    if let GuardOutcome::Redirect(to) = app.guard(&command.route()) {
        println!("Redirected to {}", to);
        return Err(ClientError::validation(LOGIN_REQUIRED));
    }

    match command {
        Command::Register {
            username,
            email,
            first_name,
            last_name,
            password,
            confirm,
        } => {
            let values = submit(
                definitions::register_form(),
                [
                    ("username", username),
                    ("email", email),
                    ("firstName", first_name),
                    ("lastName", last_name),
                    ("password", password),
                    ("password2", confirm),
                ],
            )?;
            app.session.register(&definitions::registration(&values)).await?;
            navigate(&Route::Home);
        }
        Command::Login { email, password } => {
            let values = submit(
                definitions::login_form(),
                [("email", email), ("password", password)],
            )?;
            app.session.login(&definitions::credentials(&values)).await?;
            navigate(&Route::Home);
        }
        Command::Logout => {
            let result = app.session.logout().await;
            navigate(&Route::Login);
            result?;
        }
        Command::Whoami => whoami(app),
        Command::Profile {
            username,
            email,
            first_name,
            last_name,
        } => {
            let session = app
                .session
                .current()
                .ok_or_else(|| ClientError::validation(LOGIN_REQUIRED))?;
            let mut values = definitions::profile_values(session);
            let overrides = [
                ("username", username),
                ("email", email),
                ("firstName", first_name),
                ("lastName", last_name),
            ];
            for (name, value) in overrides {
                if let Some(value) = value {
                    values.set(name, value);
                }
            }
            let values = check(FormState::new(definitions::profile_form(), values))?;
            let session = app
                .session
                .update_profile(&definitions::profile_update(&values), PROFILE_UPDATED)
                .await?;
            println!("{}", session.display_name());
        }
        Command::Password {
            current,
            new,
            confirm,
        } => {
            let values = submit(
                definitions::password_form(),
                [
                    ("currentPassword", current),
                    ("password", new),
                    ("password2", confirm),
                ],
            )?;
            let session = app
                .session
                .current()
                .ok_or_else(|| ClientError::validation(LOGIN_REQUIRED))?;
            let update = definitions::password_update(session, &values);
            app.session.update_profile(&update, PASSWORD_CHANGED).await?;
        }
        Command::Posts { page } => {
            match page {
                Some(page) => app.content.set_page(page).await?,
                None => {
                    app.content.list_posts(None).await?;
                }
            }
            let listing = render::render_post_list(
                app.content.posts(),
                app.content.pagination(),
                app.session.current(),
            )?;
            println!("{}", listing);
        }
        Command::Show { id } => {
            let post = app.content.get_post(app.session.token(), &id).await?.clone();
            show(app, post)?;
        }
        Command::Add {
            title,
            category,
            content,
            image,
        } => {
            let category_id = resolve_category(app, &category).await?;
            let form = PostForm {
                category_id,
                title,
                content,
                image: image.unwrap_or_else(|| PostForm::default().image),
            };
            let form = post_form(definitions::post_form(), &form)?;
            let route = app.content.create_post(app.session.token(), &form).await?;
            navigate(&route);
        }
        Command::Edit {
            id,
            title,
            category,
            content,
            image,
        } => {
            let detail = app.content.get_post(app.session.token(), &id).await?;
            let mut form = PostForm::from_detail(detail);
            if let Some(category) = category {
                form.category_id = resolve_category(app, &category).await?;
            }
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(content) = content {
                form.content = content;
            }
            if let Some(image) = image {
                form.image = image;
            }
            let form = post_form(definitions::edit_post_form(), &form)?;
            let route = app.content.update_post(app.session.token(), &form, &id).await?;
            navigate(&route);
        }
        Command::Delete { id } => {
            let route = app.content.delete_post(app.session.token(), &id).await?;
            navigate(&route);
        }
        Command::Like { id } => {
            let post = app.content.add_like(app.session.token(), &id).await?.clone();
            show(app, post)?;
        }
        Command::Comment { id, text } => {
            let post = app
                .content
                .add_comment(app.session.token(), &id, &text)
                .await?
                .clone();
            show(app, post)?;
        }
        Command::Categories => {
            for category in app.content.list_categories().await? {
                println!("{}\t{}", category.id, category.name);
            }
        }
    }
    Ok(())
}

fn navigate(route: &Route) {
    tracing::debug!(%route, "navigate");
}

fn show(app: &App, post: PostDetail) -> ClientResult<()> {
    let card = render::render_card(&Post::Detail(post), app.session.current(), CardMode::Full)?;
    println!("{}", card);
    Ok(())
}

fn whoami(app: &App) {
    match app.session.current() {
        Some(session) => println!(
            "{} <{}> ({})",
            session.username,
            session.email,
            session.display_name()
        ),
        None => println!("Not logged in"),
    }
    let items: Vec<String> = app
        .menu()
        .into_iter()
        .map(|item| match item {
            NavItem::Link { label, route } => format!("{} ({})", label, route),
            NavItem::Logout => "Logout".to_string(),
        })
        .collect();
    println!("{}", items.join(" | "));
}

/// Accept a category id or a case-insensitive name. Unknown input is passed through as an id.
/// A failed category fetch stops the command; its notice has already been shown.
async fn resolve_category(app: &mut App, input: &str) -> ClientResult<String> {
    if input.is_empty() {
        return Ok(String::new());
    }
    let categories = app.content.list_categories().await?;
    Ok(categories
        .iter()
        .find(|c| c.id == input || c.name.eq_ignore_ascii_case(input))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| input.to_string()))
}

fn post_form(spec: FormSpec, form: &PostForm) -> ClientResult<PostForm> {
    let values = check(FormState::new(spec, definitions::post_values(form)))?;
    Ok(definitions::post(&values))
}

fn submit<const N: usize>(spec: FormSpec, values: [(&str, String); N]) -> ClientResult<FormValues> {
    check(FormState::new(spec, values.into_iter().collect()))
}

/// Submit the form, printing each field's error inline when it does not validate.
fn check(mut form: FormState) -> ClientResult<FormValues> {
    match form.submit() {
        Ok(values) => Ok(values),
        Err(_) => {
            eprintln!("{}", render::render_form_errors(&form));
            Err(ClientError::validation(format!(
                "{} form has errors",
                form.spec().title
            )))
        }
    }
}
