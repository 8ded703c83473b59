use super::{Field, FormFooter, FormSpec, FormState, FormValues, InputKind, Rule};
use crate::api::models::{Credentials, PostForm, ProfileUpdate, Registration, Session};
use crate::error::{ClientError, ClientResult};
use crate::routes::Route;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";

fn username() -> Field {
    Field::new("username", "Username", InputKind::Text)
        .placeholder("johndoe")
        .rule(Rule::Required("Username is required!"))
}

fn email() -> Field {
    Field::new("email", "Email", InputKind::Email)
        .placeholder("john@example.com")
        .rule(Rule::Required("Email is required!"))
        .rule(Rule::Email("Invalid Email"))
}

fn first_name() -> Field {
    Field::new("firstName", "First Name", InputKind::Text)
        .placeholder("John")
        .rule(Rule::Required("First name is required!"))
}

fn last_name() -> Field {
    Field::new("lastName", "Last Name", InputKind::Text)
        .placeholder("Doe")
        .rule(Rule::Required("Last name is required!"))
}

fn password(name: &'static str, label: &'static str) -> Field {
    Field::new(name, label, InputKind::Password)
        .placeholder("********")
        .rule(Rule::Required("Password is required!"))
        .rule(Rule::MinLength(8, "Min 8 characters"))
}

fn confirm_password(label: &'static str, mismatch: &'static str) -> Field {
    Field::new("password2", label, InputKind::Password)
        .placeholder("********")
        .rule(Rule::Required("Password is required!"))
        .rule(Rule::Matches("password", mismatch))
}

pub fn register_form() -> FormSpec {
    FormSpec {
        title: "Register",
        button_text: "Sign Up",
        fields: vec![
            username(),
            email(),
            first_name(),
            last_name(),
            password("password", "Password"),
            confirm_password("Confirm Password", "Password does not match"),
        ],
        footer: Some(FormFooter {
            text: "Already have an account?",
            link_text: "Sign In",
            route: Route::Login,
        }),
    }
}

pub fn login_form() -> FormSpec {
    FormSpec {
        title: "Login",
        button_text: "Login",
        fields: vec![email(), password("password", "Password")],
        footer: Some(FormFooter {
            text: "Don't have an account?",
            link_text: "Register",
            route: Route::Register,
        }),
    }
}

pub fn profile_form() -> FormSpec {
    FormSpec {
        title: "Profile",
        button_text: "Update Profile",
        fields: vec![username(), email(), first_name(), last_name()],
        footer: None,
    }
}

pub fn password_form() -> FormSpec {
    FormSpec {
        title: "Update Password",
        button_text: "Update Password",
        fields: vec![
            Field::new("currentPassword", "Current Password", InputKind::Password)
                .rule(Rule::Required("Current password is required!")),
            password("password", "New Password"),
            confirm_password("Confirm New Password", "Password does not match!"),
        ],
        footer: None,
    }
}

pub fn post_form() -> FormSpec {
    FormSpec {
        title: "Post",
        button_text: "ADD",
        fields: vec![
            Field::new("title", "Blog Title", InputKind::Text)
                .placeholder("Enter a blog title")
                .rule(Rule::Required("Title is required"))
                .rule(Rule::MinLength(3, "Title must be at least 3 characters long")),
            Field::new("categoryId", "Category", InputKind::Select)
                .rule(Rule::Required("Category is required")),
            Field::new("content", "Post Content", InputKind::RichText)
                .rule(Rule::Required("Content is required")),
            Field::new("image", "Image URL", InputKind::Url)
                .placeholder("https://image.com")
                .rule(Rule::Required("Image URL is required"))
                .rule(Rule::Url("Invalid URL")),
        ],
        footer: None,
    }
}

/// Post form with the edit-mode labels.
pub fn edit_post_form() -> FormSpec {
    FormSpec {
        button_text: "EDIT",
        ..post_form()
    }
}

/// Initial values for the profile form, taken from the session.
pub fn profile_values(session: &Session) -> FormValues {
    [
        ("username", session.username.as_str()),
        ("email", session.email.as_str()),
        ("firstName", session.first_name.as_str()),
        ("lastName", session.last_name.as_str()),
    ]
    .into_iter()
    .collect()
}

pub fn post_values(form: &PostForm) -> FormValues {
    [
        ("title", form.title.as_str()),
        ("categoryId", form.category_id.as_str()),
        ("content", form.content.as_str()),
        ("image", form.image.as_str()),
    ]
    .into_iter()
    .collect()
}

pub fn registration(values: &FormValues) -> Registration {
    Registration {
        username: values.owned("username"),
        email: values.owned("email"),
        first_name: values.owned("firstName"),
        last_name: values.owned("lastName"),
        password: values.owned("password"),
    }
}

pub fn credentials(values: &FormValues) -> Credentials {
    Credentials {
        email: values.owned("email"),
        password: values.owned("password"),
    }
}

pub fn profile_update(values: &FormValues) -> ProfileUpdate {
    ProfileUpdate {
        username: Some(values.owned("username")),
        email: Some(values.owned("email")),
        first_name: Some(values.owned("firstName")),
        last_name: Some(values.owned("lastName")),
        password: None,
    }
}

/// The session's own fields plus the new password.
pub fn password_update(session: &Session, values: &FormValues) -> ProfileUpdate {
    ProfileUpdate {
        username: Some(session.username.clone()),
        email: Some(session.email.clone()),
        first_name: Some(session.first_name.clone()),
        last_name: Some(session.last_name.clone()),
        password: Some(values.owned("password")),
    }
}

pub fn post(values: &FormValues) -> PostForm {
    PostForm {
        category_id: values.owned("categoryId"),
        title: values.owned("title"),
        content: values.owned("content"),
        image: values.owned("image"),
    }
}

/// Run the post form rules over an already-built form.
pub fn check_post_form(form: &PostForm) -> ClientResult<()> {
    let mut state = FormState::new(post_form(), post_values(form));
    if state.submit().is_ok() {
        return Ok(());
    }
    let message = state
        .visible_errors()
        .first()
        .map(|(_, msg)| msg.to_string())
        .unwrap_or_else(|| "Invalid post".to_string());
    Err(ClientError::validation(message))
}
