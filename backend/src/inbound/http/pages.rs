//! HTML page rendering.
//!
//! Three Tera templates are embedded at compile time and parsed once on
//! first use. Handlers pass typed view data in; no domain type reaches a
//! template directly, so the password hash can never leak into a page.

use std::sync::OnceLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::{Error, User};

use super::flash::FlashMessage;

static TEMPLATES: OnceLock<Tera> = OnceLock::new();

fn templates() -> &'static Tera {
    TEMPLATES.get_or_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("login.html", include_str!("../../../templates/login.html")),
            (
                "register.html",
                include_str!("../../../templates/register.html"),
            ),
            ("admin.html", include_str!("../../../templates/admin.html")),
        ])
        .unwrap_or_else(|error| panic!("page templates failed to parse: {error}"));
        tera
    })
}

/// Row of the admin listing. Deliberately excludes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListing {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&User> for UserListing {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().to_string(),
        }
    }
}

fn render(template: &str, context: &Context) -> Result<String, Error> {
    templates()
        .render(template, context)
        .map_err(|error| Error::internal(format!("failed to render {template}: {error}")))
}

fn page_context(flashes: &[FlashMessage]) -> Context {
    let mut context = Context::new();
    context.insert("flashes", flashes);
    context
}

/// Render the login form.
pub fn login_page(flashes: &[FlashMessage]) -> Result<String, Error> {
    render("login.html", &page_context(flashes))
}

/// Render the registration form.
pub fn register_page(flashes: &[FlashMessage]) -> Result<String, Error> {
    render("register.html", &page_context(flashes))
}

/// Render the admin listing of all accounts.
pub fn admin_page(flashes: &[FlashMessage], users: &[UserListing]) -> Result<String, Error> {
    let mut context = page_context(flashes);
    context.insert("users", users);
    render("admin.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> UserListing {
        UserListing {
            user_id: "u1".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            phone: "555".into(),
        }
    }

    #[test]
    fn login_page_shows_queued_flashes() {
        let flashes = vec![FlashMessage::success("Registration successful! Please login.")];
        let html = login_page(&flashes).expect("renders");
        assert!(html.contains("Registration successful! Please login."));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"name="password""#));
    }

    #[test]
    fn register_page_has_all_five_fields() {
        let html = register_page(&[]).expect("renders");
        for field in ["user_id", "name", "password", "email", "phone"] {
            assert!(html.contains(&format!(r#"name="{field}""#)), "missing {field}");
        }
    }

    #[test]
    fn admin_page_lists_users_without_hashes() {
        let html = admin_page(&[], &[listing()]).expect("renders");
        assert!(html.contains("u1"));
        assert!(html.contains("Alice"));
        assert!(html.contains("a@x.com"));
        assert!(!html.contains("argon2"));
    }

    #[test]
    fn flash_level_becomes_a_css_class() {
        let flashes = vec![FlashMessage::error("Invalid name or password!")];
        let html = login_page(&flashes).expect("renders");
        assert!(html.contains(r#"class="flash error""#));
    }

    #[test]
    fn user_listing_drops_the_password_hash() {
        let user = User::try_from_strings("u1", "Alice", "$argon2id$secret", "a@x.com", "555")
            .expect("valid user");
        let json = serde_json::to_string(&UserListing::from(&user)).expect("serialises");
        assert!(!json.contains("argon2"));
    }
}
