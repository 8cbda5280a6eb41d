//! The demo site: index, login, message board, slider and feedback.

use frap_core::components::{FeedbackForm, FieldSpec, Form, LoginForm, NavItem, Navbar, Sidebar, SidebarStyle, Slider, StarRating};
use frap_core::templates::context;
use frap_core::{markup, App, Component, DbValue, Method, MessageBoard, Orm, Request, Response, Result, Templates};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Table holding feedback submissions
pub const FEEDBACK_TABLE: &str = "feedback";

const LOGIN_USER: &str = "monika";
const LOGIN_PASSWORD: &str = "moni";
const LOGIN_FAILED: &str = "Invalid username or password";

/// Shared resources the handlers capture
#[derive(Clone)]
pub struct Site {
    board: MessageBoard,
    templates: Arc<Templates>,
    feedback_store: Option<Orm>,
    pending_feedback: Arc<Mutex<JoinSet<()>>>,
}

impl Site {
    /// Site over an existing board and template set
    #[must_use]
    pub fn new(board: MessageBoard, templates: Arc<Templates>) -> Self {
        Self {
            board,
            templates,
            feedback_store: None,
            pending_feedback: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Persist feedback submissions to `orm`
    #[must_use]
    pub fn with_feedback_store(mut self, orm: Orm) -> Self {
        self.feedback_store = Some(orm);
        self
    }

    /// Wait for every queued feedback insert to finish
    ///
    /// Call before closing the feedback store.
    pub async fn flush_feedback(&self) {
        let mut pending = std::mem::take(
            &mut *self
                .pending_feedback
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        while let Some(joined) = pending.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Feedback insert task failed");
            }
        }
    }

    /// Register URL rules and routes
    ///
    /// # Errors
    ///
    /// Returns an error if a URL rule is malformed.
    pub fn build(self) -> Result<App> {
        let index = self.clone();
        let login = self.clone();
        let message = self.clone();
        let feedback = self;

        Ok(App::builder("frap")
            .url_rule("index", "/")?
            .url_rule("login", "/login")?
            .url_rule("message", "/message")?
            .url_rule("submit", "/submit")?
            .route("/", &[Method::Get], move |_req, app| index.index(app))
            .route("/login", &[Method::Post, Method::Get], move |req, app| login.login(req, app))
            .route("/message", &[Method::Post, Method::Get], move |req, app| {
                message.message(req, app)
            })
            .route("/submit", &[Method::Post], |req, _app| Ok(submit(req)))
            .route("/submit_feedback", &[Method::Post], move |req, _app| {
                feedback.submit_feedback(req)
            })
            .build())
    }

    fn index(&self, app: &App) -> Result<Response> {
        let slider = Slider::new("Slider", 0, 100, 50, 1);
        let feedback = feedback_form();
        let html = self.templates.render(
            "index.html",
            context! {
                custom_slider_html => markup(slider.render_html()),
                custom_slider_js => markup(slider.render_js()),
                login_url => markup(app.url_for("login")?),
                submit_url => markup(app.url_for("submit")?),
                feedback_form => markup(feedback.render_html()),
                feedback_css => markup(feedback.render_css()),
                star => markup(StarRating::new("rating", 5).render_html()),
            },
        )?;
        Ok(Response::html(html))
    }

    fn login(&self, req: &Request, app: &App) -> Result<Response> {
        let mut error = None;
        if req.method == Method::Post {
            let username = req.form_value("username");
            if username == LOGIN_USER && req.form_value("pw") == LOGIN_PASSWORD {
                info!(username, "Login succeeded");
                return Ok(Response::redirect(&app.url_for("message")?));
            }
            warn!(username, "Login failed");
            error = Some(LOGIN_FAILED);
        }

        let login_form = LoginForm::new(
            app.url_for("login")?,
            &[
                FieldSpec::new("Username", "username", "text"),
                FieldSpec::new("Password", "pw", "password"),
            ],
        );
        let links = vec![
            NavItem::new("/", "Home"),
            NavItem::new("/about", "About"),
            NavItem::new("/contact", "Contact"),
        ];
        let navbar = Navbar::new(links.clone());
        let sidebar = Sidebar::new(
            links,
            SidebarStyle {
                background_color: "#f3f3f3".to_string(),
                top: Some(50),
                left: Some(0),
                ..SidebarStyle::default()
            },
        );

        let html = self.templates.render(
            "LoginPage.html",
            context! {
                login_form => markup(login_form.render_html()),
                login_css => markup(login_form.render_css()),
                navbar => markup(navbar.render_html()),
                navbar_css => markup(navbar.render_css()),
                sidebar => markup(sidebar.render_html()),
                sidebar_css => markup(sidebar.render_css()),
                error,
            },
        )?;
        Ok(Response::html(html))
    }

    fn message(&self, req: &Request, app: &App) -> Result<Response> {
        let message_url = app.url_for("message")?;
        if req.method == Method::Post {
            self.board.post(req.form_value("message"));
            return Ok(Response::redirect(&message_url));
        }

        let mut my_form = Form::with_method(message_url.clone(), "POST");
        my_form.add_field("Name", "name", "text");
        my_form.add_field("Email", "email", "email");
        my_form.add_field("Password", "password", "password");

        let html = self.templates.render(
            "Messageboard.html",
            context! {
                messages => self.board.messages(),
                message_url => markup(message_url),
                my_form => markup(my_form.render_html()),
            },
        )?;
        Ok(Response::html(html))
    }

    fn submit_feedback(&self, req: &Request) -> Result<Response> {
        let name = req.form_value("name");
        let email = req.form_value("email");
        let comment = req.form_value("feedback");
        let stars = req.form_value("stars");
        info!(name, email, feedback = comment, stars, "Feedback received");

        if let Some(orm) = &self.feedback_store {
            self.store_feedback(orm.clone(), name, email, comment, stars);
        }

        let feedback = feedback_form();
        let html = self.templates.render(
            "index.html",
            context! {
                feedback_form => markup(feedback.render_html()),
                feedback_css => markup(feedback.render_css()),
            },
        )?;
        Ok(Response::html(html))
    }

    /// Insert a submission in the background; the handler doesn't wait on it
    fn store_feedback(&self, orm: Orm, name: &str, email: &str, comment: &str, stars: &str) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No Tokio runtime, feedback not stored");
            return;
        };
        let row = [
            ("name", DbValue::from(name)),
            ("email", DbValue::from(email)),
            ("feedback", DbValue::from(comment)),
            ("stars", DbValue::from(stars.parse::<i64>().ok())),
        ];

        let mut pending = self
            .pending_feedback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while pending.try_join_next().is_some() {}
        pending.spawn_on(
            async move {
                if let Err(e) = orm.insert(FEEDBACK_TABLE, &row).await {
                    warn!(error = %e, "Failed to store feedback");
                }
            },
            &runtime,
        );
    }
}

fn feedback_form() -> FeedbackForm {
    FeedbackForm::new("/submit_feedback", "POST")
}

fn submit(req: &Request) -> Response {
    let value = req.form_value("Slider");
    info!(value, "Slider submitted");
    Response::text(format!("Slider Value: {value}"))
}

/// Create the feedback table if it doesn't exist
///
/// # Errors
///
/// Returns `Error::Database` on SQL failure.
pub async fn prepare_feedback_table(orm: &Orm) -> Result<()> {
    orm.create_table(
        FEEDBACK_TABLE,
        &["name TEXT", "email TEXT", "feedback TEXT", "stars INTEGER"],
    )
    .await
}
