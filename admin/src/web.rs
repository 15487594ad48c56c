//! Web UI Handlers
//!
//! Server-rendered admin pages:
//! - `GET /` - Home page
//! - `GET /admin/users` - List users
//! - `GET /admin/users/add`, `POST /admin/users/addP` - Create a user
//! - `GET /admin/users/show/{id}` - User detail
//! - `GET /admin/users/update/{id}`, `POST /admin/users/updateP` - Edit a user
//! - `GET /admin/users/delete/{id}` - Delete a user
//! - `GET /admin/blogs` - List blogs with their owner's nickname
//! - `GET /admin/blogs/add`, `POST /admin/blogs/addP` - Create a blog
//! - `GET|POST /admin/blogs/show/{id}` - Blog detail
//! - `GET /admin/blogs/update/{id}`, `POST /admin/blogs/updateP` - Edit a blog
//! - `GET /admin/blogs/delete/{id}` - Delete a blog
//!
//! Writes redirect back to the matching listing.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    database::{Database, DatabaseError},
    models::{Blog, NewBlogForm, NewUserForm, UpdateBlogForm, UpdateUserForm, User},
};

const USERS_PATH: &str = "/admin/users";
const BLOGS_PATH: &str = "/admin/blogs";

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

// Template rendering helper
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("Template error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Template error: {}", err),
                )
                    .into_response()
            }
        }
    }
}

/// Failures a handler can end in. Both render the error page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            WebError::NotFound { .. } => {
                tracing::warn!("{}", self);
                (StatusCode::NOT_FOUND, "Not Found")
            }
            WebError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error")
            }
        };

        (
            status,
            HtmlTemplate(ErrorTemplate {
                title: title.to_string(),
                description: self.to_string(),
            }),
        )
            .into_response()
    }
}

// Templates
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: String,
    description: String,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
struct UsersTemplate {
    users: Vec<User>,
}

#[derive(Template)]
#[template(path = "admin/addUser.html")]
struct AddUserTemplate {}

#[derive(Template)]
#[template(path = "admin/userDetail.html")]
struct UserDetailTemplate {
    user: User,
}

#[derive(Template)]
#[template(path = "admin/updateUser.html")]
struct UpdateUserTemplate {
    user: User,
}

#[derive(Template)]
#[template(path = "admin/blogs.html")]
struct BlogsTemplate {
    blogs: Vec<Blog>,
}

#[derive(Template)]
#[template(path = "admin/addBlog.html")]
struct AddBlogTemplate {
    users: Vec<User>,
}

#[derive(Template)]
#[template(path = "admin/blogDetail.html")]
struct BlogDetailTemplate {
    blog: Blog,
}

#[derive(Template)]
#[template(path = "admin/updateBlog.html")]
struct UpdateBlogTemplate {
    blog: Blog,
    users: Vec<User>,
}

type WebResult<T> = Result<T, WebError>;

async fn index() -> impl IntoResponse {
    HtmlTemplate(IndexTemplate {})
}

// ========== Users ==========

async fn all_users(db: &Database) -> WebResult<Vec<User>> {
    Ok(db.list_users().await?.into_iter().map(User::from).collect())
}

async fn find_user(db: &Database, id: i64) -> WebResult<User> {
    db.find_user(id)
        .await?
        .map(User::from)
        .ok_or(WebError::NotFound { entity: "User", id })
}

async fn list_users(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let users = all_users(&state.db).await?;
    Ok(HtmlTemplate(UsersTemplate { users }))
}

async fn add_user_form() -> impl IntoResponse {
    HtmlTemplate(AddUserTemplate {})
}

async fn add_user(
    State(state): State<AppState>,
    Form(form): Form<NewUserForm>,
) -> WebResult<Redirect> {
    let id = state.db.save_user(form.fields()).await?;
    tracing::info!(
        user_id = id,
        nickname = form.nickname.as_str(),
        first_name = form.first_name.as_str(),
        last_name = form.last_name.as_str(),
        "User created"
    );
    Ok(Redirect::to(USERS_PATH))
}

async fn show_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let user = find_user(&state.db, id).await?;
    Ok(HtmlTemplate(UserDetailTemplate { user }))
}

async fn update_user_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let user = find_user(&state.db, id).await?;
    Ok(HtmlTemplate(UpdateUserTemplate { user }))
}

async fn update_user(
    State(state): State<AppState>,
    Form(form): Form<UpdateUserForm>,
) -> WebResult<Redirect> {
    let touched = state.db.update_user(form.id, form.fields()).await?;
    if touched == 0 {
        tracing::warn!(user_id = form.id, "Update matched no user");
    } else {
        tracing::info!(user_id = form.id, "User updated");
    }
    Ok(Redirect::to(USERS_PATH))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Redirect> {
    let touched = state.db.delete_user(id).await?;
    if touched == 0 {
        tracing::warn!(user_id = id, "Delete matched no user");
    } else {
        tracing::info!(user_id = id, "User deleted");
    }
    Ok(Redirect::to(USERS_PATH))
}

// ========== Blogs ==========

async fn find_blog(db: &Database, id: i64) -> WebResult<Blog> {
    db.find_blog(id)
        .await?
        .map(Blog::from)
        .ok_or(WebError::NotFound { entity: "Blog", id })
}

async fn list_blogs(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let blogs = state
        .db
        .list_blogs()
        .await?
        .into_iter()
        .map(Blog::from)
        .collect();
    Ok(HtmlTemplate(BlogsTemplate { blogs }))
}

async fn add_blog_form(State(state): State<AppState>) -> WebResult<impl IntoResponse> {
    let users = all_users(&state.db).await?;
    Ok(HtmlTemplate(AddBlogTemplate { users }))
}

async fn add_blog(
    State(state): State<AppState>,
    Form(form): Form<NewBlogForm>,
) -> WebResult<Redirect> {
    let id = state.db.save_blog(form.fields()).await?;
    tracing::info!(
        blog_id = id,
        title = form.title.as_str(),
        user_id = form.user_id,
        "Blog created"
    );
    Ok(Redirect::to(BLOGS_PATH))
}

async fn show_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let blog = find_blog(&state.db, id).await?;
    Ok(HtmlTemplate(BlogDetailTemplate { blog }))
}

async fn update_blog_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<impl IntoResponse> {
    let blog = find_blog(&state.db, id).await?;
    let users = all_users(&state.db).await?;
    Ok(HtmlTemplate(UpdateBlogTemplate { blog, users }))
}

async fn update_blog(
    State(state): State<AppState>,
    Form(form): Form<UpdateBlogForm>,
) -> WebResult<Redirect> {
    let touched = state.db.update_blog(form.id, form.fields()).await?;
    if touched == 0 {
        tracing::warn!(blog_id = form.id, "Update matched no blog");
    } else {
        tracing::info!(
            blog_id = form.id,
            title = form.title.as_str(),
            user_id = form.user_id,
            "Blog updated"
        );
    }
    Ok(Redirect::to(BLOGS_PATH))
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Redirect> {
    let touched = state.db.delete_blog(id).await?;
    if touched == 0 {
        tracing::warn!(blog_id = id, "Delete matched no blog");
    } else {
        tracing::info!(blog_id = id, "Blog deleted");
    }
    Ok(Redirect::to(BLOGS_PATH))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/admin/users", get(list_users))
        .route("/admin/users/add", get(add_user_form))
        .route("/admin/users/addP", post(add_user))
        .route("/admin/users/show/{id}", get(show_user))
        .route("/admin/users/update/{id}", get(update_user_form))
        .route("/admin/users/updateP", post(update_user))
        .route("/admin/users/delete/{id}", get(delete_user))
        .route("/admin/blogs", get(list_blogs))
        .route("/admin/blogs/add", get(add_blog_form))
        .route("/admin/blogs/addP", post(add_blog))
        .route("/admin/blogs/show/{id}", get(show_blog).post(show_blog))
        .route("/admin/blogs/update/{id}", get(update_blog_form))
        .route("/admin/blogs/updateP", post(update_blog))
        .route("/admin/blogs/delete/{id}", get(delete_blog))
        .layer(TraceLayer::new_for_http())
}
