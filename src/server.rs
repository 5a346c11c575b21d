use std::io;
use std::sync::Arc;

use chrono::Utc;
use ntex::http::StatusCode;
use ntex::util::Bytes;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::error;

use crate::api::{blogs_response, ApiResponse};
use crate::auth::{authorize, is_logged_in, Access};
use crate::blog_store::BlogStore;
use crate::config::Config;
use crate::page_processor::*;
use crate::publish::{publish, Platform};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const FEED_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate";

struct AppState {
    config: Config,
}

type State = web::types::State<Arc<AppState>>;

/// Redirect mandated by the session rules for this page, if any.
fn gate(req: &HttpRequest, config: &Config) -> Option<web::HttpResponse> {
    let cookie_header = req.headers().get("cookie").and_then(|v| v.to_str().ok());
    let logged_in = is_logged_in(cookie_header, config.session_cookie(), config.session_token());

    match authorize(req.path(), logged_in) {
        Access::Allow => None,
        Access::Redirect(location) => Some(web::HttpResponse::Found()
            .header("Location", location)
            .content_type(HTML_CONTENT_TYPE)
            .finish()),
    }
}

fn html_response(page: io::Result<String>, what: &str) -> web::HttpResponse {
    match page {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type(HTML_CONTENT_TYPE)
            .body(rendered),
        Err(e) => {
            error!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

fn api_response(res: ApiResponse) -> web::HttpResponse {
    web::HttpResponse::build(res.status).json(&res.body)
}

fn feed_response(feed: io::Result<Vec<u8>>, content_type: &str, what: &str) -> web::HttpResponse {
    match feed {
        Ok(body) => web::HttpResponse::Ok()
            .content_type(content_type)
            .header("Cache-Control", FEED_CACHE_CONTROL)
            .body(body),
        Err(e) => {
            error!("Error generating {}: {}", what, e);
            api_response(ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, &format!("Failed to generate {}", what)))
        }
    }
}

#[web::get("/")]
async fn index(req: HttpRequest, state: State) -> web::HttpResponse {
    if let Some(redirect) = gate(&req, &state.config) {
        return redirect;
    }
    html_response(render_index(&state.config, Utc::now().date_naive()), "index")
}

#[web::get("/blog")]
async fn blog_list(req: HttpRequest, state: State) -> web::HttpResponse {
    if let Some(redirect) = gate(&req, &state.config) {
        return redirect;
    }
    let (cur_page, filter) = list_params(req.uri().query());
    html_response(render_list(&state.config, cur_page, &filter), "post list")
}

#[web::get("/blog/{slug}")]
async fn blog_post(req: HttpRequest, slug: web::types::Path<String>, state: State) -> web::HttpResponse {
    if let Some(redirect) = gate(&req, &state.config) {
        return redirect;
    }

    let slug = slug.into_inner();
    match render_post(&state.config, &slug) {
        Ok(Some(rendered)) => web::HttpResponse::Ok()
            .content_type(HTML_CONTENT_TYPE)
            .body(rendered),
        Ok(None) => web::HttpResponse::NotFound()
            .content_type(HTML_CONTENT_TYPE)
            .body(format!("Post {} not found", slug)),
        Err(e) => html_response(Err(e), &format!("post {}", slug)),
    }
}

#[web::get("/admin")]
async fn admin(req: HttpRequest, state: State) -> web::HttpResponse {
    if let Some(redirect) = gate(&req, &state.config) {
        return redirect;
    }
    html_response(render_admin(&state.config), "admin")
}

fn site_page(req: &HttpRequest, state: &State, path: &str) -> web::HttpResponse {
    if let Some(redirect) = gate(req, &state.config) {
        return redirect;
    }
    html_response(render_site_page(&state.config, path), path)
}

#[web::get("/chat")]
async fn chat(req: HttpRequest, state: State) -> web::HttpResponse {
    site_page(&req, &state, "/chat")
}

#[web::get("/login")]
async fn login(req: HttpRequest, state: State) -> web::HttpResponse {
    site_page(&req, &state, "/login")
}

#[web::get("/register")]
async fn register(req: HttpRequest, state: State) -> web::HttpResponse {
    site_page(&req, &state, "/register")
}

#[web::get("/api/blogs")]
async fn api_blogs(state: State) -> web::HttpResponse {
    let store = BlogStore::new(&state.config.paths.content_dir);
    api_response(blogs_response(&store))
}

#[web::post("/api/publish/substack")]
async fn publish_substack(body: Bytes, state: State) -> web::HttpResponse {
    let store = BlogStore::new(&state.config.paths.content_dir);
    api_response(publish(Platform::Substack, &store, state.config.site_url(), &body))
}

#[web::post("/api/publish/medium")]
async fn publish_medium(body: Bytes, state: State) -> web::HttpResponse {
    let store = BlogStore::new(&state.config.paths.content_dir);
    api_response(publish(Platform::Medium, &store, state.config.site_url(), &body))
}

#[web::get("/api/rss")]
async fn rss(state: State) -> web::HttpResponse {
    feed_response(render_rss(&state.config, Utc::now()), XML_CONTENT_TYPE, "RSS feed")
}

#[web::get("/api/atom.xml")]
async fn atom(state: State) -> web::HttpResponse {
    feed_response(render_atom(&state.config, Utc::now()), "application/atom+xml; charset=utf-8", "Atom feed")
}

#[web::get("/api/feed.json")]
async fn json_feed(state: State) -> web::HttpResponse {
    feed_response(render_json_feed(&state.config, Utc::now()), "application/feed+json; charset=utf-8", "JSON feed")
}

#[web::get("/sitemap.xml")]
async fn sitemap(state: State) -> web::HttpResponse {
    feed_response(render_sitemap(&state.config, Utc::now()), XML_CONTENT_TYPE, "sitemap")
}

#[web::get("/public/{file_name}*")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    get_file(&state.config.paths.public_dir, &path.into_inner())
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState { config });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(blog_list)
            .service(blog_post)
            .service(admin)
            .service(chat)
            .service(login)
            .service(register)
            .service(api_blogs)
            .service(publish_substack)
            .service(publish_medium)
            .service(rss)
            .service(atom)
            .service(json_feed)
            .service(sitemap)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
