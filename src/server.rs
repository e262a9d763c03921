use std::borrow::Cow;
use std::io;
use std::io::ErrorKind;
use std::sync::Arc;

use chrono::Local;
use ntex::web;
use ntex::web::HttpRequest;
use spdlog::{error, info, warn};

use crate::catalog::{load_category, posts_published_on, related_posts, search, RELATED_LIMIT};
use crate::config::Config;
use crate::content_api::{ApiError, ContentApi};
use crate::environment::{DocumentMeta, Environment, RequestEnvironment};
use crate::navigation::NavigationToken;
use crate::page_range::ButtonBudget;
use crate::post::Post;
use crate::query_string::QueryString;
use crate::remote_api::RemoteContentApi;
use crate::resolver::{PostResolver, ResolveError};
use crate::view::list_view::{PostPage, PostSummary};
use crate::view::post_view::{CategoryView, ErrorBody, PostView};

const VIEWPORT_WIDTH_HEADER: &str = "Viewport-Width";

struct AppState {
    resolver: PostResolver<RemoteContentApi>,
    budget: ButtonBudget,
    page_size: u32,
    site_name: String,
}

type State = web::types::State<Arc<AppState>>;

fn query_string(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

/// Width from `?width=`, then from the client hint header.
fn request_env(req: &HttpRequest, qs: &QueryString) -> RequestEnvironment {
    let width = qs.get_width().or_else(|| {
        req.headers()
            .get(VIEWPORT_WIDTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    });
    RequestEnvironment::new(width)
}

fn upstream_error(what: &str, err: ApiError) -> web::HttpResponse {
    error!("Error fetching {}: {}", what, err);
    web::HttpResponse::BadGateway()
        .json(&ErrorBody::new(format!("Error fetching {}: {}", what, err)))
}

fn render_page(state: &AppState, req: &HttpRequest, posts: &[&Post]) -> web::HttpResponse {
    let qs = query_string(req);
    let env = request_env(req, &qs);
    let max_buttons = state.budget.for_width(env.viewport_width());

    let page = PostPage::build(posts, qs.get_page(), state.page_size, max_buttons);
    web::HttpResponse::Ok().json(&page)
}

#[web::get("/api/posts")]
async fn list_posts(req: HttpRequest, state: State) -> web::HttpResponse {
    let posts = match state.resolver.api().list_posts().await {
        Ok(posts) => posts,
        Err(e) => return upstream_error("posts", e),
    };

    let posts: Vec<&Post> = posts.iter().collect();
    render_page(&state, &req, &posts)
}

#[web::get("/api/posts/{segment}")]
async fn view_post(req: HttpRequest, segment: web::types::Path<String>, state: State) -> web::HttpResponse {
    let segment = segment.into_inner();
    let qs = query_string(&req);
    let mut env = request_env(&req, &qs);

    let resolution = match state.resolver.resolve(&segment, &NavigationToken::detached()).await {
        Ok(resolution) => resolution,
        Err(ResolveError::NotFound { segment, attempts }) => {
            return web::HttpResponse::NotFound().json(&ErrorBody {
                error: format!("Post {} not found", segment),
                attempts: &attempts,
            });
        }
        Err(err @ ResolveError::Superseded(_)) => {
            return web::HttpResponse::Conflict().json(&ErrorBody::new(err.to_string()));
        }
    };

    env.set_metadata(DocumentMeta::for_post(&resolution.post, &state.site_name));

    // Related posts are a nice to have, the post is served without them
    let all_posts = state.resolver.post_list(&resolution).await.unwrap_or_else(|e| {
        warn!("Could not load related posts for {}: {}", resolution.post.id, e);
        Cow::Owned(vec![])
    });
    let related = related_posts(&all_posts, &resolution.post, RELATED_LIMIT);

    let view = PostView::new(&resolution, env.into_metadata(), &related);
    web::HttpResponse::Ok().json(&view)
}

#[web::get("/api/categories")]
async fn list_categories(state: State) -> web::HttpResponse {
    let categories = match state.resolver.api().list_categories().await {
        Ok(categories) => categories,
        Err(e) => return upstream_error("categories", e),
    };

    let views: Vec<CategoryView> = categories.iter().map(CategoryView::from).collect();
    web::HttpResponse::Ok().json(&views)
}

#[web::get("/api/categories/{slug}")]
async fn list_category_posts(req: HttpRequest, slug: web::types::Path<String>, state: State) -> web::HttpResponse {
    let slug = slug.into_inner();

    let posts = match load_category(state.resolver.api(), &slug).await {
        Ok(Some((_, posts))) => posts,
        Ok(None) => {
            return web::HttpResponse::NotFound()
                .json(&ErrorBody::new(format!("Category {} not found", slug)));
        }
        Err(e) => return upstream_error("category posts", e),
    };

    let posts: Vec<&Post> = posts.iter().collect();
    render_page(&state, &req, &posts)
}

#[web::get("/api/today")]
async fn list_today(state: State) -> web::HttpResponse {
    let posts = match state.resolver.api().list_posts().await {
        Ok(posts) => posts,
        Err(e) => return upstream_error("posts", e),
    };

    let today = Local::now().date_naive();
    let summaries: Vec<PostSummary> = posts_published_on(&posts, today).into_iter().map(PostSummary::from).collect();
    web::HttpResponse::Ok().json(&summaries)
}

#[web::get("/api/search")]
async fn search_posts(req: HttpRequest, state: State) -> web::HttpResponse {
    let qs = query_string(&req);
    let posts = match state.resolver.api().list_posts().await {
        Ok(posts) => posts,
        Err(e) => return upstream_error("posts", e),
    };

    let summaries: Vec<PostSummary> = search(&posts, qs.get_query()).into_iter().map(PostSummary::from).collect();
    web::HttpResponse::Ok().json(&summaries)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let api = RemoteContentApi::new(&config.api)
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    info!("Content API at {} (slug lookup: {})", config.api.base_url, config.api.slug_lookup);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        resolver: PostResolver::new(api),
        budget: config.pagination.button_budget(),
        page_size: config.pagination.page_size,
        site_name: config.site.name,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(list_posts)
            .service(view_post)
            .service(list_categories)
            .service(list_category_posts)
            .service(list_today)
            .service(search_posts)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
