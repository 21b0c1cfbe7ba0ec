//! Mock REST API server
//!
//! Serves the Museume endpoints from in-memory fixtures so the client, store
//! and page controllers can be exercised without the real backend. Requests
//! are answered as the single signed-in member [`MOCK_MEMBER_ID`]; member
//! endpoints require the bearer token [`MOCK_TOKEN`].

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::gate::FREE_TIER_IMAGE_LIMIT;
use museume_types::{
    ArtistClass, ArtistClassQuery, CheckoutRequest, ClassSignupRequest, ClassStatus, ClassType,
    ConfirmPaymentRequest, Contest, ContestQuery, ContestSubmission, IdOrNamed, ImageCount, Inquiry,
    MemberSummary, NamedRecord, Page, Plan, PlanInterval, RecordId, SubscriptionStatus, Work,
    WorkImage, WorkQuery,
};

/// Member the mock answers as.
pub const MOCK_MEMBER_ID: RecordId = 1;

/// Bearer token accepted by member endpoints.
pub const MOCK_TOKEN: &str = "mock-member-token";

/// Mock REST API server configuration
#[derive(Debug, Clone)]
pub struct MockRestApiConfig {
    pub host: String,
    /// `0` picks a free port
    pub port: u16,
    pub page_size: usize,
}

impl Default for MockRestApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            page_size: 10,
        }
    }
}

/// Mock data container
#[derive(Debug, Clone)]
pub struct MockData {
    pub token: Option<String>,
    pub works: Vec<Work>,
    pub tags: Vec<NamedRecord>,
    pub categories: Vec<NamedRecord>,
    /// Members whose works make up the family gallery
    pub family_members: Vec<RecordId>,
    pub contests: Vec<Contest>,
    pub submissions: HashSet<(RecordId, RecordId)>,
    pub artist_classes: Vec<ArtistClass>,
    pub signed_up: HashSet<RecordId>,
    pub pending_payments: HashSet<String>,
    pub plans: Vec<Plan>,
    pub subscription: SubscriptionStatus,
    pub inquiries: Vec<Inquiry>,
    next_work_id: RecordId,
    next_image_id: RecordId,
}

impl Default for MockData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockData {
    pub fn new() -> Self {
        let tags = named(&[(1, "Landscape"), (2, "Portrait"), (3, "Abstract")]);
        let categories = named(&[(1, "Painting"), (2, "Photography"), (3, "Sculpture")]);

        let works = vec![
            mock_work(1, "Harbor at Dawn", 1, true, &[1], 1, 2, 3),
            mock_work(2, "Quiet Portrait", 1, false, &[2], 1, 1, 0),
            mock_work(3, "Blue Field", 2, true, &[3], 2, 1, 1),
            mock_work(4, "Sunset Over Kyoto", 3, true, &[1], 2, 1, 5),
            mock_work(5, "Sunset Study", 3, true, &[1, 3], 1, 1, 0),
        ];

        let contests = vec![
            mock_contest(1, "Sunset Colors", "open"),
            mock_contest(2, "Sunset Silhouettes", "open"),
            mock_contest(3, "Sunset Reflections", "closed"),
            mock_contest(4, "Spring Portraits", "open"),
            mock_contest(5, "Urban Night", "closed"),
        ];

        let artist_classes = vec![
            mock_class(1, "Watercolor Basics", true, ClassType::Recorded, None, ClassStatus::Completed),
            mock_class(
                2,
                "Ink Landscapes",
                false,
                ClassType::RealTime,
                Some(Decimal::new(300000, 2)),
                ClassStatus::Scheduled,
            ),
            mock_class(
                3,
                "Portrait Lab",
                false,
                ClassType::Recorded,
                Some(Decimal::new(150000, 2)),
                ClassStatus::Ongoing,
            ),
        ];

        let plans = vec![
            mock_plan("price_free", "Free", 0, PlanInterval::Month),
            mock_plan("price_monthly", "Premium", 980, PlanInterval::Month),
            mock_plan("price_yearly", "Premium", 9800, PlanInterval::Year),
        ];

        Self {
            token: Some(MOCK_TOKEN.to_string()),
            next_work_id: works.len() as RecordId + 1,
            next_image_id: 1000,
            works,
            tags,
            categories,
            family_members: vec![2],
            contests,
            submissions: HashSet::new(),
            artist_classes,
            signed_up: HashSet::new(),
            pending_payments: HashSet::new(),
            plans,
            subscription: SubscriptionStatus::free_tier(),
            inquiries: Vec::new(),
        }
    }

    /// Start the member on an active subscription to `plan_id`.
    pub fn subscribed_to(mut self, plan_id: &str) -> Self {
        let plan = self.plans.iter().find(|p| p.id == plan_id).cloned();
        self.subscription = SubscriptionStatus {
            active: plan.is_some(),
            plan,
        };
        self
    }

    fn member_images(&self) -> u32 {
        self.works
            .iter()
            .filter(|w| owner(w) == Some(MOCK_MEMBER_ID))
            .map(|w| w.images_data.len() as u32)
            .sum()
    }

    fn work_mut(&mut self, id: RecordId) -> MockResult<&mut Work> {
        self.works
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| not_found("Work"))
    }
}

fn named(pairs: &[(RecordId, &str)]) -> Vec<NamedRecord> {
    pairs
        .iter()
        .map(|(id, name)| NamedRecord {
            id: *id,
            name: name.to_string(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn mock_work(
    id: RecordId,
    title: &str,
    member: RecordId,
    is_public: bool,
    tags: &[RecordId],
    category: RecordId,
    images: usize,
    likes: u64,
) -> Work {
    Work {
        id,
        title: Some(title.to_string()),
        description: Some(format!("{} (mock)", title)),
        member: Some(MemberSummary {
            id: member,
            username: Some(format!("member{}", member)),
            first_name: None,
        }),
        is_public,
        price: None,
        tags: tags.iter().map(|t| IdOrNamed::Id(*t)).collect(),
        category: Some(IdOrNamed::Id(category)),
        images_data: (0..images)
            .map(|i| WorkImage {
                id: id * 10 + i as RecordId,
                image_url: format!("http://cdn.mock/works/{}/{}.png", id, i),
            })
            .collect(),
        likes_count: likes,
        is_liked_by_user: false,
    }
}

fn mock_contest(id: RecordId, name: &str, status: &str) -> Contest {
    Contest {
        id,
        name: Some(name.to_string()),
        description: Some(format!("{} contest", name)),
        thumbnail: None,
        start_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).single(),
        end_date: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).single(),
        status: Some(status.to_string()),
        extra: Default::default(),
    }
}

fn mock_class(
    id: RecordId,
    name: &str,
    is_free: bool,
    class_type: ClassType,
    cost: Option<Decimal>,
    status: ClassStatus,
) -> ArtistClass {
    ArtistClass {
        id,
        name: name.to_string(),
        category: Some(IdOrNamed::Id(1)),
        tags: vec![1],
        is_free,
        class_type: Some(class_type),
        currency: Some("jpy".to_string()),
        thumbnail: None,
        url: Some(format!("https://video.mock/classes/{}", id)),
        start_date: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).single(),
        end_date: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).single(),
        cost,
        description: None,
        status,
        extra: Default::default(),
    }
}

fn mock_plan(id: &str, name: &str, amount: i64, interval: PlanInterval) -> Plan {
    Plan {
        id: id.to_string(),
        name: Some(name.to_string()),
        amount,
        currency: "jpy".to_string(),
        interval,
    }
}

fn owner(work: &Work) -> Option<RecordId> {
    work.member.as_ref().map(|m| m.id)
}

// ============================================================================
// SERVER
// ============================================================================

/// Mock application state
#[derive(Clone)]
pub struct MockAppState {
    pub data: Arc<RwLock<MockData>>,
    page_size: usize,
}

/// Mock REST API server
pub struct MockRestApiServer {
    config: MockRestApiConfig,
    app_state: MockAppState,
}

impl MockRestApiServer {
    pub fn new(config: MockRestApiConfig) -> Self {
        Self::with_data(config, MockData::new())
    }

    pub fn with_data(config: MockRestApiConfig, data: MockData) -> Self {
        let app_state = MockAppState {
            data: Arc::new(RwLock::new(data)),
            page_size: config.page_size.max(1),
        };
        Self { config, app_state }
    }

    /// Shared fixture state, for assertions after requests.
    pub fn state(&self) -> MockAppState {
        self.app_state.clone()
    }

    /// Serve until the process exits.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting mock Museume API on {}", addr);
        axum::serve(listener, self.create_router()).await?;
        Ok(())
    }

    /// Bind and serve in the background; returns the bound address.
    pub async fn spawn(self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local = listener.local_addr()?;
        let app = self.create_router();
        info!("Mock Museume API listening on {}", local);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!("mock API stopped: {}", e);
            }
        });
        Ok(local)
    }

    fn create_router(&self) -> Router {
        Router::new()
            // works
            .route("/api/works/", get(my_works).post(add_work))
            .route("/api/works/public/", get(public_works))
            .route("/api/works/my-collection/", get(my_collection))
            .route("/api/works/family-gallery/", get(family_gallery))
            .route("/api/works/tags/", get(list_tags))
            .route("/api/works/categories/", get(list_categories))
            .route("/api/works/member/:id/", get(member_works))
            .route("/api/works/:id/", get(work_detail))
            .route("/api/works/:id/update/", post(update_work))
            .route("/api/works/:id/delete/", delete(delete_work))
            .route("/api/works/:id/like/", post(like_work))
            .route("/api/works/:id/unlike/", post(unlike_work))
            // contests
            .route("/api/contests", get(list_contests))
            .route("/api/contests/my-contests", get(my_contests))
            .route("/api/contests/submit-work/", post(submit_work))
            .route("/api/contests/:id", get(contest_detail))
            // artist classes
            .route("/api/artist-classes", get(list_classes))
            .route("/api/artist-classes/my-classes", get(my_classes))
            .route("/api/artist-classes/signup/", post(class_signup))
            .route("/api/artist-classes/confirm-payment/", post(confirm_payment))
            .route("/api/artist-classes/:id", get(class_detail))
            .route("/api/artist-classes/:id/video-url/", post(class_video_url))
            // inquiry + billing
            .route("/api/inquiry/", post(send_inquiry))
            .route("/api/billing/plans/", get(list_plans))
            .route("/api/billing/create-checkout-session/", post(create_checkout))
            .route("/api/billing/subscription-status/", get(subscription_status))
            .route("/api/billing/cancel-subscription/", post(cancel_subscription))
            .route("/api/billing/user-image-count/", get(user_image_count))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any)),
            )
            .with_state(self.app_state.clone())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

type Failure = (StatusCode, Json<Value>);
type MockResult<T> = Result<T, Failure>;

fn fail(status: StatusCode, key: &str, message: impl Into<String>) -> Failure {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::String(message.into()));
    (status, Json(Value::Object(body)))
}

fn not_found(what: &str) -> Failure {
    fail(StatusCode::NOT_FOUND, "message", format!("{} not found", what))
}

fn bad_request(err: impl std::fmt::Display) -> Failure {
    fail(StatusCode::BAD_REQUEST, "error", err.to_string())
}

fn authorize(headers: &HeaderMap, data: &MockData) -> MockResult<()> {
    let Some(expected) = &data.token else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(fail(
            StatusCode::UNAUTHORIZED,
            "detail",
            "Authentication credentials were not provided.",
        ))
    }
}

/// DRF-style page slice; an out-of-range page past the first is a 404.
fn paginate<T: Clone>(items: Vec<T>, page: u32, page_size: usize, path: &str) -> MockResult<Page<T>> {
    let page = page.max(1) as usize;
    let start = (page - 1) * page_size;
    if start >= items.len() && page > 1 {
        return Err(fail(StatusCode::NOT_FOUND, "detail", "Invalid page."));
    }
    let end = (start + page_size).min(items.len());
    let results = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
    Ok(Page {
        count: items.len() as u64,
        next: (end < items.len()).then(|| format!("{}?page={}", path, page + 1)),
        previous: (page > 1).then(|| format!("{}?page={}", path, page - 1)),
        results,
    })
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn work_matches(work: &Work, query: &WorkQuery) -> bool {
    if !query.search.is_empty()
        && !contains(work.title.as_deref(), &query.search)
        && !contains(work.description.as_deref(), &query.search)
    {
        return false;
    }
    if let Ok(category) = query.category.parse::<RecordId>() {
        if work.category_id() != Some(category) {
            return false;
        }
    }
    let wanted: Vec<RecordId> = query
        .tags
        .split(',')
        .filter_map(|t| t.trim().parse().ok())
        .collect();
    wanted.is_empty() || work.tag_ids().iter().any(|t| wanted.contains(t))
}

async fn list_works(
    state: &MockAppState,
    query: &WorkQuery,
    path: &str,
    include: impl Fn(&MockData, &Work) -> bool,
) -> MockResult<Json<Page<Work>>> {
    let data = state.data.read().await;
    let works: Vec<Work> = data
        .works
        .iter()
        .filter(|w| include(&data, w) && work_matches(w, query))
        .cloned()
        .collect();
    paginate(works, query.page, state.page_size, path).map(Json)
}

#[derive(Debug, Default)]
struct WorkForm {
    title: Option<String>,
    description: Option<String>,
    category: Option<RecordId>,
    tags: Vec<RecordId>,
    is_public: Option<bool>,
    images: Vec<String>,
}

async fn read_work_form(mut multipart: Multipart) -> MockResult<WorkForm> {
    let mut form = WorkForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            let file_name = field.file_name().unwrap_or("image.jpg").to_string();
            field.bytes().await.map_err(bad_request)?;
            form.images.push(file_name);
            continue;
        }
        let value = field.text().await.map_err(bad_request)?;
        match name.as_str() {
            "title" => form.title = Some(value),
            "description" => form.description = Some(value),
            "category" => form.category = value.trim().parse().ok(),
            "tags" => form.tags.extend(value.trim().parse::<RecordId>().ok()),
            "is_public" => form.is_public = Some(value == "true"),
            _ => {}
        }
    }
    Ok(form)
}

fn attach_images(data: &mut MockData, work_id: RecordId, files: &[String]) -> Vec<WorkImage> {
    files
        .iter()
        .map(|file| {
            let id = data.next_image_id;
            data.next_image_id += 1;
            WorkImage {
                id,
                image_url: format!("http://cdn.mock/works/{}/{}", work_id, file),
            }
        })
        .collect()
}

// ============================================================================
// WORK HANDLERS
// ============================================================================

async fn my_works(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Query(query): Query<WorkQuery>,
) -> MockResult<Json<Page<Work>>> {
    authorize(&headers, &*state.data.read().await)?;
    list_works(&state, &query, "/api/works/", |_, w| owner(w) == Some(MOCK_MEMBER_ID)).await
}

async fn public_works(
    State(state): State<MockAppState>,
    Query(query): Query<WorkQuery>,
) -> MockResult<Json<Page<Work>>> {
    list_works(&state, &query, "/api/works/public/", |_, w| w.is_public).await
}

async fn my_collection(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Query(query): Query<WorkQuery>,
) -> MockResult<Json<Page<Work>>> {
    authorize(&headers, &*state.data.read().await)?;
    list_works(&state, &query, "/api/works/my-collection/", |_, w| w.is_liked_by_user).await
}

async fn family_gallery(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Query(query): Query<WorkQuery>,
) -> MockResult<Json<Page<Work>>> {
    authorize(&headers, &*state.data.read().await)?;
    list_works(&state, &query, "/api/works/family-gallery/", |data, w| {
        owner(w).map(|m| data.family_members.contains(&m)).unwrap_or(false)
    })
    .await
}

async fn member_works(
    State(state): State<MockAppState>,
    Path(member_id): Path<RecordId>,
    Query(query): Query<WorkQuery>,
) -> MockResult<Json<Page<Work>>> {
    let path = format!("/api/works/member/{}/", member_id);
    list_works(&state, &query, &path, |_, w| {
        w.is_public && owner(w) == Some(member_id)
    })
    .await
}

async fn work_detail(
    State(state): State<MockAppState>,
    Path(id): Path<RecordId>,
) -> MockResult<Json<Work>> {
    let data = state.data.read().await;
    data.works
        .iter()
        .find(|w| w.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Work"))
}

async fn add_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> MockResult<(StatusCode, Json<Work>)> {
    authorize(&headers, &*state.data.read().await)?;
    let form = read_work_form(multipart).await?;
    if form.images.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "error", "At least one image is required"));
    }

    let mut data = state.data.write().await;
    let is_paid = data.subscription.is_paid();
    if !is_paid && data.member_images() as usize + form.images.len() > FREE_TIER_IMAGE_LIMIT as usize {
        return Err(fail(
            StatusCode::FORBIDDEN,
            "error",
            "Free plan image limit reached",
        ));
    }

    let id = data.next_work_id;
    data.next_work_id += 1;
    let images = attach_images(&mut data, id, &form.images);
    let work = Work {
        id,
        title: form.title,
        description: form.description,
        member: Some(MemberSummary {
            id: MOCK_MEMBER_ID,
            username: Some(format!("member{}", MOCK_MEMBER_ID)),
            first_name: None,
        }),
        is_public: form.is_public.unwrap_or(false),
        price: None,
        tags: form.tags.into_iter().map(IdOrNamed::Id).collect(),
        category: form.category.map(IdOrNamed::Id),
        images_data: images,
        likes_count: 0,
        is_liked_by_user: false,
    };
    data.works.insert(0, work.clone());
    info!("Mock API: created work {}", id);
    Ok((StatusCode::CREATED, Json(work)))
}

async fn update_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
    multipart: Multipart,
) -> MockResult<Json<Value>> {
    authorize(&headers, &*state.data.read().await)?;
    let form = read_work_form(multipart).await?;

    let mut data = state.data.write().await;
    if owner(data.work_mut(id)?) != Some(MOCK_MEMBER_ID) {
        return Err(fail(StatusCode::FORBIDDEN, "error", "You can only edit your own works"));
    }
    let added = attach_images(&mut data, id, &form.images);
    let work = data.work_mut(id)?;
    if let Some(title) = form.title {
        work.title = Some(title);
    }
    if let Some(description) = form.description {
        work.description = Some(description);
    }
    if let Some(category) = form.category {
        work.category = Some(IdOrNamed::Id(category));
    }
    if !form.tags.is_empty() {
        work.tags = form.tags.into_iter().map(IdOrNamed::Id).collect();
    }
    if let Some(is_public) = form.is_public {
        work.is_public = is_public;
    }
    work.images_data.extend(added);

    Ok(Json(json!({
        "message": "Work updated successfully",
        "work": work.clone(),
    })))
}

async fn delete_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> MockResult<StatusCode> {
    let mut data = state.data.write().await;
    authorize(&headers, &data)?;
    if owner(data.work_mut(id)?) != Some(MOCK_MEMBER_ID) {
        return Err(fail(StatusCode::FORBIDDEN, "error", "You can only delete your own works"));
    }
    data.works.retain(|w| w.id != id);
    info!("Mock API: deleted work {}", id);
    Ok(StatusCode::NO_CONTENT)
}

async fn like_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> MockResult<Json<Value>> {
    set_liked(&state, &headers, id, true).await
}

async fn unlike_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> MockResult<Json<Value>> {
    set_liked(&state, &headers, id, false).await
}

async fn set_liked(
    state: &MockAppState,
    headers: &HeaderMap,
    id: RecordId,
    liked: bool,
) -> MockResult<Json<Value>> {
    let mut data = state.data.write().await;
    authorize(headers, &data)?;
    let work = data.work_mut(id)?;
    match (work.is_liked_by_user, liked) {
        (true, true) => Err(bad_request("You have already liked this work")),
        (false, false) => Err(bad_request("You have not liked this work")),
        _ => {
            work.is_liked_by_user = liked;
            work.likes_count = if liked {
                work.likes_count + 1
            } else {
                work.likes_count.saturating_sub(1)
            };
            let message = if liked { "Work liked" } else { "Work unliked" };
            Ok(Json(json!({ "message": message, "likes_count": work.likes_count })))
        }
    }
}

async fn list_tags(State(state): State<MockAppState>) -> Json<Vec<NamedRecord>> {
    Json(state.data.read().await.tags.clone())
}

async fn list_categories(State(state): State<MockAppState>) -> Json<Vec<NamedRecord>> {
    Json(state.data.read().await.categories.clone())
}

// ============================================================================
// CONTEST + CLASS HANDLERS
// ============================================================================

fn contest_matches(contest: &Contest, query: &ContestQuery) -> bool {
    (query.search.is_empty()
        || contains(contest.name.as_deref(), &query.search)
        || contains(contest.description.as_deref(), &query.search))
        && (query.filter.is_empty() || contest.status.as_deref() == Some(query.filter.as_str()))
}

async fn list_contests(
    State(state): State<MockAppState>,
    Query(query): Query<ContestQuery>,
) -> MockResult<Json<Page<Contest>>> {
    let data = state.data.read().await;
    let contests = data
        .contests
        .iter()
        .filter(|c| contest_matches(c, &query))
        .cloned()
        .collect();
    paginate(contests, query.page, state.page_size, "/api/contests").map(Json)
}

async fn my_contests(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Query(query): Query<ContestQuery>,
) -> MockResult<Json<Page<Contest>>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    let entered: HashSet<RecordId> = data.submissions.iter().map(|(c, _)| *c).collect();
    let contests = data
        .contests
        .iter()
        .filter(|c| entered.contains(&c.id) && contest_matches(c, &query))
        .cloned()
        .collect();
    paginate(contests, query.page, state.page_size, "/api/contests/my-contests").map(Json)
}

async fn contest_detail(
    State(state): State<MockAppState>,
    Path(id): Path<RecordId>,
) -> MockResult<Json<Contest>> {
    let data = state.data.read().await;
    data.contests
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Contest"))
}

async fn submit_work(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Json(body): Json<ContestSubmission>,
) -> MockResult<Json<Value>> {
    let mut data = state.data.write().await;
    authorize(&headers, &data)?;
    let contest = data
        .contests
        .iter()
        .find(|c| c.id == body.contest_id)
        .ok_or_else(|| not_found("Contest"))?;
    if contest.status.as_deref() != Some("open") {
        return Err(bad_request("This contest is closed"));
    }
    if !data
        .works
        .iter()
        .any(|w| w.id == body.work_id && owner(w) == Some(MOCK_MEMBER_ID))
    {
        return Err(not_found("Work"));
    }
    if !data.submissions.insert((body.contest_id, body.work_id)) {
        return Err(bad_request("Work already submitted to this contest"));
    }
    Ok(Json(json!({ "message": "Work submitted to contest" })))
}

fn class_matches(class: &ArtistClass, query: &ArtistClassQuery) -> bool {
    (query.search.is_empty() || contains(Some(&class.name), &query.search))
        && query.is_free.map_or(true, |f| class.is_free == f)
        && query.class_type.map_or(true, |t| class.class_type == Some(t))
        && query.status.map_or(true, |s| class.status == s)
}

async fn list_classes(
    State(state): State<MockAppState>,
    Query(query): Query<ArtistClassQuery>,
) -> MockResult<Json<Page<ArtistClass>>> {
    let data = state.data.read().await;
    let classes = data
        .artist_classes
        .iter()
        .filter(|c| class_matches(c, &query))
        .cloned()
        .collect();
    paginate(classes, query.page, state.page_size, "/api/artist-classes").map(Json)
}

async fn my_classes(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Query(query): Query<ArtistClassQuery>,
) -> MockResult<Json<Page<ArtistClass>>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    let classes = data
        .artist_classes
        .iter()
        .filter(|c| data.signed_up.contains(&c.id) && class_matches(c, &query))
        .cloned()
        .collect();
    paginate(classes, query.page, state.page_size, "/api/artist-classes/my-classes").map(Json)
}

async fn class_detail(
    State(state): State<MockAppState>,
    Path(id): Path<RecordId>,
) -> MockResult<Json<ArtistClass>> {
    let data = state.data.read().await;
    let mut class = data
        .artist_classes
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| not_found("Artist class"))?;
    class
        .extra
        .insert("is_signed_up".to_string(), json!(data.signed_up.contains(&id)));
    Ok(Json(class))
}

async fn class_signup(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Json(body): Json<ClassSignupRequest>,
) -> MockResult<Json<Value>> {
    let mut data = state.data.write().await;
    authorize(&headers, &data)?;
    let class = data
        .artist_classes
        .iter()
        .find(|c| c.id == body.artist_class)
        .cloned()
        .ok_or_else(|| not_found("Artist class"))?;
    if data.signed_up.contains(&class.id) {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            "errors",
            "You are already signed up for this class",
        ));
    }

    if class.is_free {
        data.signed_up.insert(class.id);
        return Ok(Json(json!({
            "message": "Signed up successfully",
            "data": { "artist_class": class.id },
        })));
    }

    let intent = format!("pi_mock_{}", class.id);
    data.pending_payments.insert(intent.clone());
    Ok(Json(json!({
        "payment_intent_client_secret": format!("{}_secret", intent),
        "amount": class.cost,
        "currency": class.currency,
    })))
}

async fn confirm_payment(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Json(body): Json<ConfirmPaymentRequest>,
) -> MockResult<Json<Value>> {
    let mut data = state.data.write().await;
    authorize(&headers, &data)?;
    if !data.pending_payments.remove(&body.payment_intent) {
        return Err(bad_request("Invalid payment intent"));
    }
    let class_id = body
        .payment_intent
        .trim_start_matches("pi_mock_")
        .parse::<RecordId>()
        .map_err(bad_request)?;
    data.signed_up.insert(class_id);
    Ok(Json(json!({ "message": "Payment confirmed" })))
}

async fn class_video_url(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> MockResult<Json<Value>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    let class = data
        .artist_classes
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("Artist class"))?;
    if !data.signed_up.contains(&id) {
        return Err(fail(
            StatusCode::FORBIDDEN,
            "error",
            "You are not signed up for this class",
        ));
    }
    Ok(Json(json!({
        "message": "Video URL sent to your email",
        "url": class.url,
    })))
}

// ============================================================================
// INQUIRY + BILLING HANDLERS
// ============================================================================

async fn send_inquiry(
    State(state): State<MockAppState>,
    mut multipart: Multipart,
) -> MockResult<Json<Value>> {
    let mut inquiry = Inquiry::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(bad_request)?;
        match name.as_str() {
            "subject" => inquiry.subject = value,
            "inquiry_message" => inquiry.inquiry_message = value,
            "user_name" => inquiry.user_name = Some(value),
            "user_email" => inquiry.user_email = Some(value),
            _ => {}
        }
    }
    if inquiry.subject.trim().is_empty() || inquiry.inquiry_message.trim().is_empty() {
        return Err(bad_request("Subject and message are required"));
    }
    state.data.write().await.inquiries.push(inquiry);
    Ok(Json(json!({ "message": "Inquiry received" })))
}

async fn list_plans(State(state): State<MockAppState>) -> Json<Vec<Plan>> {
    Json(state.data.read().await.plans.clone())
}

async fn create_checkout(
    State(state): State<MockAppState>,
    headers: HeaderMap,
    Json(body): Json<CheckoutRequest>,
) -> MockResult<Json<Value>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    if !data.plans.iter().any(|p| p.id == body.plan_id) {
        return Err(fail(StatusCode::NOT_FOUND, "error", "Plan not found"));
    }
    Ok(Json(json!({
        "url": format!("https://checkout.mock/session/{}", body.plan_id),
        "session_id": format!("cs_mock_{}", body.plan_id),
    })))
}

async fn subscription_status(
    State(state): State<MockAppState>,
    headers: HeaderMap,
) -> MockResult<Json<SubscriptionStatus>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    Ok(Json(data.subscription.clone()))
}

async fn cancel_subscription(
    State(state): State<MockAppState>,
    headers: HeaderMap,
) -> MockResult<Json<Value>> {
    let mut data = state.data.write().await;
    authorize(&headers, &data)?;
    if !data.subscription.active {
        return Err(bad_request("No active subscription"));
    }
    data.subscription.active = false;
    Ok(Json(json!({ "message": "Subscription cancelled" })))
}

async fn user_image_count(
    State(state): State<MockAppState>,
    headers: HeaderMap,
) -> MockResult<Json<ImageCount>> {
    let data = state.data.read().await;
    authorize(&headers, &data)?;
    Ok(Json(ImageCount {
        total_images: data.member_images(),
    }))
}
