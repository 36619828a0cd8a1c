use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::db;
use crate::error::AppError;
use crate::places::{compose_search_phrase, is_unique_place, Candidate, GoogleClient, LatLng};

pub const PAGE_SIZE: usize = 6;
pub const DEFAULT_RADIUS_MILES: f64 = 20.0;

const METERS_PER_MILE: f64 = 1609.34;
const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Planar rectangular approximation of a circular search radius. Not
/// geodesic; close enough for filtering submissions near a city.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    pub fn around(center: LatLng, radius_miles: f64) -> Self {
        let meters = radius_miles * METERS_PER_MILE;
        let half_height = meters / METERS_PER_DEGREE_LAT;
        let half_width = meters / (METERS_PER_DEGREE_LAT * center.lat.to_radians().cos());

        Self {
            lat_min: center.lat - half_height,
            lat_max: center.lat + half_height,
            lng_min: center.lng - half_width,
            lng_max: center.lng + half_width,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub places: Vec<Candidate>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// One ranked, paginated result set: geocode, provider search with a
/// randomized phrase, uniqueness filter, merge with nearby approved
/// submissions, attach vote totals, sort, slice.
pub async fn run_search(
    pool: &PgPool,
    google: &GoogleClient,
    query: &str,
    radius_miles: Option<f64>,
    page: Option<i64>,
    rng: &mut impl Rng,
) -> Result<SearchPage, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Missing or invalid query".to_string()));
    }

    let center = google.geocode(query).await?.ok_or(AppError::Geocode)?;

    let phrase = compose_search_phrase(query, rng);
    let raw = google.search_text(&phrase).await?;

    let provider: Vec<Candidate> = raw
        .iter()
        .filter(|p| is_unique_place(p.name(), &p.types))
        .map(Candidate::from_provider)
        .collect();

    let bbox = BoundingBox::around(center, effective_radius(radius_miles));
    let submissions = db::approved_submissions_in_box(pool, &bbox).await?;
    let user: Vec<Candidate> = submissions.iter().map(Candidate::from_submission).collect();

    let ids: Vec<String> = user
        .iter()
        .chain(provider.iter())
        .map(|c| c.id.clone())
        .collect();
    let votes = db::get_votes(pool, &ids).await?;

    let merged = rank(user, provider, &votes);
    Ok(paginate(merged, effective_page(page)))
}

/// A non-positive or missing radius falls back to the default rather
/// than producing a degenerate bounding box.
pub fn effective_radius(radius_miles: Option<f64>) -> f64 {
    match radius_miles {
        Some(r) if r > 0.0 => r,
        _ => DEFAULT_RADIUS_MILES,
    }
}

pub fn effective_page(page: Option<i64>) -> usize {
    match page {
        Some(p) if p > 0 => p as usize,
        _ => 1,
    }
}

/// Attach vote totals, then order the page: user submissions first, in
/// store order, followed by provider candidates by votes descending.
/// The sort is stable so tied provider candidates keep arrival order.
pub fn rank(
    mut user: Vec<Candidate>,
    mut provider: Vec<Candidate>,
    votes: &HashMap<String, i32>,
) -> Vec<Candidate> {
    for c in user.iter_mut().chain(provider.iter_mut()) {
        c.votes = votes.get(&c.id).copied().unwrap_or(0);
    }

    provider.sort_by(|a, b| b.votes.cmp(&a.votes));

    user.extend(provider);
    user
}

/// Fixed page size; a page past the end yields an empty slice with the
/// totals intact.
pub fn paginate(all: Vec<Candidate>, page: usize) -> SearchPage {
    let total = all.len();
    let total_pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;
    let start = (page - 1) * PAGE_SIZE;
    let places: Vec<Candidate> = all.into_iter().skip(start).take(PAGE_SIZE).collect();

    SearchPage {
        places,
        page,
        total_pages,
        total,
    }
}
