use serde::Serialize;

use crate::db::UserSubmission;

use super::google::ProviderPlace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Provider,
    User,
}

/// A place under consideration for display. Provider-sourced and
/// user-submitted candidates share one shape and one id space so vote
/// totals join across both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub votes: i32,
    pub source: CandidateSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Candidate {
    pub fn from_provider(place: &ProviderPlace) -> Self {
        let (latitude, longitude) = place
            .location
            .map(|l| (l.latitude, l.longitude))
            .unwrap_or_default();

        Self {
            id: place.candidate_id(),
            name: place.name().to_string(),
            address: place.address().to_string(),
            latitude,
            longitude,
            votes: 0,
            source: CandidateSource::Provider,
            types: place.types.clone(),
            rating: place.rating,
            user_rating_count: place.user_rating_count,
            website: place.website_uri.clone(),
            maps_url: place.google_maps_uri.clone(),
            description: None,
        }
    }

    /// Submissions carry no provider id, so the composite form is their
    /// identity from the moment they are created.
    pub fn from_submission(sub: &UserSubmission) -> Self {
        Self {
            id: format!("{}|{}", sub.name, sub.address),
            name: sub.name.clone(),
            address: sub.address.clone(),
            latitude: sub.latitude,
            longitude: sub.longitude,
            votes: 0,
            source: CandidateSource::User,
            types: Vec::new(),
            rating: None,
            user_rating_count: None,
            website: None,
            maps_url: None,
            description: Some(sub.description.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn submission_candidate_uses_composite_id() {
        let sub = UserSubmission {
            id: 1,
            name: "Whispering Wall".to_string(),
            address: "Barossa Valley".to_string(),
            description: "Curved dam wall that carries sound".to_string(),
            latitude: -34.6,
            longitude: 139.0,
            submitter_email: None,
            approved: true,
            submitted_at: Utc::now(),
        };

        let candidate = Candidate::from_submission(&sub);
        assert_eq!(candidate.id, "Whispering Wall|Barossa Valley");
        assert_eq!(candidate.source, CandidateSource::User);
        assert_eq!(candidate.votes, 0);
        assert_eq!(candidate.description.as_deref(), Some("Curved dam wall that carries sound"));
    }

    #[test]
    fn provider_candidate_id_matches_derivation() {
        let place = ProviderPlace {
            id: Some("places/xyz".to_string()),
            ..Default::default()
        };
        let candidate = Candidate::from_provider(&place);
        assert_eq!(candidate.id, "places/xyz");
        assert_eq!(candidate.source, CandidateSource::Provider);
    }
}
