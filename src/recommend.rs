//! Recommendation pipeline: graph match, shape, then score
//!
//! The graph read happens in one read session; scoring runs sequentially
//! afterwards, one estimator call per matched treatment.

use crate::client::{ClientError, GraphClient};
use crate::estimator::{Efficacy, EfficacyEstimator, EstimatorError};
use crate::model::TreatmentMatch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),
}

/// A matched treatment with its efficacy score attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub treatment: TreatmentMatch,
    pub predicted_efficacy: Efficacy,
}

/// Recommend treatments for `patient`.
///
/// An unknown patient, or one without matched symptoms, yields an empty
/// list. The first estimator failure aborts the remaining rows.
pub async fn recommend_treatments(
    client: &dyn GraphClient,
    estimator: &dyn EfficacyEstimator,
    patient: &str,
) -> Result<Vec<Recommendation>, RecommendError> {
    let matches = client.treatment_matches(patient).await?;
    debug!(patient, rows = matches.len(), "Graph match complete");

    let recommendations = matches
        .into_iter()
        .map(|treatment| -> Result<Recommendation, EstimatorError> {
            let predicted_efficacy = estimator.predict(&treatment.name, patient)?;
            Ok(Recommendation {
                treatment,
                predicted_efficacy,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(patient, count = recommendations.len(), "Recommendations ready");
    Ok(recommendations)
}

/// Shared handles to both collaborators, for the web and CLI layers
#[derive(Clone)]
pub struct Recommender {
    client: Arc<dyn GraphClient>,
    estimator: Arc<dyn EfficacyEstimator>,
}

impl Recommender {
    pub fn new(client: Arc<dyn GraphClient>, estimator: Arc<dyn EfficacyEstimator>) -> Self {
        Self { client, estimator }
    }

    pub fn client(&self) -> &Arc<dyn GraphClient> {
        &self.client
    }

    pub async fn recommend(&self, patient: &str) -> Result<Vec<Recommendation>, RecommendError> {
        recommend_treatments(self.client.as_ref(), self.estimator.as_ref(), patient).await
    }
}
