//! Workout plan endpoints

use std::sync::Arc;

use reqwest::Method;

use error_types::Result;

use crate::gateway::Gateway;
use crate::models::{GoalType, WorkoutPlan};

const BASE: &str = "/workouts/";

pub struct WorkoutsApi {
    gateway: Arc<dyn Gateway>,
}

impl WorkoutsApi {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /workouts/`, optionally filtered by `goal_type`.
    pub async fn list(&self, goal: Option<GoalType>) -> Result<Vec<WorkoutPlan>> {
        let path = match goal {
            Some(goal) => format!("{BASE}?goal_type={}", goal.as_query()),
            None => BASE.to_string(),
        };
        let body = self.gateway.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }

    /// `GET /workouts/{id}/`
    pub async fn get(&self, id: i64) -> Result<WorkoutPlan> {
        let path = format!("{BASE}{id}/");
        let body = self.gateway.send(Method::GET, &path, None).await?;
        Ok(serde_json::from_value(body.into_json()?)?)
    }
}
