//! Fixed records served by the example profile

use std::collections::BTreeMap;

use serde::Serialize;

/// GET /model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResponse {
    pub model: String,
    pub parameters: BTreeMap<String, i64>,
}

impl ModelResponse {
    pub fn example() -> Self {
        Self {
            model: "modelname".to_string(),
            parameters: BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]),
        }
    }
}

/// GET /behaviour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviourResponse {
    pub name: String,
    pub value: f64,
    pub threshold: f64,
}

impl BehaviourResponse {
    pub fn example() -> Self {
        Self {
            name: "avg".to_string(),
            value: 50.0,
            threshold: 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_model_body() {
        assert_eq!(
            serde_json::to_string(&ModelResponse::example()).unwrap(),
            r#"{"model":"modelname","parameters":{"a":1,"b":2}}"#
        );
    }

    #[test]
    fn test_example_behaviour_body() {
        assert_eq!(
            serde_json::to_string(&BehaviourResponse::example()).unwrap(),
            r#"{"name":"avg","value":50.0,"threshold":1.2}"#
        );
    }
}
