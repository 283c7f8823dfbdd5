//! Catalog dataset validation

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::entity::{Behaviour, BuiltInModelType, TrainedModel};
use super::id::CatalogId;

/// Tensor shape such as `(9x5x1x2)`
static INPUT_SHAPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([1-9][0-9]*(x[1-9][0-9]*)*\)$").unwrap());

/// Size with a unit suffix such as `18B` or `3KB`
static SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+[A-Za-z]+$").unwrap());

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValidationError {
    /// Datatype and categorical flags are not positionally paired
    UnpairedDatatypes {
        model: String,
        datatypes: usize,
        flags: usize,
    },
    /// Built-in model name used twice
    DuplicateName { name: String },
    /// Identifier is zero or negative
    NonPositiveId { kind: &'static str, id: CatalogId },
    /// Identifier used twice within one entity kind
    DuplicateId { kind: &'static str, id: CatalogId },
    /// Trained model without any version
    EmptyVersions { id: CatalogId },
    /// Input shape not in `(d1x...xdn)` form
    InvalidInputShape { id: CatalogId, shape: String },
    /// Size without a unit suffix
    InvalidSize { id: CatalogId, size: String },
    /// Parameter with an empty name or type tag
    InvalidParameter { behaviour: CatalogId },
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnpairedDatatypes {
                model,
                datatypes,
                flags,
            } => write!(
                f,
                "Built-in model '{}' has {} datatypes but {} categorical flags",
                model, datatypes, flags
            ),
            Self::DuplicateName { name } => write!(f, "Duplicate built-in model '{}'", name),
            Self::NonPositiveId { kind, id } => {
                write!(f, "{} id {} must be positive", kind, id)
            }
            Self::DuplicateId { kind, id } => write!(f, "Duplicate {} id {}", kind, id),
            Self::EmptyVersions { id } => {
                write!(f, "Trained model {} has no version ids", id)
            }
            Self::InvalidInputShape { id, shape } => write!(
                f,
                "Trained model {} has invalid input shape '{}': expected (d1x...xdn)",
                id, shape
            ),
            Self::InvalidSize { id, size } => write!(
                f,
                "Trained model {} has invalid size '{}': expected digits with a unit suffix",
                id, size
            ),
            Self::InvalidParameter { behaviour } => write!(
                f,
                "Behaviour {} has a parameter with an empty name or type",
                behaviour
            ),
        }
    }
}

impl std::error::Error for CatalogValidationError {}

/// Validate a single input shape string
pub fn validate_input_shape(shape: &str) -> bool {
    INPUT_SHAPE_PATTERN.is_match(shape)
}

pub fn validate_built_in_types(models: &[BuiltInModelType]) -> Result<(), CatalogValidationError> {
    let mut names = HashSet::new();

    for model in models {
        if model.allowed_datatype().len() != model.is_categorical().len() {
            return Err(CatalogValidationError::UnpairedDatatypes {
                model: model.name().to_string(),
                datatypes: model.allowed_datatype().len(),
                flags: model.is_categorical().len(),
            });
        }

        if !names.insert(model.name()) {
            return Err(CatalogValidationError::DuplicateName {
                name: model.name().to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_trained_models(models: &[TrainedModel]) -> Result<(), CatalogValidationError> {
    const KIND: &str = "Trained model";
    let mut ids = HashSet::new();

    for model in models {
        check_id(KIND, model.id(), &mut ids)?;

        if model.version_ids().is_empty() {
            return Err(CatalogValidationError::EmptyVersions { id: model.id() });
        }

        if !validate_input_shape(model.input_shape()) {
            return Err(CatalogValidationError::InvalidInputShape {
                id: model.id(),
                shape: model.input_shape().to_string(),
            });
        }

        if !SIZE_PATTERN.is_match(model.size()) {
            return Err(CatalogValidationError::InvalidSize {
                id: model.id(),
                size: model.size().to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_behaviours(behaviours: &[Behaviour]) -> Result<(), CatalogValidationError> {
    const KIND: &str = "Behaviour";
    let mut ids = HashSet::new();

    for behaviour in behaviours {
        check_id(KIND, behaviour.id(), &mut ids)?;

        let malformed = behaviour
            .function_parameters()
            .iter()
            .any(|p| p.name().is_empty() || p.param_type().is_empty());

        if malformed {
            return Err(CatalogValidationError::InvalidParameter {
                behaviour: behaviour.id(),
            });
        }
    }

    Ok(())
}

fn check_id(
    kind: &'static str,
    id: CatalogId,
    seen: &mut HashSet<CatalogId>,
) -> Result<(), CatalogValidationError> {
    if id.value() <= 0 {
        return Err(CatalogValidationError::NonPositiveId { kind, id });
    }

    if !seen.insert(id) {
        return Err(CatalogValidationError::DuplicateId { kind, id });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_shape_format() {
        assert!(validate_input_shape("(9x5x1x2)"));
        assert!(validate_input_shape("(12)"));
        assert!(!validate_input_shape("9x5"));
        assert!(!validate_input_shape("(9x)"));
        assert!(!validate_input_shape("(0x5)"));
        assert!(!validate_input_shape("()"));
    }

    #[test]
    fn test_unpaired_datatypes_rejected() {
        let model: BuiltInModelType = serde_json::from_value(serde_json::json!({
            "name": "CNN",
            "description": "desc",
            "loss_function": "loss",
            "allowed_datatype": ["string", "string"],
            "is_categorical": [true]
        }))
        .unwrap();

        let err = validate_built_in_types(&[model]).unwrap_err();
        assert_eq!(
            err,
            CatalogValidationError::UnpairedDatatypes {
                model: "CNN".to_string(),
                datatypes: 2,
                flags: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_trained_model_id_rejected() {
        let models = vec![
            TrainedModel::new(1, "a", "ds", "(1x2)", "MLP", "18B"),
            TrainedModel::new(1, "b", "ds", "(1x2)", "MLP", "18B"),
        ];

        let err = validate_trained_models(&models).unwrap_err();
        assert!(matches!(err, CatalogValidationError::DuplicateId { .. }));
    }

    #[test]
    fn test_trained_model_formats() {
        let bad_shape = TrainedModel::new(1, "a", "ds", "1x2", "MLP", "18B");
        assert!(matches!(
            validate_trained_models(&[bad_shape]),
            Err(CatalogValidationError::InvalidInputShape { .. })
        ));

        let bad_size = TrainedModel::new(1, "a", "ds", "(1x2)", "MLP", "18");
        assert!(matches!(
            validate_trained_models(&[bad_size]),
            Err(CatalogValidationError::InvalidSize { .. })
        ));

        let no_versions =
            TrainedModel::new(1, "a", "ds", "(1x2)", "MLP", "18B").with_versions(Vec::new());
        assert!(matches!(
            validate_trained_models(&[no_versions]),
            Err(CatalogValidationError::EmptyVersions { .. })
        ));
    }

    #[test]
    fn test_behaviour_ids_must_be_positive() {
        let behaviour = Behaviour::new(0, "Zero", "desc", "zero_function");
        let err = validate_behaviours(&[behaviour]).unwrap_err();
        assert_eq!(err.to_string(), "Behaviour id 0 must be positive");
    }

    #[test]
    fn test_behaviour_parameter_tags_required() {
        let behaviour = Behaviour::new(1, "Empty", "desc", "f").with_parameter("min", "");
        assert!(matches!(
            validate_behaviours(&[behaviour]),
            Err(CatalogValidationError::InvalidParameter { .. })
        ));
    }
}
