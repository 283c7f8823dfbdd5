//! Literal seed datasets

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::entity::{Behaviour, BuiltInModelType, TrainedModel};
use super::validation::{
    validate_behaviours, validate_built_in_types, validate_trained_models, CatalogValidationError,
};

const DEFAULT_DESCRIPTION: &str = "A default description";
const DEFAULT_LOSS_FUNCTION: &str = "A loss function";
const DEFAULT_DATASET: &str = "A dataset";
const DEFAULT_SIZE: &str = "18B";

/// Which fixed dataset the seeder writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Threshold and normalization behaviours
    #[default]
    Catalog,
    /// Generic sample behaviours used by the persisted GraphQL backend
    Sample,
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catalog" | "default" => Ok(Self::Catalog),
            "sample" | "samples" => Ok(Self::Sample),
            other => Err(format!("Unknown dataset '{}'", other)),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Sample => write!(f, "sample"),
        }
    }
}

/// Full set of records written by one seeding pass
#[derive(Debug, Clone)]
pub struct CatalogDataset {
    pub built_in: Vec<BuiltInModelType>,
    pub trained_models: Vec<TrainedModel>,
    pub behaviours: Vec<Behaviour>,
}

impl CatalogDataset {
    pub fn load(dataset: Dataset) -> Self {
        let behaviours = match dataset {
            Dataset::Catalog => catalog_behaviours(),
            Dataset::Sample => sample_behaviours(),
        };

        Self {
            built_in: built_in_model_types(),
            trained_models: trained_models(),
            behaviours,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        validate_built_in_types(&self.built_in)?;
        validate_trained_models(&self.trained_models)?;
        validate_behaviours(&self.behaviours)
    }
}

fn built_in(name: &str) -> BuiltInModelType {
    BuiltInModelType::new(name, DEFAULT_DESCRIPTION, DEFAULT_LOSS_FUNCTION)
}

fn trained(id: i64, name: &str, input_shape: &str, algorithm_name: &str) -> TrainedModel {
    TrainedModel::new(id, name, DEFAULT_DATASET, input_shape, algorithm_name, DEFAULT_SIZE)
}

pub fn built_in_model_types() -> Vec<BuiltInModelType> {
    vec![
        built_in("Diffusion Models")
            .with_datatype("string", true)
            .with_datatype("string", true),
        built_in("Variational Autoencoders (VAEs)").with_datatype("string", true),
        built_in("Multilayer Perceptron (MLP)").with_datatype("string", true),
        built_in("Convolutional Neural Networks (CNN)").with_datatype("string", true),
        built_in("Recurrent Neural Networks (RNN)")
            .with_datatype("string", true)
            .with_datatype("string", true),
    ]
}

pub fn trained_models() -> Vec<TrainedModel> {
    vec![
        trained(1, "model7", "(9x5x1x2)", "T-VAEs"),
        trained(2, "model4", "(7x8x7x2)", "Multilayer Perceptron (MLP)"),
        trained(3, "model8", "(7x9x4x3)", "Generative Adversarial Networks (GAN)")
            .with_versions([3, 9, 10, 11, 12]),
        trained(4, "model5", "(7x1x8x1)", "Generative Adversarial Networks (GAN)"),
        trained(5, "model2", "(1x1x5x4)", "Transformers"),
        trained(6, "model6", "(3x8x3x5)", "Convolutional Neural Networks (CNN)"),
        trained(7, "model3", "(7x9x8x2)", "T-VAEs").with_versions([7, 13, 14, 15, 16]),
        trained(8, "model1", "(4x9x5x6)", "Generative Adversarial Networks (GAN)"),
    ]
}

pub fn catalog_behaviours() -> Vec<Behaviour> {
    vec![
        Behaviour::new(
            1,
            "Threshold",
            "Defines upper and lower limits for a metric",
            "threshold_function",
        )
        .with_parameter("min", "float")
        .with_parameter("max", "float"),
        Behaviour::new(
            2,
            "Normalization",
            "Scales data to a specific range",
            "normalization_function",
        )
        .with_parameter("min", "float")
        .with_parameter("max", "float")
        .with_parameter("avg", "float"),
    ]
}

pub fn sample_behaviours() -> Vec<Behaviour> {
    vec![
        Behaviour::new(
            1,
            "SampleBehaviour1",
            "This is the first sample behaviour.",
            "function1",
        )
        .with_parameter("param1", "string")
        .with_parameter("param2", "int"),
        Behaviour::new(
            2,
            "SampleBehaviour2",
            "This is the second sample behaviour.",
            "function2",
        )
        .with_parameter("paramA", "float")
        .with_parameter("paramB", "boolean"),
    ]
}
