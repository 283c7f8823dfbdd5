//! Catalog entities

use serde::{Deserialize, Serialize};

use super::id::CatalogId;
use crate::domain::storage::StorageEntity;

/// Static descriptor of a model architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltInModelType {
    /// Display name, unique within the catalog
    name: String,

    description: String,

    /// Free-form loss function label
    loss_function: String,

    /// Accepted datatypes, positionally paired with `is_categorical`
    allowed_datatype: Vec<String>,

    is_categorical: Vec<bool>,
}

impl BuiltInModelType {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        loss_function: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            loss_function: loss_function.into(),
            allowed_datatype: Vec::new(),
            is_categorical: Vec::new(),
        }
    }

    /// Builder-style method to append a datatype with its categorical flag
    pub fn with_datatype(mut self, datatype: impl Into<String>, categorical: bool) -> Self {
        self.allowed_datatype.push(datatype.into());
        self.is_categorical.push(categorical);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn loss_function(&self) -> &str {
        &self.loss_function
    }

    pub fn allowed_datatype(&self) -> &[String] {
        &self.allowed_datatype
    }

    pub fn is_categorical(&self) -> &[bool] {
        &self.is_categorical
    }
}

impl StorageEntity for BuiltInModelType {
    type Key = String;

    const COLLECTION: &'static str = "built_in_model_types";

    fn key(&self) -> &Self::Key {
        &self.name
    }
}

/// Concrete trained artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    id: CatalogId,
    name: String,
    dataset_name: String,

    /// Tensor shape encoded as `(d1xd2x...xdn)`
    input_shape: String,

    /// Algorithm label, not checked against the built-in types
    algorithm_name: String,

    /// Size with unit suffix, e.g. `18B`
    size: String,

    /// Version history, base version first
    version_ids: Vec<CatalogId>,
}

impl TrainedModel {
    pub fn new(
        id: impl Into<CatalogId>,
        name: impl Into<String>,
        dataset_name: impl Into<String>,
        input_shape: impl Into<String>,
        algorithm_name: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            id,
            name: name.into(),
            dataset_name: dataset_name.into(),
            input_shape: input_shape.into(),
            algorithm_name: algorithm_name.into(),
            size: size.into(),
            version_ids: vec![id],
        }
    }

    /// Builder-style method to replace the version history
    pub fn with_versions(mut self, version_ids: impl IntoIterator<Item = i64>) -> Self {
        self.version_ids = version_ids.into_iter().map(CatalogId::new).collect();
        self
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn input_shape(&self) -> &str {
        &self.input_shape
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn version_ids(&self) -> &[CatalogId] {
        &self.version_ids
    }
}

impl StorageEntity for TrainedModel {
    type Key = CatalogId;

    const COLLECTION: &'static str = "trained_models";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Typed parameter of a behaviour function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    name: String,

    /// Type tag such as `float`, `int`, `string` or `boolean`
    #[serde(rename = "type")]
    param_type: String,
}

impl FunctionParameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> &str {
        &self.param_type
    }
}

/// Named, parameterized rule applied elsewhere in the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behaviour {
    id: CatalogId,
    name: String,
    description: String,

    /// Symbolic function name, resolved by the consumer
    function_reference: String,

    function_parameters: Vec<FunctionParameter>,
}

impl Behaviour {
    pub fn new(
        id: impl Into<CatalogId>,
        name: impl Into<String>,
        description: impl Into<String>,
        function_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            function_reference: function_reference.into(),
            function_parameters: Vec::new(),
        }
    }

    /// Builder-style method to append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, param_type: impl Into<String>) -> Self {
        self.function_parameters
            .push(FunctionParameter::new(name, param_type));
        self
    }

    /// Builder-style method to replace all parameters
    pub fn with_parameters(mut self, parameters: Vec<FunctionParameter>) -> Self {
        self.function_parameters = parameters;
        self
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn function_reference(&self) -> &str {
        &self.function_reference
    }

    pub fn function_parameters(&self) -> &[FunctionParameter] {
        &self.function_parameters
    }
}

impl StorageEntity for Behaviour {
    type Key = CatalogId;

    const COLLECTION: &'static str = "behaviours";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Snapshot of both model collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    pub built_in: Vec<BuiltInModelType>,
    pub trained_models: Vec<TrainedModel>,
}
